//! Result type alias shared across the workspace.
//!
//! This module defines a convenient alias that defaults the error type to the
//! common `GraphError`, so functions can simply return `Result<T>`.
use crate::error::GraphError;

/// Workspace-wide `Result` alias with `GraphError` as the default error.
pub type Result<T, E = GraphError> = std::result::Result<T, E>;
