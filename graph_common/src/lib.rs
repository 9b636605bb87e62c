//!
//! Common types shared by the stream adapter and the feed driver.
//!
//! This crate aggregates:
//! - `error` — unified error type `GraphError` used across the workspace.
//! - `result` — handy `Result<T, GraphError>` alias.
//! - `snapshot` — upstream quote snapshots and the identity-compared `Batch`.
//! - `schema` — the column schema of the visualization table and its row type.
//! - `tickers` — ticker symbols and parsing helpers for the feed driver.
#![warn(missing_docs)]
pub mod error;
pub mod result;
pub mod schema;
pub mod snapshot;
pub mod tickers;

pub use error::GraphError;
pub use result::Result;
pub use schema::{ColumnType, Schema, VisualizationRow};
pub use snapshot::{Batch, QuoteSnapshot, TopOfBook};
