//! Error types shared between the adapter and the feed driver.
//!
//! The `GraphError` enum unifies I/O, serialization, configuration and engine
//! failures so every crate in the workspace can propagate a single error type.
//! Missing infrastructure (no engine, no rendering surface, no table) is not an
//! error: the adapter degrades to a no-op instead.
use std::io;
use std::sync::PoisonError;

use thiserror::Error;

/// Unified error type shared by the workspace.
#[derive(Error, Debug)]
pub enum GraphError {
    /// I/O error originating from files or the standard streams.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic formatting/validation error with a human-readable message.
    #[error("Format error: {0}")]
    Format(String),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Error while parsing the ticker file into `Ticker` values.
    #[error("Parse tickers file error: {0}")]
    ParseTickersFile(String),

    /// A view setting refers to a column the table schema does not declare.
    #[error("Unknown column `{column}` in `{setting}`")]
    UnknownColumn {
        /// Offending column name.
        column: String,
        /// Attribute that referenced it (e.g. `row-pivots`).
        setting: String,
    },

    /// The visualization engine rejected an operation. Passed through as-is.
    #[error("Visualization engine error: {0}")]
    Engine(String),

    /// Error indicating a poisoned mutex/lock was encountered.
    #[error("Mutex Lock Poisoned: {0}")]
    MutexLock(String),
}

impl<T> From<PoisonError<T>> for GraphError {
    fn from(err: PoisonError<T>) -> Self {
        GraphError::MutexLock(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_column_message_names_setting() {
        let err = GraphError::UnknownColumn {
            column: "volume".to_string(),
            setting: "columns".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown column `volume` in `columns`");
    }

    #[test]
    fn io_errors_convert() {
        let err: GraphError = io::Error::new(io::ErrorKind::NotFound, "missing").into();
        assert!(matches!(err, GraphError::Io(_)));
    }
}
