//! Error types for maintlog
//!
//! Defines the error enum covering the failure modes of the history store,
//! its storage backends, configuration and the work-order integration.
//! Uses thiserror for ergonomic error handling.

use crate::history::DeleteValidation;
use thiserror::Error;

/// Result type alias for maintlog operations
pub type Result<T> = std::result::Result<T, MaintlogError>;

/// Error type for maintlog operations
#[derive(Error, Debug)]
pub enum MaintlogError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Key-value storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Writing a key would exceed the storage quota
    #[error("Storage quota exceeded writing '{key}': {needed} bytes needed, limit is {limit}")]
    QuotaExceeded { key: String, needed: u64, limit: u64 },

    /// Parsing errors (persisted data, command-line values)
    #[error("Parse error: {0}")]
    Parse(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Report not found
    #[error("Report not found: {0}")]
    ReportNotFound(String),

    /// Interactive input rejected before any state change
    #[error("Validation error: {0}")]
    Validation(#[from] DeleteValidation),

    /// Work-order board errors
    #[error("Work-order error: {0}")]
    WorkOrder(#[from] workorders::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl MaintlogError {
    /// Whether the error came from the durable storage layer
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            MaintlogError::Storage(_)
                | MaintlogError::QuotaExceeded { .. }
                | MaintlogError::Io(_)
                | MaintlogError::Json(_)
        )
    }
}
