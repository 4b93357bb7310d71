//! Error types for GEC

use thiserror::Error;

/// Main error type for classification runs
///
/// The three domain variants map onto the pipeline's failure taxonomy:
/// `Format` for a malformed abundance table, `Config` for parameter
/// resolution failures, `Data` for replicate-group discovery problems.
/// All of them are fatal; no partial output is written.
#[derive(Error, Debug)]
pub enum GecError {
    #[error("Format error: {reason}")]
    Format { reason: String },

    #[error("Config error: {reason}")]
    Config { reason: String },

    #[error("Data error: {reason}")]
    Data { reason: String },

    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: String, got: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),
}

impl GecError {
    pub fn format(reason: impl Into<String>) -> Self {
        GecError::Format {
            reason: reason.into(),
        }
    }

    pub fn config(reason: impl Into<String>) -> Self {
        GecError::Config {
            reason: reason.into(),
        }
    }

    pub fn data(reason: impl Into<String>) -> Self {
        GecError::Data {
            reason: reason.into(),
        }
    }
}

/// Result type alias for GEC operations
pub type Result<T> = std::result::Result<T, GecError>;
