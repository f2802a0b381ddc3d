//! Result and error types for covpaint.
//!
//! The printer itself never fails: a line without coverage data is an
//! ordinary answer, not an error. These errors belong to the surfaces that
//! load and validate coverage snapshots.

use thiserror::Error;

/// Result type for covpaint operations
pub type CovpaintResult<T> = Result<T, CovpaintError>;

/// Errors that can occur while loading coverage snapshots
#[derive(Debug, Error)]
pub enum CovpaintError {
    /// Snapshot violates the per-file invariants
    #[error("Invalid coverage model for {path}: {message}")]
    InvalidModel {
        /// File the model describes
        path: String,
        /// What is wrong with it
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CovpaintError {
    /// Create an invalid model error
    #[must_use]
    pub fn invalid_model(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidModel {
            path: path.into(),
            message: message.into(),
        }
    }
}
