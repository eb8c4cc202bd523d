use std::path::PathBuf;

use thiserror::Error;

/// Result type for the dashboard data pipeline.
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Failure conditions surfaced by the data pipeline.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The source dataset is missing, unreadable or malformed. Fatal for rendering.
    #[error("dataset unavailable ({}): {reason}", .path.display())]
    DataUnavailable {
        /// File that was being loaded.
        path: PathBuf,
        /// Full context chain of the underlying failure.
        reason: String,
    },

    /// The current filter selection matched no rows.
    #[error("no data for the current filter selection")]
    EmptySelection,

    /// Percentage share requested over values that sum to zero.
    #[error("cannot compute share of total: values sum to zero")]
    DivisionByZero,

    /// Configuration file could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl DashboardError {
    /// Whether this error is recoverable by changing the filters.
    pub fn is_empty_selection(&self) -> bool {
        matches!(self, DashboardError::EmptySelection)
    }
}
