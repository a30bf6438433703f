/// Error types for the stats dashboard core
use thiserror::Error;

/// Main error type for chart and legend operations
#[derive(Error, Debug)]
pub enum StatsError {
    /// No chart is registered under the given id
    #[error("Chart not found: {0}")]
    ChartNotFound(String),

    /// No legend is rendered in the given container, or the entry index is out of range
    #[error("Legend entry not found: {container} #{index}")]
    LegendNotFound { container: String, index: usize },

    /// Failed to decode a stats response
    #[error("Failed to parse stats response: {0}")]
    Json(#[from] serde_json::Error),
}

/// Type alias for Results using StatsError
pub type Result<T> = std::result::Result<T, StatsError>;
