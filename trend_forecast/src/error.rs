//! Error types for the trend_forecast crate

use thiserror::Error;

/// Custom error types for the trend_forecast crate
#[derive(Debug, Error)]
pub enum TrendError {
    /// The requested projection range is malformed
    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Not enough observations for the requested operation
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Unexpected fault during projection
    #[error("Computation error: {0}")]
    Computation(String),

    /// Error from JSON serialization
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, TrendError>;
