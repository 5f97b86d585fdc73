//! Metric extraction error types.

use thiserror::Error;

/// Metric extraction errors.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// Invalid frame data.
    #[error("Invalid frame: {0}")]
    InvalidFrame(String),

    /// Invalid configuration value.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl From<MetricsError> for framecheck_core::Error {
    fn from(e: MetricsError) -> Self {
        match e {
            MetricsError::InvalidFrame(msg) => framecheck_core::Error::Decode(msg),
            MetricsError::InvalidParameter(msg) => framecheck_core::Error::InvalidParameter(msg),
        }
    }
}

/// Result type for metric extraction.
pub type Result<T> = std::result::Result<T, MetricsError>;
