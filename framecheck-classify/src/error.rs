//! Classifier error types.

use thiserror::Error;

/// Classification errors.
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// A tunable threshold is outside its sane range.
    #[error("Invalid parameter {name}: {reason} (got {value})")]
    InvalidThreshold {
        /// Parameter name as exposed to callers.
        name: &'static str,
        /// The rejected value.
        value: f64,
        /// Why the value was rejected.
        reason: &'static str,
    },

    /// The expected frame interval is unusable.
    #[error("Invalid expected interval: {0} ms")]
    InvalidInterval(f64),
}

impl From<ClassifyError> for framecheck_core::Error {
    fn from(e: ClassifyError) -> Self {
        framecheck_core::Error::InvalidParameter(e.to_string())
    }
}

/// Result type for classification operations.
pub type Result<T> = std::result::Result<T, ClassifyError>;
