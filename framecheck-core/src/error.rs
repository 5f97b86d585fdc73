//! Error types shared across the framecheck workspace.

use thiserror::Error;

/// Main error type for framecheck operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The frame source cannot produce frames (corrupt/unsupported input).
    /// Fatal to the run; no partial report is emitted.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The frame sink rejected an annotated frame.
    #[error("Encode error: {0}")]
    Encode(String),

    /// A tunable parameter is outside its sane range. Rejected before
    /// processing starts.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The source produced zero decodable frames. Callers report this as
    /// an empty result, not a crash.
    #[error("Empty input: no decodable frames")]
    EmptyInput,

    /// The analysis run was cancelled by the caller.
    #[error("Operation cancelled")]
    Cancelled,

    /// I/O errors from sources and sinks.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for framecheck operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a decode error.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create an encode error.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Create an invalid parameter error.
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Check whether this error must abort the whole run.
    ///
    /// Everything except an empty input aborts; per-frame anomalies are
    /// captured as data rather than surfaced here.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::EmptyInput)
    }
}
