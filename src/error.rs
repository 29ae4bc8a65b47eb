//! Error types for the sheet generator.
//!
//! This module defines all error types that can occur while loading codes,
//! laying them out and writing the PDF document.

/// Result type alias for sheet generation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during sheet generation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Required column missing from the input table
    #[error("Missing required column '{column}' (found: {available:?})")]
    Schema {
        /// Column that was requested
        column: String,
        /// Columns present in the header row
        available: Vec<String>,
    },

    /// Payload cannot be represented by the symbol encoder
    #[error("Cannot encode '{code}' as a QR symbol: {reason}")]
    Encoding {
        /// The code that failed to encode
        code: String,
        /// Reason reported by the encoder
        reason: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Table parsing or writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Image buffer error
    #[error("Image error: {0}")]
    Image(String),

    /// Layout parameters outside their valid range
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    /// Malformed configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Random token generation could not reach the requested count
    #[error(
        "Generated only {produced} of {requested} unique codes after {attempts} attempts"
    )]
    TokenSpaceExhausted {
        /// Number of codes requested
        requested: usize,
        /// Number of distinct codes produced before giving up
        produced: usize,
        /// Number of tokens drawn
        attempts: usize,
    },
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.to_string())
    }
}
