//! Error types for the command-line front end.

/// Errors that can occur while decoding command-line parameters.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The `--params` argument is not valid JSON.
    #[error("Invalid JSON parameters: {0}")]
    Json(#[from] serde_json::Error),

    /// The parameters are valid JSON but not an array.
    #[error("Parameters must be a JSON array, found {0}")]
    NotAnArray(&'static str),

    /// A `{"$date": ...}` value is not an RFC 3339 timestamp.
    #[error("Parameter {index}: invalid timestamp {value:?}: {source}")]
    Timestamp {
        /// Position of the parameter (or of the enclosing parameter).
        index: usize,
        /// The rejected text.
        value: String,
        /// Why it was rejected.
        source: chrono::ParseError,
    },

    /// A `{"$raw": ...}` or `{"$date": ...}` value is not a string.
    #[error("Parameter {index}: `{marker}` expects a string")]
    MarkerType {
        /// Position of the parameter (or of the enclosing parameter).
        index: usize,
        /// The marker key.
        marker: &'static str,
    },

    /// A JSON integer outside the `i64` range.
    #[error("Parameter {index}: integer {number} is out of range")]
    Number {
        /// Position of the parameter (or of the enclosing parameter).
        index: usize,
        /// The number as written.
        number: String,
    },
}

/// Result type for command-line operations.
pub type Result<T> = std::result::Result<T, CliError>;
