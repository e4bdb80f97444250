//! Error types for the trade analyzer.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the trade analyzer.
///
/// Every variant is fatal for a batch run: there is no partial-success mode.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid invocation (wrong argument count, unknown flag).
    #[error("Usage error: {0}")]
    Usage(String),

    /// Source document is not well-formed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A record carries a field that cannot be coerced or is missing.
    #[error("Input format error in {record}, field {field}: {message}")]
    InputFormat {
        /// Which record (or group) the problem was found in.
        record: String,
        /// Name of the offending field.
        field: String,
        /// What was wrong with it.
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Result sink failure.
    #[error("Output error: {0}")]
    Output(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a usage error.
    pub fn usage(msg: impl Into<String>) -> Self {
        Error::Usage(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Error::Parse(msg.into())
    }

    /// Create an input format error.
    pub fn input_format(
        record: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Error::InputFormat {
            record: record.into(),
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create an output error.
    pub fn output(msg: impl Into<String>) -> Self {
        Error::Output(msg.into())
    }

    /// Short classification used in the final log line.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Usage(_) => "UsageError",
            Error::Parse(_) => "ParseError",
            Error::InputFormat { .. } => "InputFormatError",
            Error::Config(_) => "ConfigError",
            Error::Output(_) => "OutputError",
            Error::Io(_) => "IoError",
            Error::Json(_) => "JsonError",
            Error::Other(_) => "Error",
        }
    }
}
