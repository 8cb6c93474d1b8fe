use thiserror::Error;

/// Top-level error type for the Sunshine services.
///
/// Each variant wraps a subsystem-specific error. Subsystem crates define
/// their own error types and implement `From<SubsystemError> for
/// SunshineError` so that the `?` operator works seamlessly across crate
/// boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SunshineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Assistant error: {0}")]
    Assistant(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for SunshineError {
    fn from(err: toml::de::Error) -> Self {
        SunshineError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for SunshineError {
    fn from(err: toml::ser::Error) -> Self {
        SunshineError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for SunshineError {
    fn from(err: serde_json::Error) -> Self {
        SunshineError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Sunshine operations.
pub type Result<T> = std::result::Result<T, SunshineError>;
