// Error types for settings loading

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load settings: {0}")]
    LoadError(String),

    #[error("Failed to parse settings: {0}")]
    ParseError(String),

    #[error("Invalid setting `{key}`: {reason}")]
    ValidationError { key: String, reason: String },

    #[error("Deserialization error: {0}")]
    DeserializationError(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
