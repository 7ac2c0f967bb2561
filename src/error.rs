//! Error types for the Narcissus scanner

use thiserror::Error;

/// Main error type for Narcissus operations
#[derive(Debug, Error)]
pub enum NarcissusError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Template error: {0}")]
    TemplateError(#[from] tera::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("No payloads loaded from '{0}'")]
    NoPayloads(String),
}

/// Result type alias for Narcissus operations
pub type Result<T> = std::result::Result<T, NarcissusError>;
