//! Defines the custom error types for the mailbox-layer client.

use serde_json::Value;
use std::fmt;
use std::io;
use thiserror::Error;
use url::ParseError as UrlParseError;

/// Failure reported by the validation API through its `success: false` envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    message: String,
    code: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
        }
    }

    /// Builds the error from the `error` object of an API response.
    ///
    /// The API sends `code` either as a string or as an integer; both are
    /// kept as their textual form. Missing members become empty strings.
    pub fn from_envelope(error: Option<&Value>) -> Self {
        let message = error
            .and_then(|e| e.get("info"))
            .map(scalar_to_string)
            .unwrap_or_default();
        let code = error
            .and_then(|e| e.get("code"))
            .map(scalar_to_string)
            .unwrap_or_default();
        Self { message, code }
    }

    /// Human-readable message supplied by the API (`error.info`).
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Short error code supplied by the API (`error.code`).
    pub fn code(&self) -> &str {
        &self.code
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl std::error::Error for ValidationError {}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// The primary error type for the validation client.
#[derive(Error, Debug)]
pub enum AppError {
    /// The API rejected the request (invalid key, quota reached, ...).
    #[error("Validation Error: {0}")]
    Validation(#[from] ValidationError),

    /// Error occurring during configuration loading or validation.
    #[error("Configuration Error: {0}")]
    Config(String),

    /// Error related to file input/output operations.
    #[error("IO Error: {0}")]
    Io(#[from] io::Error),

    /// Error parsing the TOML configuration file.
    #[error("TOML Error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Error during JSON serialization or deserialization.
    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error parsing a URL.
    #[error("URL Parsing Error: {0}")]
    UrlParse(#[from] UrlParseError),

    /// Error making HTTP requests via reqwest.
    #[error("HTTP Request Error: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with JSON that is not an object.
    #[error("Invalid API Response: {0}")]
    InvalidResponse(String),

    /// A cache store failed to read, write or evict an entry.
    #[error("Cache Error: {0}")]
    Cache(String),

    /// An underlying error that doesn't fit other categories, using anyhow.
    #[error("Generic Error: {0}")]
    Generic(#[from] anyhow::Error),
}

impl AppError {
    /// Returns the API failure if this error came from the `success: false` envelope.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            AppError::Validation(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
