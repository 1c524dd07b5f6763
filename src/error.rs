//! Error types for the Intercom events client

use serde::Deserialize;
use thiserror::Error;

/// Structured error returned by the API for a non-success status
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("HTTP {status_code} {code}: {message}")]
pub struct HttpError {
    pub status_code: u16,
    /// Machine-readable error code (e.g. `not_found`)
    pub code: String,
    pub message: String,
}

/// Intercom error body: `{"type": "error.list", "errors": [{"code", "message"}]}`
#[derive(Deserialize)]
struct ErrorList {
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

#[derive(Deserialize)]
struct ErrorEntry {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

impl HttpError {
    pub fn new(status_code: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status_code,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Build from a response status and its raw body.
    ///
    /// Uses the first entry of an Intercom error list; anything else falls
    /// back to `unknown` with the canonical reason as message.
    pub fn from_response(status: reqwest::StatusCode, body: &[u8]) -> Self {
        let first = serde_json::from_slice::<ErrorList>(body)
            .ok()
            .and_then(|list| list.errors.into_iter().next());

        match first {
            Some(entry) => Self::new(status.as_u16(), entry.code, entry.message),
            None => Self::new(
                status.as_u16(),
                "unknown",
                status.canonical_reason().unwrap_or("Unknown status"),
            ),
        }
    }
}

/// Main client error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Http(#[from] HttpError),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// The structured HTTP error, if this is one
    pub fn http_error(&self) -> Option<&HttpError> {
        match self {
            AppError::Http(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type alias for client operations
pub type AppResult<T> = Result<T, AppError>;
