/*
[INPUT]:  Error sources (HTTP, API status, serialization, signing, persistence)
[OUTPUT]: Structured error types with classification helpers
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the Parasail adapter
#[derive(Error, Debug)]
pub enum ParasailError {
    /// Private key could not be parsed or the message could not be signed
    #[error("Signing failed: {0}")]
    Signing(String),

    /// Server rejected the bearer token (HTTP 401)
    #[error("Unauthorized: {body}")]
    Unauthorized { body: String },

    /// API returned a non-success status other than 401
    #[error("API error (status {status}): {body}")]
    Api {
        status: u16,
        body: String,
        headers: String,
    },

    /// Request never produced a response (connect, timeout, TLS, ...)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Session could not be written to the store
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl ParasailError {
    /// Check if the server rejected the credential
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ParasailError::Unauthorized { .. })
    }

    /// Check if the request failed below the HTTP layer
    pub fn is_network_error(&self) -> bool {
        matches!(self, ParasailError::Http(_))
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ParasailError::Unauthorized { .. } => Some(StatusCode::UNAUTHORIZED.as_u16()),
            ParasailError::Api { status, .. } => Some(*status),
            ParasailError::Http(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    /// Create an API error from status code, body and rendered headers
    pub fn api_error(
        status: StatusCode,
        body: impl Into<String>,
        headers: impl Into<String>,
    ) -> Self {
        ParasailError::Api {
            status: status.as_u16(),
            body: body.into(),
            headers: headers.into(),
        }
    }
}

/// Result type alias for Parasail operations
pub type Result<T> = std::result::Result<T, ParasailError>;
