//! Error types shared by the API layer and the pages

use serde::Deserialize;

/// Message shown when neither the backend nor the transport said anything useful
pub const GENERIC_ERROR: &str = "Request failed, please try again later";

/// Every failed backend call collapses into one of these.
///
/// `Display` is the user-facing message, so pages can show `err.to_string()`
/// directly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Network(String),

    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Failed to serialize request: {0}")]
    Encode(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Error body returned by the backend
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

impl ApiError {
    /// Build the error for a non-2xx response.
    ///
    /// The message is the body's `error` field, falling back to the status
    /// text and then to [`GENERIC_ERROR`].
    pub fn from_response(status: u16, status_text: &str, body: &str) -> Self {
        let message = extract_message(body)
            .or_else(|| {
                let text = status_text.trim();
                (!text.is_empty()).then(|| format!("Request failed with status {} {}", status, text))
            })
            .unwrap_or_else(|| GENERIC_ERROR.to_string());

        if status == 401 {
            ApiError::Unauthorized(message)
        } else {
            ApiError::Http { status, message }
        }
    }

    /// Wrap a transport failure, keeping the generic fallback for empty text
    pub fn network(err: impl std::fmt::Display) -> Self {
        let text = err.to_string();
        if text.trim().is_empty() {
            ApiError::Network(GENERIC_ERROR.to_string())
        } else {
            ApiError::Network(text)
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized(_) => Some(401),
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn extract_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|b| b.error)
        .filter(|e| !e.trim().is_empty())
}
