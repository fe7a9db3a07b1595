//! Client error taxonomy
//!
//! Every failure of the two-step exchange is classified into one of these
//! variants. The `Display` strings are the exact user-facing messages; the
//! front ends show them inline and keep `status_code`/`body` for the
//! expandable technical-details panel.

use thiserror::Error;

/// Errors from one plan request
#[derive(Debug, Error)]
pub enum ClientError {
    /// The shared deadline elapsed before the exchange finished
    #[error("Request timed out. Please try again.")]
    Timeout,

    /// 4xx from either step; `message` is best-effort extracted from the body
    #[error("Invalid request: {message}")]
    Client { status: u16, message: String, body: String },

    /// 5xx from either step; the body is kept for the details panel only,
    /// never shown inline
    #[error("Something went wrong on the server. Please try again.")]
    Server { status: u16, body: String },

    /// Connection-level failure before any HTTP status existed
    #[error("Could not reach the planner backend. Check that it is running at the configured URL.")]
    Network(#[source] reqwest::Error),

    /// 2xx whose body did not parse as a response-event array
    #[error("Received an unexpected response format.")]
    Parse(#[source] serde_json::Error),

    /// Anything the taxonomy above does not cover
    #[error("{0}")]
    Unknown(String),
}

impl ClientError {
    /// HTTP status, when one was received
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::Client { status, .. } | ClientError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw response body, when one was retained for the details panel
    pub fn body(&self) -> Option<&str> {
        match self {
            ClientError::Client { body, .. } | ClientError::Server { body, .. } if !body.is_empty() => {
                Some(body.as_str())
            }
            _ => None,
        }
    }

    /// Classify a non-2xx response from either step
    pub fn from_status(status: u16, body: String) -> Self {
        if (400..500).contains(&status) {
            let message = extract_body_message(&body);
            ClientError::Client { status, message, body }
        } else if status >= 500 {
            ClientError::Server { status, body }
        } else {
            ClientError::Unknown(format!("Unexpected response status {}", status))
        }
    }

    /// Fold a transport-level reqwest failure into the taxonomy
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_builder() {
            ClientError::Unknown(err.to_string())
        } else {
            ClientError::Network(err)
        }
    }
}

/// Best-effort human message from a 4xx body: a JSON `detail`, `message`, or
/// `error` field, then the raw text, then a fixed fallback.
fn extract_body_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["detail", "message", "error"] {
            if let Some(msg) = value.get(key).and_then(|v| v.as_str()) {
                return msg.to_string();
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Unknown client error.".to_string()
    } else {
        trimmed.to_string()
    }
}
