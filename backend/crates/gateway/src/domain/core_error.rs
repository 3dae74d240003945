//! Core Error
//!
//! Single error type for every outbound Core call.

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

/// Outbound call failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Core answered with a non-2xx status
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Deadline elapsed before the Core answered
    #[error("Core request timed out after {} ms", after.as_millis())]
    Timeout { after: Duration },

    /// Connection-level failure
    #[error("{0}")]
    Transport(String),

    /// Target URL could not be built
    #[error("Invalid Core URL: {0}")]
    InvalidUrl(String),
}

impl CoreError {
    /// Build a status error from a non-2xx response
    ///
    /// Uses the body's string `message` field when present.
    pub fn from_response(status: u16, text: &str, body: &Value) -> Self {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Core error {status}: {text}"));

        CoreError::Status { status, message }
    }

    /// A 404 raised locally, e.g. for a lookup that came back empty
    pub fn not_found(message: impl Into<String>) -> Self {
        CoreError::Status {
            status: 404,
            message: message.into(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            CoreError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the failure means the endpoint or resource does not exist
    ///
    /// A 404 status, a standalone `404` in the message, or "not found" in
    /// any case.
    pub fn is_not_found(&self) -> bool {
        if self.status() == Some(404) {
            return true;
        }
        let message = self.to_string();
        contains_word(&message, "404") || message.to_lowercase().contains("not found")
    }
}

fn contains_word(haystack: &str, word: &str) -> bool {
    let is_word_char = |c: char| c.is_alphanumeric() || c == '_';

    haystack.match_indices(word).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + word.len()..].chars().next();
        !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
    })
}
