//! API error payload

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error body of the shape `{title, detail}`
///
/// Carries what the server answered, verbatim, or a locally synthesized
/// title/detail when a precondition fails before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredError {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub detail: String,
}

impl StructuredError {
    pub fn new(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            detail: detail.into(),
        }
    }

    /// Build from a raw response body
    ///
    /// JSON objects carrying `title` or `detail` are taken as-is; anything else
    /// is wrapped with the HTTP status as title and the raw text as detail.
    pub fn from_body(status: u16, body: &str) -> Self {
        if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(body) {
            if parsed.get("title").is_some() || parsed.get("detail").is_some() {
                if let Ok(err) = serde_json::from_value::<StructuredError>(parsed) {
                    return err;
                }
            }
        }
        Self::new(format!("HTTP {status}"), body)
    }

    /// The error reported when a Job names a Client that does not exist
    pub fn client_not_found(name: &str) -> Self {
        Self::new(
            "Client name not found",
            format!("Client name '{name}' not found"),
        )
    }
}

impl fmt::Display for StructuredError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.detail)
    }
}
