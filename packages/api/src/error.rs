//! # Action errors
//!
//! Every action wrapper returns an [`ActionResult`]. The error side keeps the
//! failure kinds apart so the UI can pick its wording:
//!
//! | Variant | Meaning | Reached the backend? |
//! |---------|---------|----------------------|
//! | [`ActionError::NoSession`] | no `access_token` cookie, short-circuited | no |
//! | [`ActionError::Invalid`] | input failed the form schema on the server | no |
//! | [`ActionError::Rejected`] | backend answered with a non-2xx status | yes |
//! | [`ActionError::Transport`] | network failure, timeout, or server-function failure | maybe |
//! | [`ActionError::Unexpected`] | 2xx reply whose body did not have the expected shape | yes |

use dioxus::prelude::ServerFnError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::FieldErrors;

/// Shown when an authenticated action is attempted without a session.
pub const LOGIN_REQUIRED_MESSAGE: &str = "ログインしてください";

/// Result of one action wrapper call.
pub type ActionResult<T> = Result<T, ActionError>;

/// Why an action did not succeed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum ActionError {
    #[error("no active session")]
    NoSession,

    #[error("invalid input: {0}")]
    Invalid(FieldErrors),

    #[error("rejected by server ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Rejected { status: u16, message: Option<String> },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("unexpected response: {0}")]
    Unexpected(String),
}

impl ActionError {
    /// Whether the request made it to the backend before failing.
    pub fn reached_server(&self) -> bool {
        matches!(self, Self::Rejected { .. } | Self::Unexpected(_))
    }

    /// Text for a toast. Uses the server's message when it sent a plain string.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::NoSession => LOGIN_REQUIRED_MESSAGE.to_string(),
            Self::Invalid(errors) => errors
                .messages()
                .next()
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string()),
            Self::Rejected {
                message: Some(message),
                ..
            } => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// Flatten a server-function reply into a single [`ActionResult`].
///
/// The outer error means the call never got an answer from our own server.
pub fn settle<T>(result: Result<ActionResult<T>, ServerFnError>) -> ActionResult<T> {
    result
        .map_err(|e| ActionError::Transport(e.to_string()))
        .and_then(|inner| inner)
}

/// Pull a human-readable message out of a backend error body.
///
/// The backend wraps errors as `{"error": {"type": .., "detail": ..}}`, while
/// framework validation errors come back as `{"detail": [..]}`. Only string
/// details count; structured ones yield `None`.
pub fn server_message(body: &Value) -> Option<String> {
    let text = match body {
        Value::String(s) => Some(s.as_str()),
        Value::Object(map) => map
            .get("error")
            .and_then(|e| e.get("detail"))
            .and_then(Value::as_str)
            .or_else(|| map.get("detail").and_then(Value::as_str))
            .or_else(|| map.get("message").and_then(Value::as_str)),
        _ => None,
    };
    text.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
