use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The `messages` field is captured as a raw value so the handler can report
/// a missing or non-array field itself instead of a serde rejection.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Value,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
}

/// `error` is either a plain message or an upstream error object relayed
/// verbatim.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: Value,
}

impl ErrorResponse {
    pub fn message(text: impl Into<String>) -> Self {
        Self {
            error: Value::String(text.into()),
        }
    }
}
