use std::error::Error;
use std::fmt;

use serde::Deserialize;
use serde_json::{json, Value};

pub const MODEL: &str = "gpt-3.5-turbo";
const MAX_TOKENS: u32 = 1000;
const TEMPERATURE: f64 = 0.7;
const TOP_P: u32 = 1;
const FREQUENCY_PENALTY: u32 = 0;
const PRESENCE_PENALTY: u32 = 0;

#[derive(Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
}

#[derive(Debug)]
pub enum UpstreamError {
    /// The API answered with a non-success status. `error` is the payload to
    /// relay to the caller, extracted from the upstream body.
    Api { status: u16, error: Value },
    /// The API answered 2xx but the body had no `choices[0].message.content`.
    InvalidResponse,
    /// The request never completed, or a body could not be read or parsed.
    Transport(reqwest::Error),
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api { status, .. } => write!(f, "OpenAI API returned status {status}"),
            Self::InvalidResponse => write!(f, "Invalid response from OpenAI API"),
            Self::Transport(err) => write!(f, "{err}"),
        }
    }
}

impl Error for UpstreamError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAiClient {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Forwards the caller's message array verbatim to the chat-completion
    /// endpoint and extracts the first choice's text. One attempt, no retry.
    pub async fn complete(&self, messages: &Value) -> Result<String, UpstreamError> {
        let payload = json!({
            "model": MODEL,
            "messages": messages,
            "max_tokens": MAX_TOKENS,
            "temperature": TEMPERATURE,
            "top_p": TOP_P,
            "frequency_penalty": FREQUENCY_PENALTY,
            "presence_penalty": PRESENCE_PENALTY,
        });

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(UpstreamError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .json::<Value>()
                .await
                .map_err(UpstreamError::Transport)?;
            return Err(UpstreamError::Api {
                status: status.as_u16(),
                error: extract_error_payload(body),
            });
        }

        let body = response
            .json::<CompletionResponse>()
            .await
            .map_err(|_| UpstreamError::InvalidResponse)?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .ok_or(UpstreamError::InvalidResponse)
    }
}

/// The upstream error body usually carries an `error` field; relay that when
/// present, otherwise fall back to a generic marker. An explicit null (or
/// other empty value) counts as absent.
fn extract_error_payload(body: Value) -> Value {
    let payload = match body {
        Value::Object(mut map) => map.remove("error"),
        _ => None,
    };
    match payload {
        Some(value) if !is_empty_value(&value) => value,
        _ => Value::String("OpenAI API error".to_string()),
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::extract_error_payload;
    use serde_json::json;

    #[test]
    fn error_field_is_relayed_verbatim() {
        let body = json!({"error": {"message": "quota exceeded", "type": "insufficient_quota"}});
        assert_eq!(
            extract_error_payload(body),
            json!({"message": "quota exceeded", "type": "insufficient_quota"})
        );
    }

    #[test]
    fn missing_error_field_falls_back_to_generic_message() {
        assert_eq!(
            extract_error_payload(json!({"detail": "nope"})),
            json!("OpenAI API error")
        );
        assert_eq!(extract_error_payload(json!([1, 2])), json!("OpenAI API error"));
    }

    #[test]
    fn empty_error_values_fall_back_to_generic_message() {
        for body in [
            json!({"error": null}),
            json!({"error": ""}),
            json!({"error": 0}),
            json!({"error": false}),
        ] {
            assert_eq!(extract_error_payload(body), json!("OpenAI API error"));
        }
    }
}
