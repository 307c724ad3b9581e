//! Chat relay to the hosted completion provider.
//!
//! A stateless forwarder: the widget resends its full history each turn, the
//! relay prepends the fixed system prompt and returns the assistant's text
//! unmodified. The `[[CONTACT_CARD]]` sentinel stays in the reply - stripping
//! it is the consuming UI's job (`atelier_core::strip_contact_card`).
//!
//! No streaming, no retry, no conversation persistence.

use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use atelier_core::{CONTACT_CARD_SENTINEL, ChatTurn};

use crate::config::ChatConfig;

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 512;
const TEMPERATURE: f32 = 0.7;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Fixed system instruction: the persona plus the hard sentinel rule.
const SYSTEM_PROMPT: &str = "You are the assistant on Mara Lindqvist's portfolio site. \
    Answer questions about Mara's work, writing, and background, in a friendly and \
    concise voice. You only know what is on the site; say so when asked about \
    anything else. Hard rule: if and only if the visitor asks how to contact Mara \
    or requests contact information, append the exact marker [[CONTACT_CARD]] to \
    the end of your reply. Never mention the marker or explain it.";

/// Errors that can occur when calling the completion provider.
#[derive(Debug, Error)]
pub enum ChatError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider returned an error response.
    #[error("API error ({error_type}): {message}")]
    Api {
        /// Error type from the provider.
        error_type: String,
        /// Error message.
        message: String,
    },

    /// Failed to make sense of the response body.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Request body for the provider's messages API.
#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: &'a [WireMessage],
}

/// One turn in the provider's wire format.
#[derive(Debug, Serialize)]
struct WireMessage {
    role: &'static str,
    content: String,
}

impl From<ChatTurn> for WireMessage {
    fn from(turn: ChatTurn) -> Self {
        Self {
            role: turn.role.as_str(),
            content: turn.content,
        }
    }
}

/// Response from the provider (non-streaming).
#[derive(Debug, Deserialize)]
struct CompletionResponse {
    content: Vec<ContentBlock>,
}

/// A content block within a response.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    /// Anything that is not text (the relay requests none of these).
    #[serde(other)]
    Other,
}

/// Provider error envelope.
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(rename = "type")]
    error_type: String,
    message: String,
}

/// Client for the hosted chat-completion provider.
#[derive(Clone)]
pub struct ChatClient {
    inner: Arc<ChatClientInner>,
}

struct ChatClientInner {
    client: reqwest::Client,
    model: String,
}

impl ChatClient {
    /// Create a new chat client.
    ///
    /// # Panics
    ///
    /// Panics if the API key contains invalid header characters.
    #[must_use]
    pub fn new(config: &ChatConfig) -> Self {
        let api_key = config.api_key.expose_secret();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(api_key).expect("Invalid API key for header"),
        );
        headers.insert("anthropic-version", HeaderValue::from_static(API_VERSION));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            inner: Arc::new(ChatClientInner {
                client,
                model: config.model.clone(),
            }),
        }
    }

    /// Forward a conversation and return the assistant's reply text.
    ///
    /// One blocking round trip with the configured timeout; no retry on
    /// transient failure.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError`] if the request fails, the provider rejects it,
    /// or the response carries no text.
    #[instrument(skip(self, turns), fields(model = %self.inner.model, turns = turns.len()))]
    pub async fn reply(&self, turns: Vec<ChatTurn>) -> Result<String, ChatError> {
        let messages: Vec<WireMessage> = turns.into_iter().map(Into::into).collect();
        let request = CompletionRequest {
            model: &self.inner.model,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            system: SYSTEM_PROMPT,
            messages: &messages,
        };

        let response = self
            .inner
            .client
            .post(API_URL)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::error_from_response(status, response).await);
        }

        let completion: CompletionResponse = response.json().await?;
        let text: String = completion
            .content
            .into_iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text),
                ContentBlock::Other => None,
            })
            .collect();

        if text.is_empty() {
            return Err(ChatError::Parse("response carried no text".to_string()));
        }
        Ok(text)
    }

    /// Turn a non-success response into a [`ChatError`].
    async fn error_from_response(status: StatusCode, response: reqwest::Response) -> ChatError {
        match response.json::<ApiErrorResponse>().await {
            Ok(body) => ChatError::Api {
                error_type: body.error.error_type,
                message: body.error.message,
            },
            Err(_) => ChatError::Api {
                error_type: status.as_u16().to_string(),
                message: "provider returned a non-JSON error".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::ChatRole;

    #[test]
    fn test_system_prompt_carries_sentinel_rule() {
        assert!(SYSTEM_PROMPT.contains(CONTACT_CARD_SENTINEL));
    }

    #[test]
    fn test_request_serialization_shape() {
        let messages = vec![
            WireMessage::from(ChatTurn {
                role: ChatRole::User,
                content: "hi".to_string(),
            }),
            WireMessage::from(ChatTurn {
                role: ChatRole::Assistant,
                content: "hello".to_string(),
            }),
        ];
        let request = CompletionRequest {
            model: "claude-sonnet-4-20250514",
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            system: SYSTEM_PROMPT,
            messages: &messages,
        };
        let value = serde_json::to_value(&request).expect("serializes");
        assert_eq!(value["model"], "claude-sonnet-4-20250514");
        assert_eq!(value["max_tokens"], 512);
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][1]["role"], "assistant");
        assert_eq!(value["messages"][1]["content"], "hello");
    }

    #[test]
    fn test_response_deserialization() {
        let body = r#"{
            "id": "msg_01",
            "model": "claude-sonnet-4-20250514",
            "content": [
                {"type": "text", "text": "Reach out by email. "},
                {"type": "text", "text": "[[CONTACT_CARD]]"}
            ],
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 10, "output_tokens": 12}
        }"#;
        let parsed: CompletionResponse = serde_json::from_str(body).expect("parses");
        let text: String = parsed
            .content
            .into_iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text),
                ContentBlock::Other => None,
            })
            .collect();
        assert_eq!(text, "Reach out by email. [[CONTACT_CARD]]");
    }

    #[test]
    fn test_error_envelope_deserialization() {
        let body = r#"{
            "type": "error",
            "error": {"type": "authentication_error", "message": "invalid x-api-key"}
        }"#;
        let parsed: ApiErrorResponse = serde_json::from_str(body).expect("parses");
        assert_eq!(parsed.error.error_type, "authentication_error");
        let err = ChatError::Api {
            error_type: parsed.error.error_type,
            message: parsed.error.message,
        };
        assert_eq!(
            err.to_string(),
            "API error (authentication_error): invalid x-api-key"
        );
    }
}
