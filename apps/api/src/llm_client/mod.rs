//! Text-generation client used by resume analysis.
//!
//! One POST to the Messages API per call, no retry or backoff. Analysis turns
//! every error into a fallback payload, so the only distinction that matters
//! to callers is whether the service answered badly or not at all.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 2000;
const TEMPERATURE: f32 = 0.3;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("text-generation request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("text-generation service returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("answer is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("answer contained no text")]
    EmptyContent,
}

impl LlmError {
    /// The service answered, but not with usable JSON.
    pub fn is_malformed_answer(&self) -> bool {
        matches!(self, LlmError::Parse(_) | LlmError::EmptyContent)
    }

    fn from_status(status: StatusCode, body: String) -> Self {
        #[derive(Deserialize)]
        struct Envelope {
            error: Detail,
        }
        #[derive(Deserialize)]
        struct Detail {
            message: String,
        }

        let message = serde_json::from_str::<Envelope>(&body)
            .map(|e| e.error.message)
            .unwrap_or(body);
        LlmError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

/// Text-generation backend. `AppState` carries an `Option<Arc<dyn TextGenerator>>`;
/// `None` means no API key was configured.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_json(&self, prompt: &str, system: &str) -> Result<Value, LlmError>;
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'static str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: [Turn<'a>; 1],
}

#[derive(Serialize)]
struct Turn<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<Block>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Block {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

impl MessagesResponse {
    /// All text blocks joined in order.
    fn into_text(self) -> String {
        self.content
            .into_iter()
            .filter_map(|block| match block {
                Block::Text { text } => Some(text),
                Block::Other => None,
            })
            .collect()
    }
}

#[derive(Clone)]
pub struct LlmClient {
    http: Client,
    api_key: String,
    endpoint: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Result<Self, LlmError> {
        Ok(LlmClient {
            http: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            api_key,
            endpoint: MESSAGES_URL.to_string(),
        })
    }

    #[cfg(test)]
    fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    /// Sends one user turn and returns the answer text.
    pub async fn complete(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        let body = MessagesRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            system,
            messages: [Turn {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .http
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Text-generation service returned {status}");
            return Err(LlmError::from_status(status, body));
        }

        let answer: MessagesResponse = response.json().await?;
        if let Some(usage) = &answer.usage {
            debug!(
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                "Text-generation call succeeded"
            );
        }
        Ok(answer.into_text())
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate_json(&self, prompt: &str, system: &str) -> Result<Value, LlmError> {
        let answer = self.complete(prompt, system).await?;
        parse_json_answer(&answer)
    }
}

/// Parses a model answer, tolerating a markdown code fence around the JSON.
pub fn parse_json_answer<T: DeserializeOwned>(answer: &str) -> Result<T, LlmError> {
    let json = unfence(answer);
    if json.is_empty() {
        return Err(LlmError::EmptyContent);
    }
    Ok(serde_json::from_str(json)?)
}

fn unfence(answer: &str) -> &str {
    let answer = answer.trim();
    let Some(rest) = answer.strip_prefix("```") else {
        return answer;
    };
    // optional language tag on the opening fence
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unfence() {
        assert_eq!(unfence("```json\n{\"atsScore\": 80}\n```"), "{\"atsScore\": 80}");
        assert_eq!(unfence("```\n{}\n```"), "{}");
        assert_eq!(unfence("  {\"a\": 1}  "), "{\"a\": 1}");
    }

    #[test]
    fn test_parse_json_answer() {
        let value: Value = parse_json_answer("```json\n{\"atsScore\": 80}\n```").unwrap();
        assert_eq!(value["atsScore"], 80);
    }

    #[test]
    fn test_parse_json_answer_errors() {
        let err = parse_json_answer::<Value>("Sorry, I can't do that").unwrap_err();
        assert!(matches!(err, LlmError::Parse(_)));
        assert!(err.is_malformed_answer());

        let err = parse_json_answer::<Value>("```json\n```").unwrap_err();
        assert!(matches!(err, LlmError::EmptyContent));
    }

    #[test]
    fn test_answer_text_skips_non_text_blocks() {
        let response: MessagesResponse = serde_json::from_value(json!({
            "content": [
                {"type": "tool_use", "id": "t1", "name": "x", "input": {}},
                {"type": "text", "text": "{\"a\":"},
                {"type": "text", "text": " 1}"}
            ],
            "usage": {"input_tokens": 10, "output_tokens": 2}
        }))
        .unwrap();
        assert_eq!(response.into_text(), "{\"a\": 1}");
    }

    #[test]
    fn test_api_error_message_unwrapped() {
        let body = json!({"type": "error", "error": {"type": "overloaded_error", "message": "Overloaded"}});
        let err = LlmError::from_status(StatusCode::from_u16(529).unwrap(), body.to_string());
        assert!(matches!(&err, LlmError::Api { status: 529, message } if message == "Overloaded"));
        assert!(!err.is_malformed_answer());

        let err = LlmError::from_status(StatusCode::BAD_GATEWAY, "upstream down".into());
        assert!(matches!(err, LlmError::Api { message, .. } if message == "upstream down"));
    }

    #[test]
    fn test_request_body_shape() {
        let body = MessagesRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            system: "sys",
            messages: [Turn {
                role: "user",
                content: "hi",
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], MODEL);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["system"], "sys");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_not_a_malformed_answer() {
        let client = LlmClient::new("test-key".to_string())
            .unwrap()
            .with_endpoint("http://127.0.0.1:9/v1/messages");
        let err = client.generate_json("prompt", "system").await.unwrap_err();
        assert!(matches!(err, LlmError::Http(_)));
        assert!(!err.is_malformed_answer());
    }
}
