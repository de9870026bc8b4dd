//! GroqApiAgent - Direct REST API implementation for the Groq chat API.
//!
//! Groq speaks the OpenAI-compatible chat-completions wire format; the core
//! only ever reads `choices[0].message.content`. The agent is only
//! constructible with an API key, so a missing key is unrepresentable past
//! startup.

use async_trait::async_trait;
use gradus_core::completion::{ChatMessage, CompletionService, SamplingParams};
use gradus_core::{GradusError, Result};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";
const BASE_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Requests that outlive this are treated as a service failure; the
/// underlying design otherwise blocks indefinitely on a hung call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Completion service implementation that talks to the Groq HTTP API.
#[derive(Clone)]
pub struct GroqApiAgent {
    client: Client,
    api_key: String,
    model: String,
}

impl GroqApiAgent {
    /// Creates a new agent with the provided API key and the default model.
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key: api_key.into(),
            model: DEFAULT_GROQ_MODEL.to_string(),
        }
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn send_request(&self, body: &ChatCompletionRequest<'_>) -> Result<String> {
        let response = self
            .client
            .post(BASE_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    GradusError::service_unavailable(format!(
                        "Groq API request timed out after {}s",
                        REQUEST_TIMEOUT.as_secs()
                    ))
                } else {
                    GradusError::service_unavailable(format!("Groq API request failed: {err}"))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Groq error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|err| {
            GradusError::MalformedResponse(format!("Failed to parse Groq response: {err}"))
        })?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl CompletionService for GroqApiAgent {
    async fn complete(&self, messages: &[ChatMessage], params: &SamplingParams) -> Result<String> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature: params.temperature,
            max_tokens: params.max_tokens,
            top_p: params.top_p,
            stop: params.stop.as_deref(),
        };

        tracing::debug!(model = %self.model, messages = messages.len(), "sending completion request");
        self.send_request(&request).await
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop: Option<&'a [String]>,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn extract_text_response(response: ChatCompletionResponse) -> Result<String> {
    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .unwrap_or_default();

    if content.trim().is_empty() {
        return Err(GradusError::EmptyResponse);
    }
    Ok(content)
}

fn map_http_error(status: StatusCode, body: String) -> GradusError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or(body);

    GradusError::service_unavailable(format!("Groq API returned {status}: {message}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradus_core::completion::ChatRole;

    #[test]
    fn test_request_serialization_skips_unset_params() {
        let messages = vec![ChatMessage::user("hi")];
        let request = ChatCompletionRequest {
            model: "llama-3.3-70b-versatile",
            messages: &messages,
            temperature: None,
            max_tokens: Some(8),
            top_p: None,
            stop: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "llama-3.3-70b-versatile");
        assert_eq!(json["max_tokens"], 8);
        assert_eq!(json["messages"][0]["role"], "user");
        assert!(json.get("temperature").is_none());
        assert!(json.get("stop").is_none());
    }

    #[test]
    fn test_extract_first_choice_content() {
        let parsed: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"content":"PASS"}},{"message":{"content":"FAIL"}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text_response(parsed).unwrap(), "PASS");
    }

    #[test]
    fn test_empty_content_is_distinct_from_unreachable() {
        let parsed: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":"  "}}]}"#).unwrap();
        assert!(matches!(
            extract_text_response(parsed),
            Err(GradusError::EmptyResponse)
        ));

        let parsed: ChatCompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(
            extract_text_response(parsed),
            Err(GradusError::EmptyResponse)
        ));
    }

    #[test]
    fn test_http_error_uses_provider_message() {
        let err = map_http_error(
            StatusCode::TOO_MANY_REQUESTS,
            r#"{"error":{"message":"rate limited"}}"#.to_string(),
        );
        match err {
            GradusError::ServiceUnavailable(msg) => {
                assert!(msg.contains("rate limited"));
                assert!(msg.contains("429"));
            }
            other => panic!("expected ServiceUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn test_builder() {
        let agent = GroqApiAgent::new("gsk-key").with_model("llama3-8b-8192");
        assert_eq!(agent.model(), "llama3-8b-8192");
        // role constructors keep the wire shape the provider expects
        assert_eq!(ChatMessage::system("x").role, ChatRole::System);
    }
}
