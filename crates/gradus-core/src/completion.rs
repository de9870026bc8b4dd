//! The prompt-completion service seam.
//!
//! Gradus never assumes a specific provider: the engine only requires a
//! bounded text response, optional sampling controls and failure signals
//! that distinguish "unreachable", "malformed response" and "empty content".

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Role tag on a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One role-tagged message in an ordered prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// Sampling controls forwarded to the completion service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
}

impl SamplingParams {
    /// Parameters for milestone generation: provider defaults, with a cap
    /// large enough for a full exercise statement.
    pub fn generation() -> Self {
        Self {
            max_tokens: Some(1024),
            ..Self::default()
        }
    }

    /// Deterministic parameters for the pass/fail evaluation call:
    /// temperature 0 and a small response cap, to minimize verdict variance.
    pub fn deterministic() -> Self {
        Self {
            temperature: Some(0.0),
            max_tokens: Some(8),
            top_p: Some(1.0),
            stop: None,
        }
    }
}

/// An external collaborator that turns an ordered prompt into generated text.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Sends the prompt and returns the generated text.
    ///
    /// Implementations must return
    /// [`GradusError::ServiceUnavailable`](crate::GradusError::ServiceUnavailable)
    /// when the service cannot be reached (including timeouts),
    /// [`GradusError::MalformedResponse`](crate::GradusError::MalformedResponse)
    /// when the body cannot be decoded, and
    /// [`GradusError::EmptyResponse`](crate::GradusError::EmptyResponse)
    /// when the service succeeds with no content.
    async fn complete(&self, messages: &[ChatMessage], params: &SamplingParams) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors() {
        let msg = ChatMessage::system("be terse");
        assert_eq!(msg.role, ChatRole::System);
        assert_eq!(msg.content, "be terse");

        let msg = ChatMessage::user("hello");
        assert_eq!(msg.role, ChatRole::User);
    }

    #[test]
    fn test_deterministic_params_pin_temperature() {
        let params = SamplingParams::deterministic();
        assert_eq!(params.temperature, Some(0.0));
        assert!(params.max_tokens.unwrap() <= 16);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&ChatMessage::user("x")).unwrap();
        assert!(json.contains("\"role\":\"user\""));
    }
}
