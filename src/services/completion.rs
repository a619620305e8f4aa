// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Chat-completion client for plan generation.
//!
//! Speaks the OpenAI-compatible `/chat/completions` protocol (Together AI by
//! default). Requests are sent exactly once: no streaming, no retries.

use crate::error::AppError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A language model that turns a chat request into candidate completions.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Submit one chat request and return the raw candidate list.
    async fn complete(&self, request: &ChatRequest) -> Result<ChatCompletion, AppError>;
}

// ─── Wire Types ──────────────────────────────────────────────

/// Chat message role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Chat-completion request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    /// Single user-role message, no system prompt or history.
    pub fn single_prompt(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage::user(prompt)],
        }
    }
}

/// Chat-completion response body (only the fields we read).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatCompletion {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletion {
    /// Completion with a single choice carrying `content`.
    pub fn from_content(content: impl Into<String>) -> Self {
        Self {
            choices: vec![Choice {
                message: Some(ChoiceMessage {
                    content: Some(content.into()),
                }),
            }],
        }
    }

    /// First candidate's message content, verbatim.
    pub fn into_first_content(self) -> Result<String, AppError> {
        let choice = self
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NoCompletion("response contained no choices".to_string()))?;

        choice
            .message
            .ok_or_else(|| AppError::NoCompletion("first choice has no message".to_string()))?
            .content
            .ok_or_else(|| AppError::NoCompletion("first choice has no content".to_string()))
    }
}

// ─── HTTP Client ─────────────────────────────────────────────

/// Completion provider reached over HTTP.
#[derive(Clone)]
pub struct CompletionClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl CompletionClient {
    /// Create a client for an OpenAI-compatible API rooted at `base_url`.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl CompletionProvider for CompletionClient {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatCompletion, AppError> {
        let url = format!("{}/chat/completions", self.base_url);

        tracing::debug!(
            model = %request.model,
            prompt_len = request.messages.iter().map(|m| m.content.len()).sum::<usize>(),
            "Sending chat completion request"
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::CompletionApi(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status.as_u16() == 429 {
                tracing::warn!("Completion provider rate limit hit (429)");
            }
            return Err(AppError::CompletionApi(format!("HTTP {}: {}", status, body)));
        }

        // A 2xx body we cannot parse is a malformed provider response.
        let body = response
            .text()
            .await
            .map_err(|e| AppError::CompletionApi(format!("Failed to read response: {}", e)))?;

        serde_json::from_str(&body)
            .map_err(|e| AppError::NoCompletion(format!("JSON parse error: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_prompt_request_shape() {
        let request = ChatRequest::single_prompt("model-x", "hello");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "model": "model-x",
                "messages": [{ "role": "user", "content": "hello" }]
            })
        );
    }

    #[test]
    fn test_first_content_is_verbatim() {
        let completion: ChatCompletion = serde_json::from_value(serde_json::json!({
            "id": "cmpl-1",
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": "  # Plan\n\n" } },
                { "index": 1, "message": { "role": "assistant", "content": "other" } }
            ]
        }))
        .unwrap();

        assert_eq!(completion.into_first_content().unwrap(), "  # Plan\n\n");
    }

    #[test]
    fn test_no_choices_is_no_completion() {
        let completion: ChatCompletion =
            serde_json::from_value(serde_json::json!({ "choices": [] })).unwrap();
        assert!(matches!(
            completion.into_first_content(),
            Err(AppError::NoCompletion(_))
        ));

        let missing: ChatCompletion = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(matches!(
            missing.into_first_content(),
            Err(AppError::NoCompletion(_))
        ));
    }

    #[test]
    fn test_null_content_is_no_completion() {
        let completion: ChatCompletion = serde_json::from_value(serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": null } }]
        }))
        .unwrap();
        assert!(matches!(
            completion.into_first_content(),
            Err(AppError::NoCompletion(_))
        ));

        let no_message: ChatCompletion =
            serde_json::from_value(serde_json::json!({ "choices": [{ "index": 0 }] })).unwrap();
        assert!(matches!(
            no_message.into_first_content(),
            Err(AppError::NoCompletion(_))
        ));
    }
}
