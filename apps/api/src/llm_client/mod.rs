//! Chat-completion client — the single point of entry for the
//! OpenAI-compatible API used to draft follow-up emails.
//!
//! The key is optional: callers check `is_configured()` and use the
//! scripted follow-up when it is absent. One attempt per call, no retry —
//! any failure degrades to the scripted copy at the call site.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

const REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("chat API key is not configured")]
    MissingKey,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChatChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    total_tokens: Option<u32>,
}

/// The first choice's text plus token accounting, with every field optional
/// so a sparse upstream response still parses.
#[derive(Debug, Clone)]
pub struct ChatCompletion {
    pub content: Option<String>,
    pub total_tokens: Option<u32>,
}

impl ChatResponse {
    fn into_completion(self) -> ChatCompletion {
        ChatCompletion {
            content: self
                .choices
                .into_iter()
                .next()
                .and_then(|c| c.message)
                .and_then(|m| m.content),
            total_tokens: self.usage.and_then(|u| u.total_tokens),
        }
    }
}

#[derive(Clone)]
pub struct ChatClient {
    client: Client,
    api_url: String,
    api_key: Option<String>,
    model: String,
}

impl ChatClient {
    pub fn new(api_url: String, api_key: Option<String>, model: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            api_url,
            api_key,
            model,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends a system + user message pair and returns the first completion.
    pub async fn complete(&self, system: &str, user: &str) -> Result<ChatCompletion, ChatError> {
        let Some(api_key) = &self.api_key else {
            return Err(ChatError::MissingKey);
        };

        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ChatError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat_response: ChatResponse = response.json().await?;
        let completion = chat_response.into_completion();

        debug!(
            "Chat call succeeded: content={}, total_tokens={:?}",
            completion.content.is_some(),
            completion.total_tokens
        );

        Ok(completion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_response_extracts_content_and_tokens() {
        let raw = r#"{
            "choices": [{"message": {"content": "Hi Alex, here is the breakdown."}}],
            "usage": {"total_tokens": 184}
        }"#;
        let completion = serde_json::from_str::<ChatResponse>(raw)
            .unwrap()
            .into_completion();
        assert_eq!(
            completion.content.as_deref(),
            Some("Hi Alex, here is the breakdown.")
        );
        assert_eq!(completion.total_tokens, Some(184));
    }

    #[test]
    fn test_empty_response_parses_to_nothing() {
        let completion = serde_json::from_str::<ChatResponse>("{}")
            .unwrap()
            .into_completion();
        assert!(completion.content.is_none());
        assert!(completion.total_tokens.is_none());
    }

    #[test]
    fn test_choice_without_message_is_tolerated() {
        let raw = r#"{"choices": [{}], "usage": {}}"#;
        let completion = serde_json::from_str::<ChatResponse>(raw)
            .unwrap()
            .into_completion();
        assert!(completion.content.is_none());
        assert!(completion.total_tokens.is_none());
    }

    #[test]
    fn test_unconfigured_client_reports_so() {
        let client = ChatClient::new(
            "https://api.openai.com/v1/chat/completions".to_string(),
            None,
            "gpt-4o-mini".to_string(),
        );
        assert!(!client.is_configured());
        assert_eq!(client.model(), "gpt-4o-mini");
    }
}
