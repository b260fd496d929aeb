//! SMS composition client — the single point of entry for the FastMCP
//! compose API. No other module may call this upstream directly.
//!
//! The key is optional: callers check `is_configured()` and substitute the
//! engine's heuristic copy when it is absent. One attempt per call — the
//! demo degrades instead of retrying.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("compose API key is not configured")]
    MissingKey,
}

/// Composition request: persona voice, the SDR goal, and the prospect facts
/// the upstream may weave into the message.
#[derive(Debug, Clone, Serialize)]
pub struct ComposeRequest {
    pub persona: String,
    pub goal: String,
    pub context: ComposeContext,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposeContext {
    pub name: String,
    pub life_event: String,
    pub insurer: String,
    pub renewal_month: String,
    pub pain_point: String,
}

/// Upstream response. Both fields are optional — the caller falls back
/// field-wise.
#[derive(Debug, Clone, Deserialize)]
pub struct ComposedMessage {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub reasoning: Option<String>,
}

#[derive(Clone)]
pub struct ComposeClient {
    client: Client,
    api_url: String,
    api_key: Option<String>,
}

impl ComposeClient {
    pub fn new(api_url: String, api_key: Option<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            api_url,
            api_key,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Posts a composition request and returns the upstream draft.
    pub async fn compose(&self, request: &ComposeRequest) -> Result<ComposedMessage, ComposeError> {
        let Some(api_key) = &self.api_key else {
            return Err(ComposeError::MissingKey);
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ComposeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let composed: ComposedMessage = response.json().await?;
        debug!(
            "Compose call succeeded: message={}, reasoning={}",
            composed.message.is_some(),
            composed.reasoning.is_some()
        );
        Ok(composed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_context_serializes_camel_case() {
        let request = ComposeRequest {
            persona: "Warm & concise".to_string(),
            goal: "Craft an insurance SDR SMS with a YES/NO CTA for Calendly booking.".to_string(),
            context: ComposeContext {
                name: "Alex Johnson".to_string(),
                life_event: "New baby".to_string(),
                insurer: "State Farm".to_string(),
                renewal_month: "2025-02".to_string(),
                pain_point: "Premiums spiked 18% at renewal".to_string(),
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["context"]["lifeEvent"], "New baby");
        assert_eq!(json["context"]["renewalMonth"], "2025-02");
        assert_eq!(json["context"]["painPoint"], "Premiums spiked 18% at renewal");
    }

    #[test]
    fn test_response_tolerates_missing_fields() {
        let composed: ComposedMessage = serde_json::from_str("{}").unwrap();
        assert!(composed.message.is_none());
        assert!(composed.reasoning.is_none());

        let composed: ComposedMessage =
            serde_json::from_str(r#"{"message": "Hey Alex"}"#).unwrap();
        assert_eq!(composed.message.as_deref(), Some("Hey Alex"));
        assert!(composed.reasoning.is_none());
    }

    #[test]
    fn test_unconfigured_client_reports_so() {
        let client = ComposeClient::new("https://api.fastmcp.com/v1/compose".to_string(), None);
        assert!(!client.is_configured());

        let client = ComposeClient::new(
            "https://api.fastmcp.com/v1/compose".to_string(),
            Some("key".to_string()),
        );
        assert!(client.is_configured());
    }
}
