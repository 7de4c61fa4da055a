use reqwest::StatusCode;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use crate::config::ProviderConfig;

const GRAPH_API_BASE: &str = "https://graph.facebook.com/v17.0";

/// Failure surface of an outbound send. One best-effort attempt — no
/// retry, and no distinction between transient and permanent provider
/// errors.
#[derive(Debug, Error)]
pub enum SendError {
    #[error("WhatsApp API configuration is missing")]
    MissingConfig,
    #[error("WhatsApp API error: {message}")]
    Provider { status: StatusCode, message: String },
    #[error("WhatsApp API request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Thin client for the provider's send endpoint.
#[derive(Clone)]
pub struct WhatsAppClient {
    client: reqwest::Client,
    config: ProviderConfig,
    base_url: String,
}

impl WhatsAppClient {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            base_url: GRAPH_API_BASE.to_string(),
        }
    }

    /// Override the provider base URL (tests only).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    /// Submit one text message to `wa_id` (digits, no leading `+`) and
    /// return the provider-assigned message identifier.
    ///
    /// Credentials are checked before any network I/O. Persistence is the
    /// caller's responsibility — a successful send has no side effect here
    /// beyond the outbound request itself.
    pub async fn send_text(&self, wa_id: &str, body: &str) -> Result<String, SendError> {
        if !self.config.is_complete() {
            return Err(SendError::MissingConfig);
        }

        debug!("Sending WhatsApp message to {wa_id}");

        let url = format!("{}/{}/messages", self.base_url, self.config.phone_number_id);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.access_token)
            .json(&json!({
                "messaging_product": "whatsapp",
                "recipient_type": "individual",
                "to": wa_id,
                "type": "text",
                "text": {
                    "preview_url": false,
                    "body": body,
                },
            }))
            .send()
            .await?;

        let status = response.status();
        let data: serde_json::Value = response.json().await?;

        if !status.is_success() {
            return Err(SendError::Provider {
                status,
                message: provider_error_message(&data),
            });
        }

        Ok(extract_message_id(&data))
    }
}

/// Pull the human-readable message out of the provider's error envelope.
pub fn provider_error_message(data: &serde_json::Value) -> String {
    data["error"]["message"]
        .as_str()
        .unwrap_or("Unknown error")
        .to_string()
}

/// The provider returns the assigned id as `messages[0].id`; synthesize
/// one from the clock if the field is absent.
pub fn extract_message_id(data: &serde_json::Value) -> String {
    data["messages"][0]["id"]
        .as_str()
        .map(|s| s.to_string())
        .unwrap_or_else(|| format!("msg_{}", chrono::Utc::now().timestamp_millis()))
}
