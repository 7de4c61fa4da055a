use std::env;

/// WhatsApp Business provider credentials, read once at startup and
/// injected into handlers as shared state.
///
/// Missing variables become empty strings so the process still boots; the
/// gateway and the config endpoints check completeness before any call.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_key: String,
    pub phone_number_id: String,
    pub business_account_id: String,
    pub access_token: String,
}

impl ProviderConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: env::var("WHATSAPP_API_KEY").unwrap_or_default(),
            phone_number_id: env::var("WHATSAPP_PHONE_NUMBER_ID").unwrap_or_default(),
            business_account_id: env::var("WHATSAPP_BUSINESS_ACCOUNT_ID").unwrap_or_default(),
            access_token: env::var("WHATSAPP_ACCESS_TOKEN").unwrap_or_default(),
        }
    }

    /// All credentials the send path needs are present.
    pub fn is_complete(&self) -> bool {
        !self.api_key.is_empty()
            && !self.phone_number_id.is_empty()
            && !self.access_token.is_empty()
    }

    /// Whether any provider configuration exists at all — reported by
    /// GET /api/config without exposing the values.
    pub fn has_config(&self) -> bool {
        !self.api_key.is_empty()
    }
}
