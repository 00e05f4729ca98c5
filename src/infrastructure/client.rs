use std::sync::Arc;

use super::http_client::{HttpClient, HttpClientTrait};

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Opaque client handle passed into every dispatcher call.
///
/// Bundles the transport with per-provider endpoints and credentials. The
/// OpenAI-compatible endpoint is shared by the gpt-4o, DeepSeek and Llama
/// model families; Claude models use the Anthropic endpoint.
///
/// `offline_eligible` makes offline-substitution eligibility an explicit
/// property of the handle: test doubles that must be dispatched to the real
/// adapter path even under mock mode opt out with `offline_eligible(false)`.
#[derive(Debug, Clone)]
pub struct LlmClient {
    http: Arc<dyn HttpClientTrait>,
    openai_base_url: String,
    anthropic_base_url: String,
    openai_auth_header: String,
    anthropic_api_key: String,
    offline_eligible: bool,
}

impl LlmClient {
    pub fn new(http: Arc<dyn HttpClientTrait>) -> Self {
        Self {
            http,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            anthropic_base_url: DEFAULT_ANTHROPIC_BASE_URL.to_string(),
            openai_auth_header: "Bearer ".to_string(),
            anthropic_api_key: String::new(),
            offline_eligible: true,
        }
    }

    /// Default production client over a reqwest transport.
    pub fn with_default_transport() -> Self {
        Self::new(Arc::new(HttpClient::new()))
    }

    pub fn openai_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.openai_auth_header = format!("Bearer {}", api_key.into());
        self
    }

    pub fn anthropic_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.anthropic_api_key = api_key.into();
        self
    }

    pub fn openai_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.openai_base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn anthropic_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.anthropic_base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn offline_eligible(mut self, eligible: bool) -> Self {
        self.offline_eligible = eligible;
        self
    }

    pub fn http(&self) -> &dyn HttpClientTrait {
        self.http.as_ref()
    }

    pub fn is_offline_eligible(&self) -> bool {
        self.offline_eligible
    }

    pub fn chat_completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.openai_base_url)
    }

    pub fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.anthropic_base_url)
    }

    pub fn openai_headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("Authorization", self.openai_auth_header.as_str()),
            ("Content-Type", "application/json"),
        ]
    }

    pub fn anthropic_headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("x-api-key", self.anthropic_api_key.as_str()),
            ("anthropic-version", ANTHROPIC_VERSION),
            ("Content-Type", "application/json"),
        ]
    }
}
