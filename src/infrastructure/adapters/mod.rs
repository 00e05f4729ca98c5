//! Backend adapters - one per supported wire protocol

mod anthropic;
mod openai_chat;
mod registry;

pub use anthropic::AnthropicAdapter;
pub use openai_chat::OpenAiChatAdapter;
pub use registry::{resolve_model, ModelBackend, ModelEntry, supported_models};

use async_trait::async_trait;

use super::client::LlmClient;
use crate::domain::{DispatchError, History, Message, UserPrompt};

/// Completion budget shared by every backend request.
pub const MAX_OUTPUT_TOKENS: u32 = 3000;

/// Protocol-specific translator between the uniform call contract and one
/// backend's wire format.
///
/// Provider-specific request and response shapes never leak past this
/// boundary: `extract_completions` normalizes every response to a plain list
/// of completion strings, and `append_turns` appends new turns in the message
/// shape the backend expects to see replayed.
#[async_trait]
pub trait BackendAdapter: Send + Sync + std::fmt::Debug {
    /// Shape the outgoing request body for this backend.
    fn build_request(
        &self,
        system_text: &str,
        history: &[Message],
        prompt: &UserPrompt,
        temperature: f32,
        n_responses: usize,
    ) -> serde_json::Value;

    fn request_url(&self, client: &LlmClient) -> String;

    fn request_headers<'a>(&self, client: &'a LlmClient) -> Vec<(&'a str, &'a str)>;

    /// Extract completion text from this backend's response shape.
    fn extract_completions(
        &self,
        response: serde_json::Value,
    ) -> Result<Vec<String>, DispatchError>;

    /// One new history branch per completion, each a copy of the input
    /// history plus a user turn and that completion's assistant turn.
    /// Sibling branches never alias.
    fn append_turns(
        &self,
        history: &[Message],
        prompt: &UserPrompt,
        completions: &[String],
    ) -> Vec<History>;

    /// Whether one request can return N completions.
    fn native_batch_support(&self) -> bool;

    /// Build, send and normalize one request.
    async fn invoke(
        &self,
        client: &LlmClient,
        system_text: &str,
        history: &[Message],
        prompt: &UserPrompt,
        temperature: f32,
        n_responses: usize,
    ) -> Result<Vec<String>, DispatchError> {
        let body = self.build_request(system_text, history, prompt, temperature, n_responses);
        let url = self.request_url(client);
        let response = client
            .http()
            .post_json(&url, self.request_headers(client), &body)
            .await?;

        self.extract_completions(response)
    }
}

/// Plain-text turn appending shared by the OpenAI-style backends and the
/// synthetic paths: the prompt keeps its original shape, completions are
/// plain assistant text, and the system message is never stored in history.
pub(crate) fn append_plain_turns(
    history: &[Message],
    prompt: &UserPrompt,
    completions: &[String],
) -> Vec<History> {
    completions
        .iter()
        .map(|completion| {
            let mut branch = history.to_vec();
            branch.push(prompt.to_message());
            branch.push(Message::assistant(completion.clone()));
            branch
        })
        .collect()
}
