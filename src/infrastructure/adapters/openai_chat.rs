use async_trait::async_trait;
use serde::Deserialize;

use super::{append_plain_turns, BackendAdapter, MAX_OUTPUT_TOKENS};
use crate::domain::{DispatchError, History, Message, UserPrompt};
use crate::infrastructure::client::LlmClient;

/// Adapter for the OpenAI chat-completions protocol.
///
/// Serves the gpt-4o family as well as DeepSeek and Llama models exposed
/// through OpenAI-compatible endpoints; those remap the provider-side model
/// name. The system text goes out as a separate leading `system` message and
/// the full prior history is replayed on every call.
#[derive(Debug)]
pub struct OpenAiChatAdapter {
    wire_model: &'static str,
    seed: Option<u64>,
}

impl OpenAiChatAdapter {
    pub fn new(wire_model: &'static str, seed: Option<u64>) -> Self {
        Self { wire_model, seed }
    }
}

#[async_trait]
impl BackendAdapter for OpenAiChatAdapter {
    fn build_request(
        &self,
        system_text: &str,
        history: &[Message],
        prompt: &UserPrompt,
        temperature: f32,
        n_responses: usize,
    ) -> serde_json::Value {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(Message::system(system_text));
        messages.extend_from_slice(history);
        messages.push(prompt.to_message());

        let mut body = serde_json::json!({
            "model": self.wire_model,
            "messages": messages,
            "temperature": temperature,
            "max_tokens": MAX_OUTPUT_TOKENS,
            "n": n_responses,
            "stop": serde_json::Value::Null,
        });

        if let Some(seed) = self.seed {
            body["seed"] = serde_json::json!(seed);
        }

        body
    }

    fn request_url(&self, client: &LlmClient) -> String {
        client.chat_completions_url()
    }

    fn request_headers<'a>(&self, client: &'a LlmClient) -> Vec<(&'a str, &'a str)> {
        client.openai_headers()
    }

    fn extract_completions(
        &self,
        response: serde_json::Value,
    ) -> Result<Vec<String>, DispatchError> {
        let response: ChatCompletionsResponse = serde_json::from_value(response).map_err(|e| {
            DispatchError::provider("openai", format!("Failed to parse response: {}", e))
        })?;

        if response.choices.is_empty() {
            return Err(DispatchError::provider("openai", "No choices in response"));
        }

        Ok(response
            .choices
            .into_iter()
            .map(|choice| choice.message.content.unwrap_or_default())
            .collect())
    }

    fn append_turns(
        &self,
        history: &[Message],
        prompt: &UserPrompt,
        completions: &[String],
    ) -> Vec<History> {
        append_plain_turns(history, prompt, completions)
    }

    fn native_batch_support(&self) -> bool {
        true
    }
}

// OpenAI chat-completions response types

#[derive(Debug, Deserialize)]
struct ChatCompletionsResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}
