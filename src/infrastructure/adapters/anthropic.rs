use async_trait::async_trait;
use serde::Deserialize;

use super::{BackendAdapter, MAX_OUTPUT_TOKENS};
use crate::domain::{ContentPart, DispatchError, History, Message, UserPrompt};
use crate::infrastructure::client::LlmClient;

/// Adapter for the Anthropic messages protocol.
///
/// System text travels as a distinct top-level parameter, never as a history
/// entry, and both user and assistant turns carry multi-part content. The
/// protocol returns one completion per request; batch generation is emulated
/// above this adapter.
#[derive(Debug)]
pub struct AnthropicAdapter {
    wire_model: &'static str,
}

impl AnthropicAdapter {
    pub fn new(wire_model: &'static str) -> Self {
        Self { wire_model }
    }
}

#[async_trait]
impl BackendAdapter for AnthropicAdapter {
    fn build_request(
        &self,
        system_text: &str,
        history: &[Message],
        prompt: &UserPrompt,
        temperature: f32,
        _n_responses: usize,
    ) -> serde_json::Value {
        let mut messages = history.to_vec();
        messages.push(prompt.to_parts_message());

        serde_json::json!({
            "model": self.wire_model,
            "max_tokens": MAX_OUTPUT_TOKENS,
            "temperature": temperature,
            "system": system_text,
            "messages": messages,
        })
    }

    fn request_url(&self, client: &LlmClient) -> String {
        client.messages_url()
    }

    fn request_headers<'a>(&self, client: &'a LlmClient) -> Vec<(&'a str, &'a str)> {
        client.anthropic_headers()
    }

    fn extract_completions(
        &self,
        response: serde_json::Value,
    ) -> Result<Vec<String>, DispatchError> {
        let response: MessagesResponse = serde_json::from_value(response).map_err(|e| {
            DispatchError::provider("anthropic", format!("Failed to parse response: {}", e))
        })?;

        let text = response
            .content
            .into_iter()
            .find_map(|block| {
                if block.block_type == "text" {
                    block.text
                } else {
                    None
                }
            })
            .ok_or_else(|| DispatchError::provider("anthropic", "No text content in response"))?;

        Ok(vec![text])
    }

    fn append_turns(
        &self,
        history: &[Message],
        prompt: &UserPrompt,
        completions: &[String],
    ) -> Vec<History> {
        completions
            .iter()
            .map(|completion| {
                let mut branch = history.to_vec();
                branch.push(prompt.to_parts_message());
                branch.push(Message::assistant_with_parts(vec![ContentPart::text(
                    completion.clone(),
                )]));
                branch
            })
            .collect()
    }

    fn native_batch_support(&self) -> bool {
        false
    }
}

// Anthropic messages response types

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MessageRole;
    use crate::infrastructure::http_client::mock::MockHttpClient;
    use std::sync::Arc;

    const TEST_URL: &str = "https://api.anthropic.com/v1/messages";

    fn messages_response(text: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "msg_123",
            "type": "message",
            "role": "assistant",
            "model": "claude-3-5-sonnet-20240620",
            "content": [{"type": "text", "text": text}],
            "stop_reason": "end_turn",
        })
    }

    #[test]
    fn test_request_shape() {
        let adapter = AnthropicAdapter::new("claude-3-5-sonnet-20240620");
        let prompt = UserPrompt::from("Hello!");

        let body = adapter.build_request("Be helpful", &[], &prompt, 0.75, 1);

        assert_eq!(body["model"], "claude-3-5-sonnet-20240620");
        assert_eq!(body["max_tokens"], 3000);
        assert_eq!(body["system"], "Be helpful");

        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0]["role"], "user");
        assert_eq!(messages[0]["content"][0]["type"], "text");
        assert_eq!(messages[0]["content"][0]["text"], "Hello!");
    }

    #[tokio::test]
    async fn test_invoke_extracts_text_block() {
        let http = Arc::new(
            MockHttpClient::new().with_response(TEST_URL, messages_response("Hi there")),
        );
        let client = LlmClient::new(http);
        let adapter = AnthropicAdapter::new("claude-3-5-sonnet-20240620");

        let completions = adapter
            .invoke(&client, "sys", &[], &UserPrompt::from("hi"), 0.75, 1)
            .await
            .unwrap();

        assert_eq!(completions, vec!["Hi there".to_string()]);
    }

    #[tokio::test]
    async fn test_invoke_rejects_missing_text_content() {
        let response = serde_json::json!({
            "id": "msg_123",
            "content": [{"type": "tool_use"}],
        });
        let http = Arc::new(MockHttpClient::new().with_response(TEST_URL, response));
        let client = LlmClient::new(http);
        let adapter = AnthropicAdapter::new("claude-3-5-sonnet-20240620");

        let result = adapter
            .invoke(&client, "sys", &[], &UserPrompt::from("hi"), 0.75, 1)
            .await;

        assert!(result.is_err());
    }

    #[test]
    fn test_append_turns_uses_parts_shape() {
        let adapter = AnthropicAdapter::new("claude-3-5-sonnet-20240620");
        let prompt = UserPrompt::from("Hello!");
        let completions = vec!["answer".to_string()];

        let branches = adapter.append_turns(&[], &prompt, &completions);

        assert_eq!(branches.len(), 1);
        let branch = &branches[0];
        assert_eq!(branch.len(), 2);
        assert_eq!(branch[0].role, MessageRole::User);
        assert!(branch[0].has_parts());
        assert_eq!(branch[1].role, MessageRole::Assistant);
        assert!(branch[1].has_parts());
        assert_eq!(branch[1].content_text(), "answer");
    }
}
