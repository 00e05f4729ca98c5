use serde::{Deserialize, Serialize};

/// Role of a message in the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// Content part for providers whose messages carry structured content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }
}

/// A message in a conversation.
///
/// Content is either plain text or an ordered sequence of typed parts; both
/// shapes are accepted on ingress and serialized as-is on egress, so a message
/// round-trips in whichever shape the originating backend used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    #[serde(flatten)]
    content: MessageContent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
enum MessageContent {
    Text { content: String },
    Parts { content: Vec<ContentPart> },
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: MessageContent::Text {
                content: content.into(),
            },
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: MessageContent::Text {
                content: content.into(),
            },
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: MessageContent::Text {
                content: content.into(),
            },
        }
    }

    pub fn user_with_parts(parts: Vec<ContentPart>) -> Self {
        Self {
            role: MessageRole::User,
            content: MessageContent::Parts { content: parts },
        }
    }

    pub fn assistant_with_parts(parts: Vec<ContentPart>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: MessageContent::Parts { content: parts },
        }
    }

    /// Plain text view of the content, flattening structured parts.
    pub fn content_text(&self) -> String {
        match &self.content {
            MessageContent::Text { content } => content.clone(),
            MessageContent::Parts { content } => content
                .iter()
                .map(|ContentPart::Text { text }| text.as_str())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    pub fn has_parts(&self) -> bool {
        matches!(self.content, MessageContent::Parts { .. })
    }
}

/// Conversation history: ordered messages, oldest first, append-only.
pub type History = Vec<Message>;

/// The caller's prompt for a new turn: plain text or structured parts.
#[derive(Debug, Clone, PartialEq)]
pub enum UserPrompt {
    Text(String),
    Parts(Vec<ContentPart>),
}

impl UserPrompt {
    /// Flatten to plain text for marker matching and offline synthesis.
    pub fn as_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Parts(parts) => parts
                .iter()
                .map(|ContentPart::Text { text }| text.as_str())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    /// User message carrying the prompt in its original shape.
    pub fn to_message(&self) -> Message {
        match self {
            Self::Text(text) => Message::user(text.clone()),
            Self::Parts(parts) => Message::user_with_parts(parts.clone()),
        }
    }

    /// User message in the parts shape expected by Claude-style backends.
    pub fn to_parts_message(&self) -> Message {
        Message::user_with_parts(vec![ContentPart::text(self.as_text())])
    }
}

impl From<&str> for UserPrompt {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for UserPrompt {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Vec<ContentPart>> for UserPrompt {
    fn from(parts: Vec<ContentPart>) -> Self {
        Self::Parts(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_creation() {
        let msg = Message::user("Hello");
        assert_eq!(msg.role, MessageRole::User);
        assert_eq!(msg.content_text(), "Hello");
        assert!(!msg.has_parts());
    }

    #[test]
    fn test_message_serialization() {
        let msg = Message::assistant("Hi there!");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"role\":\"assistant\""));
        assert!(json.contains("\"content\":\"Hi there!\""));
    }

    #[test]
    fn test_parts_message_serialization() {
        let msg = Message::user_with_parts(vec![ContentPart::text("Hello")]);
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["content"][0]["type"], "text");
        assert_eq!(json["content"][0]["text"], "Hello");
    }

    #[test]
    fn test_parts_message_deserialization() {
        let json = r#"{"role":"user","content":[{"type":"text","text":"Hi"}]}"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert!(msg.has_parts());
        assert_eq!(msg.content_text(), "Hi");
    }

    #[test]
    fn test_prompt_flattening() {
        let prompt = UserPrompt::from(vec![
            ContentPart::text("first part"),
            ContentPart::text("second part"),
        ]);
        assert_eq!(prompt.as_text(), "first part second part");
    }

    #[test]
    fn test_prompt_preserves_shape() {
        let text_prompt = UserPrompt::from("plain");
        assert!(!text_prompt.to_message().has_parts());

        let parts_prompt = UserPrompt::from(vec![ContentPart::text("structured")]);
        assert!(parts_prompt.to_message().has_parts());
        assert!(parts_prompt.to_parts_message().has_parts());
    }
}
