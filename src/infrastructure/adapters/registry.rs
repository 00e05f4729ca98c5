//! Model registry: adding a backend is a data change, not a control-flow change.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::{AnthropicAdapter, BackendAdapter, OpenAiChatAdapter};
use crate::domain::DispatchError;

/// Which wire protocol serves a model, plus its protocol-level fixed params.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelBackend {
    /// OpenAI-compatible chat-completions protocol (also DeepSeek and Llama
    /// behind OpenAI-compatible endpoints).
    OpenAiChat {
        /// Provider-side model name, where it differs from the identifier
        wire_model: &'static str,
        /// Deterministic sampling seed, where the provider supports one
        seed: Option<u64>,
    },
    /// Anthropic messages protocol; one completion per request.
    Anthropic { wire_model: &'static str },
    /// Pure synthesis, no network.
    Mock,
}

impl ModelBackend {
    pub fn native_batch_support(&self) -> bool {
        !matches!(self, Self::Anthropic { .. })
    }

    /// The wire adapter serving this backend; `None` for pure synthesis.
    pub fn adapter(&self) -> Option<Box<dyn BackendAdapter>> {
        match *self {
            Self::OpenAiChat { wire_model, seed } => {
                Some(Box::new(OpenAiChatAdapter::new(wire_model, seed)))
            }
            Self::Anthropic { wire_model } => Some(Box::new(AnthropicAdapter::new(wire_model))),
            Self::Mock => None,
        }
    }
}

/// Registry descriptor for one model identifier.
#[derive(Debug, Clone, Copy)]
pub struct ModelEntry {
    pub backend: ModelBackend,
    /// Whether offline/mock mode substitutes the synthesizer for this model's
    /// network call.
    pub offline_substitutable: bool,
}

static MODEL_REGISTRY: Lazy<HashMap<&'static str, ModelEntry>> = Lazy::new(|| {
    let mut registry = HashMap::new();

    for id in [
        "gpt-4o-2024-05-13",
        "gpt-4o-mini-2024-07-18",
        "gpt-4o-2024-08-06",
    ] {
        registry.insert(
            id,
            ModelEntry {
                backend: ModelBackend::OpenAiChat {
                    wire_model: id,
                    seed: Some(0),
                },
                offline_substitutable: true,
            },
        );
    }

    registry.insert(
        "deepseek-coder-v2-0724",
        ModelEntry {
            backend: ModelBackend::OpenAiChat {
                wire_model: "deepseek-coder",
                seed: None,
            },
            offline_substitutable: false,
        },
    );

    let llama = ModelEntry {
        backend: ModelBackend::OpenAiChat {
            wire_model: "meta-llama/llama-3.1-405b-instruct",
            seed: None,
        },
        offline_substitutable: false,
    };
    registry.insert("llama-3-1-405b-instruct", llama);
    registry.insert("meta-llama/llama-3.1-405b-instruct", llama);

    registry.insert(
        "claude-3-5-sonnet-20240620",
        ModelEntry {
            backend: ModelBackend::Anthropic {
                wire_model: "claude-3-5-sonnet-20240620",
            },
            offline_substitutable: false,
        },
    );

    registry.insert(
        "mock-llm",
        ModelEntry {
            backend: ModelBackend::Mock,
            offline_substitutable: false,
        },
    );

    registry
});

/// Look up a model identifier; unknown identifiers are a hard error, never a
/// silent fallback to another backend.
pub fn resolve_model(model: &str) -> Result<&'static ModelEntry, DispatchError> {
    MODEL_REGISTRY
        .get(model)
        .ok_or_else(|| DispatchError::unsupported_model(model))
}

pub fn supported_models() -> Vec<&'static str> {
    let mut models: Vec<_> = MODEL_REGISTRY.keys().copied().collect();
    models.sort_unstable();
    models
}
