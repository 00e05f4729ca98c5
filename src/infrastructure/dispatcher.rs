//! Dispatch of completion requests to backend adapters or offline synthesis.

use tracing::debug;

use super::adapters::{append_plain_turns, resolve_model, BackendAdapter, ModelEntry};
use super::client::LlmClient;
use super::retry::RetryPolicy;
use super::synthesizer;
use crate::domain::{DispatchConfig, DispatchError, History, UserPrompt};

pub const DEFAULT_TEMPERATURE: f32 = 0.75;

/// One completion request: prompt, system instruction, prior history and
/// generation parameters.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub prompt: UserPrompt,
    pub system_text: String,
    pub history: History,
    pub temperature: f32,
    pub debug: bool,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<UserPrompt>, system_text: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_text: system_text.into(),
            history: Vec::new(),
            temperature: DEFAULT_TEMPERATURE,
            debug: false,
        }
    }

    pub fn history(mut self, history: History) -> Self {
        self.history = history;
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Result of a single-response call.
#[derive(Debug, Clone)]
pub struct Completion {
    pub content: String,
    pub history: History,
}

/// Result of a batch call: `contents.len() == histories.len() == n_responses`,
/// each history an independent branch.
#[derive(Debug, Clone)]
pub struct BatchCompletion {
    pub contents: Vec<String>,
    pub histories: Vec<History>,
}

/// Provider-agnostic dispatcher.
///
/// Selects a backend adapter (or the offline synthesizer) for a model
/// identifier and returns normalized completion text plus updated history.
/// The operating mode is fixed at construction and only ever read.
#[derive(Debug)]
pub struct Dispatcher {
    config: DispatchConfig,
    retry: RetryPolicy,
}

impl Dispatcher {
    pub fn new(config: DispatchConfig) -> Self {
        Self {
            config,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Request one completion. On success the returned history is the input
    /// history plus exactly one user and one assistant entry.
    pub async fn get_response_from_llm(
        &self,
        client: &LlmClient,
        model: &str,
        request: CompletionRequest,
    ) -> Result<Completion, DispatchError> {
        let (contents, histories) = self
            .retry
            .run(|| self.dispatch(client, model, &request, 1))
            .await?;

        match (contents.into_iter().next(), histories.into_iter().next()) {
            (Some(content), Some(history)) => Ok(Completion { content, history }),
            _ => Err(DispatchError::provider("dispatch", "Empty completion set")),
        }
    }

    /// Request N independent completions for ensembling.
    pub async fn get_batch_responses_from_llm(
        &self,
        client: &LlmClient,
        model: &str,
        request: CompletionRequest,
        n_responses: usize,
    ) -> Result<BatchCompletion, DispatchError> {
        let (contents, histories) = self
            .retry
            .run(|| self.dispatch(client, model, &request, n_responses))
            .await?;

        Ok(BatchCompletion {
            contents,
            histories,
        })
    }

    /// Offline substitution replaces the network call for eligible models, but
    /// never the adapter's conversation-shape contract.
    fn substitutes_offline(&self, client: &LlmClient, entry: &ModelEntry) -> bool {
        entry.offline_substitutable
            && self.config.mode().substitutes_offline()
            && client.is_offline_eligible()
    }

    async fn dispatch(
        &self,
        client: &LlmClient,
        model: &str,
        request: &CompletionRequest,
        n_responses: usize,
    ) -> Result<(Vec<String>, Vec<History>), DispatchError> {
        let entry = resolve_model(model)?;

        let (contents, histories) = match entry.backend.adapter() {
            None => {
                let prompt_text = request.prompt.as_text();
                let contents: Vec<String> = (0..n_responses.max(1))
                    .map(|_| synthesizer::mock_completion(&prompt_text))
                    .collect();
                let histories = append_plain_turns(&request.history, &request.prompt, &contents);
                (contents, histories)
            }
            Some(adapter) => {
                let contents = if self.substitutes_offline(client, entry) {
                    let prompt_text = request.prompt.as_text();
                    let system = (!request.system_text.is_empty())
                        .then_some(request.system_text.as_str());
                    (0..n_responses.max(1))
                        .map(|_| synthesizer::offline_completion(&prompt_text, system))
                        .collect()
                } else if adapter.native_batch_support() {
                    adapter
                        .invoke(
                            client,
                            &request.system_text,
                            &request.history,
                            &request.prompt,
                            request.temperature,
                            n_responses,
                        )
                        .await?
                } else {
                    // Batch emulated with sequential single calls, every
                    // branch starting from the caller's history.
                    let mut contents = Vec::with_capacity(n_responses);
                    for _ in 0..n_responses {
                        let completions = adapter
                            .invoke(
                                client,
                                &request.system_text,
                                &request.history,
                                &request.prompt,
                                request.temperature,
                                1,
                            )
                            .await?;
                        contents.extend(completions);
                    }
                    contents
                };

                let histories =
                    adapter.append_turns(&request.history, &request.prompt, &contents);
                (contents, histories)
            }
        };

        if request.debug {
            trace_generation(&contents, &histories);
        }

        Ok((contents, histories))
    }
}

/// Diagnostic trace of one representative history and the final content set.
fn trace_generation(contents: &[String], histories: &[History]) {
    let Some(history) = histories.first() else {
        return;
    };

    debug!("==================== LLM START ====================");
    for (index, message) in history.iter().enumerate() {
        debug!(index, role = ?message.role, content = %message.content_text());
    }
    debug!(?contents, "Final content set");
    debug!("===================== LLM END =====================");
}
