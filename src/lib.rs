//! LLM Dispatch
//!
//! A provider-agnostic text-generation request layer:
//! - routes a conversation to one of several supported LLM backends and
//!   returns normalized completion text plus an updated history
//! - batch generation of N independent completions for ensembling
//! - a fully offline mode that deterministically synthesizes plausible
//!   completions when no network-capable backend is configured
//!
//! ```no_run
//! use llm_dispatch::{CompletionRequest, DispatchConfig, Dispatcher, LlmClient};
//!
//! # async fn example() -> Result<(), llm_dispatch::DispatchError> {
//! let client = LlmClient::with_default_transport().openai_api_key("sk-...");
//! let dispatcher = Dispatcher::new(DispatchConfig::from_env());
//!
//! let completion = dispatcher
//!     .get_response_from_llm(
//!         &client,
//!         "gpt-4o-2024-08-06",
//!         CompletionRequest::new("Propose an experiment", "You are a researcher"),
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::{
    extract_json_between_markers, ContentPart, DispatchConfig, DispatchError, History, Message,
    MessageRole, OperatingMode, UserPrompt,
};
pub use infrastructure::{
    init_logging, BatchCompletion, Completion, CompletionRequest, Dispatcher, HttpClient,
    HttpClientTrait, LlmClient, RetryConfig, RetryPolicy,
};
