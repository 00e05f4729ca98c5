//! Infrastructure layer - transport, adapters, synthesis and dispatch

pub mod adapters;
pub mod client;
pub mod dispatcher;
pub mod http_client;
pub mod logging;
pub mod retry;
pub mod synthesizer;

pub use client::LlmClient;
pub use dispatcher::{
    BatchCompletion, Completion, CompletionRequest, Dispatcher, DEFAULT_TEMPERATURE,
};
pub use http_client::{HttpClient, HttpClientTrait};
pub use logging::init_logging;
pub use retry::{RetryConfig, RetryPolicy};
