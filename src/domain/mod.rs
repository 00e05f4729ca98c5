//! Domain layer - conversation model, operating mode and errors

pub mod error;
pub mod extract;
pub mod message;
pub mod mode;

pub use error::DispatchError;
pub use extract::extract_json_between_markers;
pub use message::{ContentPart, History, Message, MessageRole, UserPrompt};
pub use mode::{DispatchConfig, OperatingMode};
