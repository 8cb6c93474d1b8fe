//! Conversational assistant for the Sunshine volunteer-care platform.
//!
//! Turns a new user message plus the active session history into a bounded,
//! role-tagged message sequence, submits it to an external chat-completion
//! provider, and sanitizes the reply before it reaches the caller. The flow
//! is linear and stateless per invocation: build context, complete, sanitize.

pub mod assistant;
pub mod context;
pub mod error;
pub mod gateway;
pub mod sanitize;
pub mod types;

pub use assistant::Assistant;
pub use context::{ContextBuilder, SYSTEM_PREAMBLE};
pub use error::AssistantError;
pub use gateway::{CompletionClient, HfInferenceClient};
pub use sanitize::Sanitizer;
pub use types::{
    ChatMessage, CompletionRequest, GenerationParams, HistoryEntry, MessageContext, Role, Turn,
};
