//! Conversational assistant over the student roster.
//!
//! Provides chat history and prompt construction, a Gemini REST client
//! implementing [`GenerativeModel`], and the [`ContextRetriever`]
//! interface that supplies student data to each prompt.

pub mod config;
pub mod error;
pub mod gemini;
pub mod history;
pub mod model;
pub mod prompt;
pub mod retrieval;
pub mod service;

pub use config::AssistantConfig;
pub use error::AssistantError;
pub use gemini::GeminiApi;
pub use history::{ChatHistory, ChatMessage, ChatRole};
pub use model::GenerativeModel;
pub use retrieval::{ContextRetriever, NoContext, RosterContext};
pub use service::ChatService;
