use std::future::Future;

use crate::error::AssistantError;

/// A text-in, text-out generative model.
pub trait GenerativeModel: Send + Sync {
    /// Produce a completion for a fully rendered prompt.
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, AssistantError>> + Send;
}
