use async_trait::async_trait;

use super::error::LlmError;

/// A prompt-in, text-out completion capability.
///
/// Chains hold this as a trait object so the same chain logic runs against a
/// real API client in production and a scripted fake in tests.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Complete `prompt`, optionally asking the service to stop generation at
    /// any of the given stop sequences. Returns the text of the first choice.
    async fn complete(&self, prompt: &str, stop: Option<&[String]>) -> Result<String, LlmError>;
}
