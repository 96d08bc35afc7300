//! Completion API providers.

mod constants;
pub(crate) mod openai;

pub use openai::{CompletionParams, OpenAiClient, OpenAiConfig};
