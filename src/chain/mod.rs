//! Chains that drive a completion provider toward a stated objective.

mod prompt;

use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::Arc;

use tracing::debug;

use crate::core::{CompletionProvider, LlmError};
use crate::provider::{CompletionParams, OpenAiClient};

const DEFAULT_URL_KEY: &str = "url";
const DEFAULT_CONTENT_KEY: &str = "browser_content";
const DEFAULT_OUTPUT_KEY: &str = "response";

/// One round of LLM-driven browser navigation.
///
/// The chain holds an objective fixed at construction. Each round takes the
/// current URL and a simplified rendering of the page, asks the model for the
/// next browser command, and returns that command under the configured output
/// key. Oversized page content is clipped before the request so the prompt
/// stays within a fixed character budget.
///
/// The completion capability is shared, not owned: any
/// [`CompletionProvider`] behind an `Arc` will do, which keeps the chain
/// testable without network access.
pub struct NavigatorChain {
    llm: Arc<dyn CompletionProvider>,
    objective: String,
    input_url_key: String,
    input_content_key: String,
    output_key: String,
}

impl NavigatorChain {
    pub fn new(llm: Arc<dyn CompletionProvider>, objective: &str) -> Self {
        Self {
            llm,
            objective: objective.to_string(),
            input_url_key: DEFAULT_URL_KEY.to_string(),
            input_content_key: DEFAULT_CONTENT_KEY.to_string(),
            output_key: DEFAULT_OUTPUT_KEY.to_string(),
        }
    }

    /// Build the chain on an OpenAI client tuned for navigation: low
    /// temperature, short answers, and several server-side candidates with
    /// only the best few returned.
    ///
    /// Reads the API key from `OPENAI_API_KEY`.
    pub fn with_openai(objective: &str) -> Result<Self, LlmError> {
        const CHOICES: NonZeroU32 = NonZeroU32::new(3).unwrap();
        const CANDIDATES: NonZeroU32 = NonZeroU32::new(10).unwrap();

        let params = CompletionParams {
            temperature: 0.5,
            max_tokens: 50,
            n: CHOICES,
            best_of: CANDIDATES,
            ..CompletionParams::default()
        };
        let client = OpenAiClient::from_env(params)?;
        Ok(Self::new(Arc::new(client), objective))
    }

    /// Rename the two input keys and the output key in one go.
    pub fn with_keys(mut self, url_key: &str, content_key: &str, output_key: &str) -> Self {
        self.input_url_key = url_key.to_string();
        self.input_content_key = content_key.to_string();
        self.output_key = output_key.to_string();
        self
    }

    pub fn output_key(&self) -> &str {
        &self.output_key
    }

    async fn complete_command(
        &self,
        url: &str,
        browser_content: &str,
    ) -> Result<String, LlmError> {
        let mut rendered = prompt::render(&self.objective, url, browser_content);
        if rendered.chars().count() > prompt::PROMPT_CHAR_BUDGET {
            let kept = prompt::clip_chars(browser_content, prompt::CONTENT_CLIP_CHARS);
            debug!(
                content_chars = browser_content.chars().count(),
                kept_chars = kept.chars().count(),
                "page content clipped to fit the prompt budget"
            );
            rendered = prompt::render(&self.objective, url, kept);
        }
        self.llm.complete(&rendered, None).await
    }

    /// Run one navigation round; the command comes back under the output key.
    pub async fn run(
        &self,
        url: &str,
        browser_content: &str,
    ) -> Result<HashMap<String, String>, LlmError> {
        let command = self.complete_command(url, browser_content).await?;
        Ok(HashMap::from([(self.output_key.clone(), command)]))
    }

    /// Like [`run`](Self::run), but reads both inputs from a map keyed by the
    /// configured input keys.
    pub async fn call(
        &self,
        inputs: &HashMap<String, String>,
    ) -> Result<HashMap<String, String>, LlmError> {
        let url = self.input(inputs, &self.input_url_key)?;
        let browser_content = self.input(inputs, &self.input_content_key)?;
        self.run(url, browser_content).await
    }

    /// Convenience wrapper around [`run`](Self::run) that returns the bare
    /// command string.
    pub async fn execute(&self, url: &str, browser_content: &str) -> Result<String, LlmError> {
        self.complete_command(url, browser_content).await
    }

    fn input<'a>(
        &self,
        inputs: &'a HashMap<String, String>,
        key: &str,
    ) -> Result<&'a str, LlmError> {
        inputs
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| LlmError::Configuration(format!("Chain input '{key}' is missing")))
    }
}
