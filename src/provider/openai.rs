//! OpenAI legacy completions API client.
//!
//! Talks to the `/completions` endpoint (prompt in, text out), not the newer
//! chat or responses surfaces. Models such as `gpt-3.5-turbo-instruct` are
//! served there.

use std::num::NonZeroU32;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{CompletionProvider, HttpClient, HttpClientConfig, LlmError};
use crate::provider::constants;

/// Connection settings for the OpenAI API.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub http_config: HttpClientConfig,
}

impl OpenAiConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: constants::openai::API_BASE.to_string(),
            http_config: HttpClientConfig::default(),
        }
    }

    /// Read the API key from `OPENAI_API_KEY`.
    pub fn from_env() -> Result<Self, LlmError> {
        let api_key = std::env::var(constants::openai::API_KEY_ENV_VAR).map_err(|_| {
            LlmError::Configuration(format!(
                "{} is not set; export it or pass a key to OpenAiConfig::new",
                constants::openai::API_KEY_ENV_VAR
            ))
        })?;
        Ok(Self::new(api_key))
    }

    /// Point the client at a different endpoint, e.g. a proxy or a mock
    /// server in tests.
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_http_config(mut self, config: HttpClientConfig) -> Self {
        self.http_config = config;
        self
    }

    fn auth_header(&self) -> (String, String) {
        ("Authorization".to_string(), format!("Bearer {}", self.api_key))
    }
}

/// Generation parameters sent with every completion request.
///
/// Defaults mirror the service's own documented defaults, so an
/// out-of-the-box client behaves exactly like a raw API call with only the
/// model set. The schema is closed: deserializing input with a key this
/// struct does not know is an error, never a silent pass-through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompletionParams {
    pub model: String,
    /// Sampling temperature. Higher values make output more random.
    pub temperature: f32,
    /// Upper bound on generated tokens, prompt excluded.
    pub max_tokens: u32,
    /// Nucleus sampling mass.
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
    /// How many completions to return per prompt.
    pub n: NonZeroU32,
    /// How many candidates to generate server-side before keeping the `n`
    /// best. The service rejects `best_of` smaller than `n`; that check is
    /// left to the service.
    pub best_of: NonZeroU32,
}

impl Default for CompletionParams {
    fn default() -> Self {
        Self {
            model: constants::openai::DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            max_tokens: 256,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            n: NonZeroU32::MIN,
            best_of: NonZeroU32::MIN,
        }
    }
}

/// Wire format of a completion request.
#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop: Option<&'a [String]>,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    frequency_penalty: f32,
    presence_penalty: f32,
    n: NonZeroU32,
    best_of: NonZeroU32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    text: String,
}

/// Client for the OpenAI completions endpoint.
///
/// Construction validates configuration and builds the HTTP transport once;
/// no network traffic happens until [`complete`](CompletionProvider::complete)
/// is called.
pub struct OpenAiClient {
    config: OpenAiConfig,
    params: CompletionParams,
    http: HttpClient,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig, params: CompletionParams) -> Result<Self, LlmError> {
        let http = HttpClient::new(config.http_config.clone(), None)?;
        Ok(Self {
            config,
            params,
            http,
        })
    }

    /// Build a client with the key from `OPENAI_API_KEY` and default
    /// connection settings.
    pub fn from_env(params: CompletionParams) -> Result<Self, LlmError> {
        Self::new(OpenAiConfig::from_env()?, params)
    }

    pub fn params(&self) -> &CompletionParams {
        &self.params
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(&self, prompt: &str, stop: Option<&[String]>) -> Result<String, LlmError> {
        let url = format!(
            "{}{}",
            self.config.base_url,
            constants::openai::COMPLETIONS_ENDPOINT
        );
        let headers = [self.config.auth_header()];

        let request = CompletionRequest {
            model: &self.params.model,
            prompt,
            stop,
            temperature: self.params.temperature,
            max_tokens: self.params.max_tokens,
            top_p: self.params.top_p,
            frequency_penalty: self.params.frequency_penalty,
            presence_penalty: self.params.presence_penalty,
            n: self.params.n,
            best_of: self.params.best_of,
        };

        let response: CompletionResponse = self.http.post_json(&url, &headers, &request).await?;

        debug!(choices = response.choices.len(), "completion received");

        let first = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::ResponseFormat {
                message: "Completion response contained no choices".to_string(),
                source: None,
            })?;
        Ok(first.text)
    }
}
