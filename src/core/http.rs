//! Shared HTTP transport for the completion API.

use std::time::Duration;

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use super::error::LlmError;

/// Configuration for the underlying HTTP transport.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Total per-request timeout, connection setup included.
    pub timeout: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
        }
    }
}

/// Thin JSON-over-POST client.
///
/// One request per call: a failed request is reported, never replayed, so the
/// caller keeps full control over how often the remote quota is hit.
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Build the transport. This is the one place a `reqwest` client is
    /// constructed; a TLS/connector initialization failure surfaces here as a
    /// configuration error rather than later at request time.
    pub fn new(config: HttpClientConfig, user_agent: Option<&str>) -> Result<Self, LlmError> {
        let default_ua = format!("webpilot/{}", env!("CARGO_PKG_VERSION"));
        let ua = user_agent.unwrap_or(&default_ua);

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(ua)
            .build()
            .map_err(|e| LlmError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Make a single POST request with a JSON body and decode the JSON reply.
    #[tracing::instrument(
        name = "http_post_json",
        skip(self, headers, body),
        fields(url = %url),
        err
    )]
    pub async fn post_json<Req, Res>(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &Req,
    ) -> Result<Res, LlmError>
    where
        Req: Serialize,
        Res: DeserializeOwned,
    {
        let mut req_builder = self.client.post(url).json(body);
        for (name, value) in headers {
            req_builder = req_builder.header(name, value);
        }

        let res = req_builder.send().await.map_err(|e| LlmError::RemoteCall {
            message: "Request failed".to_string(),
            status_code: None,
            source: Some(Box::new(e)),
        })?;

        let status = res.status();
        if !status.is_success() {
            warn!(status = %status, "API returned error status");
            let error_text = res
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::RemoteCall {
                message: format!("API error ({status}): {error_text}"),
                status_code: Some(status.as_u16()),
                source: None,
            });
        }

        debug!(status = %status, "HTTP request successful");

        let response_text = res.text().await.map_err(|e| LlmError::RemoteCall {
            message: "Failed to read response body".to_string(),
            status_code: Some(status.as_u16()),
            source: Some(Box::new(e)),
        })?;

        serde_json::from_str(&response_text).map_err(|e| LlmError::ResponseFormat {
            message: "Failed to parse API response".to_string(),
            source: Some(Box::new(e)),
        })
    }
}
