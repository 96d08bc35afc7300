use thiserror::Error;

/// Errors surfaced by the completion client and the chains built on it.
///
/// Nothing here is recovered from locally: no retry, no backoff, no fallback.
/// Every failure travels to the immediate caller exactly once.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Construction-time failure: a missing credential, an HTTP transport
    /// that could not be built, or configuration input carrying fields this
    /// crate does not recognize.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The remote call itself failed: connect, timeout, body read, or a
    /// non-success HTTP status. Carries the status code when one was seen.
    #[error("Remote call failed: {message}")]
    RemoteCall {
        message: String,
        status_code: Option<u16>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The remote service answered, but not in the shape this client reads.
    #[error("Unexpected response shape: {message}")]
    ResponseFormat {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}
