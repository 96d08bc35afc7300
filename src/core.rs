//! Provider-independent building blocks: the error type, the HTTP transport,
//! and the completion trait the chains consume.

pub mod error;
pub mod http;
pub mod traits;

pub use error::LlmError;
pub use http::{HttpClient, HttpClientConfig};
pub use traits::CompletionProvider;
