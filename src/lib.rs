//! # webpilot
//!
//! A client for the OpenAI text-completions API plus a chain that turns any
//! completion-capable model into a browser navigation agent.
//!
//! The provider side validates configuration up front and makes exactly one
//! HTTP request per completion. The chain side renders a fixed instruction
//! prompt around the current page and clips oversized page content so the
//! prompt never outgrows its character budget.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use webpilot::NavigatorChain;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads the API key from OPENAI_API_KEY.
//!     let chain = NavigatorChain::with_openai("Find a cordless kettle")?;
//!     let outputs = chain
//!         .run(
//!             "https://www.google.com/",
//!             "<input id=1 alt=\"Search\"></input>\n<button id=2>(Search)</button>",
//!         )
//!         .await?;
//!     println!("{}", outputs["response"]);
//!     Ok(())
//! }
//! ```

pub mod chain;
pub mod core;
pub mod provider;

pub use crate::chain::NavigatorChain;
pub use crate::core::{CompletionProvider, HttpClientConfig, LlmError};
pub use crate::provider::{CompletionParams, OpenAiClient, OpenAiConfig};
