mod client;
mod config;
mod mock;
mod openai;

// Re-export public interfaces
pub use client::CompletionClient;
pub use config::CompletionConfig;
pub use mock::{MockClient, ScriptedResponse};
pub use openai::OpenAIClient;

use anyhow::Result;
use std::sync::Arc;

/// Assemble the configured completion backend.
///
/// The API key is resolved here, at assembly time; pipeline components only
/// ever see the opaque [`CompletionClient`] capability.
pub fn create_client(config: &CompletionConfig) -> Result<Arc<dyn CompletionClient>> {
    Ok(Arc::new(OpenAIClient::new(config)?))
}
