use anyhow::Result;
use async_trait::async_trait;

/// Opaque completion capability consumed by the annotation pipeline.
///
/// The pipeline treats the service as a black box: it hands over a prompt
/// and receives text back. Correctness of the completion itself is the
/// backend's responsibility; the pipeline only validates the result.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Complete a prompt and return the raw response text
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Get client name for logging
    fn client_name(&self) -> &'static str;
}
