use anyhow::{anyhow, Context, Result};
use async_openai::{
    config::OpenAIConfig as AsyncOpenAIConfig,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

use super::client::CompletionClient;
use super::config::CompletionConfig;

const SYSTEM_PROMPT: &str =
    "You are an expert programmer that writes clear, concise, and helpful code comments.";

/// Chat-completion backend backed by the OpenAI API
pub struct OpenAIClient {
    client: Client<AsyncOpenAIConfig>,
    config: CompletionConfig,
}

impl OpenAIClient {
    /// Create a new OpenAI completion client
    pub fn new(config: &CompletionConfig) -> Result<Self> {
        let api_key = config
            .load_api_key()
            .context("Failed to load OpenAI API key")?;

        let mut openai_config = AsyncOpenAIConfig::new().with_api_key(api_key);

        if let Some(base_url) = &config.base_url {
            openai_config = openai_config.with_api_base(base_url);
        }

        let client = Client::with_config(openai_config);

        debug!("Initialized OpenAI client with model: {}", config.model);

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Retry with exponential backoff
    async fn retry_with_backoff<F, Fut, T>(&self, f: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let mut attempt = 0;
        let mut backoff = self.config.initial_backoff_ms;

        loop {
            match f().await {
                Ok(result) => return Ok(result),
                Err(e) if attempt >= self.config.max_retries => {
                    return Err(e).context("Max retries exceeded");
                }
                Err(e) => {
                    warn!("OpenAI request failed (attempt {}): {}", attempt + 1, e);
                    tokio::time::sleep(Duration::from_millis(backoff)).await;
                    backoff = (backoff as f64 * self.config.exponential_base) as u64;
                    backoff = backoff.min(self.config.max_backoff_ms);
                    attempt += 1;
                }
            }
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAIClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.config.model)
            .temperature(self.config.temperature)
            .max_tokens(self.config.max_tokens)
            .messages([
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(SYSTEM_PROMPT)
                    .build()
                    .context("Failed to build system message")?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(prompt)
                    .build()
                    .context("Failed to build user message")?
                    .into(),
            ])
            .build()
            .context("Failed to build completion request")?;

        let response = self
            .retry_with_backoff(|| async {
                self.client
                    .chat()
                    .create(request.clone())
                    .await
                    .context("OpenAI API request failed")
            })
            .await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| anyhow!("No completion returned"))
    }

    fn client_name(&self) -> &'static str {
        "openai"
    }
}
