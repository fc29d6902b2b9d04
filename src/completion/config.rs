use serde::{Deserialize, Serialize};

/// Completion backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// API key (can be an environment variable reference like ${OPENAI_API_KEY})
    #[serde(default)]
    pub api_key: String,

    /// Chat model used for annotation
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens per completion
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u16,

    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,

    #[serde(default = "default_exponential_base")]
    pub exponential_base: f64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            base_url: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            max_retries: default_max_retries(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
            exponential_base: default_exponential_base(),
        }
    }
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u16 {
    2048
}

fn default_max_retries() -> usize {
    3
}

fn default_initial_backoff_ms() -> u64 {
    1000
}

fn default_max_backoff_ms() -> u64 {
    60000
}

fn default_exponential_base() -> f64 {
    2.0
}

impl CompletionConfig {
    /// Load API key from configuration or environment variable
    pub fn load_api_key(&self) -> anyhow::Result<String> {
        use anyhow::Context;

        // Priority order for API key sources

        // 1. Explicit configuration
        if !self.api_key.is_empty() && !self.api_key.starts_with("${") {
            return Ok(self.api_key.clone());
        }

        // 2. Environment variable reference
        if self.api_key.starts_with("${") && self.api_key.ends_with('}') {
            let var_name = &self.api_key[2..self.api_key.len() - 1];
            return std::env::var(var_name)
                .with_context(|| format!("Environment variable {} not set", var_name));
        }

        // 3. Standard environment variable
        std::env::var("OPENAI_API_KEY")
            .context("No API key configured and OPENAI_API_KEY environment variable not set")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CompletionConfig::default();
        assert_eq!(config.model, "gpt-3.5-turbo");
        assert!((config.temperature - 0.7).abs() < 0.001);
        assert_eq!(config.max_tokens, 2048);
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn test_explicit_api_key_wins() {
        let config = CompletionConfig {
            api_key: "sk-explicit".to_string(),
            ..Default::default()
        };
        assert_eq!(config.load_api_key().unwrap(), "sk-explicit");
    }

    #[test]
    fn test_env_reference_api_key() {
        std::env::set_var("CODENOTE_TEST_KEY", "sk-from-env");
        let config = CompletionConfig {
            api_key: "${CODENOTE_TEST_KEY}".to_string(),
            ..Default::default()
        };
        assert_eq!(config.load_api_key().unwrap(), "sk-from-env");
        std::env::remove_var("CODENOTE_TEST_KEY");
    }

    #[test]
    fn test_missing_env_reference_fails() {
        let config = CompletionConfig {
            api_key: "${CODENOTE_UNSET_KEY}".to_string(),
            ..Default::default()
        };
        assert!(config.load_api_key().is_err());
    }
}
