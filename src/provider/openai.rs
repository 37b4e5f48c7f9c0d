//! Raw HTTP client for the OpenAI completions API.
//!
//! No loop awareness — just makes API calls via reqwest and enforces the
//! configured context budget before each one.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{CompletionConfig, CompletionProvider, ProviderError};

/// Completion provider backed by the OpenAI completions endpoint.
#[derive(Debug)]
pub struct OpenAiProvider {
    http: Client,
    api_key: String,
    base_url: String,
    config: CompletionConfig,
}

impl OpenAiProvider {
    /// Create a provider with the default base URL (https://api.openai.com).
    pub fn new(api_key: String, config: CompletionConfig) -> Self {
        Self::with_base_url(api_key, config, "https://api.openai.com".into())
    }

    /// Create a provider reading OPENAI_API_KEY from the environment.
    pub fn from_env(config: CompletionConfig) -> Result<Self, ProviderError> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            ProviderError::MissingApiKey("OPENAI_API_KEY environment variable not set".into())
        })?;
        Ok(Self::new(api_key, config))
    }

    /// Create a provider with a custom base URL (for testing with mock
    /// servers).
    pub fn with_base_url(api_key: String, config: CompletionConfig, base_url: String) -> Self {
        Self {
            http: Client::new(),
            api_key,
            base_url,
            config,
        }
    }

    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }

    async fn completions(&self, prompt: &str) -> Result<CompletionResponse, ProviderError> {
        let url = format!("{}/v1/completions", self.base_url);
        let request = CompletionRequest {
            model: &self.config.model,
            prompt,
            max_tokens: self.config.max_output_tokens,
            temperature: self.config.temperature,
            top_p: self.config.top_p,
            frequency_penalty: self.config.frequency_penalty,
            presence_penalty: self.config.presence_penalty,
            stop: &self.config.stop,
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status().as_u16();

        if status == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok());
            return Err(ProviderError::RateLimited { retry_after });
        }

        if status >= 400 {
            let body = response.text().await.unwrap_or_else(|_| "(no body)".into());
            return Err(ProviderError::Api {
                status,
                message: body,
            });
        }

        response.json().await.map_err(|e| {
            ProviderError::InvalidResponse(format!("failed to parse response: {e}"))
        })
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        self.config.check_budget(prompt)?;
        let response = self.completions(prompt).await?;
        let choice = response.choices.into_iter().next().ok_or_else(|| {
            ProviderError::InvalidResponse("response contained no choices".into())
        })?;
        Ok(choice.text)
    }
}

/// Request body for the completions endpoint.
#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
    frequency_penalty: f32,
    presence_penalty: f32,
    stop: &'a [String],
}

/// Response from the completions endpoint.
#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
    #[allow(dead_code)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    text: String,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[allow(dead_code)]
    prompt_tokens: u32,
    #[allow(dead_code)]
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CompletionConfig {
        CompletionConfig::new("text-davinci-003", 4097)
    }

    #[test]
    fn provider_creation() {
        let provider = OpenAiProvider::new("test-key".into(), config());
        assert_eq!(provider.base_url, "https://api.openai.com");
        assert_eq!(provider.config().model, "text-davinci-003");
    }

    #[test]
    fn provider_custom_base_url() {
        let provider =
            OpenAiProvider::with_base_url("k".into(), config(), "http://localhost:8080".into());
        assert_eq!(provider.base_url, "http://localhost:8080");
    }

    #[test]
    fn from_env_missing_key() {
        std::env::remove_var("OPENAI_API_KEY");
        let result = OpenAiProvider::from_env(config());
        assert!(matches!(result, Err(ProviderError::MissingApiKey(_))));
    }

    #[tokio::test]
    async fn oversized_prompt_fails_before_any_http() {
        // Unroutable base URL: if the budget check did not short-circuit,
        // this test would error with an HTTP failure instead.
        let tight = CompletionConfig::new("m", 64).with_max_output_tokens(32);
        let provider =
            OpenAiProvider::with_base_url("k".into(), tight, "http://localhost:1".into());
        let err = provider.complete(&"x".repeat(100)).await.unwrap_err();
        assert!(matches!(err, ProviderError::ContextTooLarge { .. }));
    }

    #[test]
    fn request_serializes() {
        let stop = vec!["\n".to_string()];
        let req = CompletionRequest {
            model: "text-davinci-003",
            prompt: "Thought:",
            max_tokens: 250,
            temperature: 0.0,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            stop: &stop,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["model"], "text-davinci-003");
        assert_eq!(json["max_tokens"], 250);
        assert_eq!(json["stop"][0], "\n");
    }

    #[test]
    fn response_deserializes() {
        let json = r#"{
            "choices": [{"text": " I should use the Math tool."}],
            "usage": {"prompt_tokens": 100, "completion_tokens": 8}
        }"#;
        let resp: CompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.choices[0].text, " I should use the Math tool.");
        assert_eq!(resp.usage.unwrap().completion_tokens, 8);
    }

    #[test]
    fn error_display() {
        let err = ProviderError::Api {
            status: 401,
            message: "invalid api key".into(),
        };
        assert!(err.to_string().contains("401"));

        let err = ProviderError::ContextTooLarge {
            prompt_len: 5000,
            max_output_tokens: 500,
            context_window: 4097,
        };
        let text = err.to_string();
        assert!(text.contains("5000"));
        assert!(text.contains("4097"));
    }
}
