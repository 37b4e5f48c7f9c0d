//! Completion providers — the external text-generation service the
//! reasoning loop consults each round.
//!
//! The loop only sees the narrow [`CompletionProvider`] contract: prompt
//! string in, completion string out, typed failure otherwise. Sampling
//! parameters and the context budget live in [`CompletionConfig`],
//! supplied explicitly at construction.

pub mod openai;
pub mod profile;

use async_trait::async_trait;

/// Errors from completion operations. All of these are fatal to the
/// current round and propagate to the chain caller; no retries happen
/// inside the loop.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error(
        "prompt length ({prompt_len}) + max_output_tokens ({max_output_tokens}) \
         exceeds context window ({context_window})"
    )]
    ContextTooLarge {
        prompt_len: usize,
        max_output_tokens: u32,
        context_window: usize,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("rate limited (retry after {retry_after:?}s)")]
    RateLimited { retry_after: Option<u64> },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("missing API key: {0}")]
    MissingApiKey(String),
}

/// The opaque completion contract: prompt in, text out.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// Sampling and budget configuration for a completion provider.
///
/// `context_window` is always explicit — there is no process-wide default
/// table. [`CompletionConfig::for_model`] offers the documented windows
/// for known models; unknown models require a caller-supplied value.
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    pub model: String,
    pub context_window: usize,
    pub max_output_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
    pub stop: Vec<String>,
}

impl CompletionConfig {
    /// Config with an explicit context window and default sampling.
    pub fn new(model: &str, context_window: usize) -> Self {
        Self {
            model: model.to_string(),
            context_window,
            max_output_tokens: 500,
            temperature: 0.0,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            stop: vec!["\n\n".to_string()],
        }
    }

    /// Config for a model with a documented context window; `None` for
    /// models not in the profile table.
    pub fn for_model(model: &str) -> Option<Self> {
        profile::known_context_window(model).map(|window| Self::new(model, window))
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_stop(mut self, stop: Vec<String>) -> Self {
        self.stop = stop;
        self
    }

    /// Enforce the context budget for a prompt: the prompt length plus the
    /// requested output must fit the window.
    pub fn check_budget(&self, prompt: &str) -> Result<(), ProviderError> {
        if prompt.len() + self.max_output_tokens as usize > self.context_window {
            return Err(ProviderError::ContextTooLarge {
                prompt_len: prompt.len(),
                max_output_tokens: self.max_output_tokens,
                context_window: self.context_window,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_window_config() {
        let config = CompletionConfig::new("custom-model", 2048);
        assert_eq!(config.model, "custom-model");
        assert_eq!(config.context_window, 2048);
        assert_eq!(config.temperature, 0.0);
    }

    #[test]
    fn for_model_known_and_unknown() {
        let config = CompletionConfig::for_model("text-davinci-003").unwrap();
        assert_eq!(config.context_window, 4097);
        assert!(CompletionConfig::for_model("not-a-model").is_none());
    }

    #[test]
    fn budget_rejects_oversized_prompts() {
        let config = CompletionConfig::new("m", 100).with_max_output_tokens(50);
        assert!(config.check_budget("short prompt").is_ok());

        let err = config.check_budget(&"x".repeat(60)).unwrap_err();
        match err {
            ProviderError::ContextTooLarge {
                prompt_len,
                max_output_tokens,
                context_window,
            } => {
                assert_eq!(prompt_len, 60);
                assert_eq!(max_output_tokens, 50);
                assert_eq!(context_window, 100);
            }
            other => panic!("expected ContextTooLarge, got {other:?}"),
        }
    }

    #[test]
    fn budget_boundary_is_exclusive() {
        let config = CompletionConfig::new("m", 100).with_max_output_tokens(50);
        // exactly at the window fits; one past it does not
        assert!(config.check_budget(&"x".repeat(50)).is_ok());
        assert!(config.check_budget(&"x".repeat(51)).is_err());
    }

    #[test]
    fn builder_overrides() {
        let config = CompletionConfig::new("m", 4096)
            .with_max_output_tokens(250)
            .with_temperature(0.7)
            .with_stop(vec!["\n".into()]);
        assert_eq!(config.max_output_tokens, 250);
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.stop, vec!["\n".to_string()]);
    }
}
