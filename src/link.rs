//! Links — the steps of a chain.
//!
//! A link takes the chain state in, does work, and hands the updated state
//! to the next link. Links validate the state they receive, read what they
//! need, and only add or update keys they are responsible for.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::provider::{CompletionProvider, ProviderError};
use crate::state::ChainState;

/// Errors from running one link.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    /// The input state is invalid for this link.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// A completion provider call failed. Fatal to the run.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// One pipeline step behind a uniform run contract.
#[async_trait]
pub trait Link: Send + Sync {
    fn name(&self) -> &str;

    /// Check the input state before `run`. The chain calls this first.
    fn validate(&self, state: &ChainState) -> Result<(), LinkError>;

    /// Do the work. Takes the state by value and returns the updated
    /// state; the next link sees only what comes back.
    async fn run(&self, state: ChainState) -> Result<ChainState, LinkError>;
}

/// A single-shot link: render a prompt over the state input, make one
/// provider call, write the completion to the output (or to a named extras
/// key for a downstream link).
pub struct PromptLink {
    name: String,
    provider: Arc<dyn CompletionProvider>,
    /// Template with an `{input}` placeholder.
    template: String,
    /// `None` writes the reserved output; `Some(key)` writes extras.
    target_key: Option<String>,
}

impl PromptLink {
    pub fn new(provider: Arc<dyn CompletionProvider>, template: impl Into<String>) -> Self {
        Self {
            name: "PromptLink".into(),
            provider,
            template: template.into(),
            target_key: None,
        }
    }

    /// Write the completion to an extras key instead of the output.
    pub fn with_target_key(mut self, key: impl Into<String>) -> Self {
        self.target_key = Some(key.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

#[async_trait]
impl Link for PromptLink {
    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self, state: &ChainState) -> Result<(), LinkError> {
        if state.input().is_empty() {
            return Err(LinkError::InvalidState("input is empty".into()));
        }
        Ok(())
    }

    async fn run(&self, mut state: ChainState) -> Result<ChainState, LinkError> {
        let prompt = self.template.replace("{input}", state.input());
        let completion = self.provider.complete(&prompt).await?;
        debug!(link = %self.name, chars = completion.len(), "completion received");
        match &self.target_key {
            Some(key) => state.insert(key.clone(), completion.into()),
            None => state.set_output(completion),
        }
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Provider that returns a fixed reply and records the prompt.
    struct FixedProvider {
        reply: String,
        seen: std::sync::Mutex<Vec<String>>,
    }

    impl FixedProvider {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.into(),
                seen: std::sync::Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CompletionProvider for FixedProvider {
        async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
            self.seen.lock().unwrap().push(prompt.to_string());
            Ok(self.reply.clone())
        }
    }

    #[tokio::test]
    async fn prompt_link_writes_output() {
        let provider = Arc::new(FixedProvider::new("a haiku"));
        let link = PromptLink::new(provider.clone(), "Write a haiku about {input}.");

        let state = link.run(ChainState::seeded("rust")).await.unwrap();
        assert_eq!(state.output(), Some("a haiku"));
        assert_eq!(
            provider.seen.lock().unwrap()[0],
            "Write a haiku about rust."
        );
    }

    #[tokio::test]
    async fn prompt_link_can_target_extras() {
        let provider = Arc::new(FixedProvider::new("summary text"));
        let link = PromptLink::new(provider, "Summarize: {input}").with_target_key("summary");

        let state = link.run(ChainState::seeded("long article")).await.unwrap();
        assert!(state.output().is_none());
        assert_eq!(state.get_str("summary"), Some("summary text"));
    }

    #[tokio::test]
    async fn prompt_link_rejects_empty_input() {
        let link = PromptLink::new(Arc::new(FixedProvider::new("x")), "{input}");
        let err = link.validate(&ChainState::seeded("")).unwrap_err();
        assert!(matches!(err, LinkError::InvalidState(_)));
    }
}
