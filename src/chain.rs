//! Chains — ordered pipelines of links sharing one state.
//!
//! The caller's input seeds the state, every configured link runs exactly
//! once in construction order, and the output of the last link is the
//! final answer. Links never see each other directly; state is the only
//! channel between them.

use tracing::{debug, info};

use crate::link::{Link, LinkError};
use crate::state::ChainState;

/// Errors from running a chain.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    /// A chain with no links can never produce an output.
    #[error("chain {0} has no links")]
    Empty(String),

    /// A link failed; the chain stops at that link.
    #[error("link {link} failed: {source}")]
    Link {
        link: String,
        #[source]
        source: LinkError,
    },

    /// Every link ran but none set the output — typically a reasoning
    /// loop that exhausted its round limit.
    #[error("chain {0} finished without an output")]
    MissingOutput(String),
}

/// An ordered pipeline of links.
pub struct Chain {
    name: String,
    links: Vec<Box<dyn Link>>,
}

impl Chain {
    pub fn new(name: impl Into<String>, links: Vec<Box<dyn Link>>) -> Self {
        Self {
            name: name.into(),
            links,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run every link in order over a state seeded with `input` and
    /// return the final output.
    ///
    /// Fails if the chain is empty, if any link fails (the link's error
    /// propagates), or if the final state has no output.
    pub async fn run(&self, input: &str) -> Result<String, ChainError> {
        if self.links.is_empty() {
            return Err(ChainError::Empty(self.name.clone()));
        }

        info!(chain = %self.name, links = self.links.len(), "chain starting");
        let mut state = ChainState::seeded(input);

        for link in &self.links {
            link.validate(&state).map_err(|source| ChainError::Link {
                link: link.name().to_string(),
                source,
            })?;
            state = link.run(state).await.map_err(|source| ChainError::Link {
                link: link.name().to_string(),
                source,
            })?;
            debug!(chain = %self.name, link = link.name(), "link complete");
        }

        match state.take_output() {
            Some(output) => {
                info!(chain = %self.name, "chain finished");
                Ok(output)
            }
            None => Err(ChainError::MissingOutput(self.name.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    /// Link that copies a marker into extras, or sets the output.
    struct MarkLink {
        name: String,
        set_output: bool,
    }

    #[async_trait]
    impl Link for MarkLink {
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
            state.insert(self.name.clone(), json!("ran"));
            if self.set_output {
                // A later link can read what an earlier one wrote.
                let upstream = state.get_str("first").unwrap_or("missing").to_string();
                state.set_output(format!("{}:{}", state.input(), upstream));
            }
            Ok(state)
        }
    }

    #[tokio::test]
    async fn empty_chain_is_an_error() {
        let chain = Chain::new("empty", vec![]);
        let err = chain.run("x").await.unwrap_err();
        assert!(matches!(err, ChainError::Empty(_)));
    }

    #[tokio::test]
    async fn links_run_in_order_sharing_state() {
        let chain = Chain::new(
            "two-step",
            vec![
                Box::new(MarkLink {
                    name: "first".into(),
                    set_output: false,
                }),
                Box::new(MarkLink {
                    name: "second".into(),
                    set_output: true,
                }),
            ],
        );
        let output = chain.run("seed").await.unwrap();
        assert_eq!(output, "seed:ran");
    }

    #[tokio::test]
    async fn missing_output_is_a_typed_error() {
        let chain = Chain::new(
            "no-output",
            vec![Box::new(MarkLink {
                name: "only".into(),
                set_output: false,
            })],
        );
        let err = chain.run("x").await.unwrap_err();
        assert!(matches!(err, ChainError::MissingOutput(name) if name == "no-output"));
    }

    #[tokio::test]
    async fn validation_failure_names_the_link() {
        let chain = Chain::new(
            "strict",
            vec![Box::new(MarkLink {
                name: "checker".into(),
                set_output: true,
            })],
        );
        let err = chain.run("").await.unwrap_err();
        match err {
            ChainError::Link { link, source } => {
                assert_eq!(link, "checker");
                assert!(matches!(source, LinkError::InvalidState(_)));
            }
            other => panic!("expected Link error, got {other:?}"),
        }
    }
}
