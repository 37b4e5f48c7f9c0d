//! caravan — composable chains of reasoning links.
//!
//! A [`Chain`] runs an ordered sequence of [`Link`]s, threading one
//! [`ChainState`] from step to step. The interesting link is
//! [`ReactLink`]: an iterative reasoning-action-observation loop that asks
//! a [`CompletionProvider`] for a next step each round, parses the free
//! text reply into an [`Action`](react::action::Action), dispatches it
//! against a fixed [`ToolRegistry`], and folds the observation back into
//! the prompt for the next round.
//!
//! ```no_run
//! use std::sync::Arc;
//! use caravan::chain::Chain;
//! use caravan::provider::{openai::OpenAiProvider, CompletionConfig};
//! use caravan::react::ReactLink;
//! use caravan::tool::{math::MathTool, ToolRegistry};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CompletionConfig::for_model("text-davinci-003")
//!     .expect("known model")
//!     .with_max_output_tokens(250)
//!     .with_stop(vec!["\n".into()]);
//! let provider = Arc::new(OpenAiProvider::from_env(config)?);
//! let tools = ToolRegistry::new(vec![Arc::new(MathTool::new())]);
//!
//! let chain = Chain::new("react", vec![Box::new(ReactLink::new(provider, tools))]);
//! let answer = chain.run("What is 2+2?").await?;
//! # Ok(())
//! # }
//! ```

pub mod chain;
pub mod link;
pub mod provider;
pub mod react;
pub mod search;
pub mod state;
pub mod tool;

pub use chain::{Chain, ChainError};
pub use link::{Link, LinkError, PromptLink};
pub use provider::{CompletionConfig, CompletionProvider, ProviderError};
pub use react::ReactLink;
pub use state::ChainState;
pub use tool::{Tool, ToolError, ToolRegistry};
