//! ReACT reasoning loop — interleaved reasoning traces and actions
//! (https://arxiv.org/abs/2210.03629).
//!
//! Each round is a thought-action-observation cycle: ask the provider for
//! a thought, ask it for an action, parse the action, then either run a
//! tool and fold the observation back into the workspace or terminate with
//! a final answer. The loop is bounded by a round limit; hitting it leaves
//! the chain output unset, which the chain surfaces as a typed error.

pub mod action;
pub mod prompt;
pub mod workspace;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::link::{Link, LinkError};
use crate::provider::CompletionProvider;
use crate::state::ChainState;
use crate::tool::ToolRegistry;

use action::Action;
use prompt::PromptTemplate;
use workspace::{RoundRecord, Workspace};

const DEFAULT_MAX_ROUNDS: usize = 5;

/// Phases of the reasoning state machine.
///
/// `Thinking → Acting → Observing` each round, then either back to
/// `Thinking`, or `Terminated` on a final answer. `Exhausted` is reached
/// by the round counter instead of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Thinking,
    Acting,
    Observing,
    Terminated,
    Exhausted,
}

/// A link that runs the ReACT loop against one provider and a fixed tool
/// registry.
pub struct ReactLink {
    name: String,
    provider: Arc<dyn CompletionProvider>,
    tools: ToolRegistry,
    template: PromptTemplate,
    max_rounds: usize,
}

impl ReactLink {
    pub fn new(provider: Arc<dyn CompletionProvider>, tools: ToolRegistry) -> Self {
        Self {
            name: "ReactLink".into(),
            provider,
            tools,
            template: PromptTemplate::default(),
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }

    /// Override the round limit. The caller is responsible for keeping the
    /// limit and the provider's context budget compatible — the workspace
    /// grows without truncation.
    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Use a custom prompt template.
    pub fn with_template(mut self, template: PromptTemplate) -> Self {
        self.template = template;
        self
    }

    fn render_prompt(&self, workspace: &Workspace, cue: &str) -> String {
        let mut prompt = self
            .template
            .render(&self.tools.summaries(), workspace.as_str());
        if !prompt.ends_with('\n') {
            prompt.push('\n');
        }
        prompt.push_str(cue);
        prompt
    }
}

#[async_trait]
impl Link for ReactLink {
    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self, _state: &ChainState) -> Result<(), LinkError> {
        Ok(())
    }

    async fn run(&self, mut state: ChainState) -> Result<ChainState, LinkError> {
        let mut workspace = Workspace::seed(state.input(), &self.tools.names_display());
        let mut records: Vec<RoundRecord> = Vec::new();

        let mut phase = Phase::Thinking;
        let mut round = 0;
        let mut thought = String::new();
        let mut raw_action = String::new();

        loop {
            match phase {
                Phase::Thinking => {
                    if round >= self.max_rounds {
                        phase = Phase::Exhausted;
                        continue;
                    }
                    thought = self
                        .provider
                        .complete(&self.render_prompt(&workspace, "Thought:"))
                        .await?;
                    workspace.push_line("Thought", thought.trim());
                    phase = Phase::Acting;
                }
                Phase::Acting => {
                    raw_action = self
                        .provider
                        .complete(&self.render_prompt(&workspace, "Action:"))
                        .await?;
                    workspace.push_line("Action", raw_action.trim());
                    phase = Phase::Observing;
                }
                Phase::Observing => {
                    let observation = match action::parse(&raw_action) {
                        Action::FinalAnswer { text } => {
                            workspace.push_line("Observation", &text);
                            state.set_output(text.clone());
                            phase = Phase::Terminated;
                            Some(text)
                        }
                        Action::ToolInvocation { name, argument } => {
                            let observation = self.tools.dispatch(&name, &argument).await;
                            match &observation {
                                Some(text) => workspace.push_line("Observation", text),
                                None => {
                                    warn!(tool = %name, "no registered tool matches the action")
                                }
                            }
                            phase = Phase::Thinking;
                            observation
                        }
                        Action::Unparseable { raw } => {
                            warn!(reply = %raw, "unparseable action reply");
                            phase = Phase::Thinking;
                            None
                        }
                    };

                    let record = RoundRecord {
                        thought: std::mem::take(&mut thought),
                        action: std::mem::take(&mut raw_action),
                        observation,
                    };
                    debug!(
                        link = %self.name,
                        round,
                        thought = %record.thought,
                        action = %record.action,
                        observation = record.observation.as_deref().unwrap_or(""),
                        "round complete"
                    );
                    records.push(record);
                    round += 1;
                }
                Phase::Terminated | Phase::Exhausted => break,
            }
        }

        if phase == Phase::Exhausted {
            warn!(
                link = %self.name,
                rounds = round,
                "round limit reached without a final answer"
            );
        }
        debug!(
            link = %self.name,
            rounds = records.len(),
            terminated = matches!(phase, Phase::Terminated),
            "loop finished"
        );

        Ok(state)
    }
}
