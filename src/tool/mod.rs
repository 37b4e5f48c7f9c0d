//! Tool contract, registry, and dispatch.
//!
//! Tools don't think — they execute. A tool is a named unit of external
//! functionality with a description and usage instructions; the reasoning
//! loop invokes at most one per round. Tool failures are converted to
//! observation text so the model can see and recover from its own
//! mistakes; they never abort the loop.

pub mod fibonacci;
pub mod math;
pub mod search;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

/// Errors a tool invocation may produce. Surfaced to the model as an
/// observation, not propagated as a fatal error.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("tool failed: {0}")]
    Failed(String),
}

/// A named external operation invocable with a text argument.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Name matched (exactly, case-sensitively) against action grammar.
    fn name(&self) -> &str;

    /// Human-readable description, shown in the prompt.
    fn description(&self) -> &str;

    /// Usage instructions for the model.
    fn instructions(&self) -> &str;

    /// Run the tool. The observation text is fed back into the workspace.
    async fn invoke(&self, argument: &str) -> Result<String, ToolError>;

    /// One summary line for prompt assembly.
    fn summary(&self) -> String {
        format!(
            "{}: {} {}",
            self.name(),
            self.description(),
            self.instructions()
        )
    }
}

/// A fixed, ordered set of tools bound at link construction time. Not
/// mutable during a run.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new(tools: Vec<Arc<dyn Tool>>) -> Self {
        Self { tools }
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Names rendered for the workspace seed line: `('Math', 'Fibonacci')`,
    /// or `()` with no tools. Recorded transcripts use this exact form.
    pub fn names_display(&self) -> String {
        let quoted: Vec<String> = self.tools.iter().map(|t| format!("'{}'", t.name())).collect();
        format!("({})", quoted.join(", "))
    }

    /// Bulleted summary block substituted into the prompt's `{tools}` slot.
    pub fn summaries(&self) -> String {
        self.tools
            .iter()
            .map(|t| format!("* {}", t.summary()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Resolve and run one invocation.
    ///
    /// Scans in registration order and invokes the first tool whose name
    /// matches exactly. Returns `None` when no tool matches — a
    /// recoverable modeling error the loop treats as an empty observation.
    /// An invocation failure becomes an `Error: ...` observation string.
    pub async fn dispatch(&self, name: &str, argument: &str) -> Option<String> {
        let tool = self.tools.iter().find(|t| t.name() == name)?;
        match tool.invoke(argument).await {
            Ok(observation) => Some(observation),
            Err(e) => {
                warn!(tool = name, error = %e, "tool invocation failed");
                Some(format!("Error: {e}"))
            }
        }
    }

    /// Whether a tool with this exact name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.tools.iter().any(|t| t.name() == name)
    }
}
