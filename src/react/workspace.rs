//! Workspace transcript and per-round records.
//!
//! A workspace is the growing text of one reasoning-loop invocation: the
//! seed line, then one `Thought:`/`Action:`/`Observation:` group per round.
//! It is append-only, never shared across invocations, and discarded when
//! the loop terminates. No truncation happens here — every provider call
//! sees the full transcript, so the round limit and the provider's context
//! budget must be kept compatible by the caller.

use std::fmt;

/// Append-only transcript scoped to one loop invocation.
#[derive(Debug, Clone)]
pub struct Workspace {
    text: String,
}

impl Workspace {
    /// Seed the transcript with the user input and the available tool
    /// names (already rendered as a display tuple, e.g. `('Math')`).
    pub fn seed(input: &str, tool_names: &str) -> Self {
        Self {
            text: format!("User Input: {input}\nTools Available: {tool_names}"),
        }
    }

    /// Append one labelled line, e.g. `push_line("Thought", text)`.
    pub fn push_line(&mut self, label: &str, content: &str) {
        if !self.text.ends_with('\n') {
            self.text.push('\n');
        }
        self.text.push_str(&format!("{label}: {content}\n"));
    }

    /// The full transcript so far.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Workspace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// One thought-action-observation record, kept for diagnostics only.
/// Emitted via `tracing::debug!` and dropped with the loop.
#[derive(Debug, Clone)]
pub struct RoundRecord {
    /// The model's thought text for this round.
    pub thought: String,
    /// The raw action reply, before parsing.
    pub action: String,
    /// The observation, when the round produced one. Unparseable replies
    /// and dispatch misses leave this empty.
    pub observation: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_format() {
        let ws = Workspace::seed("What is 2+2?", "('Math')");
        assert_eq!(
            ws.as_str(),
            "User Input: What is 2+2?\nTools Available: ('Math')"
        );
    }

    #[test]
    fn lines_append_in_order() {
        let mut ws = Workspace::seed("q", "()");
        ws.push_line("Thought", "I can answer this directly.");
        ws.push_line("Action", "RETURN[done]");
        ws.push_line("Observation", "done");
        let text = ws.as_str();
        assert!(text.ends_with(
            "Thought: I can answer this directly.\nAction: RETURN[done]\nObservation: done\n"
        ));
        let thought_at = text.find("Thought:").unwrap();
        let action_at = text.find("Action:").unwrap();
        assert!(thought_at < action_at);
    }
}
