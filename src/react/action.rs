//! Parsing of provider replies into structured actions.
//!
//! The action protocol is a constrained natural-language grammar, not JSON:
//!
//! ```text
//! Action: RETURN[<final answer>]
//! Action: <ToolName>[<tool input>]
//! ```
//!
//! Parsing is purely lexical — marker and bracket scanning, first closing
//! `]` ends the payload. Nested brackets are not supported; recorded
//! transcripts depend on the first-bracket-pair rule, so it must not change.

/// Marker for the terminal action.
const RETURN_MARKER: &str = "RETURN";

/// Structured intent parsed from one provider reply. Produced fresh each
/// round, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The model is done; `text` becomes the chain output.
    FinalAnswer { text: String },
    /// The model wants to run a named tool with a text argument.
    ToolInvocation { name: String, argument: String },
    /// Nothing recognizable. Recoverable — the loop moves to the next
    /// round and lets the model self-correct.
    Unparseable { raw: String },
}

/// Parse a raw reply into an [`Action`]. Pure and stateless: the same
/// reply always yields the same action.
///
/// Rules, first match wins:
/// 1. `RETURN` followed by a bracketed payload → [`Action::FinalAnswer`].
///    The payload is everything between the first `[` after the marker and
///    the next `]`, untrimmed. A `RETURN` with malformed brackets fails
///    closed as [`Action::Unparseable`].
/// 2. `<name>[<payload>]` → [`Action::ToolInvocation`] with both parts
///    trimmed.
/// 3. Anything else → [`Action::Unparseable`].
///
/// A leading `Action:` cue (models often echo it) is stripped first.
pub fn parse(reply: &str) -> Action {
    let body = reply.trim();
    let body = body
        .strip_prefix("Action:")
        .map(str::trim_start)
        .unwrap_or(body);

    if let Some(marker) = body.find(RETURN_MARKER) {
        let after = &body[marker + RETURN_MARKER.len()..];
        if let Some(open) = after.find('[') {
            let payload = &after[open + 1..];
            if let Some(close) = payload.find(']') {
                return Action::FinalAnswer {
                    text: payload[..close].to_string(),
                };
            }
        }
        // Marker present but no complete bracket pair: never raise.
        return Action::Unparseable {
            raw: reply.to_string(),
        };
    }

    if let Some(open) = body.find('[') {
        let name = body[..open].trim();
        let payload = &body[open + 1..];
        if !name.is_empty() {
            if let Some(close) = payload.find(']') {
                return Action::ToolInvocation {
                    name: name.to_string(),
                    argument: payload[..close].trim().to_string(),
                };
            }
        }
    }

    Action::Unparseable {
        raw: reply.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_final_answer() {
        assert_eq!(
            parse("RETURN[42]"),
            Action::FinalAnswer { text: "42".into() }
        );
    }

    #[test]
    fn final_answer_payload_is_exact() {
        // Untrimmed payload, any text without a closing bracket.
        assert_eq!(
            parse("RETURN[ It is 20 degrees and sunny in Paris ]"),
            Action::FinalAnswer {
                text: " It is 20 degrees and sunny in Paris ".into()
            }
        );
    }

    #[test]
    fn final_answer_with_action_cue() {
        assert_eq!(
            parse("Action: RETURN[Paris]"),
            Action::FinalAnswer {
                text: "Paris".into()
            }
        );
    }

    #[test]
    fn first_closing_bracket_ends_payload() {
        // Nested brackets are not supported by design.
        assert_eq!(
            parse("RETURN[a [nested] tail]"),
            Action::FinalAnswer {
                text: "a [nested".into()
            }
        );
    }

    #[test]
    fn return_takes_priority_over_invocation() {
        assert_eq!(
            parse("RETURN[Math[2+2]]"),
            Action::FinalAnswer {
                text: "Math[2+2".into()
            }
        );
    }

    #[test]
    fn parses_tool_invocation() {
        assert_eq!(
            parse("Action: Weather[Paris]"),
            Action::ToolInvocation {
                name: "Weather".into(),
                argument: "Paris".into()
            }
        );
    }

    #[test]
    fn invocation_parts_are_trimmed() {
        assert_eq!(
            parse("  Math [ 2+2 ]"),
            Action::ToolInvocation {
                name: "Math".into(),
                argument: "2+2".into()
            }
        );
    }

    #[test]
    fn return_without_brackets_fails_closed() {
        let raw = "I will RETURN the answer soon";
        assert_eq!(parse(raw), Action::Unparseable { raw: raw.into() });
    }

    #[test]
    fn return_without_closing_bracket_fails_closed() {
        let raw = "RETURN[42";
        assert_eq!(parse(raw), Action::Unparseable { raw: raw.into() });
    }

    #[test]
    fn invocation_without_closing_bracket_fails_closed() {
        let raw = "Math[2+2";
        assert_eq!(parse(raw), Action::Unparseable { raw: raw.into() });
    }

    #[test]
    fn empty_name_is_unparseable() {
        let raw = "[just brackets]";
        assert_eq!(parse(raw), Action::Unparseable { raw: raw.into() });
    }

    #[test]
    fn plain_text_is_unparseable() {
        let raw = "I am not sure what to do next.";
        assert_eq!(parse(raw), Action::Unparseable { raw: raw.into() });
    }

    #[test]
    fn parse_is_idempotent() {
        for reply in ["RETURN[x]", "Math[1+1]", "nothing here", "RETURN["] {
            assert_eq!(parse(reply), parse(reply));
        }
    }
}
