//! Prompt template for the reasoning loop.
//!
//! A template is a plain string with two named placeholders, `{tools}` and
//! `{workspace}`, substituted on every round. Templates are stateless and
//! reusable across rounds and across links.

/// Placeholder for the rendered tool summaries.
pub const TOOLS_PLACEHOLDER: &str = "{tools}";
/// Placeholder for the accumulated workspace transcript.
pub const WORKSPACE_PLACEHOLDER: &str = "{workspace}";

/// Default prompt driving the thought-action-observation cycle.
///
/// The cues (`Thought:`, `Action:`, `Observation:`) and the two action
/// forms (`<tool name>[<tool input>]`, `RETURN[<final answer>]`) are load
/// bearing: the action parser recognizes exactly this grammar.
pub const REACT_TEMPLATE: &str = "\
You are a polite, thoughtful, and resourceful general purpose AI.

Tools - You can use the following tools. The tool name is listed first and a description is listed after the colon.
{tools}

To employ a tool, use the following format:
    Action: <tool name>[<tool input>]

Note: You MUST use the tool's name (as provided above) in order to use a tool.

Instructions
------------
You work in a thought-action-observation cycle. In each cycle, you:
    1. Think about the problem and how to solve it.
    2. Perform an action. You can use one of the tools or return a final response with `RETURN[<final answer>]`. You can only use one tool at a time.
    3. Observe the result of your action. This will be the output from any tool you used, or the final answer if you returned a final answer.
    4. Repeat steps 1-3 until you have a final answer in the observation.

Use the following format:

    Thought: <a thought>
    Action: <tool name>[<tool input>] (or RETURN[<final answer>])
    Observation: <action result>
    Thought: <a thought>
    Action: <tool name>[<tool input>] (or RETURN[<final answer>])
    Observation: <action result>
    ...

Example 1 (no tool needed):
    ```
    User Input: What is the capital of France?
    Tools Available: ()
    Thought: I know that Paris is the capital of France.
    Action: RETURN[Paris]
    Observation: Paris
    ```

Example 2 (tool needed):
    In this example, assume that a Weather tool is available.
    ```
    User Input: What is the weather in Paris?
    Tools Available: ('Weather')
    Thought: I need to use the Weather tool to get the weather in Paris.
    Action: Weather[Paris]
    Observation: ('city': 'Paris', 'country': 'France', 'temperature': 20, 'weather': 'sunny')
    Thought: I now know that it is 20 degrees and sunny in Paris.
    Action: RETURN[It is 20 degrees and sunny in Paris]
    Observation: It is 20 degrees and sunny in Paris.
    ```
    Note: the above is just an example. The Weather tool may not actually be available. Only use tools listed in the Tools Available section.

Extra notes:
If a math or code tool is available, do not do any math yourself. Use tools to evaluate math expressions.

Begin!

{workspace}";

/// Error raised when a template is missing a required placeholder.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("template is missing required placeholder {0}")]
    MissingPlaceholder(&'static str),
}

/// A validated prompt template.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    /// Validate and wrap a template string. Both placeholders must appear.
    pub fn new(template: impl Into<String>) -> Result<Self, TemplateError> {
        let template = template.into();
        for placeholder in [TOOLS_PLACEHOLDER, WORKSPACE_PLACEHOLDER] {
            if !template.contains(placeholder) {
                return Err(TemplateError::MissingPlaceholder(placeholder));
            }
        }
        Ok(Self { template })
    }

    /// Substitute both placeholders. Pure; no state is retained.
    pub fn render(&self, tools: &str, workspace: &str) -> String {
        self.template
            .replace(TOOLS_PLACEHOLDER, tools)
            .replace(WORKSPACE_PLACEHOLDER, workspace)
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new(REACT_TEMPLATE).expect("default template has both placeholders")
    }
}
