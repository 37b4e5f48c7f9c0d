//! Chain state — the record threaded from link to link.
//!
//! The two reserved keys (`input`, `output`) are struct fields so their
//! invariants hold by construction; everything a link wants to stash for a
//! later link goes into `extras`.

use std::collections::BTreeMap;

use serde_json::Value;

/// State passed through a chain. Owned by the chain for the duration of one
/// `run` call; links receive it by value and return the updated record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChainState {
    input: String,
    output: Option<String>,
    extras: BTreeMap<String, Value>,
}

impl ChainState {
    /// Create a state seeded with the caller's input.
    pub fn seeded(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: None,
            extras: BTreeMap::new(),
        }
    }

    /// The user input this chain run was seeded with.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The final answer, if a link has produced one.
    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    /// Set the final answer. The terminating link calls this.
    pub fn set_output(&mut self, output: impl Into<String>) {
        self.output = Some(output.into());
    }

    /// Take the final answer out of the state, leaving `None` behind.
    pub fn take_output(&mut self) -> Option<String> {
        self.output.take()
    }

    /// Store a link-specific value under `key`. Links should only write
    /// keys they are responsible for.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.extras.insert(key.into(), value);
    }

    /// Read a link-specific value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extras.get(key)
    }

    /// Read a link-specific value as a string slice, if it is one.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.extras.get(key).and_then(Value::as_str)
    }
}
