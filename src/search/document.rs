//! Documents held by the stores.

use std::fmt;

/// A document: text plus an optional caller-supplied identifier. Stores
/// derive an identifier from the content when none is given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: Option<String>,
    pub text: String,
}

impl Document {
    /// A document with a store-derived identifier.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: None,
            text: text.into(),
        }
    }

    /// A document with an explicit identifier.
    pub fn with_id(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            text: text.into(),
        }
    }

    /// The identifier a store will assign: the explicit one if present,
    /// otherwise derived deterministically from the content.
    pub fn assigned_id(&self) -> String {
        match &self.id {
            Some(id) => id.clone(),
            None => derive_id(&self.text),
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Document({})", self.text)
    }
}

/// Stable content-derived identifier (crc32 of the text, hex-rendered).
fn derive_id(text: &str) -> String {
    format!("{:08x}", crc32fast::hash(text.as_bytes()))
}
