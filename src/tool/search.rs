//! Search tool — lets the reasoning loop query a document store.

use std::sync::Arc;

use async_trait::async_trait;

use super::{Tool, ToolError};
use crate::search::SimilaritySearch;

const DEFAULT_TOP_K: usize = 10;

/// Wraps a similarity-search store so a reasoning loop can retrieve
/// relevant documents by free-text query.
pub struct SearchTool {
    name: String,
    description: String,
    instructions: String,
    index: Arc<dyn SimilaritySearch>,
    top_k: usize,
}

impl SearchTool {
    pub fn new(index: Arc<dyn SimilaritySearch>) -> Self {
        Self {
            name: "Search".into(),
            description:
                "Search for documents based on a query. Returns a list of documents that best match the query."
                    .into(),
            instructions: "Provide query as text.".into(),
            index,
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Override how many documents a query returns at most.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }
}

#[async_trait]
impl Tool for SearchTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn instructions(&self) -> &str {
        &self.instructions
    }

    async fn invoke(&self, argument: &str) -> Result<String, ToolError> {
        let k = self.top_k.min(self.index.len());
        let results = self
            .index
            .search(argument, k)
            .await
            .map_err(|e| ToolError::Failed(e.to_string()))?;
        let rendered: Vec<String> = results.iter().map(ToString::to_string).collect();
        Ok(format!("[{}]", rendered.join(", ")))
    }
}
