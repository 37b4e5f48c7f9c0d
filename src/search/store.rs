//! Document stores: a plain in-memory store and an embedding-backed store
//! with similarity search.
//!
//! Both assign each added document a stable identifier (explicit if
//! provided, else derived from content) and reject duplicates. Removal
//! keeps every parallel per-document structure in index correspondence.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::document::Document;
use super::embedding::{cosine_similarity, Embedding, EmbeddingError, Embeddings};

/// Errors from store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("document with id {0} already in store")]
    DuplicateId(String),

    #[error("no document with id {0}")]
    NotFound(String),

    #[error(transparent)]
    Embedding(#[from] EmbeddingError),
}

/// Narrow search contract the search tool depends on.
#[async_trait]
pub trait SimilaritySearch: Send + Sync {
    /// The `k` documents most similar to `query`, best first.
    async fn search(&self, query: &str, k: usize) -> Result<Vec<Document>, StoreError>;

    /// Number of stored documents.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Insertion-ordered in-memory document store, no search.
#[derive(Debug, Default)]
pub struct MemoryDocStore {
    documents: Vec<Document>,
    ids: Vec<String>,
}

impl MemoryDocStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one document, returning its assigned id.
    pub fn add(&mut self, document: Document) -> Result<String, StoreError> {
        let id = document.assigned_id();
        if self.ids.contains(&id) {
            return Err(StoreError::DuplicateId(id));
        }
        self.ids.push(id.clone());
        self.documents.push(document);
        Ok(id)
    }

    /// Add a batch, returning the assigned ids in input order. Fails on
    /// the first duplicate; earlier documents in the batch stay added.
    pub fn add_batch(
        &mut self,
        documents: impl IntoIterator<Item = Document>,
    ) -> Result<Vec<String>, StoreError> {
        documents.into_iter().map(|d| self.add(d)).collect()
    }

    /// Remove a document by id.
    pub fn remove(&mut self, id: &str) -> Result<(), StoreError> {
        let index = self.position(id)?;
        self.ids.remove(index);
        self.documents.remove(index);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Document> {
        self.position(id).ok().map(|i| &self.documents[i])
    }

    /// All documents in original insertion order.
    pub fn get_all(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    fn position(&self, id: &str) -> Result<usize, StoreError> {
        self.ids
            .iter()
            .position(|i| i == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}

/// Embedding-backed store with brute-force cosine search.
///
/// Documents, ids, and embeddings are parallel columns; every mutation
/// keeps them index-aligned. Removal rewrites the columns in place — an
/// O(n) operation by contract, acceptable at this store's scale.
pub struct VectorStore {
    embedder: Arc<dyn Embeddings>,
    documents: Vec<Document>,
    ids: Vec<String>,
    embeddings: Vec<Embedding>,
}

impl VectorStore {
    pub fn new(embedder: Arc<dyn Embeddings>) -> Self {
        Self {
            embedder,
            documents: Vec::new(),
            ids: Vec::new(),
            embeddings: Vec::new(),
        }
    }

    /// Embed and add one document, returning its assigned id.
    pub async fn add(&mut self, document: Document) -> Result<String, StoreError> {
        let id = document.assigned_id();
        if self.ids.contains(&id) {
            return Err(StoreError::DuplicateId(id));
        }
        let mut vectors = self.embedder.embed(&[document.text.clone()]).await?;
        let embedding = vectors.pop().ok_or_else(|| {
            StoreError::Embedding(EmbeddingError::InvalidResponse(
                "embedder returned no vector".into(),
            ))
        })?;
        self.ids.push(id.clone());
        self.documents.push(document);
        self.embeddings.push(embedding);
        Ok(id)
    }

    /// Add a batch, returning the assigned ids in input order.
    pub async fn add_batch(
        &mut self,
        documents: Vec<Document>,
    ) -> Result<Vec<String>, StoreError> {
        let mut ids = Vec::with_capacity(documents.len());
        for document in documents {
            ids.push(self.add(document).await?);
        }
        Ok(ids)
    }

    /// Remove a document by id, keeping all three columns aligned.
    pub fn remove(&mut self, id: &str) -> Result<(), StoreError> {
        let index = self
            .ids
            .iter()
            .position(|i| i == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        self.ids.remove(index);
        self.documents.remove(index);
        self.embeddings.remove(index);
        debug!(id, remaining = self.documents.len(), "removed document");
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Document> {
        self.ids
            .iter()
            .position(|i| i == id)
            .map(|index| &self.documents[index])
    }

    /// All documents in original insertion order.
    pub fn get_all(&self) -> &[Document] {
        &self.documents
    }
}

#[async_trait]
impl SimilaritySearch for VectorStore {
    async fn search(&self, query: &str, k: usize) -> Result<Vec<Document>, StoreError> {
        let mut vectors = self.embedder.embed(&[query.to_string()]).await?;
        let query_vector = vectors.pop().ok_or_else(|| {
            StoreError::Embedding(EmbeddingError::InvalidResponse(
                "embedder returned no vector".into(),
            ))
        })?;

        let mut scored: Vec<(f32, &Document)> = self
            .embeddings
            .iter()
            .zip(self.documents.iter())
            .map(|(embedding, doc)| (cosine_similarity(&query_vector, embedding), doc))
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        Ok(scored
            .into_iter()
            .take(k)
            .map(|(_, doc)| doc.clone())
            .collect())
    }

    fn len(&self) -> usize {
        self.documents.len()
    }
}
