//! Similarity search over documents — the external collaborator behind the
//! search tool.
//!
//! A [`VectorStore`] embeds documents on ingest and answers
//! nearest-neighbor queries by cosine similarity; [`MemoryDocStore`] is the
//! plain ordered store with no search. Embedding providers are pluggable
//! behind the [`Embeddings`] trait.

pub mod document;
pub mod embedding;
pub mod store;

pub use document::Document;
pub use embedding::{cosine_similarity, Embedding, EmbeddingError, Embeddings};
pub use store::{MemoryDocStore, SimilaritySearch, StoreError, VectorStore};
