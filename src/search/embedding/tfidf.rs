//! Corpus-fitted TF-IDF embedder.
//!
//! Local and deterministic: fit a vocabulary and IDF weights over the
//! document corpus once, then embed any text into a unit-normalized sparse
//! vector over that vocabulary. Terms outside the fitted vocabulary embed
//! to zero.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;

use super::{Embedding, EmbeddingError, Embeddings};

const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "is", "it", "in", "on", "of", "to", "and", "or", "for", "with", "this",
    "that", "be", "are", "was", "were", "as", "at", "by", "from", "not", "but", "if", "into",
    "about", "so", "its", "you", "your", "we", "our", "they", "them", "their",
];

/// TF-IDF embedder fitted over a fixed corpus.
#[derive(Debug, Clone)]
pub struct TfIdfEmbeddings {
    /// term → dimension index
    vocabulary: HashMap<String, usize>,
    /// IDF weight per dimension
    weights: Vec<f32>,
}

impl TfIdfEmbeddings {
    /// Fit vocabulary and IDF weights from a corpus.
    pub fn fit<S: AsRef<str>>(corpus: &[S]) -> Self {
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for doc in corpus {
            let unique: HashSet<String> = terms(doc.as_ref()).into_iter().collect();
            for term in unique {
                *doc_freq.entry(term.clone()).or_insert(0) += 1;
                let next = vocabulary.len();
                vocabulary.entry(term).or_insert(next);
            }
        }

        let n = corpus.len() as f32;
        let mut weights = vec![0.0f32; vocabulary.len()];
        for (term, &idx) in &vocabulary {
            let df = doc_freq.get(term).copied().unwrap_or(1) as f32;
            weights[idx] = (n / df.max(1.0)).ln() + 1.0;
        }

        Self {
            vocabulary,
            weights,
        }
    }

    /// Dimensionality of the fitted space (vocabulary size).
    pub fn dimensions(&self) -> usize {
        self.weights.len()
    }

    fn embed_one(&self, text: &str) -> Embedding {
        let mut vector = vec![0.0f32; self.weights.len()];
        if vector.is_empty() {
            return vector;
        }
        let mut counts: HashMap<String, f32> = HashMap::new();
        for term in terms(text) {
            *counts.entry(term).or_insert(0.0) += 1.0;
        }
        for (term, count) in counts {
            if let Some(&idx) = self.vocabulary.get(&term) {
                vector[idx] = count * self.weights[idx];
            }
        }
        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in vector.iter_mut() {
                *x /= norm;
            }
        }
        vector
    }
}

#[async_trait]
impl Embeddings for TfIdfEmbeddings {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Embedding>, EmbeddingError> {
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }
}

/// Lowercase, split on non-alphanumeric, drop one-letter words and stop
/// words.
fn terms(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() > 1 && !STOP_WORDS.contains(w))
        .map(str::to_string)
        .collect()
}
