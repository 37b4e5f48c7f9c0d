//! OpenAI-backed embedder.
//!
//! Raw HTTP client for the embeddings endpoint; requests are batched so
//! large document sets don't exceed the per-request input limit.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{Embedding, EmbeddingError, Embeddings};

/// Maximum number of texts sent per request.
const BATCH_SIZE: usize = 1000;

/// Client for the OpenAI embeddings endpoint.
#[derive(Debug)]
pub struct OpenAiEmbeddings {
    http: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiEmbeddings {
    /// Create a client with the default base URL (https://api.openai.com).
    pub fn new(api_key: String, model: &str) -> Self {
        Self::with_base_url(api_key, model, "https://api.openai.com".into())
    }

    /// Create a client reading OPENAI_API_KEY from the environment.
    pub fn from_env(model: &str) -> Result<Self, EmbeddingError> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            EmbeddingError::MissingApiKey("OPENAI_API_KEY environment variable not set".into())
        })?;
        Ok(Self::new(api_key, model))
    }

    /// Create a client with a custom base URL (for testing with mock
    /// servers).
    pub fn with_base_url(api_key: String, model: &str, base_url: String) -> Self {
        Self {
            http: Client::new(),
            api_key,
            base_url,
            model: model.to_string(),
        }
    }

    async fn embed_batch(&self, batch: &[String]) -> Result<Vec<Embedding>, EmbeddingError> {
        let url = format!("{}/v1/embeddings", self.base_url);
        let request = EmbeddingsRequest {
            model: &self.model,
            input: batch,
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status().as_u16();
        if status >= 400 {
            let body = response.text().await.unwrap_or_else(|_| "(no body)".into());
            return Err(EmbeddingError::Api {
                status,
                message: body,
            });
        }

        let parsed: EmbeddingsResponse = response.json().await.map_err(|e| {
            EmbeddingError::InvalidResponse(format!("failed to parse response: {e}"))
        })?;

        if parsed.data.len() != batch.len() {
            return Err(EmbeddingError::InvalidResponse(format!(
                "expected {} embeddings, got {}",
                batch.len(),
                parsed.data.len()
            )));
        }

        Ok(parsed.data.into_iter().map(|d| d.embedding).collect())
    }
}

#[async_trait]
impl Embeddings for OpenAiEmbeddings {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Embedding>, EmbeddingError> {
        let mut results = Vec::with_capacity(texts.len());
        for batch in texts.chunks(BATCH_SIZE) {
            results.extend(self.embed_batch(batch).await?);
        }
        Ok(results)
    }
}

#[derive(Debug, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Embedding,
}
