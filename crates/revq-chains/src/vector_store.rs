//! Pinecone data-plane client for review embeddings.
//!
//! Vectors are keyed by the external review id. The vector store is the
//! source of truth for similarity search; the relational `embeddings` table
//! is an auxiliary copy.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ChainError;

/// Vector dimension for text-embedding-004. Must match the index
/// configuration; mismatched vectors are rejected before any write.
pub const VECTOR_DIM: usize = 768;

/// Pinecone HTTP client bound to one index host.
#[derive(Clone)]
pub struct PineconeClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Serialize)]
struct UpsertRequest<'a> {
    vectors: Vec<VectorRecord<'a>>,
}

#[derive(Serialize)]
struct VectorRecord<'a> {
    id: &'a str,
    values: &'a [f32],
    metadata: &'a Value,
}

#[derive(Serialize)]
struct QueryRequest<'a> {
    vector: &'a [f32],
    #[serde(rename = "topK")]
    top_k: usize,
    #[serde(rename = "includeMetadata")]
    include_metadata: bool,
}

/// One nearest-neighbor match returned by [`PineconeClient::query`].
#[derive(Debug, Clone, Deserialize)]
pub struct QueryMatch {
    pub id: String,
    #[serde(default)]
    pub score: f32,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<QueryMatch>,
}

impl PineconeClient {
    /// Create a new client for the given index host.
    ///
    /// The host may be given with or without a scheme (Pinecone consoles
    /// report bare hosts); `https://` is assumed when absent.
    #[must_use]
    pub fn new(index_host: &str, api_key: &str) -> Self {
        let trimmed = index_host.trim_end_matches('/');
        let base_url = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed.to_string()
        } else {
            format!("https://{trimmed}")
        };

        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key: api_key.to_string(),
        }
    }

    /// Upsert one vector keyed by review id, with attached metadata.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::VectorStore`] on network failure or a non-2xx
    /// API response.
    pub async fn upsert(
        &self,
        review_id: &str,
        values: &[f32],
        metadata: &Value,
    ) -> Result<(), ChainError> {
        let body = UpsertRequest {
            vectors: vec![VectorRecord {
                id: review_id,
                values,
                metadata,
            }],
        };

        let url = format!("{}/vectors/upsert", self.base_url);
        let resp = self
            .client
            .post(&url)
            .header("Api-Key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ChainError::VectorStore(format!("upsert request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(ChainError::VectorStore(format!(
                "upsert returned status {}",
                resp.status()
            )));
        }

        Ok(())
    }

    /// Query the `top_k` nearest neighbors of a vector.
    ///
    /// Not called by the ingestion path; exposed for retrieval consumers.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::VectorStore`] on network failure, a non-2xx
    /// API response, or an unparseable body.
    pub async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<QueryMatch>, ChainError> {
        let body = QueryRequest {
            vector,
            top_k,
            include_metadata: false,
        };

        let url = format!("{}/query", self.base_url);
        let resp = self
            .client
            .post(&url)
            .header("Api-Key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ChainError::VectorStore(format!("query request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(ChainError::VectorStore(format!(
                "query returned status {}",
                resp.status()
            )));
        }

        let parsed: QueryResponse = resp
            .json()
            .await
            .map_err(|e| ChainError::VectorStore(format!("query response parse error: {e}")))?;

        Ok(parsed.matches)
    }
}
