//! Embedding chain: embed a review and store the vector in both stores.

use serde_json::{Map, Value};
use sqlx::PgPool;

use revq_llm::GeminiClient;

use crate::error::ChainError;
use crate::vector_store::{PineconeClient, VECTOR_DIM};

/// Embed a review's text and persist the vector.
///
/// The vector store write happens first, then the relational copy. The two
/// writes are not transactional: the vector store is authoritative for
/// similarity search and a crash between the writes leaves only the
/// auxiliary relational row missing.
///
/// # Errors
///
/// - [`ChainError::Llm`] if the embedding call fails; nothing is written.
/// - [`ChainError::DimensionMismatch`] if the returned vector does not have
///   exactly [`VECTOR_DIM`] elements; nothing is written.
/// - [`ChainError::VectorStore`] / [`ChainError::Db`] if a write fails.
pub async fn embed_and_store(
    llm: &GeminiClient,
    vectors: &PineconeClient,
    pool: &PgPool,
    review_id: &str,
    text: &str,
    metadata: &Map<String, Value>,
) -> Result<(), ChainError> {
    let vector = llm.embed(text).await?;

    if vector.len() != VECTOR_DIM {
        return Err(ChainError::DimensionMismatch {
            expected: VECTOR_DIM,
            got: vector.len(),
        });
    }

    let metadata_value = Value::Object(metadata.clone());
    vectors.upsert(review_id, &vector, &metadata_value).await?;
    tracing::debug!(review_id, "upserted review embedding to vector store");

    revq_db::insert_embedding(
        pool,
        review_id,
        &vector,
        metadata.get("service").and_then(Value::as_str),
        metadata.get("location").and_then(Value::as_str),
        metadata.get("product").and_then(Value::as_str),
    )
    .await?;
    tracing::info!(review_id, dimension = vector.len(), "stored embedding");

    Ok(())
}
