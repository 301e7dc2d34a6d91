//! Database operations for the `embeddings` table.
//!
//! This is the relational copy of each embedding; the vector store remains
//! authoritative for similarity search.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::DbError;

/// A row from the `embeddings` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EmbeddingRow {
    pub id: i64,
    pub review_id: String,
    pub vector: Vec<f32>,
    pub service: Option<String>,
    pub location: Option<String>,
    pub product: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert an embedding record and return its generated id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_embedding(
    pool: &PgPool,
    review_id: &str,
    vector: &[f32],
    service: Option<&str>,
    location: Option<&str>,
    product: Option<&str>,
) -> Result<i64, DbError> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO embeddings (review_id, vector, service, location, product) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING id",
    )
    .bind(review_id)
    .bind(vector)
    .bind(service)
    .bind(location)
    .bind(product)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// List embedding records for one review, oldest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_embeddings_for_review(
    pool: &PgPool,
    review_id: &str,
) -> Result<Vec<EmbeddingRow>, DbError> {
    let rows = sqlx::query_as::<_, EmbeddingRow>(
        "SELECT id, review_id, vector, service, location, product, created_at \
         FROM embeddings \
         WHERE review_id = $1 \
         ORDER BY id ASC",
    )
    .bind(review_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
