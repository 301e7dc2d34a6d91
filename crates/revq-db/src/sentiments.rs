//! Database operations for the `sentiments` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::DbError;

/// A row from the `sentiments` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SentimentRow {
    pub id: i64,
    pub review_id: String,
    pub score: i32,
    pub summary: String,
    pub created_at: DateTime<Utc>,
}

/// Insert a sentiment record and return its generated id.
///
/// `score` is nominally in 1–5 but the range is prompt-enforced only; any
/// integer the model returned is stored.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_sentiment(
    pool: &PgPool,
    review_id: &str,
    score: i32,
    summary: &str,
) -> Result<i64, DbError> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO sentiments (review_id, score, summary) \
         VALUES ($1, $2, $3) \
         RETURNING id",
    )
    .bind(review_id)
    .bind(score)
    .bind(summary)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// List sentiment records for one review, oldest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_sentiments_for_review(
    pool: &PgPool,
    review_id: &str,
) -> Result<Vec<SentimentRow>, DbError> {
    let rows = sqlx::query_as::<_, SentimentRow>(
        "SELECT id, review_id, score, summary, created_at \
         FROM sentiments \
         WHERE review_id = $1 \
         ORDER BY id ASC",
    )
    .bind(review_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
