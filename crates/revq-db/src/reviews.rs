//! Database operations for the `reviews` table.

use revq_core::review::NewReview;
use serde_json::Value;
use sqlx::PgPool;

use crate::DbError;

/// Projection of a review used as batch-task context: the external id and text.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReviewSample {
    pub review_id: String,
    pub text: String,
}

/// Insert a raw review and return its generated surrogate id.
///
/// `review_id` is the externally supplied identifier; it is stored as-is and
/// not checked for uniqueness — re-ingesting the same id appends a new row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_review(pool: &PgPool, review: &NewReview) -> Result<i64, DbError> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO reviews (review_id, text, review_date, metadata) \
         VALUES ($1, $2, $3, $4) \
         RETURNING id",
    )
    .bind(&review.review_id)
    .bind(&review.text)
    .bind(review.review_date)
    .bind(Value::Object(review.metadata.clone()))
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Return up to `limit` of the most recently ingested reviews.
///
/// Ordered by `created_at DESC` then `id DESC` so a fresh sample is preferred,
/// though callers must not rely on the ordering contractually.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn sample_recent_reviews(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<ReviewSample>, DbError> {
    let rows = sqlx::query_as::<_, ReviewSample>(
        "SELECT review_id, text \
         FROM reviews \
         ORDER BY created_at DESC, id DESC \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Return the text of every review ingested at or after `cutoff`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_review_texts_since(
    pool: &PgPool,
    cutoff: chrono::DateTime<chrono::Utc>,
) -> Result<Vec<String>, DbError> {
    let texts: Vec<String> = sqlx::query_scalar(
        "SELECT text \
         FROM reviews \
         WHERE created_at >= $1 \
         ORDER BY created_at ASC, id ASC",
    )
    .bind(cutoff)
    .fetch_all(pool)
    .await?;

    Ok(texts)
}
