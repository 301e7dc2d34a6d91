//! Database operations for the `classifications` table.

use sqlx::PgPool;

use crate::DbError;

/// Insert a classification record and return its generated id.
///
/// `label` is stored verbatim; bucket membership is not enforced.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_classification(
    pool: &PgPool,
    review_id: &str,
    label: &str,
) -> Result<i64, DbError> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO classifications (review_id, label) \
         VALUES ($1, $2) \
         RETURNING id",
    )
    .bind(review_id)
    .bind(label)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// List classification labels for one review, oldest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_classifications_for_review(
    pool: &PgPool,
    review_id: &str,
) -> Result<Vec<String>, DbError> {
    let labels: Vec<String> = sqlx::query_scalar(
        "SELECT label \
         FROM classifications \
         WHERE review_id = $1 \
         ORDER BY id ASC",
    )
    .bind(review_id)
    .fetch_all(pool)
    .await?;

    Ok(labels)
}
