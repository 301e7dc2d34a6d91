//! Database operations for the `topics` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::DbError;

/// A row from the `topics` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TopicRow {
    pub id: i64,
    pub label: String,
    pub review_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert one topic row per label, each carrying the same sampled id set.
///
/// Returns the number of rows inserted. Labels are not deduplicated against
/// previous batch runs.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any insert fails; earlier inserts from the
/// same call are not rolled back.
pub async fn insert_topics(
    pool: &PgPool,
    labels: &[String],
    review_ids: &[String],
) -> Result<usize, DbError> {
    for label in labels {
        sqlx::query(
            "INSERT INTO topics (label, review_ids) \
             VALUES ($1, $2)",
        )
        .bind(label)
        .bind(review_ids)
        .execute(pool)
        .await?;
    }

    Ok(labels.len())
}

/// List the most recently stored topics.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_recent_topics(pool: &PgPool, limit: i64) -> Result<Vec<TopicRow>, DbError> {
    let rows = sqlx::query_as::<_, TopicRow>(
        "SELECT id, label, review_ids, created_at \
         FROM topics \
         ORDER BY created_at DESC, id DESC \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
