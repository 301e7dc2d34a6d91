//! Database operations for the `weekly_summaries` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::DbError;

/// A row from the `weekly_summaries` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WeeklySummaryRow {
    pub id: i64,
    pub summary_text: String,
    pub generated_at: DateTime<Utc>,
}

/// Insert a weekly summary and return its generated id.
///
/// `generated_at` is assigned by the database at write time.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_weekly_summary(pool: &PgPool, summary_text: &str) -> Result<i64, DbError> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO weekly_summaries (summary_text) \
         VALUES ($1) \
         RETURNING id",
    )
    .bind(summary_text)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Return the most recently generated weekly summary, or `None` if none exists.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn latest_weekly_summary(pool: &PgPool) -> Result<Option<WeeklySummaryRow>, DbError> {
    let row = sqlx::query_as::<_, WeeklySummaryRow>(
        "SELECT id, summary_text, generated_at \
         FROM weekly_summaries \
         ORDER BY generated_at DESC, id DESC \
         LIMIT 1",
    )
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
