//! Weekly summary task: one Markdown report over the trailing 7-day window.

use chrono::{Duration, Utc};
use sqlx::PgPool;

use revq_llm::GeminiClient;

use crate::error::ChainError;
use crate::output::parse_summary_output;
use crate::prompt::{context_block, summary_prompt};

/// Generate a weekly summary over reviews ingested in the last 7 days,
/// store it, and return the text.
///
/// Returns `Ok(None)` without calling the LLM or writing anything when the
/// window is empty, and `Ok(None)` without writing when the model produced
/// no text — neither case is an error.
///
/// # Errors
///
/// - [`ChainError::Db`] if the window fetch or the insert fails.
/// - [`ChainError::Llm`] if the generation call fails.
pub async fn generate_and_store_weekly_summary(
    llm: &GeminiClient,
    pool: &PgPool,
) -> Result<Option<String>, ChainError> {
    let cutoff = Utc::now() - Duration::days(7);
    let texts = revq_db::list_review_texts_since(pool, cutoff).await?;

    if texts.is_empty() {
        tracing::info!("no reviews in the last 7 days; skipping weekly summary");
        return Ok(None);
    }

    let prompt = summary_prompt(&context_block(&texts));
    let raw = llm.generate(&prompt).await?;

    let Some(summary_text) = parse_summary_output(&raw) else {
        tracing::warn!("model produced no summary text; nothing stored");
        return Ok(None);
    };

    revq_db::insert_weekly_summary(pool, &summary_text).await?;
    tracing::info!(
        reviews = texts.len(),
        chars = summary_text.len(),
        "stored weekly summary"
    );

    Ok(Some(summary_text))
}
