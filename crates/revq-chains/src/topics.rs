//! Topic extraction task: batch-extract themes from a sample of reviews.

use sqlx::PgPool;

use revq_llm::GeminiClient;

use crate::error::ChainError;
use crate::output::parse_topics_output;
use crate::prompt::{context_block, topics_prompt};

/// Default number of topics requested from the model.
pub const DEFAULT_TOPIC_COUNT: u32 = 5;

/// Default number of reviews sampled as context.
pub const DEFAULT_SAMPLE_SIZE: i64 = 50;

/// Extract up to `k` topics from a sample of stored reviews and persist one
/// topic row per label.
///
/// Every stored label carries the full sampled review-id set, not the
/// subset actually discussing that topic. This is a known simplification of
/// the association model and is preserved deliberately.
///
/// An empty sample is a logged no-op, not an error, and makes no LLM call.
/// Returns the number of topics stored.
///
/// # Errors
///
/// - [`ChainError::Db`] if the sample fetch or an insert fails.
/// - [`ChainError::Llm`] if the generation call fails.
/// - [`ChainError::Parse`] if the output is not a JSON list of strings;
///   nothing is written.
pub async fn extract_and_store_topics(
    llm: &GeminiClient,
    pool: &PgPool,
    k: u32,
    sample_size: i64,
) -> Result<usize, ChainError> {
    let sample = revq_db::sample_recent_reviews(pool, sample_size).await?;
    if sample.is_empty() {
        tracing::info!("no reviews found for topic extraction; skipping");
        return Ok(0);
    }

    let texts: Vec<&str> = sample.iter().map(|r| r.text.as_str()).collect();
    let review_ids: Vec<String> = sample.iter().map(|r| r.review_id.clone()).collect();

    let prompt = topics_prompt(&context_block(&texts), k);
    let raw = llm.generate(&prompt).await?;

    let labels = match parse_topics_output(&raw) {
        Ok(labels) => labels,
        Err(e) => {
            tracing::error!(raw_output = %raw, error = %e, "topics output rejected");
            return Err(e);
        }
    };

    let stored = revq_db::insert_topics(pool, &labels, &review_ids).await?;
    tracing::info!(
        topics = stored,
        sampled_reviews = review_ids.len(),
        "stored extracted topics"
    );

    Ok(stored)
}
