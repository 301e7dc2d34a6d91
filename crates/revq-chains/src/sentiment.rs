//! Sentiment chain: score a review 1–5 with a one-sentence summary.

use sqlx::PgPool;

use revq_llm::GeminiClient;

use crate::error::ChainError;
use crate::output::parse_sentiment_output;
use crate::prompt::sentiment_prompt;

/// Run the sentiment chain for one review and store the result.
///
/// # Errors
///
/// - [`ChainError::Llm`] if the generation call fails.
/// - [`ChainError::Parse`] if the output is not the expected JSON object;
///   the offending raw output is logged and nothing is written.
/// - [`ChainError::Db`] if the insert fails.
pub async fn analyze_sentiment(
    llm: &GeminiClient,
    pool: &PgPool,
    review_id: &str,
    text: &str,
) -> Result<(), ChainError> {
    let prompt = sentiment_prompt(text);
    let raw = llm.generate(&prompt).await?;

    let parsed = match parse_sentiment_output(&raw) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::error!(review_id, raw_output = %raw, error = %e, "sentiment output rejected");
            return Err(e);
        }
    };

    revq_db::insert_sentiment(pool, review_id, parsed.score, &parsed.summary).await?;
    tracing::info!(review_id, score = parsed.score, "stored sentiment");

    Ok(())
}
