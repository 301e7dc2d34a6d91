//! Classification chain: sort a review into one of the configured buckets.

use sqlx::PgPool;

use revq_llm::GeminiClient;

use crate::error::ChainError;
use crate::output::parse_classification_output;
use crate::prompt::classification_prompt;

/// Run the classification chain for one review and store the label.
///
/// The model is asked to answer with a bare bucket name; the trimmed output
/// is stored verbatim, and membership of the bucket set is not enforced.
///
/// # Errors
///
/// - [`ChainError::Llm`] if the generation call fails.
/// - [`ChainError::Parse`] if the output is empty.
/// - [`ChainError::Db`] if the insert fails.
pub async fn classify_review(
    llm: &GeminiClient,
    pool: &PgPool,
    review_id: &str,
    text: &str,
    buckets: &str,
) -> Result<(), ChainError> {
    let prompt = classification_prompt(text, buckets);
    let raw = llm.generate(&prompt).await?;

    let label = match parse_classification_output(&raw) {
        Ok(label) => label,
        Err(e) => {
            tracing::error!(review_id, raw_output = %raw, error = %e, "classification output rejected");
            return Err(e);
        }
    };

    revq_db::insert_classification(pool, review_id, &label).await?;
    tracing::info!(review_id, label = %label, "stored classification");

    Ok(())
}
