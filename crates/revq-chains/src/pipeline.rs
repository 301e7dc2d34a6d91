//! Ingestion pipeline: validate, persist the raw review, fan out to the
//! enrichment chains.

use serde_json::Value;
use sqlx::PgPool;
use thiserror::Error;

use revq_core::review::{NewReview, PayloadError};
use revq_db::DbError;
use revq_llm::GeminiClient;

use crate::vector_store::PineconeClient;
use crate::{classification, embedding, sentiment};

/// What happened to one ingestion attempt after the raw review was stored.
///
/// The caller acknowledges success based on `chains_attempted`, never on
/// how many chains succeeded.
#[derive(Debug, Clone)]
pub struct IngestReport {
    pub review_id: String,
    pub chains_attempted: usize,
    pub chains_failed: Vec<&'static str>,
}

/// Errors that fail the whole ingestion request.
///
/// Only payload validation and the raw-review insert may fail the request;
/// enrichment chain errors are captured per chain and never surface here.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error(transparent)]
    Validation(#[from] PayloadError),

    #[error("failed to store review: {0}")]
    Db(#[from] DbError),
}

/// Ingest one webhook payload.
///
/// Validates the payload, persists the raw review, then runs the embedding,
/// sentiment, and classification chains in that fixed order. Each chain is
/// independent: a failure is logged with the review id and recorded in the
/// report, and the remaining chains still run. Re-ingesting the same review
/// id appends duplicate rows — the pipeline assumes at most one attempt per
/// id and performs no deduplication.
///
/// # Errors
///
/// - [`IngestError::Validation`] if the payload is malformed or incomplete;
///   nothing is persisted.
/// - [`IngestError::Db`] if the raw review insert fails.
pub async fn ingest_review(
    llm: &GeminiClient,
    vectors: &PineconeClient,
    pool: &PgPool,
    buckets: &str,
    payload: &Value,
) -> Result<IngestReport, IngestError> {
    let review = NewReview::from_payload(payload)?;
    let review_id = review.review_id.clone();

    revq_db::insert_review(pool, &review).await?;
    tracing::info!(review_id = %review_id, "stored raw review");

    let mut chains_failed = Vec::new();

    if let Err(e) =
        embedding::embed_and_store(llm, vectors, pool, &review_id, &review.text, &review.metadata)
            .await
    {
        tracing::error!(review_id = %review_id, error = %e, "embedding chain failed");
        chains_failed.push("embedding");
    }

    if let Err(e) = sentiment::analyze_sentiment(llm, pool, &review_id, &review.text).await {
        tracing::error!(review_id = %review_id, error = %e, "sentiment chain failed");
        chains_failed.push("sentiment");
    }

    if let Err(e) =
        classification::classify_review(llm, pool, &review_id, &review.text, buckets).await
    {
        tracing::error!(review_id = %review_id, error = %e, "classification chain failed");
        chains_failed.push("classification");
    }

    Ok(IngestReport {
        review_id,
        chains_attempted: 3,
        chains_failed,
    })
}
