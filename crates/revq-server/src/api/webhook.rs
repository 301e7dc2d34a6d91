use axum::{extract::State, Extension, Json};
use serde::Serialize;
use serde_json::Value;

use revq_chains::{ingest_review, IngestError};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

/// Acknowledgment returned once the raw review is stored and every chain
/// has been attempted. Chain failures are reported, not surfaced as errors.
#[derive(Debug, Serialize)]
pub(super) struct WebhookAck {
    pub status: &'static str,
    pub review_id: String,
    pub chains_attempted: usize,
    pub chains_failed: Vec<&'static str>,
}

pub(super) async fn receive_review(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(payload): Json<Value>,
) -> Result<Json<ApiResponse<WebhookAck>>, ApiError> {
    let report = ingest_review(
        &state.llm,
        &state.vectors,
        &state.pool,
        &state.classification_buckets,
        &payload,
    )
    .await
    .map_err(|e| match e {
        IngestError::Validation(e) => {
            tracing::warn!(error = %e, "webhook payload rejected");
            ApiError::new(req_id.0.clone(), "validation_error", e.to_string())
        }
        IngestError::Db(e) => {
            tracing::error!(error = %e, "failed to store raw review");
            ApiError::new(req_id.0.clone(), "internal_error", "failed to store review")
        }
    })?;

    if !report.chains_failed.is_empty() {
        tracing::warn!(
            review_id = %report.review_id,
            failed = ?report.chains_failed,
            "review ingested with failed chains"
        );
    }

    Ok(Json(ApiResponse {
        data: WebhookAck {
            status: "ok",
            review_id: report.review_id,
            chains_attempted: report.chains_attempted,
            chains_failed: report.chains_failed,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
