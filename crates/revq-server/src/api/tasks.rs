use axum::{body::Bytes, extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use revq_chains::topics::{DEFAULT_SAMPLE_SIZE, DEFAULT_TOPIC_COUNT};
use revq_chains::{summary, topics};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct TaskAck {
    pub status: &'static str,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct TopicExtractionParams {
    #[serde(default = "default_k")]
    pub k: u32,
    #[serde(default = "default_sample_size")]
    pub sample_size: i64,
}

fn default_k() -> u32 {
    DEFAULT_TOPIC_COUNT
}

fn default_sample_size() -> i64 {
    DEFAULT_SAMPLE_SIZE
}

impl Default for TopicExtractionParams {
    fn default() -> Self {
        Self {
            k: DEFAULT_TOPIC_COUNT,
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }
}

/// Manual trigger for topic extraction. The JSON body is optional; absent
/// parameters fall back to the task defaults.
pub(super) async fn run_topic_extraction(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Bytes,
) -> Result<Json<ApiResponse<TaskAck>>, ApiError> {
    let params: TopicExtractionParams = if body.is_empty() {
        TopicExtractionParams::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| {
            ApiError::new(
                req_id.0.clone(),
                "bad_request",
                format!("invalid task parameters: {e}"),
            )
        })?
    };

    let stored = topics::extract_and_store_topics(
        &state.llm,
        &state.pool,
        params.k,
        params.sample_size,
    )
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "topic extraction task failed");
        ApiError::new(req_id.0.clone(), "internal_error", "topic extraction failed")
    })?;

    Ok(Json(ApiResponse {
        data: TaskAck {
            status: "ok",
            message: format!("topic extraction complete: {stored} topics stored"),
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// Manual trigger for the weekly summary.
pub(super) async fn run_weekly_summary(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<TaskAck>>, ApiError> {
    let generated = summary::generate_and_store_weekly_summary(&state.llm, &state.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "weekly summary task failed");
            ApiError::new(req_id.0.clone(), "internal_error", "weekly summary failed")
        })?;

    let message = if generated.is_some() {
        "weekly summary generated and stored".to_string()
    } else {
        "weekly summary complete (no text generated or stored)".to_string()
    };

    Ok(Json(ApiResponse {
        data: TaskAck {
            status: "ok",
            message,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
