//! Integration tests for `GeminiClient` using wiremock HTTP mocks.

use revq_llm::{GeminiClient, LlmError};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> GeminiClient {
    GeminiClient::with_base_url(
        "test-key",
        "gemini-2.0-flash",
        "text-embedding-004",
        30,
        base_url,
    )
    .expect("client construction should not fail")
}

#[tokio::test]
async fn generate_returns_candidate_text() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "candidates": [{
            "content": {
                "parts": [{ "text": "{\"score\": 4, \"summary\": \"mostly positive\"}" }],
                "role": "model"
            },
            "finishReason": "STOP"
        }]
    });

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let text = client.generate("rate this review").await.expect("generate");

    assert_eq!(text, "{\"score\": 4, \"summary\": \"mostly positive\"}");
}

#[tokio::test]
async fn generate_maps_non_2xx_to_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
        .respond_with(
            ResponseTemplate::new(429)
                .set_body_json(serde_json::json!({ "error": { "message": "quota exceeded" } })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.generate("prompt").await.unwrap_err();

    match err {
        LlmError::Api { status, message } => {
            assert_eq!(status, 429);
            assert!(message.contains("quota exceeded"), "message: {message}");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn generate_without_candidates_is_empty_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "candidates": [] })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.generate("prompt").await.unwrap_err();
    assert!(
        matches!(err, LlmError::EmptyResponse("generation")),
        "got {err:?}"
    );
}

#[tokio::test]
async fn embed_returns_vector_values() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "embedding": { "values": [0.1, -0.2, 0.3] }
    });

    Mock::given(method("POST"))
        .and(path("/v1beta/models/text-embedding-004:embedContent"))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let vector = client.embed("some review text").await.expect("embed");

    assert_eq!(vector, vec![0.1, -0.2, 0.3]);
}

#[tokio::test]
async fn embed_without_values_is_empty_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/text-embedding-004:embedContent"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "embedding": { "values": [] } })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.embed("text").await.unwrap_err();
    assert!(
        matches!(err, LlmError::EmptyResponse("embedding")),
        "got {err:?}"
    );
}
