//! HTTP client for the Gemini `v1beta` REST API.
//!
//! Wraps `reqwest` with typed request/response envelopes for the two
//! endpoints the pipeline uses, `generateContent` and `embedContent`. The
//! API key travels in the `x-goog-api-key` header rather than the query
//! string so it never appears in logged URLs.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::LlmError;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Client for Gemini text generation and embeddings.
///
/// Use [`GeminiClient::new`] for production or [`GeminiClient::with_base_url`]
/// to point at a mock server in tests.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    generation_model: String,
    embedding_model: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<TextPart>,
}

#[derive(Debug, Deserialize)]
struct TextPart {
    #[serde(default)]
    text: String,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: String,
    content: Content<'a>,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embedding: Option<EmbeddingValues>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingValues {
    #[serde(default)]
    values: Vec<f32>,
}

impl GeminiClient {
    /// Creates a new client pointed at the production Gemini API.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        generation_model: &str,
        embedding_model: &str,
        timeout_secs: u64,
    ) -> Result<Self, LlmError> {
        Self::with_base_url(
            api_key,
            generation_model,
            embedding_model,
            timeout_secs,
            DEFAULT_BASE_URL,
        )
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(
        api_key: &str,
        generation_model: &str,
        embedding_model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("revq/0.1 (review-enrichment)")
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            generation_model: generation_model.to_owned(),
            embedding_model: embedding_model.to_owned(),
        })
    }

    /// The model used for text generation.
    #[must_use]
    pub fn generation_model(&self) -> &str {
        &self.generation_model
    }

    /// Generates text from a fully rendered prompt.
    ///
    /// Returns the concatenated text parts of the first candidate.
    ///
    /// # Errors
    ///
    /// - [`LlmError::Api`] if the API returns a non-2xx status.
    /// - [`LlmError::Http`] on network failure.
    /// - [`LlmError::Deserialize`] if the response does not match the
    ///   expected shape.
    /// - [`LlmError::EmptyResponse`] if the response carries no candidate
    ///   text.
    pub async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let url = self.endpoint(&self.generation_model, "generateContent");
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let body = self.post_json(&url, &request).await?;
        let response: GenerateResponse =
            serde_json::from_str(&body).map_err(|e| LlmError::Deserialize {
                context: format!("generateContent({})", self.generation_model),
                source: e,
            })?;

        generation_text(&response).ok_or(LlmError::EmptyResponse("generation"))
    }

    /// Embeds raw text into a float vector.
    ///
    /// The caller is responsible for checking the vector dimension against
    /// the index configuration.
    ///
    /// # Errors
    ///
    /// - [`LlmError::Api`] if the API returns a non-2xx status.
    /// - [`LlmError::Http`] on network failure.
    /// - [`LlmError::Deserialize`] if the response does not match the
    ///   expected shape.
    /// - [`LlmError::EmptyResponse`] if the response carries no embedding
    ///   values.
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError> {
        let url = self.endpoint(&self.embedding_model, "embedContent");
        let request = EmbedRequest {
            model: format!("models/{}", self.embedding_model),
            content: Content {
                parts: vec![Part { text }],
            },
        };

        let body = self.post_json(&url, &request).await?;
        let response: EmbedResponse =
            serde_json::from_str(&body).map_err(|e| LlmError::Deserialize {
                context: format!("embedContent({})", self.embedding_model),
                source: e,
            })?;

        let values = response
            .embedding
            .map(|e| e.values)
            .filter(|v| !v.is_empty());
        values.ok_or(LlmError::EmptyResponse("embedding"))
    }

    /// Builds the endpoint URL for a model operation.
    fn endpoint(&self, model: &str, op: &str) -> String {
        format!("{}/v1beta/models/{model}:{op}", self.base_url)
    }

    /// Sends a POST with a JSON body, asserts a 2xx status, and returns the
    /// raw response body.
    async fn post_json<T: Serialize>(&self, url: &str, request: &T) -> Result<String, LlmError> {
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: truncate(&body, 512),
            });
        }

        Ok(body)
    }
}

/// Concatenate the text parts of the first candidate, or `None` if the
/// response carries no non-empty text.
fn generation_text(response: &GenerateResponse) -> Option<String> {
    let content = response.candidates.first()?.content.as_ref()?;
    let text: String = content
        .parts
        .iter()
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join("");
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let mut end = max;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}…", &s[..end])
    }
}
