//! Normalization and strict parsing of raw LLM output.
//!
//! Models frequently wrap structured answers in Markdown code fences; the
//! cleaning step strips one surrounding fence before the strict parse. Kept
//! separate from the network code so every edge case is testable without a
//! remote call.

use serde_json::Value;

use crate::error::ChainError;

/// Parsed sentiment chain output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentimentOutput {
    pub score: i32,
    pub summary: String,
}

/// Strip one surrounding Markdown code fence, if present.
///
/// Handles both bare ``` fences and ```json-tagged fences. Inner content is
/// trimmed. Text without a leading fence is returned trimmed and otherwise
/// untouched.
#[must_use]
pub fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

/// Parse sentiment output: a JSON object with integer `score` and string
/// `summary`.
///
/// A float `score` is truncated to an integer (the range 1–5 is enforced by
/// the prompt, not here).
///
/// # Errors
///
/// Returns [`ChainError::Parse`] on malformed JSON, a non-object value, or
/// missing/mistyped keys.
pub fn parse_sentiment_output(raw: &str) -> Result<SentimentOutput, ChainError> {
    let cleaned = strip_code_fences(raw);
    let value: Value = serde_json::from_str(cleaned).map_err(|e| ChainError::Parse {
        context: "sentiment",
        message: format!("invalid JSON: {e}"),
    })?;

    let obj = value.as_object().ok_or(ChainError::Parse {
        context: "sentiment",
        message: "expected a JSON object".to_string(),
    })?;

    #[allow(clippy::cast_possible_truncation)]
    let score = match obj.get("score") {
        Some(v) if v.is_i64() => v.as_i64().map(|n| n as i32),
        Some(v) if v.is_f64() => v.as_f64().map(|n| n as i32),
        _ => None,
    }
    .ok_or(ChainError::Parse {
        context: "sentiment",
        message: "missing or non-numeric `score`".to_string(),
    })?;

    let summary = obj
        .get("summary")
        .and_then(Value::as_str)
        .ok_or(ChainError::Parse {
            context: "sentiment",
            message: "missing or non-string `summary`".to_string(),
        })?
        .to_string();

    Ok(SentimentOutput { score, summary })
}

/// Parse classification output: the trimmed raw text is the label.
///
/// # Errors
///
/// Returns [`ChainError::Parse`] if the output is empty.
pub fn parse_classification_output(raw: &str) -> Result<String, ChainError> {
    let label = raw.trim();
    if label.is_empty() {
        return Err(ChainError::Parse {
            context: "classification",
            message: "empty label".to_string(),
        });
    }
    Ok(label.to_string())
}

/// Parse topic extraction output: a JSON array of strings.
///
/// Empty (or whitespace-only) labels are filtered out after the parse; a
/// non-array value or a non-string element fails the whole batch.
///
/// # Errors
///
/// Returns [`ChainError::Parse`] on malformed JSON or an unexpected shape.
pub fn parse_topics_output(raw: &str) -> Result<Vec<String>, ChainError> {
    let cleaned = strip_code_fences(raw);
    let value: Value = serde_json::from_str(cleaned).map_err(|e| ChainError::Parse {
        context: "topics",
        message: format!("invalid JSON: {e}"),
    })?;

    let items = value.as_array().ok_or(ChainError::Parse {
        context: "topics",
        message: "expected a JSON list".to_string(),
    })?;

    let mut labels = Vec::with_capacity(items.len());
    for item in items {
        let label = item.as_str().ok_or(ChainError::Parse {
            context: "topics",
            message: format!("expected a list of strings, found {item}"),
        })?;
        if !label.trim().is_empty() {
            labels.push(label.to_string());
        }
    }

    Ok(labels)
}

/// Normalize weekly-summary output: free-form Markdown, no structured parse.
///
/// Empty or whitespace-only text means "nothing to store" and is not an
/// error.
#[must_use]
pub fn parse_summary_output(raw: &str) -> Option<String> {
    let text = raw.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
