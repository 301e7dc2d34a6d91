//! Webhook payload validation for incoming reviews.
//!
//! Pure parsing from a `serde_json::Value` so the webhook contract can be
//! unit tested without an HTTP server or a database.

use chrono::NaiveDate;
use serde_json::{Map, Value};
use thiserror::Error;

/// Fields every webhook payload must carry.
const REQUIRED_FIELDS: [&str; 3] = ["id", "text", "review_date"];

/// A validated review ready for ingestion.
#[derive(Debug, Clone)]
pub struct NewReview {
    /// Externally supplied review identifier. Assumed unique upstream;
    /// uniqueness is not enforced anywhere in this system.
    pub review_id: String,
    pub text: String,
    pub review_date: NaiveDate,
    /// Free-form metadata object. Defaults to empty when absent.
    pub metadata: Map<String, Value>,
}

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("payload must be a JSON object")]
    NotAnObject,

    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("invalid field {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

impl NewReview {
    /// Validate a raw webhook payload into a `NewReview`.
    ///
    /// The payload must be a JSON object containing at least `id`, `text`,
    /// and `review_date` (`YYYY-MM-DD`). `metadata` is optional and defaults
    /// to an empty object.
    ///
    /// # Errors
    ///
    /// - [`PayloadError::NotAnObject`] if the payload is not a JSON object.
    /// - [`PayloadError::MissingFields`] listing every absent required key.
    /// - [`PayloadError::InvalidField`] if a present field has the wrong type
    ///   or `review_date` cannot be parsed as a date.
    pub fn from_payload(payload: &Value) -> Result<Self, PayloadError> {
        let obj = payload.as_object().ok_or(PayloadError::NotAnObject)?;

        let missing: Vec<String> = REQUIRED_FIELDS
            .iter()
            .filter(|field| !obj.contains_key(**field))
            .map(|field| (*field).to_string())
            .collect();
        if !missing.is_empty() {
            return Err(PayloadError::MissingFields(missing));
        }

        let review_id = require_str(obj, "id")?.to_string();
        let text = require_str(obj, "text")?.to_string();

        let raw_date = require_str(obj, "review_date")?;
        let review_date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d").map_err(|e| {
            PayloadError::InvalidField {
                field: "review_date",
                reason: format!("expected YYYY-MM-DD date, got {raw_date:?}: {e}"),
            }
        })?;

        let metadata = match obj.get("metadata") {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(map)) => map.clone(),
            Some(other) => {
                return Err(PayloadError::InvalidField {
                    field: "metadata",
                    reason: format!("expected a JSON object, got {other}"),
                })
            }
        };

        Ok(Self {
            review_id,
            text,
            review_date,
            metadata,
        })
    }
}

fn require_str<'a>(
    obj: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, PayloadError> {
    obj.get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| PayloadError::InvalidField {
            field,
            reason: "expected a string".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn valid_payload_parses() {
        let payload = json!({
            "id": "rev-1",
            "text": "Great service, slow checkout.",
            "review_date": "2025-05-20",
            "metadata": { "service": "checkout", "location": "Austin" }
        });
        let review = NewReview::from_payload(&payload).expect("valid payload");
        assert_eq!(review.review_id, "rev-1");
        assert_eq!(review.text, "Great service, slow checkout.");
        assert_eq!(review.review_date.to_string(), "2025-05-20");
        assert_eq!(
            review.metadata.get("location").and_then(Value::as_str),
            Some("Austin")
        );
    }

    #[test]
    fn metadata_defaults_to_empty_object() {
        let payload = json!({
            "id": "rev-2",
            "text": "ok",
            "review_date": "2025-05-20"
        });
        let review = NewReview::from_payload(&payload).expect("valid payload");
        assert!(review.metadata.is_empty());
    }

    #[test]
    fn missing_fields_are_all_listed() {
        let payload = json!({ "id": "rev-3" });
        let err = NewReview::from_payload(&payload).unwrap_err();
        match err {
            PayloadError::MissingFields(fields) => {
                assert_eq!(fields, vec!["text", "review_date"]);
            }
            other => panic!("expected MissingFields, got {other:?}"),
        }
    }

    #[test]
    fn missing_field_error_names_fields_in_message() {
        let payload = json!({ "text": "hello" });
        let err = NewReview::from_payload(&payload).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("id"), "message should name id: {msg}");
        assert!(
            msg.contains("review_date"),
            "message should name review_date: {msg}"
        );
    }

    #[test]
    fn non_object_payload_is_rejected() {
        let err = NewReview::from_payload(&json!(["not", "an", "object"])).unwrap_err();
        assert!(matches!(err, PayloadError::NotAnObject));
    }

    #[test]
    fn unparseable_review_date_is_rejected() {
        let payload = json!({
            "id": "rev-4",
            "text": "ok",
            "review_date": "May 20th 2025"
        });
        let err = NewReview::from_payload(&payload).unwrap_err();
        assert!(
            matches!(err, PayloadError::InvalidField { field: "review_date", .. }),
            "got {err:?}"
        );
    }

    #[test]
    fn non_object_metadata_is_rejected() {
        let payload = json!({
            "id": "rev-5",
            "text": "ok",
            "review_date": "2025-05-20",
            "metadata": "not-an-object"
        });
        let err = NewReview::from_payload(&payload).unwrap_err();
        assert!(
            matches!(err, PayloadError::InvalidField { field: "metadata", .. }),
            "got {err:?}"
        );
    }
}
