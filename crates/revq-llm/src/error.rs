use thiserror::Error;

/// Errors returned by the Gemini API client.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-2xx status with an error body.
    #[error("Gemini API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The API answered 2xx but carried no usable content.
    #[error("Gemini returned an empty {0} response")]
    EmptyResponse(&'static str),
}
