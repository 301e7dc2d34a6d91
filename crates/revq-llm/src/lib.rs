//! Gemini REST client for revq.
//!
//! Exposes the two capabilities the enrichment chains need: text generation
//! from a fully rendered prompt, and embedding of raw text into a
//! fixed-dimension vector. The model is treated as an opaque oracle — no
//! retries, no streaming.

mod client;
mod error;

pub use client::GeminiClient;
pub use error::LlmError;
