use thiserror::Error;

use revq_db::DbError;
use revq_llm::LlmError;

/// Errors produced by a single enrichment chain.
///
/// A chain error never propagates to sibling chains: the ingestion pipeline
/// catches and logs it, and batch-task callers surface it as a failed run.
#[derive(Debug, Error)]
pub enum ChainError {
    /// The LLM call failed (network, timeout, or remote error).
    #[error("LLM call failed: {0}")]
    Llm(#[from] LlmError),

    /// A vector-store call failed.
    #[error("vector store error: {0}")]
    VectorStore(String),

    /// A relational-store call failed.
    #[error("database error: {0}")]
    Db(#[from] DbError),

    /// The LLM output did not match the chain's expected shape. No record
    /// is written when parsing fails.
    #[error("failed to parse {context} output: {message}")]
    Parse {
        context: &'static str,
        message: String,
    },

    /// The embedding vector had the wrong dimension for the configured
    /// index. The write is refused rather than corrupting the index.
    #[error("embedding dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}
