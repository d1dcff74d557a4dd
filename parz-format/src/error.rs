//! Error types for parz stream operations

use thiserror::Error;

/// Parz error types, in propagation precedence order.
#[derive(Debug, Error)]
pub enum ParzError {
    #[error("source I/O error: {0}")]
    SourceIo(#[source] std::io::Error),
    #[error("sink I/O error: {0}")]
    SinkIo(#[source] std::io::Error),
    #[error("truncated frame")]
    TruncatedFrame,
    #[error("codec context allocation failed: {0}")]
    CodecInitFailed(String),
    #[error("compression failed: {0}")]
    CompressFailed(String),
    #[error("corrupt payload: {0}")]
    BadData(String),
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ParzError>;
