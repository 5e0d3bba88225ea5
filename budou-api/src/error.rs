//! API error types

use budou_core::CoreError;
use budou_engine::EngineError;
use thiserror::Error;

/// API-level errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// Segmentation failed
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    /// Segmenter output does not reproduce the source text
    #[error("chunk error: {0}")]
    Core(#[from] CoreError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Segmenter name not recognized
    #[error("unknown segmenter '{0}' (expected syntax, mecab or dictionary)")]
    UnknownSegmenter(String),

    /// Cache storage error
    #[error("cache error: {0}")]
    Cache(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Result type for API operations
pub type Result<T> = std::result::Result<T, ApiError>;
