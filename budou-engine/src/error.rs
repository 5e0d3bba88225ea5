//! Engine error types

use thiserror::Error;

/// Engine-level errors raised while turning text into chunks
#[derive(Error, Debug)]
pub enum EngineError {
    /// Language known, but not handled by the selected segmenter
    #[error("language '{code}' is not supported by the {segmenter} segmenter")]
    UnsupportedLanguage {
        /// The requested language code
        code: String,
        /// Name of the segmenter that rejected it
        segmenter: &'static str,
    },

    /// Language code not recognized at all
    #[error("unknown language code '{0}'")]
    UnknownLanguage(String),

    /// A token does not match the text at the position it claims
    #[error("token {token:?} does not match the source text at offset {offset}")]
    Misaligned {
        /// Character offset where the token was expected
        offset: usize,
        /// Surface text of the offending token
        token: String,
    },

    /// Tokens ended before covering the whole text
    #[error("tokens end at offset {offset} before the end of the text")]
    Uncovered {
        /// Character offset of the first uncovered character
        offset: usize,
    },

    /// The syntax service failed or returned an unusable response
    #[error("syntax service error: {0}")]
    Service(String),

    /// The morphological analyzer failed or produced malformed output
    #[error("analyzer error: {0}")]
    Analyzer(String),

    /// Embedded language tables could not be loaded
    #[error("language tables error: {0}")]
    Tables(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
