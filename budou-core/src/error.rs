//! Core error types (deterministic only)

use thiserror::Error;

/// Integrity errors raised when a chunk sequence no longer reproduces its
/// source text. These indicate a broken segmenter, not bad user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Joined chunk text diverges from the source at a character offset
    #[error("chunk text diverges from source at offset {offset}: expected {expected:?}, found {found:?}")]
    Misaligned {
        /// Character offset of the first differing character
        offset: usize,
        /// Character expected from the source (None past its end)
        expected: Option<char>,
        /// Character found in the joined chunks (None past their end)
        found: Option<char>,
    },

    /// Joined chunk text has a different length than the source
    #[error("chunk text length {actual} does not match source length {expected}")]
    LengthMismatch {
        /// Source length in characters
        expected: usize,
        /// Joined chunk length in characters
        actual: usize,
    },
}

/// Result type for core operations
pub type Result<T> = core::result::Result<T, CoreError>;
