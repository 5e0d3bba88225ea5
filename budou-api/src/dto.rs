//! Data Transfer Objects for API

use budou_core::{ChunkSequence, ChunkSummary};
use serde::{Deserialize, Serialize};

/// Result of parsing one source text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseOutput {
    /// Resolved chunks, including break chunks
    pub chunks: ChunkSequence,
    /// Rendered markup
    pub html_code: String,
}

impl ParseOutput {
    /// Words of the resolved chunks
    pub fn words(&self) -> Vec<&str> {
        self.chunks.words()
    }

    /// Flat per-chunk view for reporting
    pub fn summaries(&self) -> Vec<ChunkSummary> {
        self.chunks.iter().map(ChunkSummary::from).collect()
    }

    /// Report with chunk summaries and markup
    pub fn report(&self) -> ParseReport {
        ParseReport {
            chunks: self.summaries(),
            html_code: self.html_code.clone(),
        }
    }
}

/// Serializable report of a parse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseReport {
    /// One summary per resolved chunk
    pub chunks: Vec<ChunkSummary>,
    /// Rendered markup
    pub html_code: String,
}

impl ParseReport {
    /// Pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
