//! Segmenters turning text into a raw chunk sequence
//!
//! Every segmenter produces one chunk per token, annotated with part of
//! speech, dependency label and merge direction. Whitespace between tokens
//! becomes a space sentinel, so the chunk words always join back into the
//! input text.

mod dictionary;
mod morphological;
mod syntax;

pub use dictionary::DictionarySegmenter;
pub use morphological::{
    parse_chasen, MecabCommand, MorphAnalyzer, MorphToken, MorphologicalSegmenter,
};
pub use syntax::{
    DependencyEdge, EntityMention, EntityRecord, EntityResponse, MentionText, PartOfSpeech,
    RecordedService, Recording, SyntaxResponse, SyntaxSegmenter, SyntaxService, TextSpan, Token,
};

use crate::error::{EngineError, Result};
use crate::language::Language;
use budou_core::{Chunk, ChunkSequence, Entity};

/// Text-to-chunks segmentation
///
/// Implementations must be thread-safe so one segmenter can serve parsers
/// on several threads.
pub trait Segmenter: Send + Sync {
    /// Short identifier used in logs and errors
    fn name(&self) -> &'static str;

    /// Languages this segmenter can handle
    fn supported_languages(&self) -> &[Language];

    /// Segment `text` into annotated chunks.
    ///
    /// `language` is a hint; `None` lets the segmenter pick or detect one.
    /// The words of the returned sequence join back into `text`.
    fn segment(&self, text: &str, language: Option<Language>) -> Result<ChunkSequence>;

    /// Fail with [`EngineError::UnsupportedLanguage`] if `language` is set
    /// and not handled by this segmenter
    fn check_language(&self, language: Option<Language>) -> Result<()> {
        match language {
            Some(language) if !self.supported_languages().contains(&language) => {
                Err(EngineError::UnsupportedLanguage {
                    code: language.code().to_string(),
                    segmenter: self.name(),
                })
            }
            _ => Ok(()),
        }
    }
}

/// Source of named-entity spans for entity grouping
pub trait EntityProvider: Send + Sync {
    /// Entities found in `text`, offsets in characters
    fn entities(&self, text: &str, language: Option<Language>) -> Result<Vec<Entity>>;
}

/// Builds a chunk sequence while checking tokens against the source text.
///
/// Tokens are pushed in order, either at an explicit character offset or at
/// the next non-whitespace position. Whitespace skipped between tokens is
/// emitted as a space sentinel carrying the skipped text.
pub(crate) struct Aligner {
    chars: Vec<char>,
    cursor: usize,
    chunks: ChunkSequence,
}

impl Aligner {
    pub(crate) fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            cursor: 0,
            chunks: ChunkSequence::new(),
        }
    }

    /// Append `chunk`, whose word must appear at `offset`, or at the next
    /// non-whitespace character when `offset` is `None`
    pub(crate) fn push(&mut self, chunk: Chunk, offset: Option<usize>) -> Result<()> {
        if chunk.word.is_empty() {
            return Ok(());
        }

        let start = match offset {
            Some(offset) => offset,
            None => self.next_non_whitespace(),
        };
        if start < self.cursor {
            return Err(EngineError::Misaligned {
                offset: start,
                token: chunk.word,
            });
        }
        if let Some(i) = (self.cursor..start).find(|&i| !self.is_whitespace_at(i)) {
            return Err(EngineError::Misaligned {
                offset: i,
                token: chunk.word,
            });
        }
        self.push_gap(start);

        let len = chunk.char_len();
        let matches = start + len <= self.chars.len()
            && chunk.word.chars().eq(self.chars[start..start + len].iter().copied());
        if !matches {
            return Err(EngineError::Misaligned {
                offset: start,
                token: chunk.word,
            });
        }

        self.cursor = start + len;
        self.chunks.push(chunk);
        Ok(())
    }

    /// Finish the sequence; only whitespace may remain uncovered
    pub(crate) fn finish(mut self) -> Result<ChunkSequence> {
        let end = self.chars.len();
        if let Some(offset) = (self.cursor..end).find(|&i| !self.is_whitespace_at(i)) {
            return Err(EngineError::Uncovered { offset });
        }
        self.push_gap(end);
        Ok(self.chunks)
    }

    fn next_non_whitespace(&self) -> usize {
        (self.cursor..self.chars.len())
            .find(|&i| !self.is_whitespace_at(i))
            .unwrap_or(self.chars.len())
    }

    fn is_whitespace_at(&self, index: usize) -> bool {
        self.chars.get(index).is_some_and(|ch| ch.is_whitespace())
    }

    fn push_gap(&mut self, until: usize) {
        if until > self.cursor {
            let gap: String = self.chars[self.cursor..until].iter().collect();
            self.chunks.push(Chunk {
                word: gap,
                ..Chunk::space()
            });
            self.cursor = until;
        }
    }
}
