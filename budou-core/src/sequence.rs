//! Ordered chunk collection with offset arithmetic and splicing.

use crate::chunk::Chunk;
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::ops::{Index, Range};

/// A contiguous run of chunks, identified by position.
///
/// Runs are captured from a sequence by [`ChunkSequence::get_overlapping`]
/// and stay valid until that sequence is next modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkRun {
    range: Range<usize>,
}

impl ChunkRun {
    /// Create a run covering `range` of chunk indices
    pub fn new(range: Range<usize>) -> Self {
        Self { range }
    }

    /// Index of the first chunk in the run
    pub fn start(&self) -> usize {
        self.range.start
    }

    /// One past the index of the last chunk in the run
    pub fn end(&self) -> usize {
        self.range.end
    }

    /// Number of chunks in the run
    pub fn len(&self) -> usize {
        self.range.len()
    }

    /// Whether the run covers no chunk
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// Index range covered by the run
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }
}

/// Ordered, single-owner collection of [`Chunk`]s whose words concatenate
/// to the normalized source text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChunkSequence {
    chunks: Vec<Chunk>,
}

impl ChunkSequence {
    /// Create an empty sequence
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk
    pub fn push(&mut self, chunk: Chunk) {
        self.chunks.push(chunk);
    }

    /// Number of chunks
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether the sequence holds no chunk
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Iterate over the chunks in order
    pub fn iter(&self) -> std::slice::Iter<'_, Chunk> {
        self.chunks.iter()
    }

    /// Chunks as a slice
    pub fn as_slice(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Consume the sequence into its chunks
    pub fn into_vec(self) -> Vec<Chunk> {
        self.chunks
    }

    /// Words of all chunks, in order
    pub fn words(&self) -> Vec<&str> {
        self.chunks.iter().map(|c| c.word.as_str()).collect()
    }

    /// Concatenation of all words
    pub fn text(&self) -> String {
        self.chunks.iter().map(|c| c.word.as_str()).collect()
    }

    /// Joined text with each break chunk read back as the space it replaced.
    ///
    /// This is the text every stage must preserve: break insertion only
    /// turns a trailing space into an explicit break.
    pub fn normalized_text(&self) -> String {
        self.chunks
            .iter()
            .map(|c| if c.is_break() { " " } else { c.word.as_str() })
            .collect()
    }

    /// Total length of the joined text in characters
    pub fn char_len(&self) -> usize {
        self.chunks.iter().map(Chunk::char_len).sum()
    }

    /// Check that the normalized text reproduces `source` exactly.
    pub fn verify_text(&self, source: &str) -> Result<()> {
        let joined = self.normalized_text();
        if joined == source {
            return Ok(());
        }

        let mut expected_chars = source.chars();
        let mut found_chars = joined.chars();
        let mut offset = 0;
        loop {
            match (expected_chars.next(), found_chars.next()) {
                (Some(e), Some(f)) if e == f => offset += 1,
                (None, _) | (_, None) => {
                    return Err(CoreError::LengthMismatch {
                        expected: source.chars().count(),
                        actual: joined.chars().count(),
                    });
                }
                (expected, found) => {
                    return Err(CoreError::Misaligned {
                        offset,
                        expected,
                        found,
                    });
                }
            }
        }
    }

    /// Find the contiguous run of chunks intersecting the character range
    /// `[offset, offset + length)` of the joined text.
    ///
    /// If the character at `offset` is a plain space, the range starts one
    /// character later. Entity offsets sometimes include the separator just
    /// before the entity; only a single space is skipped.
    pub fn get_overlapping(&self, offset: usize, length: usize) -> ChunkRun {
        let mut offset = offset;
        if self.text().chars().nth(offset) == Some(' ') {
            offset += 1;
        }
        let end = offset.saturating_add(length);

        let mut first = None;
        let mut last = 0;
        let mut index = 0;
        for (i, chunk) in self.chunks.iter().enumerate() {
            let len = chunk.char_len();
            if offset < index + len && index < end {
                first.get_or_insert(i);
                last = i + 1;
            }
            index += len;
        }

        match first {
            Some(start) => ChunkRun::new(start..last),
            None => ChunkRun::new(0..0),
        }
    }

    /// Chunks covered by `run`
    pub fn run_chunks(&self, run: &ChunkRun) -> &[Chunk] {
        &self.chunks[run.range()]
    }

    /// Replace the chunks of `run` with `new_chunk`, inserted where the run
    /// started.
    ///
    /// # Panics
    ///
    /// Panics if the run is empty or extends past the end of the sequence.
    pub fn replace_run(&mut self, run: &ChunkRun, new_chunk: Chunk) {
        assert!(!run.is_empty(), "replace_run called with an empty run");
        assert!(
            run.end() <= self.chunks.len(),
            "run {:?} out of bounds for sequence of {} chunks",
            run.range(),
            self.chunks.len()
        );
        self.chunks.splice(run.range(), std::iter::once(new_chunk));
    }
}

impl From<Vec<Chunk>> for ChunkSequence {
    fn from(chunks: Vec<Chunk>) -> Self {
        Self { chunks }
    }
}

impl FromIterator<Chunk> for ChunkSequence {
    fn from_iter<I: IntoIterator<Item = Chunk>>(iter: I) -> Self {
        Self {
            chunks: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ChunkSequence {
    type Item = Chunk;
    type IntoIter = std::vec::IntoIter<Chunk>;

    fn into_iter(self) -> Self::IntoIter {
        self.chunks.into_iter()
    }
}

impl<'a> IntoIterator for &'a ChunkSequence {
    type Item = &'a Chunk;
    type IntoIter = std::slice::Iter<'a, Chunk>;

    fn into_iter(self) -> Self::IntoIter {
        self.chunks.iter()
    }
}

impl Index<usize> for ChunkSequence {
    type Output = Chunk;

    fn index(&self, index: usize) -> &Chunk {
        &self.chunks[index]
    }
}
