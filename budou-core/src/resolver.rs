//! Two-pass directional merge of dependent chunks, followed by break insertion.
//!
//! Each pass consumes the chunk list and returns a freshly built one. The
//! forward pass glues chunks that depend on their successor onto it; the
//! backward pass glues chunks that depend on their predecessor (and separator
//! spaces) onto it. Finally, a trailing space after CJK text becomes an
//! explicit [`Chunk::breakline`].

use crate::chunk::{Chunk, Dependency};
use crate::sequence::ChunkSequence;

/// Run both merge passes and break insertion over `chunks`.
pub fn resolve_dependencies(chunks: ChunkSequence) -> ChunkSequence {
    let before = chunks.len();
    let chunks = concatenate(chunks.into_vec(), Dependency::Forward);
    let chunks = concatenate(chunks, Dependency::Backward);
    let chunks = insert_breaklines(chunks);
    tracing::debug!(before, after = chunks.len(), "resolved chunk dependencies");
    ChunkSequence::from(chunks)
}

/// Merge chunks whose dependency points in `direction`.
///
/// Chunks matching the direction accumulate in a bucket until a
/// non-matching chunk closes it; the joined chunk takes the closing chunk's
/// pos, label and dependency. A bucket left open at the end of the
/// traversal is emitted unmerged.
pub(crate) fn concatenate(chunks: Vec<Chunk>, direction: Dependency) -> Vec<Chunk> {
    let backward = direction == Dependency::Backward;
    let source: Box<dyn Iterator<Item = Chunk>> = if backward {
        Box::new(chunks.into_iter().rev())
    } else {
        Box::new(chunks.into_iter())
    };

    let mut bucket: Vec<Chunk> = Vec::new();
    let mut target: Vec<Chunk> = Vec::new();
    for chunk in source {
        let attaches = chunk.dependency == Some(direction) || (backward && chunk.is_space());
        if attaches {
            bucket.push(chunk);
            continue;
        }

        let (pos, label, dependency) = (chunk.pos.clone(), chunk.label.clone(), chunk.dependency);
        bucket.push(chunk);
        if backward {
            bucket.reverse();
        }
        if bucket.len() > 1 {
            tracing::trace!(size = bucket.len(), ?direction, "merging chunks");
        }
        let word: String = bucket.drain(..).map(|c| c.word).collect();
        target.push(Chunk {
            word,
            pos,
            label,
            dependency,
        });
    }
    target.append(&mut bucket);

    if backward {
        target.reverse();
    }
    target
}

/// Replace the trailing space of each CJK chunk with a break chunk.
pub(crate) fn insert_breaklines(chunks: Vec<Chunk>) -> Vec<Chunk> {
    let mut target = Vec::with_capacity(chunks.len());
    for mut chunk in chunks {
        if chunk.word.ends_with(' ') && chunk.has_cjk() {
            chunk.word.pop();
            target.push(chunk);
            target.push(Chunk::breakline());
        } else {
            target.push(chunk);
        }
    }
    target
}

impl ChunkSequence {
    /// Merge dependent chunks and mark CJK line-break opportunities.
    pub fn resolve_dependencies(self) -> ChunkSequence {
        resolve_dependencies(self)
    }
}
