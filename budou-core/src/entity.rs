//! Entity grouping: keep each named-entity mention in one chunk.

use crate::chunk::Chunk;
use crate::sequence::{ChunkRun, ChunkSequence};
use serde::{Deserialize, Serialize};

/// A word of a named-entity mention, located in the joined source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Surface text of the word
    pub content: String,
    /// Character offset of the word in the source text
    pub begin_offset: usize,
}

impl Entity {
    /// Create an entity covering `content` at char offset `begin_offset`
    pub fn new(content: impl Into<String>, begin_offset: usize) -> Self {
        Self {
            content: content.into(),
            begin_offset,
        }
    }

    /// Split a mention into one entity per whitespace-delimited word.
    ///
    /// The offset advances by each word's length only, so every word after
    /// the first points at the separator before it; overlap lookup skips
    /// that single space.
    pub fn from_mention(content: &str, begin_offset: usize) -> Vec<Entity> {
        let mut offset = begin_offset;
        content
            .split_whitespace()
            .map(|word| {
                let entity = Entity::new(word, offset);
                offset += word.chars().count();
                entity
            })
            .collect()
    }

    /// Length of the content in characters
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }
}

/// Merge the chunks each entity overlaps into a single plain chunk.
///
/// All runs are located against the incoming sequence before any
/// replacement happens. Runs that share a chunk are unioned, then the
/// replacements are applied back to front so earlier indices stay valid.
/// Entities that overlap no chunk are skipped.
pub fn group_entities(mut chunks: ChunkSequence, entities: &[Entity]) -> ChunkSequence {
    let mut runs: Vec<ChunkRun> = Vec::with_capacity(entities.len());
    for entity in entities {
        let run = chunks.get_overlapping(entity.begin_offset, entity.char_len());
        if run.is_empty() {
            tracing::debug!(
                content = %entity.content,
                offset = entity.begin_offset,
                "entity overlaps no chunk, skipping"
            );
            continue;
        }
        runs.push(run);
    }

    let merged = union_runs(runs);
    tracing::debug!(entities = entities.len(), runs = merged.len(), "grouping chunks by entities");

    for run in merged.iter().rev() {
        let word: String = chunks
            .run_chunks(run)
            .iter()
            .map(|c| c.word.as_str())
            .collect();
        chunks.replace_run(run, Chunk::new(word));
    }
    chunks
}

/// Sort runs and union those that share at least one chunk.
fn union_runs(mut runs: Vec<ChunkRun>) -> Vec<ChunkRun> {
    runs.sort_by_key(|r| (r.start(), r.end()));
    let mut merged: Vec<ChunkRun> = Vec::with_capacity(runs.len());
    for run in runs {
        match merged.last_mut() {
            Some(last) if run.start() < last.end() => {
                let end = last.end().max(run.end());
                *last = ChunkRun::new(last.start()..end);
            }
            _ => merged.push(run),
        }
    }
    merged
}

impl ChunkSequence {
    /// Merge chunks so that no entity word spans a chunk boundary.
    pub fn group_entities(self, entities: &[Entity]) -> ChunkSequence {
        group_entities(self, entities)
    }
}
