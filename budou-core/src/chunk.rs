//! The atomic renderable unit and its classification predicates.
//!
//! A [`Chunk`] is the smallest span of text that must not be split across a
//! rendered line. Segmenters produce one chunk per token; the resolver then
//! merges chunks that belong together.

use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_general_category::{get_general_category, GeneralCategory};

/// Code point ranges (inclusive) treated as CJK for wrapping purposes.
const CJK_RANGES: [(u32, u32); 8] = [
    (4352, 4607),     // Hangul Jamo
    (11904, 42191),   // CJK radicals, kana, ideographs, Yi
    (43072, 43135),   // Phags-pa
    (44032, 55215),   // Hangul syllables
    (63744, 64255),   // CJK compatibility ideographs
    (65072, 65103),   // CJK compatibility forms
    (65381, 65500),   // Halfwidth and fullwidth forms
    (131072, 196607), // Supplementary ideographic planes
];

/// Returns true if `ch` falls into one of the CJK ranges.
pub fn is_cjk_char(ch: char) -> bool {
    let cp = ch as u32;
    CJK_RANGES
        .iter()
        .any(|&(start, end)| start <= cp && cp <= end)
}

/// Direction in which a chunk must merge with a neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dependency {
    /// Merge with the following chunk
    Forward,
    /// Merge with the preceding chunk
    Backward,
}

/// Part of speech, or one of the sentinel kinds for non-lexical chunks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Pos {
    /// Tag reported by the upstream analyzer
    Tag(String),
    /// Separator space between words
    Space,
    /// Explicit line-break opportunity
    Break,
}

impl Pos {
    const SPACE: &'static str = "SPACE";
    const BREAK: &'static str = "BREAK";

    /// String form of the tag
    pub fn as_str(&self) -> &str {
        match self {
            Pos::Tag(tag) => tag,
            Pos::Space => Self::SPACE,
            Pos::Break => Self::BREAK,
        }
    }
}

impl From<String> for Pos {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            Pos::SPACE => Pos::Space,
            Pos::BREAK => Pos::Break,
            _ => Pos::Tag(tag),
        }
    }
}

impl From<&str> for Pos {
    fn from(tag: &str) -> Self {
        Pos::from(tag.to_string())
    }
}

impl From<Pos> for String {
    fn from(pos: Pos) -> Self {
        match pos {
            Pos::Tag(tag) => tag,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unit of word segmentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Surface text of the chunk
    pub word: String,
    /// Part of speech or sentinel kind
    pub pos: Option<Pos>,
    /// Syntactic dependency-edge label
    pub label: Option<String>,
    /// Merge direction, `None` when the chunk has no opinion
    pub dependency: Option<Dependency>,
}

impl Chunk {
    /// Create a plain chunk with no annotations
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            pos: None,
            label: None,
            dependency: None,
        }
    }

    /// Create a token chunk from analyzer output. Pair with
    /// [`Chunk::with_token_dependency`] to apply the punctuation rule.
    pub fn token(word: impl Into<String>, pos: Option<Pos>, label: Option<String>) -> Self {
        Self {
            word: word.into(),
            pos,
            label,
            dependency: None,
        }
    }

    /// The separator space sentinel
    pub fn space() -> Self {
        Self {
            word: " ".to_string(),
            pos: Some(Pos::Space),
            label: None,
            dependency: None,
        }
    }

    /// The line-break sentinel
    pub fn breakline() -> Self {
        Self {
            word: "\n".to_string(),
            pos: Some(Pos::Break),
            label: None,
            dependency: None,
        }
    }

    /// Set the part of speech
    pub fn with_pos(mut self, pos: impl Into<Pos>) -> Self {
        self.pos = Some(pos.into());
        self
    }

    /// Set the dependency label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the merge direction
    pub fn with_dependency(mut self, dependency: Option<Dependency>) -> Self {
        self.dependency = dependency;
        self
    }

    /// Set the merge direction the way segmenters do: `dependency` applies
    /// unless the chunk is punctuation, in which case the punctuation rule
    /// decides.
    pub fn with_token_dependency(mut self, dependency: Option<Dependency>) -> Self {
        self.dependency = self.punctuation_dependency().or(dependency);
        self
    }

    /// Dependency implied by punctuation class, if the chunk is punctuation
    pub fn punctuation_dependency(&self) -> Option<Dependency> {
        if !self.is_punctuation() {
            return None;
        }
        if self.is_opening_punctuation() {
            Some(Dependency::Forward)
        } else {
            Some(Dependency::Backward)
        }
    }

    /// Whether the chunk is the space sentinel
    pub fn is_space(&self) -> bool {
        matches!(self.pos, Some(Pos::Space))
    }

    /// Whether the chunk is the line-break sentinel
    pub fn is_break(&self) -> bool {
        matches!(self.pos, Some(Pos::Break))
    }

    /// Whether the chunk is a single punctuation character
    pub fn is_punctuation(&self) -> bool {
        self.single_char().is_some_and(is_punctuation_char)
    }

    /// Whether the chunk is a single opening bracket or initial quote (Ps, Pi)
    pub fn is_opening_punctuation(&self) -> bool {
        self.single_char().is_some_and(|ch| {
            matches!(
                get_general_category(ch),
                GeneralCategory::OpenPunctuation | GeneralCategory::InitialPunctuation
            )
        })
    }

    /// Whether any character of the word is CJK
    pub fn has_cjk(&self) -> bool {
        self.word.chars().any(is_cjk_char)
    }

    /// Length of the word in characters
    pub fn char_len(&self) -> usize {
        self.word.chars().count()
    }

    fn single_char(&self) -> Option<char> {
        let mut chars = self.word.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Some(ch),
            _ => None,
        }
    }
}

fn is_punctuation_char(ch: char) -> bool {
    matches!(
        get_general_category(ch),
        GeneralCategory::ConnectorPunctuation
            | GeneralCategory::DashPunctuation
            | GeneralCategory::OpenPunctuation
            | GeneralCategory::ClosePunctuation
            | GeneralCategory::InitialPunctuation
            | GeneralCategory::FinalPunctuation
            | GeneralCategory::OtherPunctuation
    )
}

/// Flat view of a chunk for reporting, including the derived CJK flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkSummary {
    /// Chunk text
    pub word: String,
    /// Part-of-speech tag or sentinel
    pub pos: Option<Pos>,
    /// Dependency label
    pub label: Option<String>,
    /// Attachment direction, if any
    pub dependency: Option<Dependency>,
    /// Whether the word contains CJK characters
    pub has_cjk: bool,
}

impl From<&Chunk> for ChunkSummary {
    fn from(chunk: &Chunk) -> Self {
        Self {
            word: chunk.word.clone(),
            pos: chunk.pos.clone(),
            label: chunk.label.clone(),
            dependency: chunk.dependency,
            has_cjk: chunk.has_cjk(),
        }
    }
}
