//! Chunk model and markup serialization for CJK line breaking
//!
//! Continuous-script text (Chinese, Japanese, Korean) has no spaces between
//! words, so line-wrapping engines break it anywhere. This crate turns a
//! token stream annotated with part-of-speech and dependency information into
//! semantic chunks that must not be split, and renders them as markup that
//! keeps each chunk on one line.
//!
//! # Pipeline
//!
//! - A segmenter (see `budou-engine`) produces a raw [`ChunkSequence`]
//! - [`group_entities`] optionally keeps named-entity words intact
//! - [`resolve_dependencies`] merges dependent chunks and marks breaks
//! - [`HtmlSerializer`] renders the result
//!
//! # Example
//!
//! ```rust
//! use budou_core::{Chunk, ChunkSequence, Dependency, HtmlSerializer};
//! use std::collections::BTreeMap;
//!
//! let chunks = ChunkSequence::from(vec![
//!     Chunk::new("今日"),
//!     Chunk::new("は").with_dependency(Some(Dependency::Backward)),
//!     Chunk::new("晴れ"),
//!     Chunk::new("。").with_token_dependency(None),
//! ]);
//! let chunks = chunks.resolve_dependencies();
//! assert_eq!(chunks.words(), vec!["今日は", "晴れ。"]);
//!
//! let attributes = BTreeMap::from([("class".to_string(), "ww".to_string())]);
//! let html = HtmlSerializer::new(attributes).serialize(&chunks);
//! assert_eq!(
//!     html,
//!     "<span><span class=\"ww\">今日は</span><span class=\"ww\">晴れ。</span></span>"
//! );
//! ```

pub mod chunk;
pub mod entity;
pub mod error;
pub mod resolver;
pub mod sequence;
pub mod serializer;

pub use chunk::{is_cjk_char, Chunk, ChunkSummary, Dependency, Pos};
pub use entity::{group_entities, Entity};
pub use error::{CoreError, Result};
pub use resolver::resolve_dependencies;
pub use sequence::{ChunkRun, ChunkSequence};
pub use serializer::{BreakPolicy, HtmlSerializer};
