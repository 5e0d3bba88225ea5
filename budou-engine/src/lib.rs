//! Segmenters and language tables for the Budou chunk pipeline
//!
//! A [`Segmenter`] turns text into a raw [`budou_core::ChunkSequence`] with
//! one chunk per token. Three implementations are provided:
//!
//! - [`SyntaxSegmenter`] reads dependency edges from a [`SyntaxService`]
//!   and can also act as an [`EntityProvider`]
//! - [`MorphologicalSegmenter`] reads part-of-speech rows from a
//!   [`MorphAnalyzer`] such as the `mecab` binary
//! - [`DictionarySegmenter`] tokenizes Japanese by script class and a small
//!   particle dictionary, with no external dependency
//!
//! Which tokens attach to their neighbors is driven by the per-language
//! tables in [`tables`].

pub mod error;
pub mod language;
pub mod segmenter;
pub mod tables;

pub use error::{EngineError, Result};
pub use language::Language;
pub use segmenter::{
    parse_chasen, DictionarySegmenter, EntityProvider, MecabCommand, MorphAnalyzer, MorphToken,
    MorphologicalSegmenter, RecordedService, Recording, Segmenter, SyntaxResponse,
    SyntaxSegmenter, SyntaxService,
};
pub use tables::{tables_for, LanguageTables};
