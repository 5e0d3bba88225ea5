//! Segmentation from a syntax-analysis service
//!
//! The service returns tokens with part-of-speech tags and dependency edges.
//! A token whose edge label is in the language's dependent-label table
//! attaches to its head: forward when the head comes later, backward when it
//! came earlier.

use super::{Aligner, EntityProvider, Segmenter};
use crate::error::{EngineError, Result};
use crate::language::Language;
use crate::tables::tables_for;
use budou_core::{Chunk, ChunkSequence, Dependency, Entity, Pos};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Annotate-text response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyntaxResponse {
    #[serde(default)]
    pub tokens: Vec<Token>,
    /// Language detected by the service
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub text: TextSpan,
    #[serde(default)]
    pub part_of_speech: PartOfSpeech,
    #[serde(default)]
    pub dependency_edge: DependencyEdge,
}

/// Surface text of a token and its character offset in the request text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSpan {
    pub content: String,
    #[serde(default)]
    pub begin_offset: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartOfSpeech {
    #[serde(default)]
    pub tag: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyEdge {
    #[serde(default)]
    pub head_token_index: usize,
    #[serde(default)]
    pub label: String,
}

/// Analyze-entities response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityResponse {
    #[serde(default)]
    pub entities: Vec<EntityRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mentions: Vec<EntityMention>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityMention {
    pub text: MentionText,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentionText {
    pub content: String,
    #[serde(default)]
    pub begin_offset: Option<usize>,
}

/// Boundary to a natural-language syntax service
pub trait SyntaxService: Send + Sync {
    /// Tokens with part of speech and dependency edges for `text`
    fn annotate_text(&self, text: &str, language: Option<Language>) -> Result<SyntaxResponse>;

    /// Named entities found in `text`
    fn analyze_entities(&self, text: &str, language: Option<Language>)
        -> Result<EntityResponse>;
}

/// One stored exchange with the syntax service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recording {
    pub text: String,
    pub syntax: SyntaxResponse,
    #[serde(default)]
    pub entities: EntityResponse,
}

/// A [`SyntaxService`] replaying stored responses keyed by request text
#[derive(Debug, Clone, Default)]
pub struct RecordedService {
    recordings: HashMap<String, Recording>,
}

impl RecordedService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load recordings from a JSON array of `{ text, syntax, entities }`
    pub fn from_json_str(json: &str) -> Result<Self> {
        let recordings: Vec<Recording> = serde_json::from_str(json)?;
        Ok(recordings.into_iter().collect())
    }

    /// Load recordings from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn insert(&mut self, recording: Recording) {
        self.recordings.insert(recording.text.clone(), recording);
    }

    pub fn len(&self) -> usize {
        self.recordings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recordings.is_empty()
    }

    fn lookup(&self, text: &str) -> Result<&Recording> {
        self.recordings
            .get(text)
            .ok_or_else(|| EngineError::Service(format!("no recorded response for {text:?}")))
    }
}

impl FromIterator<Recording> for RecordedService {
    fn from_iter<I: IntoIterator<Item = Recording>>(iter: I) -> Self {
        let mut service = RecordedService::new();
        for recording in iter {
            service.insert(recording);
        }
        service
    }
}

impl SyntaxService for RecordedService {
    fn annotate_text(&self, text: &str, _language: Option<Language>) -> Result<SyntaxResponse> {
        Ok(self.lookup(text)?.syntax.clone())
    }

    fn analyze_entities(
        &self,
        text: &str,
        _language: Option<Language>,
    ) -> Result<EntityResponse> {
        Ok(self.lookup(text)?.entities.clone())
    }
}

/// Segmenter backed by a [`SyntaxService`]
#[derive(Clone)]
pub struct SyntaxSegmenter {
    service: Arc<dyn SyntaxService>,
}

impl SyntaxSegmenter {
    pub fn new(service: Arc<dyn SyntaxService>) -> Self {
        Self { service }
    }

    /// Language whose tables apply: the requested one, else the detected
    /// one, else Japanese
    fn effective_language(requested: Option<Language>, response: &SyntaxResponse) -> Language {
        requested
            .or_else(|| {
                response
                    .language
                    .as_deref()
                    .and_then(|code| Language::from_code(code).ok())
            })
            .unwrap_or(Language::Japanese)
    }
}

impl std::fmt::Debug for SyntaxSegmenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyntaxSegmenter").finish_non_exhaustive()
    }
}

impl Segmenter for SyntaxSegmenter {
    fn name(&self) -> &'static str {
        "syntax"
    }

    fn supported_languages(&self) -> &[Language] {
        &Language::ALL
    }

    fn segment(&self, text: &str, language: Option<Language>) -> Result<ChunkSequence> {
        self.check_language(language)?;
        if text.is_empty() {
            return Ok(ChunkSequence::new());
        }

        let response = self.service.annotate_text(text, language)?;
        let language = Self::effective_language(language, &response);
        let tables = tables_for(language)?;

        let mut aligner = Aligner::new(text);
        for (index, token) in response.tokens.into_iter().enumerate() {
            let edge = token.dependency_edge;
            let dependency = tables
                .syntax
                .dependent_labels
                .contains(&edge.label)
                .then(|| {
                    if index < edge.head_token_index {
                        Dependency::Forward
                    } else {
                        Dependency::Backward
                    }
                });
            let pos = (!token.part_of_speech.tag.is_empty())
                .then(|| Pos::from(token.part_of_speech.tag));
            let label = (!edge.label.is_empty()).then_some(edge.label);

            let chunk = Chunk::token(token.text.content, pos, label)
                .with_token_dependency(dependency);
            aligner.push(chunk, token.text.begin_offset)?;
        }

        let chunks = aligner.finish()?;
        tracing::debug!(
            language = %language,
            chunks = chunks.len(),
            "segmented text with syntax service"
        );
        Ok(chunks)
    }
}

impl EntityProvider for SyntaxSegmenter {
    fn entities(&self, text: &str, language: Option<Language>) -> Result<Vec<Entity>> {
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let response = self.service.analyze_entities(text, language)?;
        let mut entities = Vec::new();
        for record in response.entities {
            // Only the first mention of each entity is used.
            let Some(mention) = record.mentions.into_iter().next() else {
                continue;
            };
            let Some(offset) = mention.text.begin_offset else {
                tracing::debug!(name = %record.name, "entity mention without offset, skipping");
                continue;
            };
            entities.extend(Entity::from_mention(&mention.text.content, offset));
        }
        Ok(entities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORDINGS: &str = r#"[
        {
            "text": "今日は晴れ。",
            "syntax": {
                "language": "ja",
                "tokens": [
                    {"text": {"content": "今日", "beginOffset": 0},
                     "partOfSpeech": {"tag": "NOUN"},
                     "dependencyEdge": {"headTokenIndex": 2, "label": "NSUBJ"}},
                    {"text": {"content": "は", "beginOffset": 2},
                     "partOfSpeech": {"tag": "PRT"},
                     "dependencyEdge": {"headTokenIndex": 0, "label": "PRT"}},
                    {"text": {"content": "晴れ", "beginOffset": 3},
                     "partOfSpeech": {"tag": "NOUN"},
                     "dependencyEdge": {"headTokenIndex": 2, "label": "ROOT"}},
                    {"text": {"content": "。", "beginOffset": 5},
                     "partOfSpeech": {"tag": "PUNCT"},
                     "dependencyEdge": {"headTokenIndex": 2, "label": "P"}}
                ]
            }
        },
        {
            "text": "東京タワー に行く",
            "syntax": {
                "tokens": [
                    {"text": {"content": "東京", "beginOffset": 0},
                     "partOfSpeech": {"tag": "NOUN"},
                     "dependencyEdge": {"headTokenIndex": 1, "label": "NN"}},
                    {"text": {"content": "タワー", "beginOffset": 2},
                     "partOfSpeech": {"tag": "NOUN"},
                     "dependencyEdge": {"headTokenIndex": 3, "label": "DOBJ"}},
                    {"text": {"content": "に", "beginOffset": 6},
                     "partOfSpeech": {"tag": "PRT"},
                     "dependencyEdge": {"headTokenIndex": 1, "label": "PRT"}},
                    {"text": {"content": "行く", "beginOffset": 7},
                     "partOfSpeech": {"tag": "VERB"},
                     "dependencyEdge": {"headTokenIndex": 3, "label": "ROOT"}}
                ]
            },
            "entities": {
                "entities": [
                    {"name": "東京タワー",
                     "mentions": [
                        {"text": {"content": "東京タワー", "beginOffset": 0}},
                        {"text": {"content": "東京タワー", "beginOffset": 42}}
                     ]},
                    {"name": "empty", "mentions": []}
                ]
            }
        }
    ]"#;

    fn segmenter() -> SyntaxSegmenter {
        let service = RecordedService::from_json_str(RECORDINGS).unwrap();
        SyntaxSegmenter::new(Arc::new(service))
    }

    #[test]
    fn test_dependencies_from_edges() {
        let chunks = segmenter().segment("今日は晴れ。", None).unwrap();
        assert_eq!(chunks.words(), vec!["今日", "は", "晴れ", "。"]);
        assert_eq!(chunks[0].dependency, None);
        assert_eq!(chunks[1].dependency, Some(Dependency::Backward));
        assert_eq!(chunks[1].pos, Some(Pos::from("PRT")));
        assert_eq!(chunks[1].label.as_deref(), Some("PRT"));
        assert_eq!(chunks[3].dependency, Some(Dependency::Backward));

        let resolved = chunks.resolve_dependencies();
        assert_eq!(resolved.words(), vec!["今日は", "晴れ。"]);
    }

    #[test]
    fn test_offset_gap_becomes_space() {
        let chunks = segmenter().segment("東京タワー に行く", None).unwrap();
        assert_eq!(chunks.words(), vec!["東京", "タワー", " ", "に", "行く"]);
        assert!(chunks[2].is_space());
    }

    #[test]
    fn test_entities_use_first_mention() {
        let entities = segmenter().entities("東京タワー に行く", None).unwrap();
        assert_eq!(entities, vec![Entity::new("東京タワー", 0)]);

        let chunks = segmenter()
            .segment("東京タワー に行く", None)
            .unwrap()
            .group_entities(&entities);
        assert_eq!(chunks.words(), vec!["東京タワー", " ", "に", "行く"]);
    }

    #[test]
    fn test_unrecorded_text_is_service_error() {
        let err = segmenter().segment("明日", None).unwrap_err();
        assert!(matches!(err, EngineError::Service(_)));
    }

    #[test]
    fn test_empty_text_skips_service() {
        let chunks = segmenter().segment("", Some(Language::Korean)).unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_mismatched_response_is_rejected() {
        let json = r#"[{"text": "今日", "syntax": {"tokens": [
            {"text": {"content": "明日", "beginOffset": 0}}
        ]}}]"#;
        let service = RecordedService::from_json_str(json).unwrap();
        let err = SyntaxSegmenter::new(Arc::new(service))
            .segment("今日", None)
            .unwrap_err();
        assert!(matches!(err, EngineError::Misaligned { offset: 0, .. }));
    }
}
