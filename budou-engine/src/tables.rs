//! Language dependency tables
//!
//! Tables are embedded TOML files parsed once on first access. They decide
//! which tokens merge with a neighbor: dependency-edge labels for the syntax
//! segmenter, POS categories for the morphological segmenter, and a word
//! dictionary for the rule-based tokenizer.

use crate::error::{EngineError, Result};
use crate::language::Language;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

/// Root table set for one language
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageTables {
    pub metadata: Metadata,
    pub syntax: SyntaxTable,
    #[serde(default)]
    pub morphology: MorphologyTable,
    #[serde(default)]
    pub dictionary: DictionaryTable,
}

/// Table metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    pub code: String,
    pub name: String,
}

/// Dependency-edge labels predicting a merge with the head token
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyntaxTable {
    pub dependent_labels: HashSet<String>,
}

/// POS categories and sub-labels predicting a merge direction
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MorphologyTable {
    #[serde(default)]
    pub forward_pos: HashSet<String>,
    #[serde(default)]
    pub backward_pos: HashSet<String>,
    #[serde(default)]
    pub forward_labels: HashSet<String>,
    #[serde(default)]
    pub backward_labels: HashSet<String>,
}

/// Words the rule-based tokenizer splits out and attaches backward
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DictionaryTable {
    #[serde(default)]
    pub particles: HashSet<String>,
    #[serde(default)]
    pub auxiliary_verbs: HashSet<String>,
}

impl DictionaryTable {
    /// Whether `word` is a known particle or auxiliary verb
    pub fn contains(&self, word: &str) -> bool {
        self.particles.contains(word) || self.auxiliary_verbs.contains(word)
    }

    /// Length in characters of the longest dictionary word
    pub fn max_word_len(&self) -> usize {
        self.particles
            .iter()
            .chain(self.auxiliary_verbs.iter())
            .map(|w| w.chars().count())
            .max()
            .unwrap_or(0)
    }
}

static TABLES: OnceLock<std::result::Result<HashMap<String, LanguageTables>, String>> =
    OnceLock::new();

macro_rules! embed_language_tables {
    ($code:expr, $path:expr) => {
        ($code, include_str!($path))
    };
}

fn load_embedded_tables() -> std::result::Result<HashMap<String, LanguageTables>, String> {
    let embedded = [
        embed_language_tables!("ja", "../configs/languages/japanese.toml"),
        embed_language_tables!("ko", "../configs/languages/korean.toml"),
        embed_language_tables!("zh", "../configs/languages/chinese.toml"),
    ];

    let mut tables = HashMap::new();
    for (code, toml_content) in embedded {
        let parsed: LanguageTables = toml::from_str(toml_content)
            .map_err(|e| format!("failed to parse {code} tables: {e}"))?;

        if parsed.metadata.code != code {
            return Err(format!(
                "table code mismatch: expected {}, got {}",
                code, parsed.metadata.code
            ));
        }
        tables.insert(code.to_string(), parsed);
    }

    tracing::debug!(languages = tables.len(), "loaded embedded language tables");
    Ok(tables)
}

/// Tables for `language`
pub fn tables_for(language: Language) -> Result<&'static LanguageTables> {
    let tables = TABLES
        .get_or_init(load_embedded_tables)
        .as_ref()
        .map_err(|e| EngineError::Tables(e.clone()))?;

    tables
        .get(language.table_key())
        .ok_or_else(|| EngineError::Tables(format!("no tables for {}", language.code())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_language_has_tables() {
        for language in Language::ALL {
            let tables = tables_for(language).expect("tables should load");
            assert!(tables.syntax.dependent_labels.contains("PRT"));
        }
    }

    #[test]
    fn test_japanese_tables() {
        let tables = tables_for(Language::Japanese).unwrap();
        assert_eq!(tables.metadata.name, "Japanese");
        assert!(tables.morphology.backward_pos.contains("助詞"));
        assert!(tables.morphology.backward_labels.contains("非自立"));
        assert!(tables.dictionary.contains("は"));
        assert!(tables.dictionary.contains("ます"));
        assert!(!tables.dictionary.contains("晴れ"));
        assert_eq!(tables.dictionary.max_word_len(), 4);
    }

    #[test]
    fn test_chinese_variants_share_tables() {
        let zh = tables_for(Language::Chinese).unwrap();
        let tw = tables_for(Language::ChineseTraditional).unwrap();
        assert!(std::ptr::eq(zh, tw));
        assert!(tw.dictionary.particles.is_empty());
    }
}
