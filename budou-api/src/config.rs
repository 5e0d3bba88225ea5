//! Parser configuration

use crate::error::{ApiError, Result};
use budou_core::BreakPolicy;
use budou_engine::Language;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Class name given to chunk spans when none is configured
pub const DEFAULT_CLASS_NAME: &str = "ww";

const INLINE_BLOCK_STYLE: &str = "display:inline-block";

/// Segmenter backing a parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmenterKind {
    /// Dependency edges from a syntax-analysis service
    #[serde(alias = "nlapi")]
    Syntax,
    /// Part-of-speech rows from the `mecab` binary
    Mecab,
    /// Built-in rule-based Japanese tokenizer
    #[default]
    #[serde(alias = "tinysegmenter")]
    Dictionary,
}

impl SegmenterKind {
    /// Name used in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            SegmenterKind::Syntax => "syntax",
            SegmenterKind::Mecab => "mecab",
            SegmenterKind::Dictionary => "dictionary",
        }
    }
}

impl FromStr for SegmenterKind {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "syntax" | "nlapi" => Ok(SegmenterKind::Syntax),
            "mecab" => Ok(SegmenterKind::Mecab),
            "dictionary" | "tinysegmenter" => Ok(SegmenterKind::Dictionary),
            _ => Err(ApiError::UnknownSegmenter(s.to_string())),
        }
    }
}

impl fmt::Display for SegmenterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// High-level configuration for parsing
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Language hint passed to the segmenter
    pub language: Option<Language>,
    /// Which segmenter to run
    pub segmenter: SegmenterKind,
    /// Comma-separated class names; replaces any `class` attribute
    pub classname: Option<String>,
    /// Extra attributes for chunk spans
    pub attributes: BTreeMap<String, String>,
    /// Append `display:inline-block` to the span style
    pub inline_style: bool,
    /// Chunks longer than this many characters are left unwrapped
    pub max_length: Option<usize>,
    /// How line-break opportunities are rendered
    pub break_policy: BreakPolicy,
    /// Keep named entities in one chunk (syntax segmenter only)
    pub use_entity: bool,
    /// Recorded syntax-service responses to replay (syntax segmenter only)
    pub recordings: Option<PathBuf>,
}

impl Config {
    /// Create a builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Parse a TOML configuration
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| ApiError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML configuration file
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Check option combinations
    pub fn validate(&self) -> Result<()> {
        if self.max_length == Some(0) {
            return Err(ApiError::Config(
                "max_length must be greater than 0".to_string(),
            ));
        }
        if self.use_entity && self.segmenter != SegmenterKind::Syntax {
            return Err(ApiError::Config(format!(
                "entity grouping requires the syntax segmenter, not {}",
                self.segmenter
            )));
        }
        Ok(())
    }

    /// Attributes for chunk spans.
    ///
    /// `class` defaults to [`DEFAULT_CLASS_NAME`]; a configured `classname`
    /// replaces it with its comma-separated names joined by spaces. With
    /// `inline_style`, `display:inline-block` is appended to the
    /// `;`-separated `style` list.
    pub fn attributes(&self) -> BTreeMap<String, String> {
        let mut attributes = self.attributes.clone();
        attributes
            .entry("class".to_string())
            .or_insert_with(|| DEFAULT_CLASS_NAME.to_string());

        if let Some(classname) = self.classname.as_deref().filter(|c| !c.is_empty()) {
            let classes: Vec<&str> = classname.split(',').collect();
            attributes.insert("class".to_string(), classes.join(" "));
        }

        if self.inline_style {
            let mut styles: Vec<&str> = attributes
                .get("style")
                .map(|style| style.split(';').collect())
                .unwrap_or_default();
            styles.push(INLINE_BLOCK_STYLE);
            let style = styles.join(";");
            attributes.insert("style".to_string(), style);
        }
        attributes
    }
}

/// Configuration builder
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the language from a code such as `ja` or `zh-TW`
    pub fn language(mut self, code: &str) -> Result<Self> {
        self.config.language = Some(Language::from_code(code)?);
        Ok(self)
    }

    /// Select the segmenter
    pub fn segmenter(mut self, segmenter: SegmenterKind) -> Self {
        self.config.segmenter = segmenter;
        self
    }

    /// Set comma-separated class names for chunk spans
    pub fn classname(mut self, classname: impl Into<String>) -> Self {
        self.config.classname = Some(classname.into());
        self
    }

    /// Add one span attribute
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.attributes.insert(name.into(), value.into());
        self
    }

    /// Replace all span attributes
    pub fn attributes(mut self, attributes: BTreeMap<String, String>) -> Self {
        self.config.attributes = attributes;
        self
    }

    /// Append `display:inline-block` to the span style
    pub fn inline_style(mut self, inline_style: bool) -> Self {
        self.config.inline_style = inline_style;
        self
    }

    /// Set the maximum wrapped chunk length in characters
    pub fn max_length(mut self, max_length: Option<usize>) -> Self {
        self.config.max_length = max_length;
        self
    }

    /// Set the break rendering policy
    pub fn break_policy(mut self, break_policy: BreakPolicy) -> Self {
        self.config.break_policy = break_policy;
        self
    }

    /// Render breaks as `<wbr>` elements
    pub fn wbr(self) -> Self {
        self.break_policy(BreakPolicy::Wbr)
    }

    /// Enable entity grouping
    pub fn use_entity(mut self, use_entity: bool) -> Self {
        self.config.use_entity = use_entity;
        self
    }

    /// Replay syntax-service responses recorded in a JSON file
    pub fn recordings(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.recordings = Some(path.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_attributes() {
        let config = Config::default();
        assert_eq!(config.attributes(), map(&[("class", "ww")]));
    }

    #[test]
    fn test_classname_overrides_class() {
        let config = Config::builder()
            .attribute("class", "old")
            .classname("foo,bar")
            .build()
            .unwrap();
        assert_eq!(config.attributes(), map(&[("class", "foo bar")]));
    }

    #[test]
    fn test_class_attribute_kept_without_classname() {
        let config = Config::builder()
            .attribute("class", "mine")
            .attribute("lang", "ja")
            .build()
            .unwrap();
        assert_eq!(
            config.attributes(),
            map(&[("class", "mine"), ("lang", "ja")])
        );
    }

    #[test]
    fn test_inline_style() {
        let config = Config::builder().inline_style(true).build().unwrap();
        assert_eq!(config.attributes()["style"], "display:inline-block");

        let config = Config::builder()
            .attribute("style", "color: red")
            .inline_style(true)
            .build()
            .unwrap();
        assert_eq!(
            config.attributes()["style"],
            "color: red;display:inline-block"
        );
    }

    #[test]
    fn test_validation() {
        let err = Config::builder().max_length(Some(0)).build().unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));

        let err = Config::builder().use_entity(true).build().unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));

        assert!(Config::builder()
            .segmenter(SegmenterKind::Syntax)
            .use_entity(true)
            .build()
            .is_ok());
    }

    #[test]
    fn test_unknown_language() {
        let err = Config::builder().language("xx").unwrap_err();
        assert!(matches!(err, ApiError::Engine(_)));
    }

    #[test]
    fn test_segmenter_kind_from_str() {
        assert_eq!("nlapi".parse::<SegmenterKind>().unwrap(), SegmenterKind::Syntax);
        assert_eq!("MeCab".parse::<SegmenterKind>().unwrap(), SegmenterKind::Mecab);
        assert_eq!(
            "tinysegmenter".parse::<SegmenterKind>().unwrap(),
            SegmenterKind::Dictionary
        );
        assert!(matches!(
            "kytea".parse::<SegmenterKind>(),
            Err(ApiError::UnknownSegmenter(name)) if name == "kytea"
        ));
    }

    #[test]
    fn test_from_toml_str() {
        let config = Config::from_toml_str(
            r#"
            language = "ja"
            segmenter = "mecab"
            classname = "chunk"
            inline_style = true
            max_length = 8
            break_policy = "wbr"

            [attributes]
            lang = "ja"
            "#,
        )
        .unwrap();

        assert_eq!(config.language, Some(Language::Japanese));
        assert_eq!(config.segmenter, SegmenterKind::Mecab);
        assert_eq!(config.max_length, Some(8));
        assert_eq!(config.break_policy, BreakPolicy::Wbr);
        assert_eq!(config.attributes()["class"], "chunk");
        assert_eq!(config.attributes()["lang"], "ja");
    }

    #[test]
    fn test_from_toml_rejects_bad_values() {
        assert!(matches!(
            Config::from_toml_str("language = \"xx\""),
            Err(ApiError::Config(_))
        ));
        assert!(matches!(
            Config::from_toml_str("max_length = 0"),
            Err(ApiError::Config(_))
        ));
        assert!(matches!(
            Config::from_toml_str("unknown_option = true"),
            Err(ApiError::Config(_))
        ));
    }
}
