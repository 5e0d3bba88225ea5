//! Parser façade running the full pipeline

use crate::cache::{cache_key, ParseCache};
use crate::config::{Config, SegmenterKind};
use crate::dto::ParseOutput;
use crate::error::{ApiError, Result};
use crate::preprocess::preprocess;
use budou_core::HtmlSerializer;
use budou_engine::{
    DictionarySegmenter, EntityProvider, MorphologicalSegmenter, RecordedService, Segmenter,
    SyntaxSegmenter, SyntaxService,
};
use std::sync::Arc;

/// Turns source text into resolved chunks and markup
///
/// The pipeline is: preprocess, segment, verify the segmentation against
/// the source, optionally group entities, resolve dependencies, serialize.
pub struct Parser {
    config: Config,
    segmenter: Arc<dyn Segmenter>,
    entities: Option<Arc<dyn EntityProvider>>,
    serializer: HtmlSerializer,
}

impl Parser {
    /// Create a parser with the default configuration (dictionary segmenter)
    pub fn new() -> Result<Self> {
        Self::from_config(Config::default())
    }

    /// Create a parser for `config`.
    ///
    /// The syntax segmenter needs `recordings` to be set; use
    /// [`Parser::with_service`] to supply a live service instead.
    pub fn from_config(config: Config) -> Result<Self> {
        config.validate()?;
        match config.segmenter {
            SegmenterKind::Syntax => {
                let path = config.recordings.clone().ok_or_else(|| {
                    ApiError::Config(
                        "the syntax segmenter needs a service or a recordings file".to_string(),
                    )
                })?;
                let service = RecordedService::from_path(path)?;
                Self::with_service(config, Arc::new(service))
            }
            SegmenterKind::Mecab => {
                Self::with_segmenter(config, Arc::new(MorphologicalSegmenter::mecab()))
            }
            SegmenterKind::Dictionary => {
                Self::with_segmenter(config, Arc::new(DictionarySegmenter::new()))
            }
        }
    }

    /// Create a syntax parser over `service`
    pub fn with_service(config: Config, service: Arc<dyn SyntaxService>) -> Result<Self> {
        if config.segmenter != SegmenterKind::Syntax {
            return Err(ApiError::Config(format!(
                "a syntax service was given but the configured segmenter is {}",
                config.segmenter
            )));
        }
        let segmenter = Arc::new(SyntaxSegmenter::new(service));
        let entities = if config.use_entity {
            Some(segmenter.clone() as Arc<dyn EntityProvider>)
        } else {
            None
        };
        let mut parser = Self::with_segmenter(config, segmenter)?;
        parser.entities = entities;
        Ok(parser)
    }

    /// Create a parser over any segmenter; entity grouping is not available
    pub fn with_segmenter(config: Config, segmenter: Arc<dyn Segmenter>) -> Result<Self> {
        config.validate()?;
        segmenter.check_language(config.language)?;

        let serializer = HtmlSerializer::new(config.attributes())
            .with_max_length(config.max_length)
            .with_break_policy(config.break_policy);
        tracing::debug!(
            segmenter = segmenter.name(),
            language = ?config.language,
            "created parser"
        );
        Ok(Self {
            config,
            segmenter,
            entities: None,
            serializer,
        })
    }

    /// Parse `source` into chunks and markup
    pub fn parse(&self, source: &str) -> Result<ParseOutput> {
        let source = preprocess(source);
        let language = self.config.language;

        let chunks = self.segmenter.segment(&source, language)?;
        chunks.verify_text(&source)?;
        tracing::debug!(chunks = chunks.len(), segmenter = self.segmenter.name(), "segmented");

        let chunks = match &self.entities {
            Some(provider) => {
                let entities = provider.entities(&source, language)?;
                chunks.group_entities(&entities)
            }
            None => chunks,
        };

        let chunks = chunks.resolve_dependencies();
        let html_code = self.serializer.serialize(&chunks);
        Ok(ParseOutput { chunks, html_code })
    }

    /// Parse `source`, reusing and filling `cache`
    pub fn parse_cached(&self, source: &str, cache: &mut dyn ParseCache) -> Result<ParseOutput> {
        let key = self.cache_key(source)?;
        if let Some(output) = cache.get(&key)? {
            tracing::trace!(%key, "parse cache hit");
            return Ok(output);
        }

        let output = self.parse(source)?;
        cache.set(&key, &output)?;
        Ok(output)
    }

    /// Cache key for `source` under this parser's configuration
    pub fn cache_key(&self, source: &str) -> Result<String> {
        let language = self.config.language.map_or("auto", |l| l.code());
        let options = format!(
            "{}:{}",
            self.segmenter.name(),
            serde_json::to_string(&self.config)?
        );
        Ok(cache_key(&preprocess(source), language, &options))
    }

    /// Get the current configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Name of the segmenter in use
    pub fn segmenter_name(&self) -> &'static str {
        self.segmenter.name()
    }
}

impl std::fmt::Debug for Parser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("config", &self.config)
            .field("segmenter", &self.segmenter.name())
            .field("entities", &self.entities.is_some())
            .finish()
    }
}
