//! Public API for Budou CJK line-break markup
//!
//! Budou keeps semantic chunks of Chinese, Japanese and Korean text together
//! by wrapping each chunk in a `<span>` that should not be broken inside.
//!
//! ```rust
//! use budou_api::{Config, Parser};
//!
//! let parser = Parser::from_config(Config::builder().classname("w").build()?)?;
//! let output = parser.parse("今日は晴れ。")?;
//! assert_eq!(
//!     output.html_code,
//!     "<span><span class=\"w\">今日は</span><span class=\"w\">晴れ。</span></span>"
//! );
//! # Ok::<(), budou_api::ApiError>(())
//! ```

#![warn(missing_docs)]

pub mod cache;
pub mod config;
pub mod dto;
pub mod error;
pub mod parser;
pub mod preprocess;

// Re-export key types
pub use budou_core::{BreakPolicy, Chunk, ChunkSequence, ChunkSummary, Dependency, Entity};
pub use budou_engine::{Language, RecordedService, SyntaxService};
pub use cache::{FileCache, MemoryCache, ParseCache};
pub use config::{Config, ConfigBuilder, SegmenterKind, DEFAULT_CLASS_NAME};
pub use dto::{ParseOutput, ParseReport};
pub use error::{ApiError, Result};
pub use parser::Parser;
pub use preprocess::preprocess;

// Convenience functions

/// Parse text with the default configuration
pub fn parse(source: &str) -> Result<ParseOutput> {
    Parser::new()?.parse(source)
}

/// Parse text with a configuration loaded from a TOML file
pub fn parse_with_config_file<P: AsRef<std::path::Path>>(
    source: &str,
    path: P,
) -> Result<ParseOutput> {
    let config = Config::from_toml_file(path)?;
    Parser::from_config(config)?.parse(source)
}
