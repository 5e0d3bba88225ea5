//! Memoization of parse results
//!
//! A cache is handed to [`crate::Parser::parse_cached`] by the caller. It
//! only stores finished outputs under a key derived from the normalized
//! source and the parser configuration, so parsing with or without a cache
//! yields the same result.

use crate::dto::ParseOutput;
use crate::error::{ApiError, Result};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

const KEY_SALT: &str = "budou-parse-v1";

/// Storage for parse outputs
pub trait ParseCache {
    /// Stored output for `key`, if any
    fn get(&self, key: &str) -> Result<Option<ParseOutput>>;

    /// Store `value` under `key`
    fn set(&mut self, key: &str, value: &ParseOutput) -> Result<()>;
}

/// Hex SHA-256 of the salted `source:language:options` string
pub fn cache_key(source: &str, language: &str, options: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(KEY_SALT.as_bytes());
    hasher.update(b":");
    hasher.update(source.as_bytes());
    hasher.update(b":");
    hasher.update(language.as_bytes());
    hasher.update(b":");
    hasher.update(options.as_bytes());
    hex::encode(hasher.finalize())
}

/// In-process cache living as long as the value
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    entries: HashMap<String, ParseOutput>,
}

impl MemoryCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored outputs
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ParseCache for MemoryCache {
    fn get(&self, key: &str) -> Result<Option<ParseOutput>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &ParseOutput) -> Result<()> {
        self.entries.insert(key.to_string(), value.clone());
        Ok(())
    }
}

/// Cache persisted as a JSON object in one file, rewritten on every set
#[derive(Debug, Clone)]
pub struct FileCache {
    path: PathBuf,
    entries: HashMap<String, ParseOutput>,
}

impl FileCache {
    /// Open the cache at `path`, starting empty if the file does not exist
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries: HashMap<String, ParseOutput> = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str(&content).map_err(|e| {
                ApiError::Cache(format!("corrupt cache file {}: {e}", path.display()))
            })?
        } else {
            HashMap::new()
        };
        tracing::debug!(path = %path.display(), entries = entries.len(), "opened file cache");
        Ok(Self { path, entries })
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of stored outputs
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn persist(&self) -> Result<()> {
        let content = serde_json::to_string(&self.entries)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl ParseCache for FileCache {
    fn get(&self, key: &str) -> Result<Option<ParseOutput>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &ParseOutput) -> Result<()> {
        self.entries.insert(key.to_string(), value.clone());
        self.persist()
    }
}
