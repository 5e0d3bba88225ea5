//! Segmentation from a morphological analyzer (MeCab with IPAdic)

use super::{Aligner, Segmenter};
use crate::error::{EngineError, Result};
use crate::language::Language;
use crate::tables::{tables_for, MorphologyTable};
use budou_core::{Chunk, ChunkSequence, Dependency, Pos};
use std::io::Write;
use std::process::{Command, Stdio};
use std::sync::Arc;

/// One row of analyzer output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MorphToken {
    pub surface: String,
    /// Top-level part-of-speech category
    pub pos: String,
    /// First POS sub-category, if any
    pub label: Option<String>,
}

/// Boundary to a morphological analyzer
pub trait MorphAnalyzer: Send + Sync {
    fn analyze(&self, text: &str) -> Result<Vec<MorphToken>>;
}

/// Parse ChaSen-format analyzer output.
///
/// Each row is `surface \t reading \t base \t POS[-sub...] \t ...`; parsing
/// stops at the first `EOS` row.
pub fn parse_chasen(output: &str) -> Result<Vec<MorphToken>> {
    let mut tokens = Vec::new();
    for (line_no, row) in output.lines().enumerate() {
        if row == "EOS" {
            break;
        }
        if row.is_empty() {
            continue;
        }

        let fields: Vec<&str> = row.split('\t').collect();
        let Some(pos_field) = fields.get(3) else {
            return Err(EngineError::Analyzer(format!(
                "malformed row {}: expected at least 4 tab-separated fields, got {}",
                line_no + 1,
                fields.len()
            )));
        };

        let mut categories = pos_field.split('-');
        let pos = categories.next().unwrap_or_default().to_string();
        let label = categories.next().map(str::to_string);
        tokens.push(MorphToken {
            surface: fields[0].to_string(),
            pos,
            label,
        });
    }
    Ok(tokens)
}

/// Runs the external `mecab` binary in ChaSen output mode
#[derive(Debug, Clone)]
pub struct MecabCommand {
    program: String,
    args: Vec<String>,
}

impl Default for MecabCommand {
    fn default() -> Self {
        Self {
            program: "mecab".to_string(),
            args: vec!["-Ochasen".to_string()],
        }
    }
}

impl MecabCommand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different executable, e.g. an absolute path
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Append an argument, e.g. `-d /path/to/dic`
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

impl MorphAnalyzer for MecabCommand {
    fn analyze(&self, text: &str) -> Result<Vec<MorphToken>> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| EngineError::Analyzer(format!("failed to spawn {}: {e}", self.program)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes())?;
            stdin.write_all(b"\n")?;
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(EngineError::Analyzer(format!(
                "{} exited with {:?}: {}",
                self.program,
                output.status.code(),
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8(output.stdout)
            .map_err(|e| EngineError::Analyzer(format!("analyzer output is not UTF-8: {e}")))?;
        parse_chasen(&stdout)
    }
}

/// Japanese segmenter over a [`MorphAnalyzer`]
#[derive(Clone)]
pub struct MorphologicalSegmenter {
    analyzer: Arc<dyn MorphAnalyzer>,
}

impl MorphologicalSegmenter {
    pub fn new(analyzer: Arc<dyn MorphAnalyzer>) -> Self {
        Self { analyzer }
    }

    /// Segmenter running the `mecab` binary from `PATH`
    pub fn mecab() -> Self {
        Self::new(Arc::new(MecabCommand::new()))
    }
}

impl std::fmt::Debug for MorphologicalSegmenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MorphologicalSegmenter").finish_non_exhaustive()
    }
}

fn morph_dependency(table: &MorphologyTable, token: &MorphToken) -> Option<Dependency> {
    let label = token.label.as_deref().unwrap_or_default();
    if table.forward_pos.contains(&token.pos) {
        Some(Dependency::Forward)
    } else if table.backward_pos.contains(&token.pos) {
        Some(Dependency::Backward)
    } else if table.forward_labels.contains(label) {
        Some(Dependency::Forward)
    } else if table.backward_labels.contains(label) {
        Some(Dependency::Backward)
    } else {
        None
    }
}

impl Segmenter for MorphologicalSegmenter {
    fn name(&self) -> &'static str {
        "mecab"
    }

    fn supported_languages(&self) -> &[Language] {
        &[Language::Japanese]
    }

    fn segment(&self, text: &str, language: Option<Language>) -> Result<ChunkSequence> {
        self.check_language(language)?;
        if text.is_empty() {
            return Ok(ChunkSequence::new());
        }

        let table = &tables_for(Language::Japanese)?.morphology;
        let mut aligner = Aligner::new(text);
        for token in self.analyzer.analyze(text)? {
            let dependency = morph_dependency(table, &token);
            let chunk = Chunk::token(token.surface, Some(Pos::from(token.pos)), token.label)
                .with_token_dependency(dependency);
            aligner.push(chunk, None)?;
        }

        let chunks = aligner.finish()?;
        tracing::debug!(chunks = chunks.len(), "segmented text with morphological analyzer");
        Ok(chunks)
    }
}
