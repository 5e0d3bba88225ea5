//! Rule-based Japanese tokenizer
//!
//! Text is split wherever the script class changes (kanji, hiragana,
//! katakana, alphabet, digits), and every symbol is its own token. Hiragana
//! runs are further split on the longest particle or auxiliary-verb match
//! from the dictionary table. Dictionary words attach backward, as do single
//! hiragana characters and okurigana following kanji.

use super::{Aligner, Segmenter};
use crate::error::Result;
use crate::language::Language;
use crate::tables::{tables_for, DictionaryTable};
use budou_core::{Chunk, ChunkSequence, Dependency};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Script {
    Kanji,
    Hiragana,
    Katakana,
    Alphabet,
    Digit,
    Space,
    Symbol,
}

impl Script {
    fn of(ch: char) -> Self {
        match ch {
            '々' | '〆' | '〇' => Script::Kanji,
            '\u{3041}'..='\u{309F}' => Script::Hiragana,
            '・' => Script::Symbol,
            '\u{30A0}'..='\u{30FF}' | '\u{31F0}'..='\u{31FF}' | '\u{FF66}'..='\u{FF9F}' => {
                Script::Katakana
            }
            '\u{3400}'..='\u{4DBF}' | '\u{4E00}'..='\u{9FFF}' | '\u{F900}'..='\u{FAFF}' => {
                Script::Kanji
            }
            c if c.is_whitespace() => Script::Space,
            c if c.is_numeric() => Script::Digit,
            c if c.is_alphanumeric() => Script::Alphabet,
            _ => Script::Symbol,
        }
    }
}

/// Japanese segmenter needing no external analyzer
#[derive(Debug, Clone, Copy, Default)]
pub struct DictionarySegmenter;

impl DictionarySegmenter {
    pub fn new() -> Self {
        Self
    }
}

impl Segmenter for DictionarySegmenter {
    fn name(&self) -> &'static str {
        "dictionary"
    }

    fn supported_languages(&self) -> &[Language] {
        &[Language::Japanese]
    }

    fn segment(&self, text: &str, language: Option<Language>) -> Result<ChunkSequence> {
        self.check_language(language)?;

        let dictionary = &tables_for(Language::Japanese)?.dictionary;
        let mut aligner = Aligner::new(text);
        for chunk in tokenize(text, dictionary) {
            aligner.push(chunk, None)?;
        }

        let chunks = aligner.finish()?;
        tracing::debug!(chunks = chunks.len(), "segmented text with dictionary tokenizer");
        Ok(chunks)
    }
}

/// Consecutive characters of one script class; symbols never group
fn script_runs(text: &str) -> Vec<(Script, String)> {
    let mut runs: Vec<(Script, String)> = Vec::new();
    for ch in text.chars() {
        let script = Script::of(ch);
        match runs.last_mut() {
            Some((last, run)) if *last == script && script != Script::Symbol => run.push(ch),
            _ => runs.push((script, ch.to_string())),
        }
    }
    runs
}

fn tokenize(text: &str, dictionary: &DictionaryTable) -> Vec<Chunk> {
    let mut tokens = Vec::new();
    let mut previous = None;
    for (script, run) in script_runs(text) {
        match script {
            Script::Space => {}
            Script::Hiragana => {
                let after_kanji = previous == Some(Script::Kanji);
                split_hiragana(&run, after_kanji, dictionary, &mut tokens);
            }
            _ => tokens.push(Chunk::new(run).with_token_dependency(None)),
        }
        previous = Some(script);
    }
    tokens
}

fn split_hiragana(
    run: &str,
    after_kanji: bool,
    dictionary: &DictionaryTable,
    out: &mut Vec<Chunk>,
) {
    let chars: Vec<char> = run.chars().collect();
    let max_len = dictionary.max_word_len();
    let mut pending = String::new();
    let mut at_run_start = true;

    let mut i = 0;
    while i < chars.len() {
        let longest = (1..=max_len.min(chars.len() - i)).rev().find_map(|len| {
            let word: String = chars[i..i + len].iter().collect();
            dictionary.contains(&word).then_some((word, len))
        });

        match longest {
            Some((word, len)) => {
                flush_pending(&mut pending, at_run_start && after_kanji, out);
                let tag = if dictionary.particles.contains(&word) {
                    "PRT"
                } else {
                    "AUX"
                };
                out.push(
                    Chunk::new(word)
                        .with_pos(tag)
                        .with_dependency(Some(Dependency::Backward)),
                );
                at_run_start = false;
                i += len;
            }
            None => {
                pending.push(chars[i]);
                i += 1;
            }
        }
    }
    flush_pending(&mut pending, at_run_start && after_kanji, out);
}

/// Emit the unmatched hiragana collected so far
fn flush_pending(pending: &mut String, okurigana: bool, out: &mut Vec<Chunk>) {
    if pending.is_empty() {
        return;
    }
    let word = std::mem::take(pending);
    let attaches = okurigana || word.chars().count() == 1;
    out.push(Chunk::new(word).with_dependency(attaches.then_some(Dependency::Backward)));
}
