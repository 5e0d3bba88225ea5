//! Source text normalization before segmentation

use regex::Regex;
use scraper::Html;
use std::sync::LazyLock;

static WHITESPACE_RUN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s\s+").expect("Invalid whitespace regex pattern"));

/// Reduce markup to plain text with normalized whitespace.
///
/// The source is parsed as an HTML fragment and only its text nodes are
/// kept, so tags are dropped, character references are decoded and a `<`
/// that does not open a tag stays as text. Line breaks are then removed,
/// the ends trimmed, and runs of two or more whitespace characters
/// collapsed into one space.
pub fn preprocess(source: &str) -> String {
    let text = fragment_text(source);
    let text: String = text.chars().filter(|&ch| ch != '\n' && ch != '\r').collect();
    WHITESPACE_RUN_PATTERN
        .replace_all(text.trim(), " ")
        .into_owned()
}

fn fragment_text(source: &str) -> String {
    if !source.contains(['<', '&']) {
        return source.to_string();
    }
    let fragment = Html::parse_fragment(source);
    fragment.root_element().text().collect()
}
