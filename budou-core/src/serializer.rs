//! HTML serialization of a finalized chunk sequence.
//!
//! Output is a single root `<span>`. CJK chunks become child `<span>`
//! elements carrying the configured attributes; everything else is appended
//! as text after the most recent element (or as the root's leading text).

use crate::chunk::Chunk;
use crate::sequence::ChunkSequence;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How an explicit break chunk is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakPolicy {
    /// Emit the newline character as text
    #[default]
    Newline,
    /// Emit a `<wbr>` element
    Wbr,
}

/// Renders chunk sequences as escaped markup.
#[derive(Debug, Clone, Default)]
pub struct HtmlSerializer {
    attributes: BTreeMap<String, String>,
    max_length: Option<usize>,
    break_policy: BreakPolicy,
}

impl HtmlSerializer {
    /// Create a serializer decorating wrapped chunks with `attributes`
    pub fn new(attributes: BTreeMap<String, String>) -> Self {
        Self {
            attributes,
            ..Self::default()
        }
    }

    /// Leave CJK chunks longer than `max_length` characters unwrapped
    pub fn with_max_length(mut self, max_length: Option<usize>) -> Self {
        self.max_length = max_length;
        self
    }

    /// Choose how break chunks are rendered
    pub fn with_break_policy(mut self, break_policy: BreakPolicy) -> Self {
        self.break_policy = break_policy;
        self
    }

    /// Attributes applied to each wrapped chunk, sorted by name
    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// Serialize `chunks` to markup.
    pub fn serialize(&self, chunks: &ChunkSequence) -> String {
        let mut root = Fragment::default();
        for chunk in chunks {
            if self.should_wrap(chunk) {
                root.push_element(Element::Span(chunk.word.clone()));
            } else if chunk.is_break() && self.break_policy == BreakPolicy::Wbr {
                root.push_element(Element::Wbr);
            } else {
                root.push_text(&chunk.word);
            }
        }
        tracing::debug!(
            chunks = chunks.len(),
            elements = root.children.len(),
            "serialized chunks"
        );
        root.render(&self.render_attributes())
    }

    fn should_wrap(&self, chunk: &Chunk) -> bool {
        chunk.has_cjk()
            && self
                .max_length
                .map_or(true, |max_length| chunk.char_len() <= max_length)
    }

    fn render_attributes(&self) -> String {
        let mut out = String::new();
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            escape_attribute_into(&mut out, value);
            out.push('"');
        }
        out
    }
}

/// Child element of the root span.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Element {
    Span(String),
    Wbr,
}

#[derive(Debug)]
struct Node {
    element: Element,
    tail: String,
}

/// Root span: leading text plus children, each followed by its tail text.
#[derive(Debug, Default)]
struct Fragment {
    text: String,
    children: Vec<Node>,
}

impl Fragment {
    fn push_text(&mut self, text: &str) {
        match self.children.last_mut() {
            Some(node) => node.tail.push_str(text),
            None => self.text.push_str(text),
        }
    }

    fn push_element(&mut self, element: Element) {
        self.children.push(Node {
            element,
            tail: String::new(),
        });
    }

    fn render(&self, attributes: &str) -> String {
        let mut out = String::from("<span>");
        escape_text_into(&mut out, &self.text);
        for node in &self.children {
            match &node.element {
                Element::Span(word) => {
                    out.push_str("<span");
                    out.push_str(attributes);
                    out.push('>');
                    escape_text_into(&mut out, word);
                    out.push_str("</span>");
                }
                Element::Wbr => out.push_str("<wbr>"),
            }
            escape_text_into(&mut out, &node.tail);
        }
        out.push_str("</span>");
        out
    }
}

fn escape_text_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

fn escape_attribute_into(out: &mut String, value: &str) {
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("&quot;"),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

impl ChunkSequence {
    /// Serialize with `serializer`; shorthand for [`HtmlSerializer::serialize`].
    pub fn html_serialize(&self, serializer: &HtmlSerializer) -> String {
        serializer.serialize(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::Dependency;

    fn foo_class() -> BTreeMap<String, String> {
        BTreeMap::from([("class".to_string(), "foo".to_string())])
    }

    #[test]
    fn test_serialize_mixed_text() {
        let chunks = ChunkSequence::from(vec![
            Chunk::new("Hello"),
            Chunk::space(),
            Chunk::new("今天"),
            Chunk::new("天气"),
            Chunk::new("很好"),
        ]);
        let html = HtmlSerializer::new(foo_class()).serialize(&chunks);
        assert_eq!(
            html,
            "<span>Hello \
             <span class=\"foo\">今天</span>\
             <span class=\"foo\">天气</span>\
             <span class=\"foo\">很好</span>\
             </span>"
        );
    }

    #[test]
    fn test_serialize_escapes_markup() {
        let chunks = ChunkSequence::from(vec![
            Chunk::new("Hey<"),
            Chunk::new("<script>alert(1)</script>"),
            Chunk::new(">guys"),
        ]);
        let html = HtmlSerializer::new(foo_class()).serialize(&chunks);
        assert_eq!(
            html,
            "<span>Hey&lt;&lt;script&gt;alert(1)&lt;/script&gt;&gt;guys</span>"
        );
    }

    #[test]
    fn test_serialize_escapes_inside_wrapped_chunk() {
        let chunks = ChunkSequence::from(vec![Chunk::new("今<b>&")]);
        let html = HtmlSerializer::new(foo_class()).serialize(&chunks);
        assert_eq!(
            html,
            "<span><span class=\"foo\">今&lt;b&gt;&amp;</span></span>"
        );
    }

    #[test]
    fn test_serialize_max_length() {
        let chunks = ChunkSequence::from(vec![
            Chunk::new("去年"),
            Chunk::new("インフルエンザに"),
            Chunk::new("かかった。"),
        ]);
        let html = HtmlSerializer::new(foo_class())
            .with_max_length(Some(6))
            .serialize(&chunks);
        assert_eq!(
            html,
            "<span>\
             <span class=\"foo\">去年</span>\
             インフルエンザに\
             <span class=\"foo\">かかった。</span>\
             </span>"
        );
    }

    #[test]
    fn test_serialize_sorted_and_escaped_attributes() {
        let attributes = BTreeMap::from([
            ("style".to_string(), "a\"b".to_string()),
            ("class".to_string(), "ww".to_string()),
        ]);
        let chunks = ChunkSequence::from(vec![Chunk::new("日本")]);
        let html = HtmlSerializer::new(attributes).serialize(&chunks);
        assert_eq!(
            html,
            "<span><span class=\"ww\" style=\"a&quot;b\">日本</span></span>"
        );
    }

    #[test]
    fn test_serialize_break_policies() {
        let chunks = ChunkSequence::from(vec![
            Chunk::new("これが"),
            Chunk::breakline(),
            Chunk::new("Android"),
        ]);
        let newline = HtmlSerializer::new(foo_class()).serialize(&chunks);
        assert_eq!(
            newline,
            "<span><span class=\"foo\">これが</span>\nAndroid</span>"
        );

        let wbr = HtmlSerializer::new(foo_class())
            .with_break_policy(BreakPolicy::Wbr)
            .serialize(&chunks);
        assert_eq!(
            wbr,
            "<span><span class=\"foo\">これが</span><wbr>Android</span>"
        );
    }

    #[test]
    fn test_serialize_wraps_cjk_chunk_with_space_pos() {
        let chunks = ChunkSequence::from(vec![
            Chunk::new("今日").with_dependency(Some(Dependency::Forward)),
            Chunk::space(),
            Chunk::new("晴れ"),
        ])
        .resolve_dependencies();
        let html = HtmlSerializer::new(foo_class()).serialize(&chunks);
        assert_eq!(
            html,
            "<span><span class=\"foo\">今日</span>\n<span class=\"foo\">晴れ</span></span>"
        );
    }

    #[test]
    fn test_serialize_keeps_separator_spaces_as_text() {
        let chunks = ChunkSequence::from(vec![
            Chunk::new("Google"),
            Chunk::space(),
            Chunk::new("Home"),
        ]);
        let html = HtmlSerializer::new(foo_class()).serialize(&chunks);
        assert_eq!(html, "<span>Google Home</span>");
    }

    #[test]
    fn test_serialize_empty() {
        let html = HtmlSerializer::new(foo_class()).serialize(&ChunkSequence::new());
        assert_eq!(html, "<span></span>");
    }
}
