//! 预览标签：从块数据里取出标签字段，必要时剥离 HTML。

use std::cell::RefCell;
use std::ops::Range;

use serde_json::Value;
use tree_sitter::{Node, Parser};

use crate::models::{Block, BlockTypeDefinition};

/// Tags that separate words when rendered, so `<p>a</p><p>b</p>` reads as `a b`.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav",
    "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

thread_local! {
    static HTML_PARSER: RefCell<Option<Parser>> = RefCell::new(html_parser());
}

fn html_parser() -> Option<Parser> {
    let mut parser = Parser::new();
    parser.set_language(tree_sitter_html::language()).ok()?;
    Some(parser)
}

/// The preview label of `block`, or `None` when there is nothing worth showing.
pub fn derive_label(block: &Block, definition: Option<&BlockTypeDefinition>) -> Option<String> {
    let raw = label_source(block, definition)?;
    plain_label(&raw)
}

/// The raw label value as text. Falsy values (`null`, `false`, `0`, `""`) and containers yield
/// `None`.
pub fn label_source(block: &Block, definition: Option<&BlockTypeDefinition>) -> Option<String> {
    let field = definition?.label_field.as_deref()?;
    match block.field(field)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64().is_some_and(|v| v != 0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

pub fn looks_like_markup(text: &str) -> bool {
    text.contains('<')
}

/// Plain values are shown verbatim; markup that renders to nothing yields no label.
fn plain_label(raw: &str) -> Option<String> {
    if !looks_like_markup(raw) {
        return Some(raw.to_string());
    }
    let text = extract_plain_text(raw);
    (!text.is_empty()).then_some(text)
}

/// Rendered text of an HTML fragment: tags, comments, scripts and styles dropped, entities
/// decoded, whitespace collapsed. A `<` that cannot open a tag stays text, as in a browser.
/// Never fails; a parse with errors falls back to a tag strip.
pub fn extract_plain_text(markup: &str) -> String {
    let source = escape_stray_delimiters(markup);
    let parsed = HTML_PARSER.with(|cell| {
        let mut parser = cell.borrow_mut();
        let tree = parser.as_mut()?.parse(&source, None)?;
        let root = tree.root_node();
        if root.has_error() {
            return None;
        }
        let mut segments = Vec::new();
        collect_segments(root, &source, &mut segments);
        Some(join_segments(&source, &segments))
    });
    let text = parsed.unwrap_or_else(|| strip_tags(&source));
    collapse_whitespace(&decode_entities(&text))
}

/// HTML tokenizer rule: `<` opens a tag only before an ASCII letter, `/`, `!` or `?`.
fn opens_tag(after: &str) -> bool {
    after
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || matches!(c, '/' | '!' | '?'))
}

fn starts_entity(after: &str) -> bool {
    let Some(end) = after.find(';').filter(|&end| (1..=9).contains(&end)) else {
        return false;
    };
    after[..end]
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '#')
}

/// Rewrites text-level `<`, `>` and bare `&` as entities so the parser sees them as text.
/// Tags and comments pass through untouched.
fn escape_stray_delimiters(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len() + 8);
    let mut rest = markup;
    while let Some(ch) = rest.chars().next() {
        let copy_until = match ch {
            '<' if rest.starts_with("<!--") => {
                Some(rest.find("-->").map_or(rest.len(), |i| i + 3))
            }
            '<' if opens_tag(&rest[1..]) => Some(rest.find('>').map_or(rest.len(), |i| i + 1)),
            _ => None,
        };
        if let Some(end) = copy_until {
            out.push_str(&rest[..end]);
            rest = &rest[end..];
            continue;
        }
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' if !starts_entity(&rest[1..]) => out.push_str("&amp;"),
            c => out.push(c),
        }
        rest = &rest[ch.len_utf8()..];
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(Range<usize>),
    Break,
}

fn collect_segments(node: Node<'_>, src: &str, out: &mut Vec<Segment>) {
    match node.kind() {
        "text" | "entity" => out.push(Segment::Text(node.byte_range())),
        "comment" | "doctype" | "script_element" | "style_element" | "raw_text" => {}
        "start_tag" | "end_tag" | "self_closing_tag" => {
            let name = (0..node.child_count())
                .filter_map(|i| node.child(i))
                .find(|c| c.kind() == "tag_name")
                .and_then(|c| src.get(c.byte_range()))
                .map(str::to_ascii_lowercase);
            if name.is_some_and(|n| BLOCK_TAGS.contains(&n.as_str())) {
                out.push(Segment::Break);
            }
        }
        _ => {
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                collect_segments(child, src, out);
            }
        }
    }
}

fn join_segments(src: &str, segments: &[Segment]) -> String {
    let mut out = String::new();
    let mut last_end: Option<usize> = None;
    let mut pending_break = false;
    for segment in segments {
        match segment {
            Segment::Break => pending_break = true,
            Segment::Text(range) => {
                let Some(text) = src.get(range.clone()) else {
                    continue;
                };
                let gap = last_end
                    .and_then(|end| src.get(end..range.start))
                    .is_some_and(gap_has_space);
                if !out.is_empty() && (pending_break || gap) {
                    out.push(' ');
                }
                out.push_str(text);
                last_end = Some(range.end);
                pending_break = false;
            }
        }
    }
    out
}

/// Whitespace between two text nodes that sits outside any tag.
fn gap_has_space(gap: &str) -> bool {
    let mut in_tag = false;
    for ch in gap.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag && c.is_whitespace() => return true,
            _ => {}
        }
    }
    false
}

fn strip_tags(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut in_tag = false;
    for ch in markup.chars() {
        match ch {
            '<' => {
                in_tag = true;
                out.push(' ');
            }
            '>' if in_tag => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let decoded = tail
            .find(';')
            .filter(|&end| end <= 10)
            .and_then(|end| decode_entity(&tail[1..end]).map(|c| (c, end)));
        match decoded {
            Some((ch, end)) => {
                out.push(ch);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse().ok()?,
        };
        return char::from_u32(code);
    }
    let ch = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        "hellip" => '…',
        "mdash" => '—',
        "ndash" => '–',
        "laquo" => '«',
        "raquo" => '»',
        "copy" => '©',
        _ => return None,
    };
    Some(ch)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Memoizes the label against the raw label value, so unchanged data is not re-parsed.
#[derive(Debug, Default)]
pub struct LabelCache {
    key: Option<String>,
    label: Option<String>,
    extractions: usize,
}

impl LabelCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn derive(
        &mut self,
        block: &Block,
        definition: Option<&BlockTypeDefinition>,
    ) -> Option<String> {
        let Some(raw) = label_source(block, definition) else {
            self.key = None;
            self.label = None;
            return None;
        };
        if self.key.as_deref() == Some(raw.as_str()) {
            return self.label.clone();
        }
        if looks_like_markup(&raw) {
            self.extractions += 1;
        }
        self.label = plain_label(&raw);
        self.key = Some(raw);
        self.label.clone()
    }

    /// Number of markup extractions performed so far.
    pub fn extractions(&self) -> usize {
        self.extractions
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/views/sidebar/label.rs"]
mod tests;
