//! Lenient HTML fragment tokenizing, block parsing and serialization.
//!
//! The editable root only ever holds paragraphs, checklist items and loose
//! inline content, so this is not a general HTML parser: unknown elements are
//! carried through as inline markup and unbalanced tags never fail.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use super::inline::InlineContent;
use super::types::{Block, ParagraphKind};

pub const CHECKLIST_CLASS: &str = "journal-checklist";
pub const CHECKBOX_CLASS: &str = "journal-checkbox";
pub const CHECKLIST_TEXT_CLASS: &str = "journal-checklist-text";
pub const ASSIST_CLASS: &str = "journal-assist";

/// Line-break placeholder emitted for blocks without content.
pub const PLACEHOLDER: &str = "<br />";

const VOID_ELEMENTS: &[&str] = &["br", "input", "img", "hr", "wbr"];
const BLOCK_ELEMENTS: &[&str] = &[
    "p", "div", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "li", "ul", "ol", "pre",
];

static CLASS_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\sclass\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s/>]+))"#)
        .unwrap_or_else(|err| panic!("class attribute pattern: {err}"))
});
static CHECKED_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\schecked(?:\s|=|/|>)")
        .unwrap_or_else(|err| panic!("checked attribute pattern: {err}"))
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Start tag. `void` is set for void elements and `<x/>` forms.
    Open { name: String, void: bool },
    Close { name: String },
    Text,
    Comment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub raw: &'a str,
    pub span: Range<usize>,
}

impl Token<'_> {
    fn open_name(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Open { name, .. } => Some(name),
            _ => None,
        }
    }

    fn is_void(&self) -> bool {
        matches!(self.kind, TokenKind::Open { void: true, .. })
    }
}

/// Split a fragment into tags, text runs and comments.
///
/// A `<` that doesn't start a tag is kept as text, as is an unterminated tag.
pub fn tokenize(html: &str) -> Vec<Token<'_>> {
    let bytes = html.as_bytes();
    let mut tokens = Vec::new();
    let mut text_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'<' || !starts_tag(&bytes[i + 1..]) {
            i += 1;
            continue;
        }
        let Some(end) = tag_end(html, i) else {
            break;
        };
        if text_start < i {
            tokens.push(Token {
                kind: TokenKind::Text,
                raw: &html[text_start..i],
                span: text_start..i,
            });
        }
        let raw = &html[i..end];
        tokens.push(Token {
            kind: classify_tag(raw),
            raw,
            span: i..end,
        });
        i = end;
        text_start = end;
    }

    if text_start < html.len() {
        tokens.push(Token {
            kind: TokenKind::Text,
            raw: &html[text_start..],
            span: text_start..html.len(),
        });
    }
    tokens
}

fn starts_tag(rest: &[u8]) -> bool {
    match rest.first() {
        Some(b'/') => rest.get(1).is_some_and(u8::is_ascii_alphabetic),
        Some(b'!') => true,
        Some(c) => c.is_ascii_alphabetic(),
        None => false,
    }
}

/// Byte index just past the `>` closing the tag at `start`, honoring quotes.
fn tag_end(html: &str, start: usize) -> Option<usize> {
    if html[start..].starts_with("<!--") {
        return html[start + 4..].find("-->").map(|idx| start + 4 + idx + 3);
    }
    let mut quote: Option<u8> = None;
    for (offset, &b) in html.as_bytes()[start..].iter().enumerate() {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if b == b'"' || b == b'\'' => quote = Some(b),
            None if b == b'>' => return Some(start + offset + 1),
            None => {}
        }
    }
    None
}

fn classify_tag(raw: &str) -> TokenKind {
    if raw.starts_with("<!") {
        return TokenKind::Comment;
    }
    let (closing, body) = raw[1..]
        .strip_prefix('/')
        .map_or((false, &raw[1..]), |rest| (true, rest));
    let name: String = body
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect::<String>()
        .to_ascii_lowercase();
    if closing {
        TokenKind::Close { name }
    } else {
        let void = VOID_ELEMENTS.contains(&name.as_str()) || raw.trim_end_matches('>').ends_with('/');
        TokenKind::Open { name, void }
    }
}

/// Whether a start tag carries `class` among its classes.
pub fn has_class(raw_tag: &str, class: &str) -> bool {
    CLASS_ATTR.captures(raw_tag).is_some_and(|caps| {
        caps.iter()
            .skip(1)
            .flatten()
            .any(|value| value.as_str().split_whitespace().any(|c| c == class))
    })
}

pub fn has_checked_attr(raw_tag: &str) -> bool {
    CHECKED_ATTR.is_match(raw_tag)
}

/// Parse an editable-root fragment into its top-level blocks.
pub fn parse_blocks(html: &str) -> Vec<Block> {
    let tokens = tokenize(html);
    let mut blocks = Vec::new();
    let mut bare_start: Option<usize> = None;
    let mut i = 0;

    while i < tokens.len() {
        let token = &tokens[i];
        let block_name = token
            .open_name()
            .filter(|name| !token.is_void() && BLOCK_ELEMENTS.contains(name));
        let Some(name) = block_name else {
            if bare_start.is_none() && !matches!(token.kind, TokenKind::Comment) {
                bare_start = Some(token.span.start);
            }
            i += 1;
            continue;
        };

        if let Some(start) = bare_start.take() {
            push_bare(&mut blocks, &html[start..token.span.start]);
        }

        let close_idx = matching_close(&tokens, i);
        let inner_end = close_idx.map_or(html.len(), |idx| tokens[idx].span.start);
        let inner = &html[token.span.end..inner_end];
        blocks.push(block_from_element(name, token.raw, inner));
        i = close_idx.map_or(tokens.len(), |idx| idx + 1);
    }

    if let Some(start) = bare_start {
        push_bare(&mut blocks, &html[start..]);
    }
    blocks
}

fn push_bare(blocks: &mut Vec<Block>, raw: &str) {
    if raw.trim().is_empty() {
        return;
    }
    blocks.push(Block::Paragraph {
        kind: ParagraphKind::Bare,
        html: canonical_inline(raw),
    });
}

/// Index of the close tag balancing the open tag at `open_idx`.
fn matching_close(tokens: &[Token<'_>], open_idx: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, token) in tokens.iter().enumerate().skip(open_idx) {
        match &token.kind {
            TokenKind::Open { void: false, .. } => depth += 1,
            TokenKind::Close { .. } => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

fn block_from_element(name: &str, open_raw: &str, inner: &str) -> Block {
    if name == "div" && has_class(open_raw, CHECKLIST_CLASS) {
        return checklist_from_inner(inner);
    }
    let kind = if has_class(open_raw, ASSIST_CLASS) {
        ParagraphKind::Assist
    } else {
        ParagraphKind::Standard
    };
    Block::Paragraph {
        kind,
        html: canonical_inline(inner),
    }
}

fn checklist_from_inner(inner: &str) -> Block {
    let tokens = tokenize(inner);
    let checked = tokens
        .iter()
        .any(|t| t.open_name() == Some("input") && has_checked_attr(t.raw));

    let text_span = tokens
        .iter()
        .position(|t| t.open_name() == Some("span") && has_class(t.raw, CHECKLIST_TEXT_CLASS));
    let html = match text_span {
        Some(idx) => {
            let end = matching_close(&tokens, idx).map_or(inner.len(), |c| tokens[c].span.start);
            canonical_inline(&inner[tokens[idx].span.end..end])
        }
        None => {
            let without_input: String = tokens
                .iter()
                .filter(|t| t.open_name() != Some("input"))
                .map(|t| t.raw)
                .collect();
            canonical_inline(&without_input)
        }
    };
    Block::ChecklistItem { checked, html }
}

/// Re-render inline markup so that a lone placeholder becomes empty and
/// stray `<`/`&` characters are escaped.
pub fn canonical_inline(raw: &str) -> String {
    let content = InlineContent::parse(raw);
    if content.is_placeholder() {
        String::new()
    } else {
        content.render()
    }
}

/// Serialize blocks back into the editable-root fragment.
pub fn serialize_blocks(blocks: &[Block]) -> String {
    let mut out = String::new();
    for block in blocks {
        write_block(&mut out, block);
    }
    out
}

fn write_block(out: &mut String, block: &Block) {
    match block {
        Block::Paragraph {
            kind: ParagraphKind::Standard,
            html,
        } => {
            out.push_str("<p>");
            out.push_str(or_placeholder(html));
            out.push_str("</p>");
        }
        Block::Paragraph {
            kind: ParagraphKind::Assist,
            html,
        } => {
            out.push_str("<p class=\"");
            out.push_str(ASSIST_CLASS);
            out.push_str("\">");
            out.push_str(or_placeholder(html));
            out.push_str("</p>");
        }
        Block::Paragraph {
            kind: ParagraphKind::Bare,
            html,
        } => out.push_str(html),
        Block::ChecklistItem { checked, html } => {
            out.push_str(&format!(
                "<div class=\"{CHECKLIST_CLASS}\"><input type=\"checkbox\" class=\"{CHECKBOX_CLASS}\"{} /><span class=\"{CHECKLIST_TEXT_CLASS}\">",
                if *checked { " checked" } else { "" }
            ));
            out.push_str(or_placeholder(html));
            out.push_str("</span></div>");
        }
    }
}

fn or_placeholder(html: &str) -> &str {
    if html.is_empty() { PLACEHOLDER } else { html }
}
