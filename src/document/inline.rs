//! Inline markup as a flat sequence of items.
//!
//! Every visible character and every void element (`<br />`) is one item, and
//! each item records the stack of inline elements enclosing it. Caret offsets
//! count items. Rendering re-derives the nesting from consecutive stacks, so
//! slicing, merging and restyling never produce unbalanced markup.

use std::ops::Range;

use super::html::{TokenKind, tokenize};

/// An open inline element: lowercase name plus the raw start tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineTag {
    pub name: String,
    pub open: String,
}

impl InlineTag {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            open: format!("<{name}>"),
        }
    }

    fn close(&self) -> String {
        format!("</{}>", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKind {
    /// A single character, stored escaped (`&amp;` is one item).
    Char(String),
    /// A void element such as `<br />`.
    Void { name: String, raw: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineItem {
    pub kind: ItemKind,
    pub stack: Vec<InlineTag>,
}

impl InlineItem {
    fn raw(&self) -> &str {
        match &self.kind {
            ItemKind::Char(raw) | ItemKind::Void { raw, .. } => raw,
        }
    }

    fn has_any(&self, names: &[&str]) -> bool {
        self.stack.iter().any(|tag| names.contains(&tag.name.as_str()))
    }

    pub fn is_line_break(&self) -> bool {
        matches!(&self.kind, ItemKind::Void { name, .. } if name == "br")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineContent {
    items: Vec<InlineItem>,
}

impl InlineContent {
    pub fn parse(html: &str) -> Self {
        let mut items = Vec::new();
        let mut stack: Vec<InlineTag> = Vec::new();

        for token in tokenize(html) {
            match token.kind {
                TokenKind::Open { name, void: true } => items.push(InlineItem {
                    kind: ItemKind::Void {
                        name,
                        raw: token.raw.to_string(),
                    },
                    stack: stack.clone(),
                }),
                TokenKind::Open { name, void: false } => stack.push(InlineTag {
                    name,
                    open: token.raw.to_string(),
                }),
                TokenKind::Close { name } => {
                    if let Some(pos) = stack.iter().rposition(|tag| tag.name == name) {
                        stack.truncate(pos);
                    }
                }
                TokenKind::Text => {
                    for raw in split_text(token.raw) {
                        items.push(InlineItem {
                            kind: ItemKind::Char(raw),
                            stack: stack.clone(),
                        });
                    }
                }
                TokenKind::Comment => {}
            }
        }
        Self { items }
    }

    /// Build unstyled content from plain text; `\n` becomes `<br />`.
    pub fn from_text(text: &str, stack: &[InlineTag]) -> Self {
        let items = text
            .chars()
            .filter(|c| *c != '\r')
            .map(|c| InlineItem {
                kind: if c == '\n' {
                    line_break_kind()
                } else {
                    ItemKind::Char(escape_char(c))
                },
                stack: stack.to_vec(),
            })
            .collect();
        Self { items }
    }

    pub fn line_break(stack: &[InlineTag]) -> Self {
        Self {
            items: vec![InlineItem {
                kind: line_break_kind(),
                stack: stack.to_vec(),
            }],
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let mut open: Vec<&InlineTag> = Vec::new();
        for item in &self.items {
            let common = open
                .iter()
                .zip(&item.stack)
                .take_while(|(a, b)| **a == *b)
                .count();
            for tag in open[common..].iter().rev() {
                out.push_str(&tag.close());
            }
            open.truncate(common);
            for tag in &item.stack[common..] {
                out.push_str(&tag.open);
                open.push(tag);
            }
            out.push_str(item.raw());
        }
        for tag in open.iter().rev() {
            out.push_str(&tag.close());
        }
        out
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[InlineItem] {
        &self.items
    }

    /// A lone `<br>` is how an empty block is displayed.
    pub fn is_placeholder(&self) -> bool {
        self.items.is_empty() || (self.items.len() == 1 && self.items[0].is_line_break())
    }

    /// Decoded text content; line breaks become `\n`.
    pub fn text(&self) -> String {
        self.items
            .iter()
            .map(|item| match &item.kind {
                ItemKind::Char(raw) => decode_entity(raw),
                ItemKind::Void { name, .. } if name == "br" => "\n".to_string(),
                ItemKind::Void { .. } => String::new(),
            })
            .collect()
    }

    /// Stack newly typed text at `offset` inherits.
    pub fn stack_at(&self, offset: usize) -> Vec<InlineTag> {
        let offset = offset.min(self.items.len());
        offset
            .checked_sub(1)
            .and_then(|idx| self.items.get(idx))
            .or_else(|| self.items.get(offset))
            .map(|item| item.stack.clone())
            .unwrap_or_default()
    }

    pub fn insert(&mut self, offset: usize, other: Self) {
        let offset = offset.min(self.items.len());
        self.items.splice(offset..offset, other.items);
    }

    pub fn append(&mut self, mut other: Self) {
        self.items.append(&mut other.items);
    }

    pub fn split_off(&mut self, offset: usize) -> Self {
        let offset = offset.min(self.items.len());
        Self {
            items: self.items.split_off(offset),
        }
    }

    pub fn remove(&mut self, range: Range<usize>) {
        let range = self.clamp(range);
        self.items.drain(range);
    }

    /// True when the range is non-empty and every item in it sits inside
    /// one of the named elements.
    pub fn all_within(&self, range: Range<usize>, names: &[&str]) -> bool {
        let range = self.clamp(range);
        !range.is_empty() && self.items[range].iter().all(|item| item.has_any(names))
    }

    /// Wrap the range in `tag`, skipping items already inside an element of
    /// the same family.
    pub fn wrap(&mut self, range: Range<usize>, tag: &InlineTag, family: &[&str]) {
        let range = self.clamp(range);
        for item in &mut self.items[range] {
            if !item.has_any(family) {
                item.stack.push(tag.clone());
            }
        }
    }

    /// Remove every element of the family from the range.
    pub fn unwrap(&mut self, range: Range<usize>, family: &[&str]) {
        let range = self.clamp(range);
        for item in &mut self.items[range] {
            item.stack.retain(|tag| !family.contains(&tag.name.as_str()));
        }
    }

    fn clamp(&self, range: Range<usize>) -> Range<usize> {
        let end = range.end.min(self.items.len());
        range.start.min(end)..end
    }
}

fn line_break_kind() -> ItemKind {
    ItemKind::Void {
        name: "br".to_string(),
        raw: "<br />".to_string(),
    }
}

/// Split a raw text run into escaped one-character items.
fn split_text(raw: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut rest = raw;
    while let Some(c) = rest.chars().next() {
        if c == '&' {
            if let Some(len) = entity_len(rest) {
                out.push(rest[..len].to_string());
                rest = &rest[len..];
                continue;
            }
        }
        out.push(escape_char(c));
        rest = &rest[c.len_utf8()..];
    }
    out
}

/// Length of a character reference (`&name;`, `&#10;`, `&#x1F;`) at the
/// start of `s`.
pub fn entity_len(s: &str) -> Option<usize> {
    let body = s.strip_prefix('&')?;
    let end = body.find(';')?;
    if end == 0 || end > 10 {
        return None;
    }
    let name = &body[..end];
    let valid = if let Some(num) = name.strip_prefix('#') {
        if let Some(hex) = num.strip_prefix(['x', 'X']) {
            !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit())
        } else {
            !num.is_empty() && num.chars().all(|c| c.is_ascii_digit())
        }
    } else {
        name.chars().all(|c| c.is_ascii_alphanumeric())
    };
    valid.then_some(end + 2)
}

pub fn escape_char(c: char) -> String {
    match c {
        '&' => "&amp;".to_string(),
        '<' => "&lt;".to_string(),
        '>' => "&gt;".to_string(),
        _ => c.to_string(),
    }
}

pub fn decode_entity(raw: &str) -> String {
    let Some(name) = raw.strip_prefix('&').and_then(|r| r.strip_suffix(';')) else {
        return raw.to_string();
    };
    let decoded = match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" | "#39" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => name.strip_prefix('#').and_then(|num| {
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse().ok()?,
            };
            char::from_u32(code)
        }),
    };
    decoded.map_or_else(|| raw.to_string(), String::from)
}
