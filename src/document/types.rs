use super::html::{parse_blocks, serialize_blocks};
use super::inline::InlineContent;

/// How a paragraph block is wrapped in the editable root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphKind {
    /// A `<p>` element.
    Standard,
    /// The assist prompt paragraph (`<p class="journal-assist">`).
    Assist,
    /// Inline content sitting directly in the root with no wrapping element,
    /// as produced by normalizing plain text.
    Bare,
}

/// A top-level unit of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph { kind: ParagraphKind, html: String },
    ChecklistItem { checked: bool, html: String },
}

impl Block {
    pub fn paragraph(html: impl Into<String>) -> Self {
        Self::Paragraph {
            kind: ParagraphKind::Standard,
            html: html.into(),
        }
    }

    pub fn bare(html: impl Into<String>) -> Self {
        Self::Paragraph {
            kind: ParagraphKind::Bare,
            html: html.into(),
        }
    }

    pub fn assist(html: impl Into<String>) -> Self {
        Self::Paragraph {
            kind: ParagraphKind::Assist,
            html: html.into(),
        }
    }

    pub fn checklist(checked: bool, html: impl Into<String>) -> Self {
        Self::ChecklistItem {
            checked,
            html: html.into(),
        }
    }

    /// Inner markup of the block (the text span for checklist items).
    pub fn html(&self) -> &str {
        match self {
            Self::Paragraph { html, .. } | Self::ChecklistItem { html, .. } => html,
        }
    }

    pub fn content(&self) -> InlineContent {
        InlineContent::parse(self.html())
    }

    pub fn set_content(&mut self, content: &InlineContent) {
        let rendered = if content.is_placeholder() {
            String::new()
        } else {
            content.render()
        };
        match self {
            Self::Paragraph { html, .. } | Self::ChecklistItem { html, .. } => *html = rendered,
        }
    }

    /// Number of caret positions past the start (items in the inline content).
    pub fn text_len(&self) -> usize {
        self.content().len()
    }

    pub fn text(&self) -> String {
        self.content().text()
    }

    pub const fn is_checklist(&self) -> bool {
        matches!(self, Self::ChecklistItem { .. })
    }

    pub const fn is_bare(&self) -> bool {
        matches!(
            self,
            Self::Paragraph {
                kind: ParagraphKind::Bare,
                ..
            }
        )
    }

    /// Block created when Enter splits this one: paragraphs keep a `<p>`,
    /// checklist items stay checklist items.
    pub(crate) fn continuation(&self, html: String) -> Self {
        match self {
            Self::Paragraph { .. } => Self::paragraph(html),
            Self::ChecklistItem { .. } => Self::checklist(false, html),
        }
    }
}

/// The editable document: an ordered sequence of top-level blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    pub const fn empty() -> Self {
        Self { blocks: Vec::new() }
    }

    pub const fn from_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Parse a serialized editable-root fragment.
    pub fn from_html(html: &str) -> Self {
        let _scope = crate::perf::scope("document.from_html");
        Self {
            blocks: parse_blocks(html),
        }
    }

    /// Serialize to the canonical HTML representation.
    pub fn to_html(&self) -> String {
        serialize_blocks(&self.blocks)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub(crate) fn blocks_mut(&mut self) -> &mut Vec<Block> {
        &mut self.blocks
    }

    pub fn block(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn checklist_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_checklist()).count()
    }

    /// Decoded text of every block, one block per line.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(Block::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
