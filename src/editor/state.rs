use crate::document::{Block, Document, InlineContent, InlineTag};

/// A caret position: block index plus item offset inside that block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Caret {
    pub block: usize,
    pub offset: usize,
}

impl Caret {
    pub const fn new(block: usize, offset: usize) -> Self {
        Self { block, offset }
    }
}

/// Anchor stays put while the focus moves when a selection is extended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub anchor: Caret,
    pub focus: Caret,
}

impl Selection {
    pub const fn caret(at: Caret) -> Self {
        Self {
            anchor: at,
            focus: at,
        }
    }

    pub const fn range(anchor: Caret, focus: Caret) -> Self {
        Self { anchor, focus }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    /// `(start, end)` in document order.
    pub fn ordered(&self) -> (Caret, Caret) {
        if self.anchor <= self.focus {
            (self.anchor, self.focus)
        } else {
            (self.focus, self.anchor)
        }
    }
}

/// Inline styles toggled on a collapsed caret, applied to the next typed text.
///
/// `Some(true)` forces the style on, `Some(false)` forces it off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingStyles {
    pub bold: Option<bool>,
    pub italic: Option<bool>,
}

impl PendingStyles {
    pub const fn is_empty(&self) -> bool {
        self.bold.is_none() && self.italic.is_none()
    }
}

pub(crate) const BOLD_FAMILY: &[&str] = &["strong", "b"];
pub(crate) const ITALIC_FAMILY: &[&str] = &["em", "i"];
pub(crate) const HIGHLIGHT_FAMILY: &[&str] = &["mark"];

/// Owned editor state: the block sequence plus the current selection.
///
/// All edits go through [`crate::editor::apply`]; nothing here depends on a
/// rendering surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorState {
    document: Document,
    selection: Option<Selection>,
    pending: PendingStyles,
}

impl EditorState {
    pub const fn new(document: Document) -> Self {
        Self {
            document,
            selection: None,
            pending: PendingStyles {
                bold: None,
                italic: None,
            },
        }
    }

    pub fn from_html(html: &str) -> Self {
        Self::new(Document::from_html(html))
    }

    pub const fn document(&self) -> &Document {
        &self.document
    }

    pub fn html(&self) -> String {
        self.document.to_html()
    }

    pub const fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn caret(&self) -> Option<Caret> {
        self.selection.map(|s| s.focus)
    }

    pub const fn pending(&self) -> PendingStyles {
        self.pending
    }

    /// Replace the selection, clamped to the document. Clears pending styles.
    pub fn set_selection(&mut self, selection: Option<Selection>) {
        self.selection = selection.map(|s| Selection {
            anchor: self.clamp(s.anchor),
            focus: self.clamp(s.focus),
        });
        self.pending = PendingStyles::default();
    }

    /// Give the state a caret at the end of the document if it has none.
    pub fn focus_end(&mut self) {
        if self.selection.is_none() {
            self.selection = Some(Selection::caret(self.document_end()));
        }
    }

    pub fn document_end(&self) -> Caret {
        self.document
            .len()
            .checked_sub(1)
            .map_or_else(Caret::default, |last| self.block_end(last))
    }

    pub fn block_end(&self, block: usize) -> Caret {
        Caret::new(block, self.document.block(block).map_or(0, Block::text_len))
    }

    pub fn clamp(&self, caret: Caret) -> Caret {
        let Some(last) = self.document.len().checked_sub(1) else {
            return Caret::default();
        };
        let block = caret.block.min(last);
        let len = self.document.block(block).map_or(0, Block::text_len);
        Caret::new(block, caret.offset.min(len))
    }

    pub(crate) fn blocks_mut(&mut self) -> &mut Vec<Block> {
        self.document.blocks_mut()
    }

    /// Move the caret without touching pending styles.
    pub(crate) fn place_caret(&mut self, caret: Caret) {
        self.selection = Some(Selection::caret(self.clamp(caret)));
    }

    pub(crate) fn set_pending(&mut self, pending: PendingStyles) {
        self.pending = pending;
    }

    /// Run `f` over a block's inline content and store the result back.
    pub(crate) fn edit_content<R>(
        &mut self,
        block: usize,
        f: impl FnOnce(&mut InlineContent) -> R,
    ) -> Option<R> {
        let target = self.document.blocks_mut().get_mut(block)?;
        let mut content = target.content();
        let result = f(&mut content);
        target.set_content(&content);
        Some(result)
    }

    /// Make sure there is a block to type into; an empty document gets a bare
    /// run at the root.
    pub(crate) fn ensure_block(&mut self, caret: Caret) -> Caret {
        if self.document.is_empty() {
            self.document.blocks_mut().push(Block::bare(""));
            return Caret::default();
        }
        self.clamp(caret)
    }

    /// Delete the selected range and return the collapsed caret left behind.
    pub(crate) fn delete_selection(&mut self) -> Option<Caret> {
        let selection = self.selection?;
        let (start, end) = selection.ordered();
        let (start, end) = (self.clamp(start), self.clamp(end));
        if start == end {
            return Some(start);
        }

        if start.block == end.block {
            self.edit_content(start.block, |c| c.remove(start.offset..end.offset));
        } else {
            let tail = self
                .document
                .block(end.block)
                .map(|b| {
                    let mut content = b.content();
                    content.split_off(end.offset)
                })
                .unwrap_or_default();
            self.edit_content(start.block, |c| {
                c.split_off(start.offset);
                c.append(tail);
            });
            self.document
                .blocks_mut()
                .drain(start.block + 1..=end.block);
        }
        self.place_caret(start);
        Some(start)
    }

    /// Join runs of adjacent `Bare` blocks into one, since they serialize as
    /// a single stretch of root content. Carets move onto the joined block.
    pub(crate) fn join_adjacent_bare(&mut self) {
        let blocks = self.document.blocks();
        if !blocks.windows(2).any(|pair| pair[0].is_bare() && pair[1].is_bare()) {
            return;
        }

        let old = std::mem::take(self.document.blocks_mut());
        let mut joined: Vec<Block> = Vec::with_capacity(old.len());
        // Per old block: index in `joined` and offset shift inside it.
        let mut remap = Vec::with_capacity(old.len());
        for block in old {
            match joined.last_mut() {
                Some(prev) if prev.is_bare() && block.is_bare() => {
                    let shift = prev.text_len();
                    let mut content = prev.content();
                    content.append(block.content());
                    prev.set_content(&content);
                    remap.push((joined.len() - 1, shift));
                }
                _ => {
                    remap.push((joined.len(), 0));
                    joined.push(block);
                }
            }
        }
        *self.document.blocks_mut() = joined;

        let map = |caret: Caret| {
            remap
                .get(caret.block)
                .map_or(caret, |&(block, shift)| Caret::new(block, caret.offset + shift))
        };
        if let Some(selection) = self.selection {
            let (anchor, focus) = (map(selection.anchor), map(selection.focus));
            self.selection = Some(Selection::range(self.clamp(anchor), self.clamp(focus)));
        }
    }

    /// Per-block item ranges covered by the selection.
    pub(crate) fn selected_segments(&self) -> Vec<(usize, std::ops::Range<usize>)> {
        let Some(selection) = self.selection else {
            return Vec::new();
        };
        let (start, end) = selection.ordered();
        let (start, end) = (self.clamp(start), self.clamp(end));
        if self.document.is_empty() {
            return Vec::new();
        }
        (start.block..=end.block)
            .map(|block| {
                let from = if block == start.block { start.offset } else { 0 };
                let to = if block == end.block {
                    end.offset
                } else {
                    self.document.block(block).map_or(0, Block::text_len)
                };
                (block, from..to)
            })
            .filter(|(_, range)| !range.is_empty())
            .collect()
    }

    /// Stack newly typed text at `caret` gets, with pending styles applied.
    pub(crate) fn typing_stack(&self, caret: Caret) -> Vec<InlineTag> {
        let mut stack = self
            .document
            .block(caret.block)
            .map(|b| b.content().stack_at(caret.offset))
            .unwrap_or_default();
        apply_pending(&mut stack, self.pending.bold, BOLD_FAMILY, "strong");
        apply_pending(&mut stack, self.pending.italic, ITALIC_FAMILY, "em");
        stack
    }
}

fn apply_pending(stack: &mut Vec<InlineTag>, pending: Option<bool>, family: &[&str], tag: &str) {
    match pending {
        Some(true) if !stack.iter().any(|t| family.contains(&t.name.as_str())) => {
            stack.push(InlineTag::new(tag));
        }
        Some(false) => stack.retain(|t| !family.contains(&t.name.as_str())),
        _ => {}
    }
}
