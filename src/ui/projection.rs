//! Projection of the editor state onto terminal rows.
//!
//! Lays each block out as one or more display lines: line breaks start a new
//! line, long text wraps at the body width, and checklist items get a
//! `[ ] ` / `[x] ` prefix. The projection also records where the caret lands
//! and can map a clicked cell back to a caret or a checkbox.

use unicode_width::UnicodeWidthStr;

use crate::document::inline::decode_entity;
use crate::document::{Block, ItemKind, ParagraphKind};
use crate::editor::{Caret, EditorState};

const CHECKBOX_WIDTH: u16 = 4;

/// Visual attributes of a run of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStyle {
    pub bold: bool,
    pub italic: bool,
    pub highlight: bool,
    pub selected: bool,
    pub assist: bool,
    pub checked: bool,
    /// The checkbox prefix itself.
    pub checkbox: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub style: RunStyle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorLine {
    /// Block this line belongs to.
    pub block: usize,
    pub runs: Vec<Run>,
    /// Whether the line starts with the block's checkbox.
    pub checkbox: bool,
    /// Column and caret offset of every visible glyph.
    glyphs: Vec<(u16, usize)>,
    /// Caret offset after the last glyph on this line.
    end_offset: usize,
}

impl EditorLine {
    fn new(block: usize, start_offset: usize) -> Self {
        Self {
            block,
            runs: Vec::new(),
            checkbox: false,
            glyphs: Vec::new(),
            end_offset: start_offset,
        }
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    fn push(&mut self, text: &str, style: RunStyle) {
        match self.runs.last_mut() {
            Some(last) if last.style == style => last.text.push_str(text),
            _ => self.runs.push(Run {
                text: text.to_string(),
                style,
            }),
        }
    }
}

/// What a click on the editor body lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Caret(Caret),
    /// The checkbox of the checklist item at this block index
    Checkbox(usize),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    pub lines: Vec<EditorLine>,
    /// Row and column of the caret, if there is a selection.
    pub caret: Option<(usize, u16)>,
}

impl Projection {
    /// Map a cell of the editor body (row relative to the first line) back
    /// to the document.
    pub fn hit(&self, row: usize, col: u16) -> Option<Hit> {
        let line = self.lines.get(row)?;
        if line.checkbox && col < CHECKBOX_WIDTH {
            return Some(Hit::Checkbox(line.block));
        }
        let offset = line
            .glyphs
            .iter()
            .find(|(glyph_col, _)| *glyph_col >= col)
            .map_or(line.end_offset, |(_, offset)| *offset);
        Some(Hit::Caret(Caret::new(line.block, offset)))
    }
}

/// Lay the document out for a body `width` columns wide.
pub fn project(state: &EditorState, width: u16) -> Projection {
    let width = width.max(CHECKBOX_WIDTH + 1);
    let caret = state.caret();
    let selection = state
        .selection()
        .filter(|s| !s.is_collapsed())
        .map(|s| s.ordered());

    let mut projection = Projection::default();
    for (index, block) in state.document().blocks().iter().enumerate() {
        let selected = selection.and_then(|(start, end)| {
            (start.block..=end.block).contains(&index).then(|| {
                let lo = if index == start.block { start.offset } else { 0 };
                let hi = if index == end.block {
                    end.offset
                } else {
                    usize::MAX
                };
                lo..hi
            })
        });
        let caret_offset = caret.filter(|c| c.block == index).map(|c| c.offset);
        project_block(
            &mut projection,
            index,
            block,
            width,
            selected.unwrap_or(0..0),
            caret_offset,
        );
    }
    projection
}

fn project_block(
    projection: &mut Projection,
    index: usize,
    block: &Block,
    width: u16,
    selected: std::ops::Range<usize>,
    caret_offset: Option<usize>,
) {
    let content = block.content();
    let items = content.items();
    let (base, indent) = match block {
        Block::ChecklistItem { checked, .. } => (
            RunStyle {
                checked: *checked,
                ..RunStyle::default()
            },
            CHECKBOX_WIDTH,
        ),
        Block::Paragraph {
            kind: ParagraphKind::Assist,
            ..
        } => (
            RunStyle {
                assist: true,
                ..RunStyle::default()
            },
            0,
        ),
        Block::Paragraph { .. } => (RunStyle::default(), 0),
    };

    let mut line = EditorLine::new(index, 0);
    if let Block::ChecklistItem { checked, .. } = block {
        let mark = if *checked { "[x] " } else { "[ ] " };
        line.checkbox = true;
        line.push(
            mark,
            RunStyle {
                checkbox: true,
                ..base
            },
        );
    }
    let mut col = indent;

    let new_line = |projection: &mut Projection, line: &mut EditorLine, offset: usize| {
        let mut next = EditorLine::new(index, offset);
        if indent > 0 {
            next.push(&" ".repeat(usize::from(indent)), base);
        }
        projection.lines.push(std::mem::replace(line, next));
    };

    for (offset, item) in items.iter().enumerate() {
        let glyph = match &item.kind {
            ItemKind::Char(raw) => decode_entity(raw),
            ItemKind::Void { .. } => String::new(),
        };
        let glyph_width = u16::try_from(glyph.width()).unwrap_or(u16::MAX);
        if col > indent && col.saturating_add(glyph_width) > width {
            new_line(projection, &mut line, offset);
            col = indent;
        }
        if caret_offset == Some(offset) {
            projection.caret = Some((projection.lines.len(), col));
        }
        if item.is_line_break() {
            line.end_offset = offset;
            let trailing = offset + 1 == items.len();
            if !trailing || caret_offset == Some(items.len()) {
                new_line(projection, &mut line, offset + 1);
                col = indent;
            }
            continue;
        }
        if glyph.is_empty() {
            continue;
        }
        let style = RunStyle {
            bold: item.stack.iter().any(|t| matches!(t.name.as_str(), "strong" | "b")),
            italic: item.stack.iter().any(|t| matches!(t.name.as_str(), "em" | "i")),
            highlight: item.stack.iter().any(|t| t.name == "mark"),
            selected: selected.contains(&offset),
            ..base
        };
        line.glyphs.push((col, offset));
        line.push(&glyph, style);
        line.end_offset = offset + 1;
        col = col.saturating_add(glyph_width);
    }
    if caret_offset.is_some_and(|offset| offset >= items.len()) {
        projection.caret = Some((projection.lines.len(), col));
    }
    projection.lines.push(line);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::Selection;

    fn state(html: &str) -> EditorState {
        EditorState::from_html(html)
    }

    fn texts(projection: &Projection) -> Vec<String> {
        projection.lines.iter().map(EditorLine::text).collect()
    }

    #[test]
    fn test_blocks_become_lines() {
        let projection = project(&state("<p>one</p><p>two</p>"), 40);
        assert_eq!(texts(&projection), vec!["one", "two"]);
        assert_eq!(projection.caret, None);
    }

    #[test]
    fn test_line_break_starts_new_line() {
        let projection = project(&state("Hello<br />world"), 40);
        assert_eq!(texts(&projection), vec!["Hello", "world"]);
    }

    #[test]
    fn test_trailing_break_adds_no_line() {
        let projection = project(&state("<p>a<br /></p>"), 40);
        assert_eq!(texts(&projection), vec!["a"]);
    }

    #[test]
    fn test_checklist_prefix_and_wrap_indent() {
        let html = "<div class=\"journal-checklist\"><input type=\"checkbox\" class=\"journal-checkbox\" checked /><span class=\"journal-checklist-text\">abcdefgh</span></div>";
        let projection = project(&state(html), 8);
        assert_eq!(texts(&projection), vec!["[x] abcd", "    efgh"]);
        assert!(projection.lines[0].checkbox);
        assert!(projection.lines[0].runs[0].style.checkbox);
        assert!(projection.lines[0].runs[1].style.checked);
    }

    #[test]
    fn test_inline_styles_split_runs() {
        let projection = project(&state("<p>a<strong>b</strong><mark>c</mark></p>"), 40);
        let runs = &projection.lines[0].runs;
        assert_eq!(runs.len(), 3);
        assert!(runs[1].style.bold);
        assert!(runs[2].style.highlight);
    }

    #[test]
    fn test_caret_position_uses_display_width() {
        let mut editor = state("<p>日本x</p>");
        editor.set_selection(Some(Selection::caret(Caret::new(0, 2))));
        assert_eq!(project(&editor, 40).caret, Some((0, 4)));
    }

    #[test]
    fn test_caret_after_trailing_break_gets_its_own_line() {
        let mut editor = state("<p>a<br /><br /></p>");
        editor.set_selection(Some(Selection::caret(Caret::new(0, 3))));
        let projection = project(&editor, 40);
        assert_eq!(texts(&projection), vec!["a", "", ""]);
        assert_eq!(projection.caret, Some((2, 0)));
    }

    #[test]
    fn test_selection_marks_runs() {
        let mut editor = state("<p>abcd</p>");
        editor.set_selection(Some(Selection::range(Caret::new(0, 1), Caret::new(0, 3))));
        let runs = &project(&editor, 40).lines[0].runs;
        assert_eq!(runs[1].text, "bc");
        assert!(runs[1].style.selected);
        assert!(!runs[2].style.selected);
    }

    #[test]
    fn test_hit_maps_back_to_caret_and_checkbox() {
        let html = "<p>hello</p><div class=\"journal-checklist\"><input type=\"checkbox\" class=\"journal-checkbox\" /><span class=\"journal-checklist-text\">task</span></div>";
        let projection = project(&state(html), 40);
        assert_eq!(projection.hit(0, 2), Some(Hit::Caret(Caret::new(0, 2))));
        assert_eq!(projection.hit(0, 30), Some(Hit::Caret(Caret::new(0, 5))));
        assert_eq!(projection.hit(1, 1), Some(Hit::Checkbox(1)));
        assert_eq!(projection.hit(1, 5), Some(Hit::Caret(Caret::new(1, 1))));
        assert_eq!(projection.hit(9, 0), None);
    }
}
