//! Formatting actions and their dispatch onto the editor state.

use serde::Serialize;

use super::checklist;
use super::state::{
    BOLD_FAMILY, Caret, EditorState, HIGHLIGHT_FAMILY, ITALIC_FAMILY, Selection,
};
use crate::document::{Block, InlineContent, InlineTag};

/// Placeholder text inserted by a highlight on a collapsed caret.
pub const HIGHLIGHT_PLACEHOLDER: &str = "highlight";

/// Fixed prompt inserted by the assist action.
pub const ASSIST_PROMPT: &str = "🧠 Prompt idea: What helped shift your mood today?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormattingAction {
    Bold,
    Italic,
    Highlight,
    Checklist,
    #[serde(rename = "ai-assist")]
    AssistInsert,
}

impl FormattingAction {
    /// Toolbar order.
    pub const ALL: [Self; 5] = [
        Self::Bold,
        Self::Italic,
        Self::Highlight,
        Self::Checklist,
        Self::AssistInsert,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Highlight => "highlight",
            Self::Checklist => "checklist",
            Self::AssistInsert => "ai-assist",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Bold => "Bold",
            Self::Italic => "Italic",
            Self::Highlight => "Highlight",
            Self::Checklist => "Checklist",
            Self::AssistInsert => "AI Assist",
        }
    }

    pub const fn shortcut(self) -> &'static str {
        match self {
            Self::Bold => "⌘B",
            Self::Italic => "⌘I",
            Self::Highlight => "⌘H",
            Self::Checklist => "⌘⇧C",
            Self::AssistInsert => "⌘⎵",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.key() == key)
    }
}

/// Apply a formatting action to the current selection.
///
/// Inline actions need a selection and silently do nothing without one; the
/// checklist action falls back to appending a new item.
pub fn apply_formatting(mut state: EditorState, action: FormattingAction) -> EditorState {
    match action {
        FormattingAction::Bold => toggle_inline(&mut state, BOLD_FAMILY, "strong"),
        FormattingAction::Italic => toggle_inline(&mut state, ITALIC_FAMILY, "em"),
        FormattingAction::Highlight => highlight(&mut state),
        FormattingAction::Checklist => return checklist::toggle(state),
        FormattingAction::AssistInsert => insert_assist(&mut state),
    }
    state
}

fn toggle_inline(state: &mut EditorState, family: &[&str], tag: &str) {
    let Some(selection) = state.selection() else {
        return;
    };

    if selection.is_collapsed() {
        let caret = state.clamp(selection.focus);
        let inherited = state
            .document()
            .block(caret.block)
            .is_some_and(|b| {
                let stack = b.content().stack_at(caret.offset);
                stack.iter().any(|t| family.contains(&t.name.as_str()))
            });
        let mut pending = state.pending();
        let slot = if family == BOLD_FAMILY {
            &mut pending.bold
        } else {
            &mut pending.italic
        };
        let desired = !slot.unwrap_or(inherited);
        *slot = (desired != inherited).then_some(desired);
        state.set_pending(pending);
        return;
    }

    let segments = state.selected_segments();
    let fully_styled = !segments.is_empty()
        && segments.iter().all(|(block, range)| {
            state
                .document()
                .block(*block)
                .is_some_and(|b| b.content().all_within(range.clone(), family))
        });
    let tag = InlineTag::new(tag);
    for (block, range) in segments {
        state.edit_content(block, |content| {
            if fully_styled {
                content.unwrap(range, family);
            } else {
                content.wrap(range, &tag, family);
            }
        });
    }
}

fn highlight(state: &mut EditorState) {
    let Some(selection) = state.selection() else {
        return;
    };

    if selection.is_collapsed() {
        let caret = state.ensure_block(selection.focus);
        let stack = state.typing_stack(caret);
        let mut inserted = InlineContent::from_text(HIGHLIGHT_PLACEHOLDER, &stack);
        let len = inserted.len();
        inserted.wrap(0..len, &InlineTag::new("mark"), HIGHLIGHT_FAMILY);
        state.edit_content(caret.block, |content| content.insert(caret.offset, inserted));
        let pending = state.pending();
        state.set_selection(Some(Selection::caret(Caret::new(
            caret.block,
            caret.offset + len,
        ))));
        state.set_pending(pending);
        return;
    }

    let mark = InlineTag::new("mark");
    for (block, range) in state.selected_segments() {
        state.edit_content(block, |content| content.wrap(range, &mark, HIGHLIGHT_FAMILY));
    }
}

/// Insert the assist prompt paragraph at the caret without replacing
/// anything: before the caret's block when the caret is at its start, after
/// it when at its end, and splitting a paragraph when the caret is inside one.
fn insert_assist(state: &mut EditorState) {
    let Some(selection) = state.selection() else {
        return;
    };
    let prompt = Block::assist(ASSIST_PROMPT);

    if state.document().is_empty() {
        state.blocks_mut().push(prompt);
        let end = state.block_end(0);
        state.set_selection(Some(Selection::caret(end)));
        return;
    }

    let caret = state.clamp(selection.focus);
    let Some(current) = state.document().block(caret.block).cloned() else {
        return;
    };
    let len = current.text_len();

    let index = if caret.offset == 0 && len > 0 {
        caret.block
    } else if caret.offset >= len || current.is_checklist() {
        caret.block + 1
    } else {
        let tail = state
            .edit_content(caret.block, |content| content.split_off(caret.offset))
            .unwrap_or_default();
        let mut rest = current.clone();
        rest.set_content(&tail);
        state.blocks_mut().insert(caret.block + 1, rest);
        caret.block + 1
    };

    state.blocks_mut().insert(index, prompt);
    let end = state.block_end(index);
    state.set_selection(Some(Selection::caret(end)));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_selection(html: &str, anchor: (usize, usize), focus: (usize, usize)) -> EditorState {
        let mut state = EditorState::from_html(html);
        state.set_selection(Some(Selection::range(
            Caret::new(anchor.0, anchor.1),
            Caret::new(focus.0, focus.1),
        )));
        state
    }

    #[test]
    fn test_action_metadata_matches_toolbar() {
        let labels: Vec<_> = FormattingAction::ALL.iter().map(|a| a.label()).collect();
        assert_eq!(labels, ["Bold", "Italic", "Highlight", "Checklist", "AI Assist"]);
        assert_eq!(FormattingAction::Checklist.shortcut(), "⌘⇧C");
        assert_eq!(
            FormattingAction::from_key("ai-assist"),
            Some(FormattingAction::AssistInsert)
        );
        assert_eq!(FormattingAction::from_key("underline"), None);
    }

    #[test]
    fn test_action_serializes_as_key() {
        let json = serde_json::to_string(&FormattingAction::AssistInsert).unwrap();
        assert_eq!(json, "\"ai-assist\"");
    }

    #[test]
    fn test_bold_wraps_selected_range() {
        let state = with_selection("<p>hello world</p>", (0, 0), (0, 5));
        let state = apply_formatting(state, FormattingAction::Bold);
        assert_eq!(state.html(), "<p><strong>hello</strong> world</p>");
    }

    #[test]
    fn test_bold_on_bold_range_removes_it() {
        let state = with_selection("<p><b>hello</b> world</p>", (0, 0), (0, 5));
        let state = apply_formatting(state, FormattingAction::Bold);
        assert_eq!(state.html(), "<p>hello world</p>");
    }

    #[test]
    fn test_partially_bold_range_becomes_fully_bold() {
        let state = with_selection("<p><strong>he</strong>llo</p>", (0, 0), (0, 5));
        let state = apply_formatting(state, FormattingAction::Bold);
        assert_eq!(state.html(), "<p><strong>hello</strong></p>");
    }

    #[test]
    fn test_italic_spans_multiple_blocks() {
        let state = with_selection("<p>abc</p><p>def</p>", (0, 1), (1, 2));
        let state = apply_formatting(state, FormattingAction::Italic);
        assert_eq!(state.html(), "<p>a<em>bc</em></p><p><em>de</em>f</p>");
    }

    #[test]
    fn test_bold_on_caret_sets_pending_style() {
        let state = with_selection("<p>ab</p>", (0, 2), (0, 2));
        let state = apply_formatting(state, FormattingAction::Bold);
        assert_eq!(state.html(), "<p>ab</p>");
        assert_eq!(state.pending().bold, Some(true));
        let state = apply_formatting(state, FormattingAction::Bold);
        assert_eq!(state.pending().bold, None);
    }

    #[test]
    fn test_highlight_on_caret_inserts_single_placeholder() {
        let state = with_selection("<p>before after</p>", (0, 7), (0, 7));
        let state = apply_formatting(state, FormattingAction::Highlight);
        assert_eq!(state.html(), "<p>before <mark>highlight</mark>after</p>");
        assert_eq!(state.caret(), Some(Caret::new(0, 16)));
    }

    #[test]
    fn test_highlight_range_is_idempotent() {
        let state = with_selection("<p>one two three</p>", (0, 4), (0, 7));
        let once = apply_formatting(state, FormattingAction::Highlight);
        assert_eq!(once.html(), "<p>one <mark>two</mark> three</p>");
        assert_eq!(
            once.selection(),
            Some(Selection::range(Caret::new(0, 4), Caret::new(0, 7)))
        );
        let twice = apply_formatting(once.clone(), FormattingAction::Highlight);
        assert_eq!(twice.html(), once.html());
    }

    #[test]
    fn test_inline_actions_without_selection_are_noops() {
        let state = EditorState::from_html("<p>text</p>");
        for action in [
            FormattingAction::Bold,
            FormattingAction::Italic,
            FormattingAction::Highlight,
            FormattingAction::AssistInsert,
        ] {
            let after = apply_formatting(state.clone(), action);
            assert_eq!(after, state);
        }
    }

    #[test]
    fn test_assist_goes_after_block_at_end() {
        let state = with_selection("<p>first</p><p>second</p>", (0, 5), (0, 5));
        let state = apply_formatting(state, FormattingAction::AssistInsert);
        assert_eq!(state.document().len(), 3);
        assert_eq!(state.document().blocks()[1], Block::assist(ASSIST_PROMPT));
        assert_eq!(state.document().blocks()[0], Block::paragraph("first"));
    }

    #[test]
    fn test_assist_goes_before_block_at_start() {
        let state = with_selection("<p>first</p>", (0, 0), (0, 0));
        let state = apply_formatting(state, FormattingAction::AssistInsert);
        assert_eq!(state.document().blocks()[0], Block::assist(ASSIST_PROMPT));
        assert_eq!(state.document().blocks()[1], Block::paragraph("first"));
    }

    #[test]
    fn test_assist_splits_paragraph_without_losing_text() {
        let state = with_selection("<p>abcd</p>", (0, 2), (0, 2));
        let state = apply_formatting(state, FormattingAction::AssistInsert);
        let blocks = state.document().blocks();
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0], Block::paragraph("ab"));
        assert_eq!(blocks[2], Block::paragraph("cd"));
    }

    #[test]
    fn test_assist_into_empty_document() {
        let mut state = EditorState::default();
        state.focus_end();
        let state = apply_formatting(state, FormattingAction::AssistInsert);
        assert_eq!(
            state.html(),
            format!("<p class=\"journal-assist\">{ASSIST_PROMPT}</p>")
        );
    }
}
