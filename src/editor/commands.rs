use super::checklist;
use super::format::{FormattingAction, apply_formatting};
use super::state::{Caret, EditorState, Selection};
use crate::document::{Block, InlineContent, ParagraphKind};

/// Caret motions the rendering layer can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    /// Previous block, keeping the offset where possible.
    Up,
    /// Next block, keeping the offset where possible.
    Down,
    BlockStart,
    BlockEnd,
    DocumentStart,
    DocumentEnd,
}

/// Every edit the surface understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    /// Replace the selection with typed text
    InsertText(String),
    /// Backspace
    DeleteBackward,
    /// Delete
    DeleteForward,
    /// Enter without shift
    Enter,
    /// Shift+Enter
    InsertLineBreak,
    /// Toolbar action
    Format(FormattingAction),
    /// Move the caret, optionally extending the selection
    MoveCaret { motion: Motion, extend: bool },
    /// Collapse the selection to a caret, e.g. from a click
    SetCaret(Caret),
    SelectAll,
    /// Click on the checkbox of the item at this block index
    ToggleChecked(usize),
}

impl EditCommand {
    /// Whether the command produces a content change the owner is told about.
    pub const fn commits(&self) -> bool {
        !matches!(
            self,
            Self::MoveCaret { .. } | Self::SetCaret(_) | Self::SelectAll
        )
    }
}

/// Pure state transition: apply one command to the editor state.
pub fn apply(state: EditorState, command: &EditCommand) -> EditorState {
    tracing::trace!(?command, "apply edit command");
    let mut state = apply_command(state, command);
    state.join_adjacent_bare();
    state
}

fn apply_command(mut state: EditorState, command: &EditCommand) -> EditorState {
    match command {
        EditCommand::InsertText(text) => insert_text(&mut state, text),
        EditCommand::DeleteBackward => delete_backward(&mut state),
        EditCommand::DeleteForward => delete_forward(&mut state),
        EditCommand::Enter => return enter(state),
        EditCommand::InsertLineBreak => insert_line_break(&mut state),
        EditCommand::Format(action) => return apply_formatting(state, *action),
        EditCommand::MoveCaret { motion, extend } => move_caret(&mut state, *motion, *extend),
        EditCommand::SetCaret(caret) => state.set_selection(Some(Selection::caret(*caret))),
        EditCommand::SelectAll => {
            let end = state.document_end();
            state.set_selection(Some(Selection::range(Caret::default(), end)));
        }
        EditCommand::ToggleChecked(index) => {
            checklist::set_checked(&mut state, *index, None);
        }
    }
    state
}

fn insert_text(state: &mut EditorState, text: &str) {
    if text.is_empty() || state.selection().is_none() {
        return;
    }
    let Some(caret) = state.delete_selection() else {
        return;
    };
    let caret = state.ensure_block(caret);
    let stack = state.typing_stack(caret);
    let inserted = InlineContent::from_text(text, &stack);
    let len = inserted.len();
    state.edit_content(caret.block, |content| content.insert(caret.offset, inserted));
    state.place_caret(Caret::new(caret.block, caret.offset + len));
}

fn delete_backward(state: &mut EditorState) {
    let Some(selection) = state.selection() else {
        return;
    };
    if !selection.is_collapsed() {
        state.delete_selection();
        return;
    }
    let caret = state.clamp(selection.focus);
    if caret.offset > 0 {
        state.edit_content(caret.block, |c| c.remove(caret.offset - 1..caret.offset));
        state.set_selection(Some(Selection::caret(Caret::new(
            caret.block,
            caret.offset - 1,
        ))));
    } else if caret.block > 0 {
        let joined_at = merge_into_previous(state, caret.block);
        state.set_selection(Some(Selection::caret(joined_at)));
    }
}

fn delete_forward(state: &mut EditorState) {
    let Some(selection) = state.selection() else {
        return;
    };
    if !selection.is_collapsed() {
        state.delete_selection();
        return;
    }
    let caret = state.clamp(selection.focus);
    let len = state.document().block(caret.block).map_or(0, Block::text_len);
    if caret.offset < len {
        state.edit_content(caret.block, |c| c.remove(caret.offset..caret.offset + 1));
    } else if caret.block + 1 < state.document().len() {
        merge_into_previous(state, caret.block + 1);
    }
    state.set_selection(Some(Selection::caret(caret)));
}

/// Append block `index` onto the block before it; returns the join point.
fn merge_into_previous(state: &mut EditorState, index: usize) -> Caret {
    let removed = state.blocks_mut().remove(index);
    let prev = index - 1;
    let joined_at = state.block_end(prev);
    let tail = removed.content();
    state.edit_content(prev, |c| c.append(tail));
    joined_at
}

fn enter(mut state: EditorState) -> EditorState {
    let Some(selection) = state.selection() else {
        return state;
    };
    let focus = state.clamp(selection.focus);
    if state
        .document()
        .block(focus.block)
        .is_some_and(Block::is_checklist)
    {
        return checklist::continue_item(state, focus.block);
    }

    let Some(caret) = state.delete_selection() else {
        return state;
    };
    let caret = state.ensure_block(caret);
    let Some(current) = state.document().block(caret.block).cloned() else {
        return state;
    };

    let splits = match &current {
        Block::Paragraph {
            kind: ParagraphKind::Bare,
            ..
        } => current.html().is_empty(),
        _ => true,
    };
    if !splits {
        insert_line_break(&mut state);
        return state;
    }

    let tail = state
        .edit_content(caret.block, |c| c.split_off(caret.offset))
        .unwrap_or_default();
    if current.is_bare() {
        state.blocks_mut()[caret.block] = Block::paragraph("");
    }
    let mut next = current.continuation(String::new());
    next.set_content(&tail);
    state.blocks_mut().insert(caret.block + 1, next);
    state.set_selection(Some(Selection::caret(Caret::new(caret.block + 1, 0))));
    state
}

/// Insert `<br />` at the caret. A break at the very end of a block needs a
/// trailing placeholder break to be visible, so two are inserted there.
fn insert_line_break(state: &mut EditorState) {
    let Some(caret) = state.delete_selection() else {
        return;
    };
    let caret = state.ensure_block(caret);
    let stack = state.typing_stack(caret);
    let at_end = caret == state.block_end(caret.block);
    state.edit_content(caret.block, |content| {
        let mut breaks = InlineContent::line_break(&stack);
        if at_end && !ends_with_break(content) {
            breaks.append(InlineContent::line_break(&stack));
        }
        content.insert(caret.offset, breaks);
    });
    state.place_caret(Caret::new(caret.block, caret.offset + 1));
}

fn ends_with_break(content: &InlineContent) -> bool {
    content.items().last().is_some_and(|item| item.is_line_break())
}

fn move_caret(state: &mut EditorState, motion: Motion, extend: bool) {
    let Some(selection) = state.selection() else {
        return;
    };

    if !extend && !selection.is_collapsed() && matches!(motion, Motion::Left | Motion::Right) {
        let (start, end) = selection.ordered();
        let to = if motion == Motion::Left { start } else { end };
        state.set_selection(Some(Selection::caret(to)));
        return;
    }

    let focus = state.clamp(selection.focus);
    let last = state.document().len().saturating_sub(1);
    let target = match motion {
        Motion::Left if focus.offset > 0 => Caret::new(focus.block, focus.offset - 1),
        Motion::Left if focus.block > 0 => state.block_end(focus.block - 1),
        Motion::Left => focus,
        Motion::Right if focus.offset < state.block_end(focus.block).offset => {
            Caret::new(focus.block, focus.offset + 1)
        }
        Motion::Right if focus.block < last => Caret::new(focus.block + 1, 0),
        Motion::Right => focus,
        Motion::Up if focus.block > 0 => Caret::new(focus.block - 1, focus.offset),
        Motion::Up => Caret::new(focus.block, 0),
        Motion::Down if focus.block < last => Caret::new(focus.block + 1, focus.offset),
        Motion::Down => state.block_end(focus.block),
        Motion::BlockStart => Caret::new(focus.block, 0),
        Motion::BlockEnd => state.block_end(focus.block),
        Motion::DocumentStart => Caret::default(),
        Motion::DocumentEnd => state.document_end(),
    };

    let anchor = if extend { selection.anchor } else { target };
    state.set_selection(Some(Selection::range(anchor, target)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    fn at(html: &str, block: usize, offset: usize) -> EditorState {
        let mut state = EditorState::from_html(html);
        state.set_selection(Some(Selection::caret(Caret::new(block, offset))));
        state
    }

    fn run(state: EditorState, commands: &[EditCommand]) -> EditorState {
        commands.iter().fold(state, apply)
    }

    fn typed(text: &str) -> EditCommand {
        EditCommand::InsertText(text.to_string())
    }

    #[test]
    fn test_typing_into_empty_document_creates_root_content() {
        let state = run(at("", 0, 0), &[typed("hi")]);
        assert_eq!(state.html(), "hi");
        assert_eq!(state.caret(), Some(Caret::new(0, 2)));
    }

    #[test]
    fn test_typing_without_selection_is_ignored() {
        let state = run(EditorState::from_html("<p>a</p>"), &[typed("b")]);
        assert_eq!(state.html(), "<p>a</p>");
    }

    #[test]
    fn test_typing_inherits_inline_style() {
        let state = run(at("<p><em>ab</em></p>", 0, 2), &[typed("c")]);
        assert_eq!(state.html(), "<p><em>abc</em></p>");
    }

    #[test]
    fn test_typing_replaces_selection() {
        let mut state = EditorState::from_html("<p>hello world</p>");
        state.set_selection(Some(Selection::range(Caret::new(0, 6), Caret::new(0, 11))));
        let state = apply(state, &typed("there"));
        assert_eq!(state.html(), "<p>hello there</p>");
    }

    #[test]
    fn test_pending_bold_applies_to_typed_text() {
        let state = run(
            at("<p>ab</p>", 0, 2),
            &[EditCommand::Format(FormattingAction::Bold), typed("cd")],
        );
        assert_eq!(state.html(), "<p>ab<strong>cd</strong></p>");
    }

    #[test]
    fn test_caret_move_clears_pending_style() {
        let state = run(
            at("<p>ab</p>", 0, 2),
            &[
                EditCommand::Format(FormattingAction::Bold),
                EditCommand::MoveCaret {
                    motion: Motion::Left,
                    extend: false,
                },
                typed("x"),
            ],
        );
        assert_eq!(state.html(), "<p>axb</p>");
    }

    #[test]
    fn test_typed_markup_is_escaped() {
        let state = run(at("<p></p>", 0, 0), &[typed("<b>&")]);
        assert_eq!(state.html(), "<p>&lt;b&gt;&amp;</p>");
    }

    #[test]
    fn test_backspace_at_block_start_merges() {
        let state = run(at("<p>ab</p><p>cd</p>", 1, 0), &[EditCommand::DeleteBackward]);
        assert_eq!(state.html(), "<p>abcd</p>");
        assert_eq!(state.caret(), Some(Caret::new(0, 2)));
    }

    #[test]
    fn test_merge_between_root_runs_keeps_blocks_matching_html() {
        let state = run(at("a<p>b</p>c", 1, 0), &[EditCommand::DeleteBackward]);
        assert_eq!(state.html(), "abc");
        assert_eq!(Document::from_html(&state.html()), *state.document());
        assert_eq!(state.caret(), Some(Caret::new(0, 2)));
    }

    #[test]
    fn test_removing_assist_prompt_rejoins_split_text() {
        let state = run(
            at("morning pages", 0, 7),
            &[
                EditCommand::Format(FormattingAction::AssistInsert),
                EditCommand::MoveCaret {
                    motion: Motion::BlockStart,
                    extend: true,
                },
                EditCommand::DeleteBackward,
                EditCommand::DeleteBackward,
            ],
        );
        assert_eq!(state.html(), "morning pages");
        assert_eq!(Document::from_html(&state.html()), *state.document());
        assert_eq!(state.caret(), Some(Caret::new(0, 7)));
    }

    #[test]
    fn test_backspace_at_document_start_is_noop() {
        let state = run(at("<p>ab</p>", 0, 0), &[EditCommand::DeleteBackward]);
        assert_eq!(state.html(), "<p>ab</p>");
    }

    #[test]
    fn test_delete_forward_at_block_end_merges() {
        let state = run(at("<p>ab</p><p>cd</p>", 0, 2), &[EditCommand::DeleteForward]);
        assert_eq!(state.html(), "<p>abcd</p>");
        assert_eq!(state.caret(), Some(Caret::new(0, 2)));
    }

    #[test]
    fn test_enter_splits_paragraph() {
        let state = run(at("<p>abcd</p>", 0, 2), &[EditCommand::Enter]);
        assert_eq!(state.html(), "<p>ab</p><p>cd</p>");
        assert_eq!(state.caret(), Some(Caret::new(1, 0)));
    }

    #[test]
    fn test_enter_in_root_content_inserts_break() {
        let state = run(at("Hello<br />world", 0, 5), &[EditCommand::Enter]);
        assert_eq!(state.html(), "Hello<br /><br />world");
    }

    #[test]
    fn test_enter_in_empty_document_starts_paragraphs() {
        let state = run(at("", 0, 0), &[EditCommand::Enter]);
        assert_eq!(state.html(), "<p><br /></p><p><br /></p>");
        assert_eq!(state.caret(), Some(Caret::new(1, 0)));
    }

    #[test]
    fn test_enter_in_checklist_item_continues_list() {
        let state = run(
            at("<p>Buy milk</p>", 0, 8),
            &[EditCommand::Format(FormattingAction::Checklist), EditCommand::Enter],
        );
        assert_eq!(state.document().checklist_count(), 2);
        assert_eq!(state.caret(), Some(Caret::new(1, 0)));
    }

    #[test]
    fn test_shift_enter_at_block_end_adds_placeholder_break() {
        let state = run(at("<p>ab</p>", 0, 2), &[EditCommand::InsertLineBreak, typed("c")]);
        assert_eq!(state.html(), "<p>ab<br />c<br /></p>");
    }

    #[test]
    fn test_move_right_crosses_blocks() {
        let state = run(
            at("<p>a</p><p>b</p>", 0, 1),
            &[EditCommand::MoveCaret {
                motion: Motion::Right,
                extend: false,
            }],
        );
        assert_eq!(state.caret(), Some(Caret::new(1, 0)));
    }

    #[test]
    fn test_extend_keeps_anchor() {
        let state = run(
            at("<p>abc</p>", 0, 0),
            &[
                EditCommand::MoveCaret {
                    motion: Motion::Right,
                    extend: true,
                },
                EditCommand::MoveCaret {
                    motion: Motion::Right,
                    extend: true,
                },
            ],
        );
        assert_eq!(
            state.selection(),
            Some(Selection::range(Caret::new(0, 0), Caret::new(0, 2)))
        );
    }

    #[test]
    fn test_left_collapses_range_to_start() {
        let mut state = EditorState::from_html("<p>abc</p>");
        state.set_selection(Some(Selection::range(Caret::new(0, 3), Caret::new(0, 1))));
        let state = apply(
            state,
            &EditCommand::MoveCaret {
                motion: Motion::Left,
                extend: false,
            },
        );
        assert_eq!(state.caret(), Some(Caret::new(0, 1)));
    }

    #[test]
    fn test_select_all_then_type_replaces_everything() {
        let state = run(
            at("<p>a</p><p>b</p>", 0, 0),
            &[EditCommand::SelectAll, typed("z")],
        );
        assert_eq!(state.html(), "<p>z</p>");
    }

    #[test]
    fn test_toggle_checked_flips_checkbox() {
        let state = run(
            at("<p>task</p>", 0, 0),
            &[
                EditCommand::Format(FormattingAction::Checklist),
                EditCommand::ToggleChecked(0),
            ],
        );
        assert_eq!(state.document().blocks()[0], Block::checklist(true, "task"));
    }

    #[test]
    fn test_navigation_does_not_commit() {
        assert!(!EditCommand::SelectAll.commits());
        assert!(!EditCommand::SetCaret(Caret::default()).commits());
        assert!(EditCommand::DeleteBackward.commits());
        assert!(EditCommand::Format(FormattingAction::Bold).commits());
    }
}
