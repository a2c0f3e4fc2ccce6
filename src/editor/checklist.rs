//! Checklist toggling and Enter-to-continue.
//!
//! A block is either a paragraph or a checklist item. The checklist action
//! replaces the caret's block in place with the other variant; Enter inside
//! an item either continues the list or, on an empty item, leaves it.

use super::state::{Caret, EditorState, Selection};
use crate::document::Block;

/// Toggle the block holding the caret between paragraph and checklist item.
///
/// With no enclosing block (empty document, loose root content, or no
/// selection at all) a new empty item is appended at the end instead.
pub fn toggle(mut state: EditorState) -> EditorState {
    let target = state
        .caret()
        .map(|caret| state.clamp(caret).block)
        .filter(|&idx| state.document().block(idx).is_some_and(|b| !b.is_bare()));

    let Some(index) = target else {
        state.blocks_mut().push(Block::checklist(false, ""));
        let last = state.document().len() - 1;
        move_to_end(&mut state, last);
        return state;
    };

    let replacement = match &state.document().blocks()[index] {
        Block::ChecklistItem { html, .. } => {
            let html = if html.trim().is_empty() { "" } else { html.as_str() };
            Block::paragraph(html)
        }
        Block::Paragraph { html, .. } => Block::checklist(false, html.as_str()),
    };
    tracing::trace!(index, checklist = replacement.is_checklist(), "toggle checklist");
    state.blocks_mut()[index] = replacement;
    move_to_end(&mut state, index);
    state
}

/// Handle Enter inside the checklist item at `index`.
///
/// A blank item turns into an empty paragraph; otherwise a new empty item is
/// inserted right after it. The caret ends up in whichever block was created.
pub fn continue_item(mut state: EditorState, index: usize) -> EditorState {
    let Some(item) = state.document().block(index) else {
        return state;
    };
    if !item.is_checklist() {
        return state;
    }

    if item.text().trim().is_empty() {
        state.blocks_mut()[index] = Block::paragraph("");
        state.set_selection(Some(Selection::caret(Caret::new(index, 0))));
    } else {
        state.blocks_mut().insert(index + 1, Block::checklist(false, ""));
        state.set_selection(Some(Selection::caret(Caret::new(index + 1, 0))));
    }
    state
}

/// Flip the checkbox of the item at `index`. Returns false for non-items.
pub fn set_checked(state: &mut EditorState, index: usize, value: Option<bool>) -> bool {
    match state.blocks_mut().get_mut(index) {
        Some(Block::ChecklistItem { checked, .. }) => {
            *checked = value.unwrap_or(!*checked);
            true
        }
        _ => false,
    }
}

fn move_to_end(state: &mut EditorState, index: usize) {
    let end = state.block_end(index);
    state.set_selection(Some(Selection::caret(end)));
}
