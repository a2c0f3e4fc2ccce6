use tracing::debug;

use super::commands::{EditCommand, apply};
use super::format::FormattingAction;
use super::state::EditorState;
use crate::document::ContentInput;
use crate::error::SurfaceError;

/// Receives the serialized document after every committed change.
pub trait ChangeListener {
    fn content_changed(&mut self, entry_id: &str, html: &str);
}

impl<F> ChangeListener for F
where
    F: FnMut(&str, &str),
{
    fn content_changed(&mut self, entry_id: &str, html: &str) {
        self(entry_id, html);
    }
}

/// Result of offering new external content to the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The displayed content was replaced.
    Applied,
    /// The content already matches what is displayed.
    Unchanged,
    /// The surface has focus; the content was not applied.
    Deferred,
}

/// The editable surface for one journal entry.
///
/// Holds the live editor state and whether it has input focus. External
/// content only replaces the state while the surface is unfocused, so the
/// owner re-rendering with its own echo of an edit never moves the caret.
#[derive(Debug, Clone, Default)]
pub struct RichTextSurface {
    entry_id: String,
    state: EditorState,
    focused: bool,
}

impl RichTextSurface {
    pub fn new(entry_id: impl Into<String>, content: ContentInput) -> Self {
        let _scope = crate::perf::scope("surface.seed");
        Self {
            entry_id: entry_id.into(),
            state: EditorState::from_html(&content.into_html()),
            focused: false,
        }
    }

    pub fn entry_id(&self) -> &str {
        &self.entry_id
    }

    pub const fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn html(&self) -> String {
        self.state.html()
    }

    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// Take input focus, putting the caret at the end if there is none.
    pub fn focus(&mut self) {
        self.focused = true;
        self.state.focus_end();
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Offer the owner's current value for `entry_id`.
    pub fn sync(&mut self, entry_id: &str, content: ContentInput) -> SyncOutcome {
        if self.focused {
            debug!(entry_id, "surface focused; deferring external content");
            return SyncOutcome::Deferred;
        }
        let html = content.into_html();
        if entry_id == self.entry_id && html == self.state.html() {
            return SyncOutcome::Unchanged;
        }
        let _scope = crate::perf::scope("surface.reseed");
        debug!(entry_id, bytes = html.len(), "reseeding surface");
        self.entry_id = entry_id.to_string();
        self.state = EditorState::from_html(&html);
        SyncOutcome::Applied
    }

    /// Apply an edit. Input implies focus. Returns whether the listener was
    /// notified.
    pub fn dispatch(&mut self, command: &EditCommand, listener: &mut dyn ChangeListener) -> bool {
        self.focus();
        let state = std::mem::take(&mut self.state);
        self.state = apply(state, command);
        if !command.commits() {
            return false;
        }
        let html = self.state.html();
        listener.content_changed(&self.entry_id, &html);
        true
    }

    pub fn apply_formatting(&mut self, action: FormattingAction, listener: &mut dyn ChangeListener) {
        self.dispatch(&EditCommand::Format(action), listener);
    }

    /// Look up an action by its toolbar key and apply it.
    pub fn try_apply_action(
        &mut self,
        key: &str,
        listener: &mut dyn ChangeListener,
    ) -> Result<(), SurfaceError> {
        let action =
            FormattingAction::from_key(key).ok_or_else(|| SurfaceError::UnknownAction(key.to_string()))?;
        self.apply_formatting(action, listener);
        Ok(())
    }

    /// Flip the checkbox of the checklist item at `index`.
    pub fn try_toggle_checked(
        &mut self,
        index: usize,
        listener: &mut dyn ChangeListener,
    ) -> Result<(), SurfaceError> {
        let document = self.state.document();
        let block = document.block(index).ok_or(SurfaceError::InvalidBlock {
            index,
            len: document.len(),
        })?;
        if !block.is_checklist() {
            return Err(SurfaceError::NotChecklist(index));
        }
        self.dispatch(&EditCommand::ToggleChecked(index), listener);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::{Caret, Motion};

    fn plain(text: &str) -> ContentInput {
        ContentInput::PlainText(text.to_string())
    }

    #[test]
    fn test_seeding_normalizes_plain_text() {
        let surface = RichTextSurface::new("1", plain("Hello\nworld"));
        assert_eq!(surface.html(), "Hello<br />world");
        assert!(!surface.is_focused());
    }

    #[test]
    fn test_sync_is_deferred_while_focused() {
        let mut surface = RichTextSurface::new("1", plain("draft"));
        surface.focus();
        assert_eq!(surface.sync("1", plain("other")), SyncOutcome::Deferred);
        assert_eq!(surface.html(), "draft");

        surface.blur();
        assert_eq!(surface.sync("1", plain("other")), SyncOutcome::Applied);
        assert_eq!(surface.html(), "other");
    }

    #[test]
    fn test_sync_with_same_content_keeps_state() {
        let mut surface = RichTextSurface::new("1", ContentInput::detect("<p>x</p>"));
        assert_eq!(
            surface.sync("1", ContentInput::detect("<p>x</p>")),
            SyncOutcome::Unchanged
        );
    }

    #[test]
    fn test_sync_to_other_entry_switches_id() {
        let mut surface = RichTextSurface::new("1", plain("a"));
        assert_eq!(surface.sync("2", plain("a")), SyncOutcome::Applied);
        assert_eq!(surface.entry_id(), "2");
    }

    #[test]
    fn test_dispatch_reports_committed_changes() {
        let mut surface = RichTextSurface::new("7", ContentInput::detect("<p>ab</p>"));
        let mut seen: Vec<(String, String)> = Vec::new();
        let mut listener = |id: &str, html: &str| seen.push((id.to_string(), html.to_string()));

        surface.dispatch(&EditCommand::InsertText("c".to_string()), &mut listener);
        surface.dispatch(
            &EditCommand::MoveCaret {
                motion: Motion::DocumentStart,
                extend: false,
            },
            &mut listener,
        );
        assert!(surface.is_focused());
        assert_eq!(seen, vec![("7".to_string(), "<p>abc</p>".to_string())]);
    }

    #[test]
    fn test_formatting_fires_even_without_change() {
        let mut surface = RichTextSurface::new("1", plain(""));
        let mut count = 0;
        let mut listener = |_: &str, _: &str| count += 1;
        surface.apply_formatting(FormattingAction::Bold, &mut listener);
        assert_eq!(count, 1);
    }

    #[test]
    fn test_checklist_from_unfocused_surface_uses_end_caret() {
        let mut surface = RichTextSurface::new("1", ContentInput::detect("<p>one</p>"));
        let mut listener = |_: &str, _: &str| {};
        surface.apply_formatting(FormattingAction::Checklist, &mut listener);
        assert_eq!(surface.state().document().checklist_count(), 1);
        assert_eq!(surface.state().caret(), Some(Caret::new(0, 3)));
    }

    #[test]
    fn test_try_apply_action_rejects_unknown_key() {
        let mut surface = RichTextSurface::new("1", plain("a"));
        let mut listener = |_: &str, _: &str| {};
        assert_eq!(
            surface.try_apply_action("underline", &mut listener),
            Err(SurfaceError::UnknownAction("underline".to_string()))
        );
        assert!(surface.try_apply_action("highlight", &mut listener).is_ok());
    }

    #[test]
    fn test_try_toggle_checked_validates_block() {
        let mut surface = RichTextSurface::new("1", ContentInput::detect("<p>a</p>"));
        let mut listener = |_: &str, _: &str| {};
        assert_eq!(
            surface.try_toggle_checked(3, &mut listener),
            Err(SurfaceError::InvalidBlock { index: 3, len: 1 })
        );
        assert_eq!(
            surface.try_toggle_checked(0, &mut listener),
            Err(SurfaceError::NotChecklist(0))
        );
    }
}
