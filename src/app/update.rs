use crate::app::Model;
use crate::app::model::{Pane, ToastLevel};
use crate::editor::{EditCommand, FormattingAction, SyncOutcome};
use crate::perf::EVENT_TARGET;

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Entry list
    /// Select the previous entry
    EntryUp,
    /// Select the next entry
    EntryDown,
    /// Select an entry by id
    SelectEntry(String),

    // Focus
    /// Give the editor key focus
    FocusEditor,
    /// Return key focus to the entry list
    FocusEntries,

    // Editor
    /// Apply an edit command to the surface
    Edit(EditCommand),
    /// Apply a toolbar action
    Format(FormattingAction),
    /// Flip the checkbox of the checklist item under the caret
    ToggleCheckedAtCaret,

    // Window
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,
    /// Show or hide the toolbar row
    ToggleToolbar,
    /// Terminal resized
    Resize(u16, u16),
    /// Periodic wakeup
    Tick,

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// No side effects should occur in this function.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::EntryUp => {
            let index = model.board.active_index().unwrap_or(0);
            if let Some(entry) = index
                .checked_sub(1)
                .and_then(|i| model.board.entries().get(i))
            {
                let id = entry.id.clone();
                switch_entry(&mut model, &id);
            }
        }
        Message::EntryDown => {
            let index = model.board.active_index().unwrap_or(0);
            if let Some(entry) = model.board.entries().get(index + 1) {
                let id = entry.id.clone();
                switch_entry(&mut model, &id);
            }
        }
        Message::SelectEntry(id) => switch_entry(&mut model, &id),

        Message::FocusEditor => {
            if model.board.active_entry().is_some() {
                model.pane = Pane::Editor;
                model.surface.focus();
            }
        }
        Message::FocusEntries => {
            model.pane = Pane::Entries;
            model.surface.blur();
        }

        Message::Edit(command) => {
            model.pane = Pane::Editor;
            model.surface.dispatch(&command, &mut model.board.drafts);
        }
        Message::Format(action) => {
            model.pane = Pane::Editor;
            model.surface.apply_formatting(action, &mut model.board.drafts);
        }
        Message::ToggleCheckedAtCaret => toggle_checked_at_caret(&mut model),

        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
        }
        Message::HideHelp => {
            model.help_visible = false;
        }
        Message::ToggleToolbar => {
            model.toolbar_visible = !model.toolbar_visible;
        }
        Message::Resize(width, height) => model.resize(width, height),
        Message::Tick => model.expire_toast(),

        Message::Quit => {
            model.should_quit = true;
        }
    }

    // The owner re-renders with its current content after every update. While
    // the editor is focused the surface ignores it.
    if model.sync_surface() == SyncOutcome::Applied {
        tracing::debug!(target: EVENT_TARGET, entry = model.surface.entry_id(), "surface reseeded");
    }
    follow_caret(&mut model);
    model
}

fn switch_entry(model: &mut Model, id: &str) {
    if model.board.active_entry().is_some_and(|e| e.id == id) {
        return;
    }
    model.surface.blur();
    model.pane = Pane::Entries;
    match model.board.select(id) {
        Ok(_) => {
            model.editor_scroll_offset = 0;
            let drafted = model.board.drafts.get(id).is_some();
            tracing::debug!(target: EVENT_TARGET, entry = id, drafted, "entry selected");
        }
        Err(err) => model.show_toast(ToastLevel::Warning, err.to_string()),
    }
}

fn toggle_checked_at_caret(model: &mut Model) {
    let Some(caret) = model.surface.state().caret() else {
        return;
    };
    if let Err(err) = model
        .surface
        .try_toggle_checked(caret.block, &mut model.board.drafts)
    {
        model.show_toast(ToastLevel::Info, err.to_string());
    }
}

fn follow_caret(model: &mut Model) {
    let (width, _) = model.editor_body();
    let projection = crate::ui::project(model.surface.state(), width);
    if let Some((row, _)) = projection.caret {
        model.scroll_to_row(row);
    }
}
