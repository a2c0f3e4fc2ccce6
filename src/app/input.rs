use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::app::{App, Message, Model, Pane};
use crate::editor::{EditCommand, FormattingAction, Motion};
use crate::perf::EVENT_TARGET;
use crate::ui::{ENTRY_ROWS, Hit};

impl App {
    pub(super) fn handle_event(&self, event: &Event, model: &Model) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(*key, model),
            Event::Mouse(mouse) => handle_mouse(*mouse, model),
            Event::Resize(w, h) => {
                tracing::debug!(target: EVENT_TARGET, width = w, height = h, "terminal resized");
                Some(Message::Resize(*w, *h))
            }
            Event::Paste(text) if model.pane == Pane::Editor => {
                Some(Message::Edit(EditCommand::InsertText(text.replace('\r', ""))))
            }
            _ => None,
        }
    }

    pub(super) fn view(model: &Model, frame: &mut Frame) {
        crate::ui::render(model, frame);
    }
}

/// Map a key press to a message for the pane that has focus.
pub fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
    if model.help_visible {
        return Some(Message::HideHelp);
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && matches!(key.code, KeyCode::Char('c' | 'q')) {
        return Some(Message::Quit);
    }
    if key.code == KeyCode::F(1) {
        return Some(Message::ToggleHelp);
    }
    if let Some(action) = toolbar_key(key) {
        return Some(Message::Format(action));
    }

    match model.pane {
        Pane::Entries => entries_key(key),
        Pane::Editor => editor_key(key),
    }
}

/// F2..F6 follow the toolbar order; the control chords mirror the toolbar
/// shortcuts where the terminal can deliver them.
fn toolbar_key(key: KeyEvent) -> Option<FormattingAction> {
    if let KeyCode::F(n @ 2..=6) = key.code {
        return FormattingAction::ALL.get(usize::from(n - 2)).copied();
    }
    if !key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    match key.code {
        KeyCode::Char('b') => Some(FormattingAction::Bold),
        KeyCode::Char('e') => Some(FormattingAction::Italic),
        KeyCode::Char('g') => Some(FormattingAction::Highlight),
        KeyCode::Char('l') => Some(FormattingAction::Checklist),
        KeyCode::Char(' ') => Some(FormattingAction::AssistInsert),
        _ => None,
    }
}

fn entries_key(key: KeyEvent) -> Option<Message> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => Some(Message::EntryDown),
        KeyCode::Char('k') | KeyCode::Up => Some(Message::EntryUp),
        KeyCode::Enter | KeyCode::Tab | KeyCode::Char('i') => Some(Message::FocusEditor),
        KeyCode::Char('t') => Some(Message::ToggleToolbar),
        KeyCode::Char('?') => Some(Message::ToggleHelp),
        KeyCode::Char('q') => Some(Message::Quit),
        _ => None,
    }
}

fn editor_key(key: KeyEvent) -> Option<Message> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let edit = |command| Some(Message::Edit(command));
    let motion = |motion| {
        Some(Message::Edit(EditCommand::MoveCaret {
            motion,
            extend: shift,
        }))
    };

    match key.code {
        KeyCode::Esc => Some(Message::FocusEntries),
        KeyCode::Enter if shift || alt => edit(EditCommand::InsertLineBreak),
        KeyCode::Enter => edit(EditCommand::Enter),
        KeyCode::Backspace => edit(EditCommand::DeleteBackward),
        KeyCode::Delete => edit(EditCommand::DeleteForward),
        KeyCode::Left => motion(Motion::Left),
        KeyCode::Right => motion(Motion::Right),
        KeyCode::Up => motion(Motion::Up),
        KeyCode::Down => motion(Motion::Down),
        KeyCode::Home if ctrl => motion(Motion::DocumentStart),
        KeyCode::End if ctrl => motion(Motion::DocumentEnd),
        KeyCode::Home => motion(Motion::BlockStart),
        KeyCode::End => motion(Motion::BlockEnd),
        KeyCode::Char('a') if ctrl => edit(EditCommand::SelectAll),
        KeyCode::Char('x') if ctrl => Some(Message::ToggleCheckedAtCaret),
        KeyCode::Char('t') if ctrl => Some(Message::ToggleToolbar),
        KeyCode::Char(c) if !ctrl && !alt => edit(EditCommand::InsertText(c.to_string())),
        _ => None,
    }
}

fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
    if model.help_visible || mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return None;
    }
    let (width, height) = model.terminal_size;
    let layout = crate::ui::screen_layout(Rect::new(0, 0, width, height), model.toolbar_visible);

    if contains(layout.body, mouse.column, mouse.row) {
        let projection = crate::ui::project(model.surface.state(), layout.body.width);
        let row = usize::from(mouse.row - layout.body.y) + model.editor_scroll_offset;
        let col = mouse.column - layout.body.x;
        return match projection.hit(row, col) {
            Some(Hit::Checkbox(block)) => Some(Message::Edit(EditCommand::ToggleChecked(block))),
            Some(Hit::Caret(caret)) => Some(Message::Edit(EditCommand::SetCaret(caret))),
            None => Some(Message::Edit(EditCommand::MoveCaret {
                motion: Motion::DocumentEnd,
                extend: false,
            })),
        };
    }

    // Entry rows sit inside the list's border.
    let list = layout.entries;
    if contains(list, mouse.column, mouse.row) && mouse.row > list.y {
        let visible = usize::from(list.height.saturating_sub(2)) / ENTRY_ROWS;
        let active = model.board.active_index().unwrap_or(0);
        let start = crate::ui::entry_list_start(active, visible);
        let idx = start + usize::from(mouse.row - list.y - 1) / ENTRY_ROWS;
        return model
            .board
            .entries()
            .get(idx)
            .map(|entry| Message::SelectEntry(entry.id.clone()));
    }
    None
}

const fn contains(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.x && col < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}
