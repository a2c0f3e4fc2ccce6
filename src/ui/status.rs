use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, Pane, ToastLevel};
use crate::document::Block;

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let status = status_text(model);
    let bg = match model.pane {
        Pane::Entries => Color::DarkGray,
        Pane::Editor => Color::Magenta,
    };
    let status_bar = Paragraph::new(status).style(Style::default().bg(bg).fg(Color::White));
    frame.render_widget(status_bar, area);
}

pub fn status_text(model: &Model) -> String {
    let mode = match model.pane {
        Pane::Entries => "ENTRIES",
        Pane::Editor => "EDIT",
    };
    let entry_id = model.surface.entry_id();
    let draft_indicator = if model.board.drafts.get(entry_id).is_some() {
        " [draft]"
    } else {
        ""
    };

    let document = model.surface.state().document();
    let items = document.checklist_count();
    let checklist_info = if items == 0 {
        String::new()
    } else {
        let done = document
            .blocks()
            .iter()
            .filter(|b| matches!(b, Block::ChecklistItem { checked: true, .. }))
            .count();
        format!("  [{done}/{items} done]")
    };

    let caret_info = model.surface.state().caret().map_or_else(String::new, |c| {
        format!("  Block {}, Col {}", c.block + 1, c.offset + 1)
    });

    let pending = model.surface.state().pending();
    let pending_info = [("bold", pending.bold), ("italic", pending.italic)]
        .into_iter()
        .filter_map(|(name, value)| value.map(|on| format!(" [{}{name}]", if on { '+' } else { '-' })))
        .collect::<String>();

    format!(" {mode}  #{entry_id}{draft_indicator}{checklist_info}{caret_info}{pending_info}  ?:help")
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
