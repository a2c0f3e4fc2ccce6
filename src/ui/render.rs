use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{Model, Pane};
use crate::editor::FormattingAction;

use super::projection::project;
use super::style::{caret_style, dim_style, focused_border_style, mood_color, style_for_run, toolbar_key_style};
use super::{ENTRY_ROWS, ENTRY_WIDTH_PERCENT, EDITOR_WIDTH_PERCENT, overlays, status};

/// Shown in an empty editor body.
pub const EMPTY_HINT: &str = "Capture what is present for you right now...";

/// Screen regions, derived from the terminal area alone so input handling
/// can hit-test with the same geometry the renderer used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub entries: Rect,
    pub editor: Rect,
    pub header: Rect,
    pub toolbar: Option<Rect>,
    pub body: Rect,
    pub status: Rect,
}

pub fn screen_layout(area: Rect, toolbar_visible: bool) -> ScreenLayout {
    let [main, status] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);
    let [entries, editor] = Layout::horizontal([
        Constraint::Percentage(ENTRY_WIDTH_PERCENT),
        Constraint::Percentage(EDITOR_WIDTH_PERCENT),
    ])
    .areas(main);
    let inner = editor.inner(Margin::new(1, 1));
    let [header, toolbar, body] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(u16::from(toolbar_visible)),
        Constraint::Min(0),
    ])
    .areas(inner);
    ScreenLayout {
        entries,
        editor,
        header,
        toolbar: toolbar_visible.then_some(toolbar),
        body,
        status,
    }
}

/// Width and height of the editor body for a terminal of `size`.
pub fn editor_body_size(size: (u16, u16), toolbar_visible: bool) -> (u16, u16) {
    let body = screen_layout(Rect::new(0, 0, size.0, size.1), toolbar_visible).body;
    (body.width, body.height)
}

/// First entry shown so that the active one stays visible.
pub const fn entry_list_start(active: usize, visible: usize) -> usize {
    if visible == 0 || active < visible {
        0
    } else {
        active + 1 - visible
    }
}

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let _scope = crate::perf::scope("ui.render");
    let area = frame.area();
    let layout = screen_layout(area, model.toolbar_visible);

    render_entries(model, frame, layout.entries);
    render_editor(model, frame, &layout);

    if model.active_toast().is_some() {
        status::render_toast_bar(model, frame, layout.status);
    } else {
        status::render_status_bar(model, frame, layout.status);
    }

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

fn render_entries(model: &Model, frame: &mut Frame, area: Rect) {
    let entries = model.board.entries();
    let active = model.board.active_index();
    let visible = usize::from(area.height.saturating_sub(2)) / ENTRY_ROWS;
    let start = entry_list_start(active.unwrap_or(0), visible);

    let mut lines: Vec<Line> = Vec::new();
    for (idx, entry) in entries.iter().enumerate().skip(start).take(visible) {
        let selected = active == Some(idx);
        let marker = if selected { ">" } else { " " };
        let draft = if model.board.drafts.get(&entry.id).is_some() {
            " *"
        } else {
            ""
        };
        let title_style = if selected {
            Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        lines.push(Line::from(vec![
            Span::raw(format!("{marker} ")),
            Span::styled("● ", Style::default().fg(mood_color(entry.mood))),
            Span::styled(format!("{}{draft}", entry.title), title_style),
        ]));
        lines.push(Line::styled(format!("    {}", entry.updated_at), dim_style()));
    }

    let block = Block::default()
        .title("Reflections")
        .borders(Borders::ALL)
        .border_style(focused_border_style(model.pane == Pane::Entries));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_editor(model: &Model, frame: &mut Frame, layout: &ScreenLayout) {
    let entry = model.board.active_entry();
    let title = entry.map_or("Untitled reflection", |e| e.title.as_str());
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(focused_border_style(model.pane == Pane::Editor));
    frame.render_widget(block, layout.editor);

    if let Some(entry) = entry {
        let tags = entry
            .tags
            .iter()
            .map(|t| format!("#{t}"))
            .collect::<Vec<_>>()
            .join(" ");
        let header = Line::from(vec![
            Span::styled(
                format!("{:?}", entry.mood),
                Style::default().fg(mood_color(entry.mood)),
            ),
            Span::styled(format!("  {}  {tags}", entry.updated_at), dim_style()),
        ]);
        frame.render_widget(Paragraph::new(header), layout.header);
    }

    if let Some(toolbar) = layout.toolbar {
        frame.render_widget(Paragraph::new(toolbar_line()), toolbar);
    }

    render_body(model, frame, layout.body);
}

fn toolbar_line() -> Line<'static> {
    let mut spans = Vec::new();
    for (idx, action) in FormattingAction::ALL.into_iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled(" │ ", dim_style()));
        }
        spans.push(Span::raw(format!("{} ", action.label())));
        spans.push(Span::styled(format!("F{}", idx + 2), toolbar_key_style()));
    }
    Line::from(spans)
}

fn render_body(model: &Model, frame: &mut Frame, area: Rect) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let state = model.surface.state();
    let projection = project(state, area.width);

    if state.document().is_empty() && model.pane != Pane::Editor {
        frame.render_widget(Paragraph::new(Line::styled(EMPTY_HINT, dim_style())), area);
        return;
    }

    let start = model.editor_scroll_offset;
    let lines: Vec<Line> = projection
        .lines
        .iter()
        .skip(start)
        .take(usize::from(area.height))
        .map(|line| {
            Line::from(
                line.runs
                    .iter()
                    .map(|run| Span::styled(run.text.clone(), style_for_run(run.style)))
                    .collect::<Vec<_>>(),
            )
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);

    if model.pane != Pane::Editor {
        return;
    }
    let Some((row, col)) = projection.caret else {
        return;
    };
    let Some(visible_row) = row.checked_sub(start).filter(|r| *r < usize::from(area.height)) else {
        return;
    };
    let x = area.x + col.min(area.width.saturating_sub(1));
    let y = area.y + u16::try_from(visible_row).unwrap_or(u16::MAX);
    if let Some(cell) = frame.buffer_mut().cell_mut((x, y)) {
        cell.set_style(caret_style());
    }
    frame.set_cursor_position((x, y));
}
