use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;
use crate::editor::FormattingAction;

use super::style::dim_style;

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(4).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let global_cfg = model
        .config_global_path
        .as_ref()
        .map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string());
    let local_cfg = model
        .config_local_path
        .as_ref()
        .map_or_else(|| "<none>".to_string(), |p| p.display().to_string());

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut all_lines: Vec<Line> = Vec::new();

    all_lines.push(Line::styled("Entries", section_style));
    all_lines.push(Line::raw("  j/k or Up/Down      Select entry"));
    all_lines.push(Line::raw("  Enter / Tab / i     Edit entry"));
    all_lines.push(Line::raw("  t                   Toggle toolbar"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Formatting", section_style));
    for (action, key) in FormattingAction::ALL.into_iter().zip(FORMAT_KEYS) {
        all_lines.push(Line::raw(format!("  {key:<20}{}", action.label())));
    }
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Editor", section_style));
    all_lines.push(Line::raw("  Enter               New paragraph / continue list"));
    all_lines.push(Line::raw("  Shift/Alt+Enter     Line break"));
    all_lines.push(Line::raw("  Ctrl-x or click [ ] Toggle checkbox"));
    all_lines.push(Line::raw("  Shift+Arrows        Extend selection"));
    all_lines.push(Line::raw("  Home/End            Block start / end"));
    all_lines.push(Line::raw("  Ctrl+Home/End       Entry start / end"));
    all_lines.push(Line::raw("  Ctrl-a              Select all"));
    all_lines.push(Line::raw("  Esc                 Back to entries"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Other", section_style));
    all_lines.push(Line::raw("  q / Ctrl-c / Ctrl-q Quit"));
    all_lines.push(Line::raw("  ? / F1              Toggle help"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Config", section_style));
    all_lines.push(Line::raw(format!("  Global: {global_cfg}")));
    all_lines.push(Line::raw(format!("  Local override: {local_cfg}")));

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));

    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    // Inner area: border(1) + padding(1) on each side = 4
    let inner = Rect::new(
        popup.x + 2,
        popup.y + 2,
        popup.width.saturating_sub(4),
        popup.height.saturating_sub(4),
    );

    let content_height = inner.height.saturating_sub(1);
    let visible: Vec<Line> = all_lines
        .into_iter()
        .take(usize::from(content_height))
        .collect();
    frame.render_widget(
        Paragraph::new(visible),
        Rect::new(inner.x, inner.y, inner.width, content_height),
    );

    let footer_area = Rect::new(inner.x, inner.y + content_height, inner.width, 1);
    let footer = Line::styled("any key closes", dim_style());
    frame.render_widget(Paragraph::new(footer), footer_area);
}

/// Key hints shown next to each toolbar action, in toolbar order.
pub const FORMAT_KEYS: [&str; 5] = [
    "Ctrl-b / F2",
    "Ctrl-e / F3",
    "Ctrl-g / F4",
    "Ctrl-l / F5",
    "Ctrl-Space / F6",
];

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
