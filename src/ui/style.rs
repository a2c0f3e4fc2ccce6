//! Colors and modifiers for the journal UI.
//!
//! Uses ANSI colors that adapt to the terminal's color palette.

use ratatui::style::{Color, Modifier, Style};

use super::projection::RunStyle;
use crate::journal::Mood;

/// Map a projected run to a terminal style.
pub fn style_for_run(run: RunStyle) -> Style {
    let mut style = Style::default();

    if run.assist {
        style = style.fg(Color::Magenta).add_modifier(Modifier::ITALIC);
    }
    if run.checkbox {
        style = style.fg(Color::Yellow).add_modifier(Modifier::BOLD);
    } else if run.checked {
        style = style
            .fg(Color::Indexed(245))
            .add_modifier(Modifier::CROSSED_OUT);
    }
    if run.bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    if run.italic {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if run.highlight {
        style = style.bg(Color::Yellow).fg(Color::Black);
    }
    if run.selected {
        style = style.bg(Color::Blue).fg(Color::White);
    }

    style
}

pub const fn mood_color(mood: Mood) -> Color {
    match mood {
        Mood::Centered => Color::Green,
        Mood::Stressed => Color::Red,
        Mood::Hopeful => Color::Cyan,
        Mood::Reflective => Color::Magenta,
    }
}

pub fn caret_style() -> Style {
    Style::default().bg(Color::White).fg(Color::Black)
}

pub fn toolbar_key_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

pub fn dim_style() -> Style {
    Style::default().fg(Color::Indexed(245))
}

pub fn focused_border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}
