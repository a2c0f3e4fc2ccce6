use super::*;
use crate::app::{Message, Model, ToastLevel, update};
use crate::config::InputMode;
use crate::editor::{EditCommand, FormattingAction};
use crate::journal::JournalBoard;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

fn create_test_terminal() -> Terminal<TestBackend> {
    let backend = TestBackend::new(100, 30);
    Terminal::new(backend).unwrap()
}

fn create_model() -> Model {
    Model::new(JournalBoard::with_samples(), InputMode::Auto, (100, 30))
}

fn draw(model: &Model) -> Buffer {
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(model, frame)).unwrap();
    terminal.backend().buffer().clone()
}

fn screen_text(buffer: &Buffer) -> String {
    buffer.content().iter().map(|c| c.symbol()).collect::<String>()
}

fn row_text(buffer: &Buffer, area: Rect, row: u16) -> String {
    (area.x..area.x + area.width)
        .map(|x| buffer[(x, area.y + row)].symbol())
        .collect::<String>()
}

#[test]
fn test_render_lists_entries_and_active_title() {
    let model = create_model();
    let text = screen_text(&draw(&model));
    assert!(text.contains("Reflections"));
    assert!(text.contains("Morning grounding practice"));
    assert!(text.contains("Weekend rewind"));
    assert!(text.contains("#mindfulness #routine"));
}

#[test]
fn test_toolbar_shows_every_action() {
    let model = create_model();
    let layout = screen_layout(Rect::new(0, 0, 100, 30), true);
    let buffer = draw(&model);
    let toolbar = row_text(&buffer, layout.toolbar.unwrap(), 0);
    for action in FormattingAction::ALL {
        assert!(toolbar.contains(action.label()), "missing {}", action.label());
    }
}

#[test]
fn test_hidden_toolbar_gives_body_an_extra_row() {
    let with = editor_body_size((100, 30), true);
    let without = editor_body_size((100, 30), false);
    assert_eq!(without.1, with.1 + 1);
    assert_eq!(with.0, without.0);
}

#[test]
fn test_body_shows_entry_text() {
    let model = create_model();
    let layout = screen_layout(Rect::new(0, 0, 100, 30), true);
    let buffer = draw(&model);
    let first = row_text(&buffer, layout.body, 0);
    assert!(first.starts_with("Started the day"));
}

#[test]
fn test_checklist_renders_checkbox_prefix() {
    let model = update(create_model(), Message::FocusEditor);
    let model = update(model, Message::Format(FormattingAction::Checklist));
    let model = update(model, Message::Edit(EditCommand::InsertText("water plants".to_string())));
    let text = screen_text(&draw(&model));
    assert!(text.contains("[ ] water plants"));

    let model = update(model, Message::ToggleCheckedAtCaret);
    let text = screen_text(&draw(&model));
    assert!(text.contains("[x] water plants"));
}

#[test]
fn test_caret_cell_is_highlighted_when_editing() {
    let model = update(create_model(), Message::FocusEditor);
    let model = update(
        model,
        Message::Edit(EditCommand::MoveCaret {
            motion: crate::editor::Motion::DocumentStart,
            extend: false,
        }),
    );
    let layout = screen_layout(Rect::new(0, 0, 100, 30), true);
    let buffer = draw(&model);
    let cell = &buffer[(layout.body.x, layout.body.y)];
    assert_eq!(cell.symbol(), "S");
    assert_eq!(cell.bg, ratatui::style::Color::White);
}

#[test]
fn test_status_bar_reports_mode_and_draft() {
    let model = create_model();
    assert!(status_text(&model).starts_with(" ENTRIES  #1"));

    let model = update(model, Message::FocusEditor);
    let model = update(model, Message::Edit(EditCommand::InsertText(".".to_string())));
    let status = status_text(&model);
    assert!(status.starts_with(" EDIT  #1 [draft]"));
    assert!(status.contains("Block 1"));
}

#[test]
fn test_status_bar_reports_pending_style() {
    let model = update(create_model(), Message::FocusEditor);
    let model = update(model, Message::Format(FormattingAction::Bold));
    assert!(status_text(&model).contains("[+bold]"));
}

#[test]
fn test_toast_replaces_status_bar() {
    let mut model = create_model();
    model.show_toast(ToastLevel::Warning, "careful");
    let text = screen_text(&draw(&model));
    assert!(text.contains("[warn] careful"));
    assert!(!text.contains("?:help"));
}

#[test]
fn test_help_overlay_lists_formatting_keys() {
    let model = update(create_model(), Message::ToggleHelp);
    let text = screen_text(&draw(&model));
    assert!(text.contains("Formatting"));
    assert!(text.contains("Ctrl-b / F2"));
}

#[test]
fn test_empty_entry_shows_hint() {
    let mut entry = crate::journal::sample_entries().remove(0);
    entry.content = String::new();
    let model = Model::new(JournalBoard::new(vec![entry]), InputMode::Auto, (100, 30));
    assert!(model.surface.state().document().is_empty());
    let text = screen_text(&draw(&model));
    assert!(text.contains(EMPTY_HINT));
}

#[test]
fn test_entry_list_start_keeps_active_visible() {
    assert_eq!(entry_list_start(0, 3), 0);
    assert_eq!(entry_list_start(2, 3), 0);
    assert_eq!(entry_list_start(5, 3), 3);
    assert_eq!(entry_list_start(5, 0), 0);
}
