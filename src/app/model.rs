use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::config::InputMode;
use crate::document::ContentInput;
use crate::editor::{RichTextSurface, SyncOutcome};
use crate::journal::{EditorContent, JournalBoard};

const TOAST_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// Which pane receives key input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Pane {
    #[default]
    Entries,
    Editor,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
#[derive(Debug, Clone, Default)]
pub struct Model {
    /// Entries and drafts (the owner of the surface's output)
    pub board: JournalBoard,
    /// Editing surface for the active entry
    pub surface: RichTextSurface,
    /// Pane with key focus
    pub pane: Pane,
    /// How entry content is interpreted when seeding the surface
    pub input_mode: InputMode,
    /// Whether the formatting toolbar row is shown
    pub toolbar_visible: bool,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Terminal width and height, updated on resize
    pub terminal_size: (u16, u16),
    /// First editor row shown
    pub editor_scroll_offset: usize,
    toast: Option<Toast>,
    /// Global config file location shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override file shown in help
    pub config_local_path: Option<PathBuf>,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl Model {
    pub fn new(board: JournalBoard, input_mode: InputMode, terminal_size: (u16, u16)) -> Self {
        let (entry_id, input) = active_input(&board, input_mode)
            .unwrap_or_else(|| (String::new(), ContentInput::PlainText(String::new())));
        let surface = RichTextSurface::new(entry_id, input);
        Self {
            board,
            surface,
            pane: Pane::Entries,
            input_mode,
            toolbar_visible: true,
            help_visible: false,
            terminal_size,
            editor_scroll_offset: 0,
            toast: None,
            config_global_path: None,
            config_local_path: None,
            should_quit: false,
        }
    }

    /// Offer the board's current content for the active entry to the
    /// surface. Runs after every update, so while the editor has focus this
    /// is the owner's echo of our own edit and the surface ignores it.
    pub fn sync_surface(&mut self) -> SyncOutcome {
        let Some((entry_id, input)) = active_input(&self.board, self.input_mode) else {
            return SyncOutcome::Unchanged;
        };
        self.surface.sync(&entry_id, input)
    }

    pub fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + TOAST_DURATION,
        });
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .filter(|t| Instant::now() < t.expires_at)
            .map(|t| (t.message.as_str(), t.level))
    }

    pub const fn has_toast(&self) -> bool {
        self.toast.is_some()
    }

    pub fn expire_toast(&mut self) {
        if self.toast.as_ref().is_some_and(|t| Instant::now() >= t.expires_at) {
            self.toast = None;
        }
    }

    pub const fn resize(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
    }

    /// Width and height of the editor body for the current terminal size.
    pub fn editor_body(&self) -> (u16, u16) {
        crate::ui::editor_body_size(self.terminal_size, self.toolbar_visible)
    }

    /// Keep the caret row inside the visible editor rows.
    pub fn scroll_to_row(&mut self, row: usize) {
        let height = usize::from(self.editor_body().1.max(1));
        if row < self.editor_scroll_offset {
            self.editor_scroll_offset = row;
        } else if row >= self.editor_scroll_offset + height {
            self.editor_scroll_offset = row + 1 - height;
        }
    }
}

/// The active entry's editor content. Drafts are always surface output and
/// therefore markup; stored content is classified by the input mode.
fn active_input(board: &JournalBoard, mode: InputMode) -> Option<(String, ContentInput)> {
    let (entry_id, content) = board.editor_content()?;
    let input = match content {
        EditorContent::Draft(html) => ContentInput::Html(html.to_string()),
        EditorContent::Stored(raw) => mode.classify(raw),
    };
    Some((entry_id.to_string(), input))
}
