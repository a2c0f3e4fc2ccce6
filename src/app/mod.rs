//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod event_loop;
mod input;
mod model;
mod update;

pub use input::handle_key;
pub use model::{Model, Pane, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::config::InputMode;

/// Main application struct that owns the terminal and runs the event loop.
#[derive(Debug, Clone, Default)]
pub struct App {
    entry: Option<String>,
    input_mode: InputMode,
    toolbar_visible: bool,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    pub fn new() -> Self {
        Self {
            toolbar_visible: true,
            ..Self::default()
        }
    }

    /// Open this entry instead of the first one.
    pub fn with_entry(mut self, entry: Option<String>) -> Self {
        self.entry = entry;
        self
    }

    /// Set how stored entry content is interpreted.
    pub const fn with_input_mode(mut self, mode: InputMode) -> Self {
        self.input_mode = mode;
        self
    }

    /// Set initial toolbar visibility.
    pub const fn with_toolbar_visible(mut self, visible: bool) -> Self {
        self.toolbar_visible = visible;
        self
    }

    /// Set config paths to show in help.
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }
}
