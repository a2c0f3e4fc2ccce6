//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`projection`]: Pure layout of the editor state into display lines
//! - [`style`]: Theming and colors

pub mod projection;
pub mod style;

mod overlays;
mod render;
mod status;

pub use projection::{Hit, Projection, project};
pub use render::{EMPTY_HINT, ScreenLayout, editor_body_size, entry_list_start, render, screen_layout};
pub use status::status_text;

pub const ENTRY_WIDTH_PERCENT: u16 = 30;
pub const EDITOR_WIDTH_PERCENT: u16 = 70;
/// Rows each entry takes in the entry list.
pub const ENTRY_ROWS: usize = 2;

#[cfg(test)]
mod tests;
