// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. editor::EditorState)
    clippy::module_name_repetitions
)]

//! # Reverie
//!
//! A terminal journal built around a rich-text editing surface.
//!
//! The surface edits a document of paragraph and checklist blocks with
//! bold, italic, highlight, checklist and assist-prompt formatting, and
//! reports every committed change to its owner as an HTML string.
//!
//! ## Architecture
//!
//! The editor is an explicit state (blocks plus selection) transformed by
//! pure functions. The terminal front-end uses The Elm Architecture (TEA):
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`document`]: Block model, HTML fragments, content normalization
//! - [`editor`]: Editor state, edit commands, formatting, the surface
//! - [`journal`]: Journal entries and the draft store
//! - [`app`]: Main application loop and state
//! - [`ui`]: Terminal UI components
//! - [`config`]: Saved flag defaults

pub mod app;
pub mod config;
pub mod document;
pub mod editor;
pub mod error;
pub mod journal;
pub mod perf;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::document::{Block, ContentInput, Document};
    pub use crate::editor::{
        ChangeListener, EditCommand, EditorState, FormattingAction, RichTextSurface,
    };
    pub use crate::error::SurfaceError;
}
