//! Block editor for journal entries.
//!
//! Provides an owned editor state (blocks plus selection), pure edit
//! transitions over it, and the surface that guards it against external
//! reseeding while focused. Designed for integration into the TEA
//! architecture.

pub mod checklist;
mod commands;
mod format;
mod state;
mod surface;

pub use commands::{EditCommand, Motion, apply};
pub use format::{ASSIST_PROMPT, FormattingAction, HIGHLIGHT_PLACEHOLDER, apply_formatting};
pub use state::{Caret, EditorState, PendingStyles, Selection};
pub use surface::{ChangeListener, RichTextSurface, SyncOutcome};
