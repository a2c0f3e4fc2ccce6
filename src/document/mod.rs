//! Journal document model.
//!
//! This module handles:
//! - Normalizing incoming entry content into an HTML fragment
//! - Parsing that fragment into top-level blocks
//! - Viewing a block's inline markup as caret-addressable items
//! - Serializing blocks back to the canonical HTML string

pub mod html;
pub mod inline;
mod normalize;
mod types;

pub use inline::{InlineContent, InlineItem, InlineTag, ItemKind};
pub use normalize::{ContentInput, looks_like_markup, normalize, plain_text_to_html};
pub use types::{Block, Document, ParagraphKind};
