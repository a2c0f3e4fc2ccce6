use thiserror::Error;

/// Precondition failures reported by the checked surface and journal APIs.
///
/// The editing commands themselves never fail; these only come from the
/// `try_` entry points that address blocks, actions or entries by name.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("block {index} is out of range (document has {len} blocks)")]
    InvalidBlock { index: usize, len: usize },

    #[error("block {0} is not a checklist item")]
    NotChecklist(usize),

    #[error("unknown formatting action `{0}`")]
    UnknownAction(String),

    #[error("no journal entry with id `{0}`")]
    UnknownEntry(String),
}
