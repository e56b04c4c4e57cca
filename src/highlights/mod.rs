//! Highlight model and codec
//!
//! The viewer form is what the browser UI renders; the storage form is what
//! the persistence backend understands. `codec` maps between them.

mod codec;
mod types;

pub use codec::{document_id, to_stored, to_viewer};
pub use types::{Comment, Highlight, HighlightContent, HighlightPosition, Rect, StoredHighlight};
