//! Highlight persistence
//!
//! Payload shaping for the configured storage method and the HTTP client
//! that talks to the highlight backend.

mod client;
mod payload;

pub use client::{HighlightStore, HttpHighlightStore, StoreError};
pub use payload::{StorageMethod, UpdatePayload};

#[cfg(test)]
pub use client::mock::RecordingStore;
