//! Marginalia Server Library
//!
//! Backend engine for a browser PDF annotation UI: keyword search with an
//! OCR-document fallback, highlight persistence through a storage-method
//! agnostic payload, and anchor-based navigation resolution.
//!
//! # Modules
//!
//! - `highlights`: viewer/storage highlight forms and the codec between them
//! - `search`: search orchestration and the text-search collaborator seam
//! - `storage`: payload shaping and the highlight backend client
//! - `navigation`: fragment-anchor resolution with pending-anchor buffering
//! - `documents`: per-document sessions holding the in-memory highlight set
//! - `routes`: the HTTP surface exposed to the UI

pub mod config;
pub mod documents;
pub mod error;
pub mod highlights;
pub mod navigation;
pub mod routes;
pub mod search;
pub mod state;
pub mod storage;
