//! Data models for the pet adoption server.
//!
//! Field names serialize in camelCase with the identifier under `_id`, which is
//! the document shape the web client reads.

mod adoption;
mod campaign;
mod pet;

pub use adoption::*;
pub use campaign::*;
pub use pet::*;

use chrono::{SecondsFormat, Utc};

/// Current time as a fixed-width RFC 3339 string.
///
/// Fixed width keeps lexical order equal to chronological order in the store.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Generate a new document identifier.
pub fn new_document_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
