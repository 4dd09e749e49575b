//! In-memory log of marked requests and their descriptions.
//!
//! The log is append-only: saving the same request twice yields two entries.
//! Export order is insertion order.

mod export;
mod shared;

pub use export::{write_csv, ExportError, CSV_HEADER};
pub use shared::SharedRequestLog;

/// One marked request with the description the user gave it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    request: Vec<u8>,
    description: String,
}

impl Entry {
    pub fn new(request: impl Into<Vec<u8>>, description: impl Into<String>) -> Self {
        Self {
            request: request.into(),
            description: description.into(),
        }
    }

    /// Raw request bytes as captured.
    pub fn request(&self) -> &[u8] {
        &self.request
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Ordered, append-only sequence of [`Entry`].
#[derive(Debug, Default, Clone)]
pub struct RequestLog {
    entries: Vec<Entry>,
}

impl RequestLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new entry at the end. Never fails and never merges with an
    /// existing entry for the same request.
    pub fn append_entry(&mut self, request: impl Into<Vec<u8>>, description: impl Into<String>) {
        self.entries.push(Entry::new(request, description));
        tracing::debug!(len = self.entries.len(), "appended entry to request log");
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
