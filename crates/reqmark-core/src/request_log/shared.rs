//! Thread-safe handle to a [`RequestLog`].

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use super::{Entry, ExportError, RequestLog};
use crate::decode::RequestDecoding;

/// Cloneable handle; append and export are serialized by one lock.
#[derive(Debug, Clone, Default)]
pub struct SharedRequestLog {
    inner: Arc<Mutex<RequestLog>>,
}

impl SharedRequestLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, RequestLog> {
        // A poisoned lock still guards a valid log.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Appends and returns the index of the new entry.
    pub fn append_entry(&self, request: impl Into<Vec<u8>>, description: impl Into<String>) -> usize {
        let mut log = self.lock();
        log.append_entry(request, description);
        log.len() - 1
    }

    /// Holds the lock for the whole write so no append interleaves.
    pub fn export_csv(
        &self,
        path: impl AsRef<Path>,
        decoding: RequestDecoding,
    ) -> Result<(), ExportError> {
        self.lock().export_csv(path, decoding)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of the current entries, in order.
    pub fn snapshot(&self) -> Vec<Entry> {
        self.lock().entries().to_vec()
    }
}
