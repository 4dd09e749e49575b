//! Selection state between "mark as valid" and "save".
//!
//! The host marks a request (context-menu action), the user edits a working
//! description, and only `save_description` commits the pair to the log.
//! Listeners are told when something changed so the host can redraw.

use std::path::{Path, PathBuf};

use crate::decode::{self, RequestDecoding};
use crate::host::{MessageSource, Notifier};
use crate::request_log::{ExportError, SharedRequestLog};

pub const MSG_MARKED: &str = "Request marked as valid. Add a description and save it.";
pub const MSG_SAVED: &str = "Description saved for the request.";
pub const MSG_NO_SELECTION: &str = "No valid request selected!";
pub const MSG_EXPORT_FAILED: &str = "Error exporting data";
pub const SUMMARY_EMPTY: &str = "No request marked as valid.";

/// What changed in a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A new request is selected and the working description was reset.
    Marked,
    /// The selection was appended to the log at `index`.
    Saved { index: usize },
    /// The log was written to `path`.
    Exported { path: PathBuf },
}

type Listener = Box<dyn Fn(&SessionEvent) + Send + Sync>;

pub struct Session<N: Notifier> {
    log: SharedRequestLog,
    notifier: N,
    decoding: RequestDecoding,
    selected: Option<Vec<u8>>,
    description: String,
    listeners: Vec<Listener>,
}

impl<N: Notifier> Session<N> {
    pub fn new(log: SharedRequestLog, notifier: N, decoding: RequestDecoding) -> Self {
        Self {
            log,
            notifier,
            decoding,
            selected: None,
            description: String::new(),
            listeners: Vec::new(),
        }
    }

    /// Register a change listener. Listeners run in registration order.
    pub fn subscribe(&mut self, listener: impl Fn(&SessionEvent) + Send + Sync + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn emit(&self, event: SessionEvent) {
        for listener in &self.listeners {
            listener(&event);
        }
    }

    /// Select the first message the host reports as selected.
    /// Returns false (and changes nothing) when the host has no selection.
    pub fn mark_as_valid(&mut self, source: &dyn MessageSource) -> bool {
        let Some(request) = source.selected_requests().into_iter().next() else {
            self.notifier.notify(MSG_NO_SELECTION);
            return false;
        };
        tracing::debug!(bytes = request.len(), "request marked as valid");
        self.selected = Some(request);
        self.description.clear();
        self.notifier.notify(MSG_MARKED);
        self.emit(SessionEvent::Marked);
        true
    }

    /// Replace the working description. The log is not touched.
    pub fn set_description(&mut self, text: impl Into<String>) {
        self.description = text.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn selected_request(&self) -> Option<&[u8]> {
        self.selected.as_deref()
    }

    /// Append the selection with the working description to the log.
    /// Every save appends, even for a request saved before.
    pub fn save_description(&mut self) -> Option<usize> {
        let Some(request) = self.selected.as_ref() else {
            self.notifier.notify(MSG_NO_SELECTION);
            return None;
        };
        let index = self
            .log
            .append_entry(request.clone(), self.description.clone());
        tracing::info!(index, "saved description for marked request");
        self.notifier.notify(MSG_SAVED);
        self.emit(SessionEvent::Saved { index });
        Some(index)
    }

    /// Export the log and tell the user how it went.
    pub fn export_report(&self, path: &Path) -> Result<(), ExportError> {
        match self.log.export_csv(path, self.decoding) {
            Ok(()) => {
                self.notifier
                    .notify(&format!("Data successfully exported to {}", path.display()));
                self.emit(SessionEvent::Exported {
                    path: path.to_path_buf(),
                });
                Ok(())
            }
            Err(e) => {
                self.notifier.notify(MSG_EXPORT_FAILED);
                Err(e)
            }
        }
    }

    /// One-line status: a preview of the selected request, if any.
    pub fn summary(&self, preview_chars: usize) -> String {
        match &self.selected {
            Some(request) => {
                let text = self.decoding.decode(request);
                format!("Valid Request: {}...", decode::preview(&text, preview_chars))
            }
            None => SUMMARY_EMPTY.to_string(),
        }
    }

    pub fn log(&self) -> &SharedRequestLog {
        &self.log
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}
