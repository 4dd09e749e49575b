//! Capabilities the core needs from whatever hosts it (proxy UI, CLI, tests).
//!
//! The session only ever asks the host for the currently selected captured
//! requests and for a way to show a short message to the user.

use std::sync::{Mutex, MutexGuard};

/// Source of the captured messages the user currently has selected.
pub trait MessageSource {
    /// Raw request bytes of every selected message, in selection order.
    fn selected_requests(&self) -> Vec<Vec<u8>>;
}

/// Shows a transient notification to the user.
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Fixed selection, e.g. a request loaded from a file.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    requests: Vec<Vec<u8>>,
}

impl StaticSource {
    pub fn new(requests: Vec<Vec<u8>>) -> Self {
        Self { requests }
    }

    pub fn single(request: impl Into<Vec<u8>>) -> Self {
        Self::new(vec![request.into()])
    }
}

impl MessageSource for StaticSource {
    fn selected_requests(&self) -> Vec<Vec<u8>> {
        self.requests.clone()
    }
}

/// Sends notifications to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str) {
        tracing::info!(target: "reqmark::alert", "{}", message);
    }
}

/// Keeps every notification; used by tests and batch commands.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.messages.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn messages(&self) -> Vec<String> {
        self.lock().to_vec()
    }

    pub fn last(&self) -> Option<String> {
        self.messages().pop()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.lock().push(message.to_string());
    }
}
