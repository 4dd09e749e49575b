//! Notifications shown on the terminal.

use reqmark_core::host::{Notifier, TracingNotifier};

/// Prints each notification on its own line and mirrors it to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutNotifier;

impl Notifier for StdoutNotifier {
    fn notify(&self, message: &str) {
        println!("{}", message);
        TracingNotifier.notify(message);
    }
}
