//! User-notification seam.
//!
//! Components report user-facing error conditions through a [`Notifier`]
//! instead of printing directly, so hosts can route messages to whatever
//! surface they own (notification toast, status line, stderr).

use std::sync::Mutex;

use tracing::error;

/// Receives user-visible messages.
pub trait Notifier: Send + Sync {
    /// Surface an error message to the user. Must not block or fail.
    fn notify_error(&self, message: &str);
}

/// Notifier that routes messages to the `tracing` pipeline.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify_error(&self, message: &str) {
        error!(message, "user notification");
    }
}

/// Notifier that retains messages for inspection in tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().expect("notifier lock poisoned").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify_error(&self, message: &str) {
        self.messages
            .lock()
            .expect("notifier lock poisoned")
            .push(message.to_string());
    }
}
