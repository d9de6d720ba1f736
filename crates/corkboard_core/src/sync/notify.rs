//! User-visible notification seam.
//!
//! # Responsibility
//! - Let the synchronizer report success/failure toasts without owning
//!   any rendering.

/// Sink for user-visible success/failure notices.
pub trait NotificationSink {
    fn success(&mut self, message: &str);
    fn error(&mut self, message: &str);
}

/// Drops every notice. Default wiring for headless use.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSink;

impl NotificationSink for SilentSink {
    fn success(&mut self, _message: &str) {}
    fn error(&mut self, _message: &str) {}
}

/// Records notices in order; used by tests and diagnostics.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub successes: Vec<String>,
    pub errors: Vec<String>,
}

impl NotificationSink for RecordingSink {
    fn success(&mut self, message: &str) {
        self.successes.push(message.to_string());
    }

    fn error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}
