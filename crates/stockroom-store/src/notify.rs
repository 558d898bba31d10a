//! # Notification Collaborator
//!
//! Fire-and-forget success/error toasts.
//!
//! Store operations call the notifier but never depend on delivery or
//! acknowledgment - a notifier that drops every message changes
//! nothing about store behavior. The presentation layer supplies an
//! implementation that renders actual toasts; the default here routes
//! messages to the log.

use std::sync::{Arc, Mutex};

use tracing::{info, warn};

/// Toast sink injected into every store.
///
/// Implementations must be cheap and non-blocking: stores call this
/// while holding their own locks.
pub trait Notifier: Send + Sync {
    /// A user-visible success message.
    fn success(&self, message: &str);

    /// A user-visible error message.
    fn error(&self, message: &str);
}

/// Notifier that writes toasts to the tracing log.
///
/// Used when no presentation layer is attached (tests, headless
/// tooling).
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn success(&self, message: &str) {
        info!(toast = "success", "{message}");
    }

    fn error(&self, message: &str) {
        warn!(toast = "error", "{message}");
    }
}

/// Severity of a recorded toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// Notifier that records every toast in memory.
///
/// Lets tests (and UI harnesses) assert on exactly which messages an
/// operation emitted.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    toasts: Mutex<Vec<(ToastKind, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Returns a copy of every toast recorded so far, oldest first.
    pub fn toasts(&self) -> Vec<(ToastKind, String)> {
        self.toasts.lock().expect("Notifier mutex poisoned").clone()
    }

    /// Returns only the recorded error messages.
    pub fn errors(&self) -> Vec<String> {
        self.toasts()
            .into_iter()
            .filter(|(kind, _)| *kind == ToastKind::Error)
            .map(|(_, msg)| msg)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.toasts
            .lock()
            .expect("Notifier mutex poisoned")
            .push((ToastKind::Success, message.to_string()));
    }

    fn error(&self, message: &str) {
        self.toasts
            .lock()
            .expect("Notifier mutex poisoned")
            .push((ToastKind::Error, message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::new();
        notifier.success("added");
        notifier.error("out of stock");
        notifier.success("removed");

        let toasts = notifier.toasts();
        assert_eq!(toasts.len(), 3);
        assert_eq!(toasts[0], (ToastKind::Success, "added".to_string()));
        assert_eq!(notifier.errors(), vec!["out of stock".to_string()]);
    }
}
