//! Transient user notifications
//!
//! The store reports user-visible outcomes ("Report created successfully")
//! through a [`Notifier`]; how they are shown is up to the front end.

use std::cell::RefCell;
use std::rc::Rc;

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// A short message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

/// Sink for notifications
pub trait Notifier {
    fn notify(&mut self, notification: &Notification);
}

/// Sends notifications to the log only
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, notification: &Notification) {
        match notification.level {
            NotificationLevel::Error => tracing::error!(text = %notification.message, "notification"),
            NotificationLevel::Warning => tracing::warn!(text = %notification.message, "notification"),
            _ => tracing::info!(text = %notification.message, "notification"),
        }
    }
}

/// Keeps every notification; clones share the same buffer
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    seen: Rc<RefCell<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything notified so far
    pub fn notifications(&self) -> Vec<Notification> {
        self.seen.borrow().clone()
    }

    /// Messages only, in order
    pub fn messages(&self) -> Vec<String> {
        self.seen.borrow().iter().map(|n| n.message.clone()).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, notification: &Notification) {
        self.seen.borrow_mut().push(notification.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_clones_share_buffer() {
        let recorder = RecordingNotifier::new();
        let mut handle: Box<dyn Notifier> = Box::new(recorder.clone());

        handle.notify(&Notification::success("Report created successfully"));
        handle.notify(&Notification::error("Storage unavailable"));

        assert_eq!(
            recorder.messages(),
            vec!["Report created successfully", "Storage unavailable"]
        );
        assert_eq!(recorder.notifications()[1].level, NotificationLevel::Error);
    }

    #[test]
    fn test_log_notifier_does_not_panic() {
        crate::logging::init_test();
        LogNotifier.notify(&Notification::warning("careful"));
    }
}
