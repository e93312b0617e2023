//! # User-visible notifications
//!
//! Service and protocol failures are never fatal: they are turned into dismissible
//! notifications and the interaction carries on. [`Notifier`] is the sink the lookup code
//! reports to; [`NotificationLog`] is an in-memory implementation that also forwards every
//! entry to the `log` facade.

use std::sync::Arc;

use log::{error, info};
use parking_lot::Mutex;

use crate::target_errors::TargetError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Notification {
            level: NotificationLevel::Error,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Notification {
            level: NotificationLevel::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Notification {
            level: NotificationLevel::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    /// Error notification carrying the display text of `err`.
    pub fn from_error(title: impl Into<String>, err: &TargetError) -> Self {
        Notification::error(title, err.to_string())
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Notifier that keeps every notification until drained.
#[derive(Debug, Clone, Default)]
pub struct NotificationLog {
    entries: Arc<Mutex<Vec<Notification>>>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the pending notifications, oldest first.
    pub fn entries(&self) -> Vec<Notification> {
        self.entries.lock().clone()
    }

    /// Remove and return the pending notifications (the user dismissed them).
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.entries.lock())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl Notifier for NotificationLog {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Error => error!("{}: {}", notification.title, notification.message),
            _ => info!("{}: {}", notification.title, notification.message),
        }
        self.entries.lock().push(notification);
    }
}
