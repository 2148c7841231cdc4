//! User-facing notifications
//!
//! The form only ever appends messages. Expiry belongs to the sink: each
//! toast in a [`ToastQueue`] carries its own deadline and leaves the queue
//! independently of the others.

use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// How long a toast stays visible unless configured otherwise
pub const DEFAULT_TOAST_TTL: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Fire-and-forget receiver of user-facing messages
pub trait NotificationSink: Send + Sync {
    fn notify(&self, message: &str, kind: NotificationKind);
}

/// Fixed texts shown to the user
pub mod messages {
    pub const SUBMITTED: &str = "Inspection submitted successfully";
    pub const DELETED: &str = "Inspection deleted successfully";
    pub const PAYLOAD_TOO_LARGE: &str =
        "Request entity too large. Please reduce the size or number of images.";

    pub fn create_failed(detail: &str) -> String {
        format!("Error creating inspection: {}", detail)
    }

    pub fn delete_failed(detail: &str) -> String {
        format!("Error deleting inspection: {}", detail)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: Uuid,
    pub message: String,
    pub kind: NotificationKind,
    pub expires_at: Instant,
}

/// Shared queue of timed notifications
#[derive(Debug)]
pub struct ToastQueue {
    ttl: Duration,
    toasts: Mutex<Vec<Toast>>,
}

impl ToastQueue {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            toasts: Mutex::new(Vec::new()),
        }
    }

    /// Append a toast expiring `ttl` after `now`
    pub fn push_at(&self, message: &str, kind: NotificationKind, now: Instant) -> Uuid {
        let toast = Toast {
            id: Uuid::new_v4(),
            message: message.to_string(),
            kind,
            expires_at: now + self.ttl,
        };
        let id = toast.id;
        self.lock().push(toast);
        id
    }

    /// Toasts still visible at `now`, oldest first
    pub fn active(&self, now: Instant) -> Vec<Toast> {
        self.lock()
            .iter()
            .filter(|toast| toast.expires_at > now)
            .cloned()
            .collect()
    }

    /// Remove one toast before its deadline. Returns false if already gone.
    pub fn dismiss(&self, id: Uuid) -> bool {
        let mut toasts = self.lock();
        let before = toasts.len();
        toasts.retain(|toast| toast.id != id);
        toasts.len() != before
    }

    /// Drop every toast whose deadline has passed; returns how many went
    pub fn prune(&self, now: Instant) -> usize {
        let mut toasts = self.lock();
        let before = toasts.len();
        toasts.retain(|toast| toast.expires_at > now);
        before - toasts.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Toast>> {
        self.toasts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_TTL)
    }
}

impl NotificationSink for ToastQueue {
    fn notify(&self, message: &str, kind: NotificationKind) {
        self.push_at(message, kind, Instant::now());
    }
}
