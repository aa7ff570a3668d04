use std::time::{Duration, Instant};

/// How long a notification stays up unless closed earlier.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    /// Not raised by the dashboard itself; available to UI callers via `notify`.
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub shown_at: Instant,
}

impl Notification {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= NOTIFICATION_TTL
    }
}

/// Holds at most one notification; a new one replaces the old.
#[derive(Debug, Default)]
pub struct NotificationSlot {
    current: Option<Notification>,
}

impl NotificationSlot {
    pub fn show(&mut self, message: impl Into<String>, kind: NotificationKind, now: Instant) {
        self.current = Some(Notification {
            message: message.into(),
            kind,
            shown_at: now,
        });
    }

    pub fn close(&mut self) {
        self.current = None;
    }

    /// Drops the notification once its time is up.
    pub fn tick(&mut self, now: Instant) {
        if self.current.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.current = None;
        }
    }

    pub fn current(&self, now: Instant) -> Option<&Notification> {
        self.current.as_ref().filter(|n| !n.is_expired(now))
    }
}
