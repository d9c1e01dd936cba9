use std::time::{Duration, Instant};

/// Tone of a transient status message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

/// A transient message shown above the console.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
    pub created_at: Instant,
}

/// Holds at most one status message and drops it once it has aged out.
///
/// There is no queue: posting replaces the current message and restarts
/// the expiry.
#[derive(Clone, Debug)]
pub struct StatusNotifier {
    current: Option<StatusMessage>,
    ttl: Duration,
}

impl Default for StatusNotifier {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TTL)
    }
}

impl StatusNotifier {
    /// How long a message stays visible.
    pub const DEFAULT_TTL: Duration = Duration::from_millis(3000);

    pub fn new(ttl: Duration) -> Self {
        Self { current: None, ttl }
    }

    pub fn post(&mut self, text: impl Into<String>, kind: StatusKind, now: Instant) {
        self.current = Some(StatusMessage {
            text: text.into(),
            kind,
            created_at: now,
        });
    }

    /// The visible message, if one was posted less than the TTL ago.
    pub fn current(&self, now: Instant) -> Option<&StatusMessage> {
        self.current
            .as_ref()
            .filter(|message| !self.is_expired(message, now))
    }

    /// Drop the message once it has aged out. Returns true when one was dropped.
    pub fn expire(&mut self, now: Instant) -> bool {
        let expired = self
            .current
            .as_ref()
            .is_some_and(|message| self.is_expired(message, now));
        if expired {
            self.current = None;
        }
        expired
    }

    fn is_expired(&self, message: &StatusMessage, now: Instant) -> bool {
        now.saturating_duration_since(message.created_at) >= self.ttl
    }
}
