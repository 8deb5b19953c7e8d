//! Timed, auto-dismissing status messages.

use std::time::{Duration, Instant};

/// How long a message stays visible.
pub const MESSAGE_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Error,
}

impl MessageKind {
    pub fn label(self) -> &'static str {
        match self {
            MessageKind::Info => "info",
            MessageKind::Success => "success",
            MessageKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: MessageKind,
    pub text: String,
    shown_at: Instant,
}

/// One message area under a form. A new message replaces the old one and
/// restarts the clock.
#[derive(Debug, Clone, Default)]
pub struct MessageSlot {
    current: Option<StatusMessage>,
}

impl MessageSlot {
    pub fn show(&mut self, kind: MessageKind, text: impl Into<String>) {
        self.show_at(kind, text, Instant::now());
    }

    pub fn show_at(&mut self, kind: MessageKind, text: impl Into<String>, now: Instant) {
        let text = text.into();
        match kind {
            MessageKind::Error => tracing::warn!(message = %text, "error message shown"),
            _ => tracing::debug!(kind = kind.label(), message = %text, "message shown"),
        }
        self.current = Some(StatusMessage {
            kind,
            text,
            shown_at: now,
        });
    }

    /// The message still visible at `now`, if any.
    pub fn visible(&self, now: Instant) -> Option<&StatusMessage> {
        self.current
            .as_ref()
            .filter(|m| now.saturating_duration_since(m.shown_at) < MESSAGE_TTL)
    }

    /// The last message shown, regardless of age.
    pub fn last(&self) -> Option<&StatusMessage> {
        self.current.as_ref()
    }
}
