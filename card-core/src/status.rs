//! Action outcomes and the status channel shown to the user.
//!
//! Nothing in the editor is fatal. Actions that cannot apply are skipped
//! with a reason instead of failing, and anything worth telling the user
//! (rejected images, failed exports) lands on a [`StatusChannel`] that the
//! host drains into a transient status indicator.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Messages kept before the oldest is dropped.
pub const STATUS_CAPACITY: usize = 32;

/// Why an action did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No element is selected, or the selected element is gone.
    NoSelection,
    /// The text input was empty.
    EmptyInput,
    /// The element does not support the gesture.
    Unsupported,
    /// The target element does not exist.
    UnknownElement,
    /// No text edit is open.
    NoActiveEdit,
    /// The theme name is not known.
    UnknownTheme,
    /// The data URI was not an image.
    InvalidImage,
    /// Nothing left to undo.
    NothingToUndo,
    /// The gesture did not move anything.
    NoMovement,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::NoSelection => "no element selected",
            Self::EmptyInput => "input is empty",
            Self::Unsupported => "not supported by this element",
            Self::UnknownElement => "element no longer exists",
            Self::NoActiveEdit => "no text edit in progress",
            Self::UnknownTheme => "unknown theme",
            Self::InvalidImage => "file is not an image",
            Self::NothingToUndo => "nothing to undo",
            Self::NoMovement => "nothing moved",
        };
        f.write_str(text)
    }
}

/// What an editor action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum Outcome {
    /// The card changed (or the UI state changed, for menu events).
    Applied,
    /// Nothing happened.
    Skipped(SkipReason),
}

impl Outcome {
    /// Whether the action took effect.
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Severity of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusLevel {
    /// Something completed.
    Info,
    /// Something applied in a degraded way, or was refused.
    Warning,
    /// An operation failed and was abandoned.
    Error,
}

/// A message for the status indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEvent {
    /// Severity.
    pub level: StatusLevel,
    /// Human readable text.
    pub message: String,
}

/// Bounded queue of status messages, drained by the host UI.
#[derive(Debug, Clone, Default)]
pub struct StatusChannel {
    events: VecDeque<StatusEvent>,
}

impl StatusChannel {
    /// Create an empty channel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a message, dropping the oldest past [`STATUS_CAPACITY`].
    pub fn push(&mut self, level: StatusLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            StatusLevel::Info => tracing::info!("{message}"),
            StatusLevel::Warning => tracing::warn!("{message}"),
            StatusLevel::Error => tracing::error!("{message}"),
        }
        self.events.push_back(StatusEvent { level, message });
        if self.events.len() > STATUS_CAPACITY {
            self.events.pop_front();
        }
    }

    /// Queue an info message.
    pub fn info(&mut self, message: impl Into<String>) {
        self.push(StatusLevel::Info, message);
    }

    /// Queue a warning.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.push(StatusLevel::Warning, message);
    }

    /// Queue an error.
    pub fn error(&mut self, message: impl Into<String>) {
        self.push(StatusLevel::Error, message);
    }

    /// Take every queued message, oldest first.
    pub fn drain(&mut self) -> Vec<StatusEvent> {
        self.events.drain(..).collect()
    }

    /// Most recent message.
    #[must_use]
    pub fn latest(&self) -> Option<&StatusEvent> {
        self.events.back()
    }

    /// Number of queued messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether no message is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_returns_messages_in_order() {
        let mut channel = StatusChannel::new();
        channel.info("saved");
        channel.error("upload failed");

        let events = channel.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].level, StatusLevel::Info);
        assert_eq!(events[1].message, "upload failed");
        assert!(channel.is_empty());
    }

    #[test]
    fn channel_is_bounded() {
        let mut channel = StatusChannel::new();
        for i in 0..(STATUS_CAPACITY + 5) {
            channel.warn(format!("warning {i}"));
        }
        assert_eq!(channel.len(), STATUS_CAPACITY);
        assert_eq!(
            channel.latest().map(|e| e.message.as_str()),
            Some("warning 36")
        );
    }

    #[test]
    fn outcome_serializes_with_reason() {
        let json = serde_json::to_string(&Outcome::Skipped(SkipReason::NoSelection))
            .expect("serialize");
        assert_eq!(json, r#"{"outcome":"skipped","reason":"no_selection"}"#);
    }
}
