//! User-facing notification sink.
//!
//! Every accept/reject outcome of a cart or session operation emits exactly
//! one notification. Delivery is fire-and-forget: no return value, no
//! guarantee the message was seen.

use std::sync::Mutex;

/// Severity of a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Success => write!(f, "success"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Fire-and-forget "show message to user" sink.
pub trait Notifier: Send + Sync {
    /// Show a message to the user.
    fn notify(&self, severity: Severity, message: &str);
}

/// Default sink: routes messages into the tracing pipeline.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Error => tracing::warn!(severity = %severity, "{message}"),
            Severity::Info | Severity::Success => {
                tracing::info!(severity = %severity, "{message}");
            }
        }
    }
}

/// Sink that records every message, for asserting on user-visible outcomes
/// in tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<(Severity, String)>>,
}

impl RecordingNotifier {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages recorded so far, in order.
    #[must_use]
    pub fn messages(&self) -> Vec<(Severity, String)> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }

    /// Whether any recorded message contains `fragment`.
    #[must_use]
    pub fn saw(&self, fragment: &str) -> bool {
        self.messages()
            .iter()
            .any(|(_, message)| message.contains(fragment))
    }

    /// Severity of the most recent message, if any.
    #[must_use]
    pub fn last_severity(&self) -> Option<Severity> {
        self.messages().last().map(|(severity, _)| *severity)
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push((severity, message.to_string()));
        }
    }
}
