//! Toast notifications with auto-dismiss.

/// Default time a toast stays on screen, in seconds
pub const DEFAULT_TOAST_SECONDS: f64 = 3.0;
/// Older toasts beyond this count are dropped
const MAX_TOASTS: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// One notification
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Toast {
    /// i18n key the message was built from
    pub key: &'static str,
    pub message: String,
    pub severity: Severity,
    /// Time the toast was raised, in seconds (caller's clock)
    pub raised_at: f64,
}

/// Notification feed. The newest unexpired toast is the one shown.
#[derive(Debug, Clone)]
pub struct Notifications {
    toasts: Vec<Toast>,
    duration: f64,
    /// Current time as last reported by the shell
    now: f64,
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_SECONDS)
    }
}

impl Notifications {
    pub fn new(duration: f64) -> Self {
        Self {
            toasts: Vec::new(),
            duration,
            now: 0.0,
        }
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn set_duration(&mut self, seconds: f64) {
        self.duration = seconds.max(0.0);
    }

    /// Advance the clock and drop expired toasts
    pub fn tick(&mut self, now: f64) {
        self.now = now;
        let duration = self.duration;
        self.toasts.retain(|t| now - t.raised_at < duration);
    }

    pub fn push(&mut self, key: &'static str, message: impl Into<String>, severity: Severity) {
        let message = message.into();
        match severity {
            Severity::Error => tracing::warn!("{message}"),
            _ => tracing::info!("{message}"),
        }
        self.toasts.push(Toast {
            key,
            message,
            severity,
            raised_at: self.now,
        });
        if self.toasts.len() > MAX_TOASTS {
            let excess = self.toasts.len() - MAX_TOASTS;
            self.toasts.drain(..excess);
        }
    }

    /// Toast currently on screen
    pub fn current(&self) -> Option<&Toast> {
        self.toasts.last()
    }

    /// All unexpired toasts, oldest first
    pub fn active(&self) -> &[Toast] {
        &self.toasts
    }

    /// Seconds until the current toast expires
    pub fn remaining(&self) -> Option<f64> {
        self.current()
            .map(|t| (t.raised_at + self.duration - self.now).max(0.0))
    }

    pub fn dismiss(&mut self) {
        self.toasts.pop();
    }

    pub fn clear(&mut self) {
        self.toasts.clear();
    }
}
