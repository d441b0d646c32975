// src/quiz/notify.rs

/// User-facing notification channel for blocking conditions ("API key
/// not set", "level locked"). The browser client surfaced these as
/// alerts; anything that can show a message to the user qualifies.
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Forwards notifications to the log at WARN.
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str) {
        tracing::warn!("{}", message);
    }
}
