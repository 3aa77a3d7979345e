use std::time::{Duration, Instant};

pub const AUTO_HIDE: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    shown_at: Instant,
}

impl Notification {
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.duration_since(self.shown_at) >= AUTO_HIDE
    }
}

/// Holds at most one toast, a new one replaces the previous.
#[derive(Debug, Default)]
pub struct Notifier {
    current: Option<Notification>,
}

impl Notifier {
    pub fn show(&mut self, message: impl Into<String>, severity: Severity) {
        self.show_at(message, severity, Instant::now());
    }

    pub fn show_at(&mut self, message: impl Into<String>, severity: Severity, now: Instant) {
        self.current = Some(Notification {
            message: message.into(),
            severity,
            shown_at: now,
        });
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current_at(Instant::now())
    }

    pub fn current_at(&self, now: Instant) -> Option<&Notification> {
        self.current
            .as_ref()
            .filter(|notification| !notification.is_expired_at(now))
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_hide() {
        let start = Instant::now();
        let mut notifier = Notifier::default();
        notifier.show_at("Profile successfully updated.", Severity::Success, start);

        let shown = notifier.current_at(start + Duration::from_millis(2999)).unwrap();
        assert_eq!(shown.message, "Profile successfully updated.");
        assert_eq!(shown.severity, Severity::Success);

        assert!(notifier.current_at(start + AUTO_HIDE).is_none());
    }

    #[test]
    fn test_dismiss() {
        let mut notifier = Notifier::default();
        notifier.show("Failed to update profile.", Severity::Error);
        assert!(notifier.current().is_some());

        notifier.dismiss();
        assert!(notifier.current().is_none());
    }

    #[test]
    fn test_replace() {
        let start = Instant::now();
        let mut notifier = Notifier::default();
        notifier.show_at("first", Severity::Error, start);
        notifier.show_at("second", Severity::Success, start + Duration::from_secs(2));

        let shown = notifier.current_at(start + Duration::from_secs(4)).unwrap();
        assert_eq!(shown.message, "second");
    }
}
