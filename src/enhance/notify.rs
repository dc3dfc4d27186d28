//! Notification Emitter - transient dismissible status banners
//!
//! Notices stack at the top of the content region. Each one auto-dismisses
//! after its TTL, or immediately on click; dismissal starts a short fade
//! phase before the notice is removed. The pending auto-dismiss timer is
//! cancelled on manual dismissal so a notice can never be removed twice.
//!
//! The notifier owns its timers outright; no other component can touch a
//! notice's lifetime.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::NoticeConfig;
use crate::timer::{TimerHandle, TimerQueue};

// =============================================================================
// TYPES
// =============================================================================

/// Notice severity, matching the backend's alert classes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

/// Lifecycle phase of a notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Visible,
    Fading,
}

/// One banner.
#[derive(Debug)]
pub struct Notice {
    pub id: u64,
    pub text: String,
    pub severity: Severity,
    pub phase: Phase,
    dismiss_timer: Option<TimerHandle>,
}

enum NoticeTimer {
    Dismiss(u64),
    Remove(u64),
}

/// Owner of all notices and their lifetime timers.
pub struct Notifier {
    notices: Vec<Notice>,
    timers: TimerQueue<NoticeTimer>,
    config: NoticeConfig,
    next_id: u64,
}

impl Notifier {
    pub fn new(config: NoticeConfig) -> Self {
        Self {
            notices: Vec::new(),
            timers: TimerQueue::new(),
            config,
            next_id: 0,
        }
    }

    /// Append a banner. Severity defaults to Info via `Severity::default()`.
    pub fn notify(&mut self, now: Instant, text: impl Into<String>, severity: Severity) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        let dismiss = self
            .timers
            .schedule(now, self.config.ttl(), NoticeTimer::Dismiss(id));
        let text = text.into();
        trace!(id, ?severity, %text, "notice shown");
        self.notices.push(Notice {
            id,
            text,
            severity,
            phase: Phase::Visible,
            dismiss_timer: Some(dismiss),
        });
        id
    }

    /// Dismiss a notice now (click). Cancels the pending auto-dismiss first;
    /// a notice already fading is left alone.
    pub fn dismiss(&mut self, now: Instant, id: u64) {
        let Some(notice) = self.notices.iter_mut().find(|n| n.id == id) else {
            return;
        };
        if notice.phase == Phase::Fading {
            return;
        }
        if let Some(handle) = notice.dismiss_timer.take() {
            self.timers.cancel(handle);
        }
        notice.phase = Phase::Fading;
        self.timers
            .schedule(now, self.config.fade(), NoticeTimer::Remove(id));
    }

    /// Fire due lifetime timers.
    pub fn tick(&mut self, now: Instant) {
        for action in self.timers.fire_due(now) {
            match action {
                NoticeTimer::Dismiss(id) => self.dismiss(now, id),
                NoticeTimer::Remove(id) => self.notices.retain(|n| n.id != id),
            }
        }
    }

    /// Earliest pending lifetime deadline, for the event-loop poll timeout.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Current banners, oldest first.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn notifier() -> Notifier {
        Notifier::new(NoticeConfig::default())
    }

    #[test]
    fn test_auto_dismiss_after_ttl_and_fade() {
        let mut n = notifier();
        let now = Instant::now();
        n.notify(now, "saved", Severity::Success);

        // Still visible just before the TTL
        n.tick(now + ms(4999));
        assert_eq!(n.notices()[0].phase, Phase::Visible);

        // TTL elapsed: fading, not yet removed
        n.tick(now + ms(5000));
        assert_eq!(n.notices()[0].phase, Phase::Fading);

        // Fade elapsed: gone
        n.tick(now + ms(5500));
        assert!(n.notices().is_empty());
    }

    #[test]
    fn test_click_dismisses_once() {
        let mut n = notifier();
        let now = Instant::now();
        let id = n.notify(now, "oops", Severity::Error);

        n.dismiss(now + ms(100), id);
        assert_eq!(n.notices()[0].phase, Phase::Fading);

        // Second click while fading is a no-op
        n.dismiss(now + ms(200), id);
        assert_eq!(n.notices().len(), 1);

        // The cancelled auto-dismiss never fires; removal happens exactly
        // once, at click time + fade
        n.tick(now + ms(599));
        assert_eq!(n.notices().len(), 1);
        n.tick(now + ms(600));
        assert!(n.notices().is_empty());

        // Nothing left at the original TTL deadline
        n.tick(now + ms(6000));
        assert!(n.notices().is_empty());
    }

    #[test]
    fn test_notices_stack_in_order() {
        let mut n = notifier();
        let now = Instant::now();
        n.notify(now, "first", Severity::Info);
        n.notify(now, "second", Severity::Warning);

        let texts: Vec<&str> = n.notices().iter().map(|x| x.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[test]
    fn test_dismiss_unknown_id_is_noop() {
        let mut n = notifier();
        n.dismiss(Instant::now(), 42);
        assert!(n.notices().is_empty());
    }

    #[test]
    fn test_next_deadline_tracks_earliest() {
        let mut n = notifier();
        let now = Instant::now();
        assert!(n.next_deadline().is_none());

        n.notify(now, "a", Severity::Info);
        assert_eq!(n.next_deadline(), Some(now + ms(5000)));
    }
}
