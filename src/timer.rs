//! Timer Queue - cancellable single-threaded timers
//!
//! Every delayed behavior in this layer (notice auto-dismiss, invalid-mark
//! clearing, busy-button fallback, count-up steps, debounced resize) runs
//! through one queue owned by the event loop. The loop uses
//! [`TimerQueue::next_deadline`] as its poll timeout and calls
//! [`TimerQueue::fire_due`] each tick.
//!
//! Timers never fire earlier than their deadline; timers with equal
//! deadlines fire in schedule order. A handle can be cancelled at any time;
//! cancelling an already-fired or unknown handle is a no-op.
//!
//! All operations take an explicit `now: Instant`, so tests drive time
//! forward without sleeping.
//!
//! # Example
//!
//! ```ignore
//! use inventory_tui::timer::TimerQueue;
//! use std::time::{Duration, Instant};
//!
//! let mut timers: TimerQueue<&str> = TimerQueue::new();
//! let now = Instant::now();
//! let handle = timers.schedule(now, Duration::from_millis(100), "dismiss");
//! timers.cancel(handle);
//! assert!(timers.fire_due(now + Duration::from_millis(200)).is_empty());
//! ```

use std::time::{Duration, Instant};

// =============================================================================
// TYPES
// =============================================================================

/// Opaque handle identifying a scheduled timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

struct Entry<A> {
    id: u64,
    seq: u64,
    deadline: Instant,
    action: A,
}

/// Queue of pending one-shot timers carrying actions of type `A`.
pub struct TimerQueue<A> {
    entries: Vec<Entry<A>>,
    next_id: u64,
    next_seq: u64,
}

impl<A> Default for TimerQueue<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> TimerQueue<A> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
            next_seq: 0,
        }
    }

    /// Schedule `action` to fire `delay` after `now`.
    pub fn schedule(&mut self, now: Instant, delay: Duration, action: A) -> TimerHandle {
        let id = self.next_id;
        self.next_id += 1;
        let seq = self.next_seq;
        self.next_seq += 1;

        self.entries.push(Entry {
            id,
            seq,
            deadline: now + delay,
            action,
        });
        TimerHandle(id)
    }

    /// Cancel a pending timer. No-op if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) {
        self.entries.retain(|e| e.id != handle.0);
    }

    /// Check whether a handle still refers to a pending timer.
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.entries.iter().any(|e| e.id == handle.0)
    }

    /// Earliest pending deadline, if any. Used as the event-loop poll timeout.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().map(|e| e.deadline).min()
    }

    /// Remove and return every action whose deadline has passed, ordered by
    /// deadline then schedule order.
    pub fn fire_due(&mut self, now: Instant) -> Vec<A> {
        let mut due: Vec<Entry<A>> = Vec::new();
        let mut remaining: Vec<Entry<A>> = Vec::new();

        for entry in self.entries.drain(..) {
            if entry.deadline <= now {
                due.push(entry);
            } else {
                remaining.push(entry);
            }
        }
        self.entries = remaining;

        due.sort_by(|a, b| a.deadline.cmp(&b.deadline).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|e| e.action).collect()
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// DEBOUNCE
// =============================================================================

/// Trailing-edge debounce: the action fires only after a quiet period with
/// no further triggers. Each trigger cancels the previous pending timer.
#[derive(Default)]
pub struct Debouncer {
    pending: Option<TimerHandle>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a trigger, rescheduling the pending action.
    pub fn trigger<A>(
        &mut self,
        timers: &mut TimerQueue<A>,
        now: Instant,
        delay: Duration,
        action: A,
    ) {
        if let Some(handle) = self.pending.take() {
            timers.cancel(handle);
        }
        self.pending = Some(timers.schedule(now, delay, action));
    }

    /// Drop any pending action.
    pub fn cancel<A>(&mut self, timers: &mut TimerQueue<A>) {
        if let Some(handle) = self.pending.take() {
            timers.cancel(handle);
        }
    }
}

// =============================================================================
// THROTTLE
// =============================================================================

/// Leading-edge throttle: allows at most one pass per interval regardless of
/// trigger frequency.
#[derive(Default)]
pub struct Throttle {
    until: Option<Instant>,
}

impl Throttle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the caller may run now, and opens a new interval.
    pub fn allow(&mut self, now: Instant, interval: Duration) -> bool {
        match self.until {
            Some(until) if now < until => false,
            _ => {
                self.until = Some(now + interval);
                true
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_fire_after_deadline() {
        let mut timers: TimerQueue<u32> = TimerQueue::new();
        let now = Instant::now();

        timers.schedule(now, ms(100), 1);
        assert!(timers.fire_due(now + ms(50)).is_empty());
        assert_eq!(timers.fire_due(now + ms(100)), vec![1]);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_cancel_prevents_fire() {
        let mut timers: TimerQueue<u32> = TimerQueue::new();
        let now = Instant::now();

        let handle = timers.schedule(now, ms(100), 1);
        assert!(timers.is_pending(handle));
        timers.cancel(handle);
        assert!(!timers.is_pending(handle));
        assert!(timers.fire_due(now + ms(200)).is_empty());
    }

    #[test]
    fn test_cancel_after_fire_is_noop() {
        let mut timers: TimerQueue<u32> = TimerQueue::new();
        let now = Instant::now();

        let handle = timers.schedule(now, ms(10), 1);
        assert_eq!(timers.fire_due(now + ms(10)), vec![1]);
        // Stale handle: nothing to remove
        timers.cancel(handle);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_equal_deadlines_fire_in_schedule_order() {
        let mut timers: TimerQueue<u32> = TimerQueue::new();
        let now = Instant::now();

        timers.schedule(now, ms(50), 1);
        timers.schedule(now, ms(50), 2);
        timers.schedule(now, ms(20), 3);

        assert_eq!(timers.fire_due(now + ms(50)), vec![3, 1, 2]);
    }

    #[test]
    fn test_next_deadline_is_earliest() {
        let mut timers: TimerQueue<u32> = TimerQueue::new();
        let now = Instant::now();

        assert!(timers.next_deadline().is_none());
        timers.schedule(now, ms(100), 1);
        timers.schedule(now, ms(30), 2);
        assert_eq!(timers.next_deadline(), Some(now + ms(30)));
    }

    #[test]
    fn test_debounce_reschedules_on_retrigger() {
        let mut timers: TimerQueue<&str> = TimerQueue::new();
        let mut debounce = Debouncer::new();
        let now = Instant::now();

        debounce.trigger(&mut timers, now, ms(250), "resize");
        debounce.trigger(&mut timers, now + ms(100), ms(250), "resize");

        // Original deadline passed, but the retrigger pushed it out
        assert!(timers.fire_due(now + ms(250)).is_empty());
        assert_eq!(timers.fire_due(now + ms(350)), vec!["resize"]);
    }

    #[test]
    fn test_debounce_cancel() {
        let mut timers: TimerQueue<&str> = TimerQueue::new();
        let mut debounce = Debouncer::new();
        let now = Instant::now();

        debounce.trigger(&mut timers, now, ms(250), "resize");
        debounce.cancel(&mut timers);
        assert!(timers.fire_due(now + ms(500)).is_empty());
    }

    #[test]
    fn test_throttle_limits_rate() {
        let mut throttle = Throttle::new();
        let now = Instant::now();

        assert!(throttle.allow(now, ms(100)));
        assert!(!throttle.allow(now + ms(50), ms(100)));
        assert!(throttle.allow(now + ms(100), ms(100)));
        assert!(!throttle.allow(now + ms(150), ms(100)));
    }
}
