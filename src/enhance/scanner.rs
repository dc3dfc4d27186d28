//! Scan-Buffer Detector - barcode scanner vs. manual typing
//!
//! Barcode scanners type the whole code in one fast burst and finish with
//! Enter. The detector accumulates keystrokes and measures the gap between
//! them: a gap above the threshold means a human started typing and the
//! accumulation resets. On Enter, a buffer longer than the scan threshold is
//! taken as scanner input and replaces whatever is in the field (scanners
//! sometimes race the field's own editing).
//!
//! The buffer is private to the detector; it is always cleared on Enter
//! regardless of outcome.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::config::ScannerConfig;

// =============================================================================
// TYPES
// =============================================================================

/// Result of an Enter press on the lookup field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnterOutcome {
    /// Field holds a non-blank code; submit the containing form with it.
    Submit {
        value: String,
        /// True when the value came from the scan buffer.
        from_scanner: bool,
    },
    /// Field is blank after trimming; warn and refocus, do not submit.
    Empty,
}

/// Keystroke-timing detector attached to the lookup field.
pub struct ScanDetector {
    buffer: String,
    last_key: Option<Instant>,
    gap: Duration,
    min_scan_len: usize,
}

impl ScanDetector {
    pub fn new(config: &ScannerConfig) -> Self {
        Self {
            buffer: String::new(),
            last_key: None,
            gap: config.gap(),
            min_scan_len: config.min_scan_len,
        }
    }

    /// Reset accumulation if the inter-keystroke gap marks manual typing.
    fn apply_gap(&mut self, now: Instant) {
        if let Some(last) = self.last_key {
            if now.duration_since(last) > self.gap {
                self.buffer.clear();
            }
        }
        self.last_key = Some(now);
    }

    /// Record a printable keystroke.
    pub fn on_char(&mut self, c: char, now: Instant) {
        self.apply_gap(now);
        self.buffer.push(c);
    }

    /// Handle Enter. `field_value` is the field content as currently edited;
    /// the returned outcome carries the effective value after any scanner
    /// override. The buffer is cleared either way.
    pub fn on_enter(&mut self, now: Instant, field_value: &str) -> EnterOutcome {
        self.apply_gap(now);

        let scanned = self.buffer.len() > self.min_scan_len;
        let value = if scanned {
            debug!(code = %self.buffer, "scanner burst detected");
            self.buffer.clone()
        } else {
            field_value.to_string()
        };
        self.buffer.clear();

        if value.trim().is_empty() {
            EnterOutcome::Empty
        } else {
            EnterOutcome::Submit {
                value,
                from_scanner: scanned,
            }
        }
    }

    /// Current accumulation length (diagnostics only).
    pub fn buffer_len(&self) -> usize {
        self.buffer.len()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> ScanDetector {
        ScanDetector::new(&ScannerConfig::default())
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// Feed a burst of characters with a fixed inter-key gap.
    fn burst(d: &mut ScanDetector, start: Instant, text: &str, gap: Duration) -> Instant {
        let mut t = start;
        for c in text.chars() {
            d.on_char(c, t);
            t += gap;
        }
        t
    }

    #[test]
    fn test_fast_burst_overwrites_field() {
        let mut d = detector();
        let start = Instant::now();
        let t = burst(&mut d, start, "INV12345", ms(10));

        // Field was mid-edit with something else; scan wins
        let outcome = d.on_enter(t, "IN");
        assert_eq!(
            outcome,
            EnterOutcome::Submit {
                value: "INV12345".into(),
                from_scanner: true,
            }
        );
        assert_eq!(d.buffer_len(), 0);
    }

    #[test]
    fn test_slow_typing_keeps_field_value() {
        let mut d = detector();
        let start = Instant::now();
        // Manual typing: 200ms between keys resets the buffer each time
        let t = burst(&mut d, start, "12345", ms(200));

        let outcome = d.on_enter(t, "12345");
        assert_eq!(
            outcome,
            EnterOutcome::Submit {
                value: "12345".into(),
                from_scanner: false,
            }
        );
    }

    #[test]
    fn test_gap_resets_accumulation() {
        let mut d = detector();
        let mut t = Instant::now();
        t = burst(&mut d, t, "ABC", ms(10));

        // Pause above the threshold, then a short burst
        t += ms(500);
        let t = burst(&mut d, t, "XY", ms(10));

        // Only "XY" counts: 2 chars is not > 3, so no override
        let outcome = d.on_enter(t, "typed");
        assert_eq!(
            outcome,
            EnterOutcome::Submit {
                value: "typed".into(),
                from_scanner: false,
            }
        );
    }

    #[test]
    fn test_exactly_threshold_is_not_a_scan() {
        let mut d = detector();
        let t = burst(&mut d, Instant::now(), "ABC", ms(10));

        // 3 chars is not > 3
        let outcome = d.on_enter(t, "");
        assert_eq!(outcome, EnterOutcome::Empty);
    }

    #[test]
    fn test_blank_field_is_empty_outcome() {
        let mut d = detector();
        let outcome = d.on_enter(Instant::now(), "   ");
        assert_eq!(outcome, EnterOutcome::Empty);
    }

    #[test]
    fn test_buffer_cleared_on_empty_outcome() {
        let mut d = detector();
        let t = burst(&mut d, Instant::now(), "AB", ms(10));
        assert_eq!(d.on_enter(t, ""), EnterOutcome::Empty);
        assert_eq!(d.buffer_len(), 0);
    }

    #[test]
    fn test_enter_after_long_pause_discards_stale_burst() {
        let mut d = detector();
        let mut t = Instant::now();
        t = burst(&mut d, t, "INV99999", ms(10));

        // Enter arrives well after the burst: the gap check clears the
        // buffer before the length test, so no override happens
        t += ms(500);
        let outcome = d.on_enter(t, "");
        assert_eq!(outcome, EnterOutcome::Empty);
    }
}
