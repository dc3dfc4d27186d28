//! Stat count-up - animate summary numbers from zero.
//!
//! Each animated card steps from 0 to its parsed value in a fixed number of
//! discrete increments. Intermediate values are floored; the final step
//! snaps to the exact target so the animation can never overshoot or end on
//! a fraction.

use crate::config::UiConfig;

/// Progress of one step.
#[derive(Debug, PartialEq, Eq)]
pub enum Step {
    /// Intermediate value; reschedule the step timer.
    Running(String),
    /// Exact final value; stop.
    Done(String),
}

/// Animation state for one stat card.
///
/// Progress is an integer step counter; each value is computed as
/// `target * taken / steps`. A float accumulator would drift below the
/// target after repeated additions and push `Done` past the step budget.
#[derive(Debug)]
pub struct CountUp {
    target: i64,
    steps: u32,
    taken: u32,
}

impl CountUp {
    /// Begin animating a card. Returns None when the card text does not
    /// start with an integer. The caller should display [`CountUp::initial`]
    /// immediately and schedule the first step.
    pub fn start(card_text: &str, ui: &UiConfig) -> Option<Self> {
        let target = parse_leading_int(card_text)?;
        Some(Self {
            target,
            steps: ui.countup_steps.max(1),
            taken: 0,
        })
    }

    /// Text to show at animation start.
    pub fn initial(&self) -> String {
        "0".to_string()
    }

    /// Advance one step.
    pub fn step(&mut self) -> Step {
        self.taken += 1;
        if self.taken >= self.steps || self.target == 0 {
            Step::Done(self.target.to_string())
        } else {
            let value =
                i128::from(self.target) * i128::from(self.taken) / i128::from(self.steps);
            Step::Running(value.to_string())
        }
    }
}

/// Parse the leading integer of a card text ("250 items" -> 250).
fn parse_leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let digits: String = trimmed.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

// =============================================================================
// TESTS
// =============================================================================
