//! Character counters for length-limited text areas.
//!
//! The counter is derived state: recomputed from the field's current length
//! on every render, nothing stored. Color escalates as the limit nears.

use crate::config::UiConfig;
use crate::page::Field;

/// Escalation level of a counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CounterLevel {
    Neutral,
    Warning,
    Critical,
}

/// Counter for one field, or None when the field has no length limit.
#[derive(Debug, PartialEq, Eq)]
pub struct Counter {
    pub text: String,
    pub level: CounterLevel,
}

/// Compute the live counter for a field.
pub fn counter(field: &Field, ui: &UiConfig) -> Option<Counter> {
    let max = field.max_length?;
    let current = field.value.chars().count();
    let pct = if max == 0 { 100 } else { current * 100 / max };

    let level = if pct >= usize::from(ui.counter_critical_pct) {
        CounterLevel::Critical
    } else if pct >= usize::from(ui.counter_warn_pct) {
        CounterLevel::Warning
    } else {
        CounterLevel::Neutral
    };

    Some(Counter {
        text: format!("{} / {} characters", current, max),
        level,
    })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::FieldKind;

    fn field(len: usize, max: usize) -> Field {
        Field::new("obs", "Notes", FieldKind::TextArea)
            .with_max_length(max)
            .with_value("x".repeat(len))
    }

    #[test]
    fn test_no_limit_no_counter() {
        let field = Field::new("obs", "Notes", FieldKind::TextArea);
        assert!(counter(&field, &UiConfig::default()).is_none());
    }

    #[test]
    fn test_levels_escalate() {
        let ui = UiConfig::default();

        assert_eq!(counter(&field(10, 100), &ui).unwrap().level, CounterLevel::Neutral);
        assert_eq!(counter(&field(79, 100), &ui).unwrap().level, CounterLevel::Neutral);
        assert_eq!(counter(&field(80, 100), &ui).unwrap().level, CounterLevel::Warning);
        assert_eq!(counter(&field(94, 100), &ui).unwrap().level, CounterLevel::Warning);
        assert_eq!(counter(&field(95, 100), &ui).unwrap().level, CounterLevel::Critical);
        assert_eq!(counter(&field(100, 100), &ui).unwrap().level, CounterLevel::Critical);
    }

    #[test]
    fn test_counter_text() {
        let ui = UiConfig::default();
        let c = counter(&field(12, 200), &ui).unwrap();
        assert_eq!(c.text, "12 / 200 characters");
    }
}
