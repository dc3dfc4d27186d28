//! Configuration - tunable constants for every enhancement.
//!
//! The heuristics this layer runs on (scanner keystroke gap, scan length
//! threshold, notice lifetimes, busy fallback) carry no justification beyond
//! "works in the field", so none of them are hardcoded: everything is a
//! config field with the historical value as default. Loaded from TOML,
//! every section optional.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Barcode scanner detection.
    pub scanner: ScannerConfig,
    /// Transient notices.
    pub notices: NoticeConfig,
    /// Required-field validation and busy state.
    pub forms: FormConfig,
    /// Image attachment limits.
    pub media: MediaConfig,
    /// Menu collapse, counters, count-up animation.
    pub ui: UiConfig,
}

/// Scan-buffer detector tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Inter-keystroke gap above which accumulation resets (manual typing).
    pub gap_ms: u64,
    /// Buffer length that must be exceeded for Enter to count as a scan.
    pub min_scan_len: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            gap_ms: 100,
            min_scan_len: 3,
        }
    }
}

/// Notice lifetime tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NoticeConfig {
    /// Time a notice stays visible before auto-dismissing.
    pub ttl_ms: u64,
    /// Fade-out duration between dismissal and removal.
    pub fade_ms: u64,
}

impl Default for NoticeConfig {
    fn default() -> Self {
        Self {
            ttl_ms: 5000,
            fade_ms: 500,
        }
    }
}

/// Form guard tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// How long blank required fields keep the invalid styling.
    pub invalid_mark_ms: u64,
    /// Safety fallback that re-enables a busy submit button.
    pub busy_restore_ms: u64,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            invalid_mark_ms: 3000,
            busy_restore_ms: 10_000,
        }
    }
}

/// Attachment validation tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Maximum accepted attachment size in bytes.
    pub max_bytes: u64,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            // 5 MiB
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// Presentation affordance tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Terminal width at or below which the nav menu collapses.
    pub narrow_cols: u16,
    /// Debounce window for resize reconfiguration.
    pub resize_debounce_ms: u64,
    /// Debounce window for live table filtering.
    pub filter_debounce_ms: u64,
    /// Character-counter warning threshold, percent of the limit.
    pub counter_warn_pct: u8,
    /// Character-counter critical threshold, percent of the limit.
    pub counter_critical_pct: u8,
    /// Total duration of the stat count-up animation.
    pub countup_ms: u64,
    /// Number of discrete count-up steps.
    pub countup_steps: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            narrow_cols: 80,
            resize_debounce_ms: 250,
            filter_debounce_ms: 300,
            counter_warn_pct: 80,
            counter_critical_pct: 95,
            countup_ms: 1500,
            countup_steps: 60,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Config = toml::from_str(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that would break timers or percent math.
    pub fn validate(&self) -> Result<()> {
        if self.ui.countup_steps == 0 {
            return Err(Error::ConfigInvalid(
                "ui.countup_steps must be at least 1".into(),
            ));
        }
        if self.ui.counter_warn_pct > 100 || self.ui.counter_critical_pct > 100 {
            return Err(Error::ConfigInvalid(
                "counter thresholds are percentages (0-100)".into(),
            ));
        }
        if self.ui.counter_warn_pct > self.ui.counter_critical_pct {
            return Err(Error::ConfigInvalid(
                "ui.counter_warn_pct must not exceed ui.counter_critical_pct".into(),
            ));
        }
        if self.notices.fade_ms == 0 {
            return Err(Error::ConfigInvalid("notices.fade_ms must be non-zero".into()));
        }
        Ok(())
    }
}

impl ScannerConfig {
    /// Gap threshold as a `Duration`.
    pub fn gap(&self) -> Duration {
        Duration::from_millis(self.gap_ms)
    }
}

impl NoticeConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }

    pub fn fade(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }
}

impl FormConfig {
    pub fn invalid_mark(&self) -> Duration {
        Duration::from_millis(self.invalid_mark_ms)
    }

    pub fn busy_restore(&self) -> Duration {
        Duration::from_millis(self.busy_restore_ms)
    }
}

impl UiConfig {
    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    pub fn filter_debounce(&self) -> Duration {
        Duration::from_millis(self.filter_debounce_ms)
    }

    /// Interval between count-up steps.
    pub fn countup_interval(&self) -> Duration {
        Duration::from_millis(self.countup_ms / u64::from(self.countup_steps.max(1)))
    }
}

// =============================================================================
// TESTS
// =============================================================================
