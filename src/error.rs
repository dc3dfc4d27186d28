//! Error types for the enhancement layer.
//!
//! User-input problems (empty lookup code, blank required fields, bad
//! attachments) are never surfaced here - they are handled in place by
//! blocking the action and emitting a notice. This enum covers the faults
//! that can actually abort the program: terminal I/O and configuration.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Faults that abort startup or the event loop.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file could not be read.
    #[error("failed to read config file {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Configuration file could not be parsed.
    #[error("failed to parse config file {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Configuration value out of range.
    #[error("invalid config: {0}")]
    ConfigInvalid(String),

    /// Terminal or other I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;
