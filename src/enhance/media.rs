//! Media Preview - attachment validation and asynchronous preview loading.
//!
//! Selecting a file runs two synchronous checks (image type by extension,
//! size limit) that can reject it on the spot; an accepted file is then read
//! and decoded on a worker thread so the UI never blocks on disk. Between
//! acceptance and decode completion the field is in "accepted, preview
//! pending" state. Completion events come back over a channel drained by
//! the event loop.

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;

use crossbeam_channel::{Receiver, Sender, unbounded};
use tracing::{debug, warn};

use crate::page::{FieldRef, Preview};

// =============================================================================
// SIZE FORMATTING
// =============================================================================

/// Human-readable size: base 1024, units Bytes/KB/MB/GB, two decimals with
/// floor rounding, trailing zeros dropped.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let exponent = ((bytes as f64).ln() / 1024_f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024_f64.powi(exponent as i32);

    // floor(value * 100) / 100, rendered without trailing zeros
    let hundredths = (value * 100.0).floor() as u64;
    let whole = hundredths / 100;
    let frac = hundredths % 100;
    if frac == 0 {
        format!("{} {}", whole, UNITS[exponent])
    } else if frac % 10 == 0 {
        format!("{}.{} {}", whole, frac / 10, UNITS[exponent])
    } else {
        format!("{}.{:02} {}", whole, frac, UNITS[exponent])
    }
}

// =============================================================================
// SYNCHRONOUS VALIDATION
// =============================================================================

/// Why a selected file was refused.
#[derive(Debug, PartialEq, Eq)]
pub enum Rejection {
    /// Not an image file.
    NotImage,
    /// Larger than the configured limit; carries the actual size.
    TooLarge(u64),
    /// File missing or unreadable.
    Unreadable,
}

impl Rejection {
    /// Notice text for the user.
    pub fn message(&self, max_bytes: u64) -> String {
        match self {
            Rejection::NotImage => "Please select an image file".to_string(),
            Rejection::TooLarge(_) => {
                format!("Image too large. Maximum size: {}", format_size(max_bytes))
            }
            Rejection::Unreadable => "Selected file could not be read".to_string(),
        }
    }
}

/// Synchronous acceptance check. Type first, then size, mirroring the order
/// users see the notices in. Returns the file size on acceptance.
pub fn validate(path: &Path, max_bytes: u64) -> Result<u64, Rejection> {
    if image::ImageFormat::from_path(path).is_err() {
        return Err(Rejection::NotImage);
    }

    let metadata = fs::metadata(path).map_err(|_| Rejection::Unreadable)?;
    let size = metadata.len();
    if size > max_bytes {
        return Err(Rejection::TooLarge(size));
    }
    Ok(size)
}

// =============================================================================
// ASYNC PREVIEW LOADER
// =============================================================================

/// Completion event from the worker thread.
#[derive(Debug)]
pub struct PreviewEvent {
    pub field: FieldRef,
    pub file_name: String,
    pub result: Result<Preview, String>,
}

/// Spawns one worker per accepted file and funnels completions back to the
/// event loop.
pub struct MediaLoader {
    tx: Sender<PreviewEvent>,
    rx: Receiver<PreviewEvent>,
}

impl Default for MediaLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaLoader {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    /// Read and decode `path` off-thread; the result arrives via
    /// [`MediaLoader::try_recv`].
    pub fn load(&self, field: FieldRef, path: PathBuf) {
        let tx = self.tx.clone();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        thread::spawn(move || {
            let result = decode(&path);
            if let Err(reason) = &result {
                warn!(path = %path.display(), reason, "preview decode failed");
            } else {
                debug!(path = %path.display(), "preview ready");
            }
            // Receiver gone means the app is shutting down
            let _ = tx.send(PreviewEvent {
                field,
                file_name,
                result,
            });
        });
    }

    /// Drain one completion, if any arrived.
    pub fn try_recv(&self) -> Option<PreviewEvent> {
        self.rx.try_recv().ok()
    }

    #[cfg(test)]
    fn recv_blocking(&self) -> PreviewEvent {
        self.rx
            .recv_timeout(std::time::Duration::from_secs(5))
            .expect("worker must report")
    }
}

fn decode(path: &Path) -> Result<Preview, String> {
    let bytes = fs::read(path).map_err(|e| e.to_string())?;
    let decoded = image::load_from_memory(&bytes).map_err(|e| e.to_string())?;
    Ok(Preview {
        file_name: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        size: bytes.len() as u64,
        width: decoded.width(),
        height: decoded.height(),
    })
}

// =============================================================================
// TESTS
// =============================================================================
