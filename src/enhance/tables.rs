//! Responsive tables - horizontal-scroll wrapping and live filtering.
//!
//! Wide tables get a horizontal-scroll container so they never distort the
//! page; the wrap is idempotent. Filtering hides non-matching rows and is
//! debounced by the app while the user types.

use tracing::debug;

use crate::page::Table;

/// Wrap every table not already inside a scroll container.
/// Returns the number of tables newly wrapped.
pub fn wrap_all(tables: &mut [Table]) -> usize {
    let mut wrapped = 0;
    for table in tables.iter_mut() {
        if !table.wrapped {
            table.wrapped = true;
            table.scroll_x = 0;
            wrapped += 1;
        }
    }
    if wrapped > 0 {
        debug!(wrapped, "tables wrapped in scroll containers");
    }
    wrapped
}

/// Apply a settled filter term to a table.
pub fn apply_filter(table: &mut Table, term: &str) {
    table.filter = term.to_string();
}

/// Scroll a wrapped table horizontally, clamped to the content width.
pub fn scroll_by(table: &mut Table, delta: i32, viewport_cols: u16) {
    if !table.wrapped {
        return;
    }
    let content = content_width(table);
    let max = content.saturating_sub(viewport_cols);
    let next = i64::from(table.scroll_x) + i64::from(delta);
    table.scroll_x = next.clamp(0, i64::from(max)) as u16;
}

/// Rendered content width: widest row including column separators.
fn content_width(table: &Table) -> u16 {
    let header: usize = table.columns.iter().map(|c| c.len() + 3).sum();
    let widest_row = table
        .rows
        .iter()
        .map(|row| row.iter().map(|c| c.len() + 3).sum::<usize>())
        .max()
        .unwrap_or(0);
    header.max(widest_row).min(usize::from(u16::MAX)) as u16
}

// =============================================================================
// TESTS
// =============================================================================
