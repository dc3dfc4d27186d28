//! Form Guard - required-field validation and destructive-action confirms
//!
//! The guard is a best-effort pre-check, never a substitute for the
//! backend's validation: it blocks obviously-empty submissions locally so
//! the round trip isn't wasted. Blank required fields get a temporary
//! invalid mark; the first one is focused and scrolled into view. Any input
//! on a marked field clears the mark immediately (the timed clear is a
//! fallback, not a gate).
//!
//! Destructive actions (delete links, the conference finalize button) go
//! through a blocking confirm dialog; declining cancels the action.

use crate::page::{Form, LinkRef};

// =============================================================================
// REQUIRED-FIELD GUARD
// =============================================================================

/// Outcome of the required-field scan on submit.
#[derive(Debug, PartialEq, Eq)]
pub struct GuardResult {
    /// Indices of fields that were blank and are now marked invalid.
    pub invalid: Vec<usize>,
}

impl GuardResult {
    /// Whether submission may proceed.
    pub fn ok(&self) -> bool {
        self.invalid.is_empty()
    }

    /// The field that should receive focus.
    pub fn first_invalid(&self) -> Option<usize> {
        self.invalid.first().copied()
    }
}

/// Scan required fields, marking every blank one invalid. The caller
/// schedules the timed un-mark and blocks submission when `!ok()`.
pub fn guard_required(form: &mut Form) -> GuardResult {
    let mut invalid = Vec::new();
    for (idx, field) in form.fields.iter_mut().enumerate() {
        if field.required && field.is_blank() {
            field.invalid = true;
            invalid.push(idx);
        }
    }
    GuardResult { invalid }
}

/// Clear the invalid mark on input. Safe to call on unmarked fields.
pub fn clear_mark(form: &mut Form, field: usize) {
    if let Some(field) = form.fields.get_mut(field) {
        field.invalid = false;
    }
}

// =============================================================================
// DESTRUCTIVE-ACTION CONFIRM
// =============================================================================

/// What a pending confirm will do when accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PendingAction {
    /// Navigate to a delete-style link target.
    Delete(LinkRef),
    /// Submit the conference finalize action.
    Finalize(LinkRef),
}

/// Blocking confirmation dialog state. While present, it owns the keyboard.
#[derive(Debug)]
pub struct ConfirmDialog {
    pub message: String,
    pub pending: PendingAction,
}

impl ConfirmDialog {
    pub fn for_delete(link: LinkRef) -> Self {
        Self {
            message: "Are you sure you want to delete this item? \
                      This action cannot be undone."
                .into(),
            pending: PendingAction::Delete(link),
        }
    }

    pub fn for_finalize(link: LinkRef) -> Self {
        Self {
            message: "Really finalize this conference? \
                      No more items can be added afterwards."
                .into(),
            pending: PendingAction::Finalize(link),
        }
    }

    /// Map a key to a decision: Enter/y accept, Escape/n decline.
    pub fn decide(&self, key: &str) -> Option<bool> {
        match key {
            "Enter" | "y" | "Y" => Some(true),
            "Escape" | "n" | "N" => Some(false),
            _ => None,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
