//! Button busy-state - disable the submit control while a submission runs.
//!
//! Submission normally navigates away, so the disabled state never needs
//! undoing; the timed restore is a safety fallback for the cases where the
//! page stays up (e.g., the backend rejected the submission). Restoring an
//! already-restored button is harmless by design of the label stash.

use crate::page::Form;

/// Label shown while the submission is in flight.
pub const BUSY_LABEL: &str = "Processing...";

/// Disable the submit control and swap in the busy label.
/// Returns false when the form has no submit control.
pub fn start(form: &mut Form) -> bool {
    let Some(button) = form.submit.as_mut() else {
        return false;
    };
    if button.saved_label.is_none() {
        button.saved_label = Some(std::mem::replace(&mut button.label, BUSY_LABEL.into()));
    }
    button.disabled = true;
    true
}

/// Restore the submit control unconditionally. Double-restore is a no-op.
pub fn restore(form: &mut Form) {
    let Some(button) = form.submit.as_mut() else {
        return;
    };
    if let Some(original) = button.saved_label.take() {
        button.label = original;
    }
    button.disabled = false;
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::SubmitButton;

    fn form() -> Form {
        let mut form = Form::new("item", "/item/salvar");
        form.submit = Some(SubmitButton::new("Save"));
        form
    }

    #[test]
    fn test_start_swaps_label_and_disables() {
        let mut form = form();
        assert!(start(&mut form));

        let button = form.submit.as_ref().unwrap();
        assert!(button.disabled);
        assert_eq!(button.label, BUSY_LABEL);
        assert_eq!(button.saved_label.as_deref(), Some("Save"));
    }

    #[test]
    fn test_restore_brings_back_original() {
        let mut form = form();
        start(&mut form);
        restore(&mut form);

        let button = form.submit.as_ref().unwrap();
        assert!(!button.disabled);
        assert_eq!(button.label, "Save");
        assert!(button.saved_label.is_none());
    }

    #[test]
    fn test_double_restore_is_harmless() {
        let mut form = form();
        start(&mut form);
        restore(&mut form);
        restore(&mut form);

        let button = form.submit.as_ref().unwrap();
        assert_eq!(button.label, "Save");
        assert!(!button.disabled);
    }

    #[test]
    fn test_double_start_keeps_first_stash() {
        let mut form = form();
        start(&mut form);
        // Re-submission while busy must not stash the busy label
        start(&mut form);
        restore(&mut form);
        assert_eq!(form.submit.as_ref().unwrap().label, "Save");
    }

    #[test]
    fn test_form_without_submit() {
        let mut form = Form::new("bare", "/x");
        assert!(!start(&mut form));
        restore(&mut form);
    }
}
