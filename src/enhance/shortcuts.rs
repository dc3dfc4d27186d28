//! Keyboard shortcuts - global, non-configurable chords.
//!
//! - Alt+N  activate the first "new record" affordance
//! - Alt+S  submit the first form on the page
//! - Escape activate the first cancel-style affordance
//! - Ctrl+K focus the search-like input
//!
//! Registered once at startup on the application's dispatcher.

use tracing::debug;

use crate::input::InputDispatcher;

/// Commands the shortcut layer can issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Activate the "new record" affordance.
    NewRecord,
    /// Submit the first form on the page.
    SubmitFirstForm,
    /// Activate the cancel-style affordance.
    Cancel,
    /// Focus the search input and select its content.
    FocusSearch,
}

/// Register the global shortcuts.
pub fn register(dispatcher: &mut InputDispatcher<Command>) {
    dispatcher.on(|event| {
        (event.modifiers.alt && event.key.eq_ignore_ascii_case("n")).then_some(Command::NewRecord)
    });
    dispatcher.on(|event| {
        (event.modifiers.alt && event.key.eq_ignore_ascii_case("s"))
            .then_some(Command::SubmitFirstForm)
    });
    dispatcher.on_key("Escape", |_| Some(Command::Cancel));
    dispatcher.on(|event| {
        (event.modifiers.ctrl && event.key.eq_ignore_ascii_case("k")).then_some(Command::FocusSearch)
    });
    debug!("shortcuts registered: Alt+N new | Alt+S save | Esc cancel | Ctrl+K search");
}

// =============================================================================
// TESTS
// =============================================================================
