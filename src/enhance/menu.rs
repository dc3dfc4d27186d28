//! Menu collapse - narrow-terminal navigation toggle.
//!
//! On narrow terminals the nav item list is hidden behind a toggle injected
//! before it. Crossing the width boundary (resize events are debounced by
//! the app) adds or removes the toggle and restores list visibility.

use tracing::debug;

use crate::page::{MenuToggle, NavMenu};

/// Initial setup at page load.
pub fn configure(nav: &mut NavMenu, width: u16, narrow_cols: u16) {
    if width < narrow_cols {
        collapse(nav);
    }
}

/// Re-evaluate after a settled resize.
pub fn on_resize_settled(nav: &mut NavMenu, width: u16, narrow_cols: u16) {
    if width < narrow_cols && nav.toggle.is_none() {
        debug!(width, "terminal narrow, collapsing nav menu");
        collapse(nav);
    } else if width >= narrow_cols && nav.toggle.is_some() {
        debug!(width, "terminal wide, expanding nav menu");
        nav.toggle = None;
        nav.menu_visible = true;
    }
}

/// Flip the toggle.
pub fn toggle(nav: &mut NavMenu) {
    let Some(toggle) = nav.toggle.as_mut() else {
        return;
    };
    toggle.expanded = !toggle.expanded;
    nav.menu_visible = toggle.expanded;
}

fn collapse(nav: &mut NavMenu) {
    nav.toggle = Some(MenuToggle { expanded: false });
    nav.menu_visible = false;
}

// =============================================================================
// TESTS
// =============================================================================
