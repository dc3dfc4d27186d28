//! Page Module - the widget tree the backend produced
//!
//! The enhancement layer never builds pages itself; it receives one from the
//! embedding application (the analog of server-rendered markup) and attaches
//! behavior to it. Widgets are plain data: forms with fields and action
//! links, tables, stat cards, a nav menu, and any status messages the
//! backend rendered with the page.
//!
//! - **widgets** - Widget types and their local state
//! - **bindings** - One upfront pass resolving known roles to handles

pub mod bindings;
pub mod widgets;

pub use bindings::{Bindings, FieldRef, LinkRef, LOOKUP_FIELD, FINALIZE_ACTION};
pub use widgets::{
    ActionLink, Field, FieldKind, FileState, Form, MenuToggle, NavMenu, Page, Preview,
    ServerMessage, StatCard, SubmitButton, Table,
};
