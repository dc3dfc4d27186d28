//! # inventory-tui
//!
//! Input enhancement layer for a terminal inventory client.
//!
//! The backend renders pages (forms, tables, stat cards, a nav menu); this
//! layer binds to known element roles once per page and layers behavior on
//! top: barcode-scanner detection on the lookup field, transient notices,
//! required-field guards with busy submit buttons, image attachment
//! previews, responsive menu collapse, live table filtering, character
//! counters, count-up stat animation and global keyboard shortcuts.
//!
//! ## Architecture
//!
//! Everything time-based runs through one cancellable timer queue driven by
//! the event loop; every API takes an explicit `now` so tests never sleep:
//! ```text
//! crossterm events → InputDispatcher / Enhancer → page state → compose → Screen
//!                              TimerQueue ↲
//! ```
//!
//! ## Modules
//!
//! - [`page`] - Widget tree and role bindings
//! - [`input`] - Event types, crossterm bridging, command dispatch
//! - [`timer`] - Cancellable timers, debounce, throttle
//! - [`enhance`] - The individual enhancement components
//! - [`app`] - The [`app::Enhancer`] wiring it all together
//! - [`render`] - Line composition and terminal drawing

pub mod app;
pub mod config;
pub mod enhance;
pub mod error;
pub mod input;
pub mod page;
pub mod render;
pub mod timer;

// Re-export the surface most embedders need
pub use app::{Enhancer, HitMap, Outbound, Submission, TimerAction};
pub use config::Config;
pub use enhance::notify::{Notifier, Severity};
pub use error::{Error, Result};
pub use input::{InputDispatcher, InputEvent, KeyboardEvent, Modifiers, poll_event};
pub use page::{
    ActionLink, Bindings, Field, FieldKind, FieldRef, Form, LinkRef, NavMenu, Page,
    ServerMessage, StatCard, SubmitButton, Table,
};
pub use render::{Screen, compose, hit_map};
pub use timer::{Debouncer, Throttle, TimerHandle, TimerQueue};
