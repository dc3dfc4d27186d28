//! Enhancement components.
//!
//! Each component is self-contained: it owns its transient state (scan
//! buffer, timer handles, count-up progress) and reacts to a single kind of
//! event. Components never call each other; the [`crate::app::Enhancer`]
//! wires them to the page and the timer queue.

pub mod busy;
pub mod counters;
pub mod countup;
pub mod forms;
pub mod media;
pub mod menu;
pub mod notify;
pub mod scanner;
pub mod shortcuts;
pub mod tables;
