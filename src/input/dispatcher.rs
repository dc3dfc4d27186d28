//! Input Dispatcher - explicit registration object for global shortcuts
//!
//! Global key handling lives on one dispatcher owned by the application
//! rather than on ambient process-wide handlers. Handlers are registered at
//! startup and translate events into commands; the first handler to return
//! a command consumes the event.
//!
//! # Example
//!
//! ```ignore
//! use inventory_tui::input::{InputDispatcher, KeyboardEvent, Modifiers};
//!
//! #[derive(Debug, PartialEq)]
//! enum Command { Save }
//!
//! let mut dispatcher: InputDispatcher<Command> = InputDispatcher::new();
//! dispatcher.on(|event| {
//!     (event.modifiers.alt && event.key == "s").then_some(Command::Save)
//! });
//!
//! let event = KeyboardEvent::with_modifiers("s", Modifiers::alt());
//! assert_eq!(dispatcher.dispatch(&event), Some(Command::Save));
//! ```

use std::collections::HashMap;

use super::keyboard::KeyboardEvent;

// =============================================================================
// TYPES
// =============================================================================

/// Identifier returned on registration, used for removal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

type GlobalHandler<C> = Box<dyn Fn(&KeyboardEvent) -> Option<C>>;
type KeyHandler<C> = Box<dyn Fn(&KeyboardEvent) -> Option<C>>;

/// Dispatcher mapping keyboard events to commands of type `C`.
pub struct InputDispatcher<C> {
    global: Vec<(HandlerId, GlobalHandler<C>)>,
    by_key: HashMap<String, Vec<(HandlerId, KeyHandler<C>)>>,
    next_id: u64,
}

impl<C> Default for InputDispatcher<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> InputDispatcher<C> {
    pub fn new() -> Self {
        Self {
            global: Vec::new(),
            by_key: HashMap::new(),
            next_id: 0,
        }
    }

    fn next_id(&mut self) -> HandlerId {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Register a handler consulted for every key press.
    pub fn on<F>(&mut self, handler: F) -> HandlerId
    where
        F: Fn(&KeyboardEvent) -> Option<C> + 'static,
    {
        let id = self.next_id();
        self.global.push((id, Box::new(handler)));
        id
    }

    /// Register a handler consulted only for presses of `key`.
    /// Key-specific handlers run before global handlers.
    pub fn on_key<F>(&mut self, key: &str, handler: F) -> HandlerId
    where
        F: Fn(&KeyboardEvent) -> Option<C> + 'static,
    {
        let id = self.next_id();
        self.by_key
            .entry(key.to_string())
            .or_default()
            .push((id, Box::new(handler)));
        id
    }

    /// Unregister a handler. No-op for unknown ids.
    pub fn remove(&mut self, id: HandlerId) {
        self.global.retain(|(handler_id, _)| *handler_id != id);
        self.by_key.retain(|_, handlers| {
            handlers.retain(|(handler_id, _)| *handler_id != id);
            !handlers.is_empty()
        });
    }

    /// Dispatch a key press. Returns the command of the first handler that
    /// consumed the event, or None. Repeat/release events are not dispatched.
    pub fn dispatch(&self, event: &KeyboardEvent) -> Option<C> {
        if !event.is_press() {
            return None;
        }

        if let Some(handlers) = self.by_key.get(&event.key) {
            for (_, handler) in handlers {
                if let Some(command) = handler(event) {
                    return Some(command);
                }
            }
        }

        for (_, handler) in &self.global {
            if let Some(command) = handler(event) {
                return Some(command);
            }
        }

        None
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.global.len() + self.by_key.values().map(Vec::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::keyboard::{KeyState, Modifiers};

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Cmd {
        First,
        Second,
        KeyOnly,
    }

    #[test]
    fn test_dispatch_in_registration_order() {
        let mut dispatcher: InputDispatcher<Cmd> = InputDispatcher::new();
        dispatcher.on(|e| (e.key == "a").then_some(Cmd::First));
        dispatcher.on(|e| (e.key == "a").then_some(Cmd::Second));

        assert_eq!(dispatcher.dispatch(&KeyboardEvent::new("a")), Some(Cmd::First));
        assert_eq!(dispatcher.dispatch(&KeyboardEvent::new("b")), None);
    }

    #[test]
    fn test_key_handlers_run_before_global() {
        let mut dispatcher: InputDispatcher<Cmd> = InputDispatcher::new();
        dispatcher.on(|_| Some(Cmd::First));
        dispatcher.on_key("Enter", |_| Some(Cmd::KeyOnly));

        assert_eq!(
            dispatcher.dispatch(&KeyboardEvent::new("Enter")),
            Some(Cmd::KeyOnly)
        );
        assert_eq!(dispatcher.dispatch(&KeyboardEvent::new("x")), Some(Cmd::First));
    }

    #[test]
    fn test_remove_handler() {
        let mut dispatcher: InputDispatcher<Cmd> = InputDispatcher::new();
        let id = dispatcher.on(|_| Some(Cmd::First));
        assert_eq!(dispatcher.len(), 1);

        dispatcher.remove(id);
        assert!(dispatcher.is_empty());
        assert_eq!(dispatcher.dispatch(&KeyboardEvent::new("a")), None);

        // Removing again is a no-op
        dispatcher.remove(id);
    }

    #[test]
    fn test_only_press_dispatched() {
        let mut dispatcher: InputDispatcher<Cmd> = InputDispatcher::new();
        dispatcher.on(|_| Some(Cmd::First));

        let mut event = KeyboardEvent::new("a");
        event.state = KeyState::Repeat;
        assert_eq!(dispatcher.dispatch(&event), None);
        event.state = KeyState::Release;
        assert_eq!(dispatcher.dispatch(&event), None);
    }

    #[test]
    fn test_modifier_matching() {
        let mut dispatcher: InputDispatcher<Cmd> = InputDispatcher::new();
        dispatcher.on(|e| (e.modifiers.ctrl && e.key == "k").then_some(Cmd::First));

        assert_eq!(dispatcher.dispatch(&KeyboardEvent::new("k")), None);
        assert_eq!(
            dispatcher.dispatch(&KeyboardEvent::with_modifiers("k", Modifiers::ctrl())),
            Some(Cmd::First)
        );
    }
}
