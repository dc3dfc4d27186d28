//! Input Module - events, crossterm conversion, command dispatch
//!
//! - **keyboard** - Key event types (key string, modifiers, press state)
//! - **poll** - Bridges crossterm events into our event types
//! - **dispatcher** - Explicit registration object for global shortcuts

pub mod dispatcher;
pub mod keyboard;
pub mod poll;

pub use dispatcher::{HandlerId, InputDispatcher};
pub use keyboard::{KeyState, KeyboardEvent, Modifiers};
pub use poll::{InputEvent, MouseClick, convert_key_event, poll_event, read_event};
