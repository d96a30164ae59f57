//! Input subsystem.
//!
//! Public API is platform-agnostic. Windows translate native events into
//! `InputEvent`s and apply them to their `InputState`.

pub mod keysym;

mod keyboard;
mod mouse;
mod state;
mod types;

pub use keyboard::Keyboard;
pub use keysym::Keysym;
pub use mouse::Mouse;
pub use state::{InputState, EVENT_HISTORY};
pub use types::{
    InputEvent,
    Key,
    KeyState,
    MouseButton,
    MouseButtonState,
};
