use crate::input::{InputEvent, KeyState, MouseButton, MouseButtonState};
use crate::platform::{Atom, Display, NativeEvent};

/// Bucket a raw event falls into. Every native event maps to exactly one.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum EventClass {
    Redraw,
    Key,
    Mouse,
    Focus,
    CloseRequest,
    Ignored,
}

/// Classifies a native event. `close_atom` is the window's close-protocol atom.
pub fn classify(event: &NativeEvent, close_atom: Option<Atom>) -> EventClass {
    match event {
        NativeEvent::Expose { .. } => EventClass::Redraw,

        NativeEvent::KeyPress { .. } | NativeEvent::KeyRelease { .. } => EventClass::Key,

        NativeEvent::ButtonPress { .. }
        | NativeEvent::ButtonRelease { .. }
        | NativeEvent::Motion { .. }
        | NativeEvent::Wheel { .. } => EventClass::Mouse,

        NativeEvent::FocusIn | NativeEvent::FocusOut => EventClass::Focus,

        NativeEvent::ClientMessage { atom } if Some(*atom) == close_atom => EventClass::CloseRequest,

        NativeEvent::ClientMessage { .. } | NativeEvent::Other(_) => EventClass::Ignored,
    }
}

/// Translates key, mouse, and focus events into input events.
///
/// Key codes are resolved to symbols through `display`, at level 1 while
/// Shift is held. Returns `None` for other classes and for buttons beyond
/// the three tracked ones.
pub fn to_input_event<D: Display>(display: &mut D, event: &NativeEvent) -> Option<InputEvent> {
    match *event {
        NativeEvent::KeyPress { keycode, shift } => Some(InputEvent::Key {
            symbol: display.keycode_to_keysym(keycode, shift as u32),
            state: KeyState::Pressed,
        }),
        NativeEvent::KeyRelease { keycode, shift } => Some(InputEvent::Key {
            symbol: display.keycode_to_keysym(keycode, shift as u32),
            state: KeyState::Released,
        }),

        NativeEvent::ButtonPress { button } => {
            MouseButton::from_native(button).map(|button| InputEvent::PointerButton {
                button,
                state: MouseButtonState::Pressed,
            })
        }
        NativeEvent::ButtonRelease { button } => {
            MouseButton::from_native(button).map(|button| InputEvent::PointerButton {
                button,
                state: MouseButtonState::Released,
            })
        }

        NativeEvent::Motion { x, y } => Some(InputEvent::PointerMoved { x, y }),
        NativeEvent::Wheel { delta } => Some(InputEvent::Wheel { delta }),

        NativeEvent::FocusIn => Some(InputEvent::Focused(true)),
        NativeEvent::FocusOut => Some(InputEvent::Focused(false)),

        _ => None,
    }
}
