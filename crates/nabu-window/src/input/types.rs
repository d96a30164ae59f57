use std::fmt;

use super::keysym::{self, Keysym};

/// Logical keys addressable by name.
///
/// This is the closed set of keys every window maps at creation. Keys outside
/// it are still tracked by symbol, but cannot be queried by name.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Enter,
    Space,
    CapsLock,
    Tab,

    // Modifiers, per side
    LAlt,
    RAlt,
    LCtrl,
    RCtrl,
    LShift,
    RShift,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Function keys
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,

    // Navigation cluster
    Backspace,
    Insert,
    Delete,
    Home,
    PageUp,
    PageDown,
    End,

    PrintScreen,
    ScreenLock,
    Pause,

    // Keypad
    NumLock,
    NumEnter,
    NumInsert,

    Winkey,
    /// Laptop Fn key. Has no keysym; mapped to [`keysym::NO_SYMBOL`].
    Fn,
    Escape,
}

impl Key {
    /// Every key in the default mapping table.
    pub const ALL: [Key; 42] = [
        Key::Enter,
        Key::Space,
        Key::CapsLock,
        Key::Tab,
        Key::LAlt,
        Key::RAlt,
        Key::LCtrl,
        Key::RCtrl,
        Key::LShift,
        Key::RShift,
        Key::ArrowUp,
        Key::ArrowDown,
        Key::ArrowLeft,
        Key::ArrowRight,
        Key::F1,
        Key::F2,
        Key::F3,
        Key::F4,
        Key::F5,
        Key::F6,
        Key::F7,
        Key::F8,
        Key::F9,
        Key::F10,
        Key::F11,
        Key::F12,
        Key::Backspace,
        Key::Insert,
        Key::Delete,
        Key::Home,
        Key::PageUp,
        Key::PageDown,
        Key::End,
        Key::PrintScreen,
        Key::ScreenLock,
        Key::Pause,
        Key::NumLock,
        Key::NumEnter,
        Key::NumInsert,
        Key::Winkey,
        Key::Fn,
        Key::Escape,
    ];

    /// Logical name used by [`crate::input::Keyboard::key_state`].
    pub fn name(self) -> &'static str {
        match self {
            Key::Enter => "ENTER",
            Key::Space => "SPACE",
            Key::CapsLock => "CAPS_LOCK",
            Key::Tab => "TAB",
            Key::LAlt => "L_ALT",
            Key::RAlt => "R_ALT",
            Key::LCtrl => "L_CTRL",
            Key::RCtrl => "R_CTRL",
            Key::LShift => "L_SHIFT",
            Key::RShift => "R_SHIFT",
            Key::ArrowUp => "ARROW_UP",
            Key::ArrowDown => "ARROW_DOWN",
            Key::ArrowLeft => "ARROW_LEFT",
            Key::ArrowRight => "ARROW_RIGHT",
            Key::F1 => "F1",
            Key::F2 => "F2",
            Key::F3 => "F3",
            Key::F4 => "F4",
            Key::F5 => "F5",
            Key::F6 => "F6",
            Key::F7 => "F7",
            Key::F8 => "F8",
            Key::F9 => "F9",
            Key::F10 => "F10",
            Key::F11 => "F11",
            Key::F12 => "F12",
            Key::Backspace => "BACKSPACE",
            Key::Insert => "INSERT",
            Key::Delete => "DELETE",
            Key::Home => "HOME",
            Key::PageUp => "PAGE_UP",
            Key::PageDown => "PAGE_DOWN",
            Key::End => "END",
            Key::PrintScreen => "PRINT_SCREEN",
            Key::ScreenLock => "SCREEN_LOCK",
            Key::Pause => "PAUSE",
            Key::NumLock => "NUM_LOCK",
            Key::NumEnter => "NUM_ENTER",
            Key::NumInsert => "NUM_INSERT",
            Key::Winkey => "WINKEY",
            Key::Fn => "FN",
            Key::Escape => "ESC",
        }
    }

    /// Native symbol this key is bound to in the default table.
    pub fn keysym(self) -> Keysym {
        match self {
            Key::Enter => keysym::RETURN,
            Key::Space => keysym::SPACE,
            Key::CapsLock => keysym::CAPS_LOCK,
            Key::Tab => keysym::TAB,
            Key::LAlt => keysym::ALT_L,
            Key::RAlt => keysym::ALT_R,
            Key::LCtrl => keysym::CONTROL_L,
            Key::RCtrl => keysym::CONTROL_R,
            Key::LShift => keysym::SHIFT_L,
            Key::RShift => keysym::SHIFT_R,
            Key::ArrowUp => keysym::UP,
            Key::ArrowDown => keysym::DOWN,
            Key::ArrowLeft => keysym::LEFT,
            Key::ArrowRight => keysym::RIGHT,
            Key::F1 => keysym::F1,
            Key::F2 => keysym::F2,
            Key::F3 => keysym::F3,
            Key::F4 => keysym::F4,
            Key::F5 => keysym::F5,
            Key::F6 => keysym::F6,
            Key::F7 => keysym::F7,
            Key::F8 => keysym::F8,
            Key::F9 => keysym::F9,
            Key::F10 => keysym::F10,
            Key::F11 => keysym::F11,
            Key::F12 => keysym::F12,
            Key::Backspace => keysym::BACKSPACE,
            Key::Insert => keysym::INSERT,
            Key::Delete => keysym::DELETE,
            Key::Home => keysym::HOME,
            Key::PageUp => keysym::PAGE_UP,
            Key::PageDown => keysym::PAGE_DOWN,
            Key::End => keysym::END,
            Key::PrintScreen => keysym::PRINT,
            Key::ScreenLock => keysym::SCROLL_LOCK,
            Key::Pause => keysym::PAUSE,
            Key::NumLock => keysym::NUM_LOCK,
            Key::NumEnter => keysym::KP_ENTER,
            Key::NumInsert => keysym::KP_INSERT,
            Key::Winkey => keysym::SUPER_L,
            Key::Fn => keysym::NO_SYMBOL,
            Key::Escape => keysym::ESCAPE,
        }
    }

    /// The name → symbol table installed on every new window.
    pub fn default_mapping() -> Vec<(String, Keysym)> {
        Key::ALL
            .iter()
            .map(|k| (k.name().to_string(), k.keysym()))
            .collect()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// The three tracked mouse buttons.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

impl MouseButton {
    /// Maps a native button index (1 = left, 2 = middle, 3 = right).
    pub fn from_native(index: u32) -> Option<Self> {
        match index {
            1 => Some(MouseButton::Left),
            2 => Some(MouseButton::Middle),
            3 => Some(MouseButton::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MouseButtonState {
    Pressed,
    Released,
}

/// Platform-agnostic input events, in the order the platform delivered them.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key { symbol: Keysym, state: KeyState },

    PointerMoved { x: f32, y: f32 },

    PointerButton {
        button: MouseButton,
        state: MouseButtonState,
    },

    /// Scroll wheel movement; positive is away from the user.
    Wheel { delta: f32 },

    /// Window focus change.
    Focused(bool),
}
