use winit::keyboard::{KeyCode, PhysicalKey};

use crate::input::keysym::{self, Keysym};

/// Maps a physical key to its unshifted (level 0) keysym.
///
/// Returns [`keysym::NO_SYMBOL`] for keys without a mapping.
pub fn keysym_for(pk: PhysicalKey) -> Keysym {
    let PhysicalKey::Code(code) = pk else {
        return keysym::NO_SYMBOL;
    };

    if let Some(sym) = letter_or_digit(code) {
        return sym;
    }

    match code {
        KeyCode::Escape => keysym::ESCAPE,
        KeyCode::Enter => keysym::RETURN,
        KeyCode::Tab => keysym::TAB,
        KeyCode::Backspace => keysym::BACKSPACE,
        KeyCode::Space => keysym::SPACE,

        KeyCode::Insert => keysym::INSERT,
        KeyCode::Delete => keysym::DELETE,
        KeyCode::Home => keysym::HOME,
        KeyCode::End => keysym::END,
        KeyCode::PageUp => keysym::PAGE_UP,
        KeyCode::PageDown => keysym::PAGE_DOWN,

        KeyCode::ArrowUp => keysym::UP,
        KeyCode::ArrowDown => keysym::DOWN,
        KeyCode::ArrowLeft => keysym::LEFT,
        KeyCode::ArrowRight => keysym::RIGHT,

        KeyCode::ShiftLeft => keysym::SHIFT_L,
        KeyCode::ShiftRight => keysym::SHIFT_R,
        KeyCode::ControlLeft => keysym::CONTROL_L,
        KeyCode::ControlRight => keysym::CONTROL_R,
        KeyCode::AltLeft => keysym::ALT_L,
        KeyCode::AltRight => keysym::ALT_R,
        KeyCode::SuperLeft => keysym::SUPER_L,
        KeyCode::SuperRight => keysym::SUPER_R,

        KeyCode::CapsLock => keysym::CAPS_LOCK,
        KeyCode::NumLock => keysym::NUM_LOCK,
        KeyCode::ScrollLock => keysym::SCROLL_LOCK,
        KeyCode::PrintScreen => keysym::PRINT,
        KeyCode::Pause => keysym::PAUSE,

        KeyCode::NumpadEnter => keysym::KP_ENTER,
        KeyCode::Numpad0 => keysym::KP_INSERT,

        KeyCode::F1 => keysym::F1,
        KeyCode::F2 => keysym::F2,
        KeyCode::F3 => keysym::F3,
        KeyCode::F4 => keysym::F4,
        KeyCode::F5 => keysym::F5,
        KeyCode::F6 => keysym::F6,
        KeyCode::F7 => keysym::F7,
        KeyCode::F8 => keysym::F8,
        KeyCode::F9 => keysym::F9,
        KeyCode::F10 => keysym::F10,
        KeyCode::F11 => keysym::F11,
        KeyCode::F12 => keysym::F12,

        _ => keysym::NO_SYMBOL,
    }
}

/// Latin letters map to lowercase ASCII, digits to ASCII digits.
fn letter_or_digit(code: KeyCode) -> Option<Keysym> {
    const LETTERS: [KeyCode; 26] = [
        KeyCode::KeyA,
        KeyCode::KeyB,
        KeyCode::KeyC,
        KeyCode::KeyD,
        KeyCode::KeyE,
        KeyCode::KeyF,
        KeyCode::KeyG,
        KeyCode::KeyH,
        KeyCode::KeyI,
        KeyCode::KeyJ,
        KeyCode::KeyK,
        KeyCode::KeyL,
        KeyCode::KeyM,
        KeyCode::KeyN,
        KeyCode::KeyO,
        KeyCode::KeyP,
        KeyCode::KeyQ,
        KeyCode::KeyR,
        KeyCode::KeyS,
        KeyCode::KeyT,
        KeyCode::KeyU,
        KeyCode::KeyV,
        KeyCode::KeyW,
        KeyCode::KeyX,
        KeyCode::KeyY,
        KeyCode::KeyZ,
    ];
    const DIGITS: [KeyCode; 10] = [
        KeyCode::Digit0,
        KeyCode::Digit1,
        KeyCode::Digit2,
        KeyCode::Digit3,
        KeyCode::Digit4,
        KeyCode::Digit5,
        KeyCode::Digit6,
        KeyCode::Digit7,
        KeyCode::Digit8,
        KeyCode::Digit9,
    ];

    if let Some(i) = LETTERS.iter().position(|c| *c == code) {
        return Some(0x61 + i as Keysym);
    }
    DIGITS
        .iter()
        .position(|c| *c == code)
        .map(|i| 0x30 + i as Keysym)
}

/// Resolves a level-0 keysym at `level`. Level 1 upper-cases Latin letters.
pub fn at_level(sym: Keysym, level: u32) -> Keysym {
    if level > 0 && (0x61..=0x7a).contains(&sym) {
        sym - 0x20
    } else {
        sym
    }
}

#[cfg(test)]
mod tests {
    use winit::keyboard::NativeKeyCode;

    use super::*;

    #[test]
    fn named_keys() {
        assert_eq!(keysym_for(PhysicalKey::Code(KeyCode::Escape)), keysym::ESCAPE);
        assert_eq!(keysym_for(PhysicalKey::Code(KeyCode::F12)), keysym::F12);
        assert_eq!(keysym_for(PhysicalKey::Code(KeyCode::NumpadEnter)), keysym::KP_ENTER);
    }

    #[test]
    fn letters_and_digits() {
        assert_eq!(keysym_for(PhysicalKey::Code(KeyCode::KeyA)), 0x61);
        assert_eq!(keysym_for(PhysicalKey::Code(KeyCode::KeyZ)), 0x7a);
        assert_eq!(keysym_for(PhysicalKey::Code(KeyCode::Digit7)), 0x37);
    }

    #[test]
    fn unidentified_has_no_symbol() {
        let pk = PhysicalKey::Unidentified(NativeKeyCode::Unidentified);
        assert_eq!(keysym_for(pk), keysym::NO_SYMBOL);
    }

    #[test]
    fn shift_level_uppercases_letters_only() {
        assert_eq!(at_level(0x61, 1), 0x41);
        assert_eq!(at_level(0x61, 0), 0x61);
        assert_eq!(at_level(keysym::ESCAPE, 1), keysym::ESCAPE);
    }
}
