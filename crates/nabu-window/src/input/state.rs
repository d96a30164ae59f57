use crate::queue::CircularEventQueue;

use super::keyboard::Keyboard;
use super::mouse::Mouse;
use super::types::{InputEvent, KeyState, MouseButtonState};

/// Number of input events retained for replay between drains.
pub const EVENT_HISTORY: usize = 64;

/// Current input state for a single window.
///
/// Holds "is down" information, pointer samples, and the events applied
/// since the application last drained them.
#[derive(Debug, Default)]
pub struct InputState {
    pub keyboard: Keyboard,
    pub mouse: Mouse,

    /// Whether the window most recently gained (true) or lost focus.
    pub focused: bool,

    events: CircularEventQueue<InputEvent, EVENT_HISTORY>,
}

impl InputState {
    /// Applies a platform-agnostic input event and stages it for replay.
    pub fn apply_event(&mut self, ev: InputEvent) {
        match &ev {
            InputEvent::Key { symbol, state } => {
                self.keyboard
                    .register_event(*symbol, *state == KeyState::Pressed);
            }

            InputEvent::PointerMoved { x, y } => {
                self.mouse.update_xy(*x, *y);
            }

            InputEvent::PointerButton { button, state } => {
                self.mouse
                    .set_button(*button, *state == MouseButtonState::Pressed);
            }

            InputEvent::Wheel { delta } => {
                let pos = self.mouse.wheel + *delta;
                self.mouse.update_wheel(pos);
            }

            InputEvent::Focused(f) => {
                // Held keys are kept across focus changes.
                self.focused = *f;
            }
        }

        if self.events.push(ev).is_some() {
            log::trace!("input history full; oldest event dropped");
        }
    }

    /// Events applied since the last drain, oldest first.
    pub fn events(&self) -> impl Iterator<Item = &InputEvent> + '_ {
        self.events.iter()
    }

    /// Removes and returns staged events, oldest first.
    pub fn drain_events(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.events.drain()
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::keysym;
    use crate::input::{Key, MouseButton};

    fn state() -> InputState {
        let mut s = InputState::default();
        s.keyboard.map_keys(Key::default_mapping()).unwrap();
        s
    }

    fn key(symbol: u32, state: KeyState) -> InputEvent {
        InputEvent::Key { symbol, state }
    }

    #[test]
    fn key_events_fold_to_last() {
        let mut s = state();
        s.apply_event(key(keysym::TAB, KeyState::Pressed));
        s.apply_event(key(keysym::TAB, KeyState::Pressed));
        s.apply_event(key(keysym::TAB, KeyState::Released));
        assert_eq!(s.keyboard.key_down(Key::Tab), Ok(false));
    }

    #[test]
    fn press_and_release_in_one_batch_both_recorded() {
        let mut s = state();
        s.apply_event(InputEvent::PointerButton {
            button: MouseButton::Left,
            state: MouseButtonState::Pressed,
        });
        s.apply_event(InputEvent::PointerButton {
            button: MouseButton::Left,
            state: MouseButtonState::Released,
        });

        assert!(!s.mouse.lmb);
        let staged: Vec<_> = s.drain_events().collect();
        assert_eq!(staged.len(), 2);
        assert!(s.events().next().is_none());
    }

    #[test]
    fn wheel_accumulates_position() {
        let mut s = state();
        s.apply_event(InputEvent::Wheel { delta: 1.0 });
        s.apply_event(InputEvent::Wheel { delta: 2.0 });
        assert_eq!(s.mouse.wheel, 3.0);
        assert_eq!(s.mouse.last_wheel, 1.0);
    }

    #[test]
    fn focus_loss_keeps_held_keys() {
        let mut s = state();
        s.apply_event(key(keysym::SHIFT_L, KeyState::Pressed));
        s.apply_event(InputEvent::Focused(false));
        assert!(!s.focused);
        assert_eq!(s.keyboard.key_state("L_SHIFT"), Ok(true));
    }

    #[test]
    fn history_is_bounded() {
        let mut s = state();
        for i in 0..(EVENT_HISTORY + 10) {
            s.apply_event(InputEvent::PointerMoved { x: i as f32, y: 0.0 });
        }
        assert_eq!(s.events().count(), EVENT_HISTORY);
        assert_eq!(
            s.events().next(),
            Some(&InputEvent::PointerMoved { x: 10.0, y: 0.0 })
        );
    }
}
