use super::types::MouseButton;

/// Mouse tracker for a single window.
///
/// Keeps the current and previous pointer/wheel samples so callers can read
/// per-update deltas. Button flags only change on press/release events.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Mouse {
    pub x: f32,
    pub y: f32,

    pub last_x: f32,
    pub last_y: f32,

    /// Accumulated wheel ("middle button") position.
    pub wheel: f32,
    pub last_wheel: f32,

    pub lmb: bool,
    pub mmb: bool,
    pub rmb: bool,
}

impl Mouse {
    /// Stores a new pointer sample; the current one becomes the previous.
    pub fn update_xy(&mut self, x: f32, y: f32) {
        self.last_x = self.x;
        self.last_y = self.y;

        self.x = x;
        self.y = y;
    }

    /// Stores a new wheel position; the current one becomes the previous.
    pub fn update_wheel(&mut self, pos: f32) {
        self.last_wheel = self.wheel;
        self.wheel = pos;
    }

    pub fn set_button(&mut self, button: MouseButton, down: bool) {
        match button {
            MouseButton::Left => self.lmb = down,
            MouseButton::Middle => self.mmb = down,
            MouseButton::Right => self.rmb = down,
        }
    }

    pub fn button_down(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => self.lmb,
            MouseButton::Middle => self.mmb,
            MouseButton::Right => self.rmb,
        }
    }

    /// Pointer movement since the previous sample.
    pub fn delta(&self) -> (f32, f32) {
        (self.x - self.last_x, self.y - self.last_y)
    }

    pub fn wheel_delta(&self) -> f32 {
        self.wheel - self.last_wheel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_tracks_previous_sample() {
        let mut m = Mouse::default();
        m.update_xy(5.0, 5.0);
        m.update_xy(8.0, 8.0);
        assert_eq!(m.delta(), (3.0, 3.0));
        assert_eq!((m.last_x, m.last_y), (5.0, 5.0));
    }

    #[test]
    fn wheel_keeps_one_previous_sample() {
        let mut m = Mouse::default();
        m.update_wheel(120.0);
        m.update_wheel(240.0);
        assert_eq!(m.last_wheel, 120.0);
        assert_eq!(m.wheel_delta(), 120.0);
    }

    #[test]
    fn buttons_are_independent() {
        let mut m = Mouse::default();
        m.set_button(MouseButton::Left, true);
        m.set_button(MouseButton::Right, true);
        m.set_button(MouseButton::Left, false);
        assert!(!m.button_down(MouseButton::Left));
        assert!(!m.mmb);
        assert!(m.rmb);
    }
}
