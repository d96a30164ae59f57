use std::collections::HashMap;

use crate::window::WindowConfig;

pub const WIDTH: &str = "width";
pub const HEIGHT: &str = "height";
pub const VSYNC: &str = "vSync";
pub const PERSPECTIVE: &str = "perspective";
pub const CLOSED: &str = "closed";
pub const MSAA: &str = "msaa";

/// Per-window named integer properties.
///
/// Booleans are stored as 0/1. Names that were never set read as 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    values: HashMap<String, i64>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options with `width` and `height` set.
    pub fn with_size(width: u32, height: u32) -> Self {
        let mut options = Self::new();
        options.set(WIDTH, i64::from(width));
        options.set(HEIGHT, i64::from(height));
        options
    }

    pub fn get(&self, name: &str) -> i64 {
        self.get_or(name, 0)
    }

    pub fn get_or(&self, name: &str, fallback: i64) -> i64 {
        self.values.get(name).copied().unwrap_or(fallback)
    }

    pub fn get_bool(&self, name: &str) -> bool {
        self.get(name) != 0
    }

    pub fn set(&mut self, name: impl Into<String>, value: i64) {
        self.values.insert(name.into(), value);
    }

    pub fn set_bool(&mut self, name: impl Into<String>, value: bool) {
        self.set(name, i64::from(value));
    }

    /// Chaining form of [`Options::set`].
    pub fn with(mut self, name: impl Into<String>, value: i64) -> Self {
        self.set(name, value);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Builds the creation parameters for a window named `name`.
    ///
    /// `msaa` falls back to the [`WindowConfig`] default when unset.
    /// Negative sizes become 0 and are rejected at creation.
    pub fn to_window_config(&self, name: &str) -> WindowConfig {
        let defaults = WindowConfig::default();
        let dim = |key| u32::try_from(self.get(key)).unwrap_or(0);

        WindowConfig {
            name: name.to_string(),
            width: dim(WIDTH),
            height: dim(HEIGHT),
            msaa: u32::try_from(self.get_or(MSAA, i64::from(defaults.msaa))).unwrap_or(0),
            ..defaults
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_names_read_zero() {
        let options = Options::new();
        assert_eq!(options.get("anything"), 0);
        assert!(!options.get_bool(VSYNC));
    }

    #[test]
    fn bools_round_through_integers() {
        let mut options = Options::new();
        options.set_bool(PERSPECTIVE, true);
        assert_eq!(options.get(PERSPECTIVE), 1);
        options.set(PERSPECTIVE, 0);
        assert!(!options.get_bool(PERSPECTIVE));
    }

    #[test]
    fn window_config_from_options() {
        let config = Options::with_size(600, 400).to_window_config("child");
        assert_eq!(config.name, "child");
        assert_eq!((config.width, config.height), (600, 400));
        assert_eq!(config.msaa, WindowConfig::default().msaa);

        let config = Options::with_size(10, 10).with(MSAA, 0).to_window_config("x");
        assert_eq!(config.msaa, 0);
    }

    #[test]
    fn negative_size_becomes_zero() {
        let config = Options::new().with(WIDTH, -5).to_window_config("x");
        assert_eq!(config.width, 0);
    }
}
