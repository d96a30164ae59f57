use crate::platform::NativeWindow;

/// Creation parameters for a [`super::SurfaceWindow`].
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub name: String,
    pub width: u32,
    pub height: u32,

    /// Multisample level; 0 disables sample buffers.
    pub msaa: u32,

    /// Parent window; `None` creates a top-level window.
    pub parent: Option<NativeWindow>,

    /// Request a debug-capable context on the versioned path.
    pub debug_context: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            name: "nabu".to_string(),
            width: 800,
            height: 600,
            msaa: 8,
            parent: None,
            debug_context: true,
        }
    }
}

impl WindowConfig {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_msaa(mut self, msaa: u32) -> Self {
        self.msaa = msaa;
        self
    }

    pub fn with_parent(mut self, parent: NativeWindow) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_debug_context(mut self, debug: bool) -> Self {
        self.debug_context = debug;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_requests_eight_samples() {
        let config = WindowConfig::new(10, 20);
        assert_eq!(config.msaa, 8);
        assert_eq!((config.width, config.height), (10, 20));
        assert_eq!(config.parent, None);
    }
}
