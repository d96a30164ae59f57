use crate::error::Result;
use crate::platform::Platform;
use crate::window::SurfaceWindow;

use super::handler::WindowHandler;
use super::options::{Options, CLOSED, VSYNC};

/// A surface window together with its options and application handler.
///
/// Construction applies the options and runs `post_init`. Teardown runs
/// `destroy`, closes the window and sets `closed`, exactly once, either
/// explicitly or on drop.
pub struct ManagedWindow<P: Platform, H: WindowHandler<P>> {
    window: SurfaceWindow<P>,
    handler: H,
    options: Options,
    retiring: bool,
    torn_down: bool,
}

impl<P: Platform, H: WindowHandler<P>> ManagedWindow<P, H> {
    /// Creates a window named `name` from `options` and wraps it.
    pub fn create(platform: &P, name: &str, options: Options, handler: H) -> Result<Self> {
        let window = SurfaceWindow::create(platform, &options.to_window_config(name))?;
        Ok(Self::new(window, options, handler))
    }

    /// Wraps an already created window.
    pub fn new(mut window: SurfaceWindow<P>, mut options: Options, mut handler: H) -> Self {
        options.set_bool(CLOSED, false);
        window.set_vsync(options.get_bool(VSYNC));
        window.resize();
        handler.post_init(&mut window);

        Self {
            window,
            handler,
            options,
            retiring: false,
            torn_down: false,
        }
    }

    /// Focus, application draw, swap.
    pub fn draw(&mut self) {
        self.window.focus();
        self.handler.draw(&mut self.window);
        self.window.swap_buffers();
    }

    pub(crate) fn post_draw(&mut self) {
        self.handler.post_draw(&mut self.window);
    }

    /// Drains the window's input; routes to `event` when something was read,
    /// otherwise marks the window for retirement.
    pub(crate) fn pump(&mut self) -> bool {
        if self.window.pump_input() {
            self.handler.event(&mut self.window);
            true
        } else {
            self.retiring = true;
            false
        }
    }

    /// True once the window should leave its manager.
    pub fn is_closed(&self) -> bool {
        self.options.get_bool(CLOSED) || !self.window.is_active()
    }

    pub(crate) fn is_retiring(&self) -> bool {
        self.retiring
    }

    /// Runs `destroy`, closes the window, and sets `closed`. Idempotent.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;

        self.handler.destroy(&mut self.window);
        self.window.close();
        self.options.set_bool(CLOSED, true);
    }

    pub fn window(&self) -> &SurfaceWindow<P> {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut SurfaceWindow<P> {
        &mut self.window
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }
}

impl<P: Platform, H: WindowHandler<P>> Drop for ManagedWindow<P, H> {
    fn drop(&mut self) {
        self.teardown();
    }
}
