use crate::platform::Platform;
use crate::window::SurfaceWindow;

/// Application callbacks for a managed window.
///
/// Every method defaults to a no-op. Each receives the window so the
/// application can read its input and geometry.
pub trait WindowHandler<P: Platform> {
    /// Called once after the window is created, vsync applied, and the
    /// viewport sized.
    fn post_init(&mut self, window: &mut SurfaceWindow<P>) {
        let _ = window;
    }

    /// Called after a drain that read at least one event, while focused.
    fn event(&mut self, window: &mut SurfaceWindow<P>) {
        let _ = window;
    }

    /// Called every cycle before [`WindowHandler::draw`].
    fn post_draw(&mut self, window: &mut SurfaceWindow<P>) {
        let _ = window;
    }

    /// Called every cycle with the window's context current; buffers are
    /// swapped afterwards.
    fn draw(&mut self, window: &mut SurfaceWindow<P>) {
        let _ = window;
    }

    /// Called once, before the window is closed.
    fn destroy(&mut self, window: &mut SurfaceWindow<P>) {
        let _ = window;
    }
}

impl<P: Platform> WindowHandler<P> for Box<dyn WindowHandler<P>> {
    fn post_init(&mut self, window: &mut SurfaceWindow<P>) {
        (**self).post_init(window);
    }

    fn event(&mut self, window: &mut SurfaceWindow<P>) {
        (**self).event(window);
    }

    fn post_draw(&mut self, window: &mut SurfaceWindow<P>) {
        (**self).post_draw(window);
    }

    fn draw(&mut self, window: &mut SurfaceWindow<P>) {
        (**self).draw(window);
    }

    fn destroy(&mut self, window: &mut SurfaceWindow<P>) {
        (**self).destroy(window);
    }
}

/// Handler with no behavior.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHandler;

impl<P: Platform> WindowHandler<P> for NoopHandler {}
