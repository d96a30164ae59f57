//! Display/windowing substrate capabilities.
//!
//! The window lifecycle and the manager only ever talk to these traits. A
//! `Platform` opens display connections and reports focus; a `Display` is one
//! open connection that owns the windows and contexts created through it.
//!
//! Two substrates ship with the crate:
//! - [`headless::HeadlessPlatform`]: scriptable, in-memory
//! - [`winit::WinitPlatform`]: winit windows with wgpu-backed contexts

pub mod headless;
pub mod winit;

mod error_trap;
mod types;

pub use error_trap::{ErrorFlag, ErrorTrap};
pub use types::{
    Atom,
    ColormapId,
    ConfigId,
    ContextHandle,
    ContextRequest,
    CursorId,
    NativeEvent,
    NativeWindow,
    ProtocolVersion,
    SurfaceAttributes,
    VisualId,
    WindowGeometry,
    WindowSpec,
};

use crate::error::Result;
use crate::input::Keysym;

/// Atom name used for the window-manager close protocol.
pub const CLOSE_PROTOCOL_ATOM: &str = "WM_DELETE_WINDOW";

/// Entry point into a display/windowing substrate.
pub trait Platform {
    type Display: Display;

    /// Opens a new display connection. Fails with `Error::PlatformInit`.
    fn open_display(&self) -> Result<Self::Display>;

    /// Native handle of the window holding input focus, if any.
    fn focused_window(&self) -> Option<NativeWindow>;
}

/// One open display connection.
///
/// Handles returned by a display are only meaningful to that display.
/// Methods returning `Option` model platform calls that can return null.
pub trait Display {
    fn query_version(&mut self) -> Option<ProtocolVersion>;

    /// Root window new top-level windows are parented to.
    fn root_window(&self) -> NativeWindow;

    /// Surface configurations matching `attrs`, best first.
    fn choose_configs(&mut self, attrs: &SurfaceAttributes) -> Vec<ConfigId>;

    fn visual_from_config(&mut self, config: ConfigId) -> Option<VisualId>;

    fn create_colormap(&mut self, parent: NativeWindow, visual: VisualId) -> ColormapId;

    fn free_colormap(&mut self, colormap: ColormapId);

    fn create_window(&mut self, spec: &WindowSpec) -> Option<NativeWindow>;

    fn store_name(&mut self, window: NativeWindow, name: &str);

    fn map_window(&mut self, window: NativeWindow);

    fn destroy_window(&mut self, window: NativeWindow);

    /// Whether versioned ("extended") context creation is available.
    fn supports_versioned_contexts(&self) -> bool;

    /// Creates a context through the versioned path.
    ///
    /// Failures may be reported by returning `None`, by raising the installed
    /// error handler, or both.
    fn create_versioned_context(
        &mut self,
        config: ConfigId,
        window: NativeWindow,
        request: &ContextRequest,
    ) -> Option<ContextHandle>;

    /// Creates a context through the basic, non-versioned path.
    fn create_basic_context(
        &mut self,
        config: ConfigId,
        window: NativeWindow,
    ) -> Option<ContextHandle>;

    fn destroy_context(&mut self, context: ContextHandle);

    /// Binds `target` as current, or unbinds when `None`.
    fn make_current(&mut self, target: Option<(NativeWindow, ContextHandle)>) -> bool;

    /// Installs `handler` as the error handler, returning the previous one.
    fn set_error_handler(&mut self, handler: Option<ErrorFlag>) -> Option<ErrorFlag>;

    /// Flushes outstanding requests so their errors reach the handler.
    fn sync(&mut self);

    fn intern_atom(&mut self, name: &str) -> Atom;

    fn set_wm_protocols(&mut self, window: NativeWindow, protocols: &[Atom]);

    /// Number of events that can be read without blocking.
    fn pending(&mut self) -> usize;

    fn next_event(&mut self) -> Option<NativeEvent>;

    /// Origin of `window` relative to `relative_to`.
    fn translate_origin(&mut self, window: NativeWindow, relative_to: NativeWindow) -> (i32, i32);

    fn keycode_to_keysym(&mut self, keycode: u32, level: u32) -> Keysym;

    /// Moves the pointer to `(x, y)` relative to `window`.
    fn warp_pointer(&mut self, window: NativeWindow, x: i32, y: i32);

    /// Allocates an invisible 1x1 cursor. `None` when out of resources.
    fn create_blank_cursor(&mut self, window: NativeWindow) -> Option<CursorId>;

    fn free_cursor(&mut self, cursor: CursorId);

    /// Sets the window cursor, or restores the default when `None`.
    fn define_cursor(&mut self, window: NativeWindow, cursor: Option<CursorId>);

    fn swap_buffers(&mut self, window: NativeWindow);

    /// Swap interval for the current context (0 = immediate, 1 = vsync).
    fn set_swap_interval(&mut self, window: NativeWindow, interval: u32);

    /// Viewport of the current context.
    fn set_viewport(&mut self, x: i32, y: i32, width: u32, height: u32);

    /// Closes the connection. Further calls are no-ops.
    fn close(&mut self);
}
