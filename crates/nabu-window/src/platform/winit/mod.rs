//! winit substrate.
//!
//! One winit `EventLoop` is shared by every display opened from a
//! [`WinitPlatform`]; it is pumped without blocking whenever a display asks
//! for pending events. Contexts are wgpu devices with a surface bound to the
//! window, negotiated per [`ContextRequest`].
//!
//! winit allows a single event loop per process, so create one
//! `WinitPlatform` and clone it.

mod gpu;
mod keymap;
mod router;

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use raw_window_handle::HasWindowHandle;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event_loop::EventLoop;
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::Window;

use crate::error::{Error, Result};
use crate::input::Keysym;

use super::{
    Atom,
    ColormapId,
    ConfigId,
    ContextHandle,
    ContextRequest,
    CursorId,
    Display,
    ErrorFlag,
    NativeEvent,
    NativeWindow,
    Platform,
    ProtocolVersion,
    SurfaceAttributes,
    VisualId,
    WindowSpec,
    CLOSE_PROTOCOL_ATOM,
};

use gpu::{ContextProfile, GpuContext, SurfaceErrorAction};
use router::Router;

pub use keymap::keysym_for;

/// Top-level windows are parented to this handle.
const ROOT: NativeWindow = NativeWindow(0);

/// Version reported by winit displays. Always satisfies the minimum.
const SURFACE_PROTOCOL: ProtocolVersion = ProtocolVersion::new(1, 4);

/// Pumps allowed for a queued window creation to be serviced.
const CREATE_PUMPS: usize = 8;

/// winit/wgpu substrate configuration.
#[derive(Debug, Clone)]
pub struct WinitConfig {
    /// Adapter preference for versioned contexts. Basic contexts always
    /// request a low-power adapter.
    pub power_preference: wgpu::PowerPreference,

    /// Color every swap clears the surface to, until changed through
    /// [`WinitDisplay::set_clear_color`].
    pub clear_color: wgpu::Color,

    /// Hint; support depends on platform/backend.
    pub desired_maximum_frame_latency: u32,

    /// Highest multisample level surface configurations accept.
    pub max_samples: u32,

    /// Advertise the versioned context path.
    pub versioned_contexts: bool,
}

impl Default for WinitConfig {
    fn default() -> Self {
        Self {
            power_preference: wgpu::PowerPreference::HighPerformance,
            clear_color: wgpu::Color::BLACK,
            desired_maximum_frame_latency: 2,
            max_samples: 8,
            versioned_contexts: true,
        }
    }
}

struct Shared {
    event_loop: Option<EventLoop<()>>,
    router: Router,
}

impl Shared {
    /// Dispatches every queued winit event without blocking.
    fn pump(&mut self) {
        let Self { event_loop, router } = self;
        let Some(el) = event_loop.as_mut() else {
            return;
        };

        if let PumpStatus::Exit(code) = el.pump_app_events(Some(Duration::ZERO), router) {
            log::warn!("winit event loop exited with code {code}");
            *event_loop = None;
        }
    }
}

/// Platform backed by winit windows and wgpu contexts.
#[derive(Clone)]
pub struct WinitPlatform {
    shared: Rc<RefCell<Shared>>,
    config: WinitConfig,
}

impl WinitPlatform {
    pub fn new(config: WinitConfig) -> Result<Self> {
        let event_loop = EventLoop::new()
            .map_err(|e| Error::PlatformInit(format!("failed to create winit EventLoop: {e}")))?;

        let shared = Shared {
            event_loop: Some(event_loop),
            router: Router::default(),
        };

        Ok(Self {
            shared: Rc::new(RefCell::new(shared)),
            config,
        })
    }

    pub fn config(&self) -> &WinitConfig {
        &self.config
    }
}

impl Platform for WinitPlatform {
    type Display = WinitDisplay;

    fn open_display(&self) -> Result<WinitDisplay> {
        let mut shared = self.shared.borrow_mut();
        if shared.event_loop.is_none() {
            return Err(Error::PlatformInit("winit event loop has exited".into()));
        }

        let id = shared.router.alloc();
        log::debug!("opened winit display {id}");

        Ok(WinitDisplay {
            id,
            shared: Rc::clone(&self.shared),
            config: self.config.clone(),
            handler: None,
            windows: HashSet::new(),
            contexts: HashMap::new(),
            current: None,
            next_resource: 0,
            open: true,
        })
    }

    fn focused_window(&self) -> Option<NativeWindow> {
        let mut shared = self.shared.borrow_mut();
        shared.pump();
        shared.router.focused()
    }
}

/// One connection to the shared winit event loop.
pub struct WinitDisplay {
    id: u64,
    shared: Rc<RefCell<Shared>>,
    config: WinitConfig,
    handler: Option<ErrorFlag>,
    windows: HashSet<NativeWindow>,
    contexts: HashMap<ContextHandle, (NativeWindow, GpuContext)>,
    current: Option<(NativeWindow, ContextHandle)>,
    next_resource: u32,
    open: bool,
}

impl WinitDisplay {
    /// The winit window behind `native`, if it is still registered.
    pub fn winit_window(&self, native: NativeWindow) -> Option<Arc<Window>> {
        self.shared.borrow().router.window(native).cloned()
    }

    /// Sets the color swaps on `window` clear to.
    pub fn set_clear_color(&mut self, window: NativeWindow, color: wgpu::Color) {
        if let Some(ctx) = self.context_for(window) {
            ctx.set_clear_color(color);
        }
    }

    fn context_for(&mut self, window: NativeWindow) -> Option<&mut GpuContext> {
        self.contexts
            .values_mut()
            .find(|(w, _)| *w == window)
            .map(|(_, ctx)| ctx)
    }

    fn alloc_resource(&mut self) -> u32 {
        self.next_resource += 1;
        self.next_resource
    }

    fn protocol_error(&self, what: &str, err: &anyhow::Error) {
        log::warn!("{what}: {err:#}");
        match &self.handler {
            Some(flag) => flag.raise(),
            None => log::error!("unhandled error in {what}"),
        }
    }

    fn create_context(
        &mut self,
        window: NativeWindow,
        profile: ContextProfile,
    ) -> Option<ContextHandle> {
        let Some(win) = self.winit_window(window) else {
            log::error!("context requested for unknown window {window}");
            return None;
        };

        match pollster::block_on(GpuContext::new(win, &profile, &self.config)) {
            Ok(ctx) => {
                let handle = ContextHandle(self.shared.borrow_mut().router.alloc());
                self.contexts.insert(handle, (window, ctx));
                Some(handle)
            }
            Err(e) => {
                self.protocol_error(profile.label, &e);
                None
            }
        }
    }
}

impl Display for WinitDisplay {
    fn query_version(&mut self) -> Option<ProtocolVersion> {
        self.open.then_some(SURFACE_PROTOCOL)
    }

    fn root_window(&self) -> NativeWindow {
        ROOT
    }

    /// The configuration id carries the requested sample count.
    fn choose_configs(&mut self, attrs: &SurfaceAttributes) -> Vec<ConfigId> {
        let satisfiable = attrs.samples <= self.config.max_samples
            && attrs.depth_bits <= 24
            && attrs.stencil_bits <= 8;

        if satisfiable {
            vec![ConfigId(attrs.samples)]
        } else {
            Vec::new()
        }
    }

    fn visual_from_config(&mut self, config: ConfigId) -> Option<VisualId> {
        Some(VisualId(config.0))
    }

    fn create_colormap(&mut self, _parent: NativeWindow, _visual: VisualId) -> ColormapId {
        ColormapId(self.alloc_resource())
    }

    fn free_colormap(&mut self, _colormap: ColormapId) {}

    fn create_window(&mut self, spec: &WindowSpec) -> Option<NativeWindow> {
        let mut attrs = Window::default_attributes()
            .with_inner_size(PhysicalSize::new(spec.width, spec.height))
            .with_visible(false);

        if spec.parent != ROOT {
            let parent = self.winit_window(spec.parent)?;
            let raw = match parent.window_handle() {
                Ok(handle) => handle.as_raw(),
                Err(e) => {
                    log::error!("parent {} has no window handle: {e}", spec.parent);
                    return None;
                }
            };
            // SAFETY: the parent is registered in the router, so its native
            // window stays alive while the child is created.
            attrs = unsafe { attrs.with_parent_window(Some(raw)) };
        }

        let mut shared = self.shared.borrow_mut();
        shared.router.request_window(attrs);

        let created = (0..CREATE_PUMPS).find_map(|_| {
            shared.pump();
            shared.router.take_created()
        });

        match created {
            Some(Ok(window)) => {
                let native = NativeWindow(shared.router.alloc());
                shared.router.register(native, self.id, Arc::new(window));
                self.windows.insert(native);
                Some(native)
            }
            Some(Err(e)) => {
                log::error!("winit window creation failed: {e}");
                None
            }
            None => {
                log::error!("window creation was not serviced by the event loop");
                None
            }
        }
    }

    fn store_name(&mut self, window: NativeWindow, name: &str) {
        if let Some(w) = self.winit_window(window) {
            w.set_title(name);
        }
    }

    fn map_window(&mut self, window: NativeWindow) {
        if let Some(w) = self.winit_window(window) {
            w.set_visible(true);
            w.request_redraw();
        }
    }

    fn destroy_window(&mut self, window: NativeWindow) {
        self.contexts.retain(|_, (w, _)| *w != window);
        if self.current.is_some_and(|(w, _)| w == window) {
            self.current = None;
        }
        self.windows.remove(&window);
        self.shared.borrow_mut().router.deregister(window);
    }

    fn supports_versioned_contexts(&self) -> bool {
        self.config.versioned_contexts
    }

    fn create_versioned_context(
        &mut self,
        _config: ConfigId,
        window: NativeWindow,
        request: &ContextRequest,
    ) -> Option<ContextHandle> {
        let profile = ContextProfile::versioned(request, &self.config);
        self.create_context(window, profile)
    }

    fn create_basic_context(
        &mut self,
        _config: ConfigId,
        window: NativeWindow,
    ) -> Option<ContextHandle> {
        self.create_context(window, ContextProfile::basic())
    }

    fn destroy_context(&mut self, context: ContextHandle) {
        self.contexts.remove(&context);
        if self.current.is_some_and(|(_, c)| c == context) {
            self.current = None;
        }
    }

    fn make_current(&mut self, target: Option<(NativeWindow, ContextHandle)>) -> bool {
        match target {
            Some((window, context)) => {
                let bound = self
                    .contexts
                    .get(&context)
                    .is_some_and(|(w, _)| *w == window);
                if bound {
                    self.current = target;
                }
                bound
            }
            None => {
                self.current = None;
                true
            }
        }
    }

    fn set_error_handler(&mut self, handler: Option<ErrorFlag>) -> Option<ErrorFlag> {
        std::mem::replace(&mut self.handler, handler)
    }

    fn sync(&mut self) {
        self.shared.borrow_mut().pump();
    }

    fn intern_atom(&mut self, name: &str) -> Atom {
        self.shared.borrow_mut().router.intern_atom(name)
    }

    fn set_wm_protocols(&mut self, window: NativeWindow, protocols: &[Atom]) {
        let mut shared = self.shared.borrow_mut();
        let close = shared.router.intern_atom(CLOSE_PROTOCOL_ATOM);
        if protocols.contains(&close) {
            shared.router.set_close_protocol(window, close);
        }
    }

    fn pending(&mut self) -> usize {
        if !self.open {
            return 0;
        }
        let mut shared = self.shared.borrow_mut();
        shared.pump();
        shared.router.pending(self.id)
    }

    fn next_event(&mut self) -> Option<NativeEvent> {
        if !self.open {
            return None;
        }
        self.shared.borrow_mut().router.next_event(self.id)
    }

    fn translate_origin(&mut self, window: NativeWindow, relative_to: NativeWindow) -> (i32, i32) {
        let origin = |native: NativeWindow| {
            self.winit_window(native)
                .and_then(|w| w.inner_position().ok())
                .map_or((0, 0), |p| (p.x, p.y))
        };

        let (x, y) = origin(window);
        if relative_to == ROOT {
            return (x, y);
        }
        let (px, py) = origin(relative_to);
        (x - px, y - py)
    }

    fn keycode_to_keysym(&mut self, keycode: u32, level: u32) -> Keysym {
        keymap::at_level(keycode, level)
    }

    fn warp_pointer(&mut self, window: NativeWindow, x: i32, y: i32) {
        let Some(w) = self.winit_window(window) else {
            return;
        };
        if let Err(e) = w.set_cursor_position(PhysicalPosition::new(x, y)) {
            log::debug!("pointer warp unsupported for {window}: {e}");
        }
    }

    fn create_blank_cursor(&mut self, _window: NativeWindow) -> Option<CursorId> {
        Some(CursorId(self.alloc_resource()))
    }

    fn free_cursor(&mut self, _cursor: CursorId) {}

    fn define_cursor(&mut self, window: NativeWindow, cursor: Option<CursorId>) {
        if let Some(w) = self.winit_window(window) {
            w.set_cursor_visible(cursor.is_none());
        }
    }

    fn swap_buffers(&mut self, window: NativeWindow) {
        let Some(ctx) = self.context_for(window) else {
            return;
        };

        match ctx.present() {
            None => {}
            Some(SurfaceErrorAction::Fatal) => log::error!("surface out of memory on {window}"),
            Some(action) => log::debug!("frame on {window} not presented: {action:?}"),
        }
    }

    fn set_swap_interval(&mut self, window: NativeWindow, interval: u32) {
        if let Some(ctx) = self.context_for(window) {
            ctx.set_vsync(interval > 0);
        }
    }

    /// The viewport always spans the surface; the origin is ignored.
    fn set_viewport(&mut self, _x: i32, _y: i32, width: u32, height: u32) {
        let Some((_, context)) = self.current else {
            return;
        };
        if let Some((_, ctx)) = self.contexts.get_mut(&context) {
            ctx.resize(width, height);
        }
    }

    fn close(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        self.current = None;
        self.contexts.clear();

        let windows = std::mem::take(&mut self.windows);
        self.shared.borrow_mut().router.drop_display(self.id, &windows);
        log::debug!("closed winit display {}", self.id);
    }
}

impl Drop for WinitDisplay {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modern_profile_requests_full_limits() {
        let config = WinitConfig::default();
        let profile = ContextProfile::versioned(&ContextRequest::modern(true), &config);
        assert_eq!(profile.limits, wgpu::Limits::default());
        assert_eq!(profile.flags, wgpu::InstanceFlags::debugging());
        assert_eq!(profile.power_preference, config.power_preference);
    }

    #[test]
    fn legacy_profile_requests_downlevel_limits() {
        let config = WinitConfig::default();
        let profile = ContextProfile::versioned(&ContextRequest::legacy(false), &config);
        assert_eq!(profile.limits, wgpu::Limits::downlevel_webgl2_defaults());
        assert!(profile.flags.is_empty());
    }

    #[test]
    fn basic_profile_prefers_low_power() {
        let profile = ContextProfile::basic();
        assert_eq!(profile.power_preference, wgpu::PowerPreference::LowPower);
        assert_eq!(profile.limits, wgpu::Limits::downlevel_defaults());
    }
}
