use std::fmt;

use crate::error::{Error, Result};
use crate::input::{InputState, Key};
use crate::platform::{
    Atom,
    ColormapId,
    ConfigId,
    ContextHandle,
    ContextRequest,
    CursorId,
    Display,
    ErrorTrap,
    NativeEvent,
    NativeWindow,
    Platform,
    ProtocolVersion,
    SurfaceAttributes,
    WindowGeometry,
    WindowSpec,
    CLOSE_PROTOCOL_ATOM,
};

use super::config::WindowConfig;
use super::events::{classify, to_input_event, EventClass};

/// Handles passed to the resize callback.
///
/// The window's context is already current when the callback runs.
pub struct SurfaceCtx<'a, D: Display> {
    display: &'a mut D,
    window: NativeWindow,
    context: ContextHandle,
}

impl<D: Display> SurfaceCtx<'_, D> {
    /// Binds the window's context as current.
    pub fn focus(&mut self) {
        self.display.make_current(Some((self.window, self.context)));
    }

    pub fn set_viewport(&mut self, x: i32, y: i32, width: u32, height: u32) {
        self.display.set_viewport(x, y, width, height);
    }

    pub fn window(&self) -> NativeWindow {
        self.window
    }

    pub fn display(&mut self) -> &mut D {
        &mut *self.display
    }
}

/// Resize callback: `(ctx, x, y, width, height)`.
pub type ResizeFn<D> = Box<dyn FnMut(&mut SurfaceCtx<'_, D>, i32, i32, u32, u32)>;

fn default_resize<D: Display>() -> ResizeFn<D> {
    Box::new(|ctx: &mut SurfaceCtx<'_, D>, x: i32, y: i32, width: u32, height: u32| {
        ctx.focus();
        ctx.set_viewport(x, y, width, height);
    })
}

/// Platform objects held by a window. Every field is released exactly once.
struct Resources<D: Display> {
    display: D,
    window: Option<NativeWindow>,
    context: Option<ContextHandle>,
    colormap: Option<ColormapId>,
    blank_cursor: Option<CursorId>,
    close_atom: Option<Atom>,
}

impl<D: Display> Resources<D> {
    fn new(display: D) -> Self {
        Self {
            display,
            window: None,
            context: None,
            colormap: None,
            blank_cursor: None,
            close_atom: None,
        }
    }

    /// Releases whatever was acquired, in reverse order. Never fails.
    fn release(mut self) {
        if let Some(context) = self.context.take() {
            self.display.make_current(None);
            self.display.destroy_context(context);
        }
        if let Some(cursor) = self.blank_cursor.take() {
            self.display.free_cursor(cursor);
        }
        if let Some(window) = self.window.take() {
            self.display.destroy_window(window);
        }
        if let Some(colormap) = self.colormap.take() {
            self.display.free_colormap(colormap);
        }
        self.display.close();
    }
}

/// A native window bound to one rendering context and one input state.
///
/// Created through [`SurfaceWindow::create`], which negotiates the surface
/// configuration and context. Once closed a window stays closed; dropping
/// it closes it.
pub struct SurfaceWindow<P: Platform> {
    resources: Option<Resources<P::Display>>,

    handle: NativeWindow,
    parent: NativeWindow,
    context: ContextHandle,

    name: String,
    width: u32,
    height: u32,
    x: i32,
    y: i32,
    msaa: u32,

    active: bool,
    close_pending: bool,
    cursor_hidden: bool,
    focus_in: bool,

    input: InputState,
    on_resize: ResizeFn<P::Display>,
}

impl<P: Platform> SurfaceWindow<P> {
    /// Opens a display connection and creates a window with a current context.
    ///
    /// Fails with `PlatformInit`, `Capability`, `WindowCreation`, or
    /// `ContextCreation`. Anything acquired before the failure is released.
    pub fn create(platform: &P, config: &WindowConfig) -> Result<Self> {
        if config.width == 0 || config.height == 0 {
            return Err(Error::InvalidGeometry {
                width: config.width,
                height: config.height,
            });
        }

        let mut input = InputState::default();
        input.keyboard.map_keys(Key::default_mapping())?;

        let display = platform.open_display()?;
        let mut resources = Resources::new(display);

        let (handle, parent, context) = match negotiate(&mut resources, config) {
            Ok(bound) => bound,
            Err(e) => {
                log::error!("window {:?} creation failed: {e}", config.name);
                resources.release();
                return Err(e);
            }
        };

        log::debug!(
            "created window {:?} ({}x{}, msaa {}) handle {handle} context {context}",
            config.name,
            config.width,
            config.height,
            config.msaa
        );

        Ok(Self {
            resources: Some(resources),
            handle,
            parent,
            context,
            name: config.name.clone(),
            width: config.width,
            height: config.height,
            x: 0,
            y: 0,
            msaa: config.msaa,
            active: true,
            close_pending: false,
            cursor_hidden: false,
            focus_in: false,
            input,
            on_resize: default_resize(),
        })
    }

    /// Binds this window's context as current. No-op when inactive.
    pub fn focus(&mut self) {
        if !self.active {
            return;
        }
        if let Some(res) = self.resources.as_mut() {
            if !res.display.make_current(Some((self.handle, self.context))) {
                log::warn!("failed to make context current for window {:?}", self.name);
            }
        }
    }

    /// Replaces the resize callback.
    pub fn set_resize<F>(&mut self, callback: F)
    where
        F: FnMut(&mut SurfaceCtx<'_, P::Display>, i32, i32, u32, u32) + 'static,
    {
        self.on_resize = Box::new(callback);
    }

    /// Runs the resize callback over the full surface, context current.
    pub fn resize(&mut self) {
        if !self.active {
            return;
        }
        let Some(res) = self.resources.as_mut() else {
            return;
        };

        let mut ctx = SurfaceCtx {
            display: &mut res.display,
            window: self.handle,
            context: self.context,
        };
        ctx.focus();
        (self.on_resize)(&mut ctx, 0, 0, self.width, self.height);
    }

    pub fn swap_buffers(&mut self) {
        if !self.active {
            return;
        }
        if let Some(res) = self.resources.as_mut() {
            res.display.swap_buffers(self.handle);
        }
    }

    /// Enables or disables vertical sync for this window's swaps.
    pub fn set_vsync(&mut self, enabled: bool) {
        if !self.active {
            return;
        }
        if let Some(res) = self.resources.as_mut() {
            res.display.set_swap_interval(self.handle, u32::from(enabled));
        }
    }

    /// Asks for the window to close at the end of the next drain.
    pub fn request_close(&mut self) {
        self.close_pending = true;
    }

    /// Drains every pending native event without blocking.
    ///
    /// Events are applied in arrival order. Redraws update the size at once
    /// but run the resize callback only once, after the drain, with the final
    /// geometry. A pending close request is honored at the end.
    ///
    /// Returns whether at least one event was read; false without draining
    /// when the window is inactive.
    pub fn pump_input(&mut self) -> bool {
        if !self.active {
            return false;
        }
        let Some(res) = self.resources.as_mut() else {
            return false;
        };

        let mut had_event = false;
        let mut need_resize = false;

        while res.display.pending() > 0 {
            let Some(event) = res.display.next_event() else {
                break;
            };
            had_event = true;

            match classify(&event, res.close_atom) {
                EventClass::Redraw => {
                    if let NativeEvent::Expose { width, height } = event {
                        self.width = width;
                        self.height = height;
                    }
                    need_resize = true;
                }

                EventClass::Key | EventClass::Mouse => {
                    if let Some(ev) = to_input_event(&mut res.display, &event) {
                        self.input.apply_event(ev);
                    }
                }

                EventClass::Focus => {
                    self.focus_in = event == NativeEvent::FocusIn;
                    if let Some(ev) = to_input_event(&mut res.display, &event) {
                        self.input.apply_event(ev);
                    }
                }

                EventClass::CloseRequest => {
                    log::debug!("close requested for window {:?}", self.name);
                    self.close_pending = true;
                }

                EventClass::Ignored => {}
            }
        }

        if need_resize {
            self.update_position();
            self.resize();
        }

        if self.close_pending {
            self.close();
        }

        had_event
    }

    /// Recomputes `x`/`y` relative to the parent window.
    pub fn update_position(&mut self) {
        if let Some(res) = self.resources.as_mut() {
            let (x, y) = res.display.translate_origin(self.handle, self.parent);
            self.x = x;
            self.y = y;
        }
    }

    /// Moves the pointer to `(dx, dy)` relative to this window.
    pub fn move_cursor_to(&mut self, dx: i32, dy: i32) {
        self.update_position();
        if let Some(res) = self.resources.as_mut() {
            res.display.warp_pointer(self.handle, dx, dy);
            res.display.sync();
        }
    }

    /// Replaces the cursor with a blank one while it is over this window.
    pub fn hide_cursor(&mut self) -> Result<()> {
        if self.cursor_hidden {
            return Ok(());
        }
        let Some(res) = self.resources.as_mut() else {
            return Ok(());
        };

        let cursor = match res.blank_cursor {
            Some(cursor) => cursor,
            None => {
                let cursor = res.display.create_blank_cursor(self.handle).ok_or_else(|| {
                    Error::ResourceExhaustion("blank cursor pixmap".to_string())
                })?;
                res.blank_cursor = Some(cursor);
                cursor
            }
        };

        res.display.define_cursor(self.handle, Some(cursor));
        self.cursor_hidden = true;
        Ok(())
    }

    pub fn show_cursor(&mut self) {
        if !self.cursor_hidden {
            return;
        }
        self.cursor_hidden = false;
        if let Some(res) = self.resources.as_mut() {
            res.display.define_cursor(self.handle, None);
        }
    }

    /// Renames the window and updates its title.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        if let Some(res) = self.resources.as_mut() {
            res.display.store_name(self.handle, &self.name);
        }
    }

    /// Unbinds and destroys the context, destroys the window, and closes
    /// the display connection. Idempotent; never fails.
    pub fn close(&mut self) {
        let Some(resources) = self.resources.take() else {
            return;
        };
        resources.release();
        self.active = false;
        log::debug!("closed window {:?}", self.name);
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_close_pending(&self) -> bool {
        self.close_pending
    }

    pub fn is_cursor_hidden(&self) -> bool {
        self.cursor_hidden
    }

    /// Whether the most recent focus event was a focus-in.
    pub fn has_focus(&self) -> bool {
        self.focus_in
    }

    /// Native handle. Still reported after close, for diagnostics.
    pub fn native_window(&self) -> NativeWindow {
        self.handle
    }

    pub fn parent(&self) -> NativeWindow {
        self.parent
    }

    pub fn context(&self) -> ContextHandle {
        self.context
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn msaa(&self) -> u32 {
        self.msaa
    }

    pub fn geometry(&self) -> WindowGeometry {
        WindowGeometry {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    /// The window's display connection, while it is open.
    pub fn display_mut(&mut self) -> Option<&mut P::Display> {
        self.resources.as_mut().map(|r| &mut r.display)
    }
}

impl<P: Platform> Drop for SurfaceWindow<P> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<P: Platform> fmt::Display for SurfaceWindow<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "name: {}", self.name)?;
        writeln!(
            f,
            "coord[w;h;x;y]: {} {} {} {}",
            self.width, self.height, self.x, self.y
        )?;
        writeln!(f, "context: {}", self.context)?;
        writeln!(f, "window: {}", self.handle)?;
        writeln!(f, "parent: {}", self.parent)?;
        writeln!(
            f,
            "status[active; close; cursor; focus]: {} {} {} {}",
            self.active, self.close_pending, self.cursor_hidden, self.focus_in
        )
    }
}

/// Runs the creation sequence, recording every acquisition in `res`.
fn negotiate<D: Display>(
    res: &mut Resources<D>,
    config: &WindowConfig,
) -> Result<(NativeWindow, NativeWindow, ContextHandle)> {
    let version = res
        .display
        .query_version()
        .ok_or_else(|| Error::PlatformInit("windowing protocol version query failed".into()))?;
    if version < ProtocolVersion::MINIMUM {
        return Err(Error::PlatformInit(format!(
            "windowing protocol {}.{} is older than {}.{}",
            version.major,
            version.minor,
            ProtocolVersion::MINIMUM.major,
            ProtocolVersion::MINIMUM.minor
        )));
    }

    let attrs = SurfaceAttributes::with_msaa(config.msaa);
    let fb_config = res
        .display
        .choose_configs(&attrs)
        .first()
        .copied()
        .ok_or_else(|| {
            Error::Capability(format!(
                "RGBA8 depth24 stencil8 double-buffered with {} samples",
                config.msaa
            ))
        })?;

    let visual = res
        .display
        .visual_from_config(fb_config)
        .ok_or_else(|| Error::Capability("no visual for the chosen configuration".into()))?;

    let parent = config.parent.unwrap_or_else(|| res.display.root_window());
    let colormap = res.display.create_colormap(parent, visual);
    res.colormap = Some(colormap);

    let window = res
        .display
        .create_window(&WindowSpec {
            parent,
            visual,
            colormap,
            width: config.width,
            height: config.height,
        })
        .ok_or_else(|| Error::WindowCreation(format!("null handle for {:?}", config.name)))?;
    res.window = Some(window);

    res.display.store_name(window, &config.name);
    res.display.map_window(window);

    let context = create_context(&mut res.display, fb_config, window, config.debug_context)?;
    res.context = Some(context);

    if !res.display.make_current(Some((window, context))) {
        log::warn!("failed to make the new context current for {:?}", config.name);
    }

    let close_atom = res.display.intern_atom(CLOSE_PROTOCOL_ATOM);
    res.display.set_wm_protocols(window, &[close_atom]);
    res.close_atom = Some(close_atom);

    Ok((window, parent, context))
}

/// Context creation ladder: versioned 3.0, versioned 1.0, then basic.
///
/// An error handler is installed for the whole ladder and the previous one
/// is restored when the trap drops, whichever way this returns.
fn create_context<D: Display>(
    display: &mut D,
    config: ConfigId,
    window: NativeWindow,
    debug: bool,
) -> Result<ContextHandle> {
    let mut trap = ErrorTrap::install(display);

    let context = if !trap.display().supports_versioned_contexts() {
        log::warn!("versioned context creation not available; using basic context");
        trap.display().create_basic_context(config, window)
    } else {
        attempt(&mut trap, |d| {
            d.create_versioned_context(config, window, &ContextRequest::modern(debug))
        })
        .or_else(|| {
            log::warn!("failed to create a 3.0 context; requesting 1.0");
            attempt(&mut trap, |d| {
                d.create_versioned_context(config, window, &ContextRequest::legacy(debug))
            })
        })
        .or_else(|| {
            log::warn!("versioned context creation failed; using basic context");
            trap.display().create_basic_context(config, window)
        })
    };

    match context {
        Some(ctx) if !trap.take_error() => Ok(ctx),
        Some(ctx) => {
            trap.display().destroy_context(ctx);
            Err(Error::ContextCreation("context creation raised a protocol error".into()))
        }
        None => Err(Error::ContextCreation("every creation path failed".into())),
    }
}

/// Runs one creation attempt and discards its result if the trap fired.
fn attempt<D: Display>(
    trap: &mut ErrorTrap<'_, D>,
    create: impl FnOnce(&mut D) -> Option<ContextHandle>,
) -> Option<ContextHandle> {
    let context = create(trap.display());
    if !trap.take_error() {
        return context;
    }
    if let Some(ctx) = context {
        trap.display().destroy_context(ctx);
    }
    None
}
