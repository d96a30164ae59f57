//! In-memory display substrate.
//!
//! Every display opened from one `HeadlessPlatform` talks to the same
//! simulated server. Capabilities are switched on and off through
//! [`HeadlessConfig`], native events are injected with
//! [`HeadlessPlatform::push_event`], and every state-changing request is
//! appended to a journal that can be inspected afterwards.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;

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
};

const ROOT: NativeWindow = NativeWindow(1);

/// Capability switches for the simulated server.
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    /// Reported protocol version; `None` makes the version query fail.
    pub version: Option<ProtocolVersion>,

    /// Refuse every display connection.
    pub refuse_connections: bool,

    /// Highest multisample level any configuration offers.
    pub max_samples: u32,

    /// Number of configurations returned for a satisfiable request.
    pub config_count: u32,

    pub visuals: bool,

    pub window_creation: bool,

    /// Advertise the versioned context-creation path.
    pub versioned_contexts: bool,

    /// Versions whose versioned creation raises a protocol error.
    pub failing_versions: Vec<(u32, u32)>,

    pub basic_contexts: bool,

    pub cursor_allocation: bool,

    /// Explicit keycode/level → keysym entries. Unlisted codes map to
    /// themselves at every level.
    pub keymap: HashMap<(u32, u32), Keysym>,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            version: Some(ProtocolVersion::new(1, 4)),
            refuse_connections: false,
            max_samples: 8,
            config_count: 2,
            visuals: true,
            window_creation: true,
            versioned_contexts: true,
            failing_versions: Vec::new(),
            basic_contexts: true,
            cursor_allocation: true,
            keymap: HashMap::new(),
        }
    }
}

/// Journal entry for a request that reached the server.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    OpenDisplay,
    CloseDisplay,
    CreateColormap(ColormapId),
    FreeColormap(ColormapId),
    CreateWindow(NativeWindow),
    StoreName(NativeWindow, String),
    MapWindow(NativeWindow),
    DestroyWindow(NativeWindow),
    VersionedContext(ContextRequest),
    BasicContext,
    DestroyContext(ContextHandle),
    MakeCurrent(Option<(NativeWindow, ContextHandle)>),
    SetErrorHandler { installed: bool },
    SwapBuffers(NativeWindow),
    SwapInterval(NativeWindow, u32),
    Viewport { x: i32, y: i32, width: u32, height: u32 },
    WarpPointer(NativeWindow, i32, i32),
    DefineCursor(NativeWindow, Option<CursorId>),
}

#[derive(Debug)]
struct ServerWindow {
    display: u64,
    name: String,
    mapped: bool,
    origin: (i32, i32),
    cursor: Option<CursorId>,
    pointer: Option<(i32, i32)>,
}

#[derive(Debug)]
struct Server {
    config: HeadlessConfig,
    next_id: u64,
    focused: Option<NativeWindow>,
    windows: HashMap<NativeWindow, ServerWindow>,
    contexts: HashSet<ContextHandle>,
    queues: HashMap<u64, VecDeque<NativeEvent>>,
    atoms: HashMap<String, Atom>,
    open_displays: usize,
    journal: Vec<Call>,
}

impl Server {
    fn new(config: HeadlessConfig) -> Self {
        Self {
            config,
            next_id: 0x100,
            focused: None,
            windows: HashMap::new(),
            contexts: HashSet::new(),
            queues: HashMap::new(),
            atoms: HashMap::new(),
            open_displays: 0,
            journal: Vec::new(),
        }
    }

    fn alloc(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Scriptable substrate backed by a shared in-memory server.
#[derive(Debug, Clone)]
pub struct HeadlessPlatform {
    server: Rc<RefCell<Server>>,
}

impl HeadlessPlatform {
    pub fn new(config: HeadlessConfig) -> Self {
        Self {
            server: Rc::new(RefCell::new(Server::new(config))),
        }
    }

    /// Replaces the capability switches for subsequent requests.
    pub fn reconfigure(&self, f: impl FnOnce(&mut HeadlessConfig)) {
        f(&mut self.server.borrow_mut().config);
    }

    /// Queues a native event on the display owning `window`.
    ///
    /// Events for unknown windows are dropped, like events for destroyed
    /// windows on a real server.
    pub fn push_event(&self, window: NativeWindow, event: NativeEvent) {
        let mut server = self.server.borrow_mut();
        let Some(display) = server.windows.get(&window).map(|w| w.display) else {
            log::debug!("dropping event for unknown window {window}");
            return;
        };
        server.queues.entry(display).or_default().push_back(event);
    }

    pub fn set_focus(&self, window: Option<NativeWindow>) {
        self.server.borrow_mut().focused = window;
    }

    /// Sets the origin reported for `window` relative to its parent.
    pub fn set_origin(&self, window: NativeWindow, x: i32, y: i32) {
        if let Some(w) = self.server.borrow_mut().windows.get_mut(&window) {
            w.origin = (x, y);
        }
    }

    pub fn journal(&self) -> Vec<Call> {
        self.server.borrow().journal.clone()
    }

    /// Number of journal entries matching `pred`.
    pub fn count_calls(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.server.borrow().journal.iter().filter(|c| pred(c)).count()
    }

    pub fn window_exists(&self, window: NativeWindow) -> bool {
        self.server.borrow().windows.contains_key(&window)
    }

    pub fn window_name(&self, window: NativeWindow) -> Option<String> {
        self.server.borrow().windows.get(&window).map(|w| w.name.clone())
    }

    pub fn is_mapped(&self, window: NativeWindow) -> bool {
        self.server
            .borrow()
            .windows
            .get(&window)
            .is_some_and(|w| w.mapped)
    }

    pub fn cursor(&self, window: NativeWindow) -> Option<CursorId> {
        self.server.borrow().windows.get(&window).and_then(|w| w.cursor)
    }

    pub fn pointer(&self, window: NativeWindow) -> Option<(i32, i32)> {
        self.server.borrow().windows.get(&window).and_then(|w| w.pointer)
    }

    pub fn live_windows(&self) -> usize {
        self.server.borrow().windows.len()
    }

    pub fn live_contexts(&self) -> usize {
        self.server.borrow().contexts.len()
    }

    pub fn open_displays(&self) -> usize {
        self.server.borrow().open_displays
    }
}

impl Default for HeadlessPlatform {
    fn default() -> Self {
        Self::new(HeadlessConfig::default())
    }
}

impl Platform for HeadlessPlatform {
    type Display = HeadlessDisplay;

    fn open_display(&self) -> Result<HeadlessDisplay> {
        let mut server = self.server.borrow_mut();
        if server.config.refuse_connections {
            return Err(Error::PlatformInit("connection refused".into()));
        }

        let id = server.alloc();
        server.open_displays += 1;
        server.journal.push(Call::OpenDisplay);

        Ok(HeadlessDisplay {
            id,
            server: Rc::clone(&self.server),
            handler: None,
            open: true,
        })
    }

    fn focused_window(&self) -> Option<NativeWindow> {
        self.server.borrow().focused
    }
}

/// A connection to the simulated server.
#[derive(Debug)]
pub struct HeadlessDisplay {
    id: u64,
    server: Rc<RefCell<Server>>,
    handler: Option<ErrorFlag>,
    open: bool,
}

impl HeadlessDisplay {
    fn record(&self, call: Call) {
        self.server.borrow_mut().journal.push(call);
    }

    /// Simulates a protocol error reaching the installed handler.
    fn protocol_error(&self, what: &str) {
        match &self.handler {
            Some(flag) => flag.raise(),
            None => log::error!("unhandled protocol error: {what}"),
        }
    }

    fn new_context(&self) -> ContextHandle {
        let mut server = self.server.borrow_mut();
        let ctx = ContextHandle(server.alloc());
        server.contexts.insert(ctx);
        ctx
    }
}

impl Display for HeadlessDisplay {
    fn query_version(&mut self) -> Option<ProtocolVersion> {
        self.server.borrow().config.version
    }

    fn root_window(&self) -> NativeWindow {
        ROOT
    }

    fn choose_configs(&mut self, attrs: &SurfaceAttributes) -> Vec<ConfigId> {
        let server = self.server.borrow();
        let cfg = &server.config;
        let satisfiable = attrs.samples <= cfg.max_samples
            && attrs.depth_bits <= 24
            && attrs.stencil_bits <= 8;

        if !satisfiable {
            return Vec::new();
        }
        (0..cfg.config_count).map(ConfigId).collect()
    }

    fn visual_from_config(&mut self, config: ConfigId) -> Option<VisualId> {
        self.server
            .borrow()
            .config
            .visuals
            .then_some(VisualId(0x20 + config.0))
    }

    fn create_colormap(&mut self, _parent: NativeWindow, _visual: VisualId) -> ColormapId {
        let id = ColormapId(self.server.borrow_mut().alloc() as u32);
        self.record(Call::CreateColormap(id));
        id
    }

    fn free_colormap(&mut self, colormap: ColormapId) {
        self.record(Call::FreeColormap(colormap));
    }

    fn create_window(&mut self, _spec: &WindowSpec) -> Option<NativeWindow> {
        let mut server = self.server.borrow_mut();
        if !server.config.window_creation {
            return None;
        }

        let window = NativeWindow(server.alloc());
        server.windows.insert(
            window,
            ServerWindow {
                display: self.id,
                name: String::new(),
                mapped: false,
                origin: (0, 0),
                cursor: None,
                pointer: None,
            },
        );
        server.journal.push(Call::CreateWindow(window));
        Some(window)
    }

    fn store_name(&mut self, window: NativeWindow, name: &str) {
        if let Some(w) = self.server.borrow_mut().windows.get_mut(&window) {
            w.name = name.to_string();
        }
        self.record(Call::StoreName(window, name.to_string()));
    }

    fn map_window(&mut self, window: NativeWindow) {
        if let Some(w) = self.server.borrow_mut().windows.get_mut(&window) {
            w.mapped = true;
        }
        self.record(Call::MapWindow(window));
    }

    fn destroy_window(&mut self, window: NativeWindow) {
        let mut server = self.server.borrow_mut();
        server.windows.remove(&window);
        if server.focused == Some(window) {
            server.focused = None;
        }
        server.journal.push(Call::DestroyWindow(window));
    }

    fn supports_versioned_contexts(&self) -> bool {
        self.server.borrow().config.versioned_contexts
    }

    fn create_versioned_context(
        &mut self,
        _config: ConfigId,
        _window: NativeWindow,
        request: &ContextRequest,
    ) -> Option<ContextHandle> {
        self.record(Call::VersionedContext(*request));

        let fails = self
            .server
            .borrow()
            .config
            .failing_versions
            .contains(&(request.major, request.minor));

        if fails {
            self.protocol_error("versioned context creation");
            return None;
        }
        Some(self.new_context())
    }

    fn create_basic_context(
        &mut self,
        _config: ConfigId,
        _window: NativeWindow,
    ) -> Option<ContextHandle> {
        self.record(Call::BasicContext);
        if !self.server.borrow().config.basic_contexts {
            return None;
        }
        Some(self.new_context())
    }

    fn destroy_context(&mut self, context: ContextHandle) {
        self.server.borrow_mut().contexts.remove(&context);
        self.record(Call::DestroyContext(context));
    }

    fn make_current(&mut self, target: Option<(NativeWindow, ContextHandle)>) -> bool {
        self.record(Call::MakeCurrent(target));
        match target {
            Some((_, ctx)) => self.server.borrow().contexts.contains(&ctx),
            None => true,
        }
    }

    fn set_error_handler(&mut self, handler: Option<ErrorFlag>) -> Option<ErrorFlag> {
        self.record(Call::SetErrorHandler {
            installed: handler.is_some(),
        });
        std::mem::replace(&mut self.handler, handler)
    }

    fn sync(&mut self) {}

    fn intern_atom(&mut self, name: &str) -> Atom {
        let mut server = self.server.borrow_mut();
        if let Some(atom) = server.atoms.get(name) {
            return *atom;
        }
        let atom = Atom(server.alloc() as u32);
        server.atoms.insert(name.to_string(), atom);
        atom
    }

    fn set_wm_protocols(&mut self, _window: NativeWindow, _protocols: &[Atom]) {}

    fn pending(&mut self) -> usize {
        if !self.open {
            return 0;
        }
        self.server
            .borrow()
            .queues
            .get(&self.id)
            .map_or(0, VecDeque::len)
    }

    fn next_event(&mut self) -> Option<NativeEvent> {
        if !self.open {
            return None;
        }
        self.server
            .borrow_mut()
            .queues
            .get_mut(&self.id)
            .and_then(VecDeque::pop_front)
    }

    fn translate_origin(&mut self, window: NativeWindow, _relative_to: NativeWindow) -> (i32, i32) {
        self.server
            .borrow()
            .windows
            .get(&window)
            .map_or((0, 0), |w| w.origin)
    }

    fn keycode_to_keysym(&mut self, keycode: u32, level: u32) -> Keysym {
        self.server
            .borrow()
            .config
            .keymap
            .get(&(keycode, level))
            .copied()
            .unwrap_or(keycode)
    }

    fn warp_pointer(&mut self, window: NativeWindow, x: i32, y: i32) {
        if let Some(w) = self.server.borrow_mut().windows.get_mut(&window) {
            w.pointer = Some((x, y));
        }
        self.record(Call::WarpPointer(window, x, y));
    }

    fn create_blank_cursor(&mut self, _window: NativeWindow) -> Option<CursorId> {
        let mut server = self.server.borrow_mut();
        if !server.config.cursor_allocation {
            return None;
        }
        Some(CursorId(server.alloc() as u32))
    }

    fn free_cursor(&mut self, _cursor: CursorId) {}

    fn define_cursor(&mut self, window: NativeWindow, cursor: Option<CursorId>) {
        if let Some(w) = self.server.borrow_mut().windows.get_mut(&window) {
            w.cursor = cursor;
        }
        self.record(Call::DefineCursor(window, cursor));
    }

    fn swap_buffers(&mut self, window: NativeWindow) {
        self.record(Call::SwapBuffers(window));
    }

    fn set_swap_interval(&mut self, window: NativeWindow, interval: u32) {
        self.record(Call::SwapInterval(window, interval));
    }

    fn set_viewport(&mut self, x: i32, y: i32, width: u32, height: u32) {
        self.record(Call::Viewport { x, y, width, height });
    }

    fn close(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;

        let mut server = self.server.borrow_mut();
        let id = self.id;
        server.windows.retain(|_, w| w.display != id);
        server.queues.remove(&id);
        server.open_displays -= 1;
        server.journal.push(Call::CloseDisplay);
    }
}

impl Drop for HeadlessDisplay {
    fn drop(&mut self) {
        self.close();
    }
}
