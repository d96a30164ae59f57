use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, StartCause, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{ModifiersState, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::input::keysym;
use crate::platform::{Atom, NativeEvent, NativeWindow};

use super::keymap;

struct Route {
    native: NativeWindow,
    display: u64,
}

/// Routes winit events to the display owning each window.
///
/// Windows register here when created and deregister when destroyed.
/// Window creation requests are queued and fulfilled inside the next pump,
/// where an `ActiveEventLoop` is available.
#[derive(Default)]
pub(super) struct Router {
    routes: HashMap<WindowId, Route>,
    windows: HashMap<NativeWindow, Arc<Window>>,
    queues: HashMap<u64, VecDeque<NativeEvent>>,
    focused: Option<NativeWindow>,
    modifiers: ModifiersState,

    /// Last size reported as an expose, per window.
    exposed: HashMap<NativeWindow, PhysicalSize<u32>>,

    atoms: HashMap<String, Atom>,
    close_protocol: HashMap<NativeWindow, Atom>,

    requests: VecDeque<WindowAttributes>,
    created: VecDeque<Result<Window, String>>,

    next_id: u64,
}

impl Router {
    pub fn alloc(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn request_window(&mut self, attrs: WindowAttributes) {
        self.requests.push_back(attrs);
    }

    pub fn take_created(&mut self) -> Option<Result<Window, String>> {
        self.created.pop_front()
    }

    pub fn register(&mut self, native: NativeWindow, display: u64, window: Arc<Window>) {
        self.routes.insert(window.id(), Route { native, display });
        self.windows.insert(native, window);
    }

    pub fn deregister(&mut self, native: NativeWindow) {
        if let Some(window) = self.windows.remove(&native) {
            self.routes.remove(&window.id());
        }
        self.close_protocol.remove(&native);
        self.exposed.remove(&native);
        if self.focused == Some(native) {
            self.focused = None;
        }
    }

    pub fn window(&self, native: NativeWindow) -> Option<&Arc<Window>> {
        self.windows.get(&native)
    }

    pub fn focused(&self) -> Option<NativeWindow> {
        self.focused
    }

    pub fn intern_atom(&mut self, name: &str) -> Atom {
        if let Some(atom) = self.atoms.get(name) {
            return *atom;
        }
        let atom = Atom(self.atoms.len() as u32 + 1);
        self.atoms.insert(name.to_string(), atom);
        atom
    }

    pub fn set_close_protocol(&mut self, native: NativeWindow, atom: Atom) {
        self.close_protocol.insert(native, atom);
    }

    pub fn pending(&self, display: u64) -> usize {
        self.queues.get(&display).map_or(0, VecDeque::len)
    }

    pub fn next_event(&mut self, display: u64) -> Option<NativeEvent> {
        self.queues.get_mut(&display)?.pop_front()
    }

    pub fn drop_display(&mut self, display: u64, windows: &HashSet<NativeWindow>) {
        for native in windows {
            self.deregister(*native);
        }
        self.queues.remove(&display);
    }

    fn fulfil(&mut self, event_loop: &ActiveEventLoop) {
        while let Some(attrs) = self.requests.pop_front() {
            let result = event_loop.create_window(attrs).map_err(|e| e.to_string());
            self.created.push_back(result);
        }
    }

    fn translate(&mut self, native: NativeWindow, event: &WindowEvent) -> Option<NativeEvent> {
        match event {
            WindowEvent::Resized(size) => {
                self.exposed.insert(native, *size);
                Some(expose(*size))
            }

            // Redraws fire on every present; only a new size counts as exposure.
            WindowEvent::RedrawRequested => {
                let size = self.windows.get(&native)?.inner_size();
                self.expose_if_changed(native, size)
            }

            WindowEvent::ModifiersChanged(m) => {
                self.modifiers = m.state();
                None
            }

            WindowEvent::KeyboardInput { event, .. } => self.key(event.physical_key, event.state),

            WindowEvent::MouseInput { state, button, .. } => {
                let button = map_mouse_button(*button);
                Some(match state {
                    ElementState::Pressed => NativeEvent::ButtonPress { button },
                    ElementState::Released => NativeEvent::ButtonRelease { button },
                })
            }

            WindowEvent::CursorMoved { position, .. } => Some(NativeEvent::Motion {
                x: position.x as f32,
                y: position.y as f32,
            }),

            WindowEvent::MouseWheel { delta, .. } => Some(wheel(delta)),

            WindowEvent::Focused(true) => {
                self.focused = Some(native);
                Some(NativeEvent::FocusIn)
            }

            WindowEvent::Focused(false) => {
                if self.focused == Some(native) {
                    self.focused = None;
                }
                Some(NativeEvent::FocusOut)
            }

            WindowEvent::CloseRequested => match self.close_protocol.get(&native) {
                Some(atom) => Some(NativeEvent::ClientMessage { atom: *atom }),
                None => {
                    log::debug!("close requested for {native} without close protocol");
                    None
                }
            },

            _ => None,
        }
    }

    fn expose_if_changed(
        &mut self,
        native: NativeWindow,
        size: PhysicalSize<u32>,
    ) -> Option<NativeEvent> {
        if self.exposed.get(&native) == Some(&size) {
            return None;
        }
        self.exposed.insert(native, size);
        Some(expose(size))
    }

    fn key(&self, physical: PhysicalKey, state: ElementState) -> Option<NativeEvent> {
        let sym = keymap::keysym_for(physical);
        if sym == keysym::NO_SYMBOL {
            return None;
        }
        let shift = self.modifiers.shift_key();
        Some(match state {
            ElementState::Pressed => NativeEvent::KeyPress { keycode: sym, shift },
            ElementState::Released => NativeEvent::KeyRelease { keycode: sym, shift },
        })
    }
}

impl ApplicationHandler for Router {
    fn new_events(&mut self, event_loop: &ActiveEventLoop, _cause: StartCause) {
        self.fulfil(event_loop);
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        self.fulfil(event_loop);
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        let Some((native, display)) = self.routes.get(&id).map(|r| (r.native, r.display)) else {
            return;
        };

        if let Some(ev) = self.translate(native, &event) {
            self.queues.entry(display).or_default().push_back(ev);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.fulfil(event_loop);
    }
}

fn expose(size: PhysicalSize<u32>) -> NativeEvent {
    NativeEvent::Expose {
        width: size.width,
        height: size.height,
    }
}

fn wheel(delta: &MouseScrollDelta) -> NativeEvent {
    let delta = match delta {
        MouseScrollDelta::LineDelta(_, y) => *y,
        MouseScrollDelta::PixelDelta(p) => p.y as f32,
    };
    NativeEvent::Wheel { delta }
}

fn map_mouse_button(b: MouseButton) -> u32 {
    match b {
        MouseButton::Left => 1,
        MouseButton::Middle => 2,
        MouseButton::Right => 3,
        MouseButton::Back => 8,
        MouseButton::Forward => 9,
        MouseButton::Other(v) => u32::from(v),
    }
}

#[cfg(test)]
mod tests {
    use winit::dpi::PhysicalPosition;
    use winit::event::Modifiers;
    use winit::keyboard::KeyCode;

    use super::*;

    const A: NativeWindow = NativeWindow(1);
    const B: NativeWindow = NativeWindow(2);

    #[test]
    fn mouse_buttons_use_native_numbering() {
        assert_eq!(map_mouse_button(MouseButton::Left), 1);
        assert_eq!(map_mouse_button(MouseButton::Middle), 2);
        assert_eq!(map_mouse_button(MouseButton::Right), 3);
    }

    #[test]
    fn atoms_are_interned_once() {
        let mut router = Router::default();
        let a = router.intern_atom("WM_DELETE_WINDOW");
        let b = router.intern_atom("OTHER");
        assert_ne!(a, b);
        assert_eq!(router.intern_atom("WM_DELETE_WINDOW"), a);
    }

    #[test]
    fn queues_are_per_display() {
        let mut router = Router::default();
        router.queues.entry(1).or_default().push_back(NativeEvent::FocusIn);
        assert_eq!(router.pending(1), 1);
        assert_eq!(router.pending(2), 0);
        assert_eq!(router.next_event(1), Some(NativeEvent::FocusIn));
        assert_eq!(router.next_event(2), None);
    }

    // ── translation ───────────────────────────────────────────────────────

    #[test]
    fn focus_out_elsewhere_keeps_focused_window() {
        let mut router = Router::default();
        assert_eq!(router.translate(A, &WindowEvent::Focused(true)), Some(NativeEvent::FocusIn));
        assert_eq!(router.translate(B, &WindowEvent::Focused(false)), Some(NativeEvent::FocusOut));
        assert_eq!(router.focused(), Some(A));

        router.translate(A, &WindowEvent::Focused(false));
        assert_eq!(router.focused(), None);
    }

    #[test]
    fn close_request_needs_close_protocol() {
        let mut router = Router::default();
        assert_eq!(router.translate(A, &WindowEvent::CloseRequested), None);

        let atom = router.intern_atom("WM_DELETE_WINDOW");
        router.set_close_protocol(A, atom);
        assert_eq!(
            router.translate(A, &WindowEvent::CloseRequested),
            Some(NativeEvent::ClientMessage { atom })
        );
        assert_eq!(router.translate(B, &WindowEvent::CloseRequested), None);
    }

    #[test]
    fn held_shift_marks_key_events() {
        let mut router = Router::default();
        let key = PhysicalKey::Code(KeyCode::KeyA);
        assert_eq!(
            router.key(key, ElementState::Pressed),
            Some(NativeEvent::KeyPress { keycode: 0x61, shift: false })
        );

        let shifted = WindowEvent::ModifiersChanged(Modifiers::from(ModifiersState::SHIFT));
        assert_eq!(router.translate(A, &shifted), None);
        assert_eq!(
            router.key(key, ElementState::Released),
            Some(NativeEvent::KeyRelease { keycode: 0x61, shift: true })
        );
    }

    #[test]
    fn unmapped_physical_keys_are_dropped() {
        let router = Router::default();
        assert_eq!(router.key(PhysicalKey::Code(KeyCode::Fn), ElementState::Pressed), None);
    }

    #[test]
    fn line_and_pixel_scrolls_become_wheel() {
        assert_eq!(
            wheel(&MouseScrollDelta::LineDelta(0.0, 1.0)),
            NativeEvent::Wheel { delta: 1.0 }
        );
        assert_eq!(
            wheel(&MouseScrollDelta::PixelDelta(PhysicalPosition::new(3.0, -2.0))),
            NativeEvent::Wheel { delta: -2.0 }
        );
    }

    #[test]
    fn redraw_at_same_size_is_not_an_expose() {
        let mut router = Router::default();
        let size = PhysicalSize::new(640, 480);
        assert_eq!(
            router.translate(A, &WindowEvent::Resized(size)),
            Some(NativeEvent::Expose { width: 640, height: 480 })
        );

        assert_eq!(router.expose_if_changed(A, size), None);
        assert_eq!(router.expose_if_changed(A, size), None);
        assert_eq!(
            router.expose_if_changed(A, PhysicalSize::new(800, 600)),
            Some(NativeEvent::Expose { width: 800, height: 600 })
        );
    }

    #[test]
    fn first_redraw_is_an_expose() {
        let mut router = Router::default();
        let size = PhysicalSize::new(4, 4);
        assert_eq!(
            router.expose_if_changed(B, size),
            Some(NativeEvent::Expose { width: 4, height: 4 })
        );

        router.deregister(B);
        assert!(router.expose_if_changed(B, size).is_some());
    }
}
