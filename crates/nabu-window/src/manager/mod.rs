//! Keyed multi-window manager.
//!
//! Owns a set of [`ManagedWindow`]s, routes input to whichever one the
//! platform reports as focused, and draws all of them once per cycle.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::core::{ManagedWindow, Options, WindowHandler};
use crate::error::{Error, Result};
use crate::platform::Platform;

pub struct WindowManager<K, P, H>
where
    K: Eq + Hash + Clone + Debug,
    P: Platform,
    H: WindowHandler<P>,
{
    platform: P,
    windows: HashMap<K, ManagedWindow<P, H>>,
}

impl<K, P, H> WindowManager<K, P, H>
where
    K: Eq + Hash + Clone + Debug,
    P: Platform,
    H: WindowHandler<P>,
{
    pub fn new(platform: P) -> Self {
        Self {
            platform,
            windows: HashMap::new(),
        }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Takes ownership of `window` under `key`.
    ///
    /// Fails with `InvalidWindow` when the window is not active or the key is
    /// already in use; the rejected window is torn down.
    pub fn add_window(&mut self, key: K, window: ManagedWindow<P, H>) -> Result<()> {
        if !window.window().is_active() {
            return Err(Error::InvalidWindow(format!("window {key:?} is not active")));
        }
        if self.windows.contains_key(&key) {
            return Err(Error::InvalidWindow(format!("key {key:?} already registered")));
        }

        log::debug!("registered window {key:?}");
        self.windows.insert(key, window);
        Ok(())
    }

    /// Creates a window on the manager's platform and registers it.
    pub fn create_window(
        &mut self,
        key: K,
        name: &str,
        options: Options,
        handler: H,
    ) -> Result<()> {
        if self.windows.contains_key(&key) {
            return Err(Error::InvalidWindow(format!("key {key:?} already registered")));
        }
        let window = ManagedWindow::create(&self.platform, name, options, handler)?;
        self.add_window(key, window)
    }

    pub fn has_window(&self, key: &K) -> bool {
        self.windows.contains_key(key)
    }

    pub fn window(&self, key: &K) -> Result<&ManagedWindow<P, H>> {
        self.windows
            .get(key)
            .ok_or_else(|| Error::NotFound(format!("{key:?}")))
    }

    pub fn window_mut(&mut self, key: &K) -> Result<&mut ManagedWindow<P, H>> {
        self.windows
            .get_mut(key)
            .ok_or_else(|| Error::NotFound(format!("{key:?}")))
    }

    /// Tears down and drops the window under `key`.
    pub fn remove_window(&mut self, key: &K) -> Result<()> {
        let mut window = self
            .windows
            .remove(key)
            .ok_or_else(|| Error::NotFound(format!("{key:?}")))?;
        window.teardown();
        log::debug!("removed window {key:?}");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.windows.keys()
    }

    /// Key of the window the platform currently reports as focused.
    pub fn focused_key(&self) -> Option<K> {
        let handle = self.platform.focused_window()?;
        self.windows
            .iter()
            .find(|(_, w)| w.window().is_active() && w.window().native_window() == handle)
            .map(|(k, _)| k.clone())
    }

    /// Runs one frame: prune, route input to the focused window, draw all.
    ///
    /// A focused window whose drain reads nothing is retired on the next
    /// cycle. When this returns, no remaining window is closed.
    pub fn run_cycle(&mut self) {
        self.prune(|w| w.is_closed() || w.is_retiring());

        if let Some(key) = self.focused_key() {
            if let Some(window) = self.windows.get_mut(&key) {
                if !window.pump() {
                    log::debug!("window {key:?} had no input; retiring");
                }
            }
        }

        for window in self.windows.values_mut() {
            if window.is_closed() {
                continue;
            }
            window.post_draw();
            window.draw();
        }

        self.prune(ManagedWindow::is_closed);
    }

    fn prune(&mut self, doomed: impl Fn(&ManagedWindow<P, H>) -> bool) {
        let keys: Vec<K> = self
            .windows
            .iter()
            .filter(|&(_, w)| doomed(w))
            .map(|(k, _)| k.clone())
            .collect();

        for key in keys {
            if let Some(mut window) = self.windows.remove(&key) {
                window.teardown();
                log::debug!("pruned window {key:?}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::platform::headless::{Call, HeadlessPlatform};
    use crate::platform::{Display, NativeEvent, NativeWindow, CLOSE_PROTOCOL_ATOM};
    use crate::window::SurfaceWindow;

    type Log = Rc<RefCell<Vec<String>>>;

    struct Recorder {
        name: &'static str,
        log: Log,
    }

    impl Recorder {
        fn push(&self, what: &str) {
            self.log.borrow_mut().push(format!("{}:{what}", self.name));
        }
    }

    impl WindowHandler<HeadlessPlatform> for Recorder {
        fn event(&mut self, _: &mut SurfaceWindow<HeadlessPlatform>) {
            self.push("event");
        }

        fn post_draw(&mut self, _: &mut SurfaceWindow<HeadlessPlatform>) {
            self.push("post_draw");
        }

        fn draw(&mut self, _: &mut SurfaceWindow<HeadlessPlatform>) {
            self.push("draw");
        }

        fn destroy(&mut self, _: &mut SurfaceWindow<HeadlessPlatform>) {
            self.push("destroy");
        }
    }

    type Manager = WindowManager<&'static str, HeadlessPlatform, Recorder>;

    fn setup(names: &[&'static str]) -> (Manager, HeadlessPlatform, Log) {
        let platform = HeadlessPlatform::default();
        let log = Log::default();
        let mut manager = Manager::new(platform.clone());

        for &name in names {
            let handler = Recorder { name, log: Rc::clone(&log) };
            manager
                .create_window(name, name, Options::with_size(64, 64), handler)
                .unwrap();
        }
        (manager, platform, log)
    }

    fn handle(manager: &Manager, key: &'static str) -> NativeWindow {
        manager.window(&key).unwrap().window().native_window()
    }

    fn count(log: &Log, entry: &str) -> usize {
        log.borrow().iter().filter(|e| *e == entry).count()
    }

    // ── registry ──────────────────────────────────────────────────────────

    #[test]
    fn duplicate_key_is_invalid_window() {
        let (mut manager, platform, log) = setup(&["a"]);
        let extra = ManagedWindow::create(
            &platform,
            "dup",
            Options::with_size(8, 8),
            Recorder { name: "dup", log: Rc::clone(&log) },
        )
        .unwrap();

        assert!(matches!(manager.add_window("a", extra), Err(Error::InvalidWindow(_))));
        assert_eq!(manager.len(), 1);
        assert_eq!(count(&log, "dup:destroy"), 1);
    }

    #[test]
    fn inactive_window_is_rejected() {
        let (mut manager, platform, log) = setup(&[]);
        let mut w = ManagedWindow::create(
            &platform,
            "closed",
            Options::with_size(8, 8),
            Recorder { name: "closed", log },
        )
        .unwrap();
        w.window_mut().close();

        assert!(matches!(manager.add_window("closed", w), Err(Error::InvalidWindow(_))));
        assert!(manager.is_empty());
    }

    #[test]
    fn unknown_key_is_not_found() {
        let (mut manager, _, _) = setup(&["a"]);
        assert!(manager.has_window(&"a"));
        assert!(matches!(manager.window(&"b"), Err(Error::NotFound(_))));
        assert!(matches!(manager.window_mut(&"b"), Err(Error::NotFound(_))));
        assert!(matches!(manager.remove_window(&"b"), Err(Error::NotFound(_))));
    }

    #[test]
    fn remove_window_tears_down() {
        let (mut manager, platform, log) = setup(&["a", "b"]);
        manager.remove_window(&"a").unwrap();

        assert_eq!(manager.keys().collect::<Vec<_>>(), vec![&"b"]);
        assert_eq!(count(&log, "a:destroy"), 1);
        assert_eq!(platform.live_windows(), 1);
    }

    // ── cycle ─────────────────────────────────────────────────────────────

    #[test]
    fn idle_focused_window_is_retired_next_cycle() {
        let (mut manager, platform, log) = setup(&["a"]);
        platform.set_focus(Some(handle(&manager, "a")));

        manager.run_cycle();
        assert!(manager.has_window(&"a"));
        assert_eq!(count(&log, "a:event"), 0);

        manager.run_cycle();
        assert!(!manager.has_window(&"a"));
        assert_eq!(count(&log, "a:destroy"), 1);
        assert_eq!(platform.count_calls(|c| matches!(c, Call::DestroyContext(_))), 1);
    }

    #[test]
    fn only_focused_window_is_pumped() {
        let (mut manager, platform, log) = setup(&["a", "b"]);
        let (a, b) = (handle(&manager, "a"), handle(&manager, "b"));
        platform.push_event(a, NativeEvent::Motion { x: 1.0, y: 2.0 });
        platform.push_event(b, NativeEvent::Motion { x: 3.0, y: 4.0 });
        platform.set_focus(Some(a));

        manager.run_cycle();

        assert_eq!(count(&log, "a:event"), 1);
        assert_eq!(count(&log, "b:event"), 0);
        assert_eq!(manager.focused_key(), Some("a"));

        let b_input = manager.window(&"b").unwrap().window().input();
        assert_eq!(b_input.events().count(), 0);
    }

    #[test]
    fn every_window_draws_each_cycle() {
        let (mut manager, platform, log) = setup(&["a", "b"]);
        let a = handle(&manager, "a");
        platform.push_event(a, NativeEvent::FocusIn);
        platform.set_focus(Some(a));

        manager.run_cycle();

        for name in ["a", "b"] {
            assert_eq!(count(&log, &format!("{name}:post_draw")), 1);
            assert_eq!(count(&log, &format!("{name}:draw")), 1);
        }
        let entries = log.borrow();
        let post = entries.iter().position(|e| e == "a:post_draw").unwrap();
        let draw = entries.iter().position(|e| e == "a:draw").unwrap();
        assert!(post < draw);
    }

    #[test]
    fn no_focus_pumps_nothing() {
        let (mut manager, platform, log) = setup(&["a", "b"]);
        platform.push_event(handle(&manager, "a"), NativeEvent::FocusIn);

        manager.run_cycle();
        manager.run_cycle();

        assert_eq!(manager.len(), 2);
        assert_eq!(count(&log, "a:event"), 0);
        assert_eq!(count(&log, "a:draw"), 2);
    }

    #[test]
    fn close_request_leaves_no_closed_window() {
        let (mut manager, platform, log) = setup(&["a", "b"]);
        let a = handle(&manager, "a");
        let atom = manager
            .window_mut(&"a")
            .unwrap()
            .window_mut()
            .display_mut()
            .unwrap()
            .intern_atom(CLOSE_PROTOCOL_ATOM);

        platform.push_event(a, NativeEvent::ClientMessage { atom });
        platform.set_focus(Some(a));
        manager.run_cycle();

        assert!(!manager.has_window(&"a"));
        assert!(manager.has_window(&"b"));
        assert_eq!(count(&log, "a:destroy"), 1);
        assert_eq!(count(&log, "a:draw"), 0);
        assert!(manager.keys().all(|k| !manager.window(k).unwrap().is_closed()));
    }

    #[test]
    fn boxed_handlers_mix_in_one_manager() {
        struct Quiet;
        impl WindowHandler<HeadlessPlatform> for Quiet {}

        let platform = HeadlessPlatform::default();
        let log = Log::default();
        type Boxed = Box<dyn WindowHandler<HeadlessPlatform>>;
        let mut manager: WindowManager<u32, HeadlessPlatform, Boxed> = WindowManager::new(platform);

        manager
            .create_window(1, "quiet", Options::with_size(8, 8), Box::new(Quiet))
            .unwrap();
        let loud = Recorder { name: "loud", log: Rc::clone(&log) };
        manager
            .create_window(2, "loud", Options::with_size(8, 8), Box::new(loud))
            .unwrap();

        manager.run_cycle();
        assert_eq!(count(&log, "loud:draw"), 1);

        drop(manager);
        assert_eq!(count(&log, "loud:destroy"), 1);
    }
}
