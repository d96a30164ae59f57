use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::Display;

/// Error flag raised by a display's error handler.
///
/// Clones share the flag. The flag is atomic because some substrates report
/// errors from driver callbacks.
#[derive(Debug, Clone, Default)]
pub struct ErrorFlag(Arc<AtomicBool>);

impl ErrorFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Reads and clears the flag.
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::SeqCst)
    }

    /// True when both values share the same underlying flag.
    pub fn same_as(&self, other: &ErrorFlag) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Scoped error handler.
///
/// Installs a fresh [`ErrorFlag`] on the display and restores the previous
/// handler when dropped, on every exit path.
pub struct ErrorTrap<'d, D: Display> {
    display: &'d mut D,
    flag: ErrorFlag,
    previous: Option<Option<ErrorFlag>>,
}

impl<'d, D: Display> ErrorTrap<'d, D> {
    pub fn install(display: &'d mut D) -> Self {
        let flag = ErrorFlag::new();
        let previous = display.set_error_handler(Some(flag.clone()));

        Self {
            display,
            flag,
            previous: Some(previous),
        }
    }

    pub fn display(&mut self) -> &mut D {
        &mut *self.display
    }

    /// Syncs the display, then reads and clears the flag.
    pub fn take_error(&mut self) -> bool {
        self.display.sync();
        self.flag.take()
    }
}

impl<D: Display> Drop for ErrorTrap<'_, D> {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            self.display.set_error_handler(previous);
        }
    }
}
