//! Nabu windowing crate.
//!
//! Render-surface windows with context negotiation, per-window input state,
//! and a keyed multi-window manager, over pluggable display substrates.

pub mod core;
pub mod error;
pub mod input;
pub mod logging;
pub mod manager;
pub mod platform;
pub mod queue;
pub mod window;

pub use error::{Error, Result};
pub use manager::WindowManager;
pub use window::{SurfaceWindow, WindowConfig};
