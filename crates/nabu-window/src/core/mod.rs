//! Managed-window contracts.
//!
//! Defines the application callbacks ([`WindowHandler`]), the per-window
//! option bag, and [`ManagedWindow`], the unit a
//! [`crate::manager::WindowManager`] owns.

mod handler;
mod managed;
pub mod options;

pub use handler::{NoopHandler, WindowHandler};
pub use managed::ManagedWindow;
pub use options::Options;
