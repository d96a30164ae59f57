//! Render-surface windows.
//!
//! A [`SurfaceWindow`] owns one native window, one rendering context, and the
//! input state fed by its event drain.

mod config;
mod events;
mod surface;

pub use config::WindowConfig;
pub use events::{classify, to_input_event, EventClass};
pub use surface::{ResizeFn, SurfaceCtx, SurfaceWindow};
