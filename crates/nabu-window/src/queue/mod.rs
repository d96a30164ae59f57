//! Bounded event staging.
//!
//! Input events are staged in a fixed-capacity ring so a window that is not
//! drained every frame costs bounded memory instead of growing without limit.

mod circular;

pub use circular::CircularEventQueue;
