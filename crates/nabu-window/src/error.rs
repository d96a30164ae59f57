//! Error taxonomy for window construction, input queries, and manager misuse.
//!
//! Construction failures are fatal for the window being built. Per-frame
//! conditions (no pending events, unfocused window, closed window) are not
//! errors and never show up here.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// No display/windowing connection, or the protocol is too old.
    #[error("platform initialization failed: {0}")]
    PlatformInit(String),

    /// No surface configuration (or visual) satisfies the requested attributes.
    #[error("no matching surface configuration: {0}")]
    Capability(String),

    /// Every rendering-context creation path was exhausted.
    #[error("failed to create a rendering context: {0}")]
    ContextCreation(String),

    /// The platform returned a null window handle.
    #[error("failed to create window: {0}")]
    WindowCreation(String),

    /// Width or height of zero.
    #[error("invalid window geometry {width}x{height}")]
    InvalidGeometry { width: u32, height: u32 },

    /// A platform allocation (e.g. the blank cursor pixmap) failed.
    #[error("out of platform resources: {0}")]
    ResourceExhaustion(String),

    /// A window that cannot be managed was registered.
    #[error("invalid window registered: {0}")]
    InvalidWindow(String),

    /// No window is registered under the requested key.
    #[error("no window registered under key {0}")]
    NotFound(String),

    /// The logical key name is not part of the keyboard mapping.
    #[error("unknown key name {0:?}")]
    UnknownKey(String),

    /// The keyboard symbol table is configured once per window.
    #[error("keyboard mapping is already configured")]
    KeysAlreadyMapped,
}
