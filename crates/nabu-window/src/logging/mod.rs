//! Logger initialization.
//!
//! The crate logs through the `log` facade; binaries pick the backend. This
//! module wires up `env_logger` for the ones that want the default.

mod init;

pub use init::{init_logging, LoggingConfig};
