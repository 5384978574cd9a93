//! Logging utilities.
//!
//! Centralizes logger initialization for hosts embedding the renderer.
//! Only the standard `log` facade is exposed to the rest of the crate.

mod init;

pub use init::{init_logging, LoggingConfig};
