//! Logging utilities.
//!
//! Centralizes logger initialization. Everything else in the workspace logs
//! through the standard `log` facade; the backend is logcat on device and
//! `env_logger` on the host.

mod init;

#[cfg(test)]
pub(crate) mod capture;

pub use init::{LoggingConfig, init_logging};
