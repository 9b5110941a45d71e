//! Logging utilities.
//!
//! This module centralizes logger initialization. Library code only uses the
//! `log` facade; the backend is `env_logger` natively and `console_log` on
//! `wasm32`.

mod init;

pub use init::{init_logging, LoggingConfig};
