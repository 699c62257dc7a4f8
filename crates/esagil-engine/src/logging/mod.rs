//! Logging utilities.
//!
//! Everything in the workspace logs through the `log` facade. This module only
//! decides how the `env_logger` backend is installed.

mod init;

pub use init::{init_logging, LoggingConfig};
