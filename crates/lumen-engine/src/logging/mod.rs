//! Logger initialization.
//!
//! Library code only talks to the `log` facade; binaries and tests opt into
//! `env_logger` through [`init_logging`].

mod init;

pub use init::{init_logging, LoggingConfig, LOG_ENV_VAR};
