//! Core infrastructure
//!
//! Configuration, startup errors and the logging macros shared by every
//! other module.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{AppConfig, ConfigLoadError};
pub use error::StartupError;
