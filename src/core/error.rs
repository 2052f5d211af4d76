//! Startup errors
//!
//! Anything that stops the binary before telemetry starts flowing. Each
//! variant is logged once and the process exits with status 1.

use super::config::ConfigLoadError;
use crate::communication::sink::TelemetryError;
use crate::devices::traits::{ConfigError, ImuError};
use crate::subsystems::ahrs::PipelineError;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    ConfigFile(#[from] ConfigLoadError),
    #[error("invalid sensor configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("IMU initialization failed: {0}")]
    Imu(#[from] ImuError),
    #[error("telemetry setup failed: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("{0}")]
    Pipeline(#[from] PipelineError),
    #[error("cannot start command input: {0}")]
    Commands(#[from] std::io::Error),
    #[error("logger already installed")]
    Logger(#[from] log::SetLoggerError),
}
