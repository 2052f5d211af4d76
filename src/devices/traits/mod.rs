//! Device traits
//!
//! Hardware-independent trait definitions for device drivers, so the
//! attitude subsystem can be tested against scripted sensors.

pub mod imu;

pub use imu::{ConfigError, ImuError, ImuSensor};
