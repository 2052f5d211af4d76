//! IMU Sensor Trait and Error Types
//!
//! Device-independent interface consumed by the attitude subsystem.
//!
//! ## Usage
//!
//! ```ignore
//! use attitude_stream::devices::traits::ImuSensor;
//!
//! fn sample<I: ImuSensor>(imu: &mut I) -> Result<(), ImuError> {
//!     let (acc, gyro) = imu.read_sample()?;
//!     // acc in g, gyro in °/s
//!     Ok(())
//! }
//! ```

use crate::platform::PlatformError;
use nalgebra::Vector3;

/// Invalid sensor configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Accelerometer sensitivity level outside 0..=3
    #[error("accelerometer sensitivity level {0} out of range 0..=3")]
    AccelRange(u8),

    /// Gyroscope full-scale index outside 0..=3
    #[error("gyroscope full scale {0} out of range 0..=3")]
    GyroRange(u8),

    /// DLPF setting outside 0..=7
    #[error("low-pass filter setting {0} out of range 0..=7")]
    LowPassFilter(u8),

    /// Accelerometer sample rate divider wider than 12 bits
    #[error("sample rate divider {0} exceeds 4095")]
    SampleRateDivider(u16),
}

/// IMU error types
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ImuError {
    /// SPI communication failed
    #[error("bus error: {0}")]
    Bus(#[from] PlatformError),

    /// Configuration rejected before reaching the device
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Device-independent 6-axis IMU interface
///
/// Implementations own their bus exclusively; calls are blocking.
pub trait ImuSensor {
    /// Read one accelerometer (g) and gyroscope (°/s) sample
    fn read_sample(&mut self) -> Result<(Vector3<f64>, Vector3<f64>), ImuError>;

    /// Device name and identity register value
    fn identify(&mut self) -> Result<(&'static str, u8), ImuError>;
}
