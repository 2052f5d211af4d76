//! ICM-20948 6-Axis IMU Driver
//!
//! SPI driver for the accelerometer and gyroscope of the TDK InvenSense
//! ICM-20948.
//!
//! ## Features
//!
//! - 3-axis gyroscope: ±250, ±500, ±1000, ±2000 °/s
//! - 3-axis accelerometer: ±2, ±4, ±8, ±16 g
//! - 4-bank register architecture with cached bank selection
//! - SPI mode 3 @ 7 MHz
//!
//! ## Usage
//!
//! ```ignore
//! use attitude_stream::devices::imu::icm20948::{AccelConfig, DeviceConfig, GyroConfig, Icm20948Driver};
//!
//! let mut driver = Icm20948Driver::open(DeviceConfig::default(), AccelConfig::default(), GyroConfig::default())?;
//! driver.init()?;
//! let (acc, gyro) = driver.read_sample()?;
//! ```

pub mod bus;
mod config;
mod driver;
pub mod registers;

pub use config::{
    AccelConfig, AccelDlpfConfig, AccelRange, ActiveConfig, DeviceConfig, GyroConfig,
    GyroDlpfConfig, GyroRange, ACCEL_SMPLRT_DIV_MAX,
};
pub use driver::{Icm20948Driver, DEVICE_NAME};
pub use registers::RegisterBank;
