//! IMU Drivers
//!
//! Sensor drivers implementing the `ImuSensor` trait.
//!
//! ## Usage
//!
//! ```ignore
//! use attitude_stream::devices::imu::Icm20948Driver;
//! use attitude_stream::devices::traits::ImuSensor;
//!
//! let mut driver = Icm20948Driver::open(device, accel, gyro)?;
//! driver.init()?;
//! let (acc, gyro) = driver.read_sample()?;
//! ```

pub mod icm20948;

pub use icm20948::Icm20948Driver;
