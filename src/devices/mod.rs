//! Device drivers
//!
//! Drivers built on the platform abstraction traits.
//!
//! ## Modules
//!
//! - `imu`: IMU sensor drivers (ICM-20948)
//! - `traits`: Device trait definitions (ImuSensor, errors)

pub mod imu;
pub mod traits;
