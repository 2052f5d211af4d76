//! Subsystems
//!
//! - `ahrs`: attitude acquisition from the IMU

pub mod ahrs;
