//! Attitude estimation types and utilities
//!
//! Read-interval tracking and the tilt/gyro rotation estimator. The
//! acquisition task and sensor drivers are in the main crate.

pub mod estimator;
pub mod rotations;
pub mod timing;

pub use estimator::{
    accelerometer_to_roll_pitch, gyroscope_to_rotation_change, EstimatorConfig,
    RotationEstimator,
};
pub use rotations::{ImuRotations, Rotations};
pub use timing::{ReadTimer, ReadTiming};
