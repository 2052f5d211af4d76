//! Rotation types shared by the estimator and its consumers

use core::ops::Add;
use core::time::Duration;

/// Roll, pitch and yaw in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rotations {
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
}

impl Rotations {
    pub const fn new(roll: f64, pitch: f64, yaw: f64) -> Self {
        Self { roll, pitch, yaw }
    }

    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

impl Add for Rotations {
    type Output = Rotations;

    fn add(self, rhs: Rotations) -> Rotations {
        Rotations::new(
            self.roll + rhs.roll,
            self.pitch + rhs.pitch,
            self.yaw + rhs.yaw,
        )
    }
}

/// Estimator output for one sample
///
/// This is what the acquisition task hands to the consumer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImuRotations {
    /// Tilt from the accelerometer alone (yaw is always zero)
    pub acc: Rotations,
    /// Running gyroscope integration
    pub gyro: Rotations,
    /// Reported attitude
    pub rotations: Rotations,
    /// Time since the previous successful read
    pub read_interval: Duration,
    /// Read timestamp in nanoseconds
    pub read_time_ns: u64,
}
