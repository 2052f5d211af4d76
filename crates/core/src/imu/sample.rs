//! One acquisition cycle's worth of sensor data

use core::time::Duration;
use nalgebra::Vector3;

/// Converted accelerometer and gyroscope reading with its timing
///
/// Created once per acquisition cycle and moved into the estimator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImuSample {
    /// Acceleration in g
    pub acc: Vector3<f64>,
    /// Angular rate in °/s
    pub gyro: Vector3<f64>,
    /// Time since the previous successful read
    pub read_interval: Duration,
    /// Read timestamp in nanoseconds
    pub read_time_ns: u64,
    /// First sample after a timing reset; its interval is not integrated
    pub warm_up: bool,
}
