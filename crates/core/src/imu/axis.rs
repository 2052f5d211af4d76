//! Per-sensor three-axis state
//!
//! Each physical sensor (accelerometer, gyroscope) keeps its latest and
//! previous vector together with the change in magnitude between them.

use super::decode::scale;
use nalgebra::Vector3;

/// Three-axis state for one sensor kind
///
/// `previous` always holds the value `current` had before the last update,
/// so `magnitude_delta` describes the last two samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisState {
    current: Vector3<f64>,
    previous: Vector3<f64>,
    magnitude_delta: f64,
    /// LSB per physical unit for the configured range
    sensitivity: f64,
}

impl AxisState {
    /// Create a zeroed axis state for the given sensitivity
    pub fn new(sensitivity: f64) -> Self {
        Self {
            current: Vector3::zeros(),
            previous: Vector3::zeros(),
            magnitude_delta: 0.0,
            sensitivity,
        }
    }

    /// Store a new physical sample
    ///
    /// Moves `current` into `previous` and recomputes
    /// `|current| - |previous|`.
    pub fn set_data(&mut self, x: f64, y: f64, z: f64) {
        self.previous = self.current;
        self.current = Vector3::new(x, y, z);
        self.magnitude_delta = self.current.norm() - self.previous.norm();
    }

    /// Scale raw counts with this axis' sensitivity and store the result
    pub fn update_raw(&mut self, raw: [i16; 3]) -> Vector3<f64> {
        let v = scale(raw, self.sensitivity);
        self.set_data(v.x, v.y, v.z);
        v
    }

    /// Latest physical vector
    pub fn data(&self) -> Vector3<f64> {
        self.current
    }

    /// Vector before the latest update
    pub fn previous(&self) -> Vector3<f64> {
        self.previous
    }

    /// Magnitude change between the last two samples
    pub fn magnitude_delta(&self) -> f64 {
        self.magnitude_delta
    }

    pub fn sensitivity(&self) -> f64 {
        self.sensitivity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_update_delta_is_magnitude() {
        let mut axis = AxisState::new(1.0);
        axis.set_data(3.0, 4.0, 0.0);
        assert_eq!(axis.previous(), Vector3::zeros());
        assert!((axis.magnitude_delta() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_delta_tracks_last_two_samples() {
        let mut axis = AxisState::new(1.0);
        axis.set_data(3.0, 4.0, 0.0);
        axis.set_data(0.0, 0.0, 2.0);
        assert_eq!(axis.previous(), Vector3::new(3.0, 4.0, 0.0));
        assert!((axis.magnitude_delta() - (2.0 - 5.0)).abs() < 1e-12);
    }

    #[test]
    fn test_identical_updates_give_zero_delta() {
        let mut axis = AxisState::new(1.0);
        axis.set_data(0.1, -0.2, 0.98);
        axis.set_data(0.1, -0.2, 0.98);
        assert_eq!(axis.magnitude_delta(), 0.0);
    }

    #[test]
    fn test_update_raw_uses_sensitivity() {
        let mut axis = AxisState::new(16384.0);
        let v = axis.update_raw([0, 0, 16384]);
        assert_eq!(v, Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(axis.data(), v);
        assert_eq!(axis.sensitivity(), 16384.0);
    }
}
