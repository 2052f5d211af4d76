//! Tilt and gyroscope rotation estimator
//!
//! Two sources are computed for every sample:
//!
//! - **Accelerometer tilt**: roll and pitch from gravity's projection. Yaw is
//!   unobservable and always zero.
//! - **Gyroscope integration**: angular rate times the read interval,
//!   accumulated across samples until [`RotationEstimator::reset`].
//!
//! The reported attitude is the accelerometer tilt. The gyroscope
//! accumulator is kept and published alongside it but not blended in, and the
//! yaw increment is taken from the X rate like roll. Both are the established
//! behaviour of this estimator and are kept as-is.

use super::rotations::{ImuRotations, Rotations};
use crate::imu::ImuSample;
use core::f64::consts::PI;
use core::time::Duration;
use nalgebra::Vector3;

fn rad_to_deg(rad: f64) -> f64 {
    rad * 180.0 / PI
}

/// Estimator configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatorConfig {
    /// Blend weight reserved for accelerometer low-pass filtering.
    ///
    /// Accepted and carried, but the current policy reports the
    /// accelerometer tilt directly.
    pub acc_low_pass_filter_coefficient: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            acc_low_pass_filter_coefficient: 0.01,
        }
    }
}

/// Roll and pitch in degrees from an acceleration vector
pub fn accelerometer_to_roll_pitch(acc: &Vector3<f64>) -> (f64, f64) {
    let roll = rad_to_deg(libm::atan2(acc.y, acc.z));
    let pitch = -rad_to_deg(libm::atan2(acc.x, acc.z));
    (roll, pitch)
}

/// Rotation change in degrees for a rate in °/s held over `dt`
pub fn gyroscope_to_rotation_change(rate: &Vector3<f64>, dt: Duration) -> Rotations {
    let dt = dt.as_secs_f64();
    Rotations::new(rate.x * dt, rate.y * dt, rate.x * dt)
}

/// Two-source rotation estimator
#[derive(Debug, Clone, Copy)]
pub struct RotationEstimator {
    config: EstimatorConfig,
    acc: Rotations,
    gyro: Rotations,
    rotations: Rotations,
}

impl RotationEstimator {
    pub fn new(config: EstimatorConfig) -> Self {
        Self {
            config,
            acc: Rotations::zero(),
            gyro: Rotations::zero(),
            rotations: Rotations::zero(),
        }
    }

    /// Process one sample and return all three estimates
    ///
    /// Warm-up samples update the tilt but are not integrated.
    pub fn update(&mut self, sample: &ImuSample) -> ImuRotations {
        let (roll, pitch) = accelerometer_to_roll_pitch(&sample.acc);
        self.acc = Rotations::new(roll, pitch, 0.0);

        if !sample.warm_up {
            self.gyro = self.gyro + gyroscope_to_rotation_change(&sample.gyro, sample.read_interval);
        }

        self.rotations = self.acc;

        ImuRotations {
            acc: self.acc,
            gyro: self.gyro,
            rotations: self.rotations,
            read_interval: sample.read_interval,
            read_time_ns: sample.read_time_ns,
        }
    }

    /// Zero the gyroscope accumulator
    ///
    /// The accelerometer tilt is left untouched.
    pub fn reset(&mut self) {
        self.gyro = Rotations::zero();
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    pub fn acc_rotations(&self) -> Rotations {
        self.acc
    }

    pub fn gyro_rotations(&self) -> Rotations {
        self.gyro
    }

    pub fn rotations(&self) -> Rotations {
        self.rotations
    }
}

impl Default for RotationEstimator {
    fn default() -> Self {
        Self::new(EstimatorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn sample(acc: Vector3<f64>, gyro: Vector3<f64>, dt: Duration, warm_up: bool) -> ImuSample {
        ImuSample {
            acc,
            gyro,
            read_interval: dt,
            read_time_ns: 0,
            warm_up,
        }
    }

    #[test]
    fn test_level_accel_gives_zero_tilt() {
        let (roll, pitch) = accelerometer_to_roll_pitch(&Vector3::new(0.0, 0.0, 1.0));
        assert!(roll.abs() < EPS);
        assert!(pitch.abs() < EPS);
    }

    #[test]
    fn test_gravity_on_y_gives_roll_90() {
        let (roll, _) = accelerometer_to_roll_pitch(&Vector3::new(0.0, 1.0, 0.0));
        assert!((roll - 90.0).abs() < EPS);
    }

    #[test]
    fn test_gravity_on_x_gives_negative_pitch() {
        let (_, pitch) = accelerometer_to_roll_pitch(&Vector3::new(1.0, 0.0, 0.0));
        assert!((pitch + 90.0).abs() < EPS);
    }

    #[test]
    fn test_gyro_change_reuses_x_rate_for_yaw() {
        let delta = gyroscope_to_rotation_change(&Vector3::new(1.0, 2.0, 3.0), Duration::from_secs(1));
        assert_eq!(delta, Rotations::new(1.0, 2.0, 1.0));
    }

    #[test]
    fn test_gyro_integration_is_linear_in_dt() {
        let rate = Vector3::new(1.0, 2.0, 3.0);
        let acc = Vector3::new(0.0, 0.0, 1.0);

        let mut whole = RotationEstimator::default();
        whole.update(&sample(acc, rate, Duration::from_secs(1), false));

        let mut halves = RotationEstimator::default();
        halves.update(&sample(acc, rate, Duration::from_millis(500), false));
        halves.update(&sample(acc, rate, Duration::from_millis(500), false));

        let a = whole.gyro_rotations();
        let b = halves.gyro_rotations();
        assert!((a.roll - b.roll).abs() < EPS);
        assert!((a.pitch - b.pitch).abs() < EPS);
        assert!((a.yaw - b.yaw).abs() < EPS);
        assert!((a.roll - 1.0).abs() < EPS);
        assert!((a.pitch - 2.0).abs() < EPS);
    }

    #[test]
    fn test_warm_up_sample_not_integrated() {
        let mut estimator = RotationEstimator::default();
        let out = estimator.update(&sample(
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(10.0, 10.0, 10.0),
            Duration::from_secs(3),
            true,
        ));
        assert_eq!(out.gyro, Rotations::zero());
    }

    #[test]
    fn test_reported_rotation_is_accelerometer_tilt() {
        let mut estimator = RotationEstimator::default();
        let out = estimator.update(&sample(
            Vector3::new(0.0, 1.0, 1.0),
            Vector3::new(5.0, 0.0, 0.0),
            Duration::from_secs(1),
            false,
        ));
        assert!((out.rotations.roll - 45.0).abs() < EPS);
        assert_eq!(out.rotations, out.acc);
        assert_eq!(out.acc.yaw, 0.0);
        assert!((out.gyro.roll - 5.0).abs() < EPS);
    }

    #[test]
    fn test_reset_clears_only_gyro() {
        let mut estimator = RotationEstimator::default();
        estimator.update(&sample(
            Vector3::new(0.0, 1.0, 1.0),
            Vector3::new(5.0, 5.0, 5.0),
            Duration::from_secs(1),
            false,
        ));
        let acc_before = estimator.acc_rotations();

        estimator.reset();
        assert_eq!(estimator.gyro_rotations(), Rotations::zero());
        assert_eq!(estimator.acc_rotations(), acc_before);
    }

    #[test]
    fn test_config_is_carried() {
        let estimator = RotationEstimator::new(EstimatorConfig {
            acc_low_pass_filter_coefficient: 0.2,
        });
        assert_eq!(estimator.config().acc_low_pass_filter_coefficient, 0.2);
    }
}
