//! Rotation sources
//!
//! A [`RotationSource`] turns one sensor read into one [`ImuRotations`].
//! [`Imu`] is the implementation for any [`ImuSensor`]: it timestamps each
//! read and runs the tilt/gyro estimator.

use crate::devices::traits::{ImuError, ImuSensor};
use attitude_stream_core::ahrs::{EstimatorConfig, ImuRotations, ReadTimer, RotationEstimator};
use attitude_stream_core::imu::ImuSample;
use attitude_stream_core::traits::TimeSource;

/// Produces attitude estimates, one per read
///
/// Owned by the acquisition thread, hence `Send`.
pub trait RotationSource: Send {
    /// Read the sensor and update the estimate
    fn read_rotations(&mut self) -> Result<ImuRotations, ImuError>;

    /// Restart read-interval timing; the next read is a warm-up read
    fn reset(&mut self);
}

/// Sensor plus estimator
pub struct Imu<D, C> {
    device: D,
    clock: C,
    timer: ReadTimer,
    estimator: RotationEstimator,
}

impl<D, C> Imu<D, C>
where
    D: ImuSensor,
    C: TimeSource,
{
    pub fn new(device: D, clock: C, config: EstimatorConfig) -> Self {
        Self {
            device,
            clock,
            timer: ReadTimer::new(),
            estimator: RotationEstimator::new(config),
        }
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn estimator(&self) -> &RotationEstimator {
        &self.estimator
    }

    /// Zero the integrated gyroscope rotation
    pub fn reset_rotations(&mut self) {
        self.estimator.reset();
    }
}

impl<D, C> RotationSource for Imu<D, C>
where
    D: ImuSensor + Send,
    C: TimeSource,
{
    fn read_rotations(&mut self) -> Result<ImuRotations, ImuError> {
        let (acc, gyro) = self.device.read_sample()?;
        let timing = self.timer.tick(self.clock.now_ns());

        let sample = ImuSample {
            acc,
            gyro,
            read_interval: timing.interval,
            read_time_ns: self.clock.timestamp_ns(),
            warm_up: timing.warm_up,
        };
        Ok(self.estimator.update(&sample))
    }

    fn reset(&mut self) {
        self.timer.start(self.clock.now_ns());
    }
}
