//! Mock rotation source for testing
//!
//! Produces synthetic estimates without a sensor. Clones share their
//! counters, so a test can keep a probe while the source itself moves into
//! the acquisition thread.

#![cfg(any(test, feature = "mock"))]

use super::source::RotationSource;
use crate::devices::traits::ImuError;
use crate::platform::{PlatformError, SpiError};
use attitude_stream_core::ahrs::{ImuRotations, Rotations};
use core::time::Duration;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Scripted [`RotationSource`]
///
/// Read `n` yields an estimate whose `read_time_ns` and roll equal `n`,
/// unless it is scheduled to fail.
#[derive(Debug, Clone, Default)]
pub struct MockRotationSource {
    reads: Arc<AtomicU64>,
    resets: Arc<AtomicU64>,
    fail_every: Option<u64>,
}

impl MockRotationSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every `n`th read (reads `n-1`, `2n-1`, ...)
    pub fn failing_every(n: u64) -> Self {
        Self {
            fail_every: Some(n.max(1)),
            ..Self::default()
        }
    }

    /// Reads attempted so far
    pub fn reads(&self) -> u64 {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of `reset` calls
    pub fn resets(&self) -> u64 {
        self.resets.load(Ordering::SeqCst)
    }
}

impl RotationSource for MockRotationSource {
    fn read_rotations(&mut self) -> Result<ImuRotations, ImuError> {
        let index = self.reads.fetch_add(1, Ordering::SeqCst);
        if let Some(n) = self.fail_every {
            if (index + 1) % n == 0 {
                return Err(ImuError::Bus(PlatformError::Spi(SpiError::TransferFailed)));
            }
        }
        Ok(ImuRotations {
            acc: Rotations::new(index as f64, 0.0, 0.0),
            gyro: Rotations::zero(),
            rotations: Rotations::new(index as f64, 0.0, 0.0),
            read_interval: Duration::from_millis(5),
            read_time_ns: index,
        })
    }

    fn reset(&mut self) {
        self.resets.fetch_add(1, Ordering::SeqCst);
    }
}
