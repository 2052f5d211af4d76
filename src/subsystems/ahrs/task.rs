//! Acquisition task
//!
//! Runs on a dedicated blocking thread that owns the sensor. Each iteration:
//!
//! 1. Poll the control channel without blocking; stop on `Terminate`
//! 2. Read one estimate from the [`RotationSource`]
//! 3. On success, hand it to the consumer through the single-slot channel,
//!    blocking while the slot is full; on failure drop the sample
//! 4. Optionally sleep out the rest of the sample period

use super::source::RotationSource;
use crate::communication::command::Command;
use attitude_stream_core::ahrs::ImuRotations;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

/// Acquisition task configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AcquisitionConfig {
    /// Target sample rate; `None` reads as fast as the consumer drains
    pub sample_rate_hz: Option<u32>,
}

impl AcquisitionConfig {
    /// Minimum time per iteration, if paced
    pub fn period(&self) -> Option<Duration> {
        match self.sample_rate_hz {
            Some(hz) if hz > 0 => Some(Duration::from_secs(1) / hz),
            _ => None,
        }
    }
}

/// Counters returned when the task stops
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AcquisitionReport {
    /// Estimates accepted by the delivery channel
    pub delivered: u64,
    /// Reads that failed and were dropped
    pub dropped: u64,
}

/// Run the acquisition loop until terminated
///
/// Returns when `Terminate` arrives on `control`, when the control sender is
/// gone, or when the consumer drops the delivery receiver. Must be called
/// from a blocking context (`spawn_blocking` or a plain thread).
pub fn run_acquisition<S: RotationSource>(
    mut source: S,
    config: AcquisitionConfig,
    delivery: mpsc::Sender<ImuRotations>,
    mut control: mpsc::Receiver<Command>,
) -> AcquisitionReport {
    let period = config.period();
    let mut report = AcquisitionReport::default();

    source.reset();
    crate::log_debug!("Acquisition started (period: {:?})", period);

    loop {
        match control.try_recv() {
            Ok(Command::Terminate) | Err(TryRecvError::Disconnected) => break,
            Ok(Command::Other(_)) | Err(TryRecvError::Empty) => {}
        }

        let started = Instant::now();
        match source.read_rotations() {
            Ok(rotations) => {
                if delivery.blocking_send(rotations).is_err() {
                    crate::log_debug!("Delivery channel closed");
                    break;
                }
                report.delivered += 1;
            }
            Err(e) => {
                report.dropped += 1;
                crate::log_trace!("IMU read failed, sample dropped: {}", e);
            }
        }

        if let Some(period) = period {
            let elapsed = started.elapsed();
            if elapsed < period {
                std::thread::sleep(period - elapsed);
            }
        }
    }

    crate::log_debug!(
        "Acquisition stopped: {} delivered, {} dropped",
        report.delivered,
        report.dropped
    );
    report
}
