//! Producer/consumer handoff
//!
//! [`ImuPipeline`] moves a [`RotationSource`] onto a blocking thread running
//! [`run_acquisition`] and exposes the receiving end of the single-slot
//! delivery channel to the async consumer.

use super::source::RotationSource;
use super::task::{run_acquisition, AcquisitionConfig, AcquisitionReport};
use crate::communication::command::Command;
use attitude_stream_core::ahrs::ImuRotations;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};

/// Delivery channel capacity; the producer blocks while the slot is full
pub const DELIVERY_CAPACITY: usize = 1;

/// Pipeline errors
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Acquisition thread panicked or was cancelled
    #[error("acquisition task failed: {0}")]
    TaskFailed(#[from] JoinError),
}

/// Running acquisition thread and its channels
pub struct ImuPipeline {
    delivery: mpsc::Receiver<ImuRotations>,
    control: mpsc::Sender<Command>,
    handle: JoinHandle<AcquisitionReport>,
}

impl ImuPipeline {
    /// Start acquisition on the runtime's blocking pool
    ///
    /// Must be called within a tokio runtime.
    pub fn spawn<S>(source: S, config: AcquisitionConfig) -> Self
    where
        S: RotationSource + 'static,
    {
        let (delivery_tx, delivery) = mpsc::channel(DELIVERY_CAPACITY);
        let (control, control_rx) = mpsc::channel(1);
        let handle = tokio::task::spawn_blocking(move || {
            run_acquisition(source, config, delivery_tx, control_rx)
        });
        Self {
            delivery,
            control,
            handle,
        }
    }

    /// Next estimate, in production order
    ///
    /// `None` once the acquisition thread has stopped.
    pub async fn recv(&mut self) -> Option<ImuRotations> {
        self.delivery.recv().await
    }

    /// Ask the producer to stop at its next iteration
    ///
    /// Best effort: a full control slot already holds a request.
    pub fn request_stop(&self) {
        let _ = self.control.try_send(Command::Terminate);
    }

    /// Stop the producer and wait for it
    ///
    /// Dropping the delivery receiver releases a producer parked on a full
    /// slot, so this never deadlocks.
    pub async fn shutdown(self) -> Result<AcquisitionReport, PipelineError> {
        self.request_stop();
        let ImuPipeline {
            delivery,
            control,
            handle,
        } = self;
        drop(delivery);
        let report = handle.await?;
        drop(control);
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subsystems::ahrs::mock::MockRotationSource;
    use std::time::Duration;
    use tokio::time::{sleep, timeout};

    const SHUTDOWN_LIMIT: Duration = Duration::from_secs(3);

    #[tokio::test]
    async fn test_full_slot_blocks_producer() {
        let source = MockRotationSource::new();
        let probe = source.clone();
        let mut pipeline = ImuPipeline::spawn(source, AcquisitionConfig::default());

        sleep(Duration::from_millis(100)).await;
        // One estimate in the slot, one parked in send
        assert_eq!(probe.reads(), 2);

        assert_eq!(pipeline.recv().await.map(|r| r.read_time_ns), Some(0));
        sleep(Duration::from_millis(100)).await;
        assert_eq!(probe.reads(), 3);

        let report = timeout(SHUTDOWN_LIMIT, pipeline.shutdown())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(report.delivered, 2);
        assert_eq!(report.dropped, 0);
        assert_eq!(probe.resets(), 1);
    }

    #[tokio::test]
    async fn test_estimates_arrive_in_order() {
        let mut pipeline = ImuPipeline::spawn(MockRotationSource::new(), AcquisitionConfig::default());

        let mut received = Vec::new();
        for _ in 0..5 {
            received.push(pipeline.recv().await.unwrap().read_time_ns);
        }
        assert_eq!(received, vec![0, 1, 2, 3, 4]);

        timeout(SHUTDOWN_LIMIT, pipeline.shutdown())
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn test_failed_reads_are_invisible_downstream() {
        let mut pipeline = ImuPipeline::spawn(
            MockRotationSource::failing_every(2),
            AcquisitionConfig::default(),
        );

        let mut received = Vec::new();
        for _ in 0..3 {
            received.push(pipeline.recv().await.unwrap().read_time_ns);
        }
        assert_eq!(received, vec![0, 2, 4]);

        let report = timeout(SHUTDOWN_LIMIT, pipeline.shutdown())
            .await
            .unwrap()
            .unwrap();
        assert!(report.dropped >= 2);
    }

    #[tokio::test]
    async fn test_shutdown_while_pacing() {
        let config = AcquisitionConfig {
            sample_rate_hz: Some(2),
        };
        let mut pipeline = ImuPipeline::spawn(MockRotationSource::new(), config);
        assert!(pipeline.recv().await.is_some());

        let report = timeout(SHUTDOWN_LIMIT, pipeline.shutdown())
            .await
            .unwrap()
            .unwrap();
        assert!(report.delivered >= 1);
    }
}
