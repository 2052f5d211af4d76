//! Consumer side of the acquisition pipeline
//!
//! The [`Dispatcher`] waits on two channels at once: estimates from the
//! [`ImuPipeline`] and operator commands. Commands win when both are ready,
//! so `Terminate` is never starved by a busy producer.

use super::command::Command;
use super::sink::TelemetrySink;
use super::telemetry;
use crate::subsystems::ahrs::{AcquisitionReport, ImuPipeline, PipelineError};
use attitude_stream_core::ahrs::ImuRotations;
use tokio::sync::mpsc;

/// Pipeline lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Running,
    Terminating,
    Stopped,
}

/// Counters returned by [`Dispatcher::run`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchReport {
    pub published: u64,
    pub publish_failures: u64,
    pub ignored_commands: u64,
    pub acquisition: AcquisitionReport,
}

pub struct Dispatcher<S> {
    sink: S,
    state: PipelineState,
    report: DispatchReport,
    sink_failing: bool,
}

impl<S: TelemetrySink> Dispatcher<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            state: PipelineState::Idle,
            report: DispatchReport::default(),
            sink_failing: false,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Publish estimates until terminated, then stop the producer
    ///
    /// Stops on `Terminate`, when every command sender is gone, or when the
    /// producer exits on its own.
    pub async fn run(
        &mut self,
        mut pipeline: ImuPipeline,
        mut commands: mpsc::Receiver<Command>,
    ) -> Result<DispatchReport, PipelineError> {
        self.state = PipelineState::Running;
        crate::log_info!("Streaming telemetry to {}", self.sink.describe());

        loop {
            tokio::select! {
                biased;

                command = commands.recv() => match command {
                    Some(Command::Terminate) => {
                        crate::log_info!("Terminate requested");
                        break;
                    }
                    Some(Command::Other(line)) => {
                        self.report.ignored_commands += 1;
                        crate::log_debug!("Ignoring command '{}'", line);
                    }
                    None => {
                        crate::log_debug!("Command channel closed");
                        break;
                    }
                },
                rotations = pipeline.recv() => match rotations {
                    Some(rotations) => self.publish(&rotations),
                    None => {
                        crate::log_warn!("Acquisition stopped unexpectedly");
                        break;
                    }
                },
            }
        }

        self.state = PipelineState::Terminating;
        let result = pipeline.shutdown().await;
        self.state = PipelineState::Stopped;

        self.report.acquisition = result?;
        Ok(self.report)
    }

    /// Serialise and send one estimate
    ///
    /// A failing sink is reported at warn once, then at trace until it
    /// recovers.
    pub fn publish(&mut self, rotations: &ImuRotations) {
        let line = match telemetry::to_json(rotations) {
            Ok(line) => line,
            Err(e) => {
                self.report.publish_failures += 1;
                crate::log_warn!("Telemetry serialization failed: {}", e);
                return;
            }
        };
        crate::log_debug!("{}", line);

        match self.sink.publish(&line) {
            Ok(()) => {
                self.report.published += 1;
                if self.sink_failing {
                    crate::log_info!("Telemetry sink {} recovered", self.sink.describe());
                    self.sink_failing = false;
                }
            }
            Err(e) => {
                self.report.publish_failures += 1;
                if self.sink_failing {
                    crate::log_trace!("Telemetry send failed: {}", e);
                } else {
                    crate::log_warn!("Telemetry send to {} failed: {}", self.sink.describe(), e);
                    self.sink_failing = true;
                }
            }
        }
    }
}
