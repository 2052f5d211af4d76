//! Operator commands and telemetry output
//!
//! - [`command`]: stdin / Ctrl-C command sources
//! - [`telemetry`]: JSON record for one estimate
//! - [`sink`]: UDP and log telemetry sinks
//! - [`dispatcher`]: async consumer tying the pipeline to a sink

pub mod command;
pub mod dispatcher;
pub mod sink;
pub mod telemetry;

pub use command::{Command, COMMAND_CHANNEL_CAPACITY};
pub use dispatcher::{DispatchReport, Dispatcher, PipelineState};
pub use sink::{LogSink, TelemetryError, TelemetrySink, UdpTelemetry};
pub use telemetry::{to_json, TelemetryRecord};
