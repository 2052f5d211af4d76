//! Attitude acquisition subsystem
//!
//! Reads the IMU on a dedicated thread, estimates attitude per sample and
//! hands each estimate to the async consumer through a single-slot channel.
//!
//! ## Architecture
//!
//! ```text
//!  ┌───────────────────────────┐  capacity 1   ┌──────────────────────┐
//!  │ acquisition thread        │ ────────────▶ │ dispatcher (tokio)   │
//!  │ Imu<Icm20948Driver, Clock>│ ◀──────────── │                      │
//!  └───────────────────────────┘   Terminate   └──────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use attitude_stream::subsystems::ahrs::{AcquisitionConfig, Imu, ImuPipeline};
//!
//! let imu = Imu::new(driver, MonotonicClock::new(), EstimatorConfig::default());
//! let mut pipeline = ImuPipeline::spawn(imu, AcquisitionConfig::default());
//! while let Some(rotations) = pipeline.recv().await {
//!     // publish rotations
//! }
//! ```

#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod pipeline;
pub mod source;
pub mod task;

pub use pipeline::{ImuPipeline, PipelineError, DELIVERY_CAPACITY};
pub use source::{Imu, RotationSource};
pub use task::{run_acquisition, AcquisitionConfig, AcquisitionReport};
