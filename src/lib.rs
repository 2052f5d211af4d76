//! attitude_stream - ICM-20948 attitude estimation and telemetry streaming
//!
//! This library provides the platform abstraction, the ICM-20948 SPI
//! driver and the acquisition pipeline that turns raw samples into
//! roll/pitch/yaw telemetry.

// Platform abstraction layer (spidev, clocks, mocks)
pub mod platform;

// Device drivers using platform abstraction
pub mod devices;

// Configuration, errors and logging
pub mod core;

// Commands and telemetry output
pub mod communication;

// Acquisition pipeline
pub mod subsystems;
