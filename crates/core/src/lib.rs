//! attitude_stream_core - Pure no_std estimation logic for attitude_stream
//!
//! This crate contains the platform-agnostic parts of the attitude pipeline
//! that can be tested on host without hardware or an async runtime.
//!
//! # Design Principles
//!
//! - **Zero cfg**: No `#[cfg(feature = ...)]` directives
//! - **Pure no_std**: No std library dependencies
//! - **Trait abstractions**: Clocks injected via [`traits::TimeSource`]
//!
//! # Modules
//!
//! - [`traits`]: Platform-agnostic trait abstractions (TimeSource)
//! - [`imu`]: Raw sample decoding, per-axis state and the sample type
//! - [`ahrs`]: Read timing, tilt/gyro rotation estimation

#![no_std]

pub mod ahrs;
pub mod imu;
pub mod traits;
