//! Mock platform implementation for testing
//!
//! Mock implementations of the platform traits for unit testing without
//! an attached sensor.
//!
//! # Feature Gate
//!
//! This module is available in two contexts:
//! - During test builds (`#[cfg(test)]`)
//! - When the `mock` feature is enabled
//!
//! # Example
//!
//! ```ignore
//! use attitude_stream::platform::mock::MockSpi;
//! use attitude_stream::platform::traits::{SpiConfig, SpiInterface};
//!
//! let mut spi = MockSpi::new(SpiConfig::default());
//! spi.write(&[0x7F, 0x20])?;
//! assert_eq!(spi.transactions().len(), 1);
//! ```

#![cfg(any(test, feature = "mock"))]

mod spi;
mod timer;

pub use spi::{MockSpi, SpiTransaction};
pub use timer::MockTimer;
