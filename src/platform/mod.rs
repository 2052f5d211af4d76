//! Platform abstraction layer
//!
//! Hardware access used by the device drivers. All host-specific code
//! (spidev, `std::thread::sleep`, `Instant`) is isolated in [`host`].

pub mod error;
pub mod host;
pub mod traits;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{PlatformError, Result, SpiError, TimerError};
pub use traits::{SpiConfig, SpiInterface, SpiMode, TimerInterface};
