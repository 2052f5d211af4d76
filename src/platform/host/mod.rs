//! Host platform implementation
//!
//! Linux user-space backends for the platform traits: the monotonic clock
//! used for sample timing, a sleeping timer for settle delays, and the
//! spidev SPI device.

mod clock;
#[cfg(feature = "linux")]
mod spi;
mod timer;

pub use clock::MonotonicClock;
#[cfg(feature = "linux")]
pub use spi::LinuxSpi;
pub use timer::StdTimer;
