//! Platform abstraction traits
//!
//! This module defines the traits that platform implementations must provide.

pub mod spi;
pub mod timer;

// Re-export trait interfaces
pub use spi::{SpiConfig, SpiInterface, SpiMode};
pub use timer::TimerInterface;
