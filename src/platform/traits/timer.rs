//! Timer interface trait
//!
//! This module defines the blocking delay interface used for sensor settle times.

use crate::platform::Result;

/// Timer interface trait
///
/// # Safety Invariants
///
/// - Delays block the calling thread
/// - Monotonic time source (never goes backwards)
pub trait TimerInterface {
    /// Delay for specified number of microseconds
    ///
    /// Blocks execution for at least `us` microseconds.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Timer` if the delay operation fails.
    fn delay_us(&mut self, us: u32) -> Result<()>;

    /// Delay for specified number of milliseconds
    ///
    /// Blocks execution for at least `ms` milliseconds.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Timer` if the delay operation fails.
    fn delay_ms(&mut self, ms: u32) -> Result<()>;

    /// Get current time in microseconds
    ///
    /// Returns a monotonic timestamp in microseconds since the timer was created.
    fn now_us(&self) -> u64;

    /// Get current time in milliseconds
    fn now_ms(&self) -> u64 {
        self.now_us() / 1000
    }
}
