//! Time abstraction traits for platform-agnostic timing operations.
//!
//! This module provides the `TimeSource` trait that abstracts over different
//! time providers (std `Instant`, mock) so read intervals can be tested
//! deterministically.

use core::sync::atomic::{AtomicU64, Ordering};

/// Platform-agnostic monotonic time source for sample timing.
///
/// This trait abstracts over different time providers:
/// - `MonotonicClock` (in the main crate) backed by `std::time::Instant`
/// - `MockTime` for host testing with controllable time
///
/// # Example
///
/// ```
/// use attitude_stream_core::traits::{MockTime, TimeSource};
///
/// fn sample_due<T: TimeSource>(time: &T, last_read_ns: u64, period_ns: u64) -> bool {
///     time.elapsed_since(last_read_ns) >= period_ns
/// }
///
/// let time = MockTime::new();
/// time.advance(5_000_000);
/// assert!(sample_due(&time, 0, 5_000_000));
/// ```
pub trait TimeSource: Clone + Send + Sync {
    /// Returns monotonic time in nanoseconds since the clock was created.
    ///
    /// Never goes backwards and is unaffected by wall-clock corrections.
    fn now_ns(&self) -> u64;

    /// Returns monotonic time in microseconds.
    fn now_us(&self) -> u64 {
        self.now_ns() / 1_000
    }

    /// Returns monotonic time in milliseconds.
    fn now_ms(&self) -> u64 {
        self.now_ns() / 1_000_000
    }

    /// Returns elapsed nanoseconds since a reference point.
    ///
    /// Uses saturating subtraction so a reference in the future yields zero.
    fn elapsed_since(&self, reference_ns: u64) -> u64 {
        self.now_ns().saturating_sub(reference_ns)
    }

    /// Timestamp used to label a sample, in nanoseconds.
    ///
    /// Defaults to the monotonic time; host clocks report wall-clock time
    /// since the Unix epoch instead. Never used for interval computation.
    fn timestamp_ns(&self) -> u64 {
        self.now_ns()
    }
}

// ============================================================================
// Mock Implementation (always available for testing)
// ============================================================================

/// Mock time source for testing with controllable time advancement.
///
/// # Example
///
/// ```
/// use attitude_stream_core::traits::{MockTime, TimeSource};
///
/// let time = MockTime::new();
/// assert_eq!(time.now_ns(), 0);
///
/// time.advance(1_000_000); // Advance 1ms
/// assert_eq!(time.now_ms(), 1);
/// ```
///
/// A clone starts at the same time but advances independently.
#[derive(Default)]
pub struct MockTime {
    current_ns: AtomicU64,
}

impl Clone for MockTime {
    fn clone(&self) -> Self {
        Self::with_initial(self.now_ns())
    }
}

impl MockTime {
    /// Creates a new `MockTime` starting at time 0.
    pub fn new() -> Self {
        Self::with_initial(0)
    }

    /// Creates a new `MockTime` starting at the specified time.
    pub fn with_initial(ns: u64) -> Self {
        Self {
            current_ns: AtomicU64::new(ns),
        }
    }

    /// Sets the current time to an absolute value.
    pub fn set(&self, ns: u64) {
        self.current_ns.store(ns, Ordering::Relaxed);
    }

    /// Advances the current time by the specified amount.
    pub fn advance(&self, ns: u64) {
        self.current_ns.fetch_add(ns, Ordering::Relaxed);
    }
}

impl TimeSource for MockTime {
    fn now_ns(&self) -> u64 {
        self.current_ns.load(Ordering::Relaxed)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
