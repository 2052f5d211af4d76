//! Monotonic clock backed by `std::time::Instant`

use attitude_stream_core::traits::TimeSource;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Host time source
///
/// `now_ns` is measured from the clock's creation with `Instant` and never
/// goes backwards. `timestamp_ns` reports wall-clock time for labelling
/// samples only.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicClock {
    fn now_ns(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }

    fn timestamp_ns(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_nanos()).unwrap_or(u64::MAX))
            .unwrap_or(0)
    }
}
