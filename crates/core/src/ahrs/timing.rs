//! Read interval tracking
//!
//! Timestamps are monotonic nanoseconds from a [`TimeSource`](crate::traits::TimeSource);
//! the tracker itself holds no clock so it stays trivially testable.

use core::time::Duration;

/// Interval reported for one read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadTiming {
    /// Time since the previous tick (or since `start`)
    pub interval: Duration,
    /// Set for the first tick after `start`; not suitable for integration
    pub warm_up: bool,
}

/// Tracks the time of the previous read
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadTimer {
    last_ns: Option<u64>,
    warmed_up: bool,
}

impl ReadTimer {
    pub const fn new() -> Self {
        Self {
            last_ns: None,
            warmed_up: false,
        }
    }

    /// Record the baseline for the next interval
    pub fn start(&mut self, now_ns: u64) {
        self.last_ns = Some(now_ns);
        self.warmed_up = false;
    }

    /// Return the time since the previous tick and rebase to `now_ns`
    ///
    /// Without a prior `start` the interval is zero. A timestamp earlier than
    /// the baseline saturates to zero rather than going negative.
    pub fn tick(&mut self, now_ns: u64) -> ReadTiming {
        let last = self.last_ns.unwrap_or(now_ns);
        let timing = ReadTiming {
            interval: Duration::from_nanos(now_ns.saturating_sub(last)),
            warm_up: !self.warmed_up,
        };
        self.last_ns = Some(now_ns);
        self.warmed_up = true;
        timing
    }

    pub fn is_started(&self) -> bool {
        self.last_ns.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{MockTime, TimeSource};

    #[test]
    fn test_first_tick_measures_from_start_and_is_warm_up() {
        let time = MockTime::with_initial(1_000);
        let mut timer = ReadTimer::new();
        timer.start(time.now_ns());

        time.advance(4_000_000);
        let timing = timer.tick(time.now_ns());
        assert_eq!(timing.interval, Duration::from_millis(4));
        assert!(timing.warm_up);
    }

    #[test]
    fn test_subsequent_ticks_rebase() {
        let time = MockTime::new();
        let mut timer = ReadTimer::new();
        timer.start(time.now_ns());

        time.advance(1_000_000);
        timer.tick(time.now_ns());
        time.advance(2_500_000);
        let timing = timer.tick(time.now_ns());

        assert_eq!(timing.interval, Duration::from_micros(2_500));
        assert!(!timing.warm_up);
    }

    #[test]
    fn test_start_restarts_warm_up() {
        let mut timer = ReadTimer::new();
        timer.start(0);
        timer.tick(10);
        timer.tick(20);
        timer.start(100);
        assert!(timer.tick(150).warm_up);
    }

    #[test]
    fn test_tick_without_start_is_zero() {
        let mut timer = ReadTimer::new();
        assert!(!timer.is_started());
        let timing = timer.tick(5_000);
        assert_eq!(timing.interval, Duration::ZERO);
        assert!(timing.warm_up);
        assert!(timer.is_started());
    }

    #[test]
    fn test_interval_never_negative() {
        let mut timer = ReadTimer::new();
        timer.start(10_000);
        assert_eq!(timer.tick(5_000).interval, Duration::ZERO);
    }
}
