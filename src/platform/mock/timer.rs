//! Mock Timer implementation for testing

use crate::platform::{traits::TimerInterface, Result};
use std::vec::Vec;

/// Mock Timer implementation
///
/// Uses simulated time for delays and records every requested delay so tests
/// can check settle times without sleeping.
#[derive(Debug, Default)]
pub struct MockTimer {
    now_us: u64,
    delays_us: Vec<u64>,
}

impl MockTimer {
    /// Create a new mock timer
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays requested so far, in microseconds
    pub fn delays_us(&self) -> &[u64] {
        &self.delays_us
    }

    /// Sum of all requested delays, in milliseconds
    pub fn total_delay_ms(&self) -> u64 {
        self.delays_us.iter().sum::<u64>() / 1000
    }
}

impl TimerInterface for MockTimer {
    fn delay_us(&mut self, us: u32) -> Result<()> {
        self.now_us = self.now_us.wrapping_add(us as u64);
        self.delays_us.push(us as u64);
        Ok(())
    }

    fn delay_ms(&mut self, ms: u32) -> Result<()> {
        self.delay_us(ms.saturating_mul(1000))
    }

    fn now_us(&self) -> u64 {
        self.now_us
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_timer_delay_us() {
        let mut timer = MockTimer::new();
        assert_eq!(timer.now_us(), 0);

        timer.delay_us(1000).unwrap();
        timer.delay_us(500).unwrap();
        assert_eq!(timer.now_us(), 1500);
        assert_eq!(timer.delays_us(), &[1000, 500]);
    }

    #[test]
    fn test_mock_timer_delay_ms() {
        let mut timer = MockTimer::new();
        timer.delay_ms(50).unwrap();
        timer.delay_ms(50).unwrap();
        assert_eq!(timer.now_ms(), 100);
        assert_eq!(timer.total_delay_ms(), 100);
    }
}
