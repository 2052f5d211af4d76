//! Blocking timer backed by `std::thread::sleep`

use crate::platform::{traits::TimerInterface, Result};
use std::thread;
use std::time::{Duration, Instant};

/// Timer for the thread that owns a device
#[derive(Debug, Clone, Copy)]
pub struct StdTimer {
    origin: Instant,
}

impl StdTimer {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for StdTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerInterface for StdTimer {
    fn delay_us(&mut self, us: u32) -> Result<()> {
        thread::sleep(Duration::from_micros(us as u64));
        Ok(())
    }

    fn delay_ms(&mut self, ms: u32) -> Result<()> {
        thread::sleep(Duration::from_millis(ms as u64));
        Ok(())
    }

    fn now_us(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_micros()).unwrap_or(u64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_advances_time() {
        let mut timer = StdTimer::new();
        let before = timer.now_us();
        timer.delay_ms(2).unwrap();
        assert!(timer.now_us() >= before + 2_000);
    }
}
