//! Time sources for the loop: elapsed milliseconds for cooldowns plus the
//! end-of-frame wait that holds the loop to its tick rate.

use std::time::{Duration, Instant};

pub trait Clock {
    /// Monotonic milliseconds since the clock was created.
    fn now_ms(&self) -> u64;
    /// Block until the current frame's time slot is used up.
    fn pace(&mut self);
}

/// Wall clock that sleeps out any surplus frame time.
#[derive(Debug)]
pub struct FrameClock {
    start: Instant,
    frame_start: Instant,
    frame: Duration,
}

impl FrameClock {
    pub fn new(tick_rate: u32) -> Self {
        let now = Instant::now();
        Self {
            start: now,
            frame_start: now,
            frame: Duration::from_secs(1) / tick_rate.max(1),
        }
    }
}

impl Clock for FrameClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn pace(&mut self) {
        let elapsed = self.frame_start.elapsed();
        if elapsed < self.frame {
            std::thread::sleep(self.frame - elapsed);
        }
        self.frame_start = Instant::now();
    }
}

/// Simulated clock: time is derived from the number of paced ticks, so runs
/// are reproducible and never sleep.
#[derive(Debug, Clone)]
pub struct TickClock {
    ticks: u64,
    tick_rate: u32,
}

impl TickClock {
    pub fn new(tick_rate: u32) -> Self {
        Self {
            ticks: 0,
            tick_rate: tick_rate.max(1),
        }
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl Clock for TickClock {
    fn now_ms(&self) -> u64 {
        self.ticks * 1000 / self.tick_rate as u64
    }

    fn pace(&mut self) {
        self.ticks += 1;
    }
}
