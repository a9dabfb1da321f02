//! Monotonic-sleep tick timer.
//!
//! Satisfies [`TickTimer`] with `std::thread::sleep`, which never returns
//! early.  Used for host simulation and anywhere a dedicated control task
//! may simply sleep; the ESP-IDF build uses the one-shot hardware timer in
//! [`HardwareAdapter`](super::hardware::HardwareAdapter) instead.

use std::time::{Duration, Instant};

use crate::app::ports::TickTimer;
use crate::timing::TickLength;

pub struct SleepTickTimer {
    clock_hz: u32,
    slept: Duration,
}

impl SleepTickTimer {
    pub fn new(clock_hz: u32) -> Self {
        Self {
            clock_hz,
            slept: Duration::ZERO,
        }
    }

    /// Total wall time actually spent in [`TickTimer::delay_ticks`].
    pub fn slept(&self) -> Duration {
        self.slept
    }
}

impl TickTimer for SleepTickTimer {
    fn delay_ticks(&mut self, ticks: u32, tick: TickLength) {
        let span = tick.span(ticks, self.clock_hz);
        if span.is_zero() {
            return;
        }
        let start = Instant::now();
        std::thread::sleep(span);
        self.slept += start.elapsed();
    }
}
