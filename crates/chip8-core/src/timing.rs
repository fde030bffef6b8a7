use std::time::Duration;

/// Fixed timer and display cadence.
pub const TIMER_HZ: u32 = 60;

/// Wall-clock length of one timer tick.
pub const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TIMER_HZ as u64);

/// Reference number of instructions executed per tick (900 Hz at 60 Hz).
pub const DEFAULT_INSTRUCTIONS_PER_TICK: u16 = 15;

/// 8-bit countdown counter decremented once per tick and floored at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Timer {
    remaining: u8,
}

impl Timer {
    /// Creates a stopped timer.
    #[must_use]
    pub const fn new() -> Self {
        Self { remaining: 0 }
    }

    /// Decrements by one unless already at zero.
    pub const fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    /// Current counter value.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.remaining
    }

    /// Loads a new counter value.
    pub const fn set(&mut self, ticks: u8) {
        self.remaining = ticks;
    }

    /// Returns true while the counter is above zero.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.remaining > 0
    }
}
