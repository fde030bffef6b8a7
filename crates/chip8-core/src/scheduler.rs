//! 60 Hz tick loop and wall-clock pacing.
//!
//! [`run_tick`] is the deterministic unit: decrement both timers once, then run
//! up to the configured instruction budget. [`Scheduler`] converts elapsed host
//! time into whole ticks, bounding catch-up after a stall.

use std::time::Duration;

use crate::{
    step_one, CoreConfig, CoreState, FaultCode, FrameSink, RunOutcome, RunStop, StepOutcome,
    FRAME_DURATION,
};

/// Runs one 60 Hz tick.
///
/// `config.quirks` replaces the state's quirks before stepping, so the config
/// passed here always decides opcode semantics. Timers are decremented before
/// any instruction runs, so a value written by `FX15`/`FX18` during this tick
/// is first observed one tick later. The batch ends early on `FX0A` or a fault.
pub fn run_tick(state: &mut CoreState, config: &CoreConfig) -> RunOutcome {
    state.quirks = config.quirks;
    state.delay_timer.tick();
    state.sound_timer.tick();
    state.diag.increment_tick_count();

    let budget = u32::from(config.instructions_per_tick);
    let mut steps = 0;
    while steps < budget {
        match step_one(state) {
            StepOutcome::Retired { .. } | StepOutcome::UnknownOpcode { .. } => steps += 1,
            StepOutcome::AwaitingKey { .. } => {
                return RunOutcome {
                    steps,
                    stop: RunStop::AwaitingKey,
                };
            }
            StepOutcome::Fault { cause } => {
                return RunOutcome {
                    steps,
                    stop: RunStop::Fault(cause),
                };
            }
        }
    }

    RunOutcome {
        steps,
        stop: RunStop::BudgetExhausted,
    }
}

/// Accumulates elapsed wall time and reports how many fixed periods passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameClock {
    period: Duration,
    carry: Duration,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(FRAME_DURATION)
    }
}

impl FrameClock {
    /// Creates a clock with the given tick period. A zero period is treated
    /// as one nanosecond.
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_nanos(1)),
            carry: Duration::ZERO,
        }
    }

    /// Tick period.
    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Time accumulated toward the next tick.
    #[must_use]
    pub const fn carry(&self) -> Duration {
        self.carry
    }

    /// Adds `elapsed` and returns the number of whole periods now due. The
    /// remainder carries into the next call.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.carry = self.carry.saturating_add(elapsed);
        let due = self.carry.as_nanos() / self.period.as_nanos();
        let due = u32::try_from(due).unwrap_or(u32::MAX);
        self.carry = self
            .carry
            .saturating_sub(self.period.saturating_mul(due));
        due
    }

    /// Drops any accumulated time.
    pub const fn reset(&mut self) {
        self.carry = Duration::ZERO;
    }
}

/// Real-time driver that paces [`run_tick`] against host time.
#[derive(Debug, Clone)]
pub struct Scheduler {
    config: CoreConfig,
    clock: FrameClock,
}

impl Scheduler {
    /// Creates a scheduler running at [`FRAME_DURATION`] per tick.
    #[must_use]
    pub fn new(config: CoreConfig) -> Self {
        Self {
            config,
            clock: FrameClock::default(),
        }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Runs the ticks due after `elapsed` host time, at most
    /// `max_catch_up_ticks` of them, then presents one frame if any tick ran.
    /// Returns the number of ticks run.
    ///
    /// # Errors
    ///
    /// Returns the latched [`FaultCode`] when the core is or becomes
    /// fault-latched. The frame reached before the fault is still presented.
    pub fn advance(
        &mut self,
        state: &mut CoreState,
        elapsed: Duration,
        sink: &mut dyn FrameSink,
    ) -> Result<u32, FaultCode> {
        if let Some(cause) = state.latched_fault() {
            return Err(cause);
        }

        let due = self.clock.advance(elapsed);
        let ticks = due.min(self.config.max_catch_up_ticks);
        if due > ticks {
            log::debug!("dropping {} late ticks", due - ticks);
        }

        for tick in 0..ticks {
            if let RunStop::Fault(cause) = run_tick(state, &self.config).stop {
                sink.present(&state.frame(), state.sound_active());
                log::error!("scheduler stopped on fault after {} ticks: {cause}", tick + 1);
                return Err(cause);
            }
        }

        if ticks > 0 {
            sink.present(&state.frame(), state.sound_active());
        }
        Ok(ticks)
    }
}
