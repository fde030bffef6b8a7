//! Public host-facing API contracts for embedding the interpreter core.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{
    CallStack, Diagnostics, Display, FaultCode, FrameBuffer, Keypad, Memory, Register,
    RegisterFile, RunState, Timer, DEFAULT_INSTRUCTIONS_PER_TICK, FONT_SPRITES, FONT_START,
};

/// Default bound on ticks a single [`Scheduler::advance`](crate::Scheduler::advance)
/// will run after the host falls behind.
pub const DEFAULT_MAX_CATCH_UP_TICKS: u32 = 4;

/// Compatibility toggles for opcodes whose behavior differs between
/// historical interpreters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(default)
)]
#[allow(clippy::struct_excessive_bools)]
pub struct Quirks {
    /// `8XY6`/`8XYE` copy `Vy` into `Vx` before shifting. When false, `Vx` is
    /// shifted in place and `Vy` is ignored.
    pub shift_uses_vy: bool,
    /// `FX55`/`FX65` leave `I` advanced by `X + 1`. When false, `I` is unchanged.
    pub load_store_increments_i: bool,
    /// `8XY1`/`8XY2`/`8XY3` clear `VF`. When false, `VF` is untouched.
    pub logic_resets_vf: bool,
}

impl Quirks {
    /// Original COSMAC VIP behavior; the default.
    pub const COSMAC_VIP: Self = Self {
        shift_uses_vy: true,
        load_store_increments_i: true,
        logic_resets_vf: true,
    };

    /// CHIP-48 lineage behavior expected by many later programs.
    pub const CHIP48: Self = Self {
        shift_uses_vy: false,
        load_store_increments_i: false,
        logic_resets_vf: false,
    };
}

impl Default for Quirks {
    fn default() -> Self {
        Self::COSMAC_VIP
    }
}

/// Top-level immutable configuration for a core instance.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(default)
)]
pub struct CoreConfig {
    /// Instruction budget per 60 Hz tick.
    pub instructions_per_tick: u16,
    /// Opcode compatibility toggles.
    pub quirks: Quirks,
    /// Seed for `CXNN`; `None` seeds from OS entropy.
    pub rng_seed: Option<u64>,
    /// Most ticks the real-time scheduler runs for one host frame.
    pub max_catch_up_ticks: u32,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            instructions_per_tick: DEFAULT_INSTRUCTIONS_PER_TICK,
            quirks: Quirks::default(),
            rng_seed: None,
            max_catch_up_ticks: DEFAULT_MAX_CATCH_UP_TICKS,
        }
    }
}

/// Complete interpreter state owned by one host thread.
#[derive(Clone)]
pub struct CoreState {
    /// 4 KiB address space holding font and program.
    pub memory: Memory,
    /// `V0..VF`, `I` and `PC`.
    pub regs: RegisterFile,
    /// Return-address stack.
    pub stack: CallStack,
    /// Delay timer (`FX07`/`FX15`).
    pub delay_timer: Timer,
    /// Sound timer (`FX18`); audio is gated on it being non-zero.
    pub sound_timer: Timer,
    /// 64x32 framebuffer.
    pub display: Display,
    /// Key levels and key-wait latch.
    pub keypad: Keypad,
    /// Current execution state.
    pub run_state: RunState,
    /// Active opcode compatibility toggles. [`crate::run_tick`] overwrites
    /// them from the config it is given.
    pub quirks: Quirks,
    /// Execution counters.
    pub diag: Diagnostics,
    rng: StdRng,
}

impl Default for CoreState {
    fn default() -> Self {
        Self::with_config(&CoreConfig::default())
    }
}

impl CoreState {
    /// Creates a core with the built-in font loaded and `PC = 0x200`.
    #[must_use]
    pub fn with_config(config: &CoreConfig) -> Self {
        let rng = config
            .rng_seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);

        let mut memory = Memory::new();
        if let Ok(font) = memory.span_mut(FONT_START, FONT_SPRITES.len()) {
            font.copy_from_slice(&FONT_SPRITES);
        }

        Self {
            memory,
            regs: RegisterFile::default(),
            stack: CallStack::new(),
            delay_timer: Timer::new(),
            sound_timer: Timer::new(),
            display: Display::new(),
            keypad: Keypad::new(),
            run_state: RunState::Running,
            quirks: config.quirks,
            diag: Diagnostics::default(),
            rng,
        }
    }

    /// Restores registers, stack, timers, display, keys, run state and
    /// counters. Memory, including the loaded font and program, is preserved.
    pub fn reset(&mut self) {
        self.regs = RegisterFile::default();
        self.stack = CallStack::new();
        self.delay_timer = Timer::new();
        self.sound_timer = Timer::new();
        self.display.clear();
        self.keypad.release_all();
        self.run_state = RunState::Running;
        self.diag.reset();
    }

    /// Returns true while the sound timer is running.
    #[must_use]
    pub const fn sound_active(&self) -> bool {
        self.sound_timer.is_active()
    }

    /// Immutable copy of the framebuffer.
    #[must_use]
    pub const fn frame(&self) -> FrameBuffer {
        self.display.snapshot()
    }

    /// Reports a key level change from the host input source.
    pub fn set_key(&mut self, key: u8, pressed: bool) {
        self.keypad.set_pressed(key, pressed);
    }

    /// Currently latched fault, if any.
    #[must_use]
    pub const fn latched_fault(&self) -> Option<FaultCode> {
        self.run_state.latched_fault()
    }

    /// Drops a latched fault and returns it.
    ///
    /// For faults raised while executing, `PC` already points past the
    /// faulting instruction, so stepping resumes there.
    /// [`FaultCode::FetchOutOfBounds`] leaves `PC` on the unreadable address
    /// and the next step faults again; use [`CoreState::reset`] instead.
    pub fn clear_fault(&mut self) -> Option<FaultCode> {
        let cleared = self.run_state.latched_fault();
        if let Some(cause) = cleared {
            log::debug!("clearing latched fault: {cause}");
            self.run_state = RunState::Running;
        }
        cleared
    }

    pub(crate) fn random_byte(&mut self) -> u8 {
        self.rng.gen()
    }
}

impl std::fmt::Debug for CoreState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoreState")
            .field("regs", &self.regs)
            .field("stack", &self.stack)
            .field("delay_timer", &self.delay_timer.get())
            .field("sound_timer", &self.sound_timer.get())
            .field("run_state", &self.run_state)
            .field("quirks", &self.quirks)
            .field("diag", &self.diag)
            .finish_non_exhaustive()
    }
}

/// Output status from one step attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepOutcome {
    /// A documented instruction retired.
    Retired {
        /// Raw instruction word.
        opcode: u16,
    },
    /// An unassigned word was skipped as a no-op.
    UnknownOpcode {
        /// Raw instruction word.
        opcode: u16,
    },
    /// `FX0A` has not seen a key press-and-release yet; `PC` still points at it.
    AwaitingKey {
        /// Register that will receive the key.
        register: Register,
    },
    /// A fault was raised now or is still latched from earlier.
    Fault {
        /// Fault code.
        cause: FaultCode,
    },
}

/// Why a tick's instruction batch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunStop {
    /// The per-tick instruction budget was used up.
    BudgetExhausted,
    /// `FX0A` stalled; it is re-decoded on the next tick.
    AwaitingKey,
    /// A fault is latched.
    Fault(FaultCode),
}

/// Aggregated outcome from one scheduler tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunOutcome {
    /// Instructions executed (retired or skipped as unknown) this tick.
    pub steps: u32,
    /// Reason the batch ended.
    pub stop: RunStop,
}

/// Presentation sink fed once per host frame.
pub trait FrameSink {
    /// Receives the current framebuffer and the audio gate.
    fn present(&mut self, frame: &FrameBuffer, sound_active: bool);
}
