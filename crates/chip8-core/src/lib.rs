//! CHIP-8 interpreter core.
//!
//! Host-agnostic machine state plus a deterministic 60 Hz tick loop. Hosts
//! feed key levels in through [`CoreState::set_key`], drive time through
//! [`run_tick`] or [`Scheduler::advance`], and read the framebuffer and audio
//! gate back out.

/// Address space, font image and bounds checks.
pub mod memory;
pub use memory::{
    glyph_address, new_address_space, validate_fetch, validate_span, Memory, FONT_BYTES,
    FONT_GLYPH_BYTES, FONT_SPRITES, FONT_START, INSTRUCTION_BYTES, MAX_ADDRESS, MAX_PROGRAM_BYTES,
    MEMORY_BYTES, PROGRAM_START,
};

/// Execution counters.
pub mod diag;
pub use diag::{Diagnostics, FaultRecord, UnknownOpcodeRecord};

/// Public host-facing API contract and integration types.
pub mod api;
pub use api::{
    CoreConfig, CoreState, FrameSink, Quirks, RunOutcome, RunStop, StepOutcome,
    DEFAULT_MAX_CATCH_UP_TICKS,
};

/// Registers, call stack and run state.
pub mod state;
pub use state::{CallStack, Register, RegisterFile, RunState, REGISTER_COUNT, STACK_DEPTH};

/// Opcode classification table.
pub mod encoding;
pub use encoding::{classify_opcode, OpcodeEncoding, OPCODE_ENCODING_TABLE};

/// Instruction decode with field extraction.
pub mod decoder;
pub use decoder::{DecodedInstruction, DecodedOrUnknown, Decoder, InstructionFields};

/// Fault taxonomy.
pub mod fault;
pub use fault::{FaultClass, FaultCode};

/// Timer rate, frame period and the countdown timers.
pub mod timing;
pub use timing::{Timer, DEFAULT_INSTRUCTIONS_PER_TICK, FRAME_DURATION, TIMER_HZ};

/// Monochrome framebuffer.
pub mod display;
pub use display::{Display, FrameBuffer, DISPLAY_HEIGHT, DISPLAY_WIDTH, MAX_SPRITE_ROWS};

/// Hex keypad and key-wait latch.
pub mod keypad;
pub use keypad::{KeyWait, Keypad, KEY_COUNT};

/// Program and font loading.
pub mod loader;
pub use loader::{load_font, load_program, load_program_from_reader, LoadError};

/// Instruction execution pipeline.
pub mod execute;
pub use execute::{execute_instruction, step_one, AluOp, ExecuteOutcome};

/// Tick loop and real-time pacing.
pub mod scheduler;
pub use scheduler::{run_tick, FrameClock, Scheduler};

#[cfg(test)]
use env_logger as _;
#[cfg(test)]
use proptest as _;
#[cfg(test)]
use serde_json as _;
