//! Instruction execution pipeline.
//!
//! A step fetches the word at `PC`, advances `PC` by two, decodes, and then
//! dispatches. Faults are precise: every memory span an instruction touches is
//! validated before anything is written, so a faulting instruction changes
//! nothing beyond the `PC` advance. A failed fetch does not advance `PC`.

mod alu;
mod helpers;

pub use alu::{AluOp, AluResult};
pub use helpers::{bcd_digits, register_span_len, sprite_origin};

use crate::decoder::{DecodedInstruction, DecodedOrUnknown, InstructionFields};
use crate::encoding::OpcodeEncoding;
use crate::keypad::KeyWait;
use crate::{
    glyph_address, CoreState, Decoder, FaultCode, Register, RunState, StepOutcome,
    INSTRUCTION_BYTES,
};

/// Outcome of dispatching one decoded instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecuteOutcome {
    /// Instruction completed.
    Retired,
    /// `FX0A` is still waiting; `PC` has been rewound onto it.
    AwaitingKey {
        /// Register that will receive the key.
        register: Register,
    },
    /// Fault was raised during execution.
    Fault {
        /// Fault code.
        cause: FaultCode,
    },
}

/// Executes one decoded instruction against `state`.
///
/// `PC` must already point past the instruction.
pub fn execute_instruction(instr: &DecodedInstruction, state: &mut CoreState) -> ExecuteOutcome {
    match dispatch(instr, state) {
        Ok(outcome) => outcome,
        Err(cause) => ExecuteOutcome::Fault { cause },
    }
}

fn dispatch(
    instr: &DecodedInstruction,
    state: &mut CoreState,
) -> Result<ExecuteOutcome, FaultCode> {
    let InstructionFields {
        x, y, n, nn, nnn, ..
    } = instr.fields;
    let vx = state.regs.v(x);
    let vy = state.regs.v(y);

    match instr.encoding {
        OpcodeEncoding::ClearScreen => state.display.clear(),
        OpcodeEncoding::Return => {
            let addr = state.stack.pop()?;
            state.regs.set_pc(addr);
        }
        OpcodeEncoding::Jump => state.regs.set_pc(nnn),
        OpcodeEncoding::Call => {
            state.stack.push(state.regs.pc())?;
            state.regs.set_pc(nnn);
        }
        OpcodeEncoding::SkipEqImm => skip_if(state, vx == nn),
        OpcodeEncoding::SkipNeImm => skip_if(state, vx != nn),
        OpcodeEncoding::SkipEqReg => skip_if(state, vx == vy),
        OpcodeEncoding::SkipNeReg => skip_if(state, vx != vy),
        OpcodeEncoding::LoadImm => state.regs.set_v(x, nn),
        OpcodeEncoding::AddImm => state.regs.set_v(x, vx.wrapping_add(nn)),
        OpcodeEncoding::Move => execute_alu(state, x, AluOp::Move.evaluate(vx, vy, state.quirks)),
        OpcodeEncoding::Or => execute_alu(state, x, AluOp::Or.evaluate(vx, vy, state.quirks)),
        OpcodeEncoding::And => execute_alu(state, x, AluOp::And.evaluate(vx, vy, state.quirks)),
        OpcodeEncoding::Xor => execute_alu(state, x, AluOp::Xor.evaluate(vx, vy, state.quirks)),
        OpcodeEncoding::AddReg => execute_alu(state, x, AluOp::Add.evaluate(vx, vy, state.quirks)),
        OpcodeEncoding::SubReg => execute_alu(state, x, AluOp::Sub.evaluate(vx, vy, state.quirks)),
        OpcodeEncoding::ShiftRight => {
            execute_alu(state, x, AluOp::ShiftRight.evaluate(vx, vy, state.quirks));
        }
        OpcodeEncoding::SubReverse => {
            execute_alu(state, x, AluOp::SubReverse.evaluate(vx, vy, state.quirks));
        }
        OpcodeEncoding::ShiftLeft => {
            execute_alu(state, x, AluOp::ShiftLeft.evaluate(vx, vy, state.quirks));
        }
        OpcodeEncoding::LoadIndex => state.regs.set_i(nnn),
        OpcodeEncoding::JumpOffset => {
            let v0 = state.regs.v(Register::V0);
            state.regs.set_pc(u16::from(v0) + nnn);
        }
        OpcodeEncoding::Random => {
            let byte = state.random_byte();
            state.regs.set_v(x, byte & nn);
        }
        OpcodeEncoding::Draw => execute_draw(state, vx, vy, n)?,
        OpcodeEncoding::SkipKeyPressed => {
            let pressed = state.keypad.is_pressed(vx);
            skip_if(state, pressed);
        }
        OpcodeEncoding::SkipKeyReleased => {
            let pressed = state.keypad.is_pressed(vx);
            skip_if(state, !pressed);
        }
        OpcodeEncoding::LoadDelay => state.regs.set_v(x, state.delay_timer.get()),
        OpcodeEncoding::WaitKey => return Ok(execute_wait_key(state, x)),
        OpcodeEncoding::SetDelay => state.delay_timer.set(vx),
        OpcodeEncoding::SetSound => state.sound_timer.set(vx),
        OpcodeEncoding::AddIndex => {
            let i = state.regs.i();
            state.regs.set_i(i.wrapping_add(u16::from(vx)));
        }
        OpcodeEncoding::LoadGlyph => state.regs.set_i(glyph_address(vx)),
        OpcodeEncoding::StoreBcd => {
            let digits = bcd_digits(vx);
            state
                .memory
                .span_mut(state.regs.i(), digits.len())?
                .copy_from_slice(&digits);
        }
        OpcodeEncoding::StoreRegisters => {
            let len = register_span_len(x);
            state
                .memory
                .span_mut(state.regs.i(), usize::from(len))?
                .copy_from_slice(state.regs.range_through(x));
            advance_index_after_transfer(state, len);
        }
        OpcodeEncoding::LoadRegisters => {
            let len = register_span_len(x);
            let src = state.memory.span(state.regs.i(), usize::from(len))?;
            state.regs.range_through_mut(x).copy_from_slice(src);
            advance_index_after_transfer(state, len);
        }
    }

    Ok(ExecuteOutcome::Retired)
}

fn skip_if(state: &mut CoreState, condition: bool) {
    if condition {
        state.regs.advance_pc();
    }
}

fn execute_alu(state: &mut CoreState, x: Register, result: AluResult) {
    state.regs.set_v(x, result.value);
    if let Some(flag) = result.flag {
        state.regs.set_flag(flag);
    }
}

fn execute_draw(state: &mut CoreState, vx: u8, vy: u8, rows: u8) -> Result<(), FaultCode> {
    let (x, y) = sprite_origin(vx, vy);
    let sprite = state.memory.span(state.regs.i(), usize::from(rows))?;
    let collided = state.display.draw(x, y, sprite);
    state.regs.set_flag(collided);
    Ok(())
}

fn execute_wait_key(state: &mut CoreState, x: Register) -> ExecuteOutcome {
    match state.keypad.await_key() {
        KeyWait::Committed(key) => {
            state.regs.set_v(x, key);
            ExecuteOutcome::Retired
        }
        KeyWait::Idle | KeyWait::Held(_) => {
            let pc = state.regs.pc();
            state.regs.set_pc(pc.wrapping_sub(INSTRUCTION_BYTES));
            ExecuteOutcome::AwaitingKey { register: x }
        }
    }
}

fn advance_index_after_transfer(state: &mut CoreState, len: u16) {
    if state.quirks.load_store_increments_i {
        let i = state.regs.i();
        state.regs.set_i(i.wrapping_add(len));
    }
}

/// Runs a single fetch/decode/execute step.
///
/// A latched fault is reported again without touching state. Unknown words
/// are skipped as no-ops and counted in diagnostics.
pub fn step_one(state: &mut CoreState) -> StepOutcome {
    if let RunState::FaultLatched(cause) = state.run_state {
        return StepOutcome::Fault { cause };
    }

    let pc = state.regs.pc();
    let word = match state.memory.read_word(pc) {
        Ok(word) => word,
        Err(cause) => return latch_fault(state, cause, pc),
    };
    state.regs.advance_pc();

    let instr = match Decoder::decode(word) {
        DecodedOrUnknown::Instruction(instr) => instr,
        DecodedOrUnknown::Unknown(_) => {
            log::warn!("skipping unknown opcode {word:04X} at {pc:#05x}");
            state.diag.record_unknown_opcode(pc, word);
            state.diag.increment_instruction_count();
            state.run_state = RunState::Running;
            return StepOutcome::UnknownOpcode { opcode: word };
        }
    };

    log::trace!("{pc:#05x}: {word:04X} {}", instr.encoding.mnemonic());

    match execute_instruction(&instr, state) {
        ExecuteOutcome::Retired => {
            state.diag.increment_instruction_count();
            state.run_state = RunState::Running;
            StepOutcome::Retired { opcode: word }
        }
        ExecuteOutcome::AwaitingKey { register } => {
            if !state.run_state.is_awaiting_key() {
                log::debug!("waiting for key into {register:?} at {pc:#05x}");
            }
            state.run_state = RunState::AwaitingKey { register };
            StepOutcome::AwaitingKey { register }
        }
        ExecuteOutcome::Fault { cause } => latch_fault(state, cause, pc),
    }
}

fn latch_fault(state: &mut CoreState, cause: FaultCode, pc: u16) -> StepOutcome {
    log::error!("fault latched at {pc:#05x}: {cause}");
    state.diag.record_fault(cause, pc);
    state.run_state = RunState::FaultLatched(cause);
    StepOutcome::Fault { cause }
}
