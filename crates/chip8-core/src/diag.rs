//! Execution counters for hosts that want to surface interpreter health.

use crate::{FaultClass, FaultCode};

/// A fault occurrence and the instruction that raised it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct FaultRecord {
    /// Raised fault.
    pub code: FaultCode,
    /// Address of the faulting instruction.
    pub pc: u16,
}

/// An unknown opcode that was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct UnknownOpcodeRecord {
    /// Address the word was fetched from.
    pub pc: u16,
    /// Raw instruction word.
    pub opcode: u16,
}

/// Saturating counters updated by the executor and scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Diagnostics {
    /// Instructions retired or skipped as unknown.
    pub instruction_count: u64,
    /// Scheduler ticks run.
    pub tick_count: u64,
    /// Unknown opcodes skipped.
    pub unknown_opcode_count: u32,
    /// Most recent unknown opcode.
    pub last_unknown_opcode: Option<UnknownOpcodeRecord>,
    /// Stack-class faults raised.
    pub fault_count_stack: u16,
    /// Memory-class faults raised.
    pub fault_count_memory: u16,
    /// Most recent fault.
    pub last_fault: Option<FaultRecord>,
}

impl Diagnostics {
    /// Records a fault occurrence and bumps its class counter.
    pub fn record_fault(&mut self, code: FaultCode, pc: u16) {
        self.last_fault = Some(FaultRecord { code, pc });
        match code.class() {
            FaultClass::Stack => {
                self.fault_count_stack = self.fault_count_stack.saturating_add(1);
            }
            FaultClass::Memory => {
                self.fault_count_memory = self.fault_count_memory.saturating_add(1);
            }
        }
    }

    /// Records a skipped unknown opcode.
    pub fn record_unknown_opcode(&mut self, pc: u16, opcode: u16) {
        self.unknown_opcode_count = self.unknown_opcode_count.saturating_add(1);
        self.last_unknown_opcode = Some(UnknownOpcodeRecord { pc, opcode });
    }

    /// Increments the instruction counter.
    pub const fn increment_instruction_count(&mut self) {
        self.instruction_count = self.instruction_count.saturating_add(1);
    }

    /// Increments the tick counter.
    pub const fn increment_tick_count(&mut self) {
        self.tick_count = self.tick_count.saturating_add(1);
    }

    /// Total faults across every class.
    #[must_use]
    pub const fn fault_count(&self) -> u32 {
        self.fault_count_stack as u32 + self.fault_count_memory as u32
    }

    /// Resets all counters.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::{Diagnostics, FaultRecord, UnknownOpcodeRecord};
    use crate::FaultCode;

    #[test]
    fn fault_recording_updates_class_counters_and_last_fault() {
        let mut diag = Diagnostics::default();
        diag.record_fault(FaultCode::StackOverflow, 0x0204);
        diag.record_fault(FaultCode::MemoryOutOfBounds, 0x0300);
        diag.record_fault(FaultCode::FetchOutOfBounds, 0x0FFF);

        assert_eq!(diag.fault_count_stack, 1);
        assert_eq!(diag.fault_count_memory, 2);
        assert_eq!(diag.fault_count(), 3);
        assert_eq!(
            diag.last_fault,
            Some(FaultRecord {
                code: FaultCode::FetchOutOfBounds,
                pc: 0x0FFF,
            })
        );
    }

    #[test]
    fn unknown_opcode_recording_keeps_latest() {
        let mut diag = Diagnostics::default();
        diag.record_unknown_opcode(0x0200, 0x0123);
        diag.record_unknown_opcode(0x0202, 0xE1FF);
        assert_eq!(diag.unknown_opcode_count, 2);
        assert_eq!(
            diag.last_unknown_opcode,
            Some(UnknownOpcodeRecord {
                pc: 0x0202,
                opcode: 0xE1FF,
            })
        );
    }

    #[test]
    fn counters_saturate() {
        let mut diag = Diagnostics {
            instruction_count: u64::MAX,
            fault_count_stack: u16::MAX,
            ..Diagnostics::default()
        };
        diag.increment_instruction_count();
        diag.record_fault(FaultCode::StackUnderflow, 0);
        assert_eq!(diag.instruction_count, u64::MAX);
        assert_eq!(diag.fault_count_stack, u16::MAX);
    }

    #[test]
    fn reset_clears_everything() {
        let mut diag = Diagnostics::default();
        diag.increment_tick_count();
        diag.record_unknown_opcode(0x200, 0x0000);
        diag.reset();
        assert_eq!(diag, Diagnostics::default());
    }
}
