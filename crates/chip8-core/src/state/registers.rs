use crate::memory::PROGRAM_START;

/// Number of general-purpose registers (`V0..VF`).
pub const REGISTER_COUNT: usize = 16;

/// General-purpose register identifier.
///
/// `VF` doubles as the flag output of arithmetic, shift and draw opcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Register {
    V0 = 0x0,
    V1 = 0x1,
    V2 = 0x2,
    V3 = 0x3,
    V4 = 0x4,
    V5 = 0x5,
    V6 = 0x6,
    V7 = 0x7,
    V8 = 0x8,
    V9 = 0x9,
    VA = 0xA,
    VB = 0xB,
    VC = 0xC,
    VD = 0xD,
    VE = 0xE,
    VF = 0xF,
}

impl Register {
    /// Ordered list of all registers.
    pub const ALL: [Self; REGISTER_COUNT] = [
        Self::V0,
        Self::V1,
        Self::V2,
        Self::V3,
        Self::V4,
        Self::V5,
        Self::V6,
        Self::V7,
        Self::V8,
        Self::V9,
        Self::VA,
        Self::VB,
        Self::VC,
        Self::VD,
        Self::VE,
        Self::VF,
    ];

    /// Flag register alias.
    pub const FLAG: Self = Self::VF;

    /// Returns the array index for this register (`0..=15`).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Decodes the low nibble of `bits` into a register. Every nibble names a
    /// register, so this never fails.
    #[must_use]
    pub const fn from_nibble(bits: u8) -> Self {
        Self::ALL[(bits & 0x0F) as usize]
    }
}

/// `V0..VF`, the index register `I` and the program counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterFile {
    v: [u8; REGISTER_COUNT],
    i: u16,
    pc: u16,
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
        }
    }
}

impl RegisterFile {
    /// Reads a general-purpose register.
    #[must_use]
    pub const fn v(&self, reg: Register) -> u8 {
        self.v[reg.index()]
    }

    /// Writes a general-purpose register.
    pub const fn set_v(&mut self, reg: Register, value: u8) {
        self.v[reg.index()] = value;
    }

    /// Reads `VF`.
    #[must_use]
    pub const fn flag(&self) -> u8 {
        self.v(Register::FLAG)
    }

    /// Writes `VF` as 1 or 0.
    pub const fn set_flag(&mut self, set: bool) {
        self.set_v(Register::FLAG, set as u8);
    }

    /// Registers `V0..=last` in order.
    #[must_use]
    pub fn range_through(&self, last: Register) -> &[u8] {
        &self.v[..=last.index()]
    }

    /// Mutable registers `V0..=last` in order.
    pub fn range_through_mut(&mut self, last: Register) -> &mut [u8] {
        &mut self.v[..=last.index()]
    }

    /// Reads the index register `I`.
    #[must_use]
    pub const fn i(&self) -> u16 {
        self.i
    }

    /// Writes the index register `I`.
    pub const fn set_i(&mut self, value: u16) {
        self.i = value;
    }

    /// Reads the program counter.
    #[must_use]
    pub const fn pc(&self) -> u16 {
        self.pc
    }

    /// Writes the program counter.
    pub const fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    /// Moves the program counter past one instruction word.
    pub const fn advance_pc(&mut self) {
        self.pc = self.pc.wrapping_add(2);
    }
}
