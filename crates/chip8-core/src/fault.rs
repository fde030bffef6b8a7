use thiserror::Error;

/// Fault classes used for diagnostics aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum FaultClass {
    /// Call stack depth violation.
    Stack,
    /// Fetch or data access outside the 4 KiB address space.
    Memory,
}

/// Structural faults raised while executing a program.
///
/// Every fault is precise: the faulting instruction commits nothing beyond the
/// program-counter advance that precedes dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
pub enum FaultCode {
    /// `2NNN` executed with all 16 stack frames in use.
    #[error("call stack overflow")]
    StackOverflow = 0x01,
    /// `00EE` executed with an empty call stack.
    #[error("return with empty call stack")]
    StackUnderflow = 0x02,
    /// Sprite fetch, BCD store or register dump/load left the address space.
    #[error("data access outside 0x000-0xFFF")]
    MemoryOutOfBounds = 0x03,
    /// Instruction fetch at a program counter whose word does not fit in memory.
    #[error("instruction fetch outside 0x000-0xFFF")]
    FetchOutOfBounds = 0x04,
}

impl FaultCode {
    /// Converts a fault code to its stable byte value.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Converts a stable byte value back into a fault code.
    #[must_use]
    pub const fn from_u8(code: u8) -> Option<Self> {
        match code {
            0x01 => Some(Self::StackOverflow),
            0x02 => Some(Self::StackUnderflow),
            0x03 => Some(Self::MemoryOutOfBounds),
            0x04 => Some(Self::FetchOutOfBounds),
            _ => None,
        }
    }

    /// Returns the diagnostics fault class for this fault code.
    #[must_use]
    pub const fn class(self) -> FaultClass {
        match self {
            Self::StackOverflow | Self::StackUnderflow => FaultClass::Stack,
            Self::MemoryOutOfBounds | Self::FetchOutOfBounds => FaultClass::Memory,
        }
    }

    /// Stack faults mean the program is malformed or needs an extension we do
    /// not implement; resuming after one is never meaningful.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self.class(), FaultClass::Stack)
    }
}
