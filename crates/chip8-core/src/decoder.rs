//! Instruction decoder.
//!
//! Splits a fetched word into its nibble fields and classifies it against
//! [`OPCODE_ENCODING_TABLE`](crate::encoding::OPCODE_ENCODING_TABLE).

use crate::encoding::{classify_opcode, OpcodeEncoding};
use crate::Register;

/// Nibble fields of one instruction word.
///
/// Layout: `op` is bits 15..12, `x` bits 11..8, `y` bits 7..4, `n` bits 3..0;
/// `nn` is the low byte and `nnn` the low 12 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstructionFields {
    /// Raw instruction word.
    pub raw: u16,
    /// High nibble.
    pub op: u8,
    /// Register named by bits 11..8.
    pub x: Register,
    /// Register named by bits 7..4.
    pub y: Register,
    /// Low nibble.
    pub n: u8,
    /// Low byte.
    pub nn: u8,
    /// Low 12 bits.
    pub nnn: u16,
}

impl InstructionFields {
    /// Extracts every field of `word`.
    #[must_use]
    pub const fn from_word(word: u16) -> Self {
        let [hi, lo] = word.to_be_bytes();
        Self {
            raw: word,
            op: hi >> 4,
            x: Register::from_nibble(hi),
            y: Register::from_nibble(lo >> 4),
            n: lo & 0x0F,
            nn: lo,
            nnn: word & 0x0FFF,
        }
    }
}

/// Classified instruction ready for execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecodedInstruction {
    /// Instruction form.
    pub encoding: OpcodeEncoding,
    /// Operand fields.
    pub fields: InstructionFields,
}

/// Result of decoding an instruction word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodedOrUnknown {
    /// Word matched a documented form.
    Instruction(DecodedInstruction),
    /// Word matched nothing and will execute as a no-op.
    Unknown(InstructionFields),
}

impl DecodedOrUnknown {
    /// Returns the decoded instruction if present.
    #[must_use]
    pub const fn instruction(self) -> Option<DecodedInstruction> {
        match self {
            Self::Instruction(instr) => Some(instr),
            Self::Unknown(_) => None,
        }
    }

    /// Fields of the word regardless of classification.
    #[must_use]
    pub const fn fields(self) -> InstructionFields {
        match self {
            Self::Instruction(instr) => instr.fields,
            Self::Unknown(fields) => fields,
        }
    }
}

/// Stateless instruction decoder.
pub struct Decoder;

impl Decoder {
    /// Decodes a 16-bit instruction word. Every word decodes; unassigned
    /// selector combinations come back as [`DecodedOrUnknown::Unknown`].
    #[must_use]
    pub fn decode(word: u16) -> DecodedOrUnknown {
        let fields = InstructionFields::from_word(word);
        match classify_opcode(word) {
            Some(encoding) => DecodedOrUnknown::Instruction(DecodedInstruction { encoding, fields }),
            None => DecodedOrUnknown::Unknown(fields),
        }
    }
}
