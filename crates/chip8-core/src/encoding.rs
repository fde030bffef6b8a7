/// Every documented instruction form.
///
/// `0NNN` (machine-code call) is deliberately absent: it decodes as unknown and
/// executes as a logged no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum OpcodeEncoding {
    ClearScreen,
    Return,
    Jump,
    Call,
    SkipEqImm,
    SkipNeImm,
    SkipEqReg,
    LoadImm,
    AddImm,
    Move,
    Or,
    And,
    Xor,
    AddReg,
    SubReg,
    ShiftRight,
    SubReverse,
    ShiftLeft,
    SkipNeReg,
    LoadIndex,
    JumpOffset,
    Random,
    Draw,
    SkipKeyPressed,
    SkipKeyReleased,
    LoadDelay,
    WaitKey,
    SetDelay,
    SetSound,
    AddIndex,
    LoadGlyph,
    StoreBcd,
    StoreRegisters,
    LoadRegisters,
}

impl OpcodeEncoding {
    /// Conventional assembler mnemonic, used in trace output.
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::ClearScreen => "CLS",
            Self::Return => "RET",
            Self::Jump => "JP addr",
            Self::Call => "CALL addr",
            Self::SkipEqImm => "SE Vx, byte",
            Self::SkipNeImm => "SNE Vx, byte",
            Self::SkipEqReg => "SE Vx, Vy",
            Self::LoadImm => "LD Vx, byte",
            Self::AddImm => "ADD Vx, byte",
            Self::Move => "LD Vx, Vy",
            Self::Or => "OR Vx, Vy",
            Self::And => "AND Vx, Vy",
            Self::Xor => "XOR Vx, Vy",
            Self::AddReg => "ADD Vx, Vy",
            Self::SubReg => "SUB Vx, Vy",
            Self::ShiftRight => "SHR Vx, Vy",
            Self::SubReverse => "SUBN Vx, Vy",
            Self::ShiftLeft => "SHL Vx, Vy",
            Self::SkipNeReg => "SNE Vx, Vy",
            Self::LoadIndex => "LD I, addr",
            Self::JumpOffset => "JP V0, addr",
            Self::Random => "RND Vx, byte",
            Self::Draw => "DRW Vx, Vy, n",
            Self::SkipKeyPressed => "SKP Vx",
            Self::SkipKeyReleased => "SKNP Vx",
            Self::LoadDelay => "LD Vx, DT",
            Self::WaitKey => "LD Vx, K",
            Self::SetDelay => "LD DT, Vx",
            Self::SetSound => "LD ST, Vx",
            Self::AddIndex => "ADD I, Vx",
            Self::LoadGlyph => "LD F, Vx",
            Self::StoreBcd => "LD B, Vx",
            Self::StoreRegisters => "LD [I], Vx",
            Self::LoadRegisters => "LD Vx, [I]",
        }
    }
}

/// Single source-of-truth `(mask, pattern, encoding)` table.
///
/// A word belongs to an encoding when `word & mask == pattern`. Patterns never
/// overlap, so at most one row matches any word; words matching no row are
/// unknown opcodes.
#[rustfmt::skip]
pub const OPCODE_ENCODING_TABLE: &[(u16, u16, OpcodeEncoding)] = &[
    (0xFFFF, 0x00E0, OpcodeEncoding::ClearScreen),
    (0xFFFF, 0x00EE, OpcodeEncoding::Return),
    (0xF000, 0x1000, OpcodeEncoding::Jump),
    (0xF000, 0x2000, OpcodeEncoding::Call),
    (0xF000, 0x3000, OpcodeEncoding::SkipEqImm),
    (0xF000, 0x4000, OpcodeEncoding::SkipNeImm),
    (0xF000, 0x5000, OpcodeEncoding::SkipEqReg),
    (0xF000, 0x6000, OpcodeEncoding::LoadImm),
    (0xF000, 0x7000, OpcodeEncoding::AddImm),
    (0xF00F, 0x8000, OpcodeEncoding::Move),
    (0xF00F, 0x8001, OpcodeEncoding::Or),
    (0xF00F, 0x8002, OpcodeEncoding::And),
    (0xF00F, 0x8003, OpcodeEncoding::Xor),
    (0xF00F, 0x8004, OpcodeEncoding::AddReg),
    (0xF00F, 0x8005, OpcodeEncoding::SubReg),
    (0xF00F, 0x8006, OpcodeEncoding::ShiftRight),
    (0xF00F, 0x8007, OpcodeEncoding::SubReverse),
    (0xF00F, 0x800E, OpcodeEncoding::ShiftLeft),
    (0xF000, 0x9000, OpcodeEncoding::SkipNeReg),
    (0xF000, 0xA000, OpcodeEncoding::LoadIndex),
    (0xF000, 0xB000, OpcodeEncoding::JumpOffset),
    (0xF000, 0xC000, OpcodeEncoding::Random),
    (0xF000, 0xD000, OpcodeEncoding::Draw),
    (0xF0FF, 0xE09E, OpcodeEncoding::SkipKeyPressed),
    (0xF0FF, 0xE0A1, OpcodeEncoding::SkipKeyReleased),
    (0xF0FF, 0xF007, OpcodeEncoding::LoadDelay),
    (0xF0FF, 0xF00A, OpcodeEncoding::WaitKey),
    (0xF0FF, 0xF015, OpcodeEncoding::SetDelay),
    (0xF0FF, 0xF018, OpcodeEncoding::SetSound),
    (0xF0FF, 0xF01E, OpcodeEncoding::AddIndex),
    (0xF0FF, 0xF029, OpcodeEncoding::LoadGlyph),
    (0xF0FF, 0xF033, OpcodeEncoding::StoreBcd),
    (0xF0FF, 0xF055, OpcodeEncoding::StoreRegisters),
    (0xF0FF, 0xF065, OpcodeEncoding::LoadRegisters),
];

/// Classifies a raw instruction word.
#[must_use]
pub fn classify_opcode(word: u16) -> Option<OpcodeEncoding> {
    OPCODE_ENCODING_TABLE
        .iter()
        .find_map(|(mask, pattern, encoding)| (word & mask == *pattern).then_some(*encoding))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{classify_opcode, OpcodeEncoding, OPCODE_ENCODING_TABLE};

    #[test]
    fn table_contains_unique_encodings() {
        let encodings: HashSet<_> = OPCODE_ENCODING_TABLE.iter().map(|row| row.2).collect();
        assert_eq!(encodings.len(), OPCODE_ENCODING_TABLE.len());
        assert_eq!(OPCODE_ENCODING_TABLE.len(), 34);
    }

    #[test]
    fn every_pattern_lies_inside_its_mask() {
        for (mask, pattern, encoding) in OPCODE_ENCODING_TABLE {
            assert_eq!(pattern & !mask, 0, "{encoding:?} pattern has bits outside mask");
        }
    }

    #[test]
    fn every_table_entry_classifies_to_itself() {
        for (_, pattern, encoding) in OPCODE_ENCODING_TABLE {
            assert_eq!(classify_opcode(*pattern), Some(*encoding));
        }
    }

    #[test]
    fn no_word_matches_more_than_one_row() {
        for word in 0u16..=u16::MAX {
            let matches = OPCODE_ENCODING_TABLE
                .iter()
                .filter(|(mask, pattern, _)| word & mask == *pattern)
                .count();
            assert!(matches <= 1, "{word:#06x} matches {matches} rows");
        }
    }

    #[test]
    fn unassigned_selectors_are_unknown() {
        for word in [0x0000, 0x0123, 0x00E1, 0x8008, 0x800F, 0xE000, 0xE19F, 0xF000, 0xF0FF] {
            assert_eq!(classify_opcode(word), None, "{word:#06x} should be unknown");
        }
    }

    #[test]
    fn skip_register_forms_ignore_the_low_nibble() {
        assert_eq!(classify_opcode(0x512F), Some(OpcodeEncoding::SkipEqReg));
        assert_eq!(classify_opcode(0x9123), Some(OpcodeEncoding::SkipNeReg));
    }

    #[test]
    fn mnemonics_are_distinct() {
        let mnemonics: HashSet<_> = OPCODE_ENCODING_TABLE
            .iter()
            .map(|row| row.2.mnemonic())
            .collect();
        assert_eq!(mnemonics.len(), OPCODE_ENCODING_TABLE.len());
    }
}
