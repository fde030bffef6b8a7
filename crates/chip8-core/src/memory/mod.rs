//! Flat 4 KiB address space holding the font glyphs and the loaded program.

/// Span validation for fetch and data accesses.
pub mod access;
/// Built-in hexadecimal digit glyphs.
pub mod font;

pub use access::{validate_fetch, validate_span, INSTRUCTION_BYTES};
pub use font::{glyph_address, FONT_BYTES, FONT_GLYPH_BYTES, FONT_SPRITES, FONT_START};

use crate::FaultCode;

/// Size in bytes of the architectural address space.
pub const MEMORY_BYTES: usize = 4096;
/// Highest valid address.
pub const MAX_ADDRESS: u16 = 0x0FFF;
/// Address where programs are loaded and execution begins.
pub const PROGRAM_START: u16 = 0x200;
/// Largest program that fits between `PROGRAM_START` and the end of memory.
pub const MAX_PROGRAM_BYTES: usize = MEMORY_BYTES - PROGRAM_START as usize;

/// Allocates a zeroed 4 KiB backing store.
#[must_use]
pub fn new_address_space() -> Box<[u8]> {
    vec![0; MEMORY_BYTES].into_boxed_slice()
}

/// Byte-addressable interpreter memory.
///
/// All accessors are bounds checked and report [`FaultCode::MemoryOutOfBounds`]
/// instead of touching anything past `0xFFF`.
#[derive(Clone, PartialEq, Eq)]
pub struct Memory {
    bytes: Box<[u8]>,
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    /// Creates zeroed memory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bytes: new_address_space(),
        }
    }

    /// Reads one byte.
    ///
    /// # Errors
    ///
    /// Returns [`FaultCode::MemoryOutOfBounds`] when `addr > 0xFFF`.
    pub fn read(&self, addr: u16) -> Result<u8, FaultCode> {
        validate_span(addr, 1)?;
        Ok(self.bytes[usize::from(addr)])
    }

    /// Writes one byte.
    ///
    /// # Errors
    ///
    /// Returns [`FaultCode::MemoryOutOfBounds`] when `addr > 0xFFF`.
    pub fn write(&mut self, addr: u16, value: u8) -> Result<(), FaultCode> {
        validate_span(addr, 1)?;
        self.bytes[usize::from(addr)] = value;
        Ok(())
    }

    /// Fetches the big-endian instruction word at `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`FaultCode::FetchOutOfBounds`] when `addr + 1 > 0xFFF`.
    pub fn read_word(&self, addr: u16) -> Result<u16, FaultCode> {
        validate_fetch(addr)?;
        let at = usize::from(addr);
        Ok(u16::from_be_bytes([self.bytes[at], self.bytes[at + 1]]))
    }

    /// Borrows `len` bytes starting at `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`FaultCode::MemoryOutOfBounds`] when the span leaves memory.
    pub fn span(&self, addr: u16, len: usize) -> Result<&[u8], FaultCode> {
        validate_span(addr, len)?;
        let at = usize::from(addr);
        Ok(&self.bytes[at..at + len])
    }

    /// Mutably borrows `len` bytes starting at `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`FaultCode::MemoryOutOfBounds`] when the span leaves memory.
    pub fn span_mut(&mut self, addr: u16, len: usize) -> Result<&mut [u8], FaultCode> {
        validate_span(addr, len)?;
        let at = usize::from(addr);
        Ok(&mut self.bytes[at..at + len])
    }

    /// Whole address space, for hosts that hash or inspect memory.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let used = self.bytes.iter().filter(|byte| **byte != 0).count();
        f.debug_struct("Memory")
            .field("bytes", &MEMORY_BYTES)
            .field("non_zero", &used)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{Memory, MAX_PROGRAM_BYTES, MEMORY_BYTES, PROGRAM_START};
    use crate::FaultCode;

    #[test]
    fn canonical_backing_store_size_is_4kib() {
        let memory = Memory::new();
        assert_eq!(memory.as_slice().len(), MEMORY_BYTES);
        assert!(memory.as_slice().iter().all(|byte| *byte == 0));
        assert_eq!(MAX_PROGRAM_BYTES, 0xE00);
        assert_eq!(PROGRAM_START, 0x200);
    }

    #[test]
    fn byte_access_is_bounded_at_0xfff() {
        let mut memory = Memory::new();
        memory.write(0x0FFF, 0xAB).expect("last byte is writable");
        assert_eq!(memory.read(0x0FFF), Ok(0xAB));
        assert_eq!(memory.read(0x1000), Err(FaultCode::MemoryOutOfBounds));
        assert_eq!(
            memory.write(0x1000, 0x01),
            Err(FaultCode::MemoryOutOfBounds)
        );
    }

    #[test]
    fn word_fetch_is_big_endian() {
        let mut memory = Memory::new();
        memory.write(0x200, 0x60).expect("in range");
        memory.write(0x201, 0x05).expect("in range");
        assert_eq!(memory.read_word(0x200), Ok(0x6005));
    }

    #[test]
    fn word_fetch_straddling_the_end_faults() {
        let memory = Memory::new();
        assert!(memory.read_word(0x0FFE).is_ok());
        assert_eq!(memory.read_word(0x0FFF), Err(FaultCode::FetchOutOfBounds));
    }

    #[test]
    fn spans_reject_partial_overhang() {
        let mut memory = Memory::new();
        assert_eq!(memory.span(0x0FFB, 5).map(<[u8]>::len), Ok(5));
        assert_eq!(memory.span(0x0FFC, 5), Err(FaultCode::MemoryOutOfBounds));
        assert!(memory.span_mut(0x0FFC, 5).is_err());
        assert_eq!(memory.span(0x0FFF, 0).map(<[u8]>::len), Ok(0));
    }
}
