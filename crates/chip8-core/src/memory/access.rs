//! Address-space bounds policy shared by fetch and data accesses.

use super::MEMORY_BYTES;
use crate::FaultCode;

/// Width of one instruction word in bytes.
pub const INSTRUCTION_BYTES: u16 = 2;

/// Validates that `len` bytes starting at `addr` lie inside memory.
///
/// A zero-length span is legal at any in-range address, so `DXY0` and similar
/// empty accesses do not fault on their own.
///
/// # Errors
///
/// Returns [`FaultCode::MemoryOutOfBounds`] when any byte of the span is past
/// `0xFFF`.
pub const fn validate_span(addr: u16, len: usize) -> Result<(), FaultCode> {
    let start = addr as usize;
    if start < MEMORY_BYTES && len <= MEMORY_BYTES - start {
        Ok(())
    } else {
        Err(FaultCode::MemoryOutOfBounds)
    }
}

/// Validates that a whole instruction word can be fetched at `pc`.
///
/// # Errors
///
/// Returns [`FaultCode::FetchOutOfBounds`] when `pc + 1` is past `0xFFF`.
pub const fn validate_fetch(pc: u16) -> Result<(), FaultCode> {
    match validate_span(pc, INSTRUCTION_BYTES as usize) {
        Ok(()) => Ok(()),
        Err(_) => Err(FaultCode::FetchOutOfBounds),
    }
}
