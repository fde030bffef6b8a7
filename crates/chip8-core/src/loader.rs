//! Program and font images.

use std::io::Read;

use thiserror::Error;

use crate::{CoreConfig, CoreState, Memory, FONT_BYTES, FONT_START, MAX_PROGRAM_BYTES, PROGRAM_START};

/// Errors raised while placing an image into memory.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Program does not fit between `0x200` and the end of memory.
    #[error("program is {len} bytes, at most {max} fit")]
    ProgramTooLarge {
        /// Size of the rejected image.
        len: usize,
        /// Largest accepted image.
        max: usize,
    },
    /// Font image is not exactly sixteen 5-byte glyphs.
    #[error("font image is {len} bytes, expected 80")]
    FontSize {
        /// Size of the rejected image.
        len: usize,
    },
    /// Reading the image failed.
    #[error("failed to read program image")]
    Io(#[from] std::io::Error),
}

/// Copies `program` to `0x200`, zeroing the rest of the program region.
///
/// # Errors
///
/// Returns [`LoadError::ProgramTooLarge`] if the image exceeds
/// [`MAX_PROGRAM_BYTES`]; memory is left untouched in that case.
pub fn load_program(memory: &mut Memory, program: &[u8]) -> Result<(), LoadError> {
    if program.len() > MAX_PROGRAM_BYTES {
        return Err(LoadError::ProgramTooLarge {
            len: program.len(),
            max: MAX_PROGRAM_BYTES,
        });
    }

    let region = memory
        .span_mut(PROGRAM_START, MAX_PROGRAM_BYTES)
        .map_err(|_| LoadError::ProgramTooLarge {
            len: program.len(),
            max: MAX_PROGRAM_BYTES,
        })?;
    let (image, rest) = region.split_at_mut(program.len());
    image.copy_from_slice(program);
    rest.fill(0);

    log::info!("loaded {} byte program at {PROGRAM_START:#05x}", program.len());
    Ok(())
}

/// Reads an image from `reader` and loads it like [`load_program`].
///
/// At most one byte past the limit is read, so oversized inputs are rejected
/// without buffering them whole.
///
/// # Errors
///
/// Returns [`LoadError::Io`] on read failure and
/// [`LoadError::ProgramTooLarge`] for oversized images.
pub fn load_program_from_reader<R: Read>(memory: &mut Memory, reader: R) -> Result<(), LoadError> {
    let mut image = Vec::with_capacity(MAX_PROGRAM_BYTES);
    let limit = u64::try_from(MAX_PROGRAM_BYTES + 1).unwrap_or(u64::MAX);
    reader.take(limit).read_to_end(&mut image)?;
    load_program(memory, &image)
}

/// Replaces the built-in glyphs at `0x050` with a custom 80-byte font.
///
/// # Errors
///
/// Returns [`LoadError::FontSize`] unless `font` is exactly 80 bytes.
pub fn load_font(memory: &mut Memory, font: &[u8]) -> Result<(), LoadError> {
    if font.len() != FONT_BYTES {
        return Err(LoadError::FontSize { len: font.len() });
    }
    memory
        .span_mut(FONT_START, FONT_BYTES)
        .map_err(|_| LoadError::FontSize { len: font.len() })?
        .copy_from_slice(font);
    log::info!("loaded custom font at {FONT_START:#05x}");
    Ok(())
}

impl CoreState {
    /// Creates a core with `program` loaded at `0x200`.
    ///
    /// # Errors
    ///
    /// Propagates [`load_program`] failures.
    pub fn with_program(config: &CoreConfig, program: &[u8]) -> Result<Self, LoadError> {
        let mut state = Self::with_config(config);
        load_program(&mut state.memory, program)?;
        Ok(state)
    }

    /// Loads `program` into this core's memory. Registers are not touched;
    /// call [`CoreState::reset`] to restart from `0x200`.
    ///
    /// # Errors
    ///
    /// Propagates [`load_program`] failures.
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), LoadError> {
        load_program(&mut self.memory, program)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::{load_font, load_program, load_program_from_reader, LoadError};
    use crate::{
        CoreConfig, CoreState, Memory, FONT_BYTES, FONT_START, MAX_PROGRAM_BYTES, PROGRAM_START,
    };

    #[test]
    fn program_lands_at_entry_point() {
        let state = CoreState::with_program(&CoreConfig::default(), &[0x12, 0x00])
            .expect("program fits");
        assert_eq!(state.memory.read_word(PROGRAM_START), Ok(0x1200));
        assert_eq!(state.regs.pc(), PROGRAM_START);
    }

    #[test]
    fn largest_program_fills_memory() {
        let mut memory = Memory::new();
        let program = vec![0xAB; MAX_PROGRAM_BYTES];
        load_program(&mut memory, &program).expect("exact fit");
        assert_eq!(memory.read(0x0FFF), Ok(0xAB));
    }

    #[test]
    fn oversized_program_is_rejected_untouched() {
        let mut memory = Memory::new();
        let program = vec![0xAB; MAX_PROGRAM_BYTES + 1];
        let err = load_program(&mut memory, &program).expect_err("too large");
        assert!(matches!(
            err,
            LoadError::ProgramTooLarge { len, max } if len == MAX_PROGRAM_BYTES + 1 && max == MAX_PROGRAM_BYTES
        ));
        assert_eq!(memory, Memory::new());
    }

    #[test]
    fn reload_clears_previous_tail() {
        let mut memory = Memory::new();
        load_program(&mut memory, &[1, 2, 3, 4]).expect("fits");
        load_program(&mut memory, &[9]).expect("fits");
        assert_eq!(memory.span(PROGRAM_START, 4).expect("in range"), &[9, 0, 0, 0]);
    }

    #[test]
    fn reader_load_matches_slice_load() {
        let mut from_reader = Memory::new();
        let mut from_slice = Memory::new();
        let image = [0x60, 0x05, 0x70, 0x05];
        load_program_from_reader(&mut from_reader, Cursor::new(image)).expect("fits");
        load_program(&mut from_slice, &image).expect("fits");
        assert_eq!(from_reader, from_slice);
    }

    #[test]
    fn reader_rejects_oversized_stream() {
        let mut memory = Memory::new();
        let image = vec![0u8; MAX_PROGRAM_BYTES * 2];
        assert!(matches!(
            load_program_from_reader(&mut memory, Cursor::new(image)),
            Err(LoadError::ProgramTooLarge { .. })
        ));
    }

    #[test]
    fn custom_font_replaces_glyphs() {
        let mut memory = Memory::new();
        let font = [0x5A; FONT_BYTES];
        load_font(&mut memory, &font).expect("right size");
        assert_eq!(memory.span(FONT_START, FONT_BYTES).expect("in range"), &font);
        assert!(matches!(
            load_font(&mut memory, &font[..79]),
            Err(LoadError::FontSize { len: 79 })
        ));
    }

    #[test]
    fn errors_render_sizes() {
        let err = LoadError::ProgramTooLarge { len: 4000, max: 3584 };
        assert_eq!(err.to_string(), "program is 4000 bytes, at most 3584 fit");
    }
}
