/// First byte of the font region.
pub const FONT_START: u16 = 0x050;
/// Bytes per glyph (one byte per row, 8x5 cells with 4 visible columns).
pub const FONT_GLYPH_BYTES: u16 = 5;
/// Total font size: sixteen glyphs, digits `0` to `F`.
pub const FONT_BYTES: usize = 80;

/// Canonical hexadecimal digit glyphs.
#[rustfmt::skip]
pub const FONT_SPRITES: [u8; FONT_BYTES] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// Address of the glyph for the low nibble of `digit`.
#[must_use]
pub const fn glyph_address(digit: u8) -> u16 {
    FONT_START + FONT_GLYPH_BYTES * (digit & 0x0F) as u16
}
