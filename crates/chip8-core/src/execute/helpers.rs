use crate::{Register, DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// Hundreds, tens and ones digits of `value`, most significant first.
#[must_use]
pub const fn bcd_digits(value: u8) -> [u8; 3] {
    [value / 100, (value / 10) % 10, value % 10]
}

/// Number of registers `V0..=last` covers, as an address offset.
#[must_use]
pub const fn register_span_len(last: Register) -> u16 {
    last as u16 + 1
}

/// Wraps draw coordinates onto the screen before the sprite is clipped.
#[must_use]
pub const fn sprite_origin(vx: u8, vy: u8) -> (usize, usize) {
    (
        vx as usize & (DISPLAY_WIDTH - 1),
        vy as usize & (DISPLAY_HEIGHT - 1),
    )
}
