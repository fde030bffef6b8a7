//! Monochrome framebuffer with XOR sprite blitting.

/// Framebuffer width in pixels.
pub const DISPLAY_WIDTH: usize = 64;
/// Framebuffer height in pixels.
pub const DISPLAY_HEIGHT: usize = 32;
/// Tallest sprite a `DXYN` can draw.
pub const MAX_SPRITE_ROWS: usize = 15;

/// Row-major pixel grid; `frame[y][x]`.
pub type FrameBuffer = [[bool; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// Owned framebuffer. Presentation reads copies via [`Display::snapshot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Display {
    pixels: FrameBuffer,
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}

impl Display {
    /// Creates a blank display.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pixels: [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
        }
    }

    /// Turns every pixel off.
    pub const fn clear(&mut self) {
        self.pixels = [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    }

    /// XORs `sprite` onto the grid with its top-left corner at `(x, y)`.
    ///
    /// Rows past the bottom edge end the blit, columns past the right edge are
    /// skipped; nothing wraps. Returns true if any lit pixel was turned off.
    pub fn draw(&mut self, x: usize, y: usize, sprite: &[u8]) -> bool {
        let mut collided = false;

        for (row_index, row) in sprite.iter().take(MAX_SPRITE_ROWS).enumerate() {
            let Some(line) = self.pixels.get_mut(y + row_index) else {
                break;
            };
            for bit in 0..8 {
                if row & (0x80 >> bit) == 0 {
                    continue;
                }
                let Some(pixel) = line.get_mut(x + bit) else {
                    continue;
                };
                collided |= *pixel;
                *pixel = !*pixel;
            }
        }

        collided
    }

    /// Reads one pixel; out-of-grid coordinates read as off.
    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.pixels
            .get(y)
            .and_then(|line| line.get(x))
            .copied()
            .unwrap_or(false)
    }

    /// Copy of the current grid for presentation.
    #[must_use]
    pub const fn snapshot(&self) -> FrameBuffer {
        self.pixels
    }

    /// Number of lit pixels.
    #[must_use]
    pub fn lit_count(&self) -> usize {
        self.pixels.iter().flatten().filter(|on| **on).count()
    }
}
