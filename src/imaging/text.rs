//! Built-in bitmap font for text watermarks.
//!
//! Glyphs come from `font8x8` (public-domain 8×8 bitmaps) and are scaled up
//! with nearest-neighbour sampling. No font files are read at runtime.

use font8x8::{BASIC_FONTS, UnicodeFonts};
use image::{Pixel, Rgba, RgbaImage};

/// Glyph cell size of the underlying bitmaps, in pixels.
const CELL: u32 = 8;

/// Fallback for characters outside the basic Latin table.
const REPLACEMENT: char = '?';

/// A fixed-style bitmap font: one scale, one color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BitmapFont {
    scale: u32,
    color: Rgba<u8>,
}

impl BitmapFont {
    /// Largest accepted scale (512px cells).
    pub const MAX_SCALE: u32 = 64;

    /// `scale` is clamped to `1..=MAX_SCALE`.
    pub fn new(scale: u32, color: Rgba<u8>) -> Self {
        Self {
            scale: scale.clamp(1, Self::MAX_SCALE),
            color,
        }
    }

    /// Horizontal advance of one character.
    pub fn char_width(&self) -> u32 {
        CELL * self.scale
    }

    /// Height of one line of text.
    pub fn line_height(&self) -> u32 {
        CELL * self.scale
    }

    /// Pixel width of `line` when drawn.
    pub fn line_width(&self, line: &str) -> u32 {
        (line.chars().count() as u32).saturating_mul(self.char_width())
    }

    /// Draw `line` with its top-left corner at `origin`.
    ///
    /// Glyph blocks are clipped to the canvas before filling. Pixels are
    /// blended source-over using the font color's alpha.
    pub fn draw_line(&self, canvas: &mut RgbaImage, line: &str, origin: (i64, i64)) {
        let (width, height) = (canvas.width() as i64, canvas.height() as i64);
        let scale = self.scale as i64;

        for (idx, ch) in line.chars().enumerate() {
            let Some(glyph) = BASIC_FONTS.get(ch).or_else(|| BASIC_FONTS.get(REPLACEMENT)) else {
                continue;
            };
            let glyph_x = origin.0 + idx as i64 * self.char_width() as i64;

            for (row, bits) in glyph.iter().copied().enumerate() {
                for col in 0..CELL as i64 {
                    if (bits >> col) & 1 == 0 {
                        continue;
                    }
                    let x0 = glyph_x + col * scale;
                    let y0 = origin.1 + row as i64 * scale;
                    let xs = x0.max(0)..(x0 + scale).min(width);
                    for y in y0.max(0)..(y0 + scale).min(height) {
                        for x in xs.clone() {
                            canvas.get_pixel_mut(x as u32, y as u32).blend(&self.color);
                        }
                    }
                }
            }
        }
    }
}

impl Default for BitmapFont {
    /// 32px black text.
    fn default() -> Self {
        Self::new(4, Rgba([0, 0, 0, 255]))
    }
}
