//! Backbuffer compositing
//!
//! Two operations draw into a [`Backbuffer`]: a solid [`fill`] and
//! [`draw_glyph`], which alpha-blends one scaled 8x16 glyph.
//!
//! # Glyph blending
//!
//! Every channel of a covered pixel becomes
//!
//! ```text
//! new = (old * (256 - v) + target * v) >> 8
//! ```
//!
//! for coverage `v`. At `v = 255` the background keeps a weight of 1, so
//! full coverage lands slightly short of the target color.
//!
//! # Clipping
//!
//! Placement is checked twice. The unscaled 8x16 box must lie inside the
//! visible area (`x + 8 < width`, `y + 16 < height`, with the sums taken
//! as unsigned) or nothing is drawn. Origins down to one glyph left of or
//! above the buffer still pass; anything further out wraps and is
//! rejected. Scaled footprints may still overhang, and each destination
//! pixel is checked again on its own before it is written.

pub mod present;

pub use present::blit;

use crate::font::{self, GlyphAtlas, FIRST_GLYPH, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::framebuffer::{Backbuffer, PixelFormat};

// =============================================================================
// FILL
// =============================================================================

/// Write `color` into every visible cell
///
/// `color` must already be packed for the buffer's format. Row padding
/// past `width` is left alone.
pub fn fill(buffer: &mut Backbuffer<'_>, color: u32) {
    let width = buffer.width();
    let stride = buffer.stride();
    if stride == 0 {
        return;
    }

    for row in buffer.pixels_mut().chunks_exact_mut(stride) {
        for cell in row.iter_mut().take(width) {
            *cell = color;
        }
    }
}

// =============================================================================
// GLYPHS
// =============================================================================

/// Blend one channel byte toward `target` by `coverage`
pub const fn blend_channel(old: u8, target: u8, coverage: u8) -> u8 {
    let coverage = coverage as u32;
    ((old as u32 * (256 - coverage) + target as u32 * coverage) >> 8) as u8
}

/// Blend a packed pixel toward an unpacked target color
///
/// The result only carries the three channel bytes; any other bits of
/// `pixel` are dropped.
pub const fn blend_pixel(format: PixelFormat, pixel: u32, target: (u8, u8, u8), coverage: u8) -> u32 {
    let (red, green, blue) = format.unpack(pixel);
    format.pack(
        blend_channel(red, target.0, coverage),
        blend_channel(green, target.1, coverage),
        blend_channel(blue, target.2, coverage),
    )
}

/// Draw one glyph of the bundled ASCII atlas
///
/// `code` below space is drawn as space; codes past the atlas draw
/// nothing. `color` is packed according to `format`. Each atlas cell
/// covers a `scale x scale` block with its top-left corner at
/// `(x + col * scale, y + row * scale)`.
pub fn draw_glyph(
    buffer: &mut Backbuffer<'_>,
    format: PixelFormat,
    code: u8,
    color: u32,
    x: i32,
    y: i32,
    scale: u8,
) {
    draw_glyph_with(buffer, &font::ASCII, format, code, color, x, y, scale);
}

/// Draw one glyph of `atlas`
///
/// See [`draw_glyph`].
#[allow(clippy::too_many_arguments)]
pub fn draw_glyph_with(
    buffer: &mut Backbuffer<'_>,
    atlas: &GlyphAtlas<'_>,
    format: PixelFormat,
    code: u8,
    color: u32,
    x: i32,
    y: i32,
    scale: u8,
) {
    let code = code.max(FIRST_GLYPH);

    // Coarse check on the unscaled box only. The far corner is compared
    // as unsigned, so origins more than one glyph off the top or left
    // wrap around and are rejected too.
    let (mode_width, mode_height) = (buffer.mode().width, buffer.mode().height);
    let far_x = x.wrapping_add(GLYPH_WIDTH as i32) as u32;
    let far_y = y.wrapping_add(GLYPH_HEIGHT as i32) as u32;
    if far_x >= mode_width || far_y >= mode_height {
        log::trace!("glyph {} at ({}, {}) rejected: box leaves {}x{}", code, x, y, mode_width, mode_height);
        return;
    }

    let width = i64::from(mode_width);
    let height = i64::from(mode_height);
    let stride = buffer.stride();
    let (x, y) = (i64::from(x), i64::from(y));

    if !atlas.contains(code) {
        log::trace!("glyph {} not in atlas", code);
        return;
    }

    let target = format.unpack(color);
    let scale = i64::from(scale);
    let pixels = buffer.pixels_mut();

    for row in 0..GLYPH_HEIGHT {
        for col in 0..GLYPH_WIDTH {
            let coverage = match atlas.coverage(code, col, row) {
                Some(0) | None => continue,
                Some(coverage) => coverage,
            };

            let block_x = x + col as i64 * scale;
            let block_y = y + row as i64 * scale;

            for py in block_y..block_y + scale {
                if py < 0 || py >= height {
                    continue;
                }
                for px in block_x..block_x + scale {
                    if px < 0 || px >= width {
                        continue;
                    }
                    if let Some(cell) = pixels.get_mut(py as usize * stride + px as usize) {
                        *cell = blend_pixel(format, *cell, target, coverage);
                    }
                }
            }
        }
    }
}
