//! Monospace glyph atlas
//!
//! Glyphs are 8 columns by 16 scanlines of coverage values laid side by
//! side in one strip: scanline `r` of glyph `c` starts at byte
//! `r * atlas_width + (c - 32) * 8`. Coverage 0 is pure background and
//! 255 is (almost) pure foreground.
//!
//! The bundled ASCII atlas is built during constant evaluation from the
//! 8x8 `font8x8` table, every source row doubled onto two scanlines.
//! That table is one bit per pixel, so the bundled atlas only ever holds
//! coverage 0 or 255 and glyphs drawn from it are not anti-aliased.
//! Partial coverage comes from custom atlases only.

use core::fmt;

use font8x8::legacy::BASIC_LEGACY;

/// Glyph width in pixels
pub const GLYPH_WIDTH: usize = 8;

/// Glyph height in scanlines
pub const GLYPH_HEIGHT: usize = 16;

/// First code in the atlas (space)
pub const FIRST_GLYPH: u8 = 32;

/// Glyphs in the bundled atlas (codes 32..=127)
pub const ASCII_GLYPHS: usize = 96;

/// Bytes per scanline of the bundled atlas
pub const ASCII_ATLAS_WIDTH: usize = ASCII_GLYPHS * GLYPH_WIDTH;

static ASCII_COVERAGE: [u8; ASCII_ATLAS_WIDTH * GLYPH_HEIGHT] = build_ascii_coverage();

/// The bundled printable-ASCII atlas
pub static ASCII: GlyphAtlas<'static> = GlyphAtlas::new(&ASCII_COVERAGE, ASCII_ATLAS_WIDTH);

const fn build_ascii_coverage() -> [u8; ASCII_ATLAS_WIDTH * GLYPH_HEIGHT] {
    let mut atlas = [0u8; ASCII_ATLAS_WIDTH * GLYPH_HEIGHT];
    let mut glyph = 0;
    while glyph < ASCII_GLYPHS {
        let rows = BASIC_LEGACY[FIRST_GLYPH as usize + glyph];
        let mut scanline = 0;
        while scanline < GLYPH_HEIGHT {
            // font8x8 stores the leftmost pixel in bit 0
            let bits = rows[scanline / 2];
            let mut col = 0;
            while col < GLYPH_WIDTH {
                if (bits >> col) & 1 != 0 {
                    atlas[scanline * ASCII_ATLAS_WIDTH + glyph * GLYPH_WIDTH + col] = 0xFF;
                }
                col += 1;
            }
            scanline += 1;
        }
        glyph += 1;
    }
    atlas
}

// =============================================================================
// ATLAS
// =============================================================================

/// Read-only strip of glyph coverage values
#[derive(Clone, Copy)]
pub struct GlyphAtlas<'a> {
    data: &'a [u8],
    width: usize,
}

impl<'a> GlyphAtlas<'a> {
    /// Wrap `GLYPH_HEIGHT` scanlines of `width` bytes each
    pub const fn new(data: &'a [u8], width: usize) -> Self {
        Self { data, width }
    }

    /// Bytes per scanline
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of glyphs in the strip
    pub const fn glyph_count(&self) -> usize {
        self.width / GLYPH_WIDTH
    }

    /// Check whether `code` has a glyph
    pub const fn contains(&self, code: u8) -> bool {
        code >= FIRST_GLYPH && ((code - FIRST_GLYPH) as usize) < self.glyph_count()
    }

    /// Coverage of one glyph cell
    ///
    /// `None` for codes without a glyph or cells outside the 8x16 box.
    pub fn coverage(&self, code: u8, col: usize, row: usize) -> Option<u8> {
        if !self.contains(code) || col >= GLYPH_WIDTH || row >= GLYPH_HEIGHT {
            return None;
        }
        let offset = row * self.width + (code - FIRST_GLYPH) as usize * GLYPH_WIDTH + col;
        self.data.get(offset).copied()
    }
}

impl Default for GlyphAtlas<'static> {
    fn default() -> Self {
        ASCII
    }
}

impl fmt::Debug for GlyphAtlas<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlyphAtlas")
            .field("width", &self.width)
            .field("glyphs", &self.glyph_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells<'a>(atlas: &'a GlyphAtlas<'a>, code: u8) -> impl Iterator<Item = u8> + 'a {
        (0..GLYPH_HEIGHT).flat_map(move |row| {
            (0..GLYPH_WIDTH).map(move |col| atlas.coverage(code, col, row).unwrap())
        })
    }

    #[test]
    fn test_ascii_dimensions() {
        assert_eq!(ASCII.width(), 768);
        assert_eq!(ASCII.glyph_count(), 96);
        assert!(ASCII.contains(b' '));
        assert!(ASCII.contains(127));
        assert!(!ASCII.contains(31));
        assert!(!ASCII.contains(128));
    }

    #[test]
    fn test_space_is_empty() {
        assert!(cells(&ASCII, b' ').all(|v| v == 0));
    }

    #[test]
    fn test_letter_has_coverage() {
        let covered = cells(&ASCII, b'A').filter(|&v| v == 0xFF).count();
        assert!(covered > 0);
        assert!(cells(&ASCII, b'A').all(|v| v == 0 || v == 0xFF));
    }

    #[test]
    fn test_rows_doubled() {
        for row in (0..GLYPH_HEIGHT).step_by(2) {
            for col in 0..GLYPH_WIDTH {
                assert_eq!(
                    ASCII.coverage(b'#', col, row),
                    ASCII.coverage(b'#', col, row + 1)
                );
            }
        }
    }

    #[test]
    fn test_matches_source_font() {
        let source = BASIC_LEGACY[b'A' as usize];
        for (pair, bits) in source.iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                let expected = if (*bits >> col) & 1 != 0 { 0xFF } else { 0 };
                assert_eq!(ASCII.coverage(b'A', col, pair * 2), Some(expected));
            }
        }
    }

    #[test]
    fn test_custom_atlas() {
        let data = [7u8; 2 * GLYPH_WIDTH * GLYPH_HEIGHT];
        let atlas = GlyphAtlas::new(&data, 2 * GLYPH_WIDTH);

        assert_eq!(atlas.glyph_count(), 2);
        assert_eq!(atlas.coverage(33, 7, 15), Some(7));
        assert_eq!(atlas.coverage(34, 0, 0), None);
        assert_eq!(atlas.coverage(32, 8, 0), None);
    }
}
