//! Pixel format normalization
//!
//! However the firmware describes a mode's color layout, the rest of the
//! pipeline only ever sees a [`PixelFormat`]: three byte-aligned channel
//! shifts into a packed 32-bit pixel.

use crate::raw::protocols::gop::{EfiGraphicsPixelFormat, EfiPixelBitmask};

// =============================================================================
// COLOR LAYOUT
// =============================================================================

/// Color layout as reported by the display surface for one mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorLayout {
    /// Blue, green, red, reserved: one byte each, blue lowest
    FixedBgr,
    /// Arbitrary per-channel bit masks
    BitMask {
        /// Red mask
        red: u32,
        /// Green mask
        green: u32,
        /// Blue mask
        blue: u32,
    },
    /// Anything else (RGBX, BLT-only, vendor values)
    #[default]
    Unknown,
}

impl ColorLayout {
    /// Build from the raw GOP mode information fields
    pub fn from_raw(format: EfiGraphicsPixelFormat, masks: EfiPixelBitmask) -> Self {
        match format {
            EfiGraphicsPixelFormat::BLUE_GREEN_RED_RESERVED_8BIT => Self::FixedBgr,
            EfiGraphicsPixelFormat::BIT_MASK => Self::BitMask {
                red: masks.red_mask,
                green: masks.green_mask,
                blue: masks.blue_mask,
            },
            _ => Self::Unknown,
        }
    }
}

// =============================================================================
// PIXEL FORMAT
// =============================================================================

/// Canonical channel placement inside a packed 32-bit pixel
///
/// Each shift is a multiple of 8 in `0..=24`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelFormat {
    /// Bit position of the red byte
    pub red_shift: u8,
    /// Bit position of the green byte
    pub green_shift: u8,
    /// Bit position of the blue byte
    pub blue_shift: u8,
}

impl PixelFormat {
    /// Layout of `PixelBlueGreenRedReserved8BitPerColor`
    pub const BGR: Self = Self::new(16, 8, 0);

    /// Fallback for layouts nothing is known about
    pub const FALLBACK: Self = Self::new(0, 8, 16);

    /// Create a format from explicit shifts
    pub const fn new(red_shift: u8, green_shift: u8, blue_shift: u8) -> Self {
        Self { red_shift, green_shift, blue_shift }
    }

    /// Resolve a reported color layout into channel shifts
    pub const fn resolve(layout: ColorLayout) -> Self {
        match layout {
            ColorLayout::FixedBgr => Self::BGR,
            ColorLayout::BitMask { red, green, blue } => Self::new(
                mask_shift(red),
                mask_shift(green),
                mask_shift(blue),
            ),
            ColorLayout::Unknown => Self::FALLBACK,
        }
    }

    /// Pack three channel bytes into a pixel
    pub const fn pack(&self, red: u8, green: u8, blue: u8) -> u32 {
        ((red as u32) << self.red_shift)
            .wrapping_add((green as u32) << self.green_shift)
            .wrapping_add((blue as u32) << self.blue_shift)
    }

    /// Extract the three channel bytes of a pixel
    pub const fn unpack(&self, pixel: u32) -> (u8, u8, u8) {
        (
            (pixel >> self.red_shift) as u8,
            (pixel >> self.green_shift) as u8,
            (pixel >> self.blue_shift) as u8,
        )
    }
}

impl From<ColorLayout> for PixelFormat {
    fn from(layout: ColorLayout) -> Self {
        Self::resolve(layout)
    }
}

/// Byte-granular shift of a channel mask
///
/// Counts whole bytes above the lowest one that still hold set bits.
/// Masks that are not byte aligned come out wrong (RGB565 red `0xF800`
/// gives 8); callers get exactly that.
pub const fn mask_shift(mask: u32) -> u8 {
    let mut shift = 0;
    let mut mask = mask >> 8;
    while mask > 0 {
        shift += 8;
        mask >>= 8;
    }
    shift
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_bgr() {
        let format = PixelFormat::resolve(ColorLayout::FixedBgr);
        assert_eq!((format.red_shift, format.green_shift, format.blue_shift), (16, 8, 0));
    }

    #[test]
    fn test_bitmask_shifts() {
        let format = PixelFormat::resolve(ColorLayout::BitMask {
            red: 0x00FF_0000,
            green: 0x0000_FF00,
            blue: 0x0000_00FF,
        });
        assert_eq!(format, PixelFormat::new(16, 8, 0));

        let swapped = PixelFormat::resolve(ColorLayout::BitMask {
            red: 0x0000_00FF,
            green: 0x0000_FF00,
            blue: 0x00FF_0000,
        });
        assert_eq!(swapped, PixelFormat::new(0, 8, 16));
    }

    #[test]
    fn test_unknown_layout() {
        assert_eq!(PixelFormat::resolve(ColorLayout::Unknown), PixelFormat::new(0, 8, 16));
    }

    #[test]
    fn test_mask_shift_unaligned() {
        // Not corrected: only whole bytes are counted
        assert_eq!(mask_shift(0xF800), 8);
        assert_eq!(mask_shift(0x07E0), 8);
        assert_eq!(mask_shift(0x001F), 0);
        assert_eq!(mask_shift(0xFF00_0000), 24);
        assert_eq!(mask_shift(0), 0);
    }

    #[test]
    fn test_from_raw() {
        let masks = EfiPixelBitmask {
            red_mask: 0xFF,
            green_mask: 0xFF00,
            blue_mask: 0xFF_0000,
            reserved_mask: 0xFF00_0000,
        };
        assert_eq!(
            ColorLayout::from_raw(EfiGraphicsPixelFormat::BLUE_GREEN_RED_RESERVED_8BIT, masks),
            ColorLayout::FixedBgr
        );
        assert_eq!(
            ColorLayout::from_raw(EfiGraphicsPixelFormat::BIT_MASK, masks),
            ColorLayout::BitMask { red: 0xFF, green: 0xFF00, blue: 0xFF_0000 }
        );
        assert_eq!(
            ColorLayout::from_raw(EfiGraphicsPixelFormat::RED_GREEN_BLUE_RESERVED_8BIT, masks),
            ColorLayout::Unknown
        );
        assert_eq!(
            ColorLayout::from_raw(EfiGraphicsPixelFormat(7), masks),
            ColorLayout::Unknown
        );
    }

    #[test]
    fn test_pack_unpack() {
        let format = PixelFormat::BGR;
        assert_eq!(format.pack(0x12, 0x34, 0x56), 0x0012_3456);
        assert_eq!(format.unpack(0xAA12_3456), (0x12, 0x34, 0x56));
        assert_eq!(PixelFormat::FALLBACK.pack(0x12, 0x34, 0x56), 0x0056_3412);
    }
}
