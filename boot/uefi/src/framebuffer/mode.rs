//! Display mode selection

use core::fmt;

use super::format::{ColorLayout, PixelFormat};
use crate::error::Result;

// =============================================================================
// DISPLAY SURFACE
// =============================================================================

/// What a display surface reports for one of its modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModeInfo {
    /// Visible pixels per row
    pub horizontal_resolution: u32,
    /// Rows
    pub vertical_resolution: u32,
    /// Pixels per scan line, including padding
    pub pixels_per_scanline: u32,
    /// Reported color layout
    pub layout: ColorLayout,
}

impl ModeInfo {
    /// Create mode information
    pub const fn new(
        horizontal_resolution: u32,
        vertical_resolution: u32,
        pixels_per_scanline: u32,
        layout: ColorLayout,
    ) -> Self {
        Self { horizontal_resolution, vertical_resolution, pixels_per_scanline, layout }
    }

    /// Pixel count used to rank modes against each other
    pub const fn resolution(&self) -> u64 {
        self.pixels_per_scanline as u64 * self.vertical_resolution as u64
    }
}

/// Firmware display the pipeline selects modes on and presents to
pub trait DisplaySurface {
    /// Number of modes on offer; valid indices are `0..mode_count()`
    fn mode_count(&self) -> u32;

    /// Describe one mode
    fn query_mode(&mut self, index: u32) -> Result<ModeInfo>;

    /// Switch the display to a mode
    fn set_mode(&mut self, index: u32) -> Result<()>;

    /// Copy `width x height` pixels from `pixels` (rows `stride` cells
    /// apart) to the top-left corner of the display
    fn blit(&mut self, pixels: &[u32], width: usize, height: usize, stride: usize) -> Result<()>;
}

// =============================================================================
// MODE
// =============================================================================

/// The display mode the session runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Mode {
    /// Index of the mode on the display surface
    pub index: u32,
    /// Visible pixels per row
    pub width: u32,
    /// Rows
    pub height: u32,
    /// Pixels per scan line (`stride >= width`)
    pub stride: u32,
    /// Channel placement
    pub format: PixelFormat,
}

impl Mode {
    /// Build the session mode from surface information
    pub const fn from_info(index: u32, info: &ModeInfo) -> Self {
        Self {
            index,
            width: info.horizontal_resolution,
            height: info.vertical_resolution,
            stride: info.pixels_per_scanline,
            format: PixelFormat::resolve(info.layout),
        }
    }

    /// Number of 32-bit cells a backbuffer for this mode holds
    pub const fn cell_count(&self) -> Option<usize> {
        (self.stride as usize).checked_mul(self.height as usize)
    }

    /// Check for the zero-valued mode
    pub const fn is_zero(&self) -> bool {
        self.width == 0 && self.height == 0 && self.stride == 0
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mode {} {}x{} stride {} (r{} g{} b{})",
            self.index,
            self.width,
            self.height,
            self.stride,
            self.format.red_shift,
            self.format.green_shift,
            self.format.blue_shift,
        )
    }
}

// =============================================================================
// SELECTION
// =============================================================================

/// Pick the highest-resolution mode and switch the surface to it
///
/// Modes are ranked by `pixels_per_scanline * vertical_resolution`; the
/// first mode reaching a new maximum wins, so ties go to the lower index.
/// Without a surface nothing is enumerated and the zero mode comes back.
pub fn select_best_mode(surface: Option<&mut dyn DisplaySurface>) -> Mode {
    let Some(surface) = surface else {
        log::debug!("GOP: no display surface, using zero mode");
        return Mode::default();
    };

    let count = surface.mode_count();
    let mut best = Mode::default();
    let mut best_resolution = 0u64;

    for index in 0..count {
        let info = match surface.query_mode(index) {
            Ok(info) => info,
            Err(err) => {
                log::warn!("GOP: query of mode {} failed: {}", index, err);
                continue;
            }
        };

        log::debug!(
            "GOP: mode {}: {}x{} stride {} {:?}",
            index,
            info.horizontal_resolution,
            info.vertical_resolution,
            info.pixels_per_scanline,
            info.layout,
        );

        let resolution = info.resolution();
        if resolution > best_resolution {
            best = Mode::from_info(index, &info);
            best_resolution = resolution;
        }
    }

    if count > 0 {
        if let Err(err) = surface.set_mode(best.index) {
            log::warn!("GOP: switching to mode {} failed: {}", best.index, err);
        }
    }

    log::info!("GOP: selected {} of {} modes", best, count);
    best
}
