//! Graphics Output Protocol (GOP)
//!
//! The GOP protocol provides access to the display's video modes and
//! the block transfer used to present a backbuffer.

use crate::raw::types::*;
use core::fmt;

use static_assertions::assert_eq_size;

// =============================================================================
// GRAPHICS OUTPUT PROTOCOL
// =============================================================================

/// EFI Graphics Output Protocol
#[repr(C)]
pub struct EfiGraphicsOutputProtocol {
    /// Query mode information
    pub query_mode: unsafe extern "efiapi" fn(
        this: *mut Self,
        mode_number: u32,
        size_of_info: *mut usize,
        info: *mut *mut EfiGraphicsOutputModeInformation,
    ) -> Status,

    /// Set mode
    pub set_mode: unsafe extern "efiapi" fn(
        this: *mut Self,
        mode_number: u32,
    ) -> Status,

    /// Block transfer
    pub blt: unsafe extern "efiapi" fn(
        this: *mut Self,
        blt_buffer: *mut EfiGraphicsOutputBltPixel,
        blt_operation: EfiGraphicsOutputBltOperation,
        source_x: usize,
        source_y: usize,
        destination_x: usize,
        destination_y: usize,
        width: usize,
        height: usize,
        delta: usize,
    ) -> Status,

    /// Mode information
    pub mode: *mut EfiGraphicsOutputProtocolMode,
}

impl EfiGraphicsOutputProtocol {
    /// Protocol GUID
    pub const GUID: Guid = guids::GRAPHICS_OUTPUT_PROTOCOL;

    /// Get current mode record
    ///
    /// # Safety
    /// The caller must ensure the protocol pointer is valid.
    pub unsafe fn current_mode(&self) -> Option<&EfiGraphicsOutputProtocolMode> {
        unsafe { self.mode.as_ref() }
    }

    /// Number of modes the device offers (`0..max_mode`)
    ///
    /// # Safety
    /// The caller must ensure the protocol pointer is valid.
    pub unsafe fn max_mode(&self) -> u32 {
        unsafe { self.current_mode() }.map_or(0, |m| m.max_mode)
    }
}

impl fmt::Debug for EfiGraphicsOutputProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EfiGraphicsOutputProtocol")
            .field("mode", &self.mode)
            .finish()
    }
}

// =============================================================================
// MODE INFORMATION
// =============================================================================

/// Graphics output mode information
#[derive(Debug, Clone, Copy)]
#[repr(C)]
pub struct EfiGraphicsOutputModeInformation {
    /// Version of this data structure
    pub version: u32,
    /// Horizontal resolution in pixels
    pub horizontal_resolution: u32,
    /// Vertical resolution in pixels
    pub vertical_resolution: u32,
    /// Pixel format
    pub pixel_format: EfiGraphicsPixelFormat,
    /// Pixel information (for PixelBitMask format)
    pub pixel_information: EfiPixelBitmask,
    /// Pixels per scan line
    pub pixels_per_scan_line: u32,
}

/// Graphics output protocol mode
#[derive(Debug, Clone, Copy)]
#[repr(C)]
pub struct EfiGraphicsOutputProtocolMode {
    /// Maximum mode number (modes are 0 to max_mode-1)
    pub max_mode: u32,
    /// Current mode number
    pub mode: u32,
    /// Pointer to mode information
    pub info: *mut EfiGraphicsOutputModeInformation,
    /// Size of mode information structure
    pub size_of_info: usize,
    /// Physical address of frame buffer
    pub frame_buffer_base: PhysicalAddress,
    /// Size of frame buffer in bytes
    pub frame_buffer_size: usize,
}

// =============================================================================
// PIXEL FORMAT
// =============================================================================

/// Pixel format reported by the firmware
///
/// Kept as a transparent integer: firmware may hand back values outside
/// the four the specification defines.
#[derive(Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct EfiGraphicsPixelFormat(pub u32);

impl EfiGraphicsPixelFormat {
    /// RGBX 8-bit per color
    pub const RED_GREEN_BLUE_RESERVED_8BIT: Self = Self(0);
    /// BGRX 8-bit per color
    pub const BLUE_GREEN_RED_RESERVED_8BIT: Self = Self(1);
    /// Custom bit mask
    pub const BIT_MASK: Self = Self(2);
    /// BLT only (no direct frame buffer access)
    pub const BLT_ONLY: Self = Self(3);
}

impl fmt::Debug for EfiGraphicsPixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            Self::RED_GREEN_BLUE_RESERVED_8BIT => "PixelRedGreenBlueReserved8BitPerColor",
            Self::BLUE_GREEN_RED_RESERVED_8BIT => "PixelBlueGreenRedReserved8BitPerColor",
            Self::BIT_MASK => "PixelBitMask",
            Self::BLT_ONLY => "PixelBltOnly",
            _ => return write!(f, "EfiGraphicsPixelFormat({})", self.0),
        };
        f.write_str(name)
    }
}

/// Pixel bitmask for custom formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[repr(C)]
pub struct EfiPixelBitmask {
    /// Red mask
    pub red_mask: u32,
    /// Green mask
    pub green_mask: u32,
    /// Blue mask
    pub blue_mask: u32,
    /// Reserved mask
    pub reserved_mask: u32,
}

// =============================================================================
// BLT OPERATIONS
// =============================================================================

/// Block transfer operation type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum EfiGraphicsOutputBltOperation {
    /// Fill rectangle with single color from buffer
    BltVideoFill = 0,
    /// Copy from video to buffer
    BltVideoToBltBuffer = 1,
    /// Copy from buffer to video
    BltBufferToVideo = 2,
    /// Copy within video memory
    BltVideoToVideo = 3,
}

/// BLT pixel structure
///
/// One packed 32-bit backbuffer cell viewed through the firmware's
/// blue/green/red/reserved byte layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[repr(C)]
pub struct EfiGraphicsOutputBltPixel {
    /// Blue component
    pub blue: u8,
    /// Green component
    pub green: u8,
    /// Red component
    pub red: u8,
    /// Reserved
    pub reserved: u8,
}

assert_eq_size!(EfiGraphicsOutputBltPixel, u32);
assert_eq_size!(EfiPixelBitmask, [u32; 4]);
assert_eq_size!(EfiGraphicsPixelFormat, u32);
assert_eq_size!(EfiGraphicsOutputModeInformation, [u32; 9]);
