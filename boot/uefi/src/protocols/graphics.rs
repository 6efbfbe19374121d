//! Graphics Output Protocol
//!
//! [`DisplaySurface`] over the firmware's GOP instance.

use core::fmt;
use core::ptr::NonNull;

use crate::error::{Error, Result};
use crate::framebuffer::{ColorLayout, DisplaySurface, ModeInfo};
use crate::raw::protocols::gop::*;
use crate::raw::EfiBootServices;

// =============================================================================
// GOP DISPLAY
// =============================================================================

/// Firmware display reached through the Graphics Output Protocol
pub struct GopDisplay<'a> {
    /// Raw protocol pointer
    protocol: NonNull<EfiGraphicsOutputProtocol>,
    /// Used to free the mode information `QueryMode` allocates
    boot_services: Option<&'a EfiBootServices>,
}

impl<'a> GopDisplay<'a> {
    /// Create from raw protocol
    ///
    /// Mode information returned by the firmware is not freed without
    /// boot services.
    ///
    /// # Safety
    /// `protocol` must point to a live GOP instance for as long as the
    /// display is used.
    pub unsafe fn from_raw(
        protocol: NonNull<EfiGraphicsOutputProtocol>,
        boot_services: Option<&'a EfiBootServices>,
    ) -> Self {
        Self { protocol, boot_services }
    }

    /// Locate the first GOP instance
    ///
    /// Fails with [`Error::ProtocolNotFound`] when the firmware has no
    /// display.
    ///
    /// # Safety
    /// Boot services must still be available.
    pub unsafe fn locate(boot_services: &'a EfiBootServices) -> Result<Self> {
        let protocol = unsafe {
            boot_services.locate_protocol::<EfiGraphicsOutputProtocol>(&EfiGraphicsOutputProtocol::GUID)
        }
        .map_err(|status| {
            log::warn!("GOP: protocol not found: {}", status);
            Error::ProtocolNotFound
        })?;

        let protocol = NonNull::new(protocol).ok_or(Error::ProtocolNotFound)?;
        Ok(Self { protocol, boot_services: Some(boot_services) })
    }

    fn raw(&self) -> *mut EfiGraphicsOutputProtocol {
        self.protocol.as_ptr()
    }
}

impl DisplaySurface for GopDisplay<'_> {
    fn mode_count(&self) -> u32 {
        // SAFETY: the protocol is live per `from_raw`/`locate`.
        unsafe { self.protocol.as_ref().max_mode() }
    }

    fn query_mode(&mut self, index: u32) -> Result<ModeInfo> {
        let mut size = 0usize;
        let mut info: *mut EfiGraphicsOutputModeInformation = core::ptr::null_mut();

        // SAFETY: the protocol is live and the out pointers are valid.
        let status = unsafe { ((*self.raw()).query_mode)(self.raw(), index, &mut size, &mut info) };
        if status.is_error() {
            return Err(Error::from_status(status));
        }
        if info.is_null() || size < core::mem::size_of::<EfiGraphicsOutputModeInformation>() {
            return Err(Error::DeviceError);
        }

        // SAFETY: the firmware returned a pool buffer of at least `size` bytes.
        let raw = unsafe { info.read_unaligned() };
        if let Some(boot_services) = self.boot_services {
            // SAFETY: `info` was allocated by the firmware from pool memory.
            if let Err(status) = unsafe { boot_services.free_pool(info.cast::<u8>()) } {
                log::debug!("GOP: freeing mode information failed: {}", status);
            }
        }

        Ok(ModeInfo::new(
            raw.horizontal_resolution,
            raw.vertical_resolution,
            raw.pixels_per_scan_line,
            ColorLayout::from_raw(raw.pixel_format, raw.pixel_information),
        ))
    }

    fn set_mode(&mut self, index: u32) -> Result<()> {
        // SAFETY: the protocol is live.
        let status = unsafe { ((*self.raw()).set_mode)(self.raw(), index) };
        status.to_status_result().map_err(Error::from_status)
    }

    fn blit(&mut self, pixels: &[u32], width: usize, height: usize, stride: usize) -> Result<()> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        let needed = stride
            .checked_mul(height - 1)
            .and_then(|cells| cells.checked_add(width))
            .ok_or(Error::InvalidParameter)?;
        if width > stride || pixels.len() < needed {
            return Err(Error::InvalidParameter);
        }
        let delta = stride
            .checked_mul(core::mem::size_of::<EfiGraphicsOutputBltPixel>())
            .ok_or(Error::InvalidParameter)?;

        // SAFETY: the protocol is live. BltBufferToVideo only reads the
        // source, which holds `needed` cells as checked above.
        let status = unsafe {
            ((*self.raw()).blt)(
                self.raw(),
                pixels.as_ptr().cast::<EfiGraphicsOutputBltPixel>().cast_mut(),
                EfiGraphicsOutputBltOperation::BltBufferToVideo,
                0,
                0,
                0,
                0,
                width,
                height,
                delta,
            )
        };
        status.to_status_result().map_err(Error::from_status)
    }
}

impl fmt::Debug for GopDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GopDisplay")
            .field("protocol", &self.protocol)
            .field("frees_mode_info", &self.boot_services.is_some())
            .finish()
    }
}
