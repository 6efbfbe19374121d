//! Frame presentation

use crate::framebuffer::{Backbuffer, DisplaySurface};

/// Copy the backbuffer's visible area to the top-left of the display
///
/// Skipped when either side is missing. A failed transfer is logged and
/// otherwise ignored; the next frame simply tries again.
pub fn blit(buffer: Option<&Backbuffer<'_>>, surface: Option<&mut dyn DisplaySurface>) {
    let (Some(buffer), Some(surface)) = (buffer, surface) else {
        log::trace!("present: nothing to blit");
        return;
    };

    let (width, height, stride) = (buffer.width(), buffer.height(), buffer.stride());
    if let Err(err) = surface.blit(buffer.pixels(), width, height, stride) {
        log::warn!("present: blit of {}x{} failed: {}", width, height, err);
    }
}
