//! Off-screen pixel buffer

use core::fmt;
use core::ptr::NonNull;

use super::format::PixelFormat;
use super::mode::Mode;
use crate::error::{AllocationError, Error, Result};

// =============================================================================
// MEMORY PROVIDER
// =============================================================================

/// Source of backbuffer memory
///
/// # Safety
///
/// A successful [`allocate`](MemoryProvider::allocate) must return a
/// region valid for reads and writes of `size` bytes, not aliased by
/// anything else, that stays valid until it is passed back to
/// [`free`](MemoryProvider::free).
pub unsafe trait MemoryProvider {
    /// Allocate `size` bytes
    fn allocate(&mut self, size: usize) -> Result<NonNull<u8>>;

    /// Return a region obtained from `allocate`
    ///
    /// # Safety
    /// `buffer` and `size` must come from a single successful `allocate`
    /// call on this provider that has not been freed yet.
    unsafe fn free(&mut self, buffer: NonNull<u8>, size: usize);
}

// =============================================================================
// BACKBUFFER
// =============================================================================

/// Pixel memory mirroring one display frame
///
/// Holds `stride * height` packed cells for the mode it was allocated
/// for. The memory goes back to its provider exactly once: through
/// [`release`](Backbuffer::release) or when the buffer is dropped.
pub struct Backbuffer<'p> {
    pixels: NonNull<u32>,
    len: usize,
    mode: Mode,
    provider: &'p mut dyn MemoryProvider,
}

impl<'p> Backbuffer<'p> {
    /// Allocate a zeroed backbuffer sized for `mode`
    pub fn allocate(
        mode: Mode,
        provider: &'p mut dyn MemoryProvider,
    ) -> core::result::Result<Self, AllocationError> {
        let Some((len, size)) = mode
            .cell_count()
            .and_then(|len| len.checked_mul(4).map(|size| (len, size)))
        else {
            log::warn!("Backbuffer: {} does not fit the address space", mode);
            return Err(AllocationError::new(usize::MAX, Error::OutOfResources));
        };

        let buffer = provider.allocate(size).map_err(|cause| {
            log::warn!("Backbuffer: allocation of {} bytes failed: {}", size, cause);
            AllocationError::new(size, cause)
        })?;

        if buffer.as_ptr().align_offset(core::mem::align_of::<u32>()) != 0 {
            log::warn!("Backbuffer: provider returned misaligned region {:p}", buffer);
            // SAFETY: `buffer` came from `allocate(size)` just above.
            unsafe { provider.free(buffer, size) };
            return Err(AllocationError::new(size, Error::InvalidParameter));
        }

        let pixels = buffer.cast::<u32>();
        // SAFETY: the provider guarantees `size = len * 4` writable bytes
        // and the pointer is aligned for u32.
        unsafe { core::ptr::write_bytes(pixels.as_ptr(), 0, len) };

        log::debug!("Backbuffer: {} bytes at {:p} for {}", size, pixels, mode);

        Ok(Self { pixels, len, mode, provider })
    }

    /// Give the memory back to the provider
    pub fn release(self) {
        drop(self);
    }

    /// Mode this buffer was allocated for
    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Channel placement of the mode
    pub fn format(&self) -> PixelFormat {
        self.mode.format
    }

    /// Visible pixels per row
    pub fn width(&self) -> usize {
        self.mode.width as usize
    }

    /// Rows
    pub fn height(&self) -> usize {
        self.mode.height as usize
    }

    /// Cells per row, padding included
    pub fn stride(&self) -> usize {
        self.mode.stride as usize
    }

    /// Size in bytes
    pub fn size(&self) -> usize {
        self.len * 4
    }

    /// All cells, row-major with `stride` cells per row
    pub fn pixels(&self) -> &[u32] {
        // SAFETY: `pixels` is valid, initialized and exclusively ours
        // for `len` cells until drop.
        unsafe { core::slice::from_raw_parts(self.pixels.as_ptr(), self.len) }
    }

    /// All cells, mutable
    pub fn pixels_mut(&mut self) -> &mut [u32] {
        // SAFETY: as in `pixels`, and `&mut self` makes the borrow unique.
        unsafe { core::slice::from_raw_parts_mut(self.pixels.as_ptr(), self.len) }
    }

    /// Read a visible pixel
    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        self.pixels().get(y * self.stride() + x).copied()
    }
}

impl Drop for Backbuffer<'_> {
    fn drop(&mut self) {
        let size = self.size();
        log::debug!("Backbuffer: releasing {} bytes at {:p}", size, self.pixels);
        // SAFETY: region and size come from the `allocate` that built
        // `self`, and drop runs once.
        unsafe { self.provider.free(self.pixels.cast::<u8>(), size) };
    }
}

impl fmt::Debug for Backbuffer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Backbuffer")
            .field("pixels", &self.pixels)
            .field("len", &self.len)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

/// Release a backbuffer if there is one
pub fn release(backbuffer: Option<Backbuffer<'_>>) {
    if let Some(backbuffer) = backbuffer {
        backbuffer.release();
    }
}
