//! Host-side test doubles
//!
//! [`MockDisplay`] stands in for the firmware display and records every
//! call made on it; [`MockMemory`] hands out heap memory and keeps count
//! of what is still outstanding. Both can be told to fail.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::ptr::NonNull;

use crate::error::{Error, Result};
use crate::framebuffer::{DisplaySurface, MemoryProvider, ModeInfo};

// =============================================================================
// DISPLAY
// =============================================================================

/// One recorded transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlitRecord {
    /// Columns copied
    pub width: usize,
    /// Rows copied
    pub height: usize,
    /// Source cells per row
    pub stride: usize,
    /// Copy of the source slice at the time of the call
    pub pixels: Vec<u32>,
}

/// Scripted display surface
#[derive(Debug, Default)]
pub struct MockDisplay {
    /// Modes on offer, by index
    pub modes: Vec<ModeInfo>,
    /// Indices passed to `query_mode`, in order
    pub queried: Vec<u32>,
    /// Indices passed to `set_mode`, in order
    pub set_mode_calls: Vec<u32>,
    /// Successful blits
    pub blits: Vec<BlitRecord>,
    /// Blit calls, failed ones included
    pub blit_attempts: usize,
    /// Mode whose query fails
    pub fail_query: Option<u32>,
    /// Fail every `set_mode`
    pub fail_set_mode: bool,
    /// Fail every `blit`
    pub fail_blit: bool,
}

impl MockDisplay {
    /// Display offering `modes`
    pub fn new(modes: &[ModeInfo]) -> Self {
        Self { modes: modes.to_vec(), ..Self::default() }
    }

    /// Mode the display was last switched to
    pub fn current_mode(&self) -> Option<u32> {
        self.set_mode_calls.last().copied()
    }
}

impl DisplaySurface for MockDisplay {
    fn mode_count(&self) -> u32 {
        self.modes.len() as u32
    }

    fn query_mode(&mut self, index: u32) -> Result<ModeInfo> {
        self.queried.push(index);
        if self.fail_query == Some(index) {
            return Err(Error::DeviceError);
        }
        self.modes.get(index as usize).copied().ok_or(Error::InvalidParameter)
    }

    fn set_mode(&mut self, index: u32) -> Result<()> {
        if self.fail_set_mode {
            return Err(Error::DeviceError);
        }
        if index as usize >= self.modes.len() {
            return Err(Error::Unsupported);
        }
        self.set_mode_calls.push(index);
        Ok(())
    }

    fn blit(&mut self, pixels: &[u32], width: usize, height: usize, stride: usize) -> Result<()> {
        self.blit_attempts += 1;
        if self.fail_blit {
            return Err(Error::DeviceError);
        }
        self.blits.push(BlitRecord { width, height, stride, pixels: pixels.to_vec() });
        Ok(())
    }
}

// =============================================================================
// MEMORY
// =============================================================================

/// Outstanding region
#[derive(Debug)]
struct MemoryRecord {
    address: usize,
    size: usize,
}

/// Memory provider backed by the host heap
#[derive(Debug, Default)]
pub struct MockMemory {
    /// Sizes of all allocation requests, failed ones included
    pub requests: Vec<usize>,
    /// Completed frees
    pub frees: usize,
    /// Largest request that succeeds
    pub budget: Option<usize>,
    outstanding: Vec<MemoryRecord>,
}

impl MockMemory {
    /// Provider without a size limit
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider failing requests larger than `budget` bytes
    pub fn with_budget(budget: usize) -> Self {
        let mut memory = Self::default();
        memory.budget = Some(budget);
        memory
    }

    /// Regions handed out and not yet freed
    pub fn live(&self) -> usize {
        self.outstanding.len()
    }
}

// SAFETY: every region is a leaked boxed slice of at least `size` bytes,
// aligned for u32 and owned by nobody else until `free` rebuilds the box.
unsafe impl MemoryProvider for MockMemory {
    fn allocate(&mut self, size: usize) -> Result<NonNull<u8>> {
        self.requests.push(size);
        if self.budget.is_some_and(|budget| size > budget) {
            return Err(Error::OutOfResources);
        }

        let cells = size.div_ceil(4).max(1);
        let region = Box::leak(vec![0u32; cells].into_boxed_slice());
        let buffer = NonNull::from(region).cast::<u8>();
        self.outstanding.push(MemoryRecord { address: buffer.as_ptr() as usize, size });
        Ok(buffer)
    }

    unsafe fn free(&mut self, buffer: NonNull<u8>, size: usize) {
        let address = buffer.as_ptr() as usize;
        let Some(slot) = self
            .outstanding
            .iter()
            .position(|record| record.address == address && record.size == size)
        else {
            log::error!("MockMemory: free of unknown region {:#x} ({} bytes)", address, size);
            return;
        };
        self.outstanding.swap_remove(slot);
        self.frees += 1;

        let cells = size.div_ceil(4).max(1);
        // SAFETY: the record proves this came from `allocate` with the same
        // size, so the slice matches the leaked box.
        drop(unsafe {
            Box::from_raw(core::ptr::slice_from_raw_parts_mut(buffer.as_ptr().cast::<u32>(), cells))
        });
    }
}

impl Drop for MockMemory {
    fn drop(&mut self) {
        for record in self.outstanding.drain(..) {
            let cells = record.size.div_ceil(4).max(1);
            // SAFETY: outstanding regions are still leaked boxes.
            drop(unsafe {
                Box::from_raw(core::ptr::slice_from_raw_parts_mut(record.address as *mut u32, cells))
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::ColorLayout;

    #[test]
    fn test_memory_budget() {
        let mut memory = MockMemory::with_budget(16);

        assert_eq!(memory.allocate(17), Err(Error::OutOfResources));
        let region = memory.allocate(16).unwrap();
        assert_eq!(memory.live(), 1);

        unsafe { memory.free(region, 16) };
        assert_eq!(memory.live(), 0);
        assert_eq!(memory.frees, 1);
        assert_eq!(memory.requests, [17, 16]);
    }

    #[test]
    fn test_budget_frees_outstanding_on_drop() {
        let mut memory = MockMemory::with_budget(64);
        assert_eq!(memory.budget, Some(64));

        memory.allocate(64).unwrap();
        memory.allocate(8).unwrap();
        assert_eq!(memory.live(), 2);
        drop(memory);
    }

    #[test]
    fn test_display_records_calls() {
        let mut display = MockDisplay::new(&[ModeInfo::new(1, 1, 1, ColorLayout::FixedBgr)]);

        assert!(display.query_mode(0).is_ok());
        assert_eq!(display.query_mode(3), Err(Error::InvalidParameter));
        assert!(display.set_mode(0).is_ok());
        assert_eq!(display.set_mode(1), Err(Error::Unsupported));

        assert_eq!(display.queried, [0, 3]);
        assert_eq!(display.current_mode(), Some(0));
    }
}
