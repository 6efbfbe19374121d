//! Memory Services
//!
//! Boot Services pool memory as a [`MemoryProvider`].

use core::ptr::NonNull;

use crate::error::{Error, Result};
use crate::framebuffer::MemoryProvider;
use crate::raw::{EfiBootServices, MemoryType};

// =============================================================================
// POOL ALLOCATOR
// =============================================================================

/// Backbuffer memory from `AllocatePool`
#[derive(Debug, Clone, Copy)]
pub struct PoolAllocator<'a> {
    boot_services: &'a EfiBootServices,
    memory_type: MemoryType,
}

impl<'a> PoolAllocator<'a> {
    /// Allocate loader data
    ///
    /// # Safety
    /// Boot services must stay available for as long as the allocator
    /// or anything allocated from it is alive.
    pub unsafe fn new(boot_services: &'a EfiBootServices) -> Self {
        Self { boot_services, memory_type: MemoryType::LOADER_DATA }
    }

    /// Allocate pool memory of another type
    pub fn with_memory_type(self, memory_type: MemoryType) -> Self {
        Self { memory_type, ..self }
    }

    /// Pool type used for allocations
    pub fn memory_type(&self) -> MemoryType {
        self.memory_type
    }
}

// SAFETY: `AllocatePool` returns 8-byte aligned regions of the requested
// size that belong to the caller until `FreePool`.
unsafe impl MemoryProvider for PoolAllocator<'_> {
    fn allocate(&mut self, size: usize) -> Result<NonNull<u8>> {
        // SAFETY: boot services are available per `new`.
        let buffer = unsafe { self.boot_services.allocate_pool(self.memory_type, size) }
            .map_err(Error::from_status)?;
        NonNull::new(buffer).ok_or(Error::AllocationFailed)
    }

    unsafe fn free(&mut self, buffer: NonNull<u8>, _size: usize) {
        // SAFETY: `buffer` came from `allocate_pool` per the trait contract.
        if let Err(status) = unsafe { self.boot_services.free_pool(buffer.as_ptr()) } {
            log::warn!("Pool: FreePool({:p}) failed: {}", buffer, status);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::{Backbuffer, Mode, PixelFormat};
    use crate::raw::{Guid, Status};
    use std::cell::RefCell;
    use std::vec::Vec;

    std::thread_local! {
        static POOL: RefCell<Vec<(MemoryType, usize, usize)>> = RefCell::new(Vec::new());
        static FREED: RefCell<Vec<usize>> = RefCell::new(Vec::new());
    }

    unsafe extern "efiapi" fn allocate_pool(pool_type: MemoryType, size: usize, buffer: *mut *mut u8) -> Status {
        if size > 1 << 20 {
            return Status::OUT_OF_RESOURCES;
        }
        let region = std::boxed::Box::leak(std::vec![0u64; size.div_ceil(8)].into_boxed_slice());
        let address = region.as_mut_ptr().cast::<u8>();
        POOL.with(|pool| pool.borrow_mut().push((pool_type, size, address as usize)));
        unsafe { *buffer = address };
        Status::SUCCESS
    }

    unsafe extern "efiapi" fn free_pool(buffer: *mut u8) -> Status {
        FREED.with(|freed| freed.borrow_mut().push(buffer as usize));
        Status::SUCCESS
    }

    unsafe extern "efiapi" fn locate_protocol(
        _protocol: *const Guid,
        _registration: *mut core::ffi::c_void,
        _interface: *mut *mut core::ffi::c_void,
    ) -> Status {
        Status::NOT_FOUND
    }

    fn mode() -> Mode {
        Mode { index: 0, width: 16, height: 4, stride: 16, format: PixelFormat::BGR }
    }

    #[test]
    fn test_backbuffer_from_pool() {
        let boot_services = EfiBootServices::with_entries(allocate_pool, free_pool, locate_protocol);
        let mut pool = unsafe { PoolAllocator::new(&boot_services) };

        let buffer = Backbuffer::allocate(mode(), &mut pool).unwrap();
        let address = buffer.pixels().as_ptr() as usize;
        buffer.release();

        POOL.with(|pool| assert_eq!(*pool.borrow(), [(MemoryType::LOADER_DATA, 256, address)]));
        FREED.with(|freed| assert_eq!(*freed.borrow(), [address]));
    }

    #[test]
    fn test_pool_exhausted() {
        let boot_services = EfiBootServices::with_entries(allocate_pool, free_pool, locate_protocol);
        let mut pool = unsafe { PoolAllocator::new(&boot_services) }.with_memory_type(MemoryType::BOOT_SERVICES_DATA);

        let huge = Mode { width: 1024, height: 1024, stride: 1024, ..mode() };
        let err = Backbuffer::allocate(huge, &mut pool).unwrap_err();

        assert_eq!(err.cause, Error::OutOfResources);
        assert_eq!(pool.memory_type(), MemoryType::BOOT_SERVICES_DATA);
        FREED.with(|freed| assert!(freed.borrow().is_empty()));
    }

    unsafe extern "efiapi" fn locate_null(
        _protocol: *const Guid,
        _registration: *mut core::ffi::c_void,
        interface: *mut *mut core::ffi::c_void,
    ) -> Status {
        unsafe { *interface = core::ptr::null_mut() };
        Status::SUCCESS
    }

    #[test]
    fn test_locate_without_gop() {
        use crate::protocols::GopDisplay;

        let boot_services = EfiBootServices::with_entries(allocate_pool, free_pool, locate_protocol);
        let err = unsafe { GopDisplay::locate(&boot_services) }.unwrap_err();
        assert_eq!(err, Error::ProtocolNotFound);

        let boot_services = EfiBootServices::with_entries(allocate_pool, free_pool, locate_null);
        let err = unsafe { GopDisplay::locate(&boot_services) }.unwrap_err();
        assert_eq!(err, Error::ProtocolNotFound);
    }
}
