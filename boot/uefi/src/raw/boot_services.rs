//! UEFI Boot Services Table
//!
//! Only the pool allocator and protocol lookup are typed; the remaining
//! entries are kept as opaque slots so the typed fields sit at their
//! ABI offsets. The table is only ever reached through a firmware-owned
//! pointer, so the trailing entries after `locate_protocol` are omitted.

use super::memory::MemoryType;
use super::types::*;

/// EFI Boot Services table (prefix up to `LocateProtocol`)
#[repr(C)]
pub struct EfiBootServices {
    /// Table header
    pub hdr: TableHeader,

    /// RaiseTPL, RestoreTPL
    _task_priority_services: [usize; 2],

    /// AllocatePages, FreePages, GetMemoryMap
    _page_services: [usize; 3],

    /// Allocate pool memory
    pub allocate_pool: unsafe extern "efiapi" fn(
        pool_type: MemoryType,
        size: usize,
        buffer: *mut *mut u8,
    ) -> Status,

    /// Free pool memory
    pub free_pool: unsafe extern "efiapi" fn(buffer: *mut u8) -> Status,

    /// CreateEvent .. CheckEvent
    _event_services: [usize; 6],

    /// InstallProtocolInterface .. InstallConfigurationTable
    _protocol_handler_services: [usize; 9],

    /// LoadImage .. ExitBootServices
    _image_services: [usize; 5],

    /// GetNextMonotonicCount, Stall, SetWatchdogTimer
    _misc_services: [usize; 3],

    /// ConnectController, DisconnectController
    _driver_services: [usize; 2],

    /// OpenProtocol, CloseProtocol, OpenProtocolInformation
    _open_close_services: [usize; 3],

    /// ProtocolsPerHandle, LocateHandleBuffer
    _library_services: [usize; 2],

    /// Locate protocol
    pub locate_protocol: unsafe extern "efiapi" fn(
        protocol: *const Guid,
        registration: *mut core::ffi::c_void,
        interface: *mut *mut core::ffi::c_void,
    ) -> Status,
}

impl EfiBootServices {
    /// Table with only the typed entries filled in
    #[cfg(test)]
    pub(crate) fn with_entries(
        allocate_pool: unsafe extern "efiapi" fn(MemoryType, usize, *mut *mut u8) -> Status,
        free_pool: unsafe extern "efiapi" fn(*mut u8) -> Status,
        locate_protocol: unsafe extern "efiapi" fn(
            *const Guid,
            *mut core::ffi::c_void,
            *mut *mut core::ffi::c_void,
        ) -> Status,
    ) -> Self {
        Self {
            hdr: TableHeader { signature: 0x5652_4553_544f_4f42, revision: 0, header_size: 0, crc32: 0, reserved: 0 },
            _task_priority_services: [0; 2],
            _page_services: [0; 3],
            allocate_pool,
            free_pool,
            _event_services: [0; 6],
            _protocol_handler_services: [0; 9],
            _image_services: [0; 5],
            _misc_services: [0; 3],
            _driver_services: [0; 2],
            _open_close_services: [0; 3],
            _library_services: [0; 2],
            locate_protocol,
        }
    }

    /// Allocate pool memory
    ///
    /// # Safety
    /// The caller must ensure boot services are available.
    pub unsafe fn allocate_pool(
        &self,
        pool_type: MemoryType,
        size: usize,
    ) -> Result<*mut u8, Status> {
        let mut buffer = core::ptr::null_mut();
        let status = unsafe { (self.allocate_pool)(pool_type, size, &mut buffer) };
        status.to_status_result_with(buffer)
    }

    /// Free pool memory
    ///
    /// # Safety
    /// The caller must ensure the buffer was allocated with allocate_pool.
    pub unsafe fn free_pool(&self, buffer: *mut u8) -> Result<(), Status> {
        let status = unsafe { (self.free_pool)(buffer) };
        status.to_status_result()
    }

    /// Locate a protocol by GUID
    ///
    /// # Safety
    /// The caller must ensure boot services are available.
    pub unsafe fn locate_protocol<T>(&self, guid: &Guid) -> Result<*mut T, Status> {
        let mut interface = core::ptr::null_mut();
        let status = unsafe { (self.locate_protocol)(guid, core::ptr::null_mut(), &mut interface) };
        status.to_status_result_with(interface.cast::<T>())
    }
}

impl core::fmt::Debug for EfiBootServices {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EfiBootServices")
            .field("hdr", &self.hdr)
            .finish_non_exhaustive()
    }
}

static_assertions::const_assert_eq!(
    core::mem::offset_of!(EfiBootServices, allocate_pool),
    24 + 5 * core::mem::size_of::<usize>()
);
static_assertions::const_assert_eq!(
    core::mem::offset_of!(EfiBootServices, locate_protocol),
    24 + 37 * core::mem::size_of::<usize>()
);
