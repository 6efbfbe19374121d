//! Raw Memory Types
//!
//! The memory type passed to pool allocations.

use core::fmt;

/// UEFI Memory Type
///
/// Transparent so that values outside the enumerated set can be
/// represented without undefined behavior.
#[derive(Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct MemoryType(pub u32);

impl MemoryType {
    /// Loader code
    pub const LOADER_CODE: Self = Self(1);
    /// Loader data
    pub const LOADER_DATA: Self = Self(2);
    /// Boot services data (reclaimable after ExitBootServices)
    pub const BOOT_SERVICES_DATA: Self = Self(4);
}

impl fmt::Debug for MemoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::LOADER_CODE => f.write_str("LoaderCode"),
            Self::LOADER_DATA => f.write_str("LoaderData"),
            Self::BOOT_SERVICES_DATA => f.write_str("BootServicesData"),
            _ => write!(f, "MemoryType({})", self.0),
        }
    }
}
