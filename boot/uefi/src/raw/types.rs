//! Raw UEFI type definitions
//!
//! The handful of fundamental UEFI types the boot graphics path touches.
//! These types are binary-compatible with the UEFI ABI.

use core::fmt;

use static_assertions::assert_eq_size;

// =============================================================================
// BASIC TYPES
// =============================================================================

/// Physical memory address
pub type PhysicalAddress = u64;

// =============================================================================
// STATUS
// =============================================================================

/// UEFI status code
///
/// The high bit indicates an error (1) vs warning/success (0).
#[derive(Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct Status(pub usize);

impl Status {
    /// Error bit mask
    const ERROR_BIT: usize = 1usize << (usize::BITS - 1);

    /// Success
    pub const SUCCESS: Self = Self(0);

    /// A parameter was incorrect
    pub const INVALID_PARAMETER: Self = Self(Self::ERROR_BIT | 2);
    /// The operation is not supported
    pub const UNSUPPORTED: Self = Self(Self::ERROR_BIT | 3);
    /// The buffer was too small
    pub const BUFFER_TOO_SMALL: Self = Self(Self::ERROR_BIT | 5);
    /// The physical device reported an error
    pub const DEVICE_ERROR: Self = Self(Self::ERROR_BIT | 7);
    /// A resource has run out
    pub const OUT_OF_RESOURCES: Self = Self(Self::ERROR_BIT | 9);
    /// The item was not found
    pub const NOT_FOUND: Self = Self(Self::ERROR_BIT | 14);

    /// Check if this is a success status
    pub const fn is_success(self) -> bool {
        self.0 == 0
    }

    /// Check if this is an error status
    pub const fn is_error(self) -> bool {
        (self.0 & Self::ERROR_BIT) != 0
    }

    /// Check if this is a warning status
    pub const fn is_warning(self) -> bool {
        !self.is_success() && !self.is_error()
    }

    /// Convert to a unit result, Status as error type
    pub fn to_status_result(self) -> Result<(), Self> {
        self.to_status_result_with(())
    }

    /// Convert to Result with a value on success, Status as error type
    pub fn to_status_result_with<T>(self, value: T) -> Result<T, Self> {
        if self.is_success() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Debug for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            Self::SUCCESS => "SUCCESS",
            Self::INVALID_PARAMETER => "INVALID_PARAMETER",
            Self::UNSUPPORTED => "UNSUPPORTED",
            Self::BUFFER_TOO_SMALL => "BUFFER_TOO_SMALL",
            Self::DEVICE_ERROR => "DEVICE_ERROR",
            Self::OUT_OF_RESOURCES => "OUT_OF_RESOURCES",
            Self::NOT_FOUND => "NOT_FOUND",
            _ => return write!(f, "Status(0x{:X})", self.0),
        };
        write!(f, "Status::{}", name)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        <Self as fmt::Debug>::fmt(self, f)
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::SUCCESS
    }
}

// =============================================================================
// GUID
// =============================================================================

/// UEFI Globally Unique Identifier (GUID)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(C)]
pub struct Guid {
    /// First component
    pub data1: u32,
    /// Second component
    pub data2: u16,
    /// Third component
    pub data3: u16,
    /// Fourth component
    pub data4: [u8; 8],
}

impl Guid {
    /// Create a GUID from its components
    pub const fn new(data1: u32, data2: u16, data3: u16, data4: [u8; 8]) -> Self {
        Self { data1, data2, data3, data4 }
    }
}

/// Well-known protocol GUIDs
pub mod guids {
    use super::Guid;

    /// EFI_GRAPHICS_OUTPUT_PROTOCOL_GUID
    pub const GRAPHICS_OUTPUT_PROTOCOL: Guid = Guid::new(
        0x9042A9DE, 0x23DC, 0x4A38,
        [0x96, 0xFB, 0x7A, 0xDE, 0xD0, 0x80, 0x51, 0x6A]
    );
}

// =============================================================================
// TABLE HEADER
// =============================================================================

/// Common header of every UEFI service table
#[derive(Debug, Clone, Copy)]
#[repr(C)]
pub struct TableHeader {
    /// Signature identifying the table
    pub signature: u64,
    /// Revision of the table
    pub revision: u32,
    /// Size of the entire table including header
    pub header_size: u32,
    /// CRC32 of the entire table
    pub crc32: u32,
    /// Reserved (must be zero)
    pub reserved: u32,
}

assert_eq_size!(Status, usize);
assert_eq_size!(Guid, [u8; 16]);
assert_eq_size!(TableHeader, [u8; 24]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classes() {
        assert!(Status::SUCCESS.is_success());
        assert!(Status::OUT_OF_RESOURCES.is_error());
        assert!(Status(1).is_warning());
        assert_eq!(Status::DEVICE_ERROR.to_status_result(), Err(Status::DEVICE_ERROR));
        assert_eq!(Status::SUCCESS.to_status_result_with(7), Ok(7));
    }
}
