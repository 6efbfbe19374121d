//! Error types for the boot graphics path
//!
//! Only one failure is ever propagated to callers: the memory provider
//! refusing a backbuffer. Everything else (missing display, missing
//! backbuffer, glyphs off screen) degrades to a silent no-op.

use core::fmt;
use crate::raw::types::Status;

/// Result type for boot graphics operations
pub type Result<T> = core::result::Result<T, Error>;

/// Boot graphics error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A parameter was incorrect
    InvalidParameter,

    /// The operation is not supported
    Unsupported,

    /// The buffer was too small
    BufferTooSmall,

    /// The physical device reported an error
    DeviceError,

    /// A resource has run out
    OutOfResources,

    /// The item was not found
    NotFound,

    /// Graphics Output Protocol not present
    ProtocolNotFound,

    /// Backbuffer allocation failed
    AllocationFailed,

    /// Unknown error with status code
    Unknown(usize),
}

impl Error {
    /// Create error from UEFI status code
    pub fn from_status(status: Status) -> Self {
        match status {
            Status::INVALID_PARAMETER => Self::InvalidParameter,
            Status::UNSUPPORTED => Self::Unsupported,
            Status::BUFFER_TOO_SMALL => Self::BufferTooSmall,
            Status::DEVICE_ERROR => Self::DeviceError,
            Status::OUT_OF_RESOURCES => Self::OutOfResources,
            Status::NOT_FOUND => Self::NotFound,
            Status(code) => Self::Unknown(code),
        }
    }

    /// Check if this is a resource error
    pub fn is_resource_error(&self) -> bool {
        matches!(self, Self::OutOfResources | Self::AllocationFailed | Self::BufferTooSmall)
    }

    /// Get error name as string
    pub fn name(&self) -> &'static str {
        match self {
            Self::InvalidParameter => "INVALID_PARAMETER",
            Self::Unsupported => "UNSUPPORTED",
            Self::BufferTooSmall => "BUFFER_TOO_SMALL",
            Self::DeviceError => "DEVICE_ERROR",
            Self::OutOfResources => "OUT_OF_RESOURCES",
            Self::NotFound => "NOT_FOUND",
            Self::ProtocolNotFound => "PROTOCOL_NOT_FOUND",
            Self::AllocationFailed => "ALLOCATION_FAILED",
            Self::Unknown(_) => "UNKNOWN",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(code) => write!(f, "UNKNOWN(0x{:X})", code),
            other => f.write_str(other.name()),
        }
    }
}

impl From<Status> for Error {
    fn from(status: Status) -> Self {
        Self::from_status(status)
    }
}

// =============================================================================
// ALLOCATION ERROR
// =============================================================================

/// The memory provider could not satisfy a backbuffer request
///
/// Fatal to the current frame only: the caller skips composite and
/// present and may try again on the next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationError {
    /// Bytes requested (saturated when `stride * height * 4` overflows)
    pub size: usize,
    /// Failure reported by the provider
    pub cause: Error,
}

impl AllocationError {
    /// Create a new allocation error
    pub const fn new(size: usize, cause: Error) -> Self {
        Self { size, cause }
    }
}

impl fmt::Display for AllocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "backbuffer allocation of {} bytes failed: {}", self.size, self.cause)
    }
}

impl From<AllocationError> for Error {
    fn from(_: AllocationError) -> Self {
        Self::AllocationFailed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status() {
        assert_eq!(Error::from_status(Status::OUT_OF_RESOURCES), Error::OutOfResources);
        assert_eq!(Error::from(Status(42)), Error::Unknown(42));
        assert!(Error::from(AllocationError::new(16, Error::OutOfResources)).is_resource_error());
    }

    #[test]
    fn test_display() {
        assert_eq!(Error::DeviceError.to_string(), "DEVICE_ERROR");
        assert_eq!(
            AllocationError::new(64, Error::OutOfResources).to_string(),
            "backbuffer allocation of 64 bytes failed: OUT_OF_RESOURCES"
        );
    }
}
