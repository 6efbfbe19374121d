//! Raw UEFI bindings
//!
//! Raw, unsafe bindings to the UEFI structures the boot graphics path
//! needs: status codes, the Boot Services pool allocator and the
//! Graphics Output Protocol.
//!
//! # Safety
//!
//! All types in this module are raw FFI types. Using them directly is unsafe
//! and requires understanding the UEFI specification.

pub mod types;
pub mod memory;
pub mod boot_services;
pub mod protocols;

// Re-export main types
pub use types::*;
pub use memory::MemoryType;
pub use boot_services::EfiBootServices;
