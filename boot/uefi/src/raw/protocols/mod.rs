//! Raw UEFI Protocol Definitions
//!
//! Low-level structures matching the UEFI specification exactly.

pub mod gop;

pub use gop::*;
