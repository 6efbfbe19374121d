//! Boot Services Wrappers

pub mod memory;

pub use memory::PoolAllocator;
