//! High-Level Protocol Abstractions
//!
//! Safe wrappers that put firmware protocols behind the crate's traits.

pub mod graphics;

pub use graphics::GopDisplay;
