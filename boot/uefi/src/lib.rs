//! # Helix UEFI Boot Graphics
//!
//! Boot-time framebuffer for a UEFI loader: pick the best display mode,
//! compose text into an off-screen backbuffer and copy finished frames
//! to the screen.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! - **Layer 0 (raw)**: Raw UEFI bindings for status codes, Boot Services
//!   pool memory and the Graphics Output Protocol
//! - **Layer 1 (services, protocols)**: Firmware adapters behind the
//!   [`DisplaySurface`] and [`MemoryProvider`] traits
//! - **Layer 2 (framebuffer)**: Pixel format resolution, mode selection
//!   and backbuffer ownership
//! - **Layer 3 (graphics)**: Fill, glyph blending and presentation
//!
//! ## Quick Start
//!
//! ```rust
//! use helix_uefi_gfx::prelude::*;
//! use helix_uefi_gfx::testing::{MockDisplay, MockMemory};
//!
//! let mut display = MockDisplay::new(&[
//!     ModeInfo::new(800, 600, 800, ColorLayout::FixedBgr),
//!     ModeInfo::new(1920, 1080, 1920, ColorLayout::FixedBgr),
//! ]);
//! let mut memory = MockMemory::new();
//!
//! let mode = select_best_mode(Some(&mut display));
//! let mut frame = Backbuffer::allocate(mode, &mut memory).unwrap();
//!
//! fill(&mut frame, mode.format.pack(0, 0, 0x40));
//! draw_glyph(&mut frame, mode.format, b'H', mode.format.pack(0xFF, 0xFF, 0xFF), 16, 16, 2);
//! blit(Some(&frame), Some(&mut display));
//! frame.release();
//!
//! assert_eq!(display.blits.len(), 1);
//! ```
//!
//! On firmware, [`protocols::GopDisplay`] and [`services::PoolAllocator`]
//! take the place of the test doubles.
//!
//! ## Features
//!
//! - `gop` - Graphics Output Protocol and pool allocator adapters (default)

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

extern crate alloc;

// =============================================================================
// MODULES
// =============================================================================

/// Raw UEFI bindings (Layer 0)
///
/// All types here are `#[repr(C)]` and match the UEFI ABI exactly.
pub mod raw;

/// Safe service wrappers (Layer 1)
#[cfg(feature = "gop")]
pub mod services;

/// Protocol abstractions (Layer 1)
#[cfg(feature = "gop")]
pub mod protocols;

/// Error types
pub mod error;

/// Display modes and backbuffer management (Layer 2)
pub mod framebuffer;

/// Glyph atlas
pub mod font;

/// Compositing and presentation (Layer 3)
pub mod graphics;

/// Test doubles for the firmware traits
pub mod testing;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use error::{AllocationError, Error, Result};
pub use framebuffer::{Backbuffer, DisplaySurface, MemoryProvider, Mode, PixelFormat};

/// Prelude for common imports
pub mod prelude {
    pub use crate::error::{AllocationError, Error, Result};
    pub use crate::font::{GlyphAtlas, GLYPH_HEIGHT, GLYPH_WIDTH};
    pub use crate::framebuffer::{
        release, select_best_mode, Backbuffer, ColorLayout, DisplaySurface, MemoryProvider, Mode,
        ModeInfo, PixelFormat,
    };
    pub use crate::graphics::{blit, draw_glyph, draw_glyph_with, fill};

    #[cfg(feature = "gop")]
    pub use crate::protocols::GopDisplay;
    #[cfg(feature = "gop")]
    pub use crate::services::PoolAllocator;
}
