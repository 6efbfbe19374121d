//! Display Modes and Backbuffer Management for Helix UEFI Boot Graphics
//!
//! This module turns what the firmware reports about its display into
//! the session's [`Mode`] and owns the off-screen memory the compositor
//! draws into.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Boot Graphics Pipeline                           │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌────────────────┐   ┌────────────────┐   ┌────────────────┐           │
//! │  │ Mode Selector  │──▶│  Backbuffer    │──▶│  Compositor    │           │
//! │  │ (mode.rs)      │   │ (backbuffer.rs)│   │  fill / glyph  │           │
//! │  └────────────────┘   └────────────────┘   └────────────────┘           │
//! │          │                                          │                   │
//! │          ▼                                          ▼                   │
//! │  ┌────────────────┐                        ┌────────────────┐           │
//! │  │ Format Resolver│                        │   Presenter    │           │
//! │  │ (format.rs)    │                        │   (blit)       │           │
//! │  └────────────────┘                        └────────────────┘           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod format;
pub mod mode;
pub mod backbuffer;

pub use format::{ColorLayout, PixelFormat};
pub use mode::{select_best_mode, DisplaySurface, Mode, ModeInfo};
pub use backbuffer::{release, Backbuffer, MemoryProvider};
