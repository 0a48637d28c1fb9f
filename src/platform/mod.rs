//! Platform-specific implementations.
//!
//! Each platform gets its own submodule with implementations of:
//! - Display enumeration
//! - The overlay window (layered, click-through, topmost)
//! - Text rendering
//! - Storage (defaults persistence)

#[cfg(target_os = "windows")]
pub mod windows;
