//! Configuration constants and default values.
//!
//! This module contains all application constants including text style
//! defaults, validation limits, and render-loop timing.

// === Text Style Defaults ===

/// Default font size in device-independent pixels.
pub const DEFAULT_FONT_SIZE: f32 = 48.0;

/// Default text color (R, G, B, A) - white, fully opaque.
pub const DEFAULT_COLOR: (f32, f32, f32, f32) = (1.0, 1.0, 1.0, 1.0);

/// Font family used for every text format.
pub const DEFAULT_FONT_FAMILY: &str = "Arial";

// === Validation Limits ===

/// Minimum font size in pixels.
pub const MIN_FONT_SIZE: f32 = 4.0;

/// Maximum font size in pixels.
pub const MAX_FONT_SIZE: f32 = 512.0;

// === Render Loop Timing ===

/// Per-frame budget in milliseconds (~60 fps upper bound).
pub const FRAME_BUDGET_MS: u64 = 16;

/// Sleep granularity while waiting out the frame budget.
pub const PACING_SLEEP_MS: u64 = 1;

// === Window ===

/// Whole-window alpha applied once at creation (20% of 255).
pub const WINDOW_ALPHA: u8 = 51;
