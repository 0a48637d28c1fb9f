//! Seam between the render loop and platform graphics.

use crate::error::OverlayResult;
use crate::model::RenderConfig;

/// Outcome of presenting one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawStatus {
    /// Frame presented normally.
    Presented,
    /// The graphics surface was lost; resources must be recreated before
    /// the next frame.
    DeviceLost,
}

/// Platform rendering backend driven by the render loop.
///
/// An implementation owns the window handle and every graphics resource for
/// the lifetime of the render thread; the controller thread never touches
/// them. The Win32 implementation composes `OverlayWindow` and
/// `TextRenderer`; tests drive the loop with an instrumented double.
pub trait RenderBackend {
    /// Create the window and graphics resources sized to the target
    /// display. Called once before the first frame; failure aborts the
    /// start attempt.
    fn initialize(&mut self, config: &RenderConfig) -> OverlayResult<()>;

    /// Drain all pending window messages without blocking. Runs once per
    /// loop iteration.
    fn pump_messages(&mut self);

    /// Rebuild the text format after a style change. Never called
    /// per-frame.
    fn rebuild_text_style(&mut self, config: &RenderConfig) -> OverlayResult<()>;

    /// Draw one frame from the front config.
    fn draw_frame(&mut self, config: &RenderConfig) -> OverlayResult<DrawStatus>;

    /// Recreate graphics resources after device loss. The window and the
    /// display selection survive recovery.
    fn recover(&mut self, config: &RenderConfig) -> OverlayResult<()>;

    /// Release everything still held, window included. Idempotent; runs on
    /// every exit path.
    fn shutdown(&mut self);
}
