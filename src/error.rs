//! Central error types for textveil.
//!
//! Startup problems are surfaced synchronously through these variants;
//! steady-state render failures are logged by the render thread and never
//! cross the thread boundary.

use thiserror::Error;

/// Main error type for overlay operations.
#[derive(Error, Debug)]
pub enum OverlayError {
    /// A render thread is already active for this overlay
    #[error("overlay is already running")]
    AlreadyRunning,

    /// Requested display index not present in the enumerated list
    #[error("display index {index} out of range ({count} displays attached)")]
    DisplayIndexOutOfRange { index: usize, count: usize },

    /// Enumeration produced no displays
    #[error("no displays attached")]
    NoDisplays,

    /// Overlay window could not be created
    #[error("window creation failed: {0}")]
    WindowCreation(String),

    /// Graphics resource (factory, render target, text format, brush)
    /// could not be created
    #[error("graphics error: {0}")]
    Graphics(String),

    /// Render thread failed before reporting initialization
    #[error("startup failed: {0}")]
    Startup(String),
}

#[cfg(target_os = "windows")]
impl From<windows::core::Error> for OverlayError {
    fn from(err: windows::core::Error) -> Self {
        OverlayError::Graphics(err.to_string())
    }
}

/// Type alias for Results using OverlayError.
pub type OverlayResult<T> = Result<T, OverlayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_display_message() {
        let err = OverlayError::DisplayIndexOutOfRange { index: 3, count: 2 };
        assert_eq!(
            err.to_string(),
            "display index 3 out of range (2 displays attached)"
        );
    }

    #[test]
    fn already_running_message() {
        assert_eq!(
            OverlayError::AlreadyRunning.to_string(),
            "overlay is already running"
        );
    }
}
