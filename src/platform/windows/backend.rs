//! Win32 realization of the render backend.
//!
//! Composes the overlay window and the Direct2D renderer behind the
//! [`RenderBackend`] seam. Constructed on the render thread; the COM
//! apartment, the window, and every graphics resource live and die there.

use log::debug;
use windows::Win32::System::Com::{CoInitializeEx, CoUninitialize, COINIT_APARTMENTTHREADED};

use crate::error::{OverlayError, OverlayResult};
use crate::model::{DisplayInfo, RenderConfig};
use crate::overlay::{DrawStatus, RenderBackend};

use super::renderer::TextRenderer;
use super::window::OverlayWindow;

/// Keeps COM initialized for the lifetime of the render thread.
struct ComApartment;

impl ComApartment {
    fn new() -> OverlayResult<Self> {
        unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED).ok()? };
        Ok(Self)
    }
}

impl Drop for ComApartment {
    fn drop(&mut self) {
        unsafe { CoUninitialize() };
    }
}

/// Win32 backend for one overlay session.
// Field order is drop order: COM objects before the window, the apartment
// last.
pub struct Win32Backend {
    renderer: TextRenderer,
    window: Option<OverlayWindow>,
    display: DisplayInfo,
    _com: ComApartment,
}

impl Win32Backend {
    /// Build the backend for the resolved display. Must run on the render
    /// thread.
    pub fn new(display: DisplayInfo) -> OverlayResult<Self> {
        let com = ComApartment::new()?;
        let renderer = TextRenderer::new()?;
        Ok(Self {
            renderer,
            window: None,
            display,
            _com: com,
        })
    }
}

impl RenderBackend for Win32Backend {
    fn initialize(&mut self, config: &RenderConfig) -> OverlayResult<()> {
        let window = OverlayWindow::create(&self.display.bounds)?;
        // If renderer setup fails the window drops right here, so a partial
        // start never leaks a visible window.
        self.renderer.initialize(&window, config)?;
        self.window = Some(window);
        Ok(())
    }

    fn pump_messages(&mut self) {
        if let Some(window) = &self.window {
            window.pump_messages();
        }
    }

    fn rebuild_text_style(&mut self, config: &RenderConfig) -> OverlayResult<()> {
        self.renderer
            .rebuild_text_format(config.font_size, config.font_weight)
    }

    fn draw_frame(&mut self, config: &RenderConfig) -> OverlayResult<DrawStatus> {
        self.renderer.draw_frame(config)
    }

    fn recover(&mut self, config: &RenderConfig) -> OverlayResult<()> {
        // Graphics resources are rebuilt against the live window; the
        // display selection and the window itself survive recovery.
        let window = self.window.as_ref().ok_or_else(|| {
            OverlayError::Graphics("device-loss recovery without a window".into())
        })?;
        self.renderer.release_graphics();
        self.renderer.initialize(window, config)
    }

    fn shutdown(&mut self) {
        self.renderer.release_graphics();
        self.window = None;
        debug!("win32 backend shut down (display {})", self.display.index);
    }
}
