//! Controller-facing overlay handle.
//!
//! [`TextOverlay`] owns the render-thread handle, the running flag, and the
//! config channel. Exactly two threads ever exist: the caller's and one
//! render thread per `start`, joined on `stop` or drop.

pub mod backend;
mod render_loop;

pub use backend::{DrawStatus, RenderBackend};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::JoinHandle;

use log::{info, warn};

use crate::channel::ConfigChannel;
use crate::error::{OverlayError, OverlayResult};
use crate::model::{Color, DisplayInfo, FontWeight, RenderConfig};

/// A borderless, click-through, always-on-top text overlay over one
/// physical display.
///
/// All `update_*` calls write the back config and return immediately; the
/// render thread picks the latest value up on its next iteration.
pub struct TextOverlay {
    channel: Arc<ConfigChannel>,
    running: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl TextOverlay {
    pub fn new() -> Self {
        Self {
            channel: Arc::new(ConfigChannel::new(RenderConfig::default())),
            running: Arc::new(AtomicBool::new(false)),
            thread: None,
        }
    }

    /// Start rendering `initial_text` over the display at `display_index`.
    ///
    /// Enumerates displays fresh, validates the index before anything is
    /// spawned, then blocks until the render thread reports that window and
    /// graphics initialization succeeded or failed.
    #[cfg(target_os = "windows")]
    pub fn start(&mut self, initial_text: &str, display_index: usize) -> OverlayResult<()> {
        let displays = crate::platform::windows::display::enumerate()?;
        self.start_with_backend(initial_text, display_index, displays, |display| {
            crate::platform::windows::Win32Backend::new(display)
        })
    }

    /// Start with a caller-supplied backend factory.
    ///
    /// `displays` is the freshly enumerated list the requested index is
    /// validated against; the factory runs on the render thread, which owns
    /// the backend for its whole lifetime.
    pub fn start_with_backend<B, F>(
        &mut self,
        initial_text: &str,
        display_index: usize,
        displays: Vec<DisplayInfo>,
        factory: F,
    ) -> OverlayResult<()>
    where
        B: RenderBackend + 'static,
        F: FnOnce(DisplayInfo) -> OverlayResult<B> + Send + 'static,
    {
        if self.running.load(Ordering::SeqCst) {
            return Err(OverlayError::AlreadyRunning);
        }
        // A loop that exited on its own leaves a finished thread behind.
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }

        if displays.is_empty() {
            return Err(OverlayError::NoDisplays);
        }
        let count = displays.len();
        let display = *displays
            .get(display_index)
            .ok_or(OverlayError::DisplayIndexOutOfRange {
                index: display_index,
                count,
            })?;

        let initial = RenderConfig::new(initial_text);
        self.channel.reset(initial.clone());

        let (ready_tx, ready_rx) = mpsc::channel();
        let channel = Arc::clone(&self.channel);
        let running = Arc::clone(&self.running);
        self.running.store(true, Ordering::SeqCst);

        let spawned = std::thread::Builder::new()
            .name("textveil-render".into())
            .spawn(move || match factory(display) {
                Ok(backend) => render_loop::run(backend, channel, running, initial, ready_tx),
                Err(err) => {
                    running.store(false, Ordering::SeqCst);
                    let _ = ready_tx.send(Err(err));
                }
            });

        let handle = match spawned {
            Ok(handle) => handle,
            Err(err) => {
                self.running.store(false, Ordering::SeqCst);
                return Err(OverlayError::Startup(err.to_string()));
            }
        };
        self.thread = Some(handle);

        match ready_rx.recv() {
            Ok(Ok(())) => {
                info!("overlay started on display {display_index}");
                Ok(())
            }
            Ok(Err(err)) => {
                self.join_render_thread();
                Err(err)
            }
            // The thread died before reporting: its panic was the outcome.
            Err(_) => {
                self.running.store(false, Ordering::SeqCst);
                self.join_render_thread();
                Err(OverlayError::Startup(
                    "render thread exited before initialization completed".into(),
                ))
            }
        }
    }

    /// Stop rendering and release every resource. Idempotent; returns once
    /// the render thread has fully joined.
    pub fn stop(&mut self) -> bool {
        self.running.store(false, Ordering::SeqCst);
        self.join_render_thread();
        true
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Replace the displayed text. UTF-8 is decoded to UTF-16 once, here.
    pub fn update_text(&self, text: &str) {
        self.channel.set_text(text);
    }

    /// Move the text anchor, in device-independent pixels from the
    /// display's top-left corner.
    pub fn update_position(&self, x: f32, y: f32) {
        self.channel.set_position(x, y);
    }

    /// Change font size and weight. The integer weight is clamped onto the
    /// 100-900 scale; triggers one text-format rebuild on the render
    /// thread.
    pub fn update_style(&self, font_size: f32, font_weight: i32) {
        self.channel
            .set_style(font_size, FontWeight::from_value(font_weight));
    }

    /// Change the text color; components are clamped to [0.0, 1.0]. No
    /// resource rebuild, only a new draw.
    pub fn update_color(&self, r: f32, g: f32, b: f32, a: f32) {
        self.channel.set_color(Color::new(r, g, b, a));
    }

    /// Combined position + text update, equivalent to calling
    /// [`update_position`](Self::update_position) and
    /// [`update_text`](Self::update_text) in one critical section.
    pub fn update_all(&self, x: f32, y: f32, text: &str) {
        self.channel.set_all(x, y, text);
    }

    fn join_render_thread(&mut self) {
        if let Some(handle) = self.thread.take() {
            if handle.join().is_err() {
                warn!("render thread terminated by panic");
            }
        }
    }
}

impl Default for TextOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TextOverlay {
    // The thread must be joined before anything else is torn down.
    fn drop(&mut self) {
        self.stop();
    }
}
