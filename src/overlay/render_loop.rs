//! The dedicated render thread: message pump, config drain, frame pacing,
//! device-loss recovery.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, error, warn};

use crate::channel::ConfigChannel;
use crate::error::OverlayResult;
use crate::model::constants::{FRAME_BUDGET_MS, PACING_SLEEP_MS};
use crate::model::RenderConfig;
use crate::overlay::backend::{DrawStatus, RenderBackend};

/// Render-thread entry point.
///
/// Reports the initialization outcome through `ready` exactly once, then
/// loops until the running flag clears or a non-recoverable failure occurs.
/// Cleanup runs on every exit path, panics included, and the running flag is
/// always consistent with thread liveness by the time this returns.
pub(crate) fn run<B: RenderBackend>(
    mut backend: B,
    channel: Arc<ConfigChannel>,
    running: Arc<AtomicBool>,
    mut front: RenderConfig,
    ready: Sender<OverlayResult<()>>,
) {
    if let Err(err) = backend.initialize(&front) {
        backend.shutdown();
        running.store(false, Ordering::SeqCst);
        let _ = ready.send(Err(err));
        return;
    }
    let _ = ready.send(Ok(()));
    debug!("render loop running");

    let outcome = catch_unwind(AssertUnwindSafe(|| {
        drive(&mut backend, &channel, &running, &mut front)
    }));
    if outcome.is_err() {
        error!("render loop panicked; shutting down overlay");
    }

    // Resources are released before the flag clears, so a caller polling
    // `is_running` never observes "stopped" while cleanup is still pending.
    backend.shutdown();
    running.store(false, Ordering::SeqCst);
    debug!("render loop exited");
}

/// Steady-state loop body. Returning (for any reason) hands control back to
/// [`run`], which owns cleanup.
fn drive<B: RenderBackend>(
    backend: &mut B,
    channel: &ConfigChannel,
    running: &AtomicBool,
    front: &mut RenderConfig,
) {
    let frame_budget = Duration::from_millis(FRAME_BUDGET_MS);
    let mut last_frame: Option<Instant> = None;

    while running.load(Ordering::SeqCst) {
        backend.pump_messages();

        if let Some(pending) = channel.drain_if_dirty() {
            if pending.style_dirty {
                if let Err(err) = backend.rebuild_text_style(&pending) {
                    error!("text style rebuild failed: {err}");
                    return;
                }
            }
            *front = pending;
            front.style_dirty = false;
        }

        // Hold the target rate with a short bounded sleep and re-check;
        // never busy-spin, never block without a time bound.
        if let Some(t) = last_frame {
            if t.elapsed() < frame_budget {
                std::thread::sleep(Duration::from_millis(PACING_SLEEP_MS));
                continue;
            }
        }

        match backend.draw_frame(front) {
            Ok(DrawStatus::Presented) => last_frame = Some(Instant::now()),
            Ok(DrawStatus::DeviceLost) => {
                warn!("graphics device lost; recreating resources");
                if let Err(err) = backend.recover(front) {
                    error!("device-loss recovery failed: {err}");
                    return;
                }
            }
            Err(err) => {
                error!("frame draw failed: {err}");
                return;
            }
        }
    }
}
