//! Double-buffered handoff of render parameters.
//!
//! Single producer (the controller), single consumer (the render loop),
//! latest-value-wins: a burst of updates collapses to the most recent value
//! by the time the loop next drains. The outer atomic flag keeps the hot
//! render path lock-free when nothing changed; the mutex is held only for
//! field assignment.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::model::constants::{MAX_FONT_SIZE, MIN_FONT_SIZE};
use crate::model::render_config::utf16_units;
use crate::model::{Color, FontWeight, RenderConfig};

/// Mutex-guarded back copy plus a dirty flag.
pub struct ConfigChannel {
    pending: Mutex<RenderConfig>,
    dirty: AtomicBool,
}

impl ConfigChannel {
    pub fn new(initial: RenderConfig) -> Self {
        Self {
            pending: Mutex::new(initial),
            dirty: AtomicBool::new(false),
        }
    }

    // Writers only assign fields while holding the lock; a poisoned mutex
    // still contains a coherent config, so recover the guard.
    fn lock_pending(&self) -> MutexGuard<'_, RenderConfig> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::SeqCst);
    }

    pub fn set_text(&self, text: &str) {
        let units = utf16_units(text);
        self.lock_pending().text = units;
        self.mark_dirty();
    }

    pub fn set_position(&self, x: f32, y: f32) {
        {
            let mut pending = self.lock_pending();
            pending.x = x;
            pending.y = y;
        }
        self.mark_dirty();
    }

    /// Update font size and weight. Size is clamped to the model limits;
    /// the weight has already been mapped onto the enumeration.
    pub fn set_style(&self, font_size: f32, weight: FontWeight) {
        {
            let mut pending = self.lock_pending();
            pending.font_size = font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
            pending.font_weight = weight;
            pending.style_dirty = true;
        }
        self.mark_dirty();
    }

    pub fn set_color(&self, color: Color) {
        self.lock_pending().color = color;
        self.mark_dirty();
    }

    /// Combined position + text update in one critical section.
    pub fn set_all(&self, x: f32, y: f32, text: &str) {
        let units = utf16_units(text);
        {
            let mut pending = self.lock_pending();
            pending.x = x;
            pending.y = y;
            pending.text = units;
        }
        self.mark_dirty();
    }

    /// Copy the back config out if anything changed since the last drain.
    ///
    /// Called only by the render loop. Tests-and-clears the outer flag
    /// without touching the lock when clear. The back copy's `style_dirty`
    /// is reset while the lock is held so one style change produces exactly
    /// one text-format rebuild.
    pub fn drain_if_dirty(&self) -> Option<RenderConfig> {
        if !self.dirty.swap(false, Ordering::SeqCst) {
            return None;
        }
        let mut pending = self.lock_pending();
        let snapshot = pending.clone();
        pending.style_dirty = false;
        Some(snapshot)
    }

    /// Replace the back config wholesale (start-time seeding).
    pub(crate) fn reset(&self, config: RenderConfig) {
        *self.lock_pending() = config;
        self.dirty.store(false, Ordering::SeqCst);
    }
}
