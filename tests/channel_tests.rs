//! Tests for the double-buffered config channel.

use textveil::model::constants::{MAX_FONT_SIZE, MIN_FONT_SIZE};
use textveil::model::{Color, FontWeight, RenderConfig};
use textveil::ConfigChannel;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-6
}

// === Drain Semantics ===

#[test]
fn drain_returns_none_when_clean() {
    let channel = ConfigChannel::new(RenderConfig::default());
    assert!(channel.drain_if_dirty().is_none());
}

#[test]
fn drain_returns_pending_config_once() {
    let channel = ConfigChannel::new(RenderConfig::default());
    channel.set_text("hello");

    let drained = channel.drain_if_dirty().expect("dirty after set_text");
    assert_eq!(drained.text_lossy(), "hello");

    // Nothing new since the drain.
    assert!(channel.drain_if_dirty().is_none());
}

#[test]
fn latest_value_wins_for_rapid_updates() {
    let channel = ConfigChannel::new(RenderConfig::default());
    channel.set_position(1.0, 1.0);
    channel.set_position(2.0, 2.0);
    channel.set_position(3.0, 3.0);

    let drained = channel.drain_if_dirty().expect("dirty after updates");
    assert!(approx_eq(drained.x, 3.0));
    assert!(approx_eq(drained.y, 3.0));
    assert!(channel.drain_if_dirty().is_none());
}

#[test]
fn updates_accumulate_across_field_groups() {
    let channel = ConfigChannel::new(RenderConfig::default());
    channel.set_text("hello");
    channel.set_position(5.0, 6.0);

    let drained = channel.drain_if_dirty().expect("dirty");
    assert_eq!(drained.text_lossy(), "hello");
    assert!(approx_eq(drained.x, 5.0));
    assert!(approx_eq(drained.y, 6.0));
}

// === Style Rebuild Gating ===

#[test]
fn position_update_does_not_mark_style_dirty() {
    let channel = ConfigChannel::new(RenderConfig::default());
    channel.set_position(10.0, 20.0);

    let drained = channel.drain_if_dirty().expect("dirty");
    assert!(!drained.style_dirty);
}

#[test]
fn style_update_marks_style_dirty_exactly_once() {
    let channel = ConfigChannel::new(RenderConfig::default());
    channel.set_style(24.0, FontWeight::Normal);

    let first = channel.drain_if_dirty().expect("dirty after set_style");
    assert!(first.style_dirty);
    assert!(approx_eq(first.font_size, 24.0));
    assert_eq!(first.font_weight, FontWeight::Normal);

    // A later position change must not resurrect the style flag.
    channel.set_position(1.0, 1.0);
    let second = channel.drain_if_dirty().expect("dirty after set_position");
    assert!(!second.style_dirty);
}

#[test]
fn color_update_does_not_mark_style_dirty() {
    let channel = ConfigChannel::new(RenderConfig::default());
    channel.set_color(Color::new(1.0, 0.0, 0.0, 1.0));

    let drained = channel.drain_if_dirty().expect("dirty");
    assert!(!drained.style_dirty);
    assert!(approx_eq(drained.color.r, 1.0));
    assert!(approx_eq(drained.color.g, 0.0));
}

// === Boundary Clamping ===

#[test]
fn set_style_clamps_font_size_low() {
    let channel = ConfigChannel::new(RenderConfig::default());
    channel.set_style(0.0, FontWeight::Bold);

    let drained = channel.drain_if_dirty().expect("dirty");
    assert!(approx_eq(drained.font_size, MIN_FONT_SIZE));
}

#[test]
fn set_style_clamps_font_size_high() {
    let channel = ConfigChannel::new(RenderConfig::default());
    channel.set_style(10_000.0, FontWeight::Bold);

    let drained = channel.drain_if_dirty().expect("dirty");
    assert!(approx_eq(drained.font_size, MAX_FONT_SIZE));
}

// === Combined Update ===

#[test]
fn set_all_updates_position_and_text_together() {
    let channel = ConfigChannel::new(RenderConfig::default());
    channel.set_all(7.0, 8.0, "combined");

    let drained = channel.drain_if_dirty().expect("dirty");
    assert!(approx_eq(drained.x, 7.0));
    assert!(approx_eq(drained.y, 8.0));
    assert_eq!(drained.text_lossy(), "combined");
    assert!(!drained.style_dirty);
}

#[test]
fn set_all_preserves_unrelated_style_fields() {
    let channel = ConfigChannel::new(RenderConfig::default());
    channel.set_style(32.0, FontWeight::Light);
    channel.set_all(1.0, 2.0, "text");

    let drained = channel.drain_if_dirty().expect("dirty");
    assert!(approx_eq(drained.font_size, 32.0));
    assert_eq!(drained.font_weight, FontWeight::Light);
    assert!(drained.style_dirty);
}

// === Cross-Thread Handoff ===

#[test]
fn writer_thread_updates_are_visible_after_join() {
    use std::sync::Arc;

    let channel = Arc::new(ConfigChannel::new(RenderConfig::default()));
    let writer = Arc::clone(&channel);
    let handle = std::thread::spawn(move || {
        for i in 0..100 {
            writer.set_position(i as f32, i as f32);
        }
    });
    handle.join().expect("writer thread");

    let drained = channel.drain_if_dirty().expect("dirty after burst");
    assert!(approx_eq(drained.x, 99.0));
    assert!(approx_eq(drained.y, 99.0));
}

#[test]
fn drain_while_writer_is_active_never_tears_position() {
    use std::sync::Arc;

    let channel = Arc::new(ConfigChannel::new(RenderConfig::default()));
    let writer = Arc::clone(&channel);
    let handle = std::thread::spawn(move || {
        for i in 0..1000 {
            writer.set_position(i as f32, i as f32);
        }
    });

    // Position is written under one lock, so x and y always match.
    for _ in 0..1000 {
        if let Some(drained) = channel.drain_if_dirty() {
            assert!(approx_eq(drained.x, drained.y));
        }
    }
    handle.join().expect("writer thread");
}
