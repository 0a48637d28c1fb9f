//! Tests for the model layer (RenderConfig, FontWeight, Color, Rect).

use textveil::model::constants::*;
use textveil::model::{Color, DisplayInfo, FontWeight, Rect, RenderConfig};

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-6
}

// === Default Values Tests ===

#[test]
fn render_config_default_font_size() {
    let config = RenderConfig::default();
    assert!(approx_eq(config.font_size, DEFAULT_FONT_SIZE));
}

#[test]
fn render_config_default_weight_is_bold() {
    let config = RenderConfig::default();
    assert_eq!(config.font_weight, FontWeight::Bold);
}

#[test]
fn render_config_default_color_is_white() {
    let config = RenderConfig::default();
    assert!(approx_eq(config.color.r, 1.0));
    assert!(approx_eq(config.color.g, 1.0));
    assert!(approx_eq(config.color.b, 1.0));
    assert!(approx_eq(config.color.a, 1.0));
}

#[test]
fn render_config_default_has_no_text_and_clean_style() {
    let config = RenderConfig::default();
    assert!(config.text.is_empty());
    assert!(!config.style_dirty);
}

#[test]
fn render_config_default_position_is_origin() {
    let config = RenderConfig::default();
    assert!(approx_eq(config.x, 0.0));
    assert!(approx_eq(config.y, 0.0));
}

// === Text Encoding Tests ===

#[test]
fn new_encodes_text_as_utf16() {
    let config = RenderConfig::new("hi");
    assert_eq!(config.text, vec![b'h' as u16, b'i' as u16]);
}

#[test]
fn text_round_trips_non_ascii_and_emoji() {
    let config = RenderConfig::new("café 🎉");
    assert_eq!(config.text_lossy(), "café 🎉");
    // "café " is five UTF-16 units, the emoji a surrogate pair.
    assert_eq!(config.text.len(), 7);
}

#[test]
fn set_text_replaces_previous_units() {
    let mut config = RenderConfig::new("first");
    config.set_text("second");
    assert_eq!(config.text_lossy(), "second");
}

#[test]
fn empty_text_is_allowed() {
    let config = RenderConfig::new("");
    assert!(config.text.is_empty());
}

// === FontWeight Tests ===

#[test]
fn font_weight_exact_values_map_to_variants() {
    assert_eq!(FontWeight::from_value(100), FontWeight::Thin);
    assert_eq!(FontWeight::from_value(400), FontWeight::Normal);
    assert_eq!(FontWeight::from_value(700), FontWeight::Bold);
    assert_eq!(FontWeight::from_value(900), FontWeight::Black);
}

#[test]
fn font_weight_clamps_below_range() {
    assert_eq!(FontWeight::from_value(0), FontWeight::Thin);
    assert_eq!(FontWeight::from_value(-100), FontWeight::Thin);
}

#[test]
fn font_weight_clamps_above_range() {
    assert_eq!(FontWeight::from_value(950), FontWeight::Black);
    assert_eq!(FontWeight::from_value(10_000), FontWeight::Black);
}

#[test]
fn font_weight_rounds_to_nearest_defined_weight() {
    assert_eq!(FontWeight::from_value(349), FontWeight::Light);
    assert_eq!(FontWeight::from_value(350), FontWeight::Normal);
}

#[test]
fn font_weight_value_round_trips() {
    for value in [100, 200, 300, 400, 500, 600, 700, 800, 900] {
        assert_eq!(FontWeight::from_value(value).value(), value);
    }
}

// === Color Tests ===

#[test]
fn color_new_keeps_in_range_components() {
    let color = Color::new(0.1, 0.2, 0.3, 0.4);
    assert!(approx_eq(color.r, 0.1));
    assert!(approx_eq(color.g, 0.2));
    assert!(approx_eq(color.b, 0.3));
    assert!(approx_eq(color.a, 0.4));
}

#[test]
fn color_new_clamps_out_of_range_components() {
    let color = Color::new(-1.0, 2.0, 0.5, 7.0);
    assert!(approx_eq(color.r, 0.0));
    assert!(approx_eq(color.g, 1.0));
    assert!(approx_eq(color.b, 0.5));
    assert!(approx_eq(color.a, 1.0));
}

#[test]
fn color_default_is_white() {
    assert_eq!(Color::default(), Color::WHITE);
}

// === Rect / DisplayInfo Tests ===

#[test]
fn rect_width_and_height() {
    let rect = Rect {
        left: 100,
        top: 50,
        right: 1100,
        bottom: 850,
    };
    assert_eq!(rect.width(), 1000);
    assert_eq!(rect.height(), 800);
}

#[test]
fn rect_handles_negative_origin() {
    // Secondary display left of the primary.
    let rect = Rect {
        left: -1920,
        top: 0,
        right: 0,
        bottom: 1080,
    };
    assert_eq!(rect.width(), 1920);
    assert_eq!(rect.height(), 1080);
}

#[test]
fn display_info_is_copyable() {
    let display = DisplayInfo {
        index: 1,
        bounds: Rect {
            left: 0,
            top: 0,
            right: 1920,
            bottom: 1080,
        },
        handle: 42,
    };
    let copy = display;
    assert_eq!(copy, display);
}

// === Clone and PartialEq Tests ===

#[test]
fn render_config_is_cloneable() {
    let config = RenderConfig::new("hello");
    let cloned = config.clone();
    assert_eq!(config, cloned);
}

#[test]
fn render_config_equality_tracks_fields() {
    let config1 = RenderConfig::new("hello");
    let mut config2 = RenderConfig::new("hello");
    assert_eq!(config1, config2);

    config2.x = 10.0;
    assert_ne!(config1, config2);
}
