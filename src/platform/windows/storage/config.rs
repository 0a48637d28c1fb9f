//! JSON defaults file for Windows.
//!
//! Stores initial text-style defaults in %APPDATA%/Textveil/config.json.
//! Only defaults are persisted; runtime overlay state never touches disk.
//!
//! Uses an in-memory cache to avoid disk I/O on every access.
//! Call `flush_config()` to persist changes to disk.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;

use log::warn;

use crate::model::constants::{DEFAULT_COLOR, DEFAULT_FONT_SIZE};
use crate::model::{Color, FontWeight};

/// Serializable config structure for JSON persistence.
#[derive(Serialize, Deserialize, Debug, Clone)]
struct Config {
    font_size: f32,
    font_weight: i32,
    color_r: f32,
    color_g: f32,
    color_b: f32,
    color_a: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            font_weight: FontWeight::default().value(),
            color_r: DEFAULT_COLOR.0,
            color_g: DEFAULT_COLOR.1,
            color_b: DEFAULT_COLOR.2,
            color_a: DEFAULT_COLOR.3,
        }
    }
}

/// Validated text-style defaults for seeding a new overlay session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayDefaults {
    pub font_size: f32,
    pub font_weight: FontWeight,
    pub color: Color,
}

impl From<Config> for OverlayDefaults {
    fn from(config: Config) -> Self {
        OverlayDefaults {
            font_size: config.font_size,
            font_weight: FontWeight::from_value(config.font_weight),
            color: Color::new(
                config.color_r,
                config.color_g,
                config.color_b,
                config.color_a,
            ),
        }
    }
}

// In-memory config cache. Loaded once, written on flush.
thread_local! {
    static CONFIG_CACHE: RefCell<Option<Config>> = const { RefCell::new(None) };
    static CONFIG_DIRTY: RefCell<bool> = const { RefCell::new(false) };
}

/// Get config file path: %APPDATA%/Textveil/config.json
fn config_path() -> PathBuf {
    let appdata = std::env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(appdata).join("Textveil").join("config.json")
}

/// Ensure the config directory exists.
fn ensure_config_dir() -> std::io::Result<()> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Load config from the JSON file, returning defaults if not found or
/// invalid.
fn load_config_from_disk() -> Config {
    match fs::read_to_string(config_path()) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_default(),
        Err(_) => Config::default(),
    }
}

/// Save config to the JSON file.
fn save_config_to_disk(config: &Config) {
    if ensure_config_dir().is_err() {
        warn!("failed to create config directory");
        return;
    }

    match serde_json::to_string_pretty(config) {
        Ok(json) => {
            if let Err(err) = fs::write(config_path(), json) {
                warn!("failed to write config: {err}");
            }
        }
        Err(err) => warn!("failed to serialize config: {err}"),
    }
}

/// Get the cached config, loading from disk if needed.
fn get_config() -> Config {
    CONFIG_CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();
        if cache.is_none() {
            *cache = Some(load_config_from_disk());
        }
        cache.clone().unwrap()
    })
}

/// Update the cached config and mark it dirty.
fn set_config(config: Config) {
    CONFIG_CACHE.with(|cache| {
        *cache.borrow_mut() = Some(config);
    });
    CONFIG_DIRTY.with(|dirty| {
        *dirty.borrow_mut() = true;
    });
}

/// Flush the config cache to disk if dirty.
///
/// Call this before the process exits.
pub fn flush_config() {
    let is_dirty = CONFIG_DIRTY.with(|dirty| *dirty.borrow());
    if !is_dirty {
        return;
    }

    CONFIG_CACHE.with(|cache| {
        if let Some(ref config) = *cache.borrow() {
            save_config_to_disk(config);
        }
    });

    CONFIG_DIRTY.with(|dirty| {
        *dirty.borrow_mut() = false;
    });
}

/// Load defaults from the cache (disk on first access), falling back to
/// built-ins when the file is missing or invalid.
pub fn load_defaults() -> OverlayDefaults {
    OverlayDefaults::from(get_config())
}

/// Save defaults to the cache.
///
/// Note: This updates the cache immediately but only writes to disk when
/// `flush_config()` is called.
pub fn save_defaults(defaults: &OverlayDefaults) {
    let config = Config {
        font_size: defaults.font_size,
        font_weight: defaults.font_weight.value(),
        color_r: defaults.color.r,
        color_g: defaults.color.g,
        color_b: defaults.color.b,
        color_a: defaults.color.a,
    };
    set_config(config);
}
