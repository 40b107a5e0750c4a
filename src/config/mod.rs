// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[zoom]` - Scale ceiling, double-tap multiplier, fit inset, wheel step
//! - `[gestures]` - Double-tap window, tap slop, zoom animation duration
//! - `[startup]` - Image loaded by the host screen when none is given on the CLI
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Pass `--config-dir` or set `ZOOM_VIEW_CONFIG_DIR`
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use zoom_view::config;
//!
//! let (mut config, _warning) = config::load();
//! config.zoom.max_scale = Some(6.0);
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// Zoom arithmetic settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ZoomConfig {
    /// Maximum zoom scale relative to the image's pixel size.
    #[serde(default = "default_max_scale", skip_serializing_if = "Option::is_none")]
    pub max_scale: Option<f32>,

    /// Multiple of the fit scale used as the double-tap target.
    #[serde(
        default = "default_double_tap_multiplier",
        skip_serializing_if = "Option::is_none"
    )]
    pub double_tap_multiplier: Option<f32>,

    /// Units removed from each viewport dimension before fitting.
    #[serde(default = "default_fit_inset", skip_serializing_if = "Option::is_none")]
    pub fit_inset: Option<f32>,

    /// Relative scale change per wheel line.
    #[serde(default = "default_wheel_step", skip_serializing_if = "Option::is_none")]
    pub wheel_step: Option<f32>,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            max_scale: default_max_scale(),
            double_tap_multiplier: default_double_tap_multiplier(),
            fit_inset: default_fit_inset(),
            wheel_step: default_wheel_step(),
        }
    }
}

/// Gesture recognition settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GestureConfig {
    /// Maximum delay between two taps of a double tap (milliseconds).
    #[serde(
        default = "default_double_tap_window_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub double_tap_window_ms: Option<u64>,

    /// Maximum pointer travel for a press/release pair to count as a tap.
    #[serde(default = "default_tap_slop", skip_serializing_if = "Option::is_none")]
    pub tap_slop: Option<f32>,

    /// Maximum distance between the two taps of a double tap.
    #[serde(
        default = "default_double_tap_radius",
        skip_serializing_if = "Option::is_none"
    )]
    pub double_tap_radius: Option<f32>,

    /// Duration of animated zoom transitions (milliseconds, 0 = instant).
    #[serde(
        default = "default_zoom_animation_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub zoom_animation_ms: Option<u64>,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            double_tap_window_ms: default_double_tap_window_ms(),
            tap_slop: default_tap_slop(),
            double_tap_radius: default_double_tap_radius(),
            zoom_animation_ms: default_zoom_animation_ms(),
        }
    }
}

/// Host screen startup settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct StartupConfig {
    /// Image identifier (a file path) loaded when none is passed on the CLI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub zoom: ZoomConfig,

    #[serde(default)]
    pub gestures: GestureConfig,

    #[serde(default)]
    pub startup: StartupConfig,
}

// =============================================================================
// Resolved Settings
// =============================================================================

/// Zoom settings with every value validated and clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomSettings {
    pub max_scale: f32,
    pub double_tap_multiplier: f32,
    pub fit_inset: f32,
    pub wheel_step: f32,
}

impl Default for ZoomSettings {
    fn default() -> Self {
        ZoomConfig::default().resolve()
    }
}

impl ZoomConfig {
    /// Resolves optional fields to defaults and clamps them into range.
    #[must_use]
    pub fn resolve(&self) -> ZoomSettings {
        ZoomSettings {
            max_scale: finite_or(self.max_scale, DEFAULT_MAX_ZOOM_SCALE)
                .clamp(MIN_MAX_ZOOM_SCALE, MAX_MAX_ZOOM_SCALE),
            double_tap_multiplier: finite_or(
                self.double_tap_multiplier,
                DEFAULT_DOUBLE_TAP_MULTIPLIER,
            )
            .clamp(MIN_DOUBLE_TAP_MULTIPLIER, MAX_DOUBLE_TAP_MULTIPLIER),
            fit_inset: finite_or(self.fit_inset, DEFAULT_FIT_INSET).clamp(0.0, MAX_FIT_INSET),
            wheel_step: finite_or(self.wheel_step, DEFAULT_WHEEL_ZOOM_STEP)
                .clamp(MIN_WHEEL_ZOOM_STEP, MAX_WHEEL_ZOOM_STEP),
        }
    }
}

/// Gesture settings with every value validated and clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSettings {
    pub double_tap_window: Duration,
    pub tap_slop: f32,
    pub double_tap_radius: f32,
    pub zoom_animation: Duration,
}

impl Default for GestureSettings {
    fn default() -> Self {
        GestureConfig::default().resolve()
    }
}

impl GestureConfig {
    /// Resolves optional fields to defaults and clamps them into range.
    #[must_use]
    pub fn resolve(&self) -> GestureSettings {
        let window_ms = self
            .double_tap_window_ms
            .unwrap_or(DEFAULT_DOUBLE_TAP_WINDOW_MS)
            .clamp(MIN_DOUBLE_TAP_WINDOW_MS, MAX_DOUBLE_TAP_WINDOW_MS);
        let animation_ms = self
            .zoom_animation_ms
            .unwrap_or(DEFAULT_ZOOM_ANIMATION_MS)
            .min(MAX_ZOOM_ANIMATION_MS);

        GestureSettings {
            double_tap_window: Duration::from_millis(window_ms),
            tap_slop: finite_or(self.tap_slop, DEFAULT_TAP_SLOP).clamp(0.0, MAX_TAP_SLOP),
            double_tap_radius: finite_or(self.double_tap_radius, DEFAULT_DOUBLE_TAP_RADIUS)
                .clamp(0.0, MAX_DOUBLE_TAP_RADIUS),
            zoom_animation: Duration::from_millis(animation_ms),
        }
    }
}

fn finite_or(value: Option<f32>, fallback: f32) -> f32 {
    value.filter(|v| v.is_finite()).unwrap_or(fallback)
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_max_scale() -> Option<f32> {
    Some(DEFAULT_MAX_ZOOM_SCALE)
}

fn default_double_tap_multiplier() -> Option<f32> {
    Some(DEFAULT_DOUBLE_TAP_MULTIPLIER)
}

fn default_fit_inset() -> Option<f32> {
    Some(DEFAULT_FIT_INSET)
}

fn default_wheel_step() -> Option<f32> {
    Some(DEFAULT_WHEEL_ZOOM_STEP)
}

fn default_double_tap_window_ms() -> Option<u64> {
    Some(DEFAULT_DOUBLE_TAP_WINDOW_MS)
}

fn default_tap_slop() -> Option<f32> {
    Some(DEFAULT_TAP_SLOP)
}

fn default_double_tap_radius() -> Option<f32> {
    Some(DEFAULT_DOUBLE_TAP_RADIUS)
}

fn default_zoom_animation_ms() -> Option<u64> {
    Some(DEFAULT_ZOOM_ANIMATION_MS)
}

// =============================================================================
// Load / Save
// =============================================================================

fn config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails the
/// defaults are returned together with a warning describing the failure.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    return (
                        Config::default(),
                        Some(format!("failed to load {}: {err}", path.display())),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
