// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Zoom**: Scale ceiling, double-tap multiplier, fit inset, wheel step
//! - **Gestures**: Tap recognition window and slop
//! - **Animation**: Zoom transition timing

// ==========================================================================
// Zoom Defaults
// ==========================================================================

/// Maximum zoom scale (4× the intrinsic pixel size).
pub const DEFAULT_MAX_ZOOM_SCALE: f32 = 4.0;

/// Lowest accepted maximum zoom scale.
pub const MIN_MAX_ZOOM_SCALE: f32 = 1.0;

/// Highest accepted maximum zoom scale.
pub const MAX_MAX_ZOOM_SCALE: f32 = 16.0;

/// Double-tap target is this multiple of the fit scale (capped at the maximum).
pub const DEFAULT_DOUBLE_TAP_MULTIPLIER: f32 = 4.0;

/// Lowest accepted double-tap multiplier.
pub const MIN_DOUBLE_TAP_MULTIPLIER: f32 = 1.0;

/// Highest accepted double-tap multiplier.
pub const MAX_DOUBLE_TAP_MULTIPLIER: f32 = 16.0;

/// Amount subtracted from each viewport dimension before computing the fit
/// scale, so rounding at the edge never makes a fitted image scrollable.
pub const DEFAULT_FIT_INSET: f32 = 0.1;

/// Largest accepted fit inset.
pub const MAX_FIT_INSET: f32 = 2.0;

/// Relative scale change per mouse wheel line.
pub const DEFAULT_WHEEL_ZOOM_STEP: f32 = 0.1;

/// Smallest accepted wheel step.
pub const MIN_WHEEL_ZOOM_STEP: f32 = 0.01;

/// Largest accepted wheel step.
pub const MAX_WHEEL_ZOOM_STEP: f32 = 1.0;

// ==========================================================================
// Gesture Defaults
// ==========================================================================

/// Time window in which a second tap turns into a double tap (milliseconds).
pub const DEFAULT_DOUBLE_TAP_WINDOW_MS: u64 = 350;

/// Shortest accepted double-tap window (milliseconds).
pub const MIN_DOUBLE_TAP_WINDOW_MS: u64 = 100;

/// Longest accepted double-tap window (milliseconds).
pub const MAX_DOUBLE_TAP_WINDOW_MS: u64 = 1000;

/// Maximum travel between press and release for the pair to count as a tap.
pub const DEFAULT_TAP_SLOP: f32 = 10.0;

/// Largest accepted tap slop.
pub const MAX_TAP_SLOP: f32 = 64.0;

/// Maximum distance between the two taps of a double tap.
pub const DEFAULT_DOUBLE_TAP_RADIUS: f32 = 40.0;

/// Largest accepted double-tap radius.
pub const MAX_DOUBLE_TAP_RADIUS: f32 = 200.0;

// ==========================================================================
// Animation Defaults
// ==========================================================================

/// Duration of animated zoom transitions (milliseconds).
pub const DEFAULT_ZOOM_ANIMATION_MS: u64 = 250;

/// Longest accepted zoom animation (milliseconds). Zero disables animation.
pub const MAX_ZOOM_ANIMATION_MS: u64 = 2000;

/// Interval of the tick driving animations and pending taps (milliseconds).
pub const FRAME_INTERVAL_MS: u64 = 16;
