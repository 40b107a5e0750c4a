// SPDX-License-Identifier: MPL-2.0
//! Zoom state management
//!
//! This module handles the zoom arithmetic of the zoomable view:
//! - Fit-to-viewport minimum scale and the fixed maximum scale
//! - The derived double-tap target scale
//! - The explicit zoomed-in flag driving the double-tap toggle

use crate::config::ZoomSettings;
use iced::{Point, Rectangle, Size};

/// Scale used while no image (or no usable geometry) is loaded.
pub const NEUTRAL_SCALE: f32 = 1.0;

/// Scale limits computed for one image in one viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomBounds {
    /// Scale at which the whole image fits inside the viewport.
    pub min: f32,
    /// Largest allowed scale.
    pub max: f32,
    /// Target scale of a double-tap zoom-in.
    pub double_tap: f32,
}

impl ZoomBounds {
    /// Clamps `scale` into `[min, max]`.
    #[must_use]
    pub fn clamp(&self, scale: f32) -> f32 {
        if scale.is_finite() {
            scale.clamp(self.min, self.max)
        } else {
            self.min
        }
    }
}

/// Computes the scale bounds for an image of `image` size shown in a viewport
/// of `viewport` size.
///
/// The viewport is shrunk by the configured inset on both axes first, so an
/// image fitted at the minimum scale never ends up a fraction of a pixel
/// larger than the viewport. Returns `None` when either size is degenerate;
/// callers treat that exactly like an absent image.
#[must_use]
pub fn compute_bounds(viewport: Size, image: Size, settings: &ZoomSettings) -> Option<ZoomBounds> {
    let width = viewport.width - settings.fit_inset;
    let height = viewport.height - settings.fit_inset;

    // Written as negated comparisons so NaN is rejected too.
    if !(width > 0.0 && height > 0.0 && image.width > 0.0 && image.height > 0.0) {
        return None;
    }

    let x_scale = width / image.width;
    let y_scale = height / image.height;
    let fit = x_scale.min(y_scale);

    if !fit.is_finite() || fit <= 0.0 {
        return None;
    }

    let max = settings.max_scale;
    // Tiny images in huge viewports would fit above the ceiling.
    let min = fit.min(max);
    let double_tap = (settings.double_tap_multiplier * min).min(max);

    Some(ZoomBounds {
        min,
        max,
        double_tap,
    })
}

/// Outcome of a double tap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoomTransition {
    /// Zoom so that `target_rect` (image-surface coordinates) fills the viewport.
    ZoomIn { target_rect: Rectangle },
    /// Zoom back out to the given scale.
    ZoomOut { to_scale: f32 },
}

/// Manages all zoom-related state for the zoomable view
#[derive(Debug, Clone)]
pub struct ZoomState {
    /// Bounds for the current image and viewport; `None` while neutral.
    bounds: Option<ZoomBounds>,

    /// Current scale (display size / intrinsic size).
    scale: f32,

    /// Whether the last double tap zoomed in and has not been undone since.
    zoomed_in: bool,
}

impl Default for ZoomState {
    fn default() -> Self {
        Self {
            bounds: None,
            scale: NEUTRAL_SCALE,
            zoomed_in: false,
        }
    }
}

impl ZoomState {
    /// Returns to the neutral state: all scales 1, no bounds.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Installs freshly computed bounds and snaps to the fit scale.
    ///
    /// Always resets first, so there is no scale memory across loads or
    /// resizes.
    pub fn apply_bounds(&mut self, bounds: Option<ZoomBounds>) {
        self.reset();
        if let Some(bounds) = bounds {
            self.bounds = Some(bounds);
            self.scale = bounds.min;
        }
    }

    #[must_use]
    pub fn bounds(&self) -> Option<ZoomBounds> {
        self.bounds
    }

    #[must_use]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    #[must_use]
    pub fn min_scale(&self) -> f32 {
        self.bounds.map_or(NEUTRAL_SCALE, |b| b.min)
    }

    #[must_use]
    pub fn max_scale(&self) -> f32 {
        self.bounds.map_or(NEUTRAL_SCALE, |b| b.max)
    }

    #[must_use]
    pub fn double_tap_scale(&self) -> f32 {
        self.bounds.map_or(NEUTRAL_SCALE, |b| b.double_tap)
    }

    #[must_use]
    pub fn is_zoomed_in(&self) -> bool {
        self.zoomed_in
    }

    /// Sets the scale, clamped into the current bounds. Ignored while neutral.
    /// Returns the scale actually applied.
    pub fn set_scale(&mut self, scale: f32) -> f32 {
        if let Some(bounds) = self.bounds {
            self.scale = bounds.clamp(scale);
        }
        self.scale
    }

    /// Records a user-driven scale change (pinch or wheel).
    ///
    /// The next double tap then zooms in to the double-tap scale again.
    pub fn apply_manual_scale(&mut self, scale: f32) -> f32 {
        self.zoomed_in = false;
        self.set_scale(scale)
    }

    /// Decides what a double tap at `tap_point` (image-surface coordinates)
    /// does, and flips the zoomed-in flag accordingly.
    ///
    /// Returns `None` while neutral.
    pub fn double_tap(&mut self, tap_point: Point, viewport: Size) -> Option<ZoomTransition> {
        let bounds = self.bounds?;

        if self.zoomed_in {
            self.zoomed_in = false;
            return Some(ZoomTransition::ZoomOut {
                to_scale: bounds.min,
            });
        }

        let size = Size::new(
            viewport.width / bounds.double_tap,
            viewport.height / bounds.double_tap,
        );
        let origin = Point::new(tap_point.x - size.width / 2.0, tap_point.y - size.height / 2.0);

        self.zoomed_in = true;
        Some(ZoomTransition::ZoomIn {
            target_rect: Rectangle::new(origin, size),
        })
    }
}
