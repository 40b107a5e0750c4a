// SPDX-License-Identifier: MPL-2.0
//! Viewport state management
//!
//! Tracks the viewport size and scroll offset, and provides the pure geometry
//! used by the layout pass: centering, offset clamping and zoom-to-rectangle.

use crate::ui::state::zoom::ZoomBounds;
use iced::widget::scrollable::AbsoluteOffset;
use iced::{Point, Rectangle, Size};

/// Manages viewport size and scroll state
#[derive(Debug, Clone)]
pub struct ViewportState {
    /// Current viewport size, unknown until the first layout pass.
    pub size: Option<Size>,

    /// Current scroll offset
    pub offset: AbsoluteOffset,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            size: None,
            offset: AbsoluteOffset { x: 0.0, y: 0.0 },
        }
    }
}

impl ViewportState {
    /// Records a new viewport size. Returns true if it differs from the
    /// previous one.
    pub fn update_size(&mut self, size: Size) -> bool {
        let changed = self.size.is_none_or(|prev| {
            (prev.width - size.width).abs() > f32::EPSILON
                || (prev.height - size.height).abs() > f32::EPSILON
        });
        self.size = Some(size);
        changed
    }

    /// Resets the scroll offset to the origin.
    pub fn reset_offset(&mut self) {
        self.offset = AbsoluteOffset { x: 0.0, y: 0.0 };
    }
}

fn center_axis(surface: f32, viewport: f32) -> f32 {
    if surface < viewport {
        ((viewport - surface) / 2.0).floor()
    } else {
        0.0
    }
}

/// Origin of the image surface inside the viewport.
///
/// On each axis the surface is centered (snapped down to a whole unit) when
/// it is smaller than the viewport and anchored at zero otherwise, so the
/// scrollable can pan it.
#[must_use]
pub fn center_origin(surface: Size, viewport: Size) -> Point {
    Point::new(
        center_axis(surface.width, viewport.width),
        center_axis(surface.height, viewport.height),
    )
}

/// Size of the scrollable content: the surface, but never smaller than the
/// viewport so a centered surface keeps its margins.
#[must_use]
pub fn content_size(surface: Size, viewport: Size) -> Size {
    Size::new(
        surface.width.max(viewport.width),
        surface.height.max(viewport.height),
    )
}

/// Largest scroll offset for a surface of the given size.
#[must_use]
pub fn max_offset(surface: Size, viewport: Size) -> AbsoluteOffset {
    AbsoluteOffset {
        x: (surface.width - viewport.width).max(0.0),
        y: (surface.height - viewport.height).max(0.0),
    }
}

/// Clamps `offset` so the viewport never scrolls past the surface.
#[must_use]
pub fn clamp_offset(offset: AbsoluteOffset, surface: Size, viewport: Size) -> AbsoluteOffset {
    let max = max_offset(surface, viewport);
    AbsoluteOffset {
        x: finite_or_zero(offset.x).clamp(0.0, max.x),
        y: finite_or_zero(offset.y).clamp(0.0, max.y),
    }
}

fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Converts an absolute offset into the relative form accepted by
/// `operation::snap_to`.
#[must_use]
pub fn relative_offset(offset: AbsoluteOffset, surface: Size, viewport: Size) -> (f32, f32) {
    let max = max_offset(surface, viewport);
    let x = if max.x > 0.0 { offset.x / max.x } else { 0.0 };
    let y = if max.y > 0.0 { offset.y / max.y } else { 0.0 };
    (x, y)
}

/// A scale together with the image point to keep at the viewport center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomTarget {
    pub scale: f32,
    /// Point in image-surface (unscaled) coordinates.
    pub focus: Point,
}

/// Computes the scale and focus that make `rect` (image coordinates) fill
/// the viewport, clamped to `bounds`.
#[must_use]
pub fn zoom_to_rect(rect: Rectangle, viewport: Size, bounds: &ZoomBounds) -> ZoomTarget {
    let scale = if rect.width > 0.0 && rect.height > 0.0 {
        (viewport.width / rect.width).min(viewport.height / rect.height)
    } else {
        bounds.max
    };

    ZoomTarget {
        scale: bounds.clamp(scale),
        focus: rect.center(),
    }
}

/// Scroll offset placing image point `focus` at the viewport center at the
/// given scale, clamped to the scrollable range.
#[must_use]
pub fn offset_for_focus(focus: Point, scale: f32, image: Size, viewport: Size) -> AbsoluteOffset {
    let surface = Size::new(image.width * scale, image.height * scale);
    let origin = center_origin(surface, viewport);
    let proposed = AbsoluteOffset {
        x: origin.x + focus.x * scale - viewport.width / 2.0,
        y: origin.y + focus.y * scale - viewport.height / 2.0,
    };
    clamp_offset(proposed, surface, viewport)
}

/// Image point currently shown at the viewport center.
#[must_use]
pub fn focus_at_center(
    offset: AbsoluteOffset,
    scale: f32,
    image: Size,
    viewport: Size,
) -> Point {
    to_image_point(
        Point::new(viewport.width / 2.0, viewport.height / 2.0),
        offset,
        scale,
        image,
        viewport,
    )
}

/// Maps a point in viewport coordinates to image-surface coordinates.
#[must_use]
pub fn to_image_point(
    point: Point,
    offset: AbsoluteOffset,
    scale: f32,
    image: Size,
    viewport: Size,
) -> Point {
    let surface = Size::new(image.width * scale, image.height * scale);
    let origin = center_origin(surface, viewport);
    let scale = if scale > 0.0 { scale } else { 1.0 };
    Point::new(
        (point.x + offset.x - origin.x) / scale,
        (point.y + offset.y - origin.y) / scale,
    )
}

/// Scroll offset that keeps the image point under `anchor` (viewport
/// coordinates) fixed while the scale changes from `from_scale` to `to_scale`.
#[must_use]
pub fn offset_for_anchor(
    anchor: Point,
    offset: AbsoluteOffset,
    from_scale: f32,
    to_scale: f32,
    image: Size,
    viewport: Size,
) -> AbsoluteOffset {
    let image_point = to_image_point(anchor, offset, from_scale, image, viewport);
    let surface = Size::new(image.width * to_scale, image.height * to_scale);
    let origin = center_origin(surface, viewport);
    let proposed = AbsoluteOffset {
        x: origin.x + image_point.x * to_scale - anchor.x,
        y: origin.y + image_point.y * to_scale - anchor.y,
    };
    clamp_offset(proposed, surface, viewport)
}
