// SPDX-License-Identifier: MPL-2.0
//! Drag state management
//!
//! Grab-and-drag panning with the mouse. A press only turns into a drag
//! after the pointer leaves the tap slop, so short clicks stay taps.

use iced::widget::scrollable::AbsoluteOffset;
use iced::Point;

/// Manages grab-and-drag state
#[derive(Debug, Clone, Default)]
pub struct DragState {
    /// Press position and the viewport offset at that time.
    anchor: Option<(Point, AbsoluteOffset)>,

    /// Whether the pointer has left the slop since the press.
    active: bool,
}

impl DragState {
    /// Remembers where a potential drag starts.
    pub fn press(&mut self, position: Point, offset: AbsoluteOffset) {
        self.anchor = Some((position, offset));
        self.active = false;
    }

    /// Ends the drag (or potential drag).
    pub fn release(&mut self) {
        self.anchor = None;
        self.active = false;
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.active
    }

    /// Returns the unclamped offset for the current pointer position, or
    /// `None` while the pointer is still within `slop` of the press.
    pub fn offset_for(&mut self, position: Point, slop: f32) -> Option<AbsoluteOffset> {
        let (start, offset) = self.anchor?;

        if !self.active {
            if start.distance(position) <= slop {
                return None;
            }
            self.active = true;
        }

        // Moving the pointer right scrolls the content left.
        Some(AbsoluteOffset {
            x: offset.x - (position.x - start.x),
            y: offset.y - (position.y - start.y),
        })
    }
}
