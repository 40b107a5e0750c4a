// SPDX-License-Identifier: MPL-2.0
//! Two-finger pinch tracking.

use iced::Point;

/// Incremental scale change produced by a finger move during a pinch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchStep {
    /// Ratio of the new finger distance to the previous one.
    pub factor: f32,
    /// Midpoint between the two fingers, in viewport coordinates.
    pub center: Point,
}

/// Fingers currently down on the viewport.
#[derive(Debug, Clone, Default)]
pub struct PinchState {
    fingers: Vec<(u64, Point)>,
    last_distance: Option<f32>,
}

impl PinchState {
    /// Registers a finger. Returns true if this press starts a pinch.
    pub fn finger_pressed(&mut self, id: u64, position: Point) -> bool {
        let was_pinching = self.is_pinching();
        self.set_position(id, position);
        self.last_distance = self.distance();
        !was_pinching && self.is_pinching()
    }

    /// Updates a finger and returns the pinch step, if two fingers are down.
    pub fn finger_moved(&mut self, id: u64, position: Point) -> Option<PinchStep> {
        if !self.fingers.iter().any(|(f, _)| *f == id) {
            return None;
        }
        self.set_position(id, position);

        let distance = self.distance()?;
        let previous = self.last_distance.replace(distance)?;
        if previous <= f32::EPSILON {
            return None;
        }

        Some(PinchStep {
            factor: distance / previous,
            center: self.center()?,
        })
    }

    pub fn finger_lifted(&mut self, id: u64) {
        self.fingers.retain(|(f, _)| *f != id);
        self.last_distance = self.distance();
    }

    #[must_use]
    pub fn is_pinching(&self) -> bool {
        self.fingers.len() >= 2
    }

    /// Number of fingers down.
    #[must_use]
    pub fn finger_count(&self) -> usize {
        self.fingers.len()
    }

    fn set_position(&mut self, id: u64, position: Point) {
        match self.fingers.iter_mut().find(|(f, _)| *f == id) {
            Some(entry) => entry.1 = position,
            None => self.fingers.push((id, position)),
        }
    }

    // Only the first two fingers take part in the pinch.
    fn pair(&self) -> Option<(Point, Point)> {
        match self.fingers.as_slice() {
            [(_, a), (_, b), ..] => Some((*a, *b)),
            _ => None,
        }
    }

    fn distance(&self) -> Option<f32> {
        self.pair().map(|(a, b)| a.distance(b))
    }

    fn center(&self) -> Option<Point> {
        self.pair()
            .map(|(a, b)| Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0))
    }
}
