// SPDX-License-Identifier: MPL-2.0
//! Animated zoom transitions.
//!
//! An animation interpolates the scale and the image point shown at the
//! viewport center. Starting a new animation replaces the running one.

use iced::Point;
use std::time::{Duration, Instant};

/// One interpolated frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub scale: f32,
    pub focus: Point,
    pub finished: bool,
}

#[derive(Debug, Clone)]
pub struct ZoomAnimation {
    from_scale: f32,
    to_scale: f32,
    from_focus: Point,
    to_focus: Point,
    started: Instant,
    duration: Duration,
}

impl ZoomAnimation {
    #[must_use]
    pub fn new(
        (from_scale, from_focus): (f32, Point),
        (to_scale, to_focus): (f32, Point),
        started: Instant,
        duration: Duration,
    ) -> Self {
        Self {
            from_scale,
            to_scale,
            from_focus,
            to_focus,
            started,
            duration,
        }
    }

    /// Samples the animation at `now`. The last frame is exactly the target.
    #[must_use]
    pub fn frame(&self, now: Instant) -> Frame {
        let elapsed = now.saturating_duration_since(self.started);
        if self.duration.is_zero() || elapsed >= self.duration {
            return Frame {
                scale: self.to_scale,
                focus: self.to_focus,
                finished: true,
            };
        }

        let t = ease_out_cubic(elapsed.as_secs_f32() / self.duration.as_secs_f32());
        Frame {
            scale: lerp(self.from_scale, self.to_scale, t),
            focus: Point::new(
                lerp(self.from_focus.x, self.to_focus.x, t),
                lerp(self.from_focus.y, self.to_focus.y, t),
            ),
            finished: false,
        }
    }
}

fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

fn ease_out_cubic(t: f32) -> f32 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}
