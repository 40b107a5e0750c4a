// SPDX-License-Identifier: MPL-2.0
//! Single/double tap recognition.
//!
//! A single tap is held back until the double-tap window has elapsed without
//! a second tap, so a double tap is never reported as two single taps. When
//! the follow-up touch turns out not to be a matching tap (it drags, lands
//! too far away or becomes a pinch) the first tap is still reported.

use iced::Point;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// What a release completed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TapOutcome {
    /// Nothing recognized yet (a first tap may now be pending).
    None,
    /// Second tap of a double tap, at the given position.
    DoubleTap(Point),
}

#[derive(Debug, Clone, Copy)]
struct Touch {
    position: Point,
    at: Instant,
}

/// Tap recognizer state.
#[derive(Debug, Clone)]
pub struct TapRecognizer {
    window: Duration,
    slop: f32,
    radius: f32,
    /// Press of the tap in progress.
    press: Option<Touch>,
    /// Completed first tap waiting for the window to elapse.
    pending: Option<Touch>,
    /// Single taps whose double tap already failed, oldest first.
    confirmed: VecDeque<Point>,
}

impl TapRecognizer {
    #[must_use]
    pub fn new(window: Duration, slop: f32, radius: f32) -> Self {
        Self {
            window,
            slop,
            radius,
            press: None,
            pending: None,
            confirmed: VecDeque::new(),
        }
    }

    /// Starts a tap. A pending first tap that this press cannot complete
    /// (too late or too far away) is confirmed as a single tap.
    pub fn press(&mut self, position: Point, now: Instant) {
        if let Some(first) = self.pending {
            let in_time = now.saturating_duration_since(first.at) <= self.window;
            let nearby = first.position.distance(position) <= self.radius;
            if !(in_time && nearby) {
                self.confirm_pending();
            }
        }
        self.press = Some(Touch { position, at: now });
    }

    /// Drops the press in progress once the pointer travels beyond the slop.
    /// Returns true when that happens.
    pub fn moved(&mut self, position: Point) -> bool {
        match self.press {
            Some(press) if press.position.distance(position) > self.slop => {
                self.press = None;
                true
            }
            _ => false,
        }
    }

    pub fn release(&mut self, position: Point, now: Instant) -> TapOutcome {
        let Some(press) = self.press.take() else {
            return TapOutcome::None;
        };

        if press.position.distance(position) > self.slop {
            return TapOutcome::None;
        }

        // `press` already confirmed any first tap it could not pair with.
        if self.pending.take().is_some() {
            TapOutcome::DoubleTap(position)
        } else {
            self.pending = Some(Touch { position, at: now });
            TapOutcome::None
        }
    }

    /// Returns the next single tap whose double tap failed, if any.
    pub fn poll(&mut self, now: Instant) -> Option<Point> {
        if let Some(position) = self.confirmed.pop_front() {
            return Some(position);
        }
        let first = self.pending?;

        // A second press in progress keeps the pair alive until it ends.
        if self.press.is_some() {
            return None;
        }

        if now.saturating_duration_since(first.at) > self.window {
            self.pending = None;
            Some(first.position)
        } else {
            None
        }
    }

    /// Abandons the press in progress, e.g. when a pinch starts. A pending
    /// first tap can no longer become a double tap and is confirmed.
    pub fn cancel(&mut self) {
        self.press = None;
        self.confirm_pending();
    }

    /// Whether a single tap waits for confirmation or delivery.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some() || !self.confirmed.is_empty()
    }

    fn confirm_pending(&mut self) {
        if let Some(first) = self.pending.take() {
            self.confirmed.push_back(first.position);
        }
    }
}
