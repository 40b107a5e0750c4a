// SPDX-License-Identifier: MPL-2.0
//! Zoom view component encapsulating state and update logic.
//!
//! The component owns the loaded bitmap, the zoom bounds and the scroll
//! offset. Gestures come in as [`Message`]s, and anything the host has to act
//! on (a confirmed single tap) goes back out as an [`Effect`]. Geometry is
//! exposed through [`State::layout`], a pure function of the state, so the
//! zoom and centering logic can be tested without rendering anything.

use crate::config::{GestureSettings, ZoomSettings, FRAME_INTERVAL_MS};
use crate::media::{FileProvider, ImageData, ImageProvider};
use crate::ui::state::viewport::{
    center_origin, clamp_offset, content_size, focus_at_center, offset_for_anchor,
    offset_for_focus, relative_offset, to_image_point, zoom_to_rect, ZoomTarget,
};
use crate::ui::state::{
    compute_bounds, DragState, PinchState, TapOutcome, TapRecognizer, ViewportState,
    ZoomAnimation, ZoomState, ZoomTransition,
};
use crate::ui::widgets::gesture_area::Gesture;
use iced::widget::scrollable::{AbsoluteOffset, RelativeOffset};
use iced::widget::{operation, Id};
use futures_util::FutureExt;
use iced::{time, Point, Rectangle, Size, Subscription, Task};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Identifier used for the zoom view scrollable widget.
pub const SCROLLABLE_ID: &str = "zoom-view-scrollable";

/// Messages emitted by the zoom view widgets.
#[derive(Debug, Clone)]
pub enum Message {
    Gesture(Gesture),
    /// The view's bounds changed (reported by the gesture area during layout).
    Resized(Size),
    /// The scrollable moved, e.g. through native touch panning.
    Scrolled(AbsoluteOffset),
    /// Animation frame or pending tap check.
    Tick(Instant),
    /// A provider request finished.
    ImageResolved {
        generation: u64,
        image: Option<ImageData>,
    },
}

/// A recognized single tap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapEvent {
    /// Tap position in viewport coordinates.
    pub position: Point,
    /// Tap position in image coordinates, if an image is shown.
    pub image_point: Option<Point>,
}

/// Side effects the host should perform after handling a zoom view message.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    None,
    SingleTap(TapEvent),
}

/// Geometry of one render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub viewport: Size,
    /// Image surface position and scaled size inside the scrollable content.
    pub image_frame: Rectangle,
    /// Scrollable content size; zero while nothing is shown.
    pub content_size: Size,
    pub offset: AbsoluteOffset,
    pub scale: f32,
}

/// Zoomable image view state.
#[derive(Debug)]
pub struct State {
    image: Option<ImageData>,
    identifier: Option<String>,
    /// Bumped on every load so late provider completions can be discarded.
    generation: u64,
    viewport: ViewportState,
    zoom: ZoomState,
    taps: TapRecognizer,
    pinch: PinchState,
    drag: DragState,
    animation: Option<ZoomAnimation>,
    zoom_settings: ZoomSettings,
    gesture_settings: GestureSettings,
    provider: Arc<dyn ImageProvider>,
}

impl Default for State {
    fn default() -> Self {
        Self::new(ZoomSettings::default(), GestureSettings::default())
    }
}

impl State {
    /// Creates an empty view resolving identifiers as file paths.
    #[must_use]
    pub fn new(zoom_settings: ZoomSettings, gesture_settings: GestureSettings) -> Self {
        Self {
            image: None,
            identifier: None,
            generation: 0,
            viewport: ViewportState::default(),
            zoom: ZoomState::default(),
            taps: TapRecognizer::new(
                gesture_settings.double_tap_window,
                gesture_settings.tap_slop,
                gesture_settings.double_tap_radius,
            ),
            pinch: PinchState::default(),
            drag: DragState::default(),
            animation: None,
            zoom_settings,
            gesture_settings,
            provider: Arc::new(FileProvider::new()),
        }
    }

    /// Replaces the provider used by [`State::load_identifier`].
    #[must_use]
    pub fn with_provider(mut self, provider: Arc<dyn ImageProvider>) -> Self {
        self.provider = provider;
        self
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    /// Shows `image`, or the empty state for `None`.
    ///
    /// Any in-flight identifier request is superseded.
    pub fn load_image(&mut self, image: Option<ImageData>) -> Task<Message> {
        self.generation = self.generation.wrapping_add(1);
        self.identifier = None;
        self.set_image(image)
    }

    /// Stores `identifier` and asks the provider for the bitmap.
    ///
    /// The returned task delivers the result back as
    /// [`Message::ImageResolved`]; a failed request clears the view.
    pub fn load_identifier(&mut self, identifier: impl Into<String>) -> Task<Message> {
        Task::perform(self.request(identifier.into()), std::convert::identity)
    }

    /// Bumps the generation and starts the provider request for `identifier`.
    fn request(&mut self, identifier: String) -> impl Future<Output = Message> + Send + 'static {
        self.generation = self.generation.wrapping_add(1);
        let generation = self.generation;

        tracing::info!(%identifier, generation, "requesting image");
        let fetch = self.provider.fetch(&identifier);
        self.identifier = Some(identifier);

        fetch.map(move |image| Message::ImageResolved { generation, image })
    }

    fn set_image(&mut self, image: Option<ImageData>) -> Task<Message> {
        let image = image.filter(|image| !image.is_empty());
        match &image {
            Some(image) => {
                tracing::info!(width = image.width, height = image.height, "image loaded");
            }
            None => tracing::info!("image cleared"),
        }
        self.image = image;
        self.refresh_bounds()
    }

    /// Resets to neutral, recomputes the bounds and snaps back to fit.
    fn refresh_bounds(&mut self) -> Task<Message> {
        self.animation = None;
        self.drag.release();

        let bounds = match (&self.image, self.viewport.size) {
            (Some(image), Some(viewport)) => {
                compute_bounds(viewport, image.size(), &self.zoom_settings)
            }
            _ => None,
        };
        self.zoom.apply_bounds(bounds);
        self.viewport.reset_offset();

        if let Some(bounds) = bounds {
            tracing::debug!(
                min = bounds.min,
                max = bounds.max,
                double_tap = bounds.double_tap,
                "zoom bounds computed"
            );
        }

        operation::snap_to(Id::new(SCROLLABLE_ID), RelativeOffset { x: 0.0, y: 0.0 })
    }

    // ------------------------------------------------------------------
    // Update
    // ------------------------------------------------------------------

    pub fn update(&mut self, message: Message) -> (Effect, Task<Message>) {
        match message {
            Message::Gesture(gesture) => {
                (Effect::None, self.handle_gesture_at(gesture, Instant::now()))
            }
            Message::Resized(size) => {
                if self.viewport.update_size(size) {
                    tracing::debug!(width = size.width, height = size.height, "viewport resized");
                    (Effect::None, self.refresh_bounds())
                } else {
                    (Effect::None, Task::none())
                }
            }
            Message::Scrolled(offset) => {
                // While animating, the animation owns the offset.
                if self.animation.is_none() {
                    self.viewport.offset = offset;
                }
                (Effect::None, Task::none())
            }
            Message::Tick(now) => self.tick(now),
            Message::ImageResolved { generation, image } => {
                if generation != self.generation {
                    tracing::debug!(generation, current = self.generation, "stale image ignored");
                    return (Effect::None, Task::none());
                }
                if image.is_none() {
                    tracing::warn!(identifier = ?self.identifier, "image could not be resolved");
                }
                (Effect::None, self.set_image(image))
            }
        }
    }

    /// Applies one gesture observed at `now`.
    pub fn handle_gesture_at(&mut self, gesture: Gesture, now: Instant) -> Task<Message> {
        let slop = self.gesture_settings.tap_slop;

        match gesture {
            Gesture::Pressed(position) => {
                self.taps.press(position, now);
                self.drag.press(position, self.viewport.offset);
                Task::none()
            }
            Gesture::Moved(position) => {
                self.taps.moved(position);
                match self.drag.offset_for(position, slop) {
                    Some(offset) => self.scroll_to(offset),
                    None => Task::none(),
                }
            }
            Gesture::Released(position) => {
                self.drag.release();
                self.release_tap(position, now)
            }
            Gesture::FingerPressed { id, position } => {
                if self.pinch.finger_pressed(id, position) {
                    // A second finger turns the touch into a pinch.
                    self.taps.cancel();
                } else if self.pinch.finger_count() == 1 {
                    self.taps.press(position, now);
                }
                Task::none()
            }
            Gesture::FingerMoved { id, position } => {
                if let Some(step) = self.pinch.finger_moved(id, position) {
                    return self.zoom_around(step.center, self.zoom.scale() * step.factor);
                }
                self.taps.moved(position);
                Task::none()
            }
            Gesture::FingerLifted { id, position } => {
                let was_single = self.pinch.finger_count() == 1;
                self.pinch.finger_lifted(id);
                if was_single {
                    self.release_tap(position, now)
                } else {
                    Task::none()
                }
            }
            Gesture::Wheel { lines, position } => {
                let factor = (1.0 + self.zoom_settings.wheel_step).powf(lines);
                self.zoom_around(position, self.zoom.scale() * factor)
            }
        }
    }

    fn release_tap(&mut self, position: Point, now: Instant) -> Task<Message> {
        match self.taps.release(position, now) {
            TapOutcome::DoubleTap(position) => self.double_tap(position, now),
            TapOutcome::None => Task::none(),
        }
    }

    fn tick(&mut self, now: Instant) -> (Effect, Task<Message>) {
        let task = self.advance_animation(now);

        let effect = match self.taps.poll(now) {
            Some(position) => {
                let event = TapEvent {
                    position,
                    image_point: self.image_point(position),
                };
                tracing::debug!(x = position.x, y = position.y, "single tap");
                Effect::SingleTap(event)
            }
            None => Effect::None,
        };

        (effect, task)
    }

    // ------------------------------------------------------------------
    // Zooming
    // ------------------------------------------------------------------

    fn double_tap(&mut self, position: Point, now: Instant) -> Task<Message> {
        let Some((image, viewport)) = self.geometry() else {
            return Task::none();
        };
        let scale = self.zoom.scale();
        let offset = self.viewport.offset;
        let tap_point = to_image_point(position, offset, scale, image, viewport);

        let Some(transition) = self.zoom.double_tap(tap_point, viewport) else {
            return Task::none();
        };
        let Some(bounds) = self.zoom.bounds() else {
            return Task::none();
        };

        let target = match transition {
            ZoomTransition::ZoomIn { target_rect } => zoom_to_rect(target_rect, viewport, &bounds),
            ZoomTransition::ZoomOut { to_scale } => ZoomTarget {
                scale: to_scale,
                focus: focus_at_center(offset, scale, image, viewport),
            },
        };
        tracing::debug!(?transition, target = target.scale, "double tap");

        self.animate_to(target, now)
    }

    /// Starts an animated transition, replacing any running one.
    fn animate_to(&mut self, target: ZoomTarget, now: Instant) -> Task<Message> {
        let Some((image, viewport)) = self.geometry() else {
            return Task::none();
        };
        let scale = self.zoom.scale();
        let focus = focus_at_center(self.viewport.offset, scale, image, viewport);

        self.animation = Some(ZoomAnimation::new(
            (scale, focus),
            (target.scale, target.focus),
            now,
            self.gesture_settings.zoom_animation,
        ));
        self.advance_animation(now)
    }

    fn advance_animation(&mut self, now: Instant) -> Task<Message> {
        let Some(frame) = self.animation.as_ref().map(|a| a.frame(now)) else {
            return Task::none();
        };
        if frame.finished {
            self.animation = None;
        }
        let Some((image, viewport)) = self.geometry() else {
            self.animation = None;
            return Task::none();
        };

        let scale = self.zoom.set_scale(frame.scale);
        let offset = offset_for_focus(frame.focus, scale, image, viewport);
        self.scroll_to(offset)
    }

    /// Zooms to `scale` (clamped) keeping the image point under `anchor` fixed.
    fn zoom_around(&mut self, anchor: Point, scale: f32) -> Task<Message> {
        let Some((image, viewport)) = self.geometry() else {
            return Task::none();
        };
        self.animation = None;

        let from = self.zoom.scale();
        let to = self.zoom.apply_manual_scale(scale);
        if (to - from).abs() <= f32::EPSILON {
            return Task::none();
        }

        let offset = offset_for_anchor(anchor, self.viewport.offset, from, to, image, viewport);
        self.scroll_to(offset)
    }

    fn scroll_to(&mut self, offset: AbsoluteOffset) -> Task<Message> {
        let Some((image, viewport)) = self.geometry() else {
            return Task::none();
        };
        let surface = self.surface_size(image);
        self.viewport.offset = clamp_offset(offset, surface, viewport);

        let (x, y) = relative_offset(self.viewport.offset, surface, viewport);
        operation::snap_to(Id::new(SCROLLABLE_ID), RelativeOffset { x, y })
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Image and viewport sizes, present only while zoom bounds exist.
    fn geometry(&self) -> Option<(Size, Size)> {
        if self.zoom.bounds().is_none() {
            return None;
        }
        let image = self.image.as_ref()?;
        Some((image.size(), self.viewport.size?))
    }

    fn surface_size(&self, image: Size) -> Size {
        let scale = self.zoom.scale();
        Size::new(image.width * scale, image.height * scale)
    }

    fn image_point(&self, position: Point) -> Option<Point> {
        let (image, viewport) = self.geometry()?;
        Some(to_image_point(
            position,
            self.viewport.offset,
            self.zoom.scale(),
            image,
            viewport,
        ))
    }

    /// Geometry for the current state.
    #[must_use]
    pub fn layout(&self) -> Layout {
        let viewport = self.viewport.size.unwrap_or(Size::ZERO);

        match self.geometry() {
            Some((image, viewport)) => {
                let surface = self.surface_size(image);
                Layout {
                    viewport,
                    image_frame: Rectangle::new(center_origin(surface, viewport), surface),
                    content_size: content_size(surface, viewport),
                    offset: self.viewport.offset,
                    scale: self.zoom.scale(),
                }
            }
            None => Layout {
                viewport,
                image_frame: Rectangle::new(Point::ORIGIN, Size::ZERO),
                content_size: Size::ZERO,
                offset: AbsoluteOffset { x: 0.0, y: 0.0 },
                scale: self.zoom.scale(),
            },
        }
    }

    /// Ticks while an animation runs or a single tap awaits confirmation.
    pub fn subscription(&self) -> Subscription<Message> {
        if self.animation.is_some() || self.taps.is_pending() {
            time::every(Duration::from_millis(FRAME_INTERVAL_MS)).map(Message::Tick)
        } else {
            Subscription::none()
        }
    }

    #[must_use]
    pub fn image(&self) -> Option<&ImageData> {
        self.image.as_ref()
    }

    #[must_use]
    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    #[must_use]
    pub fn scale(&self) -> f32 {
        self.zoom.scale()
    }

    #[must_use]
    pub fn min_scale(&self) -> f32 {
        self.zoom.min_scale()
    }

    #[must_use]
    pub fn max_scale(&self) -> f32 {
        self.zoom.max_scale()
    }

    #[must_use]
    pub fn double_tap_scale(&self) -> f32 {
        self.zoom.double_tap_scale()
    }

    #[must_use]
    pub fn is_zoomed_in(&self) -> bool {
        self.zoom.is_zoomed_in()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_abs_diff_eq, sample_image, SCALE_EPSILON};
    use futures_util::future::{self, BoxFuture};
    use std::sync::Mutex;

    /// Provider answering every request with the same result.
    #[derive(Debug)]
    struct FixedProvider {
        image: Option<ImageData>,
        requested: Mutex<Vec<String>>,
    }

    impl FixedProvider {
        fn new(image: Option<ImageData>) -> Arc<Self> {
            Arc::new(Self {
                image,
                requested: Mutex::new(Vec::new()),
            })
        }
    }

    impl ImageProvider for FixedProvider {
        fn fetch(&self, identifier: &str) -> BoxFuture<'static, Option<ImageData>> {
            self.requested
                .lock()
                .expect("provider lock poisoned")
                .push(identifier.to_string());
            future::ready(self.image.clone()).boxed()
        }
    }

    fn count_single_taps(state: &mut State, from: Instant) -> usize {
        (0..200)
            .map(|i| settle(state, from + Duration::from_millis(16 * i)))
            .filter(|effect| matches!(effect, Effect::SingleTap(_)))
            .count()
    }

    fn view_with(viewport: Size, image: Option<ImageData>) -> State {
        let mut state = State::default();
        let _ = state.update(Message::Resized(viewport));
        let _ = state.load_image(image);
        state
    }

    fn tap(state: &mut State, position: Point, at: Instant) {
        let _ = state.handle_gesture_at(Gesture::Pressed(position), at);
        let _ = state.handle_gesture_at(Gesture::Released(position), at + Duration::from_millis(40));
    }

    fn settle(state: &mut State, at: Instant) -> Effect {
        state.update(Message::Tick(at)).0
    }

    #[test]
    fn absent_image_is_neutral_and_empty() {
        let state = view_with(Size::new(300.0, 400.0), None);
        let layout = state.layout();

        assert_abs_diff_eq!(state.scale(), 1.0);
        assert_abs_diff_eq!(state.min_scale(), 1.0);
        assert_abs_diff_eq!(state.max_scale(), 1.0);
        assert_abs_diff_eq!(state.double_tap_scale(), 1.0);
        assert_eq!(layout.content_size, Size::ZERO);
        assert!(!state.has_image());
    }

    #[test]
    fn empty_bitmap_is_treated_as_absent() {
        let state = view_with(Size::new(300.0, 400.0), Some(ImageData::from_rgba(0, 0, Vec::new())));
        assert!(!state.has_image());
        assert_eq!(state.layout().content_size, Size::ZERO);
    }

    #[test]
    fn wide_image_fits_portrait_viewport() {
        let state = view_with(Size::new(300.0, 400.0), Some(sample_image(600, 400)));

        assert_abs_diff_eq!(state.min_scale(), 0.5, epsilon = SCALE_EPSILON);
        assert_abs_diff_eq!(state.double_tap_scale(), 2.0, epsilon = SCALE_EPSILON);
        assert_abs_diff_eq!(state.scale(), state.min_scale());

        let layout = state.layout();
        // 600x400 at ~0.5 is ~300x200, centered vertically.
        assert_abs_diff_eq!(layout.image_frame.x, 0.0);
        assert_abs_diff_eq!(layout.image_frame.y, 100.0);
        assert_eq!(layout.content_size.height, 400.0);
    }

    #[test]
    fn degenerate_viewport_behaves_like_absent_image() {
        let state = view_with(Size::new(0.0, 0.0), Some(sample_image(10, 10)));

        assert!(state.has_image());
        assert_abs_diff_eq!(state.scale(), 1.0);
        assert_eq!(state.layout().content_size, Size::ZERO);
    }

    #[test]
    fn resize_recomputes_and_snaps_back_to_fit() {
        let mut state = view_with(Size::new(300.0, 400.0), Some(sample_image(600, 400)));
        let _ = state.handle_gesture_at(
            Gesture::Wheel {
                lines: 3.0,
                position: Point::new(150.0, 200.0),
            },
            Instant::now(),
        );
        assert!(state.scale() > state.min_scale());

        let _ = state.update(Message::Resized(Size::new(600.0, 400.0)));

        assert_abs_diff_eq!(state.min_scale(), 399.9 / 400.0, epsilon = 1e-6);
        assert_abs_diff_eq!(state.scale(), state.min_scale());
    }

    #[test]
    fn double_tap_toggles_between_fit_and_double_tap_scale() {
        let mut state = view_with(Size::new(300.0, 400.0), Some(sample_image(600, 400)));
        let t0 = Instant::now();

        tap(&mut state, Point::new(150.0, 200.0), t0);
        tap(&mut state, Point::new(150.0, 200.0), t0 + Duration::from_millis(150));
        assert!(state.is_animating());
        assert!(state.is_zoomed_in());

        settle(&mut state, t0 + Duration::from_secs(2));
        assert!(!state.is_animating());
        assert_abs_diff_eq!(state.scale(), state.double_tap_scale(), epsilon = SCALE_EPSILON);

        let t1 = t0 + Duration::from_secs(3);
        tap(&mut state, Point::new(10.0, 10.0), t1);
        tap(&mut state, Point::new(10.0, 10.0), t1 + Duration::from_millis(150));
        settle(&mut state, t1 + Duration::from_secs(2));

        assert!(!state.is_zoomed_in());
        assert_abs_diff_eq!(state.scale(), state.min_scale(), epsilon = SCALE_EPSILON);
    }

    #[test]
    fn double_tap_centers_tapped_point() {
        let mut state = view_with(Size::new(300.0, 400.0), Some(sample_image(600, 400)));
        let t0 = Instant::now();

        // Image point (300, 200) is the center of the image.
        tap(&mut state, Point::new(150.0, 200.0), t0);
        tap(&mut state, Point::new(150.0, 200.0), t0 + Duration::from_millis(150));
        settle(&mut state, t0 + Duration::from_secs(2));

        let layout = state.layout();
        let center = Point::new(
            layout.offset.x + layout.viewport.width / 2.0 - layout.image_frame.x,
            layout.offset.y + layout.viewport.height / 2.0 - layout.image_frame.y,
        );
        assert_abs_diff_eq!(center.x / state.scale(), 300.0, epsilon = 0.5);
        assert_abs_diff_eq!(center.y / state.scale(), 200.0, epsilon = 0.5);
    }

    #[test]
    fn quick_second_tap_reports_no_single_tap() {
        let mut state = view_with(Size::new(300.0, 400.0), Some(sample_image(600, 400)));
        let t0 = Instant::now();

        tap(&mut state, Point::new(100.0, 100.0), t0);
        assert_eq!(settle(&mut state, t0 + Duration::from_millis(100)), Effect::None);
        tap(&mut state, Point::new(101.0, 100.0), t0 + Duration::from_millis(150));

        let mut single_taps = 0;
        for ms in (200..3000).step_by(16) {
            if let Effect::SingleTap(_) = settle(&mut state, t0 + Duration::from_millis(ms)) {
                single_taps += 1;
            }
        }

        assert_eq!(single_taps, 0);
        assert!(state.is_zoomed_in());
    }

    #[test]
    fn lone_tap_is_reported_after_window() {
        let mut state = view_with(Size::new(300.0, 400.0), Some(sample_image(600, 400)));
        let t0 = Instant::now();

        tap(&mut state, Point::new(150.0, 200.0), t0);
        assert_eq!(settle(&mut state, t0 + Duration::from_millis(100)), Effect::None);

        match settle(&mut state, t0 + Duration::from_secs(1)) {
            Effect::SingleTap(event) => {
                assert_eq!(event.position, Point::new(150.0, 200.0));
                let image_point = event.image_point.expect("image is shown");
                assert_abs_diff_eq!(image_point.x, 300.0, epsilon = 0.5);
            }
            other => panic!("expected single tap, got {other:?}"),
        }
        assert_abs_diff_eq!(state.scale(), state.min_scale());
    }

    #[test]
    fn tap_on_empty_view_is_still_reported() {
        let mut state = view_with(Size::new(300.0, 400.0), None);
        let t0 = Instant::now();

        tap(&mut state, Point::new(5.0, 5.0), t0);

        match settle(&mut state, t0 + Duration::from_secs(1)) {
            Effect::SingleTap(event) => assert!(event.image_point.is_none()),
            other => panic!("expected single tap, got {other:?}"),
        }
    }

    #[test]
    fn wheel_zoom_is_clamped_and_clears_zoomed_in() {
        let mut state = view_with(Size::new(300.0, 400.0), Some(sample_image(600, 400)));
        let t0 = Instant::now();
        tap(&mut state, Point::new(150.0, 200.0), t0);
        tap(&mut state, Point::new(150.0, 200.0), t0 + Duration::from_millis(150));
        settle(&mut state, t0 + Duration::from_secs(2));
        assert!(state.is_zoomed_in());

        let _ = state.handle_gesture_at(
            Gesture::Wheel {
                lines: 100.0,
                position: Point::new(150.0, 200.0),
            },
            t0 + Duration::from_secs(3),
        );

        assert_abs_diff_eq!(state.scale(), state.max_scale());
        assert!(!state.is_zoomed_in());

        let _ = state.handle_gesture_at(
            Gesture::Wheel {
                lines: -100.0,
                position: Point::new(150.0, 200.0),
            },
            t0 + Duration::from_secs(3),
        );
        assert_abs_diff_eq!(state.scale(), state.min_scale());
    }

    #[test]
    fn pinch_scales_and_suppresses_taps() {
        let mut state = view_with(Size::new(300.0, 400.0), Some(sample_image(600, 400)));
        let t0 = Instant::now();
        let min = state.min_scale();

        let _ = state.handle_gesture_at(
            Gesture::FingerPressed {
                id: 1,
                position: Point::new(100.0, 200.0),
            },
            t0,
        );
        let _ = state.handle_gesture_at(
            Gesture::FingerPressed {
                id: 2,
                position: Point::new(200.0, 200.0),
            },
            t0,
        );
        let _ = state.handle_gesture_at(
            Gesture::FingerMoved {
                id: 2,
                position: Point::new(300.0, 200.0),
            },
            t0 + Duration::from_millis(20),
        );

        assert_abs_diff_eq!(state.scale(), min * 2.0, epsilon = SCALE_EPSILON);

        for id in [1, 2] {
            let _ = state.handle_gesture_at(
                Gesture::FingerLifted {
                    id,
                    position: Point::new(150.0, 200.0),
                },
                t0 + Duration::from_millis(40),
            );
        }
        assert_eq!(settle(&mut state, t0 + Duration::from_secs(1)), Effect::None);
    }

    #[test]
    fn drag_pans_within_surface() {
        let mut state = view_with(Size::new(300.0, 400.0), Some(sample_image(600, 400)));
        let now = Instant::now();
        let _ = state.handle_gesture_at(
            Gesture::Wheel {
                lines: 100.0,
                position: Point::new(0.0, 0.0),
            },
            now,
        );
        // 600x400 at 4.0 is 2400x1600.
        let _ = state.handle_gesture_at(Gesture::Pressed(Point::new(200.0, 200.0)), now);
        let _ = state.handle_gesture_at(Gesture::Moved(Point::new(100.0, 150.0)), now);

        assert!(state.is_dragging());
        assert_abs_diff_eq!(state.layout().offset.x, 100.0);
        assert_abs_diff_eq!(state.layout().offset.y, 50.0);

        let _ = state.handle_gesture_at(Gesture::Moved(Point::new(5000.0, 5000.0)), now);
        assert_abs_diff_eq!(state.layout().offset.x, 0.0);
        assert_abs_diff_eq!(state.layout().offset.y, 0.0);

        let _ = state.handle_gesture_at(Gesture::Released(Point::new(5000.0, 5000.0)), now);
        assert!(!state.is_dragging());
    }

    #[test]
    fn loading_a_new_image_forgets_zoom() {
        let mut state = view_with(Size::new(300.0, 400.0), Some(sample_image(600, 400)));
        let _ = state.handle_gesture_at(
            Gesture::Wheel {
                lines: 5.0,
                position: Point::new(150.0, 200.0),
            },
            Instant::now(),
        );

        let _ = state.load_image(Some(sample_image(300, 300)));

        assert_abs_diff_eq!(state.scale(), state.min_scale());
        assert!(!state.is_zoomed_in());
        assert_eq!(state.layout().offset, AbsoluteOffset { x: 0.0, y: 0.0 });
    }

    #[test]
    fn stale_provider_result_is_ignored() {
        let mut state = view_with(Size::new(300.0, 400.0), None);
        let _ = state.load_identifier("first.png");
        let stale = state.generation;
        let _ = state.load_identifier("second.png");

        let _ = state.update(Message::ImageResolved {
            generation: stale,
            image: Some(sample_image(10, 10)),
        });
        assert!(!state.has_image());
        assert_eq!(state.identifier(), Some("second.png"));

        let _ = state.update(Message::ImageResolved {
            generation: state.generation,
            image: Some(sample_image(10, 10)),
        });
        assert!(state.has_image());
    }

    #[test]
    fn failed_provider_result_clears_view() {
        let mut state = view_with(Size::new(300.0, 400.0), Some(sample_image(20, 20)));
        let _ = state.load_identifier("missing.png");

        let _ = state.update(Message::ImageResolved {
            generation: state.generation,
            image: None,
        });

        assert!(!state.has_image());
        assert_abs_diff_eq!(state.scale(), 1.0);
    }

    #[test]
    fn direct_load_supersedes_pending_request() {
        let mut state = view_with(Size::new(300.0, 400.0), None);
        let _ = state.load_identifier("slow.png");
        let pending = state.generation;

        let _ = state.load_image(Some(sample_image(50, 50)));
        let _ = state.update(Message::ImageResolved {
            generation: pending,
            image: None,
        });

        assert!(state.has_image());
        assert!(state.identifier().is_none());
    }

    #[test]
    fn tap_followed_by_drag_still_reports_single_tap() {
        let mut state = view_with(Size::new(300.0, 400.0), Some(sample_image(600, 400)));
        let t0 = Instant::now();

        tap(&mut state, Point::new(100.0, 100.0), t0);
        let second = t0 + Duration::from_millis(150);
        let _ = state.handle_gesture_at(Gesture::Pressed(Point::new(100.0, 100.0)), second);
        let _ = state.handle_gesture_at(Gesture::Moved(Point::new(160.0, 100.0)), second);
        let _ = state.handle_gesture_at(Gesture::Released(Point::new(160.0, 100.0)), second);

        assert_eq!(count_single_taps(&mut state, t0), 1);
        assert!(!state.is_zoomed_in());
    }

    #[test]
    fn tap_followed_by_pinch_still_reports_single_tap() {
        let mut state = view_with(Size::new(300.0, 400.0), Some(sample_image(600, 400)));
        let t0 = Instant::now();
        let first = Point::new(100.0, 200.0);

        let _ = state.handle_gesture_at(Gesture::FingerPressed { id: 1, position: first }, t0);
        let _ = state.handle_gesture_at(Gesture::FingerLifted { id: 1, position: first }, t0);

        let later = t0 + Duration::from_millis(100);
        let _ = state.handle_gesture_at(Gesture::FingerPressed { id: 2, position: first }, later);
        let _ = state.handle_gesture_at(
            Gesture::FingerPressed {
                id: 3,
                position: Point::new(200.0, 200.0),
            },
            later,
        );

        match settle(&mut state, later) {
            Effect::SingleTap(event) => assert_eq!(event.position, first),
            other => panic!("expected single tap, got {other:?}"),
        }
        assert_eq!(count_single_taps(&mut state, later), 0);
    }

    #[test]
    fn far_apart_taps_are_two_single_taps() {
        let mut state = view_with(Size::new(300.0, 400.0), Some(sample_image(600, 400)));
        let t0 = Instant::now();

        tap(&mut state, Point::new(10.0, 10.0), t0);
        tap(&mut state, Point::new(290.0, 390.0), t0 + Duration::from_millis(110));

        assert_eq!(count_single_taps(&mut state, t0 + Duration::from_millis(120)), 2);
        assert!(!state.is_zoomed_in());
        assert_abs_diff_eq!(state.scale(), state.min_scale());
    }

    #[tokio::test]
    async fn provider_result_is_shown() {
        let provider = FixedProvider::new(Some(sample_image(600, 400)));
        let mut state = State::default().with_provider(provider.clone());
        let _ = state.update(Message::Resized(Size::new(300.0, 400.0)));

        let resolved = state.request("gallery/0".to_string()).await;
        let _ = state.update(resolved);

        assert_eq!(
            *provider.requested.lock().expect("provider lock poisoned"),
            vec!["gallery/0".to_string()]
        );
        assert!(state.has_image());
        assert_eq!(state.identifier(), Some("gallery/0"));
        assert_abs_diff_eq!(state.min_scale(), 0.5, epsilon = SCALE_EPSILON);
    }

    #[tokio::test]
    async fn provider_failure_is_an_absent_image() {
        let mut state = State::default().with_provider(FixedProvider::new(None));
        let _ = state.update(Message::Resized(Size::new(300.0, 400.0)));
        let _ = state.load_image(Some(sample_image(600, 400)));

        let resolved = state.request("gallery/missing".to_string()).await;
        let _ = state.update(resolved);

        assert!(!state.has_image());
        assert_abs_diff_eq!(state.scale(), 1.0);
        assert_abs_diff_eq!(state.max_scale(), 1.0);
        assert_eq!(state.layout().content_size, Size::ZERO);
    }

    #[tokio::test]
    async fn late_provider_result_loses_to_newer_request() {
        let mut state =
            State::default().with_provider(FixedProvider::new(Some(sample_image(64, 64))));
        let _ = state.update(Message::Resized(Size::new(300.0, 400.0)));

        let first = state.request("first".to_string());
        let second = state.request("second".to_string());

        let _ = state.update(first.await);
        assert!(!state.has_image());

        let _ = state.update(second.await);
        assert!(state.has_image());
        assert_eq!(state.identifier(), Some("second"));
    }
}
