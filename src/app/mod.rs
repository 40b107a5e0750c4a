// SPDX-License-Identifier: MPL-2.0
//! Application root: a single screen hosting one zoomable image view.
//!
//! The host loads the startup image into the view and is the observer of its
//! single taps. Everything else (zooming, panning, resizing) is handled by
//! the view itself.

mod message;
pub mod paths;

pub use message::{Flags, Message};

use crate::config;
use crate::ui::zoom_view::{self, Effect, TapEvent};
use iced::{window, Element, Subscription, Task};
use std::fmt;

/// Root Iced application state.
pub struct App {
    view: zoom_view::State,
    taps: u64,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("has_image", &self.view.has_image())
            .field("scale", &self.view.scale())
            .field("taps", &self.taps)
            .finish()
    }
}

pub const WINDOW_DEFAULT_WIDTH: u32 = 800;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 650;
pub const MIN_WINDOW_WIDTH: u32 = 320;
pub const MIN_WINDOW_HEIGHT: u32 = 240;

/// Builds the window settings
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced calls boot through `Fn`, the flags are consumed on the first call.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Reads the configuration and starts loading the startup image.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, warning) = config::load();
        if let Some(warning) = warning {
            tracing::warn!("{warning}");
        }

        let mut view = zoom_view::State::new(config.zoom.resolve(), config.gestures.resolve());

        let task = match flags.image.or(config.startup.image) {
            Some(identifier) => view.load_identifier(identifier).map(Message::ZoomView),
            None => {
                tracing::info!("no startup image configured");
                Task::none()
            }
        };

        (Self { view, taps: 0 }, task)
    }

    fn title(&self) -> String {
        match self.view.identifier() {
            Some(identifier) if self.view.has_image() => {
                format!("{identifier} ({:.0}%) - Zoom View", self.view.scale() * 100.0)
            }
            _ => "Zoom View".to_string(),
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        self.view.subscription().map(Message::ZoomView)
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ZoomView(message) => {
                let (effect, task) = self.view.update(message);
                self.handle_effect(effect);
                task.map(Message::ZoomView)
            }
        }
    }

    fn handle_effect(&mut self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::SingleTap(TapEvent {
                position,
                image_point,
            }) => {
                self.taps += 1;
                match image_point {
                    Some(point) => tracing::info!(
                        x = position.x,
                        y = position.y,
                        image_x = point.x,
                        image_y = point.y,
                        count = self.taps,
                        "single tap"
                    ),
                    None => tracing::info!(
                        x = position.x,
                        y = position.y,
                        count = self.taps,
                        "single tap on empty view"
                    ),
                }
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        zoom_view::view(&self.view).map(Message::ZoomView)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_image;
    use iced::{Point, Size};
    use std::time::{Duration, Instant};

    fn app() -> App {
        App {
            view: zoom_view::State::default(),
            taps: 0,
        }
    }

    #[test]
    fn title_without_image() {
        assert_eq!(app().title(), "Zoom View");
    }

    #[test]
    fn single_tap_is_observed_by_host() {
        let mut app = app();
        let t0 = Instant::now();
        let _ = app.update(Message::ZoomView(zoom_view::Message::Resized(Size::new(
            300.0, 400.0,
        ))));
        let _ = app.view.load_image(Some(sample_image(600, 400)));

        let position = Point::new(150.0, 200.0);
        let _ = app
            .view
            .handle_gesture_at(zoom_view::Gesture::Pressed(position), t0);
        let _ = app.view.handle_gesture_at(
            zoom_view::Gesture::Released(position),
            t0 + Duration::from_millis(30),
        );
        let _ = app.update(Message::ZoomView(zoom_view::Message::Tick(
            t0 + Duration::from_secs(1),
        )));

        assert_eq!(app.taps, 1);
    }

    #[test]
    fn debug_output_summarizes_state() {
        let rendered = format!("{:?}", app());
        assert!(rendered.contains("has_image: false"));
    }
}
