// SPDX-License-Identifier: MPL-2.0
//! A wrapper widget that turns raw pointer and touch events into gestures.
//!
//! The wrapped content (the zoom view's scrollable) keeps receiving mouse
//! presses and single-finger touches, so native touch panning still works.
//! Wheel events and multi-finger touches are consumed here: the wheel zooms
//! instead of scrolling, and a pinch must not pan the scrollable.
//!
//! While handling each event the widget also compares its laid-out size with
//! the last one it reported and publishes the new size on change. A window
//! resize delivers an event of its own, so host-driven resizes are seen on
//! the next event after the layout that produced them.

use iced::advanced::layout::{self, Layout};
use iced::advanced::mouse;
use iced::advanced::overlay;
use iced::advanced::renderer;
use iced::advanced::widget::{self, tree, Widget};
use iced::advanced::{Clipboard, Shell};
use iced::{touch, Element, Event, Length, Point, Rectangle, Size};

/// Pointer input in the widget's local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Left mouse button pressed.
    Pressed(Point),
    /// Cursor moved while the left button is held.
    Moved(Point),
    /// Left mouse button released.
    Released(Point),
    FingerPressed { id: u64, position: Point },
    FingerMoved { id: u64, position: Point },
    /// Finger lifted or lost.
    FingerLifted { id: u64, position: Point },
    /// Wheel scrolled by `lines` notches (positive zooms in).
    Wheel { lines: f32, position: Point },
}

/// Wraps content and publishes the gestures performed on it.
pub struct GestureArea<'a, Message, Theme, Renderer> {
    content: Element<'a, Message, Theme, Renderer>,
    on_gesture: Box<dyn Fn(Gesture) -> Message + 'a>,
    on_resize: Option<Box<dyn Fn(Size) -> Message + 'a>>,
    interaction: mouse::Interaction,
}

impl<'a, Message, Theme, Renderer> GestureArea<'a, Message, Theme, Renderer> {
    pub fn new(
        content: impl Into<Element<'a, Message, Theme, Renderer>>,
        on_gesture: impl Fn(Gesture) -> Message + 'a,
    ) -> Self {
        Self {
            content: content.into(),
            on_gesture: Box::new(on_gesture),
            on_resize: None,
            interaction: mouse::Interaction::default(),
        }
    }

    /// Publishes the widget size on the first event it handles and on the
    /// first event after its size changed.
    #[must_use]
    pub fn on_resize(mut self, on_resize: impl Fn(Size) -> Message + 'a) -> Self {
        self.on_resize = Some(Box::new(on_resize));
        self
    }

    /// Cursor shown while hovering the area.
    #[must_use]
    pub fn interaction(mut self, interaction: mouse::Interaction) -> Self {
        self.interaction = interaction;
        self
    }
}

/// Per-widget input tracking kept in the widget tree.
#[derive(Debug, Default)]
struct State {
    last_size: Option<Size>,
    button_down: bool,
    fingers: Vec<u64>,
}

impl State {
    fn is_multi_touch(&self) -> bool {
        self.fingers.len() >= 2
    }

    /// Records the current size. Returns it when it differs from the last one.
    fn observe_size(&mut self, size: Size) -> Option<Size> {
        if self.last_size == Some(size) {
            None
        } else {
            self.last_size = Some(size);
            Some(size)
        }
    }

    fn classify(
        &mut self,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<Gesture> {
        let local = |p: Point| Point::new(p.x - bounds.x, p.y - bounds.y);

        match event {
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let position = cursor.position_in(bounds)?;
                self.button_down = true;
                Some(Gesture::Pressed(position))
            }
            Event::Mouse(mouse::Event::CursorMoved { position }) if self.button_down => {
                Some(Gesture::Moved(local(*position)))
            }
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left))
                if self.button_down =>
            {
                self.button_down = false;
                let position = cursor.position().map_or(Point::ORIGIN, local);
                Some(Gesture::Released(position))
            }
            Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
                let position = cursor.position_in(bounds)?;
                Some(Gesture::Wheel {
                    lines: scroll_lines(delta),
                    position,
                })
            }
            Event::Touch(touch::Event::FingerPressed { id, position }) => {
                if !bounds.contains(*position) {
                    return None;
                }
                if !self.fingers.contains(&id.0) {
                    self.fingers.push(id.0);
                }
                Some(Gesture::FingerPressed {
                    id: id.0,
                    position: local(*position),
                })
            }
            Event::Touch(touch::Event::FingerMoved { id, position })
                if self.fingers.contains(&id.0) =>
            {
                Some(Gesture::FingerMoved {
                    id: id.0,
                    position: local(*position),
                })
            }
            Event::Touch(
                touch::Event::FingerLifted { id, position } | touch::Event::FingerLost { id, position },
            ) if self.fingers.contains(&id.0) => {
                self.fingers.retain(|f| *f != id.0);
                Some(Gesture::FingerLifted {
                    id: id.0,
                    position: local(*position),
                })
            }
            _ => None,
        }
    }
}

/// Whether the event must not reach the wrapped scrollable.
fn is_consumed(gesture: &Gesture, multi_touch: bool) -> bool {
    match gesture {
        Gesture::Wheel { .. } => true,
        Gesture::FingerPressed { .. }
        | Gesture::FingerMoved { .. }
        | Gesture::FingerLifted { .. } => multi_touch,
        Gesture::Pressed(_) | Gesture::Moved(_) | Gesture::Released(_) => false,
    }
}

fn scroll_lines(delta: &mouse::ScrollDelta) -> f32 {
    match delta {
        mouse::ScrollDelta::Lines { y, .. } => *y,
        mouse::ScrollDelta::Pixels { y, .. } => *y / 120.0,
    }
}

impl<Message, Theme, Renderer> Widget<Message, Theme, Renderer>
    for GestureArea<'_, Message, Theme, Renderer>
where
    Renderer: renderer::Renderer,
{
    fn tag(&self) -> tree::Tag {
        tree::Tag::of::<State>()
    }

    fn state(&self) -> tree::State {
        tree::State::new(State::default())
    }

    fn size(&self) -> Size<Length> {
        self.content.as_widget().size()
    }

    fn layout(
        &mut self,
        tree: &mut widget::Tree,
        renderer: &Renderer,
        limits: &layout::Limits,
    ) -> layout::Node {
        self.content
            .as_widget_mut()
            .layout(&mut tree.children[0], renderer, limits)
    }

    fn children(&self) -> Vec<widget::Tree> {
        vec![widget::Tree::new(&self.content)]
    }

    fn diff(&self, tree: &mut widget::Tree) {
        tree.diff_children(&[&self.content]);
    }

    fn draw(
        &self,
        tree: &widget::Tree,
        renderer: &mut Renderer,
        theme: &Theme,
        style: &renderer::Style,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        viewport: &Rectangle,
    ) {
        self.content.as_widget().draw(
            &tree.children[0],
            renderer,
            theme,
            style,
            layout,
            cursor,
            viewport,
        );
    }

    fn update(
        &mut self,
        tree: &mut widget::Tree,
        event: &Event,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        renderer: &Renderer,
        clipboard: &mut dyn Clipboard,
        shell: &mut Shell<'_, Message>,
        viewport: &Rectangle,
    ) {
        let bounds = layout.bounds();
        let state = tree.state.downcast_mut::<State>();

        if let Some(on_resize) = &self.on_resize {
            if let Some(size) = state.observe_size(bounds.size()) {
                shell.publish(on_resize(size));
            }
        }

        let was_multi_touch = state.is_multi_touch();

        if let Some(gesture) = state.classify(event, bounds, cursor) {
            let consumed = is_consumed(&gesture, was_multi_touch || state.is_multi_touch());
            shell.publish((self.on_gesture)(gesture));

            if consumed {
                shell.capture_event();
                return;
            }
        }

        self.content.as_widget_mut().update(
            &mut tree.children[0],
            event,
            layout,
            cursor,
            renderer,
            clipboard,
            shell,
            viewport,
        );
    }

    fn mouse_interaction(
        &self,
        tree: &widget::Tree,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        viewport: &Rectangle,
        renderer: &Renderer,
    ) -> mouse::Interaction {
        if cursor.is_over(layout.bounds()) && self.interaction != mouse::Interaction::default() {
            return self.interaction;
        }

        self.content.as_widget().mouse_interaction(
            &tree.children[0],
            layout,
            cursor,
            viewport,
            renderer,
        )
    }

    fn operate(
        &mut self,
        tree: &mut widget::Tree,
        layout: Layout<'_>,
        renderer: &Renderer,
        operation: &mut dyn widget::Operation,
    ) {
        self.content
            .as_widget_mut()
            .operate(&mut tree.children[0], layout, renderer, operation);
    }

    fn overlay<'b>(
        &'b mut self,
        tree: &'b mut widget::Tree,
        layout: Layout<'b>,
        renderer: &Renderer,
        viewport: &Rectangle,
        translation: iced::Vector,
    ) -> Option<overlay::Element<'b, Message, Theme, Renderer>> {
        self.content.as_widget_mut().overlay(
            &mut tree.children[0],
            layout,
            renderer,
            viewport,
            translation,
        )
    }
}

impl<'a, Message, Theme, Renderer> From<GestureArea<'a, Message, Theme, Renderer>>
    for Element<'a, Message, Theme, Renderer>
where
    Message: 'a,
    Theme: 'a,
    Renderer: renderer::Renderer + 'a,
{
    fn from(area: GestureArea<'a, Message, Theme, Renderer>) -> Self {
        Self::new(area)
    }
}

/// Helper function to create a gesture area.
pub fn gesture_area<'a, Message, Theme, Renderer>(
    content: impl Into<Element<'a, Message, Theme, Renderer>>,
    on_gesture: impl Fn(Gesture) -> Message + 'a,
) -> GestureArea<'a, Message, Theme, Renderer>
where
    Renderer: renderer::Renderer,
{
    GestureArea::new(content, on_gesture)
}
