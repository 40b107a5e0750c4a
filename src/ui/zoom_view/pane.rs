// SPDX-License-Identifier: MPL-2.0
//! Zoom view pane that renders the image surface inside the scrollable area.

use super::component::{Layout, Message, State, SCROLLABLE_ID};
use crate::media::ImageData;
use crate::ui::widgets::gesture_area::gesture_area;
use iced::mouse;
use iced::widget::scrollable::{Direction, Scrollbar, Viewport};
use iced::widget::{Column, Container, Id, Image, Scrollable};
use iced::{ContentFit, Element, Length, Padding};

pub fn view(state: &State) -> Element<'_, Message> {
    let layout = state.layout();

    let content: Element<'_, Message> = match state.image() {
        Some(image) if layout.content_size.width > 0.0 => view_surface(image, &layout),
        // Nothing to scroll: an empty region that still fills the pane so
        // its size keeps being reported.
        _ => Container::new(Column::new())
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
    };

    let interaction = if state.is_dragging() {
        mouse::Interaction::Grabbing
    } else if state.has_image() {
        mouse::Interaction::Grab
    } else {
        mouse::Interaction::default()
    };

    gesture_area(content, Message::Gesture)
        .on_resize(Message::Resized)
        .interaction(interaction)
        .into()
}

fn view_surface<'a>(image: &'a ImageData, layout: &Layout) -> Element<'a, Message> {
    let frame = layout.image_frame;

    let picture = Image::new(image.handle.clone())
        .width(Length::Fixed(frame.width))
        .height(Length::Fixed(frame.height))
        .content_fit(ContentFit::Fill);

    // Left/top padding places the surface at its centered origin; the fixed
    // content size keeps the margins when the surface is smaller.
    let surface = Container::new(picture)
        .padding(Padding {
            top: frame.y,
            right: 0.0,
            bottom: 0.0,
            left: frame.x,
        })
        .width(Length::Fixed(layout.content_size.width))
        .height(Length::Fixed(layout.content_size.height));

    Scrollable::new(surface)
        .id(Id::new(SCROLLABLE_ID))
        .width(Length::Fill)
        .height(Length::Fill)
        .direction(Direction::Both {
            vertical: Scrollbar::hidden(),
            horizontal: Scrollbar::hidden(),
        })
        .on_scroll(|viewport: Viewport| Message::Scrolled(viewport.absolute_offset()))
        .into()
}
