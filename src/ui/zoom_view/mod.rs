// SPDX-License-Identifier: MPL-2.0
//! Pinch-and-double-tap zoomable image view.
//!
//! The view fits the image into its bounds, keeps it centered while it is
//! smaller than the viewport and lets the user zoom by double tap, pinch or
//! mouse wheel, and pan by dragging.

pub mod component;
pub mod pane;

pub use crate::ui::widgets::gesture_area::Gesture;
pub use component::{Effect, Layout, Message, State, TapEvent, SCROLLABLE_ID};
pub use pane::view;
