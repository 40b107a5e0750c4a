// SPDX-License-Identifier: MPL-2.0
//! User interface components and state management.
//!
//! UI code follows the Elm-style "state down, messages up" pattern.
//!
//! - [`zoom_view`] - Zoomable image view component and its pane
//! - [`state`] - Zoom arithmetic, viewport geometry and gesture recognizers
//! - [`widgets`] - Custom Iced widgets (gesture area)

pub mod state;
pub mod widgets;
pub mod zoom_view;
