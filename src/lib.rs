// SPDX-License-Identifier: MPL-2.0
//! `zoom_view` is a pinch-and-double-tap zoomable image view built with the
//! Iced GUI framework, together with a small host application that shows one
//! image in it.
//!
//! The view fits the image to its bounds, centers it while it is smaller than
//! the viewport and toggles between fit and a close-up on double tap.

#![doc(html_root_url = "https://docs.rs/zoom_view/0.1.0")]

pub mod app;
pub mod config;
pub mod error;
pub mod media;
pub mod ui;

#[cfg(test)]
mod test_utils;
