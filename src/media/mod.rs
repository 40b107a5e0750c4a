// SPDX-License-Identifier: MPL-2.0
//! Bitmap loading and the image provider boundary used by the zoomable view.

pub mod image;
pub mod provider;

pub use image::{decode_image, load_image, ImageData};
pub use provider::{FileProvider, ImageProvider};
