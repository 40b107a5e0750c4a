// SPDX-License-Identifier: MPL-2.0
//! Image decoding into the bitmap handed to the zoomable view.

use crate::error::Result;
use iced::widget::image;
use iced::Size;
use std::fs;
use std::path::Path;

/// A decoded bitmap together with its intrinsic pixel size.
#[derive(Debug, Clone)]
pub struct ImageData {
    pub handle: image::Handle,
    pub width: u32,
    pub height: u32,
}

impl ImageData {
    /// Creates a new `ImageData` from RGBA pixels.
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        let handle = image::Handle::from_rgba(width, height, pixels);
        Self {
            handle,
            width,
            height,
        }
    }

    /// Intrinsic size in pixels.
    #[must_use]
    // Allow cast_precision_loss: f32 is exact up to 2^24, far above any real image edge.
    #[allow(clippy::cast_precision_loss)]
    pub fn size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }

    /// Whether either dimension is zero, in which case there is nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Load an image from the given path and return its data.
///
/// # Errors
///
/// Returns [`Error::Io`](crate::error::Error::Io) if the file cannot be read
/// and [`Error::Decode`](crate::error::Error::Decode) if the bytes are not a
/// supported image.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<ImageData> {
    let bytes = fs::read(path.as_ref())?;
    decode_image(&bytes)
}

/// Decodes an encoded image (PNG, JPEG, ...) held in memory.
///
/// # Errors
///
/// Returns an error if the format is unknown or the data is corrupt.
pub fn decode_image(bytes: &[u8]) -> Result<ImageData> {
    let img = image_rs::load_from_memory(bytes)?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(ImageData::from_rgba(width, height, rgba.into_vec()))
}
