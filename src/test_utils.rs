// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons and sample images.
//!
//! Re-exports the `approx` crate's assertion macros, which handle the
//! floating-point error that the zoom arithmetic accumulates.

pub use approx::assert_abs_diff_eq;

use crate::media::ImageData;

/// Tolerance for scale values computed through the fit inset.
pub const SCALE_EPSILON: f32 = 1e-3;

/// Builds an opaque RGBA image of the given size.
#[must_use]
pub fn sample_image(width: u32, height: u32) -> ImageData {
    let pixels = vec![0x7f_u8; width as usize * height as usize * 4];
    ImageData::from_rgba(width, height, pixels)
}
