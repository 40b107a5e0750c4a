// SPDX-License-Identifier: MPL-2.0
pub mod gesture_area;

pub use gesture_area::{gesture_area, GestureArea};
