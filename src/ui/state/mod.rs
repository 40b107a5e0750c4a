// SPDX-License-Identifier: MPL-2.0
//! UI state management modules
//!
//! The zoom arithmetic, viewport geometry and gesture recognizers used by the
//! zoomable view, kept free of widget code so they can be tested on their own.

pub mod animation;
pub mod drag;
pub mod pinch;
pub mod tap;
pub mod viewport;
pub mod zoom;

// Re-export commonly used types for convenience
pub use animation::ZoomAnimation;
pub use drag::DragState;
pub use pinch::{PinchState, PinchStep};
pub use tap::{TapOutcome, TapRecognizer};
pub use viewport::ViewportState;
pub use zoom::{compute_bounds, ZoomBounds, ZoomState, ZoomTransition};
