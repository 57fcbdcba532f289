//! Dropkit Layout
//!
//! Geometry-facing helpers for floating widgets:
//!
//! - [`InstanceKey`]: stable unique ids used for accessibility wiring
//! - [`placement`]: prefer-below / flip-above / clamp-to-viewport positioning
//! - [`hit_test`]: outside-pointer detection for click-away dismissal

pub mod hit_test;
pub mod key;
pub mod placement;

pub use hit_test::is_outside;
pub use key::InstanceKey;
pub use placement::{place, Placement, PlacementOptions, PlacementSide};
