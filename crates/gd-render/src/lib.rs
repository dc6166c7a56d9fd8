//! Geometry, drop-target resolution, and render planning for the card grid.
//!
//! This crate never touches a real DOM: hosts implement [`GridHost`] and
//! the engine drives it, so the whole drag pipeline runs headless in tests.

pub mod drop;
pub mod feedback;
pub mod geometry;
pub mod plan;

pub use drop::{DropCandidate, DropKind, resolve_drop};
pub use feedback::{FeedbackSink, FeedbackState, Highlight};
pub use geometry::{CellGeometry, RowGeometry, hit_cell};
pub use plan::{CardSlide, MIN_SLIDE_DISTANCE, plan_slides, snapshot_positions};

use gd_core::Row;

/// The injected render/geometry capability a grid host provides.
///
/// `render` rebuilds the visible rows from the abstract layout (silently
/// skipping card ids it has no element for), `measure` reports the current
/// on-screen geometry, and `clear` empties the container on teardown.
/// Feedback effects come through the [`FeedbackSink`] supertrait.
pub trait GridHost: FeedbackSink {
    fn render(&mut self, rows: &[Row]);
    fn measure(&self) -> Vec<RowGeometry>;
    fn clear(&mut self);
}
