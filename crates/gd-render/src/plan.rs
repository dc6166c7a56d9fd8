//! Position-transition planning between renders.
//!
//! The coordinator snapshots cell origins before a re-render, measures
//! again afterwards, and asks the host to slide any cell that moved
//! materially. Sub-5px displacements are settled without animation.

use crate::geometry::RowGeometry;
use gd_core::CardId;
use kurbo::Point;
use std::collections::HashMap;

/// Minimum displacement on either axis before a slide is worth animating.
pub const MIN_SLIDE_DISTANCE: f64 = 5.0;

/// One cell's slide from its previous to its new origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardSlide {
    pub card: CardId,
    pub from: Point,
    pub to: Point,
}

/// Capture each rendered cell's origin, keyed by card.
pub fn snapshot_positions(rows: &[RowGeometry]) -> HashMap<CardId, Point> {
    rows.iter()
        .flat_map(|r| r.cells.iter())
        .map(|c| (c.card, c.bounds.origin()))
        .collect()
}

/// Slides for every card present in both snapshots that moved more than
/// [`MIN_SLIDE_DISTANCE`] on either axis. Cards that appeared or vanished
/// between renders settle in place.
pub fn plan_slides(
    before: &HashMap<CardId, Point>,
    after: &HashMap<CardId, Point>,
) -> Vec<CardSlide> {
    let mut slides: Vec<CardSlide> = after
        .iter()
        .filter_map(|(&card, &to)| {
            let from = *before.get(&card)?;
            let moved = (to.x - from.x).abs() > MIN_SLIDE_DISTANCE
                || (to.y - from.y).abs() > MIN_SLIDE_DISTANCE;
            moved.then_some(CardSlide { card, from, to })
        })
        .collect();
    // Deterministic order for the host (HashMap iteration is not).
    slides.sort_by(|a, b| a.card.as_str().cmp(b.card.as_str()));
    slides
}
