//! Layout data model: placements, the layout collection, and grid configuration.
//!
//! A [`Layout`] is the full set of card placements for one grid instance.
//! It is a plain value: the layout manager in [`crate::layout`] consumes a
//! layout and returns a new one, never mutating in place.

use crate::id::CardId;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// One row of card ids, left to right.
pub type Row = SmallVec<[CardId; 4]>;

/// A single card's position on the grid.
///
/// Serialized as `{ "id": ..., "row": ..., "col": ... }` — the shape the
/// host page writes to session storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    #[serde(rename = "id")]
    pub card: CardId,
    pub row: usize,
    pub col: usize,
}

impl Placement {
    pub fn new(card: CardId, row: usize, col: usize) -> Self {
        Self { card, row, col }
    }
}

/// The ordered collection of placements for a grid instance.
///
/// Invariants (restored by `cleanup_layout` after every mutation):
/// - one placement per card id;
/// - per row, occupied columns are exactly `0..k` with `k ≤ max_cards_per_row`;
/// - row indices in use are contiguous from 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layout(Vec<Placement>);

impl Layout {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn from_placements(placements: Vec<Placement>) -> Self {
        Self(placements)
    }

    pub fn placements(&self) -> &[Placement] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Placement> {
        self.0.iter()
    }

    pub fn card_count(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, card: CardId) -> bool {
        self.0.iter().any(|p| p.card == card)
    }

    /// Current `(row, col)` of a card, if placed.
    pub fn position_of(&self, card: CardId) -> Option<(usize, usize)> {
        self.0
            .iter()
            .find(|p| p.card == card)
            .map(|p| (p.row, p.col))
    }
}

/// Per-grid configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Row capacity. Clamped to at least 1.
    pub max_cards_per_row: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            max_cards_per_row: 2,
        }
    }
}

impl GridConfig {
    pub fn new(max_cards_per_row: usize) -> Self {
        Self {
            max_cards_per_row: max_cards_per_row.max(1),
        }
    }
}

/// How a committed move should be applied by the layout manager.
///
/// The drop calculator distinguishes separator drops from trailing new
/// rows for feedback purposes; both collapse to [`MoveKind::NewRow`] here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// Insert into an existing row with spare capacity.
    Insert,
    /// Reposition within a row that is at capacity.
    Reorder,
    /// Create a brand-new row at the target index.
    NewRow,
}
