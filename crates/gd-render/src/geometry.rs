//! Rendered grid geometry, as reported by the host per pointer event.
//!
//! The engine never caches geometry across renders: every drag-move reads a
//! fresh snapshot from the host, so drop resolution always reflects what is
//! actually on screen.

use gd_core::CardId;
use kurbo::{Point, Rect};

/// On-screen bounds of one rendered card cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellGeometry {
    pub card: CardId,
    pub bounds: Rect,
}

impl CellGeometry {
    pub fn new(card: CardId, bounds: Rect) -> Self {
        Self { card, bounds }
    }
}

/// On-screen bounds of one rendered row and its cells, left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct RowGeometry {
    pub bounds: Rect,
    pub cells: Vec<CellGeometry>,
}

impl RowGeometry {
    pub fn new(bounds: Rect, cells: Vec<CellGeometry>) -> Self {
        Self { bounds, cells }
    }

    pub fn contains_card(&self, card: CardId) -> bool {
        self.cells.iter().any(|c| c.card == card)
    }
}

/// Find the cell under a point. Cells never overlap, so the first match wins.
pub fn hit_cell(rows: &[RowGeometry], point: Point) -> Option<CellGeometry> {
    rows.iter()
        .flat_map(|r| r.cells.iter())
        .find(|c| c.bounds.contains(point))
        .copied()
}
