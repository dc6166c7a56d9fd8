//! Drop-target resolution: pointer position → drop candidate.
//!
//! Candidates are recomputed from fresh geometry on every pointer move and
//! never stored between moves. Precedence: row-boundary bands, then
//! within-row placement, then the trailing new row, then the empty grid.

use crate::geometry::RowGeometry;
use gd_core::{CardId, GridConfig, MoveKind};
use kurbo::Point;
use log::debug;

/// Vertical band above the first row that signals a new leading row.
const ABOVE_FIRST_BAND: f64 = 40.0;
/// Total height of the band centered between two consecutive rows.
const SEPARATOR_BAND: f64 = 50.0;
/// Vertical padding applied to a row's bounds for within-row placement.
const ROW_PAD: f64 = 20.0;
/// Tolerance below the last row's bottom edge before the trailing zone.
const TRAILING_TOLERANCE: f64 = 10.0;
/// Horizontal gap assumed between cells when a row has too few to measure.
const DEFAULT_GAP: f64 = 16.0;

/// Classification of a drop candidate. Exactly one applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropKind {
    /// Insert into an existing row with spare capacity.
    Insert,
    /// Reposition within a row already at capacity.
    Reorder,
    /// New row at a boundary above or between existing rows.
    Separator,
    /// New row appended after all rows (or the empty grid).
    NewRow,
}

/// A transient proposal for where the dragged card would land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropCandidate {
    pub row: usize,
    pub col: usize,
    pub kind: DropKind,
}

impl DropCandidate {
    pub fn new(row: usize, col: usize, kind: DropKind) -> Self {
        Self { row, col, kind }
    }

    /// Whether this candidate creates a brand-new row.
    pub fn creates_row(&self) -> bool {
        matches!(self.kind, DropKind::Separator | DropKind::NewRow)
    }

    /// Collapse to the layout manager's move classification.
    pub fn move_kind(&self) -> MoveKind {
        match self.kind {
            DropKind::Insert => MoveKind::Insert,
            DropKind::Reorder => MoveKind::Reorder,
            DropKind::Separator | DropKind::NewRow => MoveKind::NewRow,
        }
    }

    /// A candidate is committable only if it creates a row, targets the
    /// dragged card's own row, or targets a row with spare capacity.
    pub fn is_valid(&self, rows: &[RowGeometry], dragged: CardId, cfg: GridConfig) -> bool {
        if self.creates_row() {
            return true;
        }
        let Some(row) = rows.get(self.row) else {
            debug!("rejecting drop of {dragged:?}: row {} does not exist", self.row);
            return false;
        };
        if row.contains_card(dragged) || row.cells.len() < cfg.max_cards_per_row {
            return true;
        }
        debug!("rejecting drop of {dragged:?}: row {} is full", self.row);
        false
    }
}

/// Resolve the drop candidate for a pointer position, or `None` when the
/// pointer is outside every applicable zone (feedback clears).
pub fn resolve_drop(
    point: Point,
    rows: &[RowGeometry],
    dragged: CardId,
    cfg: GridConfig,
) -> Option<DropCandidate> {
    if rows.is_empty() {
        return Some(DropCandidate::new(0, 0, DropKind::NewRow));
    }

    // Boundary bands take precedence over padded row interiors.
    let first_top = rows[0].bounds.y0;
    if point.y < first_top && point.y >= first_top - ABOVE_FIRST_BAND {
        return Some(DropCandidate::new(0, 0, DropKind::Separator));
    }
    for i in 0..rows.len() - 1 {
        let gap_mid = (rows[i].bounds.y1 + rows[i + 1].bounds.y0) / 2.0;
        if (point.y - gap_mid).abs() <= SEPARATOR_BAND / 2.0 {
            return Some(DropCandidate::new(i + 1, 0, DropKind::Separator));
        }
    }

    for (i, row) in rows.iter().enumerate() {
        if point.y >= row.bounds.y0 - ROW_PAD && point.y <= row.bounds.y1 + ROW_PAD {
            return Some(resolve_column(point, i, row, dragged, cfg));
        }
    }

    let last_bottom = rows.last().unwrap().bounds.y1;
    if point.y > last_bottom + TRAILING_TOLERANCE {
        return Some(DropCandidate::new(rows.len(), 0, DropKind::NewRow));
    }

    debug!("pointer ({:.1}, {:.1}) outside every drop zone", point.x, point.y);
    None
}

/// Column resolution within one row.
fn resolve_column(
    point: Point,
    row_index: usize,
    row: &RowGeometry,
    dragged: CardId,
    cfg: GridConfig,
) -> DropCandidate {
    if row.cells.is_empty() {
        return DropCandidate::new(row_index, 0, DropKind::Insert);
    }

    if row.cells.len() >= cfg.max_cards_per_row {
        // Reorder mode: left half of a card targets its index, right half
        // the next one. Off-card positions clamp to the nearest end; the
        // result never exceeds the row capacity.
        let col = row
            .cells
            .iter()
            .position(|c| point.x < c.bounds.center().x)
            .unwrap_or(row.cells.len())
            .min(cfg.max_cards_per_row);
        return DropCandidate::new(row_index, col, DropKind::Reorder);
    }

    // Insertion mode: lay the row out hypothetically with the dragged card
    // already inserted, and pick the slot whose span contains the pointer.
    // The first and last slots extend to ±infinity.
    let others: Vec<_> = row.cells.iter().filter(|c| c.card != dragged).collect();
    let n = others.len();
    if n == 0 {
        return DropCandidate::new(row_index, 0, DropKind::Insert);
    }

    let width = others.iter().map(|c| c.bounds.width()).sum::<f64>() / n as f64;
    let gap = if n >= 2 {
        (others[1].bounds.x0 - others[0].bounds.x1).max(0.0)
    } else {
        DEFAULT_GAP
    };
    let pitch = width + gap;
    let total = (n + 1) as f64 * width + n as f64 * gap;
    let start = row.bounds.center().x - total / 2.0;

    for slot in 0..n {
        // Midpoint between hypothetical centers of slot and slot + 1.
        let boundary = start + width / 2.0 + slot as f64 * pitch + pitch / 2.0;
        if point.x < boundary {
            return DropCandidate::new(row_index, slot, DropKind::Insert);
        }
    }
    DropCandidate::new(row_index, n, DropKind::Insert)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::CellGeometry;
    use kurbo::Rect;
    use pretty_assertions::assert_eq;

    const CARD_W: f64 = 100.0;
    const CARD_H: f64 = 80.0;
    const GAP: f64 = 20.0;
    const ROW_GAP: f64 = 24.0;

    /// Build centered rows of 100x80 cells in an 800px-wide grid starting
    /// at y = 100, mirroring what a flex-centered host reports.
    fn grid(rows: &[&[&str]]) -> Vec<RowGeometry> {
        let mut out = Vec::new();
        let mut y = 100.0;
        for names in rows {
            let n = names.len() as f64;
            let total = n * CARD_W + (n - 1.0) * GAP;
            let start = 400.0 - total / 2.0;
            let cells = names
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    let x = start + i as f64 * (CARD_W + GAP);
                    CellGeometry::new(
                        CardId::intern(name),
                        Rect::new(x, y, x + CARD_W, y + CARD_H),
                    )
                })
                .collect();
            out.push(RowGeometry::new(
                Rect::new(0.0, y, 800.0, y + CARD_H),
                cells,
            ));
            y += CARD_H + ROW_GAP;
        }
        out
    }

    fn drag(name: &str) -> CardId {
        CardId::intern(name)
    }

    #[test]
    fn empty_grid_resolves_to_first_row() {
        let c = resolve_drop(Point::new(50.0, 50.0), &[], drag("x"), GridConfig::new(2));
        assert_eq!(c, Some(DropCandidate::new(0, 0, DropKind::NewRow)));
    }

    #[test]
    fn band_above_first_row_is_a_separator() {
        let rows = grid(&[&["a", "b"], &["c"]]);
        let c = resolve_drop(Point::new(400.0, 70.0), &rows, drag("c"), GridConfig::new(2));
        assert_eq!(c, Some(DropCandidate::new(0, 0, DropKind::Separator)));
    }

    #[test]
    fn far_above_first_row_is_no_candidate() {
        let rows = grid(&[&["a", "b"]]);
        let c = resolve_drop(Point::new(400.0, 10.0), &rows, drag("a"), GridConfig::new(2));
        assert_eq!(c, None);
    }

    #[test]
    fn band_between_rows_is_a_separator() {
        let rows = grid(&[&["a", "b"], &["c"]]);
        // Gap midpoint between row 0 (ends at 180) and row 1 (starts at 204).
        let c = resolve_drop(
            Point::new(400.0, 192.0),
            &rows,
            drag("a"),
            GridConfig::new(2),
        );
        assert_eq!(c, Some(DropCandidate::new(1, 0, DropKind::Separator)));
    }

    #[test]
    fn below_last_row_is_a_trailing_new_row() {
        let rows = grid(&[&["a", "b"]]);
        let c = resolve_drop(
            Point::new(400.0, 260.0),
            &rows,
            drag("a"),
            GridConfig::new(2),
        );
        assert_eq!(c, Some(DropCandidate::new(1, 0, DropKind::NewRow)));
    }

    #[test]
    fn row_below_capacity_picks_insertion_slot() {
        let rows = grid(&[&["a"], &["b", "c"]]);
        let cfg = GridConfig::new(2);
        // Row 0 holds only "a" (centered at 400). Dragging "b" over its left
        // half lands in slot 0, over its right half in slot 1.
        let left = resolve_drop(Point::new(300.0, 140.0), &rows, drag("b"), cfg);
        assert_eq!(left, Some(DropCandidate::new(0, 0, DropKind::Insert)));
        let right = resolve_drop(Point::new(500.0, 140.0), &rows, drag("b"), cfg);
        assert_eq!(right, Some(DropCandidate::new(0, 1, DropKind::Insert)));
    }

    #[test]
    fn own_cell_is_excluded_from_insertion_slots() {
        let rows = grid(&[&["a", "b"], &["c"]]);
        let cfg = GridConfig::new(3);
        // Row 0 is below a capacity of three. Dragging "a" over its own left
        // edge must not count "a" itself as a neighbor: slots are laid out
        // over "b" alone, so anything left of the row center is slot 0.
        let c = resolve_drop(Point::new(295.0, 140.0), &rows, drag("a"), cfg);
        assert_eq!(c, Some(DropCandidate::new(0, 0, DropKind::Insert)));
    }

    #[test]
    fn full_row_switches_to_reorder() {
        let rows = grid(&[&["a", "b"], &["c"]]);
        let cfg = GridConfig::new(2);
        // Cells: a spans 290..390 (center 340), b spans 410..510 (center 460).
        let before_a = resolve_drop(Point::new(300.0, 140.0), &rows, drag("c"), cfg);
        assert_eq!(before_a, Some(DropCandidate::new(0, 0, DropKind::Reorder)));
        let after_a = resolve_drop(Point::new(350.0, 140.0), &rows, drag("c"), cfg);
        assert_eq!(after_a, Some(DropCandidate::new(0, 1, DropKind::Reorder)));
        let after_b = resolve_drop(Point::new(520.0, 140.0), &rows, drag("c"), cfg);
        assert_eq!(after_b, Some(DropCandidate::new(0, 2, DropKind::Reorder)));
    }

    #[test]
    fn row_pad_extends_vertical_reach() {
        let rows = grid(&[&["a", "b"]]);
        // 15px below the row's bottom edge is still within the ±20px pad.
        let c = resolve_drop(
            Point::new(400.0, 195.0),
            &rows,
            drag("a"),
            GridConfig::new(2),
        );
        assert_eq!(c.map(|c| c.row), Some(0));
    }

    #[test]
    fn validity_rules() {
        let rows = grid(&[&["a", "b"], &["c"]]);
        let cfg = GridConfig::new(2);
        // New rows always commit.
        assert!(DropCandidate::new(2, 0, DropKind::NewRow).is_valid(&rows, drag("a"), cfg));
        // Own row always commits.
        assert!(DropCandidate::new(0, 1, DropKind::Insert).is_valid(&rows, drag("a"), cfg));
        // Foreign full row does not.
        assert!(!DropCandidate::new(0, 0, DropKind::Insert).is_valid(&rows, drag("c"), cfg));
        // Foreign row with room does.
        assert!(DropCandidate::new(1, 0, DropKind::Insert).is_valid(&rows, drag("a"), cfg));
        // A candidate for a row that no longer exists is rejected.
        assert!(!DropCandidate::new(9, 0, DropKind::Insert).is_valid(&rows, drag("a"), cfg));
    }
}
