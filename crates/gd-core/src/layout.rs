//! The layout manager: pure transforms over [`Layout`] values.
//!
//! Every function takes a layout in and hands a new layout back; nothing
//! here touches geometry or the DOM. `cleanup_layout` is the authoritative
//! invariant-restorer — every structural mutation runs through it, so the
//! mutation arithmetic itself only ever has to be right one level deep.

use crate::id::CardId;
use crate::model::{GridConfig, Layout, MoveKind, Placement, Row};
use log::debug;
use smallvec::smallvec;
use std::collections::HashSet;

/// Group a layout into ordered rows of ordered card ids.
///
/// Works on pre-cleanup layouts too: rows are keyed by their stored index
/// (gaps collapse), cards within a row ordered by stored column, and
/// duplicate card ids keep their first occurrence. Empty rows are omitted.
pub fn rows_from_layout(layout: &Layout) -> Vec<Row> {
    let mut placements: Vec<Placement> = layout.placements().to_vec();
    placements.sort_by_key(|p| (p.row, p.col));

    let mut rows: Vec<Row> = Vec::new();
    let mut seen: HashSet<CardId> = HashSet::new();
    let mut current_key: Option<usize> = None;

    for p in placements {
        if !seen.insert(p.card) {
            continue;
        }
        if current_key != Some(p.row) {
            rows.push(Row::new());
            current_key = Some(p.row);
        }
        rows.last_mut().unwrap().push(p.card);
    }
    rows
}

/// Rebuild a layout from rows, assigning contiguous row and column indices.
/// Empty rows vanish here.
fn layout_from_rows(rows: &[Row]) -> Layout {
    let mut placements = Vec::new();
    let mut row_index = 0;
    for row in rows {
        if row.is_empty() {
            continue;
        }
        for (col, &card) in row.iter().enumerate() {
            placements.push(Placement::new(card, row_index, col));
        }
        row_index += 1;
    }
    Layout::from_placements(placements)
}

/// Fill rows top-down, left-to-right, in the iteration order of `cards`.
pub fn init_layout<I>(cards: I, cfg: GridConfig) -> Layout
where
    I: IntoIterator<Item = CardId>,
{
    let max = cfg.max_cards_per_row;
    let mut placements = Vec::new();
    let mut seen = HashSet::new();
    let mut index = 0;
    for card in cards {
        if !seen.insert(card) {
            continue;
        }
        placements.push(Placement::new(card, index / max, index % max));
        index += 1;
    }
    Layout::from_placements(placements)
}

/// Re-flow all cards (preserving relative order by row, then column) into
/// rows honoring the current capacity. Used when a stale persisted layout
/// is restored and whenever `max_cards_per_row` changes.
pub fn fix_layout_for_max_cards(layout: &Layout, cfg: GridConfig) -> Layout {
    let ordered = rows_from_layout(layout)
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();
    init_layout(ordered, cfg)
}

/// Reconstruct contiguous row and column indices from current occupancy.
///
/// Rows past capacity spill from the tail into the head of the next row
/// (matching the single-level bump `move_card` performs), cascading as far
/// as needed. Idempotent: a clean layout passes through unchanged.
pub fn cleanup_layout(layout: &Layout, cfg: GridConfig) -> Layout {
    let max = cfg.max_cards_per_row;
    let rows = rows_from_layout(layout);

    let mut out: Vec<Row> = Vec::new();
    let mut carry: Row = Row::new();
    for row in rows {
        let mut working = carry;
        working.extend(row);
        carry = Row::new();
        if working.len() > max {
            carry = working.drain(max..).collect();
        }
        out.push(working);
    }
    while !carry.is_empty() {
        let mut row: Row = Row::new();
        let take = carry.len().min(max);
        row.extend(carry.drain(..take));
        out.push(row);
    }

    layout_from_rows(&out)
}

/// Apply a committed move, returning the new layout — or the input
/// unchanged when the move is invalid (unknown card, or a plain insertion
/// into a row already at capacity).
pub fn move_card(
    layout: &Layout,
    card: CardId,
    target_row: usize,
    target_col: usize,
    kind: MoveKind,
    cfg: GridConfig,
) -> Layout {
    let Some((src_row, _)) = layout.position_of(card) else {
        debug!("move_card: {card:?} not in layout, ignoring");
        return layout.clone();
    };

    let mut rows = rows_from_layout(layout);

    match kind {
        MoveKind::NewRow => {
            // Rows at or after the boundary shift down; the card sits alone.
            for row in &mut rows {
                row.retain(|&mut c| c != card);
            }
            let at = target_row.min(rows.len());
            rows.insert(at, smallvec![card]);
        }
        _ if src_row == target_row => {
            // Within-row splice: read the row without the moved card, put it
            // back at the clamped column, renumber.
            let Some(row) = rows.get_mut(src_row) else {
                return layout.clone();
            };
            row.retain(|&mut c| c != card);
            let at = target_col.min(row.len());
            row.insert(at, card);
        }
        _ => {
            // Cross-row insertion. A full target row only accepts the card in
            // reorder mode (displacing neighbors); otherwise reject.
            let Some(target_len) = rows.get(target_row).map(Row::len) else {
                debug!("move_card: target row {target_row} does not exist, ignoring");
                return layout.clone();
            };
            if target_len >= cfg.max_cards_per_row && kind != MoveKind::Reorder {
                debug!("move_card: row {target_row} at capacity, move rejected");
                return layout.clone();
            }
            for row in &mut rows {
                row.retain(|&mut c| c != card);
            }
            let row = &mut rows[target_row];
            let at = target_col.min(row.len());
            row.insert(at, card);
            if row.len() > cfg.max_cards_per_row {
                // Bump the overflowing card to the head of the next row;
                // cleanup cascades any further overflow.
                let bumped = row.pop().unwrap();
                if target_row + 1 < rows.len() {
                    rows[target_row + 1].insert(0, bumped);
                } else {
                    rows.push(smallvec![bumped]);
                }
            }
        }
    }

    cleanup_layout(&layout_from_rows(&rows), cfg)
}

/// Append a card into trailing spare capacity or a fresh row.
/// No-op if the card is already placed.
pub fn add_card(layout: &Layout, card: CardId, cfg: GridConfig) -> Layout {
    if layout.contains(card) {
        return layout.clone();
    }
    let mut rows = rows_from_layout(layout);
    match rows.last_mut() {
        Some(last) if last.len() < cfg.max_cards_per_row => last.push(card),
        _ => rows.push(smallvec![card]),
    }
    cleanup_layout(&layout_from_rows(&rows), cfg)
}

/// Drop a card's placement; remaining rows compact.
/// No-op if the card is not placed.
pub fn remove_card(layout: &Layout, card: CardId, cfg: GridConfig) -> Layout {
    if !layout.contains(card) {
        return layout.clone();
    }
    let placements = layout
        .placements()
        .iter()
        .copied()
        .filter(|p| p.card != card)
        .collect();
    cleanup_layout(&Layout::from_placements(placements), cfg)
}

/// Shape validation for a restored layout: exactly the same card id set,
/// with no duplicate placements.
pub fn layout_matches_cards(layout: &Layout, cards: &[CardId]) -> bool {
    if layout.card_count() != cards.len() {
        return false;
    }
    let placed: HashSet<CardId> = layout.iter().map(|p| p.card).collect();
    if placed.len() != layout.card_count() {
        return false;
    }
    cards.iter().all(|c| placed.contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ids(names: &[&str]) -> Vec<CardId> {
        names.iter().map(|n| CardId::intern(n)).collect()
    }

    fn rows(names: &[&[&str]]) -> Vec<Row> {
        names
            .iter()
            .map(|r| r.iter().map(|n| CardId::intern(n)).collect())
            .collect()
    }

    fn two_by_two() -> Layout {
        init_layout(ids(&["A", "B", "C", "D"]), GridConfig::new(2))
    }

    #[test]
    fn init_fills_top_down() {
        let layout = two_by_two();
        assert_eq!(rows_from_layout(&layout), rows(&[&["A", "B"], &["C", "D"]]));
    }

    #[test]
    fn init_skips_duplicate_ids() {
        let layout = init_layout(ids(&["A", "A", "B"]), GridConfig::new(2));
        assert_eq!(rows_from_layout(&layout), rows(&[&["A", "B"]]));
    }

    #[test]
    fn cleanup_compacts_gaps() {
        let layout = Layout::from_placements(vec![
            Placement::new(CardId::intern("A"), 0, 1),
            Placement::new(CardId::intern("B"), 3, 0),
            Placement::new(CardId::intern("C"), 3, 5),
        ]);
        let cleaned = cleanup_layout(&layout, GridConfig::new(2));
        assert_eq!(rows_from_layout(&cleaned), rows(&[&["A"], &["B", "C"]]));
    }

    #[test]
    fn cleanup_is_idempotent() {
        let layout = Layout::from_placements(vec![
            Placement::new(CardId::intern("A"), 2, 3),
            Placement::new(CardId::intern("B"), 2, 0),
            Placement::new(CardId::intern("C"), 2, 1),
            Placement::new(CardId::intern("D"), 7, 0),
        ]);
        let once = cleanup_layout(&layout, GridConfig::new(2));
        let twice = cleanup_layout(&once, GridConfig::new(2));
        assert_eq!(once, twice);
    }

    #[test]
    fn cleanup_cascades_overflow() {
        // Row 0 holds three cards at capacity two; the tail spills into the
        // head of row 1, whose own tail spills again.
        let layout = Layout::from_placements(vec![
            Placement::new(CardId::intern("A"), 0, 0),
            Placement::new(CardId::intern("B"), 0, 1),
            Placement::new(CardId::intern("C"), 0, 2),
            Placement::new(CardId::intern("D"), 1, 0),
            Placement::new(CardId::intern("E"), 1, 1),
        ]);
        let cleaned = cleanup_layout(&layout, GridConfig::new(2));
        assert_eq!(
            rows_from_layout(&cleaned),
            rows(&[&["A", "B"], &["C", "D"], &["E"]])
        );
    }

    #[test]
    fn move_into_full_row_rejected() {
        let layout = two_by_two();
        let moved = move_card(
            &layout,
            CardId::intern("D"),
            0,
            0,
            MoveKind::Insert,
            GridConfig::new(2),
        );
        assert_eq!(moved, layout);
    }

    #[test]
    fn move_to_new_row_shifts_rows_down() {
        let layout = two_by_two();
        let moved = move_card(
            &layout,
            CardId::intern("D"),
            1,
            0,
            MoveKind::NewRow,
            GridConfig::new(2),
        );
        assert_eq!(
            rows_from_layout(&moved),
            rows(&[&["A", "B"], &["D"], &["C"]])
        );
    }

    #[test]
    fn reorder_within_full_row() {
        let layout = two_by_two();
        let moved = move_card(
            &layout,
            CardId::intern("B"),
            0,
            0,
            MoveKind::Reorder,
            GridConfig::new(2),
        );
        assert_eq!(rows_from_layout(&moved), rows(&[&["B", "A"], &["C", "D"]]));
    }

    #[test]
    fn reorder_to_own_column_is_noop() {
        let layout = two_by_two();
        let moved = move_card(
            &layout,
            CardId::intern("B"),
            0,
            1,
            MoveKind::Reorder,
            GridConfig::new(2),
        );
        assert_eq!(moved, layout);
    }

    #[test]
    fn cross_row_reorder_bumps_overflow() {
        // D forced into full row 0 at column 0: B overflows and lands at the
        // head of the next row.
        let layout = two_by_two();
        let moved = move_card(
            &layout,
            CardId::intern("D"),
            0,
            0,
            MoveKind::Reorder,
            GridConfig::new(2),
        );
        assert_eq!(rows_from_layout(&moved), rows(&[&["D", "A"], &["B", "C"]]));
    }

    #[test]
    fn cross_row_insert_with_capacity() {
        let layout = init_layout(ids(&["A", "B", "C"]), GridConfig::new(2));
        // Row 1 is [C]; insert A before it.
        let moved = move_card(
            &layout,
            CardId::intern("A"),
            1,
            0,
            MoveKind::Insert,
            GridConfig::new(2),
        );
        assert_eq!(rows_from_layout(&moved), rows(&[&["B"], &["A", "C"]]));
    }

    #[test]
    fn move_unknown_card_is_noop() {
        let layout = two_by_two();
        let moved = move_card(
            &layout,
            CardId::intern("nope"),
            0,
            0,
            MoveKind::NewRow,
            GridConfig::new(2),
        );
        assert_eq!(moved, layout);
    }

    #[test]
    fn fix_reflows_on_capacity_change() {
        let layout = two_by_two();
        let wide = fix_layout_for_max_cards(&layout, GridConfig::new(3));
        assert_eq!(rows_from_layout(&wide), rows(&[&["A", "B", "C"], &["D"]]));
    }

    #[test]
    fn remove_shrinks_row_without_reflow() {
        let layout = two_by_two();
        let removed = remove_card(&layout, CardId::intern("B"), GridConfig::new(2));
        assert_eq!(rows_from_layout(&removed), rows(&[&["A"], &["C", "D"]]));
    }

    #[test]
    fn add_uses_trailing_capacity_then_new_row() {
        let layout = init_layout(ids(&["A", "B", "C"]), GridConfig::new(2));
        let with_d = add_card(&layout, CardId::intern("D2"), GridConfig::new(2));
        assert_eq!(rows_from_layout(&with_d), rows(&[&["A", "B"], &["C", "D2"]]));
        let with_e = add_card(&with_d, CardId::intern("E2"), GridConfig::new(2));
        assert_eq!(
            rows_from_layout(&with_e),
            rows(&[&["A", "B"], &["C", "D2"], &["E2"]])
        );
    }

    #[test]
    fn shape_validation() {
        let layout = two_by_two();
        assert!(layout_matches_cards(&layout, &ids(&["D", "C", "B", "A"])));
        assert!(!layout_matches_cards(&layout, &ids(&["A", "B", "C"])));
        assert!(!layout_matches_cards(&layout, &ids(&["A", "B", "C", "E"])));
    }
}
