//! Visual feedback bookkeeping.
//!
//! The actual DOM effects (classes, placeholder rows, the floating preview)
//! live behind [`FeedbackSink`]; [`FeedbackState`] tracks what is currently
//! shown so consecutive identical targets cost nothing and highlighting
//! stays exclusive.

use crate::drop::DropCandidate;
use crate::plan::CardSlide;
use gd_core::CardId;
use kurbo::{Point, Rect};

/// Host-side effect surface for drag feedback.
///
/// Contracts: `highlight_row` and `show_separator` are exclusive (the host
/// clears any other marker before applying); `clear_highlights` is
/// idempotent; `end_preview` must remove the floating element even if the
/// drag is torn down mid-flight.
pub trait FeedbackSink {
    /// Mark row `row` as the current drop target.
    fn highlight_row(&mut self, row: usize);
    /// Show the new-row placeholder at boundary index `boundary`
    /// (0 = before the first row, `rows` = after the last).
    fn show_separator(&mut self, boundary: usize);
    /// Remove every highlight marker and any placeholder row.
    fn clear_highlights(&mut self);

    /// Create the floating preview: a clone of the dragged cell, fixed
    /// position, starting over its origin bounds.
    fn begin_preview(&mut self, card: CardId, origin: Rect);
    /// Reposition the preview's top-left corner.
    fn move_preview(&mut self, to: Point);
    /// Remove the preview element.
    fn end_preview(&mut self);

    /// Slide cells from their previous to their new positions.
    fn animate_slides(&mut self, slides: &[CardSlide]);
}

/// What is currently highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Highlight {
    #[default]
    None,
    Row(usize),
    Separator(usize),
}

impl Highlight {
    /// The highlight a drop candidate calls for: row-creating candidates
    /// show the separator placeholder at their boundary, everything else
    /// highlights the target row.
    pub fn for_candidate(candidate: Option<DropCandidate>) -> Self {
        match candidate {
            None => Highlight::None,
            Some(c) if c.creates_row() => Highlight::Separator(c.row),
            Some(c) => Highlight::Row(c.row),
        }
    }
}

/// Tracks the currently shown highlight and forwards only changes.
#[derive(Debug, Default)]
pub struct FeedbackState {
    current: Highlight,
}

impl FeedbackState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Highlight {
        self.current
    }

    /// Apply a highlight target, skipping the sink when nothing changed.
    pub fn apply(&mut self, target: Highlight, sink: &mut dyn FeedbackSink) {
        if self.current == target {
            return;
        }
        match target {
            Highlight::None => sink.clear_highlights(),
            Highlight::Row(row) => sink.highlight_row(row),
            Highlight::Separator(boundary) => sink.show_separator(boundary),
        }
        self.current = target;
    }

    /// Unconditional clear, for teardown paths.
    pub fn force_clear(&mut self, sink: &mut dyn FeedbackSink) {
        sink.clear_highlights();
        self.current = Highlight::None;
    }
}
