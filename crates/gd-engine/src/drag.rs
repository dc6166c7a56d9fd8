//! The drag interaction state machine: Idle → Pressed → Dragging.
//!
//! The controller translates pointer events into [`DragEffect`] values for
//! the coordinator to apply; it never touches the host itself. A press only
//! becomes a drag once the pointer travels past a small threshold, so
//! ordinary clicks on card content reach the card untouched.

use crate::input::PointerEvent;
use gd_core::{CardId, GridConfig};
use gd_render::drop::DropCandidate;
use gd_render::feedback::Highlight;
use gd_render::geometry::{RowGeometry, hit_cell};
use gd_render::resolve_drop;
use kurbo::{Point, Rect, Vec2};
use log::debug;

/// Euclidean pointer displacement before a press becomes a drag.
pub const DRAG_THRESHOLD: f64 = 5.0;

/// Ephemeral per-drag state; exists only between pointer-down and teardown.
#[derive(Debug, Clone, Copy)]
struct DragSession {
    card: CardId,
    /// The originating cell's on-screen bounds at press time.
    origin: Rect,
    /// Pointer position at press time.
    press: Point,
    /// Pointer offset into the cell, so the preview stays under the grab.
    grab: Vec2,
}

#[derive(Debug, Clone, Copy)]
enum DragPhase {
    Idle,
    Pressed(DragSession),
    Dragging(DragSession),
}

/// Host effects requested by the state machine, applied by the coordinator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEffect {
    BeginPreview { card: CardId, origin: Rect },
    MovePreview { to: Point },
    EndPreview,
    SetHighlight(Highlight),
    Commit { card: CardId, candidate: DropCandidate },
}

pub struct DragController {
    phase: DragPhase,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new()
    }
}

impl DragController {
    pub fn new() -> Self {
        Self {
            phase: DragPhase::Idle,
        }
    }

    /// A session exists (pressed or dragging).
    pub fn is_active(&self) -> bool {
        !matches!(self.phase, DragPhase::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging(_))
    }

    /// Feed one pointer event, with fresh geometry, and collect effects.
    pub fn handle(
        &mut self,
        event: &PointerEvent,
        rows: &[RowGeometry],
        cfg: GridConfig,
    ) -> Vec<DragEffect> {
        match *event {
            PointerEvent::Down {
                pos,
                primary,
                on_interactive,
            } => {
                if self.is_active() {
                    // One drag session at a time; a second press is ignored.
                    return Vec::new();
                }
                if !primary || on_interactive {
                    return Vec::new();
                }
                let Some(cell) = hit_cell(rows, pos) else {
                    return Vec::new();
                };
                self.phase = DragPhase::Pressed(DragSession {
                    card: cell.card,
                    origin: cell.bounds,
                    press: pos,
                    grab: pos - cell.bounds.origin(),
                });
                Vec::new()
            }

            PointerEvent::Move { pos } => match self.phase {
                DragPhase::Idle => Vec::new(),
                DragPhase::Pressed(session) => {
                    if (pos - session.press).hypot() <= DRAG_THRESHOLD {
                        return Vec::new();
                    }
                    debug!("drag start: {:?}", session.card);
                    self.phase = DragPhase::Dragging(session);
                    let mut effects = vec![
                        DragEffect::BeginPreview {
                            card: session.card,
                            origin: session.origin,
                        },
                        DragEffect::MovePreview {
                            to: pos - session.grab,
                        },
                    ];
                    effects.push(self.hover_highlight(pos, rows, session.card, cfg));
                    effects
                }
                DragPhase::Dragging(session) => {
                    vec![
                        DragEffect::MovePreview {
                            to: pos - session.grab,
                        },
                        self.hover_highlight(pos, rows, session.card, cfg),
                    ]
                }
            },

            PointerEvent::Up { pos } => match self.phase {
                DragPhase::Idle => Vec::new(),
                DragPhase::Pressed(_) => {
                    // Threshold never exceeded: a plain click, no layout change.
                    self.phase = DragPhase::Idle;
                    Vec::new()
                }
                DragPhase::Dragging(session) => {
                    self.phase = DragPhase::Idle;
                    let mut effects = Vec::new();
                    match resolve_drop(pos, rows, session.card, cfg) {
                        Some(candidate) if candidate.is_valid(rows, session.card, cfg) => {
                            effects.push(DragEffect::Commit {
                                card: session.card,
                                candidate,
                            });
                        }
                        candidate => {
                            debug!("drop rejected: {candidate:?}");
                        }
                    }
                    effects.push(DragEffect::EndPreview);
                    effects.push(DragEffect::SetHighlight(Highlight::None));
                    effects
                }
            },

            PointerEvent::Cancel => self.teardown(),
        }
    }

    /// Abort any in-flight session without committing. Used for window
    /// blur, pointer-leave, and `destroy()`.
    pub fn teardown(&mut self) -> Vec<DragEffect> {
        let was_dragging = self.is_dragging();
        self.phase = DragPhase::Idle;
        if was_dragging {
            vec![
                DragEffect::EndPreview,
                DragEffect::SetHighlight(Highlight::None),
            ]
        } else {
            Vec::new()
        }
    }

    fn hover_highlight(
        &self,
        pos: Point,
        rows: &[RowGeometry],
        card: CardId,
        cfg: GridConfig,
    ) -> DragEffect {
        let candidate = resolve_drop(pos, rows, card, cfg);
        DragEffect::SetHighlight(Highlight::for_candidate(candidate))
    }
}
