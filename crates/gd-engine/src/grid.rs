//! The grid coordinator: the one component the surrounding application
//! talks to.
//!
//! `CardGrid` owns the authoritative layout, drives the drag controller
//! with fresh host geometry, applies the resulting effects, and fires the
//! layout-changed callback after every successful mutation (the host page
//! persists the snapshot to session storage).
//!
//! Error policy throughout: never panic, never error outward — malformed
//! input degrades to a no-op.

use crate::debounce::{Debouncer, RESIZE_DEBOUNCE_MS};
use crate::drag::{DragController, DragEffect};
use crate::input::PointerEvent;
use gd_core::{
    CardId, GridConfig, Layout, fix_layout_for_max_cards, init_layout, layout_matches_cards,
    rows_from_layout,
};
use gd_render::feedback::FeedbackState;
use gd_render::plan::{plan_slides, snapshot_positions};
use gd_render::{DropCandidate, GridHost};
use log::debug;

type LayoutCallback = Box<dyn FnMut(&Layout)>;

pub struct CardGrid<H: GridHost> {
    host: H,
    cards: Vec<CardId>,
    layout: Layout,
    cfg: GridConfig,
    drag: DragController,
    feedback: FeedbackState,
    resize: Debouncer,
    on_change: Option<LayoutCallback>,
    destroyed: bool,
}

impl<H: GridHost> CardGrid<H> {
    /// Build a grid over `host` for the given cards. A restored layout is
    /// trusted only if it covers exactly the same card ids, and is then
    /// conformed to the current row capacity; anything else falls back to a
    /// fresh top-down fill. Performs the initial render.
    pub fn new(host: H, cards: Vec<CardId>, restored: Option<Layout>, cfg: GridConfig) -> Self {
        let layout = match restored {
            Some(l) if layout_matches_cards(&l, &cards) => fix_layout_for_max_cards(&l, cfg),
            Some(_) => {
                debug!("restored layout does not match card set, reinitializing");
                init_layout(cards.iter().copied(), cfg)
            }
            None => init_layout(cards.iter().copied(), cfg),
        };

        let mut grid = Self {
            host,
            cards,
            layout,
            cfg,
            drag: DragController::new(),
            feedback: FeedbackState::new(),
            resize: Debouncer::new(RESIZE_DEBOUNCE_MS),
            on_change: None,
            destroyed: false,
        };
        grid.host.render(&rows_from_layout(&grid.layout));
        grid
    }

    /// Install the layout-changed callback. Fired after every successful
    /// mutation with the new snapshot.
    pub fn on_layout_change(&mut self, callback: impl FnMut(&Layout) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> GridConfig {
        self.cfg
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Current layout snapshot.
    pub fn get_layout(&self) -> Layout {
        self.layout.clone()
    }

    /// Replace the layout, conforming the input exactly as the constructor
    /// does. Mismatched card sets are discarded.
    pub fn set_layout(&mut self, layout: Layout) {
        if self.destroyed {
            return;
        }
        if !layout_matches_cards(&layout, &self.cards) {
            debug!("set_layout: card set mismatch, ignoring");
            return;
        }
        let conformed = fix_layout_for_max_cards(&layout, self.cfg);
        if conformed == self.layout {
            return;
        }
        self.layout = conformed;
        self.rerender();
        self.notify();
    }

    /// Feed one pointer event through the drag controller.
    pub fn handle_pointer(&mut self, event: &PointerEvent) {
        if self.destroyed {
            return;
        }
        let rows = self.host.measure();
        let effects = self.drag.handle(event, &rows, self.cfg);
        self.apply_effects(effects);
    }

    /// Register a new card. It lands in trailing spare capacity or a fresh
    /// row. No-op if the id is already present.
    pub fn add_card(&mut self, card: CardId) {
        if self.destroyed || self.cards.contains(&card) {
            return;
        }
        self.cards.push(card);
        self.layout = gd_core::add_card(&self.layout, card, self.cfg);
        self.rerender();
        self.notify();
    }

    /// Remove a card and compact its row. No-op for unknown ids.
    pub fn remove_card(&mut self, card: CardId) {
        if self.destroyed || !self.cards.contains(&card) {
            return;
        }
        self.cards.retain(|&c| c != card);
        self.layout = gd_core::remove_card(&self.layout, card, self.cfg);
        self.rerender();
        self.notify();
    }

    /// Change row capacity; re-flows every card top-to-bottom in current
    /// order. No-op when unchanged.
    pub fn update_max_cards_per_row(&mut self, max: usize) {
        if self.destroyed {
            return;
        }
        let cfg = GridConfig::new(max);
        if cfg == self.cfg {
            return;
        }
        self.cfg = cfg;
        self.layout = fix_layout_for_max_cards(&self.layout, cfg);
        self.rerender();
        self.notify();
    }

    /// Record a viewport resize; the re-render happens once the burst
    /// settles (see [`apply_resize`](Self::apply_resize)).
    pub fn notify_resize(&mut self, now_ms: f64) {
        if self.destroyed {
            return;
        }
        self.resize.note(now_ms);
    }

    /// Re-render (layout unchanged) if the resize burst has settled.
    /// Returns whether a render happened.
    pub fn apply_resize(&mut self, now_ms: f64) -> bool {
        if self.destroyed || !self.resize.fire(now_ms) {
            return false;
        }
        self.rerender();
        true
    }

    /// Tear down: abort any in-flight drag, clear feedback, empty the host.
    /// Idempotent; the grid ignores all further calls.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        let effects = self.drag.teardown();
        self.apply_effects(effects);
        self.feedback.force_clear(&mut self.host);
        self.host.clear();
        self.destroyed = true;
    }

    fn apply_effects(&mut self, effects: Vec<DragEffect>) {
        for effect in effects {
            match effect {
                DragEffect::BeginPreview { card, origin } => self.host.begin_preview(card, origin),
                DragEffect::MovePreview { to } => self.host.move_preview(to),
                DragEffect::EndPreview => self.host.end_preview(),
                DragEffect::SetHighlight(target) => self.feedback.apply(target, &mut self.host),
                DragEffect::Commit { card, candidate } => self.commit_move(card, candidate),
            }
        }
    }

    fn commit_move(&mut self, card: CardId, candidate: DropCandidate) {
        let next = gd_core::move_card(
            &self.layout,
            card,
            candidate.row,
            candidate.col,
            candidate.move_kind(),
            self.cfg,
        );
        let changed = next != self.layout;
        self.layout = next;
        self.rerender();
        if changed {
            self.notify();
        } else {
            debug!("commit left layout unchanged: {card:?} -> {candidate:?}");
        }
    }

    /// Re-render, sliding cells whose position changed materially — unless
    /// a drag is in progress, where intermediate animation would fight the
    /// pointer.
    fn rerender(&mut self) {
        let before = snapshot_positions(&self.host.measure());
        self.host.render(&rows_from_layout(&self.layout));
        if self.drag.is_active() {
            return;
        }
        let after = snapshot_positions(&self.host.measure());
        let slides = plan_slides(&before, &after);
        if !slides.is_empty() {
            self.host.animate_slides(&slides);
        }
    }

    fn notify(&mut self) {
        if let Some(callback) = &mut self.on_change {
            callback(&self.layout);
        }
    }
}

impl<H: GridHost> Drop for CardGrid<H> {
    fn drop(&mut self) {
        self.destroy();
    }
}
