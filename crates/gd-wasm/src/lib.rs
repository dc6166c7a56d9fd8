//! Browser bridge for the card grid.
//!
//! The page owns the DOM events and forwards them here; the controller
//! never installs listeners of its own. Typical wiring:
//!
//! ```js
//! const grid = new GridController(container, 2);
//! for (const el of cardElements) grid.add_card(el.dataset.id, el);
//! grid.set_layout_json(localStorage.getItem("layout") ?? "[]");
//! grid.set_on_layout_change((json) => localStorage.setItem("layout", json));
//! container.addEventListener("pointerdown", (e) => {
//!     grid.pointer_down(e.clientX, e.clientY, e.button === 0,
//!         GridController.is_interactive_target(e.target));
//! });
//! ```

mod host;

use gd_core::{CardId, GridConfig, Layout};
use gd_engine::{CardGrid, PointerEvent};
use kurbo::Point;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::host::DomHost;

const INTERACTIVE_SELECTOR: &str = "a, button, input, select, textarea, [contenteditable]";

#[wasm_bindgen]
pub struct GridController {
    grid: CardGrid<DomHost>,
}

#[wasm_bindgen]
impl GridController {
    /// Creates a grid over `container`, which must be attached to a
    /// document. Cards are registered afterwards with [`Self::add_card`].
    #[wasm_bindgen(constructor)]
    pub fn new(container: Element, max_cards_per_row: usize) -> Result<GridController, JsValue> {
        let host = DomHost::new(container)
            .ok_or_else(|| JsValue::from_str("container has no owner document"))?;
        let cfg = GridConfig::new(max_cards_per_row);
        Ok(Self {
            grid: CardGrid::new(host, Vec::new(), None, cfg),
        })
    }

    /// Registers `element` as the content of card `id` and appends the
    /// card at the end of the layout.
    pub fn add_card(&mut self, id: &str, element: Element) {
        let card = CardId::intern(id);
        self.grid.host_mut().register(card, element);
        self.grid.add_card(card);
    }

    pub fn remove_card(&mut self, id: &str) {
        let card = CardId::intern(id);
        self.grid.remove_card(card);
        self.grid.host_mut().unregister(card);
    }

    pub fn pointer_down(&mut self, x: f64, y: f64, primary: bool, on_interactive: bool) {
        self.grid.handle_pointer(&PointerEvent::Down {
            pos: Point::new(x, y),
            primary,
            on_interactive,
        });
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.grid.handle_pointer(&PointerEvent::moved(x, y));
    }

    pub fn pointer_up(&mut self, x: f64, y: f64) {
        self.grid.handle_pointer(&PointerEvent::up(x, y));
    }

    /// Aborts any in-flight drag; wire this to `pointercancel`, `blur`,
    /// and pointer-leaves-window.
    pub fn pointer_cancel(&mut self) {
        self.grid.handle_pointer(&PointerEvent::Cancel);
    }

    /// Current layout as a JSON array of `{id, row, col}` records.
    pub fn layout_json(&self) -> String {
        serde_json::to_string(&self.grid.get_layout()).unwrap_or_else(|_| "[]".into())
    }

    /// Restores a previously saved layout. Returns `false` if the JSON
    /// does not parse; a parseable layout that no longer matches the
    /// registered cards is accepted and silently re-derived.
    pub fn set_layout_json(&mut self, json: &str) -> bool {
        match serde_json::from_str::<Layout>(json) {
            Ok(layout) => {
                self.grid.set_layout(layout);
                true
            }
            Err(err) => {
                log::warn!("rejected saved layout: {err}");
                false
            }
        }
    }

    pub fn set_on_layout_change(&mut self, callback: js_sys::Function) {
        self.grid.on_layout_change(move |layout| {
            if let Ok(json) = serde_json::to_string(layout) {
                let _ = callback.call1(&JsValue::NULL, &JsValue::from_str(&json));
            }
        });
    }

    pub fn update_max_cards_per_row(&mut self, max: usize) {
        self.grid.update_max_cards_per_row(max);
    }

    /// Call on every window `resize`; rendering waits until the burst
    /// settles and the page calls [`Self::apply_resize`].
    pub fn notify_resize(&mut self, now_ms: f64) {
        self.grid.notify_resize(now_ms);
    }

    /// Re-renders if the debounce window has elapsed. Returns whether a
    /// render happened; if `false` and a resize is still pending, poll
    /// again on the next timer tick.
    pub fn apply_resize(&mut self, now_ms: f64) -> bool {
        self.grid.apply_resize(now_ms)
    }

    pub fn is_dragging(&self) -> bool {
        self.grid.is_dragging()
    }

    /// Whether a press on `target` should be left to the embedded
    /// control instead of starting a drag.
    pub fn is_interactive_target(target: &Element) -> bool {
        matches!(target.closest(INTERACTIVE_SELECTOR), Ok(Some(_)))
    }

    /// Empties the container and detaches all feedback. The controller
    /// is inert afterwards.
    pub fn destroy(&mut self) {
        self.grid.destroy();
    }
}
