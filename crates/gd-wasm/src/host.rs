//! DOM-backed grid host.
//!
//! Renders the layout as `.gd-row` / `.gd-cell` elements inside the
//! container, adopting the card elements registered by the page. All DOM
//! failures degrade to a skipped operation; the engine never sees them.

use std::collections::HashMap;

use gd_core::{CardId, Row};
use gd_render::{CardSlide, CellGeometry, FeedbackSink, GridHost, RowGeometry};
use kurbo::{Point, Rect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

const ROW_CLASS: &str = "gd-row";
const CELL_CLASS: &str = "gd-cell";
const ROW_TARGET_CLASS: &str = "gd-row-target";
const SEPARATOR_CLASS: &str = "gd-row-separator";
const PREVIEW_CLASS: &str = "gd-drag-preview";
const CARD_ATTR: &str = "data-card-id";

const SLIDE_DURATION_MS: f64 = 250.0;

pub struct DomHost {
    document: Document,
    container: Element,
    cards: HashMap<CardId, Element>,
    preview: Option<Element>,
    separator: Option<Element>,
}

impl DomHost {
    pub fn new(container: Element) -> Option<Self> {
        let document = container.owner_document()?;
        Some(Self {
            document,
            container,
            cards: HashMap::new(),
            preview: None,
            separator: None,
        })
    }

    /// Registers the element that should be adopted into `card`'s cell on
    /// the next render. Replaces any previous registration.
    pub fn register(&mut self, card: CardId, element: Element) {
        self.cards.insert(card, element);
    }

    pub fn unregister(&mut self, card: CardId) {
        self.cards.remove(&card);
    }

    fn row_elements(&self) -> Vec<Element> {
        let children = self.container.children();
        let mut rows = Vec::with_capacity(children.length() as usize);
        for i in 0..children.length() {
            if let Some(el) = children.item(i) {
                if el.class_list().contains(ROW_CLASS) {
                    rows.push(el);
                }
            }
        }
        rows
    }

    fn cell_for(&self, card: CardId) -> Option<Element> {
        let selector = format!("[{}=\"{}\"]", CARD_ATTR, card.as_str());
        self.container.query_selector(&selector).ok().flatten()
    }

    fn set_style(el: &Element, property: &str, value: &str) {
        if let Some(html) = el.dyn_ref::<HtmlElement>() {
            let _ = html.style().set_property(property, value);
        }
    }

    fn clear_style(el: &Element, property: &str) {
        if let Some(html) = el.dyn_ref::<HtmlElement>() {
            let _ = html.style().remove_property(property);
        }
    }

    fn bounds_of(el: &Element) -> Rect {
        let r = el.get_bounding_client_rect();
        Rect::new(r.x(), r.y(), r.x() + r.width(), r.y() + r.height())
    }
}

impl FeedbackSink for DomHost {
    fn highlight_row(&mut self, row: usize) {
        self.clear_highlights();
        if let Some(el) = self.row_elements().get(row) {
            let _ = el.class_list().add_1(ROW_TARGET_CLASS);
        }
    }

    fn show_separator(&mut self, boundary: usize) {
        self.clear_highlights();
        let Ok(sep) = self.document.create_element("div") else {
            return;
        };
        sep.set_class_name(SEPARATOR_CLASS);
        let rows = self.row_elements();
        let ok = match rows.get(boundary) {
            Some(before) => self.container.insert_before(&sep, Some(before.as_ref())).is_ok(),
            None => self.container.append_child(&sep).is_ok(),
        };
        if ok {
            self.separator = Some(sep);
        }
    }

    fn clear_highlights(&mut self) {
        for row in self.row_elements() {
            let _ = row.class_list().remove_1(ROW_TARGET_CLASS);
        }
        if let Some(sep) = self.separator.take() {
            sep.remove();
        }
    }

    fn begin_preview(&mut self, card: CardId, origin: Rect) {
        self.end_preview();
        let Some(cell) = self.cell_for(card) else {
            return;
        };
        let Ok(node) = cell.clone_node_with_deep(true) else {
            return;
        };
        let Ok(preview) = node.dyn_into::<Element>() else {
            return;
        };
        let _ = preview.class_list().add_1(PREVIEW_CLASS);
        Self::set_style(&preview, "position", "fixed");
        Self::set_style(&preview, "left", &format!("{}px", origin.x0));
        Self::set_style(&preview, "top", &format!("{}px", origin.y0));
        Self::set_style(&preview, "width", &format!("{}px", origin.width()));
        Self::set_style(&preview, "height", &format!("{}px", origin.height()));
        Self::set_style(&preview, "margin", "0");
        Self::set_style(&preview, "pointer-events", "none");
        Self::set_style(&preview, "z-index", "1000");
        // The original cell stays in the flow as the dimmed source.
        Self::set_style(&cell, "opacity", "0.4");
        if let Some(body) = self.document.body() {
            if body.append_child(&preview).is_ok() {
                self.preview = Some(preview);
            }
        }
    }

    fn move_preview(&mut self, to: Point) {
        if let Some(preview) = &self.preview {
            Self::set_style(preview, "left", &format!("{}px", to.x));
            Self::set_style(preview, "top", &format!("{}px", to.y));
        }
    }

    fn end_preview(&mut self) {
        if let Some(preview) = self.preview.take() {
            preview.remove();
        }
        for row in self.row_elements() {
            let cells = row.children();
            for i in 0..cells.length() {
                if let Some(cell) = cells.item(i) {
                    Self::clear_style(&cell, "opacity");
                }
            }
        }
    }

    fn animate_slides(&mut self, slides: &[CardSlide]) {
        // FLIP: offset each cell back to where it was, force a layout pass,
        // then let the transition carry it to its new place.
        let mut moved = Vec::with_capacity(slides.len());
        for slide in slides {
            let Some(cell) = self.cell_for(slide.card) else {
                continue;
            };
            let dx = slide.from.x - slide.to.x;
            let dy = slide.from.y - slide.to.y;
            Self::set_style(&cell, "transition", "none");
            Self::set_style(&cell, "transform", &format!("translate({dx}px, {dy}px)"));
            moved.push(cell);
        }
        for cell in &moved {
            let _ = cell.get_bounding_client_rect();
            Self::set_style(cell, "transition", &format!("transform {SLIDE_DURATION_MS}ms ease"));
            Self::set_style(cell, "transform", "none");
        }
        if moved.is_empty() {
            return;
        }
        if let Some(window) = self.document.default_view() {
            let cleanup = Closure::once_into_js(move || {
                for cell in &moved {
                    Self::clear_style(cell, "transition");
                    Self::clear_style(cell, "transform");
                }
            });
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                cleanup.unchecked_ref(),
                SLIDE_DURATION_MS as i32 + 50,
            );
        }
    }
}

impl GridHost for DomHost {
    fn render(&mut self, rows: &[Row]) {
        // The separator is wiped with the container; the preview floats on
        // <body> and must survive until end_preview.
        self.separator = None;
        self.container.set_inner_html("");
        for row in rows {
            let Ok(row_el) = self.document.create_element("div") else {
                continue;
            };
            row_el.set_class_name(ROW_CLASS);
            for &card in row.iter() {
                let Some(card_el) = self.cards.get(&card) else {
                    log::warn!("no element registered for card {}", card.as_str());
                    continue;
                };
                let Ok(cell) = self.document.create_element("div") else {
                    continue;
                };
                cell.set_class_name(CELL_CLASS);
                let _ = cell.set_attribute(CARD_ATTR, card.as_str());
                let _ = cell.append_child(card_el);
                let _ = row_el.append_child(&cell);
            }
            let _ = self.container.append_child(&row_el);
        }
    }

    fn measure(&self) -> Vec<RowGeometry> {
        self.row_elements()
            .iter()
            .map(|row_el| {
                let children = row_el.children();
                let mut cells = Vec::with_capacity(children.length() as usize);
                for i in 0..children.length() {
                    let Some(cell) = children.item(i) else {
                        continue;
                    };
                    let Some(id) = cell.get_attribute(CARD_ATTR) else {
                        continue;
                    };
                    cells.push(CellGeometry {
                        card: CardId::intern(&id),
                        bounds: Self::bounds_of(&cell),
                    });
                }
                RowGeometry {
                    bounds: Self::bounds_of(row_el),
                    cells,
                }
            })
            .collect()
    }

    fn clear(&mut self) {
        self.end_preview();
        self.separator = None;
        self.container.set_inner_html("");
    }
}
