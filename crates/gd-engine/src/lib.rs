pub mod debounce;
pub mod drag;
pub mod grid;
pub mod input;

pub use debounce::{Debouncer, RESIZE_DEBOUNCE_MS};
pub use drag::{DRAG_THRESHOLD, DragController, DragEffect};
pub use grid::CardGrid;
pub use input::PointerEvent;

// Re-export the crates the public surface is expressed in, so hosts don't
// need direct dependencies for the common path.
pub use gd_core::{CardId, GridConfig, Layout, Placement, Row};
pub use gd_render::{GridHost, RowGeometry};
