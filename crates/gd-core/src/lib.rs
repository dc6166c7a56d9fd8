pub mod id;
pub mod layout;
pub mod model;

pub use id::CardId;
pub use layout::{
    add_card, cleanup_layout, fix_layout_for_max_cards, init_layout, layout_matches_cards,
    move_card, remove_card, rows_from_layout,
};
pub use model::{GridConfig, Layout, MoveKind, Placement, Row};
