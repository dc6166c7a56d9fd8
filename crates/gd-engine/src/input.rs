//! Input abstraction layer.
//!
//! Normalizes host pointer events into a unified `PointerEvent` enum
//! consumed by the drag controller. The host is responsible for two pieces
//! of context the engine cannot know: whether the pressed button is the
//! primary one, and whether the press landed on an interactive descendant
//! of a card (button, link, input, contenteditable) that must keep working.

use kurbo::Point;

/// A normalized pointer event in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer pressed.
    Down {
        pos: Point,
        /// `true` for the primary (left) button only.
        primary: bool,
        /// Press landed on an embedded interactive control; passed through.
        on_interactive: bool,
    },

    /// Pointer moved.
    Move { pos: Point },

    /// Pointer released.
    Up { pos: Point },

    /// The session can no longer complete: the pointer left the window or
    /// the window lost focus mid-drag. Treated as an implicit cancel.
    Cancel,
}

impl PointerEvent {
    /// A plain primary-button press on card content.
    pub fn down(x: f64, y: f64) -> Self {
        Self::Down {
            pos: Point::new(x, y),
            primary: true,
            on_interactive: false,
        }
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self::Move {
            pos: Point::new(x, y),
        }
    }

    pub fn up(x: f64, y: f64) -> Self {
        Self::Up {
            pos: Point::new(x, y),
        }
    }

    /// Extract position if this event carries one.
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::Down { pos, .. } | Self::Move { pos } | Self::Up { pos } => Some(*pos),
            Self::Cancel => None,
        }
    }
}
