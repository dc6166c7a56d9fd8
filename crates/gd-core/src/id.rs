//! Card identity.
//!
//! The host application names its cards with stable strings
//! (`"population_chart"`, `"jobs_table"`) and the persisted layout refers
//! to cards by those strings. Internally every id is interned once, so
//! layouts move 4-byte `Copy` handles around instead of `String`s.

use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Interned card identifier.
///
/// Equality and hashing are O(1) on the interner key. Two `CardId`s are
/// equal exactly when their source strings are equal, so the host can
/// re-intern the same name in any session and get the same identity.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardId(Spur);

impl CardId {
    pub fn intern(s: &str) -> Self {
        CardId(INTERNER.get_or_intern(s))
    }

    /// The host-supplied name this id was interned from.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }
}

// `#name` in debug output keeps drag traces readable next to raw indices.
impl fmt::Debug for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// On the wire a card id is a bare JSON string, nothing else.
impl Serialize for CardId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CardId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = Cow::<str>::deserialize(deserializer)?;
        Ok(CardId::intern(&s))
    }
}
