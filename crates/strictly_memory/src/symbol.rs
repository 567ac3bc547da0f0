//! Card faces.

use serde::{Deserialize, Serialize};

/// The built-in palette: eight pairs, sixteen cards.
pub const DEFAULT_SYMBOLS: [&str; 8] = ["🚀", "🌟", "🎮", "🎯", "🎨", "🎭", "🎪", "🎢"];

/// One kind of card face.
///
/// Symbols are opaque to the game: two cards match when their symbols
/// compare equal, nothing else is inspected.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Creates a symbol from any string-like value.
    pub fn new(face: impl Into<String>) -> Self {
        Self(face.into())
    }
}

impl From<&str> for Symbol {
    fn from(face: &str) -> Self {
        Self(face.to_string())
    }
}

/// Returns [`DEFAULT_SYMBOLS`] as owned symbols.
pub fn default_palette() -> Vec<Symbol> {
    DEFAULT_SYMBOLS.iter().copied().map(Symbol::from).collect()
}
