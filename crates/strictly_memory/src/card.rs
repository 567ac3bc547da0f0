//! Cards and board positions.

use crate::Symbol;
use serde::{Deserialize, Serialize};

/// Index of a card in the board sequence.
///
/// Card identity is by position: two cards with the same symbol are still
/// distinct cards.
#[derive(
    Debug,
    Clone,
    Copy,
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
pub struct Position(usize);

impl Position {
    /// Creates a position from a board index.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the board index.
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Lifecycle of a single card.
///
/// `FaceDown -> FaceUp -> Matched` or `FaceUp -> FaceDown` after a mismatch.
/// `Matched` is terminal for the round.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum CardStatus {
    /// Hidden, can be activated.
    #[default]
    FaceDown,
    /// Revealed but not yet paired.
    FaceUp,
    /// Paired; stays revealed until the round ends.
    Matched,
}

/// One card on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    symbol: Symbol,
    position: Position,
    status: CardStatus,
}

impl Card {
    /// Creates a face-down card.
    pub fn new(symbol: Symbol, position: Position) -> Self {
        Self {
            symbol,
            position,
            status: CardStatus::FaceDown,
        }
    }

    /// Returns the card's face.
    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Returns the card's board position.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns the card's current status.
    pub fn status(&self) -> CardStatus {
        self.status
    }

    /// Checks whether two cards form a pair.
    pub fn pairs_with(&self, other: &Card) -> bool {
        self.position != other.position && self.symbol == other.symbol
    }

    pub(crate) fn set_status(&mut self, status: CardStatus) {
        self.status = status;
    }
}
