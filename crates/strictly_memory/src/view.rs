//! Read-only snapshots for presentation layers.

use crate::{CardStatus, Generation, Position, Summary, Symbol};
use serde::{Deserialize, Serialize};

/// What a renderer may know about one card.
///
/// The symbol of a face-down card is withheld.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    /// Board position.
    pub position: Position,
    /// Current status.
    pub status: CardStatus,
    /// Face, present unless the card is face down.
    pub symbol: Option<Symbol>,
}

/// Snapshot of a session at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardView {
    /// Round this snapshot belongs to.
    pub generation: Generation,
    /// Cards in board order.
    pub cards: Vec<CardView>,
    /// Pair comparisons so far.
    pub moves: u32,
    /// Seconds on the clock.
    pub elapsed_seconds: u64,
    /// Whether a new activation would be considered.
    pub accepting_input: bool,
    /// Final tally once the round is won.
    pub won: Option<Summary>,
}

impl BoardView {
    /// Positions of cards that are still face down.
    pub fn face_down(&self) -> impl Iterator<Item = Position> + '_ {
        self.cards
            .iter()
            .filter(|c| c.status == CardStatus::FaceDown)
            .map(|c| c.position)
    }

    /// Cards currently face up and unmatched.
    pub fn face_up(&self) -> impl Iterator<Item = &CardView> + '_ {
        self.cards.iter().filter(|c| c.status == CardStatus::FaceUp)
    }

    /// Number of matched cards.
    pub fn matched(&self) -> usize {
        self.cards
            .iter()
            .filter(|c| c.status == CardStatus::Matched)
            .count()
    }
}
