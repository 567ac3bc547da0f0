//! Deck generation: paired symbols, Fisher–Yates shuffle.

use crate::{Card, DeckRng, Position, Symbol};
use rand::Rng;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Doubles a symbol set so every symbol appears exactly twice.
///
/// Order is the input followed by the input again; shuffle before dealing.
/// An empty set yields an empty multiset.
#[instrument(skip_all, fields(symbols = symbols.len()))]
pub fn build_symbol_multiset(symbols: &[Symbol]) -> Vec<Symbol> {
    symbols.iter().chain(symbols.iter()).cloned().collect()
}

/// Shuffles a slice in place with the Fisher–Yates algorithm.
///
/// Walks from the last index down to 1, swapping each element with one drawn
/// uniformly from `[0, i]`. Given an unbiased source every permutation is
/// equally likely.
pub fn shuffle<T, R>(items: &mut [T], rng: &mut R)
where
    R: Rng + ?Sized,
{
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Error building a deck from an explicit layout.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum DeckError {
    /// The layout has no cards.
    #[display("Deck layout is empty")]
    Empty,

    /// The layout cannot be split into pairs.
    #[display("Deck layout has an odd number of cards ({})", _0)]
    OddLength(#[error(not(source))] usize),

    /// A symbol appears some number of times other than two.
    #[display("Symbol {} appears {} times, expected 2", symbol, count)]
    Unpaired {
        /// The offending symbol.
        symbol: Symbol,
        /// How many times it appears.
        count: usize,
    },
}

/// Ordered sequence of cards for one round.
///
/// Invariant: every symbol is carried by exactly two cards, and card `i`
/// sits at `Position(i)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Deals a freshly shuffled deck from a palette of distinct symbols.
    #[instrument(skip_all, fields(pairs = symbols.len(), seed = rng.seed()))]
    pub fn shuffled(symbols: &[Symbol], rng: &mut DeckRng) -> Self {
        let mut faces = build_symbol_multiset(symbols);
        shuffle(&mut faces, rng);
        debug!(cards = faces.len(), "Dealt shuffled deck");
        Self::deal(faces)
    }

    /// Builds a deck in exactly the given order.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError`] if the layout is empty, has odd length, or some
    /// symbol is not carried by exactly two cards.
    #[instrument(skip_all, fields(cards = layout.len()))]
    pub fn from_layout(layout: Vec<Symbol>) -> Result<Self, DeckError> {
        if layout.is_empty() {
            return Err(DeckError::Empty);
        }
        if layout.len() % 2 != 0 {
            return Err(DeckError::OddLength(layout.len()));
        }

        let mut counts: HashMap<&Symbol, usize> = HashMap::new();
        for symbol in &layout {
            *counts.entry(symbol).or_default() += 1;
        }
        if let Some((symbol, count)) = counts.into_iter().find(|(_, count)| *count != 2) {
            return Err(DeckError::Unpaired {
                symbol: symbol.clone(),
                count,
            });
        }

        Ok(Self::deal(layout))
    }

    fn deal(faces: Vec<Symbol>) -> Self {
        let cards = faces
            .into_iter()
            .enumerate()
            .map(|(index, symbol)| Card::new(symbol, Position::new(index)))
            .collect();
        Self { cards }
    }

    /// Number of cards.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// True for the degenerate empty deck.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of pairs.
    pub fn pairs(&self) -> usize {
        self.cards.len() / 2
    }

    /// All cards in board order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// The card at a position, if in range.
    pub fn card(&self, position: Position) -> Option<&Card> {
        self.cards.get(position.index())
    }

    pub(crate) fn card_mut(&mut self, position: Position) -> Option<&mut Card> {
        self.cards.get_mut(position.index())
    }

    /// Symbols in board order.
    pub fn layout(&self) -> Vec<Symbol> {
        self.cards.iter().map(|c| c.symbol().clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CardStatus;

    fn symbols(faces: &[&str]) -> Vec<Symbol> {
        faces.iter().copied().map(Symbol::from).collect()
    }

    #[test]
    fn test_multiset_doubles_each_symbol() {
        let multiset = build_symbol_multiset(&symbols(&["a", "b", "c"]));
        assert_eq!(multiset, symbols(&["a", "b", "c", "a", "b", "c"]));
    }

    #[test]
    fn test_multiset_of_nothing_is_empty() {
        assert!(build_symbol_multiset(&[]).is_empty());
    }

    #[test]
    fn test_shuffle_empty_and_single() {
        let mut rng = DeckRng::new(1);
        let mut empty: Vec<u8> = vec![];
        shuffle(&mut empty, &mut rng);
        assert!(empty.is_empty());

        let mut one = vec![9];
        shuffle(&mut one, &mut rng);
        assert_eq!(one, vec![9]);
    }

    #[test]
    fn test_shuffle_is_seeded() {
        let mut a: Vec<u32> = (0..16).collect();
        let mut b = a.clone();
        shuffle(&mut a, &mut DeckRng::new(42));
        shuffle(&mut b, &mut DeckRng::new(42));
        assert_eq!(a, b);
        assert_ne!(a, (0..16).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffled_deck_positions_and_status() {
        let deck = Deck::shuffled(&symbols(&["a", "b", "c", "d"]), &mut DeckRng::new(3));
        assert_eq!(deck.len(), 8);
        assert_eq!(deck.pairs(), 4);
        for (i, card) in deck.cards().iter().enumerate() {
            assert_eq!(card.position(), Position::new(i));
            assert_eq!(card.status(), CardStatus::FaceDown);
        }
    }

    #[test]
    fn test_shuffled_empty_palette_is_empty_deck() {
        let deck = Deck::shuffled(&[], &mut DeckRng::new(3));
        assert!(deck.is_empty());
    }

    #[test]
    fn test_from_layout_keeps_order() {
        let layout = symbols(&["x", "y", "y", "x"]);
        let deck = Deck::from_layout(layout.clone()).unwrap();
        assert_eq!(deck.layout(), layout);
        assert!(deck.card(Position::new(4)).is_none());
    }

    #[test]
    fn test_from_layout_rejects_bad_layouts() {
        assert_eq!(Deck::from_layout(vec![]), Err(DeckError::Empty));
        assert_eq!(
            Deck::from_layout(symbols(&["x", "x", "y"])),
            Err(DeckError::OddLength(3))
        );
        assert_eq!(
            Deck::from_layout(symbols(&["x", "x", "x", "x"])),
            Err(DeckError::Unpaired {
                symbol: Symbol::from("x"),
                count: 4
            })
        );
    }

    #[test]
    fn test_deck_error_is_a_plain_error() {
        let err: Box<dyn std::error::Error> = Box::new(DeckError::OddLength(3));
        assert_eq!(err.to_string(), "Deck layout has an odd number of cards (3)");
        assert!(err.source().is_none());
    }
}
