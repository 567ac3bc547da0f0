//! The flip → compare → resolve state machine.
//!
//! A [`Session`] owns exactly one round at a time. Every input is an
//! activation of a board position; invalid activations are defined no-ops,
//! never errors. A mismatch hands the caller a [`PendingResolution`] token
//! to redeem after the presentation delay. Tokens carry the round's
//! [`Generation`], so a token issued before [`Session::start_game`] cannot
//! touch the next round.

use crate::{
    BoardView, CardStatus, CardView, Deck, DeckRng, GameConfig, Position, Symbol,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};

/// Round counter. Advances on every [`Session::start_game`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct Generation(u64);

impl Generation {
    /// Returns the raw counter.
    pub const fn get(self) -> u64 {
        self.0
    }

    fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Final tally of a won round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[display("{} moves and {} seconds", moves, elapsed_seconds)]
pub struct Summary {
    /// Pair comparisons performed.
    pub moves: u32,
    /// Clock ticks since the first activation.
    pub elapsed_seconds: u64,
}

/// Round-level phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Pairs remain.
    Playing,
    /// Every card is matched. Terminal until the next `start_game`.
    Won(Summary),
}

/// Why an activation changed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Ignored {
    /// No card at that position.
    OutOfRange,
    /// A mismatch is waiting to be flipped back.
    InputLocked,
    /// The card is already showing.
    AlreadyFaceUp,
    /// The card is already paired.
    AlreadyMatched,
}

/// Token for flipping back a mismatched pair.
///
/// Redeem with [`Session::resolve_mismatch`] after the presentation delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingResolution {
    generation: Generation,
    pair: [Position; 2],
}

impl PendingResolution {
    /// Round the mismatch happened in.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// The two mismatched positions, in reveal order.
    pub fn pair(&self) -> [Position; 2] {
        self.pair
    }
}

/// Outcome of redeeming a [`PendingResolution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Both cards flipped back; input accepted again.
    Applied,
    /// The token belongs to a superseded round or pair; nothing changed.
    Stale,
}

/// Outcome of one activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// Nothing changed.
    Ignored(Ignored),
    /// First card of a pair turned face up.
    Revealed {
        /// The activated card.
        position: Position,
        /// Its face.
        symbol: Symbol,
    },
    /// Second card matched the first; both are now `Matched`.
    Matched {
        /// Both positions, in reveal order.
        pair: [Position; 2],
        /// The shared face.
        symbol: Symbol,
        /// Present when this pair completed the board.
        won: Option<Summary>,
    },
    /// Second card differed; input is locked until the token is redeemed.
    Mismatched(PendingResolution),
}

enum DeckSource {
    Shuffled { symbols: Vec<Symbol>, rng: DeckRng },
    Fixed(Deck),
}

impl DeckSource {
    fn deal(&mut self) -> Deck {
        match self {
            DeckSource::Shuffled { symbols, rng } => Deck::shuffled(symbols, rng),
            DeckSource::Fixed(deck) => deck.clone(),
        }
    }
}

/// One running game.
///
/// The session is the only mutator of round state. It owns no timers: the
/// caller drives [`tick`](Self::tick) once per second and redeems mismatch
/// tokens after its presentation delay.
pub struct Session {
    source: DeckSource,
    deck: Deck,
    face_up: Vec<Position>,
    moves: u32,
    elapsed_seconds: u64,
    matched: usize,
    started: bool,
    accepting_input: bool,
    phase: Phase,
    generation: Generation,
}

impl Session {
    /// Creates a session that shuffles the configured palette each round.
    #[instrument(skip(config), fields(pairs = config.pairs(), seed = ?config.seed()))]
    pub fn new(config: &GameConfig) -> Self {
        let rng = match config.seed() {
            Some(seed) => DeckRng::new(*seed),
            None => DeckRng::from_entropy(),
        };
        info!(seed = rng.seed(), "Creating session");
        Self::from_source(DeckSource::Shuffled {
            symbols: config.symbols().clone(),
            rng,
        })
    }

    /// Creates a session that deals the same layout every round.
    #[instrument(skip(deck), fields(cards = deck.len()))]
    pub fn with_deck(deck: Deck) -> Self {
        Self::from_source(DeckSource::Fixed(deck))
    }

    fn from_source(mut source: DeckSource) -> Self {
        let deck = source.deal();
        let mut session = Self {
            source,
            deck,
            face_up: Vec::with_capacity(2),
            moves: 0,
            elapsed_seconds: 0,
            matched: 0,
            started: false,
            accepting_input: true,
            phase: Phase::Playing,
            generation: Generation::default(),
        };
        session.reset();
        session
    }

    /// Deals a fresh deck and resets every counter.
    ///
    /// Callable at any time. Abandons the current round, and any
    /// [`PendingResolution`] issued before this call becomes stale.
    #[instrument(skip(self), fields(previous = %self.generation))]
    pub fn start_game(&mut self) {
        self.deck = self.source.deal();
        self.reset();
        info!(generation = %self.generation, cards = self.deck.len(), "Round started");
    }

    fn reset(&mut self) {
        self.face_up.clear();
        self.moves = 0;
        self.elapsed_seconds = 0;
        self.matched = 0;
        self.started = false;
        self.accepting_input = true;
        self.phase = Phase::Playing;
        self.generation = self.generation.next();
    }

    /// Handles a player activating the card at `position`.
    ///
    /// The first activation of a round starts the clock, even if the card
    /// itself cannot be flipped. Out-of-range positions change nothing.
    #[instrument(skip(self), fields(generation = %self.generation))]
    pub fn activate(&mut self, position: Position) -> Activation {
        let Some(card) = self.deck.card(position).cloned() else {
            debug!("Activation out of range");
            return Activation::Ignored(Ignored::OutOfRange);
        };

        if !self.started {
            self.started = true;
            debug!("Clock started");
        }

        if let Some(reason) = self.rejection(card.status()) {
            trace!(%reason, "Activation ignored");
            return Activation::Ignored(reason);
        }

        self.set_status(position, CardStatus::FaceUp);
        self.face_up.push(position);

        let [first, second] = match self.face_up.as_slice() {
            [first, second] => [*first, *second],
            _ => {
                let symbol = card.symbol().clone();
                debug!(%symbol, "Card revealed");
                return Activation::Revealed { position, symbol };
            }
        };

        self.moves += 1;
        self.accepting_input = false;

        let paired = self.deck.card(first).is_some_and(|f| f.pairs_with(&card));
        if paired {
            self.resolve_match([first, second], card.symbol().clone())
        } else {
            debug!(?first, ?second, moves = self.moves, "Mismatch, awaiting flip back");
            Activation::Mismatched(PendingResolution {
                generation: self.generation,
                pair: [first, second],
            })
        }
    }

    fn rejection(&self, status: CardStatus) -> Option<Ignored> {
        if !self.accepting_input {
            return Some(Ignored::InputLocked);
        }
        match status {
            CardStatus::FaceDown => None,
            CardStatus::FaceUp => Some(Ignored::AlreadyFaceUp),
            CardStatus::Matched => Some(Ignored::AlreadyMatched),
        }
    }

    fn resolve_match(&mut self, pair: [Position; 2], symbol: Symbol) -> Activation {
        for position in pair {
            self.set_status(position, CardStatus::Matched);
        }
        self.matched += 2;
        self.face_up.clear();
        self.accepting_input = true;

        debug!(%symbol, matched = self.matched, moves = self.moves, "Pair matched");

        let won = (self.matched == self.deck.len()).then(|| {
            let summary = Summary {
                moves: self.moves,
                elapsed_seconds: self.elapsed_seconds,
            };
            self.phase = Phase::Won(summary);
            info!(%summary, "Round won");
            summary
        });

        Activation::Matched { pair, symbol, won }
    }

    /// Flips a mismatched pair back face down.
    ///
    /// Tokens from an earlier round, or for a pair that is no longer face up,
    /// are [`Resolution::Stale`] and change nothing.
    #[instrument(skip(self), fields(generation = %self.generation))]
    pub fn resolve_mismatch(&mut self, pending: PendingResolution) -> Resolution {
        if pending.generation != self.generation || self.face_up.as_slice() != pending.pair {
            debug!(token = %pending.generation, "Discarding stale resolution");
            return Resolution::Stale;
        }

        for position in pending.pair {
            self.set_status(position, CardStatus::FaceDown);
        }
        self.face_up.clear();
        self.accepting_input = true;
        debug!("Mismatched pair flipped back");
        Resolution::Applied
    }

    /// Advances the clock by one second.
    ///
    /// Returns the new elapsed time, or `None` before the first activation
    /// and after the round is won.
    pub fn tick(&mut self) -> Option<u64> {
        if !self.started || self.is_won() {
            return None;
        }
        self.elapsed_seconds += 1;
        trace!(elapsed = self.elapsed_seconds, "Tick");
        Some(self.elapsed_seconds)
    }

    fn set_status(&mut self, position: Position, status: CardStatus) {
        if let Some(card) = self.deck.card_mut(position) {
            card.set_status(status);
        }
    }

    /// The current deck.
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Positions face up and unmatched, in reveal order.
    pub fn face_up(&self) -> &[Position] {
        &self.face_up
    }

    /// Pair comparisons this round.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Seconds ticked this round.
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    /// Cards matched this round.
    pub fn matched(&self) -> usize {
        self.matched
    }

    /// Whether the first activation has happened.
    pub fn started(&self) -> bool {
        self.started
    }

    /// Whether a new activation would be considered.
    pub fn accepting_input(&self) -> bool {
        self.accepting_input
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True once every card is matched.
    pub fn is_won(&self) -> bool {
        matches!(self.phase, Phase::Won(_))
    }

    /// Current round.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Shuffle seed, if this session shuffles.
    pub fn seed(&self) -> Option<u64> {
        match &self.source {
            DeckSource::Shuffled { rng, .. } => Some(rng.seed()),
            DeckSource::Fixed(_) => None,
        }
    }

    /// Snapshot for renderers. Face-down symbols are withheld.
    pub fn view(&self) -> BoardView {
        let cards = self
            .deck
            .cards()
            .iter()
            .map(|card| CardView {
                position: card.position(),
                status: card.status(),
                symbol: (card.status() != CardStatus::FaceDown).then(|| card.symbol().clone()),
            })
            .collect();

        BoardView {
            generation: self.generation,
            cards,
            moves: self.moves,
            elapsed_seconds: self.elapsed_seconds,
            accepting_input: self.accepting_input,
            won: match self.phase {
                Phase::Won(summary) => Some(summary),
                Phase::Playing => None,
            },
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("generation", &self.generation)
            .field("cards", &self.deck.len())
            .field("face_up", &self.face_up)
            .field("moves", &self.moves)
            .field("elapsed_seconds", &self.elapsed_seconds)
            .field("matched", &self.matched)
            .field("phase", &self.phase)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(faces: &[&str]) -> Deck {
        Deck::from_layout(faces.iter().copied().map(Symbol::from).collect()).unwrap()
    }

    fn pos(index: usize) -> Position {
        Position::new(index)
    }

    #[test]
    fn test_fresh_session_is_reset() {
        let session = Session::with_deck(layout(&["a", "b", "a", "b"]));
        assert_eq!(session.generation().get(), 1);
        assert!(session.accepting_input());
        assert!(!session.started());
        assert_eq!(session.phase(), Phase::Playing);
    }

    #[test]
    fn test_out_of_range_does_not_start_clock() {
        let mut session = Session::with_deck(layout(&["a", "a"]));
        assert_eq!(session.activate(pos(2)), Activation::Ignored(Ignored::OutOfRange));
        assert!(!session.started());
    }

    #[test]
    fn test_ignore_reasons() {
        let mut session = Session::with_deck(layout(&["a", "b", "a", "b", "c", "c"]));
        session.activate(pos(0));
        assert_eq!(session.activate(pos(0)), Activation::Ignored(Ignored::AlreadyFaceUp));

        session.activate(pos(2));
        assert_eq!(session.activate(pos(0)), Activation::Ignored(Ignored::AlreadyMatched));

        session.activate(pos(1));
        let Activation::Mismatched(_) = session.activate(pos(4)) else {
            panic!("expected mismatch");
        };
        assert_eq!(session.activate(pos(5)), Activation::Ignored(Ignored::InputLocked));
    }

    #[test]
    fn test_symbols_come_from_the_activated_cards() {
        let mut session = Session::with_deck(layout(&["a", "b", "b", "a"]));
        assert_eq!(
            session.activate(pos(3)),
            Activation::Revealed {
                position: pos(3),
                symbol: Symbol::from("a"),
            }
        );
        let Activation::Mismatched(pending) = session.activate(pos(2)) else {
            panic!("expected mismatch");
        };
        assert_eq!(pending.pair(), [pos(3), pos(2)]);
        session.resolve_mismatch(pending);

        session.activate(pos(2));
        let Activation::Matched { pair, symbol, won } = session.activate(pos(1)) else {
            panic!("expected match");
        };
        assert_eq!(pair, [pos(2), pos(1)]);
        assert_eq!(symbol, Symbol::from("b"));
        assert_eq!(won, None);
    }

    #[test]
    fn test_resolution_for_other_pair_is_stale() {
        let mut session = Session::with_deck(layout(&["a", "b", "a", "b"]));
        session.activate(pos(0));
        let Activation::Mismatched(pending) = session.activate(pos(1)) else {
            panic!("expected mismatch");
        };
        assert_eq!(session.resolve_mismatch(pending), Resolution::Applied);
        assert_eq!(session.resolve_mismatch(pending), Resolution::Stale);
    }

    #[test]
    fn test_view_hides_face_down_symbols() {
        let mut session = Session::with_deck(layout(&["a", "b", "a", "b"]));
        session.activate(pos(1));
        let view = session.view();
        assert_eq!(view.cards[0].symbol, None);
        assert_eq!(view.cards[1].symbol, Some(Symbol::from("b")));
        assert_eq!(view.face_down().count(), 3);
        assert_eq!(view.face_up().count(), 1);
    }

    #[test]
    fn test_seed_reported_for_shuffled_sessions() {
        let config = GameConfig::default().with_seed(Some(11));
        assert_eq!(Session::new(&config).seed(), Some(11));
        assert_eq!(Session::with_deck(layout(&["a", "a"])).seed(), None);
    }
}
