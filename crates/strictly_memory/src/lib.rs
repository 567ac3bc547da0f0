//! Strictly Memory - pure concentration game logic
//!
//! A deck of paired symbols is shuffled face down. The player reveals two
//! cards at a time; equal symbols stay revealed, different symbols flip back
//! after a presentation delay. The round is won once every pair is matched.
//!
//! # Architecture
//!
//! - **Deck**: symbol multiset, Fisher–Yates shuffle, seeded RNG
//! - **Session**: the flip → compare → resolve state machine
//! - **View**: read-only snapshots for presentation layers
//!
//! This crate does no I/O and owns no timers. Callers schedule the mismatch
//! delay and the one-second clock and feed the results back in.
//!
//! # Example
//!
//! ```
//! use strictly_memory::{Activation, Deck, Position, Session, Symbol};
//!
//! let layout: Vec<Symbol> = ["a", "b", "a", "b"].into_iter().map(Symbol::from).collect();
//! let mut session = Session::with_deck(Deck::from_layout(layout).unwrap());
//!
//! session.activate(Position::new(0));
//! let outcome = session.activate(Position::new(2));
//! assert!(matches!(outcome, Activation::Matched { .. }));
//! assert_eq!(session.moves(), 1);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod card;
mod config;
mod deck;
mod rng;
mod session;
mod symbol;
mod view;

pub use card::{Card, CardStatus, Position};
pub use config::{ConfigError, GameConfig};
pub use deck::{Deck, DeckError, build_symbol_multiset, shuffle};
pub use rng::DeckRng;
pub use session::{
    Activation, Generation, Ignored, PendingResolution, Phase, Resolution, Session, Summary,
};
pub use symbol::{DEFAULT_SYMBOLS, Symbol, default_palette};
pub use view::{BoardView, CardView};
