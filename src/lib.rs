//! Strictly Concentration - the memory-matching card game in a terminal.
//!
//! The rules live in [`strictly_memory`]; this crate adds the timed parts of
//! the game and the surfaces that drive it.
//!
//! # Architecture
//!
//! - **Orchestrator**: owns the [`Session`], races player input against the
//!   mismatch delay and the clock, and publishes [`GameEvent`]s
//! - **Players**: keyboard-driven [`HumanPlayer`] and the perfect-recall [`RecallBot`]
//! - **TUI**: ratatui renderer with the dealing animation and win confetti
//! - **Simulate**: headless bot games for balance checks
//!
//! # Example
//!
//! ```no_run
//! use strictly_concentration::{PlayMode, Settings, run_tui};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let settings = Settings::default().with_seed(Some(42));
//! run_tui(settings, PlayMode::Watch).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod orchestrator;
mod players;
mod settings;
mod simulate;
mod tui;

// Crate-level exports - Orchestration
pub use orchestrator::{Command, GameEvent, Orchestrator};

// Crate-level exports - Players
pub use players::{HumanPlayer, Player, RecallBot};

// Crate-level exports - Configuration
pub use settings::{Settings, Timing};

// Crate-level exports - Headless play
pub use simulate::{GameReport, SimulationReport, simulate};

// Crate-level exports - Terminal UI
pub use tui::{PlayMode, run_tui, run_tui_with_think};

// Crate-level exports - Game rules
pub use strictly_memory::{
    Activation, BoardView, Card, CardStatus, CardView, ConfigError, Deck, DeckError, GameConfig,
    Generation, Phase, Position, Session, Summary, Symbol,
};
