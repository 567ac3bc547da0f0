//! Application state and logic.

use super::confetti::Confetti;
use super::input::move_cursor;
use super::mode::PlayMode;
use crate::orchestrator::GameEvent;
use crate::settings::Timing;
use crossterm::event::KeyCode;
use std::time::Instant;
use strictly_memory::{BoardView, Position, Summary};
use tracing::debug;

/// Main application state.
pub struct App {
    mode: PlayMode,
    timing: Timing,
    columns: usize,
    board: Option<BoardView>,
    cursor: usize,
    status_message: String,
    dealt_at: Instant,
    won_at: Option<(Instant, Summary)>,
    confetti: Option<Confetti>,
    celebrated: bool,
    now: Instant,
}

impl App {
    /// Creates a new application.
    pub fn new(mode: PlayMode, timing: Timing, columns: u16, now: Instant) -> Self {
        Self {
            mode,
            timing,
            columns: usize::from(columns.max(1)),
            board: None,
            cursor: 0,
            status_message: "Shuffling...".to_string(),
            dealt_at: now,
            won_at: None,
            confetti: None,
            celebrated: false,
            now,
        }
    }

    /// Who is playing.
    pub fn mode(&self) -> PlayMode {
        self.mode
    }

    /// Latest board snapshot.
    pub fn board(&self) -> Option<&BoardView> {
        self.board.as_ref()
    }

    /// Cards per row.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Highlighted card.
    pub fn cursor(&self) -> Position {
        Position::new(self.cursor)
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Confetti, once the banner is up.
    pub fn confetti(&self) -> Option<&Confetti> {
        self.confetti.as_ref()
    }

    /// How many cards have been dealt onto the table so far.
    pub fn dealt(&self) -> usize {
        let cards = self.board.as_ref().map_or(0, |b| b.cards.len());
        let stagger = self.timing.deal_stagger.as_millis();
        if stagger == 0 {
            return cards;
        }
        let elapsed = self.now.saturating_duration_since(self.dealt_at).as_millis();
        usize::try_from(elapsed / stagger + 1).map_or(cards, |n| n.min(cards))
    }

    /// The win summary, once the banner delay has passed.
    pub fn banner(&self) -> Option<Summary> {
        let (at, summary) = self.won_at?;
        (self.now.saturating_duration_since(at) >= self.timing.win_banner_delay).then_some(summary)
    }

    /// Advances animations to `now`.
    pub fn on_frame(&mut self, now: Instant) {
        self.now = now;
        if self.banner().is_some() && !self.celebrated {
            self.confetti = Some(Confetti::burst(&mut rand::thread_rng(), now));
            self.celebrated = true;
        }
        if let Some(confetti) = self.confetti.as_mut() {
            confetti.update(now);
        }
        if self.confetti.as_ref().is_some_and(Confetti::is_finished) {
            debug!("Confetti landed");
            self.confetti = None;
        }
    }

    /// Moves the cursor with an arrow key.
    pub fn navigate(&mut self, key: KeyCode) {
        let len = self.board.as_ref().map_or(0, |b| b.cards.len());
        self.cursor = move_cursor(self.cursor, key, self.columns, len);
    }

    /// Handles a game event from the orchestrator.
    pub fn handle_event(&mut self, event: GameEvent) {
        debug!(?event, "Handling game event");

        match event {
            GameEvent::RoundStarted {
                generation,
                cards,
                seed,
            } => {
                self.cursor = 0;
                self.dealt_at = self.now;
                self.won_at = None;
                self.confetti = None;
                self.celebrated = false;
                self.status_message = match seed {
                    Some(seed) => format!("Round {} · {} cards · seed {}", generation, cards, seed),
                    None => format!("Round {} · {} cards", generation, cards),
                };
            }
            GameEvent::CardRevealed { position, symbol } => {
                self.status_message = format!(
                    "{} turned over card {}: {}",
                    self.mode.name(),
                    position.index() + 1,
                    symbol
                );
            }
            GameEvent::PairMatched { symbol, .. } => {
                self.status_message = format!("Match! {} {}", symbol, symbol);
            }
            GameEvent::PairMismatched { .. } => {
                self.status_message = "No match.".to_string();
            }
            GameEvent::PairHidden { .. } => {
                self.status_message = "Try again.".to_string();
            }
            GameEvent::Tick { .. } => {}
            GameEvent::Won(summary) => {
                self.won_at = Some((self.now, summary));
                self.status_message = format!("Cleared the board in {}!", summary);
            }
            GameEvent::Board(view) => {
                self.board = Some(view);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use strictly_memory::{Deck, Generation, Session, Symbol};

    fn view() -> BoardView {
        let layout = ["a", "b", "c", "a", "b", "c"].into_iter().map(Symbol::from).collect();
        Session::with_deck(Deck::from_layout(layout).unwrap()).view()
    }

    fn app(now: Instant) -> App {
        let mut app = App::new(PlayMode::Human, Timing::default(), 4, now);
        app.handle_event(GameEvent::Board(view()));
        app
    }

    #[test]
    fn test_deal_is_staggered() {
        let start = Instant::now();
        let mut app = app(start);
        assert_eq!(app.dealt(), 1);

        app.on_frame(start + Duration::from_millis(120));
        assert_eq!(app.dealt(), 3);

        app.on_frame(start + Duration::from_secs(5));
        assert_eq!(app.dealt(), 6);
    }

    #[test]
    fn test_banner_waits_for_delay() {
        let start = Instant::now();
        let mut app = app(start);
        let summary = Summary {
            moves: 3,
            elapsed_seconds: 9,
        };
        app.handle_event(GameEvent::Won(summary));
        assert_eq!(app.banner(), None);

        app.on_frame(start + Duration::from_millis(600));
        assert_eq!(app.banner(), Some(summary));
        assert!(app.confetti().is_some());
    }

    #[test]
    fn test_confetti_cleared_once_landed() {
        let start = Instant::now();
        let mut app = app(start);
        app.handle_event(GameEvent::Won(Summary {
            moves: 2,
            elapsed_seconds: 4,
        }));

        app.on_frame(start + Duration::from_millis(600));
        assert!(app.confetti().is_some());

        app.on_frame(start + Duration::from_secs(6));
        assert!(app.confetti().is_none());
        assert!(app.banner().is_some());

        app.on_frame(start + Duration::from_secs(7));
        assert!(app.confetti().is_none());
    }

    #[test]
    fn test_round_start_clears_win() {
        let start = Instant::now();
        let mut app = app(start);
        app.handle_event(GameEvent::Won(Summary {
            moves: 1,
            elapsed_seconds: 1,
        }));
        app.on_frame(start + Duration::from_secs(1));
        app.navigate(KeyCode::Right);

        app.handle_event(GameEvent::RoundStarted {
            generation: Generation::default(),
            cards: 6,
            seed: None,
        });
        assert_eq!(app.banner(), None);
        assert!(app.confetti().is_none());
        assert_eq!(app.cursor(), Position::new(0));
    }

    #[test]
    fn test_cursor_stays_on_board() {
        let mut app = app(Instant::now());
        for _ in 0..10 {
            app.navigate(KeyCode::Down);
        }
        assert_eq!(app.cursor(), Position::new(4));
    }
}
