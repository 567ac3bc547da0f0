//! Computer player with perfect recall.

use super::Player;
use crate::orchestrator::Command;
use anyhow::Result;
use std::collections::HashMap;
use strictly_memory::{BoardView, CardStatus, Generation, Position, Symbol};
use tokio::time::{Duration, Instant, sleep_until};
use tracing::{debug, instrument, trace};

/// Bot that remembers every face it has seen.
///
/// Plays a known pair whenever it can, otherwise turns over a card it has
/// never seen. Never wastes a move on a card it already knows is wrong.
pub struct RecallBot {
    name: String,
    think: Duration,
    restart_after: Option<Duration>,
    memory: HashMap<Position, Symbol>,
    generation: Option<Generation>,
    ready_at: Option<Instant>,
}

impl RecallBot {
    /// Creates a bot that waits `think` before every activation.
    pub fn new(name: impl Into<String>, think: Duration) -> Self {
        Self {
            name: name.into(),
            think,
            restart_after: None,
            memory: HashMap::new(),
            generation: None,
            ready_at: None,
        }
    }

    /// Deals a new round this long after winning, instead of quitting.
    #[must_use]
    pub fn with_restart_after(mut self, delay: Duration) -> Self {
        self.restart_after = Some(delay);
        self
    }

    /// Picks the next card to turn over, or `None` while input is locked.
    #[instrument(skip_all, fields(bot = %self.name, generation = %view.generation))]
    pub fn choose(&mut self, view: &BoardView) -> Option<Position> {
        self.observe(view);

        if !view.accepting_input || view.won.is_some() {
            return None;
        }

        let face_up: Vec<Position> = view.face_up().map(|c| c.position).collect();
        let choice = match face_up.as_slice() {
            [] => self.known_pair(view).or_else(|| self.unseen(view)),
            [first] => self.twin_of(*first, view).or_else(|| self.unseen(view)),
            _ => None,
        }
        .or_else(|| view.face_down().next());

        trace!(?choice, "Bot chose");
        choice
    }

    fn observe(&mut self, view: &BoardView) {
        if self.generation != Some(view.generation) {
            debug!(generation = %view.generation, "New round, forgetting the board");
            self.memory.clear();
            self.generation = Some(view.generation);
            self.ready_at = None;
        }

        for card in &view.cards {
            match (&card.status, &card.symbol) {
                (CardStatus::Matched, _) => {
                    self.memory.remove(&card.position);
                }
                (_, Some(symbol)) => {
                    self.memory.insert(card.position, symbol.clone());
                }
                _ => {}
            }
        }
    }

    fn is_face_down(view: &BoardView, position: Position) -> bool {
        view.cards
            .get(position.index())
            .is_some_and(|c| c.status == CardStatus::FaceDown)
    }

    fn known_pair(&self, view: &BoardView) -> Option<Position> {
        let mut seen: HashMap<&Symbol, Position> = HashMap::new();
        let mut known: Vec<(&Position, &Symbol)> = self.memory.iter().collect();
        known.sort();

        for (position, symbol) in known {
            if !Self::is_face_down(view, *position) {
                continue;
            }
            if let Some(first) = seen.insert(symbol, *position) {
                return Some(first);
            }
        }
        None
    }

    fn twin_of(&self, first: Position, view: &BoardView) -> Option<Position> {
        let symbol = self.memory.get(&first)?;
        let mut twins: Vec<Position> = self
            .memory
            .iter()
            .filter(|(position, s)| **position != first && *s == symbol)
            .map(|(position, _)| *position)
            .filter(|position| Self::is_face_down(view, *position))
            .collect();
        twins.sort();
        twins.first().copied()
    }

    fn unseen(&self, view: &BoardView) -> Option<Position> {
        view.face_down()
            .find(|position| !self.memory.contains_key(position))
    }

    async fn after_think(&mut self, command: Command) -> Command {
        let deadline = *self.ready_at.get_or_insert_with(|| Instant::now() + self.think);
        sleep_until(deadline).await;
        self.ready_at = None;
        command
    }
}

#[async_trait::async_trait]
impl Player for RecallBot {
    async fn next_command(&mut self, view: &BoardView) -> Result<Command> {
        if view.won.is_some() {
            self.observe(view);
            return match self.restart_after {
                Some(delay) => {
                    let deadline = *self.ready_at.get_or_insert_with(|| Instant::now() + delay);
                    sleep_until(deadline).await;
                    self.ready_at = None;
                    Ok(Command::Restart)
                }
                None => Ok(Command::Quit),
            };
        }

        match self.choose(view) {
            Some(position) => {
                debug!(bot = %self.name, %position, "Bot activating card");
                Ok(self.after_think(Command::Activate(position)).await)
            }
            // Wait for the orchestrator to hand over a fresher view.
            None => std::future::pending().await,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
