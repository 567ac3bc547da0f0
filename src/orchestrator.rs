//! Game orchestration: the single owner of the running session.
//!
//! The orchestrator pulls commands from a [`Player`], feeds them to the
//! [`Session`], publishes [`GameEvent`]s for the renderer, and schedules the
//! two timed continuations the game needs: the mismatch flip-back and the
//! one-second clock.

use crate::players::Player;
use crate::settings::Timing;
use anyhow::Result;
use strictly_memory::{
    Activation, BoardView, Generation, PendingResolution, Position, Resolution, Session, Summary,
    Symbol,
};
use tokio::sync::mpsc;
use tokio::time::{Duration, Instant, Interval, MissedTickBehavior, interval_at, sleep};
use tracing::{debug, info, instrument};

/// Input accepted by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Reveal the card at a position.
    Activate(Position),
    /// Abandon the round and deal a new one.
    Restart,
    /// Stop orchestrating.
    Quit,
}

/// Messages sent from orchestrator to UI.
#[derive(Debug, Clone)]
pub enum GameEvent {
    /// A fresh deck was dealt.
    RoundStarted {
        /// Round number.
        generation: Generation,
        /// Cards on the board.
        cards: usize,
        /// Shuffle seed, for replaying this board.
        seed: Option<u64>,
    },
    /// A card turned face up.
    CardRevealed {
        /// Card position.
        position: Position,
        /// Its face.
        symbol: Symbol,
    },
    /// Two face-up cards matched.
    PairMatched {
        /// Both positions.
        pair: [Position; 2],
        /// Shared face.
        symbol: Symbol,
    },
    /// Two face-up cards differ and will flip back.
    PairMismatched {
        /// Both positions.
        pair: [Position; 2],
    },
    /// A mismatched pair flipped back face down.
    PairHidden {
        /// Both positions.
        pair: [Position; 2],
    },
    /// The clock advanced.
    Tick {
        /// Seconds since the first activation.
        elapsed_seconds: u64,
    },
    /// Every pair is matched.
    Won(Summary),
    /// Full snapshot after any state change.
    Board(BoardView),
}

/// Elapsed-time clock, fully recreated on every start.
struct Clock {
    period: Duration,
    interval: Option<Interval>,
}

impl Clock {
    fn new(period: Duration) -> Self {
        Self {
            period,
            interval: None,
        }
    }

    fn start(&mut self) {
        let mut interval = interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
    }

    fn stop(&mut self) {
        self.interval = None;
    }

    async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending().await,
        }
    }
}

enum Step {
    Command(Result<Command>),
    Resolve(PendingResolution),
    Tick,
}

/// Orchestrates one player against the session.
pub struct Orchestrator {
    session: Session,
    player: Box<dyn Player>,
    event_tx: mpsc::UnboundedSender<GameEvent>,
    timing: Timing,
    resolution_tx: mpsc::UnboundedSender<PendingResolution>,
    resolution_rx: mpsc::UnboundedReceiver<PendingResolution>,
    clock: Clock,
}

impl Orchestrator {
    /// Creates a new orchestrator.
    pub fn new(
        session: Session,
        player: Box<dyn Player>,
        event_tx: mpsc::UnboundedSender<GameEvent>,
        timing: Timing,
    ) -> Self {
        let (resolution_tx, resolution_rx) = mpsc::unbounded_channel();
        Self {
            session,
            player,
            event_tx,
            timing,
            resolution_tx,
            resolution_rx,
            clock: Clock::new(timing.tick),
        }
    }

    /// The session being driven.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Consumes the orchestrator, returning the session in its final state.
    pub fn into_session(self) -> Session {
        self.session
    }

    /// Runs the game loop until the player quits.
    #[instrument(skip(self), fields(player = %self.player.name()))]
    pub async fn run(&mut self) -> Result<()> {
        info!("Starting game orchestration");
        self.announce_round()?;

        loop {
            let view = self.session.view();

            let step = tokio::select! {
                command = self.player.next_command(&view) => Step::Command(command),
                Some(pending) = self.resolution_rx.recv() => Step::Resolve(pending),
                _ = self.clock.tick() => Step::Tick,
            };

            match step {
                Step::Command(command) => match command? {
                    Command::Activate(position) => self.activate(position)?,
                    Command::Restart => self.restart()?,
                    Command::Quit => {
                        info!("Player quit");
                        return Ok(());
                    }
                },
                Step::Resolve(pending) => self.resolve(pending)?,
                Step::Tick => self.tick()?,
            }
        }
    }

    fn activate(&mut self, position: Position) -> Result<()> {
        let was_started = self.session.started();
        let outcome = self.session.activate(position);

        if !was_started && self.session.started() {
            debug!("First activation, starting clock");
            self.clock.start();
        }

        match outcome {
            Activation::Ignored(reason) => {
                debug!(%position, %reason, "Activation ignored");
                return Ok(());
            }
            Activation::Revealed { position, symbol } => {
                self.emit(GameEvent::CardRevealed { position, symbol })?;
            }
            Activation::Matched { pair, symbol, won } => {
                self.emit(GameEvent::CardRevealed {
                    position: pair[1],
                    symbol: symbol.clone(),
                })?;
                self.emit(GameEvent::PairMatched { pair, symbol })?;
                if let Some(summary) = won {
                    self.clock.stop();
                    info!(%summary, "Round complete");
                    self.emit(GameEvent::Won(summary))?;
                }
            }
            Activation::Mismatched(pending) => {
                let [_, second] = pending.pair();
                if let Some(card) = self.session.deck().card(second) {
                    self.emit(GameEvent::CardRevealed {
                        position: second,
                        symbol: card.symbol().clone(),
                    })?;
                }
                self.emit(GameEvent::PairMismatched {
                    pair: pending.pair(),
                })?;
                self.schedule_resolution(pending);
            }
        }

        self.publish_board()
    }

    fn schedule_resolution(&self, pending: PendingResolution) {
        let tx = self.resolution_tx.clone();
        let delay = self.timing.mismatch_delay;
        debug!(?delay, generation = %pending.generation(), "Scheduling flip back");
        tokio::spawn(async move {
            sleep(delay).await;
            let _ = tx.send(pending);
        });
    }

    fn resolve(&mut self, pending: PendingResolution) -> Result<()> {
        match self.session.resolve_mismatch(pending) {
            Resolution::Applied => {
                self.emit(GameEvent::PairHidden {
                    pair: pending.pair(),
                })?;
                self.publish_board()
            }
            Resolution::Stale => {
                debug!(token = %pending.generation(), "Dropped stale flip back");
                Ok(())
            }
        }
    }

    fn tick(&mut self) -> Result<()> {
        match self.session.tick() {
            Some(elapsed_seconds) => {
                self.emit(GameEvent::Tick { elapsed_seconds })?;
                self.publish_board()
            }
            None => {
                self.clock.stop();
                Ok(())
            }
        }
    }

    fn restart(&mut self) -> Result<()> {
        self.clock.stop();
        self.session.start_game();
        self.announce_round()
    }

    fn announce_round(&mut self) -> Result<()> {
        self.emit(GameEvent::RoundStarted {
            generation: self.session.generation(),
            cards: self.session.deck().len(),
            seed: self.session.seed(),
        })?;
        self.publish_board()
    }

    fn publish_board(&self) -> Result<()> {
        self.emit(GameEvent::Board(self.session.view()))
    }

    fn emit(&self, event: GameEvent) -> Result<()> {
        self.event_tx.send(event)?;
        Ok(())
    }
}
