//! Player trait and implementations.

mod human;
mod recall_bot;

pub use human::HumanPlayer;
pub use recall_bot::RecallBot;

use crate::orchestrator::Command;
use anyhow::Result;
use strictly_memory::BoardView;

/// Source of activations for the orchestrator.
///
/// `next_command` is raced against the game's timers and may be cancelled
/// and called again with a fresher view; implementations must not lose
/// input when that happens.
#[async_trait::async_trait]
pub trait Player: Send {
    /// Waits for this player's next command.
    async fn next_command(&mut self, view: &BoardView) -> Result<Command>;

    /// Returns the player's display name.
    fn name(&self) -> &str;
}
