//! Human player fed by the keyboard.

use super::Player;
use crate::orchestrator::Command;
use anyhow::Result;
use strictly_memory::BoardView;
use tokio::sync::mpsc;

/// Human player using keyboard input.
///
/// The UI translates key presses into [`Command`]s and forwards them here.
pub struct HumanPlayer {
    name: String,
    input_rx: mpsc::UnboundedReceiver<Command>,
}

impl HumanPlayer {
    /// Creates a new human player.
    pub fn new(name: impl Into<String>, input_rx: mpsc::UnboundedReceiver<Command>) -> Self {
        Self {
            name: name.into(),
            input_rx,
        }
    }
}

#[async_trait::async_trait]
impl Player for HumanPlayer {
    async fn next_command(&mut self, _view: &BoardView) -> Result<Command> {
        match self.input_rx.recv().await {
            Some(command) => Ok(command),
            None => anyhow::bail!("Input channel closed"),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_memory::{Deck, Position, Session, Symbol};

    fn view() -> BoardView {
        let layout = vec![Symbol::from("a"), Symbol::from("a")];
        Session::with_deck(Deck::from_layout(layout).unwrap()).view()
    }

    #[tokio::test]
    async fn test_forwards_commands_in_order() {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut player = HumanPlayer::new("Human", rx);

        tx.send(Command::Activate(Position::new(1))).unwrap();
        tx.send(Command::Restart).unwrap();

        let view = view();
        assert_eq!(
            player.next_command(&view).await.unwrap(),
            Command::Activate(Position::new(1))
        );
        assert_eq!(player.next_command(&view).await.unwrap(), Command::Restart);
        assert_eq!(player.name(), "Human");
    }

    #[tokio::test]
    async fn test_closed_channel_is_an_error() {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut player = HumanPlayer::new("Human", rx);
        drop(tx);
        assert!(player.next_command(&view()).await.is_err());
    }
}
