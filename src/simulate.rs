//! Headless games played by [`RecallBot`], for quick balance checks.

use crate::players::RecallBot;
use anyhow::{Context, Result};
use serde::Serialize;
use std::time::Duration;
use strictly_memory::{Activation, GameConfig, Session};
use tracing::{debug, info, instrument};

/// One simulated round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_new::new, derive_more::Display)]
#[display("Round {}: {} moves", round, moves)]
pub struct GameReport {
    /// 1-based round number.
    pub round: u64,
    /// Pair comparisons needed to clear the board.
    pub moves: u32,
}

/// Aggregate over all simulated rounds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    /// Seed of the first deal; later rounds continue the same RNG stream.
    pub seed: Option<u64>,
    /// Pairs on the board.
    pub pairs: usize,
    /// Per-round results.
    pub games: Vec<GameReport>,
    /// Fewest moves in any round.
    pub min_moves: u32,
    /// Most moves in any round.
    pub max_moves: u32,
    /// Average moves per round.
    pub mean_moves: f64,
}

impl std::fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Simulated {} games with {} pairs", self.games.len(), self.pairs)?;
        if let Some(seed) = self.seed {
            writeln!(f, "Seed: {}", seed)?;
        }
        write!(
            f,
            "Moves: min {} / mean {:.2} / max {}",
            self.min_moves, self.mean_moves, self.max_moves
        )
    }
}

/// Plays `games` rounds back to back and reports the move counts.
///
/// Mismatches are flipped back immediately and no clock runs, so only move
/// counts are meaningful.
#[instrument(skip(config), fields(pairs = config.pairs()))]
pub fn simulate(config: &GameConfig, games: u64) -> Result<SimulationReport> {
    anyhow::ensure!(games > 0, "At least one game must be simulated");

    let mut session = Session::new(config);
    let mut bot = RecallBot::new("RecallBot", Duration::ZERO);
    let pairs = session.deck().pairs();
    let seed = session.seed();

    let mut reports = Vec::with_capacity(games as usize);
    for round in 1..=games {
        if round > 1 {
            session.start_game();
        }
        let moves = play_round(&mut session, &mut bot)
            .with_context(|| format!("Round {} did not finish", round))?;
        let report = GameReport::new(round, moves);
        debug!(%report, "Round finished");
        reports.push(report);
    }

    let min_moves = reports.iter().map(|r| r.moves).min().unwrap_or_default();
    let max_moves = reports.iter().map(|r| r.moves).max().unwrap_or_default();
    let total: u64 = reports.iter().map(|r| u64::from(r.moves)).sum();
    let mean_moves = total as f64 / reports.len() as f64;

    info!(games, min_moves, max_moves, mean_moves, "Simulation complete");
    Ok(SimulationReport {
        seed,
        pairs,
        games: reports,
        min_moves,
        max_moves,
        mean_moves,
    })
}

fn play_round(session: &mut Session, bot: &mut RecallBot) -> Result<u32> {
    // A perfect-recall player never needs more than two reveals per card.
    let limit = session.deck().len() * 4 + 4;

    for _ in 0..limit {
        if let Some(summary) = session.view().won {
            return Ok(summary.moves);
        }
        let position = bot
            .choose(&session.view())
            .context("Bot had no card to choose")?;
        if let Activation::Mismatched(pending) = session.activate(position) {
            bot.choose(&session.view());
            session.resolve_mismatch(pending);
        }
    }

    anyhow::bail!("Gave up after {} activations", limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_memory::Symbol;

    #[test]
    fn test_single_pair_takes_one_move() {
        let config = GameConfig::new(vec![Symbol::from("x")])
            .unwrap()
            .with_seed(Some(1));
        let report = simulate(&config, 3).unwrap();
        assert_eq!(report.games.len(), 3);
        assert!(report.games.iter().all(|g| g.moves == 1));
        assert_eq!(report.mean_moves, 1.0);
    }

    #[test]
    fn test_default_board_is_cleared() {
        let config = GameConfig::default().with_seed(Some(99));
        let report = simulate(&config, 20).unwrap();

        assert_eq!(report.pairs, 8);
        assert_eq!(report.seed, Some(99));
        assert!(report.min_moves >= 8);
        assert!(report.max_moves <= 16);
        assert!(report.min_moves as f64 <= report.mean_moves);
    }

    #[test]
    fn test_same_seed_same_report() {
        let config = GameConfig::default().with_seed(Some(5));
        assert_eq!(simulate(&config, 5).unwrap(), simulate(&config, 5).unwrap());
    }

    #[test]
    fn test_zero_games_rejected() {
        assert!(simulate(&GameConfig::default(), 0).is_err());
    }

    #[test]
    fn test_report_serializes() {
        let config = GameConfig::default().with_seed(Some(3));
        let json = serde_json::to_value(simulate(&config, 2).unwrap()).unwrap();
        assert_eq!(json["pairs"], 8);
        assert_eq!(json["games"].as_array().map(Vec::len), Some(2));
    }
}
