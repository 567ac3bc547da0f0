//! Command-line interface for strictly_concentration.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Concentration - flip cards, find pairs
#[derive(Parser, Debug)]
#[command(name = "strictly_concentration")]
#[command(about = "Memory-matching card game for the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML settings file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Shuffle seed, for replaying a board
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play with the keyboard
    Play {
        /// Cards per row
        #[arg(long)]
        columns: Option<u16>,
    },

    /// Watch the recall bot play round after round
    Watch {
        /// Bot delay before each flip, in milliseconds
        #[arg(long, default_value = "400")]
        think_ms: u64,
    },

    /// Play headless bot games and report move counts
    Simulate {
        /// Number of games
        #[arg(short, long, default_value = "100")]
        games: u64,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["strictly_concentration", "simulate", "--seed", "7", "--json"]);
        assert_eq!(cli.seed, Some(7));
        assert!(matches!(
            cli.command,
            Command::Simulate {
                games: 100,
                json: true
            }
        ));
    }

    #[test]
    fn test_play_columns() {
        let cli = Cli::parse_from(["strictly_concentration", "play", "--columns", "6"]);
        assert!(matches!(cli.command, Command::Play { columns: Some(6) }));
        assert!(cli.config.is_none());
    }
}
