//! Game configuration: which symbols to deal and how to seed the shuffle.

use crate::{Symbol, default_palette};
use derive_getters::Getters;
use derive_more::{Display, Error};
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Validated setup for a [`Session`](crate::Session).
///
/// The palette is non-empty and its symbols are distinct, so every deal
/// produces an even deck where each symbol forms exactly one pair.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct GameConfig {
    /// Distinct card faces; each is dealt twice.
    symbols: Vec<Symbol>,

    /// Shuffle seed. `None` draws a fresh seed from OS entropy.
    seed: Option<u64>,
}

impl GameConfig {
    /// Creates a configuration from a palette.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the palette is empty or contains the same
    /// symbol twice.
    #[instrument(skip(symbols), fields(pairs = symbols.len()))]
    pub fn new(symbols: Vec<Symbol>) -> Result<Self, ConfigError> {
        if symbols.is_empty() {
            return Err(ConfigError::new("Symbol palette is empty"));
        }

        let mut seen = HashSet::new();
        if let Some(dup) = symbols.iter().find(|s| !seen.insert(*s)) {
            return Err(ConfigError::new(format!(
                "Symbol {} appears more than once in the palette",
                dup
            )));
        }

        debug!("Game config validated");
        Ok(Self {
            symbols,
            seed: None,
        })
    }

    /// Fixes the shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Number of pairs dealt per round.
    pub fn pairs(&self) -> usize {
        self.symbols.len()
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            symbols: default_palette(),
            seed: None,
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.pairs(), 8);
        assert_eq!(*config.seed(), None);
    }

    #[test]
    fn test_empty_palette_rejected() {
        let err = GameConfig::new(vec![]).unwrap_err();
        assert!(err.message.contains("empty"));
        assert!(err.file.ends_with("config.rs"));
    }

    #[test]
    fn test_duplicate_symbol_rejected() {
        let palette = vec![Symbol::from("a"), Symbol::from("b"), Symbol::from("a")];
        let err = GameConfig::new(palette).unwrap_err();
        assert!(err.message.contains("more than once"));
    }

    #[test]
    fn test_with_seed() {
        let config = GameConfig::new(vec![Symbol::from("a")])
            .unwrap()
            .with_seed(Some(9));
        assert_eq!(*config.seed(), Some(9));
        assert_eq!(config.symbols().len(), 1);
    }
}
