//! User settings loaded from TOML, with command-line overrides.

use derive_getters::Getters;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use strictly_memory::{ConfigError, GameConfig, Symbol, default_palette};
use tracing::{debug, info, instrument};

/// Everything a player can tune. Every key is optional in the file.
///
/// ```toml
/// symbols = ["🍎", "🍌", "🍒", "🍇"]
/// columns = 4
/// mismatch_delay_ms = 1000
/// seed = 42
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
#[setters(prefix = "with_")]
pub struct Settings {
    /// Distinct card faces; each is dealt twice.
    symbols: Vec<Symbol>,

    /// Cards per row in the terminal grid.
    columns: u16,

    /// How long a mismatched pair stays face up.
    mismatch_delay_ms: u64,

    /// Clock resolution.
    tick_ms: u64,

    /// Pause between the final match and the win banner.
    win_banner_delay_ms: u64,

    /// Per-card delay of the dealing animation.
    deal_stagger_ms: u64,

    /// Fixed shuffle seed for reproducible boards.
    seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            symbols: default_palette(),
            columns: 4,
            mismatch_delay_ms: 1000,
            tick_ms: 1000,
            win_banner_delay_ms: 500,
            deal_stagger_ms: 50,
            seed: None,
        }
    }
}

impl Settings {
    /// Loads settings from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading settings from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let settings: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        settings.validate()?;
        info!(pairs = settings.symbols.len(), "Settings loaded successfully");
        Ok(settings)
    }

    /// Loads from `path` when given, otherwise returns the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Checks values the game cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns == 0 {
            return Err(ConfigError::new("columns must be at least 1"));
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::new("tick_ms must be at least 1"));
        }
        self.game_config().map(|_| ())
    }

    /// Builds the validated core configuration.
    pub fn game_config(&self) -> Result<GameConfig, ConfigError> {
        Ok(GameConfig::new(self.symbols.clone())?.with_seed(self.seed))
    }

    /// Delays used by the orchestrator and the renderer.
    pub fn timing(&self) -> Timing {
        Timing::new(
            Duration::from_millis(self.mismatch_delay_ms),
            Duration::from_millis(self.tick_ms),
            Duration::from_millis(self.win_banner_delay_ms),
            Duration::from_millis(self.deal_stagger_ms),
        )
    }
}

/// Presentation and clock delays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_new::new)]
pub struct Timing {
    /// How long a mismatched pair stays face up.
    pub mismatch_delay: Duration,
    /// Clock period.
    pub tick: Duration,
    /// Pause before the win banner.
    pub win_banner_delay: Duration,
    /// Per-card dealing delay.
    pub deal_stagger: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Settings::default().timing()
    }
}
