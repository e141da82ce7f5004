//! Runtime configuration from environment variables

use std::env;

use honey_match_core::GameConfig;

/// Whether cascade delays are slept through or skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pacing {
    /// Sleep for each step's minimum delay before running it
    Realtime,
    /// Run steps back to back
    #[default]
    Headless,
}

impl Pacing {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "realtime" => Some(Pacing::Realtime),
            "headless" => Some(Pacing::Headless),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Pacing::Realtime => "realtime",
            Pacing::Headless => "headless",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    /// Seed for a reproducible session; None draws from OS entropy
    pub seed: Option<u64>,
    pub pacing: Pacing,
    pub log_path: Option<String>,
    pub game: GameConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            seed: None,
            pacing: Pacing::default(),
            log_path: None,
            game: GameConfig::default(),
        }
    }
}

impl RuntimeConfig {
    /// Create from `HONEY_MATCH_*` environment variables
    ///
    /// Unparseable values fall back to their defaults.
    pub fn from_env() -> Self {
        let seed = env::var("HONEY_MATCH_SEED")
            .ok()
            .and_then(|s| s.trim().parse().ok());

        let mut game = GameConfig::default();
        if let Some(moves) = env::var("HONEY_MATCH_MOVES")
            .ok()
            .and_then(|s| s.trim().parse().ok())
        {
            game.initial_moves = moves;
        }

        let pacing = env::var("HONEY_MATCH_PACING")
            .ok()
            .and_then(|s| Pacing::from_str(&s))
            .unwrap_or_default();

        let log_path = env::var("HONEY_MATCH_LOG_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            seed,
            pacing,
            log_path,
            game,
        }
    }
}
