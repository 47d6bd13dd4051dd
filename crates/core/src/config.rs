//! Match configuration
//!
//! Values come from `TICTACTOE_*` environment variables; anything missing or
//! unparsable falls back to the default.

use std::env;

use serde::{Deserialize, Serialize};

use crate::types::{Player, COMPUTER_THINK_MS, DEFAULT_TOTAL_LIVES};

/// Who opens the first round of a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirstPlayer {
    #[default]
    PlayerOne,
    PlayerTwo,
    /// Drawn from the match RNG at every `StartGame`
    Random,
}

impl FirstPlayer {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "one" | "1" | "player_one" => Some(FirstPlayer::PlayerOne),
            "two" | "2" | "player_two" => Some(FirstPlayer::PlayerTwo),
            "random" => Some(FirstPlayer::Random),
            _ => None,
        }
    }

    /// The fixed seat, or None for [`FirstPlayer::Random`]
    pub fn fixed(self) -> Option<Player> {
        match self {
            FirstPlayer::PlayerOne => Some(Player::One),
            FirstPlayer::PlayerTwo => Some(Player::Two),
            FirstPlayer::Random => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Rounds per series
    pub total_lives: u32,
    /// Minimum thinking time before the computer commits
    pub computer_delay_ms: u32,
    pub first_player: FirstPlayer,
    /// RNG seed; None lets the caller pick one (the binary uses the clock)
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            total_lives: DEFAULT_TOTAL_LIVES,
            computer_delay_ms: COMPUTER_THINK_MS,
            first_player: FirstPlayer::PlayerOne,
            seed: None,
        }
    }
}

impl MatchConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create from any key lookup (tests pass a map instead of the process env)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        // Zero lives would end a series before it starts.
        let total_lives = lookup("TICTACTOE_LIVES")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&n: &u32| n > 0)
            .unwrap_or(defaults.total_lives);

        let computer_delay_ms = lookup("TICTACTOE_THINK_MS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.computer_delay_ms);

        let first_player = lookup("TICTACTOE_FIRST_PLAYER")
            .and_then(|s| FirstPlayer::from_str(&s))
            .unwrap_or(defaults.first_player);

        let seed = lookup("TICTACTOE_SEED").and_then(|s| s.trim().parse().ok());

        Self {
            total_lives,
            computer_delay_ms,
            first_player,
            seed,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
