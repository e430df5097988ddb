use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    card::{MAX_RANK, MIN_RANK},
    error::GameError,
};

/// Match parameters. Missing fields in a config file fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub hand_size: usize,
    /// Lowest rank in the deck; 6 gives the classic 36 card deck.
    pub base_rank: u8,
    pub min_players: usize,
    /// Attack/defense exchanges per round.
    pub max_exchanges: usize,
    pub refill_hands: bool,
    /// A phase that waits longer than this counts as a pass.
    pub turn_timeout_ms: Option<u64>,
}

impl GameConfig {
    pub fn turn_timeout(&self) -> Option<Duration> {
        self.turn_timeout_ms.map(Duration::from_millis)
    }

    /// Rejects parameters that would deal unprintable cards or end the
    /// match before it starts.
    pub fn validate(&self) -> Result<(), GameError> {
        if !(MIN_RANK..=MAX_RANK).contains(&self.base_rank) {
            return Err(GameError::InvalidConfig(format!(
                "base_rank must be between {MIN_RANK} and {MAX_RANK}, got {}",
                self.base_rank
            )));
        }
        if self.hand_size == 0 {
            return Err(GameError::InvalidConfig("hand_size must be at least 1".to_string()));
        }
        if self.min_players < 2 {
            return Err(GameError::InvalidConfig(format!(
                "min_players must be at least 2, got {}",
                self.min_players
            )));
        }
        if self.max_exchanges == 0 {
            return Err(GameError::InvalidConfig(
                "max_exchanges must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            hand_size: 6,
            base_rank: 6,
            min_players: 2,
            max_exchanges: 6,
            refill_hands: true,
            turn_timeout_ms: None,
        }
    }
}
