//! Simulation configuration.

use crate::core::constants::{DEFAULT_STARTING_LEVEL, MAX_LEVEL};
use crate::core::error::{GameError, Result};

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of battles to simulate
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random). Run `i` uses `seed + i`.
    pub seed: Option<u64>,

    /// Species and level of the player's unit
    pub player: String,
    pub player_level: u32,

    /// Species and level of the wild opponent
    pub opponent: String,
    pub opponent_level: u32,

    /// Rounds before a battle is called off
    pub max_rounds: u32,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per battle)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1000,
            seed: None,
            player: "Squirtle".to_string(),
            player_level: DEFAULT_STARTING_LEVEL,
            opponent: "Pidgey".to_string(),
            opponent_level: DEFAULT_STARTING_LEVEL,
            max_rounds: 1000,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, level) in [
            ("player_level", self.player_level),
            ("opponent_level", self.opponent_level),
        ] {
            if level == 0 || level > MAX_LEVEL {
                return Err(GameError::InvalidConfig(format!(
                    "{} must be within 1..={}, got {}",
                    name, MAX_LEVEL, level
                )));
            }
        }
        if self.max_rounds == 0 {
            return Err(GameError::InvalidConfig("max_rounds must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn test_level_out_of_range_rejected() {
        let config = SimConfig {
            player_level: 2000,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(GameError::InvalidConfig(_))));

        let config = SimConfig {
            opponent_level: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(GameError::InvalidConfig(_))));
    }
}
