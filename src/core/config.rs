//! Game configuration.
//!
//! Loaded from a TOML file; every field has a default, so a missing file or a
//! partial file both work.

use super::constants::*;
use super::error::{GameError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "tallgrass.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Target frame length in milliseconds
    pub frame_ms: u64,

    /// Chance (0.0-1.0) that a step onto tall grass starts an encounter
    pub encounter_chance: f64,

    /// Species of the player's first party member (None = random starter)
    pub starting_species: Option<String>,

    /// Level of the player's first party member
    pub starting_level: u32,

    /// Inclusive level range for wild opponents
    pub opponent_level_min: u32,
    pub opponent_level_max: u32,

    /// Random seed for reproducible sessions (None = entropy)
    pub seed: Option<u64>,

    /// Species table overriding the bundled one
    pub species_file: Option<PathBuf>,

    /// Where the terminal frontend writes its log
    pub log_file: PathBuf,

    /// Log filter used when RUST_LOG is not set
    pub log_level: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            frame_ms: DEFAULT_FRAME_MS,
            encounter_chance: DEFAULT_ENCOUNTER_CHANCE,
            starting_species: None,
            starting_level: DEFAULT_STARTING_LEVEL,
            opponent_level_min: DEFAULT_OPPONENT_LEVEL_MIN,
            opponent_level_max: DEFAULT_OPPONENT_LEVEL_MAX,
            seed: None,
            species_file: None,
            log_file: PathBuf::from("tallgrass.log"),
            log_level: "info".to_string(),
        }
    }
}

impl GameConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml(source: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let source = fs::read_to_string(path)?;
        Self::from_toml(&source)
    }

    pub fn validate(&self) -> Result<()> {
        if self.frame_ms == 0 {
            return Err(GameError::InvalidConfig("frame_ms must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.encounter_chance) {
            return Err(GameError::InvalidConfig(format!(
                "encounter_chance must be within 0.0..=1.0, got {}",
                self.encounter_chance
            )));
        }
        for (name, level) in [
            ("starting_level", self.starting_level),
            ("opponent_level_min", self.opponent_level_min),
            ("opponent_level_max", self.opponent_level_max),
        ] {
            if level == 0 || level > MAX_LEVEL {
                return Err(GameError::InvalidConfig(format!(
                    "{} must be within 1..={}, got {}",
                    name, MAX_LEVEL, level
                )));
            }
        }
        if self.opponent_level_min > self.opponent_level_max {
            return Err(GameError::InvalidConfig(format!(
                "opponent_level_min ({}) exceeds opponent_level_max ({})",
                self.opponent_level_min, self.opponent_level_max
            )));
        }
        Ok(())
    }

    /// Frame length as seconds, the unit every scheduler duration uses.
    pub fn frame_seconds(&self) -> f64 {
        self.frame_ms as f64 / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.starting_level, 5);
        assert!((config.encounter_chance - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = GameConfig::from_toml("seed = 42\nstarting_species = \"Squirtle\"\n").unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.starting_species.as_deref(), Some("Squirtle"));
        assert_eq!(config.frame_ms, DEFAULT_FRAME_MS);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = GameConfig::from_toml("encounter_rate = 0.5\n").unwrap_err();
        assert!(matches!(err, GameError::Config(_)));
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        assert!(matches!(
            GameConfig::from_toml("encounter_chance = 1.5\n").unwrap_err(),
            GameError::InvalidConfig(_)
        ));
        assert!(matches!(
            GameConfig::from_toml("starting_level = 0\n").unwrap_err(),
            GameError::InvalidConfig(_)
        ));
        assert!(matches!(
            GameConfig::from_toml("opponent_level_min = 9\nopponent_level_max = 4\n").unwrap_err(),
            GameError::InvalidConfig(_)
        ));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = GameConfig::load(Path::new("definitely/not/here.toml")).unwrap();
        assert_eq!(config.frame_ms, DEFAULT_FRAME_MS);
    }

    #[test]
    fn test_frame_seconds() {
        let config = GameConfig {
            frame_ms: 250,
            ..Default::default()
        };
        assert!((config.frame_seconds() - 0.25).abs() < 1e-12);
    }
}
