//! Species definition table, validated once at load.

use super::unit::{CombatUnit, IndividualValues};
use crate::core::error::{GameError, Result};
use rand::Rng;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const BUNDLED_SPECIES: &str = include_str!("../../data/species.json");

/// The species a new trainer may start with, when present in the table.
pub const STARTERS: [&str; 3] = ["Bulbasaur", "Charmander", "Squirtle"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BaseStats {
    pub base_health: u32,
    pub base_attack: u32,
    pub base_defense: u32,
    pub base_speed: u32,
    pub base_experience: u32,
}

impl BaseStats {
    fn validate(&self, name: &str) -> Result<()> {
        let fields = [
            ("baseHealth", self.base_health),
            ("baseAttack", self.base_attack),
            ("baseDefense", self.base_defense),
            ("baseSpeed", self.base_speed),
            ("baseExperience", self.base_experience),
        ];
        for (field, value) in fields {
            if value == 0 {
                return Err(GameError::InvalidSpecies {
                    name: name.to_string(),
                    reason: format!("{} must be positive", field),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct SpeciesTable {
    species: BTreeMap<String, BaseStats>,
}

impl SpeciesTable {
    /// The table shipped with the game.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_SPECIES)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)?;
        let table = Self::from_json(&source)?;
        tracing::info!("Loaded {} species from {}", table.len(), path.display());
        Ok(table)
    }

    pub fn from_json(source: &str) -> Result<Self> {
        let species: BTreeMap<String, BaseStats> = serde_json::from_str(source)?;
        Self::from_entries(species)
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (String, BaseStats)>) -> Result<Self> {
        let mut species = BTreeMap::new();
        for (name, stats) in entries {
            if name.trim().is_empty() {
                return Err(GameError::InvalidSpecies {
                    name,
                    reason: "name must not be empty".into(),
                });
            }
            stats.validate(&name)?;
            species.insert(name, stats);
        }
        if species.is_empty() {
            return Err(GameError::EmptySpeciesTable);
        }
        Ok(Self { species })
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.species.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.species.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Result<&BaseStats> {
        self.species
            .get(name)
            .ok_or_else(|| GameError::UnknownSpecies(name.to_string()))
    }

    /// Builds a unit with freshly rolled IVs.
    pub fn create_unit(&self, name: &str, level: u32, rng: &mut impl Rng) -> Result<CombatUnit> {
        let base = *self.get(name)?;
        Ok(CombatUnit::new(name, base, level, IndividualValues::roll(rng)))
    }

    /// Builds a unit with fixed IVs, for reproducible matchups.
    pub fn create_unit_with_ivs(
        &self,
        name: &str,
        level: u32,
        ivs: IndividualValues,
    ) -> Result<CombatUnit> {
        let base = *self.get(name)?;
        Ok(CombatUnit::new(name, base, level, ivs))
    }

    pub fn random_species(&self, rng: &mut impl Rng) -> &str {
        let index = rng.gen_range(0..self.species.len());
        self.names().nth(index).unwrap_or_default()
    }

    /// Starter species present in this table, or every species if none are.
    pub fn starters(&self) -> Vec<&str> {
        let starters: Vec<&str> = STARTERS
            .iter()
            .copied()
            .filter(|name| self.contains(name))
            .collect();
        if starters.is_empty() {
            self.names().collect()
        } else {
            starters
        }
    }

    pub fn random_starter(&self, rng: &mut impl Rng) -> &str {
        let starters = self.starters();
        starters[rng.gen_range(0..starters.len())]
    }
}
