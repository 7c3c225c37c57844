//! A single combatant: derived stats, health, experience and leveling.

use super::species::BaseStats;
use crate::core::constants::*;
use rand::Rng;

/// Per-instance stat bias, rolled once when the unit is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndividualValues {
    pub health: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
}

impl IndividualValues {
    pub fn roll(rng: &mut impl Rng) -> Self {
        Self {
            health: rng.gen_range(0..=IV_MAX),
            attack: rng.gen_range(0..=IV_MAX),
            defense: rng.gen_range(0..=IV_MAX),
            speed: rng.gen_range(0..=IV_MAX),
        }
    }

    /// Same value for every stat, clamped to the valid range.
    pub fn uniform(value: u32) -> Self {
        let value = value.min(IV_MAX);
        Self {
            health: value,
            attack: value,
            defense: value,
            speed: value,
        }
    }
}

/// Snapshot of the derived stats, used to show before/after on level-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub health: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
}

/// Which side of the battlefield a unit is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stance {
    /// Opponent, seen from the front
    Front,
    /// The player's unit, seen from behind
    Back,
}

impl Stance {
    pub fn start(self) -> (f64, f64) {
        match self {
            Stance::Front => FRONT_START,
            Stance::Back => BACK_START,
        }
    }

    pub fn rest(self) -> (f64, f64) {
        match self {
            Stance::Front => FRONT_REST,
            Stance::Back => BACK_REST,
        }
    }

    pub fn attack(self) -> (f64, f64) {
        match self {
            Stance::Front => FRONT_ATTACK,
            Stance::Back => BACK_ATTACK,
        }
    }
}

pub fn derived_health(base: u32, iv: u32, level: u32) -> u32 {
    (2 * base + iv) * level / 100 + level + HEALTH_STAT_BONUS
}

pub fn derived_stat(base: u32, iv: u32, level: u32) -> u32 {
    (2 * base + iv) * level / 100 + OTHER_STAT_BONUS
}

/// Total experience at which a unit reaches `level` (Medium Fast curve).
pub fn experience_for_level(level: u32) -> u32 {
    if level <= 1 {
        0
    } else {
        level.pow(3)
    }
}

/// Damage of one attack. Never less than 1.
pub fn damage_dealt(attacker_level: u32, attacker_attack: u32, defender_defense: u32) -> u32 {
    let level_factor = 2.0 * attacker_level as f64 / 5.0 + 2.0;
    let ratio = attacker_attack as f64 / defender_defense.max(1) as f64;
    let raw = (level_factor * ATTACK_POWER * ratio) / 50.0 + 2.0;
    (raw.floor() as u32).max(1)
}

#[derive(Debug, Clone)]
pub struct CombatUnit {
    pub name: String,
    pub level: u32,
    pub base: BaseStats,
    pub ivs: IndividualValues,

    pub health: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    pub current_health: u32,

    pub current_experience: u32,
    /// Experience total at the current level
    pub level_experience: u32,
    /// Experience total needed for the next level
    pub target_experience: u32,

    // Battle-only presentation state
    pub x: f64,
    pub y: f64,
    pub rest_position: (f64, f64),
    pub attack_position: (f64, f64),
    pub alpha: f64,
    /// Set by `apply_damage`, consumed once by the battle panels.
    pub damaged: bool,
}

impl CombatUnit {
    pub fn new(name: impl Into<String>, base: BaseStats, level: u32, ivs: IndividualValues) -> Self {
        let level = level.clamp(1, MAX_LEVEL);
        let experience = experience_for_level(level);
        let mut unit = Self {
            name: name.into(),
            level,
            base,
            ivs,
            health: 0,
            attack: 0,
            defense: 0,
            speed: 0,
            current_health: 0,
            current_experience: experience,
            level_experience: experience,
            target_experience: experience_for_level(level + 1),
            x: 0.0,
            y: 0.0,
            rest_position: (0.0, 0.0),
            attack_position: (0.0, 0.0),
            alpha: 1.0,
            damaged: false,
        };
        unit.recompute_stats();
        unit.current_health = unit.health;
        unit
    }

    /// Recomputes health/attack/defense/speed from base, IVs and level.
    /// Current health is left alone.
    pub fn recompute_stats(&mut self) {
        self.health = derived_health(self.base.base_health, self.ivs.health, self.level);
        self.attack = derived_stat(self.base.base_attack, self.ivs.attack, self.level);
        self.defense = derived_stat(self.base.base_defense, self.ivs.defense, self.level);
        self.speed = derived_stat(self.base.base_speed, self.ivs.speed, self.level);
    }

    pub fn stats(&self) -> Stats {
        Stats {
            health: self.health,
            attack: self.attack,
            defense: self.defense,
            speed: self.speed,
        }
    }

    /// Takes one attack from `attacker`. Returns the damage rolled.
    pub fn apply_damage(&mut self, attacker: &CombatUnit) -> u32 {
        let damage = damage_dealt(attacker.level, attacker.attack, self.defense);
        self.current_health = self.current_health.saturating_sub(damage);
        self.damaged = true;
        damage
    }

    pub fn heal(&mut self, amount: u32) {
        self.current_health = self.health.min(self.current_health.saturating_add(amount));
    }

    pub fn heal_fully(&mut self) {
        self.heal(self.health);
    }

    pub fn is_fainted(&self) -> bool {
        self.current_health == 0
    }

    pub fn is_low_health(&self) -> bool {
        if self.health == 0 {
            return false;
        }
        let fraction = self.current_health as f64 / self.health as f64;
        fraction > 0.0 && fraction <= LOW_HEALTH_THRESHOLD
    }

    /// Experience earned for defeating `defeated`.
    pub fn experience_award(defeated: &CombatUnit) -> u32 {
        (defeated.base.base_experience as f64 * defeated.level as f64 / EXPERIENCE_AWARD_DIVISOR)
            .round() as u32
    }

    pub fn gain_experience(&mut self, amount: u32) {
        self.current_experience = self.current_experience.saturating_add(amount);
    }

    pub fn can_level_up(&self) -> bool {
        self.current_experience >= self.target_experience && self.level < MAX_LEVEL
    }

    pub fn level_up(&mut self) {
        self.level += 1;
        self.level_experience = experience_for_level(self.level);
        self.target_experience = experience_for_level(self.level + 1);
        self.recompute_stats();
        tracing::info!(unit = %self.name, level = self.level, "level up");
    }

    /// Resets battle presentation state for the given side.
    pub fn prepare_for_battle(&mut self, stance: Stance) {
        (self.x, self.y) = stance.start();
        self.rest_position = stance.rest();
        self.attack_position = stance.attack();
        self.alpha = 1.0;
        self.damaged = false;
    }

    pub fn health_meter(&self) -> String {
        format!("{} / {}", self.current_health, self.health)
    }

    pub fn experience_meter(&self) -> String {
        format!(
            "{} / {}",
            self.current_experience.saturating_sub(self.level_experience),
            self.target_experience - self.level_experience
        )
    }

    /// Progress through the current level, 0.0 to 1.0.
    pub fn experience_fraction(&self) -> f64 {
        let span = (self.target_experience - self.level_experience) as f64;
        if span <= 0.0 {
            return 1.0;
        }
        (self.current_experience.saturating_sub(self.level_experience) as f64 / span).min(1.0)
    }
}
