//! Battle rules shared by the animated turn and the headless simulator.

use super::encounter::{Encounter, Side};
use crate::creature::{CombatUnit, Stats};
use rand::Rng;
use std::cmp::Ordering;

/// Who attacks first this round. Faster goes first; a tie is a fair coin.
pub fn initiative(player_speed: u32, opponent_speed: u32, rng: &mut impl Rng) -> Side {
    match player_speed.cmp(&opponent_speed) {
        Ordering::Greater => Side::Player,
        Ordering::Less => Side::Opponent,
        Ordering::Equal => {
            if rng.gen_bool(0.5) {
                Side::Player
            } else {
                Side::Opponent
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Both units are standing; back to the menu
    Continue,
    /// The opponent fainted
    Victory,
    /// The player's unit fainted
    Defeat,
}

/// The player's unit is checked first.
pub fn check_outcome(player: &CombatUnit, opponent: &CombatUnit) -> Outcome {
    if player.is_fainted() {
        Outcome::Defeat
    } else if opponent.is_fainted() {
        Outcome::Victory
    } else {
        Outcome::Continue
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strike {
    pub attacker: Side,
    pub damage: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundReport {
    pub first: Side,
    pub strikes: Vec<Strike>,
    pub outcome: Outcome,
}

/// Resolves one round at once: initiative, then up to two attacks.
/// A unit that faints never gets its own attack.
pub fn resolve_round(encounter: &mut Encounter, rng: &mut impl Rng) -> RoundReport {
    let first = initiative(encounter.player.speed, encounter.opponent.speed, rng);
    let mut strikes = Vec::with_capacity(2);

    for attacker in [first, first.other()] {
        let (striker, defender) = encounter.pair_mut(attacker);
        let damage = defender.apply_damage(striker);
        strikes.push(Strike { attacker, damage });

        let outcome = check_outcome(&encounter.player, &encounter.opponent);
        if outcome != Outcome::Continue {
            return RoundReport {
                first,
                strikes,
                outcome,
            };
        }
    }

    RoundReport {
        first,
        strikes,
        outcome: Outcome::Continue,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    pub level: u32,
    pub before: Stats,
    pub after: Stats,
}

impl LevelUp {
    /// One `Stat: old > new` line per derived stat.
    pub fn summary(&self) -> String {
        format!(
            "Health: {} > {}\nAttack: {} > {}\nDefense: {} > {}\nSpeed: {} > {}",
            self.before.health,
            self.after.health,
            self.before.attack,
            self.after.attack,
            self.before.defense,
            self.after.defense,
            self.before.speed,
            self.after.speed,
        )
    }
}

/// Adds experience and levels up at most once.
pub fn grant_experience(unit: &mut CombatUnit, amount: u32) -> Option<LevelUp> {
    unit.gain_experience(amount);
    if !unit.can_level_up() {
        return None;
    }
    let before = unit.stats();
    unit.level_up();
    Some(LevelUp {
        level: unit.level,
        before,
        after: unit.stats(),
    })
}
