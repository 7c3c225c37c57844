//! Battle runner built on the shared round rules.

use super::config::SimConfig;
use super::report::SimReport;
use crate::battle::{grant_experience, resolve_round, Encounter, Outcome, Side};
use crate::core::error::Result;
use crate::creature::{CombatUnit, SpeciesTable};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// What happened in one simulated battle.
#[derive(Debug, Clone, PartialEq)]
pub struct BattleStats {
    /// `Continue` if the battle hit the round cap
    pub outcome: Outcome,
    pub rounds: u32,
    /// Rounds in which the player's unit struck first
    pub player_first: u32,
    pub damage_dealt: u32,
    pub damage_taken: u32,
    pub experience_earned: u32,
    pub leveled_up: bool,
    /// Player health fraction left at the end
    pub health_left: f64,
}

/// Run every battle and aggregate the results.
pub fn run_simulation(config: &SimConfig, species: &SpeciesTable) -> Result<SimReport> {
    config.validate()?;
    // Fail fast on unknown species rather than once per run.
    species.get(&config.player)?;
    species.get(&config.opponent)?;

    let mut battles = Vec::with_capacity(config.num_runs as usize);
    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        let stats = simulate_battle(config, species, &mut rng)?;
        if config.verbosity >= 2 {
            tracing::info!(
                run = run_idx + 1,
                outcome = ?stats.outcome,
                rounds = stats.rounds,
                experience = stats.experience_earned,
                "battle finished"
            );
        }
        battles.push(stats);
    }

    Ok(SimReport::from_battles(battles))
}

/// Fight one battle to the end (or the round cap).
pub fn simulate_battle(config: &SimConfig, species: &SpeciesTable, rng: &mut impl Rng) -> Result<BattleStats> {
    let player = species.create_unit(&config.player, config.player_level, rng)?;
    let opponent = species.create_unit(&config.opponent, config.opponent_level, rng)?;
    let mut encounter = Encounter::new(player, opponent);

    let mut stats = BattleStats {
        outcome: Outcome::Continue,
        rounds: 0,
        player_first: 0,
        damage_dealt: 0,
        damage_taken: 0,
        experience_earned: 0,
        leveled_up: false,
        health_left: 1.0,
    };

    while stats.rounds < config.max_rounds {
        let report = resolve_round(&mut encounter, rng);
        stats.rounds += 1;
        if report.first == Side::Player {
            stats.player_first += 1;
        }
        for strike in &report.strikes {
            match strike.attacker {
                Side::Player => stats.damage_dealt += strike.damage,
                Side::Opponent => stats.damage_taken += strike.damage,
            }
        }
        if report.outcome != Outcome::Continue {
            stats.outcome = report.outcome;
            break;
        }
    }

    if stats.outcome == Outcome::Victory {
        let award = CombatUnit::experience_award(&encounter.opponent);
        stats.experience_earned = award;
        stats.leveled_up = grant_experience(&mut encounter.player, award).is_some();
    }

    let player = &encounter.player;
    stats.health_left = player.current_health as f64 / player.health.max(1) as f64;
    Ok(stats)
}
