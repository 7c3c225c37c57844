//! Battle arithmetic and scheduler timing, checked without the frame driver.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tallgrass::battle::{grant_experience, initiative, resolve_round, Encounter, Outcome, Side};
use tallgrass::core::scheduler::{Scheduler, Tweenable};
use tallgrass::creature::{
    damage_dealt, derived_health, derived_stat, experience_for_level, BaseStats, CombatUnit,
    IndividualValues,
};

fn base(speed: u32) -> BaseStats {
    BaseStats {
        base_health: 45,
        base_attack: 49,
        base_defense: 49,
        base_speed: speed,
        base_experience: 64,
    }
}

fn unit(name: &str, speed: u32, level: u32, iv: u32) -> CombatUnit {
    CombatUnit::new(name, base(speed), level, IndividualValues::uniform(iv))
}

#[derive(Debug, Default)]
struct Gauge {
    value: f64,
}

impl Tweenable<()> for Gauge {
    fn get(&self, _key: ()) -> f64 {
        self.value
    }

    fn set(&mut self, _key: (), value: f64) {
        self.value = value;
    }
}

// =============================================================================
// Stats and experience
// =============================================================================

proptest! {
    #[test]
    fn test_stats_never_drop_with_level(base in 1u32..256, iv in 0u32..=31, level in 1u32..100) {
        prop_assert!(derived_stat(base, iv, level + 1) >= derived_stat(base, iv, level));
        prop_assert!(derived_health(base, iv, level + 1) > derived_health(base, iv, level));
    }

    #[test]
    fn test_experience_curve_strictly_increases(level in 1u32..100) {
        prop_assert!(experience_for_level(level + 1) > experience_for_level(level));
        if level > 1 {
            prop_assert_eq!(experience_for_level(level), level.pow(3));
        }
    }

    #[test]
    fn test_damage_at_least_one(level in 1u32..=100, attack in 1u32..400, defense in 0u32..400) {
        prop_assert!(damage_dealt(level, attack, defense) >= 1);
    }

    #[test]
    fn test_health_never_underflows(attacker_level in 1u32..=100, defender_level in 1u32..=100) {
        let attacker = unit("Attacker", 45, attacker_level, 31);
        let mut defender = unit("Defender", 45, defender_level, 0);
        for _ in 0..200 {
            defender.apply_damage(&attacker);
        }
        prop_assert_eq!(defender.current_health, 0);
        prop_assert!(defender.is_fainted());
    }

    #[test]
    fn test_award_levels_up_at_most_once(level in 1u32..99, amount in 0u32..2_000_000) {
        let mut lead = unit("Lead", 45, level, 10);
        let result = grant_experience(&mut lead, amount);
        prop_assert!(lead.level <= level + 1);
        prop_assert_eq!(result.is_some(), lead.level == level + 1);
    }

    #[test]
    fn test_round_ends_on_faint(seed in any::<u64>(), player_level in 1u32..=40, opponent_level in 1u32..=40) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut encounter = Encounter::new(
            unit("Player", 45, player_level, 10),
            unit("Opponent", 45, opponent_level, 10),
        );
        let report = resolve_round(&mut encounter, &mut rng);
        match report.outcome {
            Outcome::Continue => prop_assert_eq!(report.strikes.len(), 2),
            Outcome::Victory => prop_assert!(encounter.opponent.is_fainted()),
            Outcome::Defeat => prop_assert!(encounter.player.is_fainted()),
        }
        prop_assert_eq!(report.strikes[0].attacker, report.first);
    }
}

#[test]
fn test_slower_unit_never_opens() {
    // Speed 9 against speed 11
    let player = unit("Squirtle", 43, 5, 10);
    let opponent = unit("Pidgey", 58, 5, 5);
    assert_eq!(player.speed, 9);
    assert_eq!(opponent.speed, 11);

    let mut rng = ChaCha8Rng::seed_from_u64(3);
    for _ in 0..100 {
        assert_eq!(initiative(player.speed, opponent.speed, &mut rng), Side::Opponent);
    }
}

#[test]
fn test_speed_tie_is_a_coin_flip() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let player_first = (0..1000)
        .filter(|_| initiative(10, 10, &mut rng) == Side::Player)
        .count();
    assert!((400..=600).contains(&player_first), "player opened {} times", player_first);
}

#[test]
fn test_award_formula() {
    // 64 * 5 / 7 = 45.7
    assert_eq!(CombatUnit::experience_award(&unit("Defeated", 45, 5, 0)), 46);
}

#[test]
fn test_exact_target_levels_up_once() {
    let mut lead = unit("Lead", 45, 5, 10);
    let needed = lead.target_experience - lead.current_experience;
    let level_up = grant_experience(&mut lead, needed).unwrap();

    assert_eq!(level_up.level, 6);
    assert_eq!(lead.current_experience, 216);
    assert_eq!(lead.level_experience, 216);
    assert_eq!(lead.target_experience, 343);
    assert!(level_up.after.health > level_up.before.health);
    assert!(grant_experience(&mut lead, 0).is_none());
}

// =============================================================================
// Scheduler timing
// =============================================================================

#[test]
fn test_tween_lands_on_end_value() {
    let mut gauge = Gauge::default();
    let mut scheduler: Scheduler<&str, ()> = Scheduler::new();
    scheduler.tween(&gauge, &[((), 100.0)], 1.0, Some("full"));

    assert!(scheduler.update(0.5, &mut gauge).is_empty());
    assert_eq!(gauge.value, 50.0);

    let fired = scheduler.update(0.5, &mut gauge);
    assert_eq!(gauge.value, 100.0);
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].event, "full");
    assert!(scheduler.is_empty());
}

#[test]
fn test_tween_in_one_step_fires_once() {
    let mut gauge = Gauge::default();
    let mut scheduler: Scheduler<&str, ()> = Scheduler::new();
    scheduler.tween(&gauge, &[((), 100.0)], 1.0, Some("full"));

    let fired = scheduler.update(1.0, &mut gauge);
    assert_eq!(gauge.value, 100.0);
    assert_eq!(fired.len(), 1);
    assert!(scheduler.update(1.0, &mut gauge).is_empty());
}

#[test]
fn test_cleared_task_never_fires() {
    let mut gauge = Gauge::default();
    let mut scheduler: Scheduler<&str, ()> = Scheduler::new();
    let handle = scheduler.wait(0.1, "late");
    assert!(scheduler.clear(handle));
    assert!(!scheduler.clear(handle));

    for _ in 0..10 {
        assert!(scheduler.update(0.1, &mut gauge).is_empty());
    }
}

proptest! {
    #[test]
    fn test_interval_fires_once_per_interval(quarters in 1u32..=4, repeats in 1u32..=6) {
        let interval = quarters as f64 * 0.25;
        let mut gauge = Gauge::default();
        let mut scheduler: Scheduler<&str, ()> = Scheduler::new();
        scheduler.add_task("tick", interval, interval * repeats as f64, Some("done"));

        let fired = scheduler.update(interval * repeats as f64 + 1.0, &mut gauge);
        let events: Vec<&str> = fired.iter().map(|fired| fired.event).collect();
        prop_assert_eq!(events.len(), repeats as usize + 1);
        prop_assert!(events[..repeats as usize].iter().all(|event| *event == "tick"));
        prop_assert_eq!(events.last().copied(), Some("done"));
    }

    #[test]
    fn test_tween_stays_between_endpoints(
        end in 1.0f64..1000.0,
        duration in 0.1f64..5.0,
        steps in prop::collection::vec(0.0f64..0.5, 1..40),
    ) {
        let mut gauge = Gauge::default();
        let mut scheduler: Scheduler<&str, ()> = Scheduler::new();
        scheduler.tween(&gauge, &[((), end)], duration, None);

        let mut total = 0.0;
        for dt in steps {
            scheduler.update(dt, &mut gauge);
            total += dt;
            prop_assert!(gauge.value >= 0.0 && gauge.value <= end);
            if total >= duration {
                prop_assert_eq!(gauge.value, end);
            }
        }
    }
}
