//! The two combatants of an active battle plus what their panels show.

use crate::core::scheduler::TaskHandle;
use crate::creature::{CombatUnit, Stance};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    pub fn stance(self) -> Stance {
        match self {
            Side::Player => Stance::Back,
            Side::Opponent => Stance::Front,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Encounter {
    pub player: CombatUnit,
    pub opponent: CombatUnit,
    /// Health values the bars currently display; tweened towards the real ones
    pub player_health_shown: f64,
    pub opponent_health_shown: f64,
    /// Experience into the current level the player's bar displays
    pub experience_shown: f64,
    /// Width of the level the bar is filling; stays put across a level-up
    pub experience_span: f64,
    /// Bar tweens still running; cleared when the battle ends
    pub bar_tasks: Vec<TaskHandle>,
}

impl Encounter {
    /// Places both units at their starting positions.
    pub fn new(mut player: CombatUnit, mut opponent: CombatUnit) -> Self {
        player.prepare_for_battle(Side::Player.stance());
        opponent.prepare_for_battle(Side::Opponent.stance());
        Self {
            player_health_shown: player.current_health as f64,
            opponent_health_shown: opponent.current_health as f64,
            experience_shown: player.current_experience.saturating_sub(player.level_experience) as f64,
            experience_span: player.target_experience.saturating_sub(player.level_experience) as f64,
            player,
            opponent,
            bar_tasks: Vec::new(),
        }
    }

    pub fn unit(&self, side: Side) -> &CombatUnit {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    pub fn unit_mut(&mut self, side: Side) -> &mut CombatUnit {
        match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        }
    }

    /// Attacker and defender, borrowed together.
    pub fn pair_mut(&mut self, attacker: Side) -> (&mut CombatUnit, &mut CombatUnit) {
        match attacker {
            Side::Player => (&mut self.player, &mut self.opponent),
            Side::Opponent => (&mut self.opponent, &mut self.player),
        }
    }

    pub fn health_shown(&self, side: Side) -> f64 {
        match side {
            Side::Player => self.player_health_shown,
            Side::Opponent => self.opponent_health_shown,
        }
    }

    pub fn health_shown_mut(&mut self, side: Side) -> &mut f64 {
        match side {
            Side::Player => &mut self.player_health_shown,
            Side::Opponent => &mut self.opponent_health_shown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature::{BaseStats, IndividualValues};

    fn unit(name: &str) -> CombatUnit {
        let base = BaseStats {
            base_health: 40,
            base_attack: 40,
            base_defense: 40,
            base_speed: 40,
            base_experience: 40,
        };
        CombatUnit::new(name, base, 5, IndividualValues::uniform(0))
    }

    #[test]
    fn test_new_places_units_at_start() {
        let encounter = Encounter::new(unit("A"), unit("B"));
        assert_eq!((encounter.player.x, encounter.player.y), (-160.0, 96.0));
        assert_eq!((encounter.opponent.x, encounter.opponent.y), (480.0, 30.0));
        assert_eq!(encounter.health_shown(Side::Player), encounter.player.health as f64);
        assert_eq!(encounter.experience_shown, 0.0);
        // Level 5 to 6: 216 - 125
        assert_eq!(encounter.experience_span, 91.0);
        assert!(encounter.bar_tasks.is_empty());
    }

    #[test]
    fn test_pair_mut_orders_attacker_first() {
        let mut encounter = Encounter::new(unit("A"), unit("B"));
        let (attacker, defender) = encounter.pair_mut(Side::Opponent);
        assert_eq!(attacker.name, "B");
        assert_eq!(defender.name, "A");
        assert_eq!(Side::Opponent.other(), Side::Player);
    }
}
