//! Everything on screen that outlives a single state.

use super::map::{TileMap, Walker, SPAWN_TILE};
use crate::battle::{Encounter, Side};
use crate::core::scheduler::Tweenable;
use crate::creature::CombatUnit;

/// A tweenable number somewhere in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prop {
    UnitX(Side),
    UnitY(Side),
    HealthBar(Side),
    ExperienceBar,
    /// Full-screen fade opacity
    Curtain,
    WalkerX,
    WalkerY,
    ShowcaseX,
    ShowcaseY,
}

/// The creature sliding across the title screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Showcase {
    pub species: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone)]
pub struct World {
    pub party: Vec<CombatUnit>,
    pub encounter: Option<Encounter>,
    pub map: TileMap,
    pub walker: Walker,
    pub curtain: f64,
    pub showcase: Option<Showcase>,
}

impl World {
    pub fn new(party: Vec<CombatUnit>) -> Self {
        Self {
            party,
            encounter: None,
            map: TileMap::route(),
            walker: Walker::at(SPAWN_TILE.0, SPAWN_TILE.1),
            curtain: 0.0,
            showcase: None,
        }
    }

    pub fn lead(&self) -> Option<&CombatUnit> {
        self.encounter
            .as_ref()
            .map(|encounter| &encounter.player)
            .or_else(|| self.party.first())
    }

    pub fn party_fainted(&self) -> bool {
        !self.party.is_empty() && self.party.iter().all(CombatUnit::is_fainted)
    }

    pub fn heal_party(&mut self) {
        for unit in &mut self.party {
            unit.heal_fully();
        }
    }
}

// Properties whose owner is gone read as zero and ignore writes.
impl Tweenable<Prop> for World {
    fn get(&self, key: Prop) -> f64 {
        match key {
            Prop::Curtain => self.curtain,
            Prop::WalkerX => self.walker.x,
            Prop::WalkerY => self.walker.y,
            Prop::ShowcaseX => self.showcase.as_ref().map_or(0.0, |s| s.x),
            Prop::ShowcaseY => self.showcase.as_ref().map_or(0.0, |s| s.y),
            Prop::UnitX(side) => self.encounter.as_ref().map_or(0.0, |e| e.unit(side).x),
            Prop::UnitY(side) => self.encounter.as_ref().map_or(0.0, |e| e.unit(side).y),
            Prop::HealthBar(side) => self.encounter.as_ref().map_or(0.0, |e| e.health_shown(side)),
            Prop::ExperienceBar => self.encounter.as_ref().map_or(0.0, |e| e.experience_shown),
        }
    }

    fn set(&mut self, key: Prop, value: f64) {
        match key {
            Prop::Curtain => self.curtain = value,
            Prop::WalkerX => self.walker.x = value,
            Prop::WalkerY => self.walker.y = value,
            Prop::ShowcaseX | Prop::ShowcaseY => {
                if let Some(showcase) = self.showcase.as_mut() {
                    if key == Prop::ShowcaseX {
                        showcase.x = value;
                    } else {
                        showcase.y = value;
                    }
                }
            }
            _ => {
                let Some(encounter) = self.encounter.as_mut() else {
                    tracing::debug!(?key, "tween target without an encounter");
                    return;
                };
                match key {
                    Prop::UnitX(side) => encounter.unit_mut(side).x = value,
                    Prop::UnitY(side) => encounter.unit_mut(side).y = value,
                    Prop::HealthBar(side) => *encounter.health_shown_mut(side) = value,
                    Prop::ExperienceBar => encounter.experience_shown = value,
                    _ => {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scheduler::Scheduler;
    use crate::creature::{BaseStats, IndividualValues};

    fn unit() -> CombatUnit {
        let base = BaseStats {
            base_health: 40,
            base_attack: 40,
            base_defense: 40,
            base_speed: 40,
            base_experience: 40,
        };
        CombatUnit::new("Pidgey", base, 5, IndividualValues::uniform(5))
    }

    #[test]
    fn test_encounter_props_round_through_world() {
        let mut world = World::new(vec![unit()]);
        world.encounter = Some(Encounter::new(unit(), unit()));

        world.set(Prop::UnitX(Side::Opponent), 300.0);
        world.set(Prop::HealthBar(Side::Player), 4.0);
        assert_eq!(world.get(Prop::UnitX(Side::Opponent)), 300.0);
        assert_eq!(world.get(Prop::HealthBar(Side::Player)), 4.0);
    }

    #[test]
    fn test_missing_encounter_is_harmless() {
        let mut world = World::new(Vec::new());
        world.set(Prop::UnitY(Side::Player), 10.0);
        assert_eq!(world.get(Prop::UnitY(Side::Player)), 0.0);
        assert!(world.lead().is_none());
        assert!(!world.party_fainted());
    }

    #[test]
    fn test_scheduler_tweens_walker() {
        let mut world = World::new(Vec::new());
        let mut scheduler: Scheduler<(), Prop> = Scheduler::new();
        let start_x = world.walker.x;
        scheduler.tween(&world, &[(Prop::WalkerX, start_x + 32.0)], 0.25, None);
        scheduler.update(0.25, &mut world);
        assert_eq!(world.walker.x, start_x + 32.0);
    }

    #[test]
    fn test_party_fainted_and_heal() {
        let mut world = World::new(vec![unit(), unit()]);
        for member in &mut world.party {
            member.current_health = 0;
        }
        assert!(world.party_fainted());
        world.heal_party();
        assert!(!world.party_fainted());
        assert_eq!(world.party[0].current_health, world.party[0].health);
    }
}
