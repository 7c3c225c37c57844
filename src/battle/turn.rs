//! One exchange of attacks, animated.
//!
//! The faster unit attacks first: message, lunge, recoil, flash, then the
//! damage lands. If nobody fainted the other unit answers the same way and
//! the menu comes back. A faint ends the battle, with experience and a
//! possible level-up on victory.

use super::encounter::{Encounter, Side};
use super::menu::BattleMenu;
use super::message::BattleMessage;
use super::round::{check_outcome, grant_experience, initiative, LevelUp, Outcome};
use super::session::{track_bar, upkeep};
use crate::core::audio::SoundName;
use crate::core::constants::{
    ATTACK_MESSAGE_SECONDS, BAR_TWEEN_SECONDS, CANVAS_HEIGHT, EXPERIENCE_MESSAGE_SECONDS, FLASH_ALPHA,
    FLASH_DURATION_SECONDS, FLASH_INTERVAL_SECONDS, LUNGE_SECONDS, OPPONENT_FAINT_SLIDE_SECONDS,
    PLAYER_FAINT_SLIDE_SECONDS,
};
use crate::core::scheduler::TaskHandle;
use crate::core::state_stack::{StackCommand, State};
use crate::creature::CombatUnit;
use crate::game::{Cue, GameContext, Prop, Signal};
use crate::scenes::{render_backdrop, Dialogue, Transition};
use crate::ui::{layout, Font, Renderer};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnCue {
    /// Attack message closed; move the attacker forward
    Lunge(Side),
    /// Move the attacker back
    Recoil(Side),
    /// Start the defender's hit flash
    Flash(Side),
    /// Flip the defender's opacity; `Side` is the defender
    Blink(Side),
    /// Flash over; damage lands
    Impact(Side),
    /// The fainted unit slid off
    Fainted,
    AwardExperience,
    GainExperience(u32),
    ShowLevelUp(LevelUp),
    Finish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    Entering,
    FirstAttack,
    SecondAttack,
    Resolved(Outcome),
}

#[derive(Debug)]
pub struct TurnResolver {
    first: Side,
    phase: TurnPhase,
    tasks: Vec<TaskHandle>,
}

impl TurnResolver {
    /// Rolls initiative for the coming exchange.
    pub fn new(encounter: &Encounter, rng: &mut impl Rng) -> Self {
        let first = initiative(encounter.player.speed, encounter.opponent.speed, rng);
        tracing::debug!(?first, "initiative");
        Self::with_first(first)
    }

    pub fn with_first(first: Side) -> Self {
        Self {
            first,
            phase: TurnPhase::Entering,
            tasks: Vec::new(),
        }
    }

    pub fn first(&self) -> Side {
        self.first
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    fn track(&mut self, ctx: &GameContext, handle: TaskHandle) {
        self.tasks.retain(|task| ctx.scheduler.is_active(*task));
        self.tasks.push(handle);
    }

    fn attack(&mut self, ctx: &mut GameContext, attacker: Side) {
        let Some(encounter) = ctx.world.encounter.as_ref() else {
            return;
        };
        let text = format!(
            "{} attacked {}!",
            encounter.unit(attacker).name,
            encounter.unit(attacker.other()).name
        );
        ctx.push(BattleMessage::new(
            text,
            ATTACK_MESSAGE_SECONDS,
            Some(Cue::Turn(TurnCue::Lunge(attacker))),
        ));
    }

    fn move_unit(&mut self, ctx: &mut GameContext, side: Side, to: (f64, f64), next: TurnCue) {
        let handle = ctx.tween(
            &[(Prop::UnitX(side), to.0), (Prop::UnitY(side), to.1)],
            LUNGE_SECONDS,
            Some(Cue::Turn(next)),
        );
        self.track(ctx, handle);
    }

    fn impact(&mut self, ctx: &mut GameContext, attacker: Side) {
        let Some(encounter) = ctx.world.encounter.as_mut() else {
            return;
        };
        let (striker, defender) = encounter.pair_mut(attacker);
        defender.alpha = 1.0;
        let damage = defender.apply_damage(striker);
        tracing::debug!(
            attacker = %striker.name,
            defender = %defender.name,
            damage,
            remaining = defender.current_health,
            "hit"
        );

        let outcome = check_outcome(&encounter.player, &encounter.opponent);
        match outcome {
            Outcome::Continue if self.phase == TurnPhase::FirstAttack => {
                self.phase = TurnPhase::SecondAttack;
                self.attack(ctx, attacker.other());
            }
            Outcome::Continue => {
                self.phase = TurnPhase::Resolved(Outcome::Continue);
                ctx.pop();
                ctx.push(BattleMenu::new());
            }
            Outcome::Defeat => self.faint(ctx, Outcome::Defeat),
            Outcome::Victory => self.faint(ctx, Outcome::Victory),
        }
    }

    fn faint(&mut self, ctx: &mut GameContext, outcome: Outcome) {
        self.phase = TurnPhase::Resolved(outcome);
        let (side, seconds) = match outcome {
            Outcome::Defeat => (Side::Player, PLAYER_FAINT_SLIDE_SECONDS),
            _ => (Side::Opponent, OPPONENT_FAINT_SLIDE_SECONDS),
        };
        ctx.audio.play(SoundName::Faint);
        let handle = ctx.tween(
            &[(Prop::UnitY(side), CANVAS_HEIGHT)],
            seconds,
            Some(Cue::Turn(TurnCue::Fainted)),
        );
        self.track(ctx, handle);
    }

    fn fainted(&mut self, ctx: &mut GameContext) {
        let Some(encounter) = ctx.world.encounter.as_ref() else {
            return;
        };
        match self.phase {
            TurnPhase::Resolved(Outcome::Defeat) => {
                let text = format!("{} fainted!", encounter.player.name);
                tracing::info!(unit = %encounter.player.name, "player unit fainted");
                ctx.push(BattleMessage::new(text, 0.0, Some(Cue::Turn(TurnCue::Finish))));
            }
            TurnPhase::Resolved(Outcome::Victory) => {
                tracing::info!(opponent = %encounter.opponent.name, "opponent fainted");
                ctx.audio.stop(SoundName::BattleLoop);
                ctx.audio.play(SoundName::BattleVictory);
                ctx.push(BattleMessage::new(
                    "You won!",
                    0.0,
                    Some(Cue::Turn(TurnCue::AwardExperience)),
                ));
            }
            phase => tracing::warn!(?phase, "faint cue outside a resolved turn"),
        }
    }

    fn award_experience(&mut self, ctx: &mut GameContext) {
        let Some(encounter) = ctx.world.encounter.as_ref() else {
            return;
        };
        let amount = CombatUnit::experience_award(&encounter.opponent);
        let text = format!("{} earned {} experience points!", encounter.player.name, amount);
        ctx.push(BattleMessage::new(
            text,
            EXPERIENCE_MESSAGE_SECONDS,
            Some(Cue::Turn(TurnCue::GainExperience(amount))),
        ));
    }

    fn gain_experience(&mut self, ctx: &mut GameContext, amount: u32) {
        let Some(encounter) = ctx.world.encounter.as_mut() else {
            return;
        };
        let player = &mut encounter.player;
        // The bar fills within the level the experience was earned in.
        let span = player.target_experience.saturating_sub(player.level_experience);
        let into_level = (player.current_experience + amount).saturating_sub(player.level_experience);
        let bar_target = into_level.min(span) as f64;
        let level_up = grant_experience(player, amount);
        let name = player.name.clone();

        ctx.audio.play(SoundName::ExperienceGain);
        let handle = ctx.tween(&[(Prop::ExperienceBar, bar_target)], BAR_TWEEN_SECONDS, None);
        track_bar(ctx, handle);

        match level_up {
            Some(level_up) => {
                ctx.audio.play(SoundName::ExperienceFull);
                ctx.push(BattleMessage::new(
                    format!("{} grew to LV. {}!", name, level_up.level),
                    0.0,
                    Some(Cue::Turn(TurnCue::ShowLevelUp(level_up))),
                ));
            }
            None => self.finish(ctx),
        }
    }

    fn finish(&mut self, ctx: &mut GameContext) {
        ctx.pop();
        ctx.push(Transition::fade(vec![StackCommand::Pop]));
    }
}

impl State<GameContext> for TurnResolver {
    type Signal = Signal;

    fn enter(&mut self, ctx: &mut GameContext) {
        if self.phase == TurnPhase::Entering {
            self.phase = TurnPhase::FirstAttack;
            self.attack(ctx, self.first);
        }
    }

    fn exit(&mut self, ctx: &mut GameContext) {
        for task in self.tasks.drain(..) {
            ctx.scheduler.clear(task);
        }
    }

    fn update(&mut self, ctx: &mut GameContext, _dt: f64) {
        upkeep(ctx);
    }

    fn render(&self, ctx: &GameContext, renderer: &mut dyn Renderer) {
        render_backdrop(ctx, renderer);
    }

    fn on_signal(&mut self, ctx: &mut GameContext, signal: &Signal) -> bool {
        let Cue::Turn(cue) = &signal.cue else {
            return false;
        };
        match *cue {
            TurnCue::Lunge(attacker) => {
                let to = attacker.stance().attack();
                self.move_unit(ctx, attacker, to, TurnCue::Recoil(attacker));
            }
            TurnCue::Recoil(attacker) => {
                let to = attacker.stance().rest();
                self.move_unit(ctx, attacker, to, TurnCue::Flash(attacker));
            }
            TurnCue::Flash(attacker) => {
                ctx.audio.play(SoundName::BattleDamage);
                let handle = ctx.add_task(
                    Cue::Turn(TurnCue::Blink(attacker.other())),
                    FLASH_INTERVAL_SECONDS,
                    FLASH_DURATION_SECONDS,
                    Some(Cue::Turn(TurnCue::Impact(attacker))),
                );
                self.track(ctx, handle);
            }
            TurnCue::Blink(defender) => {
                if let Some(encounter) = ctx.world.encounter.as_mut() {
                    let unit = encounter.unit_mut(defender);
                    unit.alpha = if unit.alpha < 1.0 { 1.0 } else { FLASH_ALPHA };
                }
            }
            TurnCue::Impact(attacker) => self.impact(ctx, attacker),
            TurnCue::Fainted => self.fainted(ctx),
            TurnCue::AwardExperience => self.award_experience(ctx),
            TurnCue::GainExperience(amount) => self.gain_experience(ctx, amount),
            TurnCue::ShowLevelUp(level_up) => {
                let dialogue = Dialogue::new(
                    &level_up.summary(),
                    layout::LEVEL_UP_DIALOGUE,
                    Some(Cue::Turn(TurnCue::Finish)),
                );
                ctx.push(dialogue.with_font(Font::Small));
            }
            TurnCue::Finish => self.finish(ctx),
        }
        true
    }
}
