//! FIGHT / RUN.

use super::message::BattleMessage;
use super::session::upkeep;
use super::turn::TurnResolver;
use crate::core::audio::SoundName;
use crate::core::constants::RUN_MESSAGE_SECONDS;
use crate::core::state_stack::{StackCommand, State};
use crate::game::{Cue, GameContext, Signal};
use crate::scenes::{render_backdrop, Transition};
use crate::ui::{layout, Drawable, Menu, Renderer};

pub const FIGHT: &str = "FIGHT";
pub const RUN: &str = "RUN";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCue {
    /// "Got away safely" closed
    Fled,
}

#[derive(Debug)]
pub struct BattleMenu {
    menu: Menu,
}

impl Default for BattleMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl BattleMenu {
    pub fn new() -> Self {
        Self {
            menu: Menu::new(layout::BATTLE_MENU, &[FIGHT, RUN]),
        }
    }

    pub fn selected(&self) -> usize {
        self.menu.selected()
    }

    fn fight(&mut self, ctx: &mut GameContext) {
        let Some(encounter) = ctx.world.encounter.as_ref() else {
            tracing::warn!("fight chosen without an encounter");
            return;
        };
        let turn = TurnResolver::new(encounter, &mut ctx.rng);
        ctx.pop();
        ctx.push(turn);
    }

    fn run(&mut self, ctx: &mut GameContext) {
        ctx.audio.play(SoundName::BattleRun);
        ctx.push(BattleMessage::new(
            "Got away safely",
            RUN_MESSAGE_SECONDS,
            Some(Cue::Menu(MenuCue::Fled)),
        ));
    }
}

impl State<GameContext> for BattleMenu {
    type Signal = Signal;

    fn update(&mut self, ctx: &mut GameContext, _dt: f64) {
        upkeep(ctx);
        match self.menu.navigate(&mut ctx.input, &mut ctx.audio) {
            Some(0) => self.fight(ctx),
            Some(_) => self.run(ctx),
            None => {}
        }
    }

    fn render(&self, ctx: &GameContext, renderer: &mut dyn Renderer) {
        render_backdrop(ctx, renderer);
        self.menu.render(renderer);
    }

    fn on_signal(&mut self, ctx: &mut GameContext, signal: &Signal) -> bool {
        if signal.cue != Cue::Menu(MenuCue::Fled) {
            return false;
        }
        tracing::info!("player ran from battle");
        ctx.pop();
        ctx.push(Transition::fade(vec![StackCommand::Pop]));
        true
    }
}
