//! One wild encounter from slide-in to fade-out.

use super::encounter::{Encounter, Side};
use super::menu::BattleMenu;
use super::message::BattleMessage;
use crate::core::audio::SoundName;
use crate::core::constants::{BACK_REST, BAR_TWEEN_SECONDS, FRONT_REST, SLIDE_IN_SECONDS};
use crate::core::scheduler::TaskHandle;
use crate::core::state_stack::State;
use crate::creature::CombatUnit;
use crate::game::{Cue, GameContext, Prop, Signal};
use crate::ui::{layout, Align, Color, Drawable, Font, HealthBar, ImageId, Panel, ProgressBar, Renderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCue {
    /// The opponent finished sliding in
    OpponentArrived,
    /// "A wild ... appeared!" was dismissed
    Announced,
    /// "Go ...!" was dismissed
    SendOut,
    /// The player's unit is in place
    PlayerReady,
}

#[derive(Debug)]
pub struct BattleSession {
    /// Moved into the world's encounter on enter
    opponent: Option<CombatUnit>,
    started: bool,
    tasks: Vec<TaskHandle>,
}

impl BattleSession {
    pub fn new(opponent: CombatUnit) -> Self {
        Self {
            opponent: Some(opponent),
            started: false,
            tasks: Vec::new(),
        }
    }

    fn track(&mut self, ctx: &GameContext, handle: TaskHandle) {
        self.tasks.retain(|task| ctx.scheduler.is_active(*task));
        self.tasks.push(handle);
    }

    fn names(ctx: &GameContext) -> Option<(String, String)> {
        ctx.world
            .encounter
            .as_ref()
            .map(|e| (e.player.name.clone(), e.opponent.name.clone()))
    }
}

impl State<GameContext> for BattleSession {
    type Signal = Signal;

    fn enter(&mut self, ctx: &mut GameContext) {
        let Some(opponent) = self.opponent.take() else {
            return;
        };
        if ctx.world.party.is_empty() {
            tracing::warn!("no party member to send out, leaving battle");
            ctx.pop();
            return;
        }
        let player = ctx.world.party.remove(0);
        tracing::info!(
            player = %player.name,
            opponent = %opponent.name,
            opponent_level = opponent.level,
            "battle started"
        );
        ctx.world.encounter = Some(Encounter::new(player, opponent));
    }

    fn exit(&mut self, ctx: &mut GameContext) {
        for task in self.tasks.drain(..) {
            ctx.scheduler.clear(task);
        }
        ctx.audio.stop(SoundName::LowHealth);
        ctx.audio.stop(SoundName::BattleLoop);
        ctx.audio.stop(SoundName::BattleVictory);
        ctx.audio.play(SoundName::Route);

        if let Some(mut encounter) = ctx.world.encounter.take() {
            for task in encounter.bar_tasks.drain(..) {
                ctx.scheduler.clear(task);
            }
            tracing::info!(
                unit = %encounter.player.name,
                health = encounter.player.current_health,
                experience = encounter.player.current_experience,
                "battle ended"
            );
            ctx.world.party.insert(0, encounter.player);
        }
    }

    fn update(&mut self, ctx: &mut GameContext, _dt: f64) {
        if !self.started {
            self.started = true;
            ctx.audio.play(SoundName::BattleLoop);
            let handle = ctx.tween(
                &[(Prop::UnitX(Side::Opponent), FRONT_REST.0)],
                SLIDE_IN_SECONDS,
                Some(Cue::Session(SessionCue::OpponentArrived)),
            );
            self.track(ctx, handle);
        }
        upkeep(ctx);
    }

    fn render(&self, ctx: &GameContext, renderer: &mut dyn Renderer) {
        render_battlefield(ctx, renderer);
        Panel::new(layout::BOTTOM_DIALOGUE).render(renderer);
    }

    fn on_signal(&mut self, ctx: &mut GameContext, signal: &Signal) -> bool {
        let Cue::Session(cue) = &signal.cue else {
            return false;
        };
        let Some((player, opponent)) = Self::names(ctx) else {
            return true;
        };
        match cue {
            SessionCue::OpponentArrived => {
                ctx.audio.play(SoundName::cry(&opponent));
                ctx.push(BattleMessage::new(
                    format!("A wild {} appeared!", opponent),
                    0.0,
                    Some(Cue::Session(SessionCue::Announced)),
                ));
            }
            SessionCue::Announced => {
                ctx.push(BattleMessage::new(
                    format!("Go {}!", player),
                    0.0,
                    Some(Cue::Session(SessionCue::SendOut)),
                ));
            }
            SessionCue::SendOut => {
                let handle = ctx.tween(
                    &[(Prop::UnitX(Side::Player), BACK_REST.0)],
                    SLIDE_IN_SECONDS,
                    Some(Cue::Session(SessionCue::PlayerReady)),
                );
                self.track(ctx, handle);
            }
            SessionCue::PlayerReady => {
                ctx.audio.play(SoundName::cry(&player));
                ctx.push(BattleMenu::new());
            }
        }
        true
    }
}

/// Per-frame battle bookkeeping shared by every battle state: the low-health
/// cue follows the player's unit, and a freshly damaged unit's bar starts
/// draining towards its new health.
pub fn upkeep(ctx: &mut GameContext) {
    let Some(encounter) = ctx.world.encounter.as_mut() else {
        return;
    };
    if encounter.player.is_low_health() {
        ctx.audio.play(SoundName::LowHealth);
    } else {
        ctx.audio.stop(SoundName::LowHealth);
    }

    let mut drains = Vec::new();
    for side in [Side::Player, Side::Opponent] {
        let unit = encounter.unit_mut(side);
        if unit.damaged {
            unit.damaged = false;
            drains.push((Prop::HealthBar(side), unit.current_health as f64));
        }
    }
    for drain in drains {
        let handle = ctx.tween(&[drain], BAR_TWEEN_SECONDS, None);
        track_bar(ctx, handle);
    }
}

/// Hands a bar tween to the encounter so it ends with the battle.
pub fn track_bar(ctx: &mut GameContext, handle: TaskHandle) {
    let scheduler = &ctx.scheduler;
    if let Some(encounter) = ctx.world.encounter.as_mut() {
        encounter.bar_tasks.retain(|task| scheduler.is_active(*task));
        encounter.bar_tasks.push(handle);
    }
}

/// Background, both units and their panels.
pub fn render_battlefield(ctx: &GameContext, renderer: &mut dyn Renderer) {
    renderer.draw_image(&ImageId::BattleBackground, 0.0, 0.0, 1.0);
    let (ox, oy) = layout::OPPONENT_PLATFORM;
    let (px, py) = layout::PLAYER_PLATFORM;
    renderer.draw_image(&ImageId::BattlePlatform, ox, oy, 1.0);
    renderer.draw_image(&ImageId::BattlePlatform, px, py, 1.0);

    let Some(encounter) = ctx.world.encounter.as_ref() else {
        return;
    };

    for side in [Side::Opponent, Side::Player] {
        let unit = encounter.unit(side);
        let image = ImageId::Creature {
            species: unit.name.clone(),
            stance: side.stance(),
        };
        renderer.draw_image(&image, unit.x, unit.y, unit.alpha);
    }

    let opponent = &encounter.opponent;
    let panel = Panel::new(layout::BATTLE_OPPONENT);
    panel.render(renderer);
    HealthBar::new(60.0, 72.0, encounter.opponent_health_shown, opponent.health as f64).render(renderer);
    render_name_and_level(renderer, &panel, opponent);

    let player = &encounter.player;
    let panel = Panel::new(layout::BATTLE_PLAYER);
    panel.render(renderer);
    ProgressBar::new(285.0, 245.0, encounter.experience_shown, encounter.experience_span, Color::Blue)
        .render(renderer);
    HealthBar::new(285.0, 198.0, encounter.player_health_shown, player.health as f64).render(renderer);
    render_name_and_level(renderer, &panel, player);
    renderer.draw_text(
        &player.health_meter(),
        panel.rect.right() - 30.0,
        panel.rect.bottom() - 26.0,
        Font::Small,
        Color::Black,
        Align::Right,
    );
}

fn render_name_and_level(renderer: &mut dyn Renderer, panel: &Panel, unit: &CombatUnit) {
    let rect = panel.bounds();
    renderer.draw_text(
        &unit.name.to_uppercase(),
        rect.x + 15.0,
        rect.y + 12.0,
        Font::Medium,
        Color::Black,
        Align::Left,
    );
    renderer.draw_text(
        &format!("Lv{}", unit.level),
        rect.right() - 10.0,
        rect.y + 12.0,
        Font::Medium,
        Color::Black,
        Align::Right,
    );
}
