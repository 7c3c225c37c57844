//! Walking the route. Every step into tall grass may start an encounter.

use super::stats_view::StatsView;
use super::{render_backdrop, Dialogue, Transition};
use crate::battle::BattleSession;
use crate::core::audio::SoundName;
use crate::core::constants::{TILE_SIZE, WALK_STEP_SECONDS};
use crate::core::input::Key;
use crate::core::scheduler::TaskHandle;
use crate::core::state_stack::{StackCommand, State};
use crate::game::{Cue, Direction, GameContext, Prop, Signal, Tile};
use crate::ui::{layout, Renderer};
use rand::Rng;

pub const WELCOME_TEXT: &str = "Welcome to the route! Walk into the tall grass to find wild creatures. \
Press P to heal your party and Escape to check on your lead.";
pub const HEALED_TEXT: &str = "Your party has been healed!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverworldCue {
    /// The walker reached the next tile
    Arrived,
    /// The heal dialogue closed
    ResumeMusic,
}

fn direction_of(key: Key) -> Option<Direction> {
    match key {
        Key::Up => Some(Direction::Up),
        Key::Down => Some(Direction::Down),
        Key::Left => Some(Direction::Left),
        Key::Right => Some(Direction::Right),
        _ => None,
    }
}

#[derive(Debug, Default)]
pub struct Overworld {
    step: Option<TaskHandle>,
}

impl Overworld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_walking(&self) -> bool {
        self.step.is_some()
    }

    fn walk(&mut self, ctx: &mut GameContext, direction: Direction) {
        let walker = &mut ctx.world.walker;
        walker.facing = direction;
        let (dc, dr) = direction.offset();
        let (col, row) = (walker.col + dc, walker.row + dr);
        if !ctx.world.map.is_walkable(col, row) {
            ctx.audio.play(SoundName::PlayerBump);
            return;
        }
        walker.col = col;
        walker.row = row;
        self.step = Some(ctx.tween(
            &[
                (Prop::WalkerX, col as f64 * TILE_SIZE),
                (Prop::WalkerY, row as f64 * TILE_SIZE),
            ],
            WALK_STEP_SECONDS,
            Some(Cue::Overworld(OverworldCue::Arrived)),
        ));
    }

    fn arrived(&mut self, ctx: &mut GameContext) {
        let walker = &ctx.world.walker;
        if ctx.world.map.tile(walker.col, walker.row) != Tile::Grass {
            return;
        }
        if ctx.rng.gen_bool(ctx.config.encounter_chance) {
            self.start_encounter(ctx);
        }
    }

    fn start_encounter(&mut self, ctx: &mut GameContext) {
        let level = ctx
            .rng
            .gen_range(ctx.config.opponent_level_min..=ctx.config.opponent_level_max);
        let species = ctx.species.random_species(&mut ctx.rng).to_string();
        let opponent = match ctx.species.create_unit(&species, level, &mut ctx.rng) {
            Ok(unit) => unit,
            Err(err) => {
                tracing::warn!(%err, "could not create wild opponent");
                return;
            }
        };
        tracing::info!(species = %opponent.name, level, "wild encounter");
        ctx.audio.stop(SoundName::Route);
        ctx.audio.play(SoundName::BattleStart);
        ctx.push(Transition::fade(vec![StackCommand::Push(
            BattleSession::new(opponent).into(),
        )]));
    }
}

impl State<GameContext> for Overworld {
    type Signal = Signal;

    fn enter(&mut self, ctx: &mut GameContext) {
        ctx.audio.play(SoundName::Route);
        ctx.push(Dialogue::new(WELCOME_TEXT, layout::TOP_DIALOGUE, None));
    }

    fn exit(&mut self, ctx: &mut GameContext) {
        if let Some(step) = self.step.take() {
            ctx.scheduler.clear(step);
        }
    }

    fn update(&mut self, ctx: &mut GameContext, _dt: f64) {
        if ctx.world.party_fainted() {
            tracing::info!("party fainted, healing");
            ctx.world.heal_party();
        }
        if self.is_walking() {
            return;
        }

        if ctx.input.take(Key::Escape) {
            ctx.push(StatsView::new());
        } else if ctx.input.take(Key::Heal) {
            ctx.audio.pause(SoundName::Route);
            ctx.audio.play(SoundName::Heal);
            ctx.world.heal_party();
            ctx.push(Dialogue::new(
                HEALED_TEXT,
                layout::BOTTOM_DIALOGUE,
                Some(Cue::Overworld(OverworldCue::ResumeMusic)),
            ));
        } else if let Some(direction) = ctx.input.direction().and_then(direction_of) {
            self.walk(ctx, direction);
        }
    }

    fn render(&self, ctx: &GameContext, renderer: &mut dyn Renderer) {
        render_backdrop(ctx, renderer);
    }

    fn on_signal(&mut self, ctx: &mut GameContext, signal: &Signal) -> bool {
        match signal.cue {
            Cue::Overworld(OverworldCue::Arrived) if self.step.is_some() && signal.source == self.step => {
                self.step = None;
                self.arrived(ctx);
                true
            }
            Cue::Overworld(OverworldCue::ResumeMusic) => {
                ctx.audio.play(SoundName::Route);
                true
            }
            _ => false,
        }
    }
}
