//! Every state the game stacks, plus the shared backdrop.

#![allow(unused_imports)]

pub mod dialogue;
pub mod overworld;
pub mod stats_view;
pub mod title;
pub mod transition;

pub use dialogue::*;
pub use overworld::*;
pub use stats_view::*;
pub use title::*;
pub use transition::*;

use crate::battle::{render_battlefield, BattleMenu, BattleMessage, BattleSession, TurnResolver};
use crate::core::constants::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::core::state_stack::State;
use crate::creature::Stance;
use crate::game::{GameContext, Signal};
use crate::ui::{layout, Color, Drawable, ImageId, Panel, Renderer};

/// The closed set of stackable states.
#[derive(Debug)]
pub enum Scene {
    Title(TitleScreen),
    Overworld(Overworld),
    Battle(Box<BattleSession>),
    BattleMenu(BattleMenu),
    BattleMessage(BattleMessage),
    BattleTurn(TurnResolver),
    Dialogue(Dialogue),
    StatsView(StatsView),
    Transition(Transition),
}

macro_rules! each_scene {
    ($scene:expr, $inner:ident => $body:expr) => {
        match $scene {
            Scene::Title($inner) => $body,
            Scene::Overworld($inner) => $body,
            Scene::Battle($inner) => $body,
            Scene::BattleMenu($inner) => $body,
            Scene::BattleMessage($inner) => $body,
            Scene::BattleTurn($inner) => $body,
            Scene::Dialogue($inner) => $body,
            Scene::StatsView($inner) => $body,
            Scene::Transition($inner) => $body,
        }
    };
}

impl Scene {
    pub fn name(&self) -> &'static str {
        match self {
            Scene::Title(_) => "title",
            Scene::Overworld(_) => "overworld",
            Scene::Battle(_) => "battle",
            Scene::BattleMenu(_) => "battle-menu",
            Scene::BattleMessage(_) => "battle-message",
            Scene::BattleTurn(_) => "battle-turn",
            Scene::Dialogue(_) => "dialogue",
            Scene::StatsView(_) => "stats-view",
            Scene::Transition(_) => "transition",
        }
    }
}

impl State<GameContext> for Scene {
    type Signal = Signal;

    fn enter(&mut self, ctx: &mut GameContext) {
        each_scene!(self, scene => scene.enter(ctx))
    }

    fn exit(&mut self, ctx: &mut GameContext) {
        each_scene!(self, scene => scene.exit(ctx))
    }

    fn update(&mut self, ctx: &mut GameContext, dt: f64) {
        each_scene!(self, scene => scene.update(ctx, dt))
    }

    fn render(&self, ctx: &GameContext, renderer: &mut dyn Renderer) {
        each_scene!(self, scene => scene.render(ctx, renderer))
    }

    fn on_signal(&mut self, ctx: &mut GameContext, signal: &Signal) -> bool {
        each_scene!(self, scene => scene.on_signal(ctx, signal))
    }
}

macro_rules! scene_from {
    ($($variant:ident($state:ty)),* $(,)?) => {
        $(
            impl From<$state> for Scene {
                fn from(state: $state) -> Self {
                    Scene::$variant(state)
                }
            }
        )*
    };
}

scene_from!(
    Title(TitleScreen),
    Overworld(Overworld),
    BattleMenu(BattleMenu),
    BattleMessage(BattleMessage),
    BattleTurn(TurnResolver),
    Dialogue(Dialogue),
    StatsView(StatsView),
    Transition(Transition),
);

impl From<BattleSession> for Scene {
    fn from(session: BattleSession) -> Self {
        Scene::Battle(Box::new(session))
    }
}

/// Draws whatever sits behind the active state: the battlefield during an
/// encounter, the title art while a showcase is up, the route map otherwise.
pub fn render_backdrop(ctx: &GameContext, renderer: &mut dyn Renderer) {
    if ctx.world.encounter.is_some() {
        render_battlefield(ctx, renderer);
        Panel::new(layout::BOTTOM_DIALOGUE).render(renderer);
    } else if let Some(showcase) = &ctx.world.showcase {
        renderer.draw_image(&ImageId::TitleBackground, 0.0, 0.0, 1.0);
        let image = ImageId::Creature {
            species: showcase.species.clone(),
            stance: Stance::Front,
        };
        renderer.draw_image(&image, showcase.x, showcase.y, 1.0);
    } else {
        render_map(ctx, renderer);
    }
}

fn render_map(ctx: &GameContext, renderer: &mut dyn Renderer) {
    renderer.fill_rect(layout::FULL_SCREEN, Color::Black, 1.0);
    let walker = &ctx.world.walker;
    // Keep the walker centred; the map scrolls under it.
    let offset_x = CANVAS_WIDTH / 2.0 - walker.x;
    let offset_y = CANVAS_HEIGHT / 2.0 - walker.y;
    for (tile, x, y) in ctx.world.map.tiles() {
        renderer.draw_image(&ImageId::Tile(tile), x + offset_x, y + offset_y, 1.0);
    }
    renderer.draw_image(
        &ImageId::Trainer(walker.facing),
        walker.x + offset_x,
        walker.y + offset_y,
        1.0,
    );
}
