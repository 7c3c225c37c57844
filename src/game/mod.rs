//! Frame driver.
//!
//! Each frame: advance the scheduler and hand every fired cue to the state
//! stack, update the active state, then settle the stack commands and
//! signals those hooks raised. Rendering draws the active state only.

#![allow(unused_imports)]

pub mod context;
pub mod map;
pub mod world;

pub use context::*;
pub use map::*;
pub use world::*;

use crate::core::config::GameConfig;
use crate::core::error::Result;
use crate::core::state_stack::{StackCommand, StateStack};
use crate::creature::SpeciesTable;
use crate::scenes::{Scene, TitleScreen};
use crate::ui::Renderer;
use rand::RngCore;
use std::collections::VecDeque;

pub struct Game {
    pub ctx: GameContext,
    stack: StateStack<Scene>,
}

impl Game {
    /// Wraps a context with `root` at the bottom of the stack. The root is
    /// entered by [`Game::start`].
    pub fn new(mut ctx: GameContext, root: impl Into<Scene>) -> Self {
        let mut stack = StateStack::new();
        stack.push(root.into(), &mut ctx);
        Self { ctx, stack }
    }

    /// Loads the species table, builds the starting party and opens on the
    /// title screen.
    pub fn from_config(config: GameConfig, mut rng: Box<dyn RngCore>) -> Result<Self> {
        config.validate()?;
        let species = match &config.species_file {
            Some(path) => SpeciesTable::load(path)?,
            None => SpeciesTable::bundled()?,
        };

        let starter = match &config.starting_species {
            Some(name) => name.clone(),
            None => species.random_starter(&mut rng).to_string(),
        };
        let lead = species.create_unit(&starter, config.starting_level, &mut rng)?;
        tracing::info!(species = %lead.name, level = lead.level, "starting party");

        let title = TitleScreen::new(&species);
        let ctx = GameContext::new(config, species, World::new(vec![lead]), rng);
        Ok(Self::new(ctx, title))
    }

    pub fn start(&mut self) {
        self.stack.start(&mut self.ctx);
        self.settle();
    }

    pub fn frame(&mut self, dt: f64) {
        let fired = self.ctx.scheduler.update(dt, &mut self.ctx.world);
        for fired in fired {
            // An earlier cue in this batch may have torn the owner down.
            if self.ctx.scheduler.was_cancelled(fired.handle) {
                tracing::debug!(cue = ?fired.event, "dropping cue of cancelled task");
                continue;
            }
            self.deliver(Signal {
                cue: fired.event,
                source: Some(fired.handle),
            });
            self.settle();
        }

        self.stack.update(&mut self.ctx, dt);
        self.settle();
        self.ctx.input.clear();
    }

    pub fn render(&self, renderer: &mut dyn Renderer) {
        self.stack.render(&self.ctx, renderer);
    }

    /// Pushes a state from outside any hook and settles immediately.
    pub fn push(&mut self, scene: impl Into<Scene>) {
        self.ctx.push(scene);
        self.settle();
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn top(&self) -> Option<&Scene> {
        self.stack.top()
    }

    pub fn top_name(&self) -> Option<&'static str> {
        self.stack.top().map(Scene::name)
    }

    /// State names from bottom to top.
    pub fn scene_names(&self) -> Vec<&'static str> {
        self.stack.iter().map(Scene::name).collect()
    }

    fn deliver(&mut self, signal: Signal) {
        if !self.stack.dispatch(&mut self.ctx, &signal) {
            tracing::warn!(cue = ?signal.cue, "no state accepted cue, dropped");
        }
    }

    /// Applies queued effects until none are left. Effects raised while one
    /// is being applied run before older ones, so nested pushes and pops
    /// happen in the order the hooks asked for them.
    fn settle(&mut self) {
        let mut pending: VecDeque<Effect> = VecDeque::new();
        loop {
            let fresh = self.ctx.take_effects();
            for effect in fresh.into_iter().rev() {
                pending.push_front(effect);
            }
            let Some(effect) = pending.pop_front() else {
                break;
            };
            match effect {
                Effect::Stack(command) => {
                    match &command {
                        StackCommand::Push(scene) => tracing::debug!("push {}", scene.name()),
                        StackCommand::Pop => {
                            tracing::debug!("pop {}", self.top_name().unwrap_or("<empty>"))
                        }
                        StackCommand::Change(scene) => tracing::debug!("change to {}", scene.name()),
                    }
                    self.stack.apply(command, &mut self.ctx);
                }
                Effect::Signal(signal) => self.deliver(signal),
            }
        }
    }
}
