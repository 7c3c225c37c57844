//! Shared services every state works through.
//!
//! The context replaces process-wide singletons: the scheduler, the world the
//! scheduler tweens, audio, input, randomness and the queue of stack commands
//! and signals that states raise while their hooks run.

use super::world::{Prop, World};
use crate::battle::{MenuCue, MessageCue, SessionCue, TurnCue};
use crate::core::audio::Jukebox;
use crate::core::config::GameConfig;
use crate::core::input::Input;
use crate::core::scheduler::{Scheduler, TaskHandle};
use crate::core::state_stack::StackCommand;
use crate::creature::SpeciesTable;
use crate::scenes::{FadeCue, OverworldCue, Scene, TitleCue};
use rand::RngCore;
use std::collections::VecDeque;

/// Continuation values. Each state accepts the kinds it owns.
#[derive(Debug, Clone, PartialEq)]
pub enum Cue {
    Session(SessionCue),
    Turn(TurnCue),
    Menu(MenuCue),
    Message(MessageCue),
    Fade(FadeCue),
    Title(TitleCue),
    Overworld(OverworldCue),
}

/// A cue on its way to the state stack.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    pub cue: Cue,
    /// The scheduler task that fired it, if any
    pub source: Option<TaskHandle>,
}

/// Something a hook asked for, applied by the driver once the hook returns.
#[derive(Debug)]
pub enum Effect {
    Stack(StackCommand<Scene>),
    Signal(Signal),
}

pub struct GameContext {
    pub config: GameConfig,
    pub species: SpeciesTable,
    pub scheduler: Scheduler<Cue, Prop>,
    pub world: World,
    pub audio: Jukebox,
    pub input: Input,
    pub rng: Box<dyn RngCore>,
    effects: VecDeque<Effect>,
}

impl GameContext {
    pub fn new(config: GameConfig, species: SpeciesTable, world: World, rng: Box<dyn RngCore>) -> Self {
        Self {
            config,
            species,
            scheduler: Scheduler::new(),
            world,
            audio: Jukebox::new(),
            input: Input::new(),
            rng,
            effects: VecDeque::new(),
        }
    }

    pub fn push(&mut self, scene: impl Into<Scene>) {
        self.command(StackCommand::Push(scene.into()));
    }

    pub fn pop(&mut self) {
        self.command(StackCommand::Pop);
    }

    pub fn change(&mut self, scene: impl Into<Scene>) {
        self.command(StackCommand::Change(scene.into()));
    }

    pub fn command(&mut self, command: StackCommand<Scene>) {
        self.effects.push_back(Effect::Stack(command));
    }

    /// Raises a cue that isn't tied to a scheduler task.
    pub fn signal(&mut self, cue: Cue) {
        self.effects.push_back(Effect::Signal(Signal { cue, source: None }));
    }

    pub fn wait(&mut self, duration: f64, on_complete: Cue) -> TaskHandle {
        self.scheduler.wait(duration, on_complete)
    }

    /// Tweens world properties, capturing their current values as the start.
    pub fn tween(&mut self, props: &[(Prop, f64)], duration: f64, on_complete: Option<Cue>) -> TaskHandle {
        self.scheduler.tween(&self.world, props, duration, on_complete)
    }

    pub fn add_task(
        &mut self,
        action: Cue,
        interval: f64,
        duration: f64,
        on_complete: Option<Cue>,
    ) -> TaskHandle {
        self.scheduler.add_task(action, interval, duration, on_complete)
    }

    pub(crate) fn take_effects(&mut self) -> VecDeque<Effect> {
        std::mem::take(&mut self.effects)
    }
}
