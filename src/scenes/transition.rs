//! Fade to white, apply stack changes while the screen is covered, fade back.

use super::{render_backdrop, Scene};
use crate::core::constants::FADE_SECONDS;
use crate::core::scheduler::TaskHandle;
use crate::core::state_stack::{StackCommand, State};
use crate::game::{Cue, GameContext, Prop, Signal};
use crate::ui::{layout, Color, Renderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeCue {
    /// The curtain is fully down
    Covered,
    /// The curtain is fully up
    Revealed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeDirection {
    In,
    Out,
}

#[derive(Debug)]
pub struct Transition {
    direction: FadeDirection,
    /// Applied once the screen is covered
    then: Vec<StackCommand<Scene>>,
    task: Option<TaskHandle>,
}

impl Transition {
    /// Covers the screen, applies `then`, and uncovers it again.
    pub fn fade(then: Vec<StackCommand<Scene>>) -> Self {
        Self {
            direction: FadeDirection::In,
            then,
            task: None,
        }
    }

    fn reveal() -> Self {
        Self {
            direction: FadeDirection::Out,
            then: Vec::new(),
            task: None,
        }
    }

    pub fn direction(&self) -> FadeDirection {
        self.direction
    }

    fn goal(&self) -> (f64, FadeCue) {
        match self.direction {
            FadeDirection::In => (1.0, FadeCue::Covered),
            FadeDirection::Out => (0.0, FadeCue::Revealed),
        }
    }
}

impl State<GameContext> for Transition {
    type Signal = Signal;

    fn enter(&mut self, ctx: &mut GameContext) {
        let (curtain, cue) = self.goal();
        self.task = Some(ctx.tween(&[(Prop::Curtain, curtain)], FADE_SECONDS, Some(Cue::Fade(cue))));
    }

    fn exit(&mut self, ctx: &mut GameContext) {
        if let Some(task) = self.task.take() {
            ctx.scheduler.clear(task);
        }
    }

    fn render(&self, ctx: &GameContext, renderer: &mut dyn Renderer) {
        render_backdrop(ctx, renderer);
        renderer.fill_rect(layout::FULL_SCREEN, Color::White, ctx.world.curtain);
    }

    fn on_signal(&mut self, ctx: &mut GameContext, signal: &Signal) -> bool {
        let (_, expected) = self.goal();
        if signal.cue != Cue::Fade(expected) || self.task.is_none() || signal.source != self.task {
            return false;
        }
        self.task = None;
        ctx.pop();
        if self.direction == FadeDirection::In {
            for command in self.then.drain(..) {
                ctx.command(command);
            }
            ctx.push(Transition::reveal());
        }
        true
    }
}
