//! Title screen with the starter carousel.
//!
//! A repeating task fires once per period and slides the current starter in;
//! the slide chains into a hold and a slide out, after which the next
//! starter waits off-screen. When the repeating task completes it is armed
//! again, so the carousel runs until the screen is left.

use super::overworld::Overworld;
use super::{render_backdrop, Transition};
use crate::core::audio::SoundName;
use crate::core::constants::{
    CANVAS_HEIGHT, CANVAS_WIDTH, CAROUSEL_END, CAROUSEL_HOLD_SECONDS, CAROUSEL_MID,
    CAROUSEL_PERIOD_SECONDS, CAROUSEL_SLIDE_SECONDS, CAROUSEL_START,
};
use crate::core::input::Key;
use crate::core::scheduler::TaskHandle;
use crate::core::state_stack::{StackCommand, State};
use crate::creature::SpeciesTable;
use crate::game::{Cue, GameContext, Prop, Showcase, Signal};
use crate::ui::{Align, Color, Font, Renderer};

pub const TITLE_TEXT: &str = "Tallgrass";
pub const PROMPT_TEXT: &str = "Press Enter";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleCue {
    SlideOn,
    Hold,
    SlideOff,
    /// Off-screen; swap to the next starter
    Reset,
    /// The repeating task ran out; arm another
    Restart,
}

#[derive(Debug)]
pub struct TitleScreen {
    starters: Vec<String>,
    index: usize,
    leaving: bool,
    tasks: Vec<TaskHandle>,
}

impl TitleScreen {
    pub fn new(species: &SpeciesTable) -> Self {
        Self {
            starters: species.starters().into_iter().map(String::from).collect(),
            index: 0,
            leaving: false,
            tasks: Vec::new(),
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.starters.get(self.index).map(String::as_str)
    }

    fn track(&mut self, ctx: &GameContext, handle: TaskHandle) {
        self.tasks.retain(|task| ctx.scheduler.is_active(*task));
        self.tasks.push(handle);
    }

    fn arm(&mut self, ctx: &mut GameContext) {
        let handle = ctx.add_task(
            Cue::Title(TitleCue::SlideOn),
            CAROUSEL_PERIOD_SECONDS,
            CAROUSEL_PERIOD_SECONDS,
            Some(Cue::Title(TitleCue::Restart)),
        );
        self.track(ctx, handle);
    }

    fn slide(&mut self, ctx: &mut GameContext, to: (f64, f64), next: TitleCue) {
        let handle = ctx.tween(
            &[(Prop::ShowcaseX, to.0), (Prop::ShowcaseY, to.1)],
            CAROUSEL_SLIDE_SECONDS,
            Some(Cue::Title(next)),
        );
        self.track(ctx, handle);
    }

    fn next_starter(&mut self, ctx: &mut GameContext) {
        if self.starters.is_empty() {
            return;
        }
        self.index = (self.index + 1) % self.starters.len();
        if let (Some(showcase), Some(species)) = (ctx.world.showcase.as_mut(), self.starters.get(self.index)) {
            showcase.species = species.clone();
            showcase.x = CAROUSEL_START.0;
            showcase.y = CAROUSEL_START.1;
        }
    }
}

impl State<GameContext> for TitleScreen {
    type Signal = Signal;

    fn enter(&mut self, ctx: &mut GameContext) {
        ctx.audio.play(SoundName::Title);
        let Some(species) = self.current() else {
            tracing::warn!("no starters to show on the title screen");
            return;
        };
        ctx.world.showcase = Some(Showcase {
            species: species.to_string(),
            x: CAROUSEL_START.0,
            y: CAROUSEL_START.1,
        });
        self.slide(ctx, CAROUSEL_MID, TitleCue::Hold);
        self.arm(ctx);
    }

    fn exit(&mut self, ctx: &mut GameContext) {
        ctx.audio.stop(SoundName::Title);
        for task in self.tasks.drain(..) {
            ctx.scheduler.clear(task);
        }
        ctx.world.showcase = None;
    }

    fn update(&mut self, ctx: &mut GameContext, _dt: f64) {
        if !self.leaving && ctx.input.take(Key::Enter) {
            self.leaving = true;
            tracing::info!("leaving title screen");
            ctx.push(Transition::fade(vec![StackCommand::Change(Overworld::new().into())]));
        }
    }

    fn render(&self, ctx: &GameContext, renderer: &mut dyn Renderer) {
        render_backdrop(ctx, renderer);
        renderer.draw_text(TITLE_TEXT, CANVAS_WIDTH / 2.0, 40.0, Font::Title, Color::Black, Align::Center);
        renderer.draw_text(
            PROMPT_TEXT,
            CANVAS_WIDTH / 2.0,
            CANVAS_HEIGHT - 40.0,
            Font::Medium,
            Color::Black,
            Align::Center,
        );
    }

    fn on_signal(&mut self, ctx: &mut GameContext, signal: &Signal) -> bool {
        let Cue::Title(cue) = &signal.cue else {
            return false;
        };
        match cue {
            TitleCue::SlideOn => self.slide(ctx, CAROUSEL_MID, TitleCue::Hold),
            TitleCue::Hold => {
                let handle = ctx.wait(CAROUSEL_HOLD_SECONDS, Cue::Title(TitleCue::SlideOff));
                self.track(ctx, handle);
            }
            TitleCue::SlideOff => self.slide(ctx, CAROUSEL_END, TitleCue::Reset),
            TitleCue::Reset => self.next_starter(ctx),
            TitleCue::Restart => self.arm(ctx),
        }
        true
    }
}
