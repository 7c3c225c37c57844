//! A line of battle text in the bottom box.
//!
//! With no wait the message closes on Enter; otherwise it closes itself when
//! its timer runs out. Closing pops the message and then raises its cue.

use super::session::upkeep;
use crate::core::input::Key;
use crate::core::scheduler::TaskHandle;
use crate::core::state_stack::State;
use crate::game::{Cue, GameContext, Signal};
use crate::scenes::render_backdrop;
use crate::ui::{layout, Drawable, Renderer, Textbox};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageCue {
    /// The message's wait ran out
    Expired,
}

#[derive(Debug)]
pub struct BattleMessage {
    text: String,
    textbox: Textbox,
    wait: f64,
    on_close: Option<Cue>,
    timer: Option<TaskHandle>,
}

impl BattleMessage {
    pub fn new(text: impl Into<String>, wait: f64, on_close: Option<Cue>) -> Self {
        let text = text.into();
        Self {
            textbox: Textbox::new(layout::BOTTOM_DIALOGUE, &text),
            text,
            wait,
            on_close,
            timer: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_timed(&self) -> bool {
        self.wait > 0.0
    }

    fn close(&mut self, ctx: &mut GameContext) {
        ctx.pop();
        if let Some(cue) = self.on_close.take() {
            ctx.signal(cue);
        }
    }
}

impl State<GameContext> for BattleMessage {
    type Signal = Signal;

    fn enter(&mut self, ctx: &mut GameContext) {
        if self.is_timed() {
            self.timer = Some(ctx.wait(self.wait, Cue::Message(MessageCue::Expired)));
        }
    }

    fn exit(&mut self, ctx: &mut GameContext) {
        if let Some(timer) = self.timer.take() {
            ctx.scheduler.clear(timer);
        }
    }

    fn update(&mut self, ctx: &mut GameContext, _dt: f64) {
        upkeep(ctx);
        if !self.is_timed() && ctx.input.take(Key::Enter) && self.textbox.advance() {
            self.close(ctx);
        }
    }

    fn render(&self, ctx: &GameContext, renderer: &mut dyn Renderer) {
        render_backdrop(ctx, renderer);
        self.textbox.render(renderer);
    }

    fn on_signal(&mut self, ctx: &mut GameContext, signal: &Signal) -> bool {
        let own_timer = self.timer.is_some() && signal.source == self.timer;
        if signal.cue != Cue::Message(MessageCue::Expired) || !own_timer {
            return false;
        }
        self.timer = None;
        self.close(ctx);
        true
    }
}
