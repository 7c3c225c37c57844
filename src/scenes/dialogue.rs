use super::render_backdrop;
use crate::core::input::Key;
use crate::core::state_stack::State;
use crate::game::{Cue, GameContext, Signal};
use crate::ui::{CanvasRect, Drawable, Font, Renderer, Textbox};

/// A modal text box. Enter pages through it; after the last page it pops
/// itself and raises its cue.
#[derive(Debug)]
pub struct Dialogue {
    text: String,
    textbox: Textbox,
    on_close: Option<Cue>,
}

impl Dialogue {
    pub fn new(text: &str, rect: CanvasRect, on_close: Option<Cue>) -> Self {
        Self {
            text: text.to_string(),
            textbox: Textbox::new(rect, text),
            on_close,
        }
    }

    /// Re-lays the text in another font, e.g. to fit a narrow box.
    pub fn with_font(mut self, font: Font) -> Self {
        self.textbox = Textbox::with_font(self.textbox.bounds(), &self.text, font);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl State<GameContext> for Dialogue {
    type Signal = Signal;

    fn update(&mut self, ctx: &mut GameContext, _dt: f64) {
        if ctx.input.take(Key::Enter) && self.textbox.advance() {
            ctx.pop();
            if let Some(cue) = self.on_close.take() {
                ctx.signal(cue);
            }
        }
    }

    fn render(&self, ctx: &GameContext, renderer: &mut dyn Renderer) {
        render_backdrop(ctx, renderer);
        self.textbox.render(renderer);
    }
}
