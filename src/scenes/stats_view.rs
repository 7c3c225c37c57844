//! The lead party member's stat sheet.

use super::render_backdrop;
use crate::core::audio::SoundName;
use crate::core::input::Key;
use crate::core::state_stack::State;
use crate::creature::CombatUnit;
use crate::game::{GameContext, Signal};
use crate::ui::{layout, Align, Color, Drawable, Font, ImageId, Panel, Renderer};

/// Seconds between icon frames. Hurt units animate faster.
pub fn icon_period(unit: &CombatUnit) -> f64 {
    let fraction = if unit.health == 0 {
        0.0
    } else {
        unit.current_health as f64 / unit.health as f64
    };
    1.0 - fraction + 0.2
}

#[derive(Debug, Default)]
pub struct StatsView {
    frame: usize,
    elapsed: f64,
}

impl StatsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame(&self) -> usize {
        self.frame
    }
}

impl State<GameContext> for StatsView {
    type Signal = Signal;

    fn enter(&mut self, ctx: &mut GameContext) {
        ctx.audio.play(SoundName::MenuOpen);
    }

    fn update(&mut self, ctx: &mut GameContext, dt: f64) {
        if ctx.input.take(Key::Enter) || ctx.input.take(Key::Escape) {
            ctx.pop();
            return;
        }
        let Some(lead) = ctx.world.lead() else {
            return;
        };
        self.elapsed += dt;
        let period = icon_period(lead);
        if self.elapsed >= period {
            self.elapsed -= period;
            self.frame = 1 - self.frame;
        }
    }

    fn render(&self, ctx: &GameContext, renderer: &mut dyn Renderer) {
        render_backdrop(ctx, renderer);
        let panel = Panel::new(layout::CREATURE_STATS);
        panel.render(renderer);
        let Some(unit) = ctx.world.lead() else {
            return;
        };

        let rect = panel.bounds();
        let icon = ImageId::Icon {
            species: unit.name.clone(),
            frame: self.frame,
        };
        renderer.draw_image(&icon, rect.x + 20.0, rect.y + 20.0, 1.0);
        renderer.draw_text(&unit.name, rect.x + 100.0, rect.y + 30.0, Font::Large, Color::Black, Align::Left);
        renderer.draw_text(
            &format!("Lv{}", unit.level),
            rect.right() - 20.0,
            rect.y + 30.0,
            Font::Large,
            Color::Black,
            Align::Right,
        );

        let lines = [
            format!("Health: {}", unit.health_meter()),
            format!("Experience: {}", unit.experience_meter()),
            format!("Attack: {}", unit.attack),
            format!("Defense: {}", unit.defense),
            format!("Speed: {}", unit.speed),
        ];
        for (row, line) in lines.iter().enumerate() {
            renderer.draw_text(
                line,
                rect.x + 20.0,
                rect.y + 100.0 + row as f64 * Font::Medium.line_height(),
                Font::Medium,
                Color::Black,
                Align::Left,
            );
        }
    }
}
