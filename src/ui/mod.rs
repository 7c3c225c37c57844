//! Drawing surface and widgets.
//!
//! Everything draws onto a virtual 480x352 canvas through the [`Renderer`]
//! trait. The terminal frontend scales that canvas into a ratatui buffer;
//! tests use [`RecordingRenderer`] to look at what was drawn.

#![allow(unused_imports)]

pub mod recording;
pub mod terminal;
pub mod widgets;

pub use recording::*;
pub use terminal::*;
pub use widgets::*;

use crate::core::constants::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::creature::Stance;
use crate::game::map::{Direction, Tile};
pub use ratatui::style::Color;

/// A rectangle in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CanvasRect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Shrinks the rectangle by `by` on every side.
    pub fn inset(&self, by: f64) -> Self {
        Self::new(
            self.x + by,
            self.y + by,
            (self.width - 2.0 * by).max(0.0),
            (self.height - 2.0 * by).max(0.0),
        )
    }
}

/// Panel placements on the canvas
pub mod layout {
    use super::CanvasRect;

    pub const FULL_SCREEN: CanvasRect = CanvasRect::new(0.0, 0.0, 480.0, 352.0);
    pub const TOP_DIALOGUE: CanvasRect = CanvasRect::new(0.0, 0.0, 480.0, 192.0);
    pub const BOTTOM_DIALOGUE: CanvasRect = CanvasRect::new(0.0, 256.0, 480.0, 96.0);
    pub const LEVEL_UP_DIALOGUE: CanvasRect = CanvasRect::new(272.0, 96.0, 208.0, 160.0);
    pub const BATTLE_MENU: CanvasRect = CanvasRect::new(336.0, 256.0, 144.0, 96.0);
    pub const BATTLE_PLAYER: CanvasRect = CanvasRect::new(270.0, 165.0, 210.0, 90.0);
    pub const BATTLE_OPPONENT: CanvasRect = CanvasRect::new(45.0, 30.0, 190.0, 60.0);
    pub const CREATURE_STATS: CanvasRect = CanvasRect::new(40.0, 16.0, 400.0, 240.0);

    pub const PLAYER_PLATFORM: (f64, f64) = (0.0, 200.0);
    pub const OPPONENT_PLATFORM: (f64, f64) = (215.0, 80.0);
}

/// Images the game knows how to draw.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageId {
    BattleBackground,
    BattlePlatform,
    TitleBackground,
    Trainer(Direction),
    Tile(Tile),
    Creature { species: String, stance: Stance },
    /// Stats view icon, two animation frames
    Icon { species: String, frame: usize },
}

impl ImageId {
    /// Nominal size in canvas pixels.
    pub fn size(&self) -> (f64, f64) {
        match self {
            ImageId::BattleBackground | ImageId::TitleBackground => (CANVAS_WIDTH, CANVAS_HEIGHT),
            ImageId::BattlePlatform => (256.0, 64.0),
            ImageId::Trainer(_) | ImageId::Tile(_) => (32.0, 32.0),
            ImageId::Creature { .. } => (160.0, 160.0),
            ImageId::Icon { .. } => (64.0, 64.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Small,
    Medium,
    Large,
    Title,
}

impl Font {
    /// Average glyph advance in canvas pixels, used for wrapping.
    pub fn advance(self) -> f64 {
        match self {
            Font::Small => 9.0,
            Font::Medium => 12.0,
            Font::Large => 20.0,
            Font::Title => 40.0,
        }
    }

    pub fn line_height(self) -> f64 {
        match self {
            Font::Small => 14.0,
            Font::Medium => 22.0,
            Font::Large => 32.0,
            Font::Title => 80.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// The drawing primitives the game needs.
pub trait Renderer {
    fn draw_image(&mut self, image: &ImageId, x: f64, y: f64, alpha: f64);

    fn draw_rounded_rect(&mut self, rect: CanvasRect, radius: f64, fill: Color, stroke: Option<Color>);

    fn draw_text(&mut self, text: &str, x: f64, y: f64, font: Font, color: Color, align: Align);

    /// Solid fill with opacity, used for full-screen fades.
    fn fill_rect(&mut self, rect: CanvasRect, color: Color, alpha: f64);
}
