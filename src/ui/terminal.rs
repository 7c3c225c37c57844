//! Canvas renderer backed by a ratatui buffer.
//!
//! Canvas pixels are scaled onto terminal cells; images become glyphs and
//! framed labels. Anything that falls outside the target area is clipped.

use super::{Align, CanvasRect, Color, Font, ImageId, Renderer};
use crate::core::constants::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::creature::Stance;
use crate::game::map::{Direction, Tile};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
};

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f64 = 2.0;

/// Largest area inside `area` that keeps the canvas proportions, centered.
pub fn fit_canvas(area: Rect) -> Rect {
    let ratio = CANVAS_WIDTH / CANVAS_HEIGHT * CELL_ASPECT;
    let mut height = area.height as f64;
    let mut width = height * ratio;
    if width > area.width as f64 {
        width = area.width as f64;
        height = width / ratio;
    }
    let width = width.floor().max(1.0) as u16;
    let height = height.floor().max(1.0) as u16;
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

pub struct TerminalRenderer<'a> {
    buf: &'a mut Buffer,
    area: Rect,
}

impl<'a> TerminalRenderer<'a> {
    pub fn new(buf: &'a mut Buffer, area: Rect) -> Self {
        // Never address cells the buffer doesn't own.
        let area = area.intersection(buf.area);
        Self { buf, area }
    }

    fn col(&self, x: f64) -> i32 {
        self.area.x as i32 + (x / CANVAS_WIDTH * self.area.width as f64).floor() as i32
    }

    fn row(&self, y: f64) -> i32 {
        self.area.y as i32 + (y / CANVAS_HEIGHT * self.area.height as f64).floor() as i32
    }

    /// Cell span of a canvas rectangle, at least one cell each way.
    fn cells(&self, rect: CanvasRect) -> (i32, i32, i32, i32) {
        let left = self.col(rect.x);
        let top = self.row(rect.y);
        let right = self.col(rect.right()).max(left + 1);
        let bottom = self.row(rect.bottom()).max(top + 1);
        (left, top, right, bottom)
    }

    fn contains(&self, col: i32, row: i32) -> bool {
        col >= self.area.left() as i32
            && col < self.area.right() as i32
            && row >= self.area.top() as i32
            && row < self.area.bottom() as i32
    }

    fn put(&mut self, col: i32, row: i32, symbol: &str, style: Style) {
        if self.contains(col, row) {
            self.buf
                .get_mut(col as u16, row as u16)
                .set_symbol(symbol)
                .set_style(style);
        }
    }

    fn put_str(&mut self, col: i32, row: i32, text: &str, style: Style) {
        let mut buf = [0u8; 4];
        for (offset, ch) in text.chars().enumerate() {
            self.put(col + offset as i32, row, ch.encode_utf8(&mut buf), style);
        }
    }

    fn fill(&mut self, (left, top, right, bottom): (i32, i32, i32, i32), symbol: &str, style: Style) {
        for row in top..bottom {
            for col in left..right {
                self.put(col, row, symbol, style);
            }
        }
    }

    fn frame(&mut self, (left, top, right, bottom): (i32, i32, i32, i32), style: Style) {
        if right - left < 2 || bottom - top < 2 {
            return;
        }
        for col in left + 1..right - 1 {
            self.put(col, top, "─", style);
            self.put(col, bottom - 1, "─", style);
        }
        for row in top + 1..bottom - 1 {
            self.put(left, row, "│", style);
            self.put(right - 1, row, "│", style);
        }
        self.put(left, top, "╭", style);
        self.put(right - 1, top, "╮", style);
        self.put(left, bottom - 1, "╰", style);
        self.put(right - 1, bottom - 1, "╯", style);
    }

    fn dimmed(style: Style, alpha: f64) -> Style {
        if alpha < 1.0 {
            style.fg(Color::DarkGray).add_modifier(Modifier::DIM)
        } else {
            style
        }
    }
}

fn tile_glyph(tile: Tile) -> (&'static str, Style) {
    match tile {
        Tile::Wall => ("█", Style::default().fg(Color::DarkGray)),
        Tile::Floor => ("·", Style::default().fg(Color::Gray)),
        Tile::Grass => ("\"", Style::default().fg(Color::Green)),
    }
}

fn trainer_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "▲",
        Direction::Down => "▼",
        Direction::Left => "◀",
        Direction::Right => "▶",
    }
}

impl Renderer for TerminalRenderer<'_> {
    fn draw_image(&mut self, image: &ImageId, x: f64, y: f64, alpha: f64) {
        let (width, height) = image.size();
        let cells = self.cells(CanvasRect::new(x, y, width, height));
        let (left, top, right, bottom) = cells;
        match image {
            ImageId::BattleBackground => {
                self.fill(cells, " ", Style::default().bg(Color::Rgb(232, 240, 216)));
            }
            ImageId::TitleBackground => {
                self.fill(cells, " ", Style::default().bg(Color::Rgb(24, 40, 88)));
            }
            ImageId::BattlePlatform => {
                let style = Style::default().fg(Color::Rgb(120, 168, 96));
                for col in left..right {
                    self.put(col, bottom - 1, "▀", style);
                }
            }
            ImageId::Tile(tile) => {
                let (glyph, style) = tile_glyph(*tile);
                self.fill(cells, glyph, style);
            }
            ImageId::Trainer(direction) => {
                let style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
                self.put((left + right - 1) / 2, (top + bottom - 1) / 2, trainer_glyph(*direction), style);
            }
            ImageId::Creature { species, stance } => {
                let colour = match stance {
                    Stance::Front => Color::Red,
                    Stance::Back => Color::Blue,
                };
                let style = Self::dimmed(Style::default().fg(colour), alpha);
                self.frame(cells, style);
                let label = species.to_uppercase();
                let col = (left + right) / 2 - label.chars().count() as i32 / 2;
                self.put_str(col, (top + bottom) / 2, &label, style.add_modifier(Modifier::BOLD));
            }
            ImageId::Icon { species, frame } => {
                let initial: String = species.chars().take(1).collect();
                let row = (top + bottom) / 2 - (*frame as i32 % 2);
                let style = Self::dimmed(Style::default().fg(Color::Magenta), alpha);
                self.put_str((left + right) / 2, row, &initial, style.add_modifier(Modifier::BOLD));
            }
        }
    }

    fn draw_rounded_rect(&mut self, rect: CanvasRect, _radius: f64, fill: Color, stroke: Option<Color>) {
        let cells = self.cells(rect);
        self.fill(cells, " ", Style::default().bg(fill));
        if let Some(stroke) = stroke {
            self.frame(cells, Style::default().fg(stroke).bg(fill));
        }
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64, font: Font, color: Color, align: Align) {
        let length = text.chars().count() as i32;
        let anchor = self.col(x);
        let col = match align {
            Align::Left => anchor,
            Align::Center => anchor - length / 2,
            Align::Right => anchor - length,
        };
        let mut style = Style::default().fg(color);
        if matches!(font, Font::Large | Font::Title) {
            style = style.add_modifier(Modifier::BOLD);
        }
        // Canvas y is the top of the text; keep it on the first row it covers.
        let row = self.row(y + 1.0);
        self.put_str(col, row, text, style);
    }

    fn fill_rect(&mut self, rect: CanvasRect, color: Color, alpha: f64) {
        if alpha <= 0.05 {
            return;
        }
        let cells = self.cells(rect);
        if alpha >= 0.5 {
            self.fill(cells, " ", Style::default().bg(color).fg(color));
        } else {
            let (left, top, right, bottom) = cells;
            for row in top..bottom {
                for col in left..right {
                    if self.contains(col, row) {
                        self.buf
                            .get_mut(col as u16, row as u16)
                            .set_style(Style::default().add_modifier(Modifier::DIM));
                    }
                }
            }
        }
    }
}
