//! Panels, bars, text boxes and menus.
//!
//! Widgets combine by containment: a health bar holds a progress bar, a text
//! box and a menu each hold a panel. The shared capability is [`Drawable`].

use super::{Align, CanvasRect, Color, Font, Renderer};
use crate::core::audio::{Jukebox, SoundName};
use crate::core::input::{Input, Key};

const PANEL_RADIUS: f64 = 8.0;
const PANEL_PADDING: f64 = 16.0;
const BAR_RADIUS: f64 = 4.0;
pub const BAR_WIDTH: f64 = 160.0;
pub const BAR_HEIGHT: f64 = 8.0;

/// Something with a position and size that can draw itself.
pub trait Drawable {
    fn bounds(&self) -> CanvasRect;
    fn render(&self, renderer: &mut dyn Renderer);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Panel {
    pub rect: CanvasRect,
}

impl Panel {
    pub fn new(rect: CanvasRect) -> Self {
        Self { rect }
    }
}

impl Drawable for Panel {
    fn bounds(&self) -> CanvasRect {
        self.rect
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        renderer.draw_rounded_rect(self.rect, PANEL_RADIUS, Color::White, Some(Color::DarkGray));
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressBar {
    pub rect: CanvasRect,
    pub value: f64,
    pub max: f64,
    pub color: Color,
}

impl ProgressBar {
    pub fn new(x: f64, y: f64, value: f64, max: f64, color: Color) -> Self {
        Self {
            rect: CanvasRect::new(x, y, BAR_WIDTH, BAR_HEIGHT),
            value,
            max,
            color,
        }
    }

    pub fn fraction(&self) -> f64 {
        if self.max <= 0.0 {
            return 0.0;
        }
        (self.value / self.max).clamp(0.0, 1.0)
    }
}

impl Drawable for ProgressBar {
    fn bounds(&self) -> CanvasRect {
        self.rect
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        renderer.draw_rounded_rect(self.rect, BAR_RADIUS, Color::Black, None);
        let inner = self.rect.inset(1.0);
        renderer.draw_rounded_rect(inner, BAR_RADIUS, Color::White, None);
        if self.value > 0.0 {
            let filled = CanvasRect {
                width: inner.width * self.fraction(),
                ..inner
            };
            renderer.draw_rounded_rect(filled, BAR_RADIUS, self.color, None);
        }
    }
}

/// Green above half, yellow at half or less, red at a quarter or less.
pub fn health_colour(value: f64, max: f64) -> Color {
    if value <= max / 4.0 {
        Color::Red
    } else if value <= max / 2.0 {
        Color::Yellow
    } else {
        Color::Green
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthBar {
    pub bar: ProgressBar,
}

impl HealthBar {
    pub fn new(x: f64, y: f64, value: f64, max: f64) -> Self {
        Self {
            bar: ProgressBar::new(x, y, value, max, health_colour(value, max)),
        }
    }
}

impl Drawable for HealthBar {
    fn bounds(&self) -> CanvasRect {
        self.bar.bounds()
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        self.bar.render(renderer);
    }
}

/// Greedy word wrap. Explicit newlines always break.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let needed = if line.is_empty() {
                word.chars().count()
            } else {
                line.chars().count() + 1 + word.chars().count()
            };
            if needed > max_chars && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        lines.push(line);
    }
    lines
}

/// A panel of wrapped text, shown a page at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct Textbox {
    panel: Panel,
    font: Font,
    pages: Vec<Vec<String>>,
    page: usize,
    closed: bool,
}

impl Textbox {
    pub fn new(rect: CanvasRect, text: &str) -> Self {
        Self::with_font(rect, text, Font::Medium)
    }

    pub fn with_font(rect: CanvasRect, text: &str, font: Font) -> Self {
        let inner = rect.inset(PANEL_PADDING);
        let max_chars = (inner.width / font.advance()).floor() as usize;
        let per_page = ((inner.height / font.line_height()).floor() as usize).max(1);

        // Blank lines only separate paragraphs; they never start a page.
        let mut pages: Vec<Vec<String>> = Vec::new();
        let mut current = Vec::new();
        for line in wrap_text(text, max_chars) {
            if line.is_empty() && current.is_empty() {
                continue;
            }
            current.push(line);
            if current.len() == per_page {
                pages.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() || pages.is_empty() {
            pages.push(current);
        }

        Self {
            panel: Panel::new(rect),
            font,
            pages,
            page: 0,
            closed: false,
        }
    }

    /// Shows the next page, or closes after the last one.
    /// Returns true once the box is closed.
    pub fn advance(&mut self) -> bool {
        if self.page + 1 < self.pages.len() {
            self.page += 1;
        } else {
            self.closed = true;
        }
        self.closed
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn current_page(&self) -> &[String] {
        self.pages.get(self.page).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl Drawable for Textbox {
    fn bounds(&self) -> CanvasRect {
        self.panel.bounds()
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        self.panel.render(renderer);
        let inner = self.panel.rect.inset(PANEL_PADDING);
        for (row, line) in self.current_page().iter().enumerate() {
            renderer.draw_text(
                line,
                inner.x,
                inner.y + row as f64 * self.font.line_height(),
                self.font,
                Color::Black,
                Align::Left,
            );
        }
    }
}

/// Vertical list of choices with a cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct Menu {
    panel: Panel,
    items: Vec<String>,
    selected: usize,
}

impl Menu {
    pub fn new(rect: CanvasRect, items: &[&str]) -> Self {
        Self {
            panel: Panel::new(rect),
            items: items.iter().map(|item| item.to_string()).collect(),
            selected: 0,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Moves the cursor on Up/Down and returns the chosen index on Enter.
    pub fn navigate(&mut self, input: &mut Input, audio: &mut Jukebox) -> Option<usize> {
        if self.items.is_empty() {
            return None;
        }
        if input.take(Key::Up) {
            self.selected = (self.selected + self.items.len() - 1) % self.items.len();
            audio.play(SoundName::SelectionMove);
        } else if input.take(Key::Down) {
            self.selected = (self.selected + 1) % self.items.len();
            audio.play(SoundName::SelectionMove);
        }
        if input.take(Key::Enter) {
            audio.play(SoundName::SelectionChoice);
            return Some(self.selected);
        }
        None
    }
}

impl Drawable for Menu {
    fn bounds(&self) -> CanvasRect {
        self.panel.bounds()
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        self.panel.render(renderer);
        let inner = self.panel.rect.inset(PANEL_PADDING);
        let spacing = inner.height / self.items.len().max(1) as f64;
        for (index, item) in self.items.iter().enumerate() {
            let y = inner.y + index as f64 * spacing;
            if index == self.selected {
                renderer.draw_text("▶", inner.x, y, Font::Medium, Color::Black, Align::Left);
            }
            renderer.draw_text(item, inner.x + 20.0, y, Font::Medium, Color::Black, Align::Left);
        }
    }
}
