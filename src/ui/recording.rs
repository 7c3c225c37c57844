//! Renderer that records draw calls instead of drawing.

use super::{Align, CanvasRect, Color, Font, ImageId, Renderer};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Image {
        image: ImageId,
        x: f64,
        y: f64,
        alpha: f64,
    },
    RoundedRect {
        rect: CanvasRect,
        radius: f64,
        fill: Color,
        stroke: Option<Color>,
    },
    Text {
        text: String,
        x: f64,
        y: f64,
        font: Font,
        color: Color,
        align: Align,
    },
    Fill {
        rect: CanvasRect,
        color: Color,
        alpha: f64,
    },
}

#[derive(Debug, Default)]
pub struct RecordingRenderer {
    calls: Vec<DrawCall>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Every string drawn, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|text| text.contains(needle))
    }

    pub fn images(&self) -> Vec<&ImageId> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Image { image, .. } => Some(image),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn draw_image(&mut self, image: &ImageId, x: f64, y: f64, alpha: f64) {
        self.calls.push(DrawCall::Image {
            image: image.clone(),
            x,
            y,
            alpha,
        });
    }

    fn draw_rounded_rect(&mut self, rect: CanvasRect, radius: f64, fill: Color, stroke: Option<Color>) {
        self.calls.push(DrawCall::RoundedRect {
            rect,
            radius,
            fill,
            stroke,
        });
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64, font: Font, color: Color, align: Align) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            x,
            y,
            font,
            color,
            align,
        });
    }

    fn fill_rect(&mut self, rect: CanvasRect, color: Color, alpha: f64) {
        self.calls.push(DrawCall::Fill { rect, color, alpha });
    }
}
