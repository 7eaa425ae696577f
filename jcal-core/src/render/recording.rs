//! A surface that records drawing calls for assertions.

use super::surface::{Anchor, Font, Rgb, Surface};
use crate::error::JcalResult;

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        stroke: bool,
        fill: Option<Rgb>,
    },
    Text {
        x: f32,
        y: f32,
        text: String,
        anchor: Anchor,
        font: Font,
        size: f32,
    },
    ShowPage,
}

#[derive(Debug)]
pub struct RecordingSurface {
    pub ops: Vec<Op>,
    fill: Rgb,
    font: Font,
    size: f32,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        RecordingSurface {
            ops: Vec::new(),
            fill: Rgb::gray(0.0),
            font: Font::Regular,
            size: 10.0,
        }
    }
}

impl RecordingSurface {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            Op::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Fill color of the first filled rectangle whose bottom-left corner is
    /// at (x, y).
    pub fn fill_at(&self, x: f32, y: f32) -> Option<Rgb> {
        self.ops.iter().find_map(|op| match op {
            Op::Rect {
                x: rx,
                y: ry,
                fill: Some(color),
                ..
            } if (rx - x).abs() < 0.01 && (ry - y).abs() < 0.01 => Some(*color),
            _ => None,
        })
    }

    pub fn pages(&self) -> usize {
        self.ops.iter().filter(|op| **op == Op::ShowPage).count()
    }
}

impl Surface for RecordingSurface {
    fn set_font(&mut self, font: Font, size: f32) {
        self.font = font;
        self.size = size;
    }

    fn set_fill_color(&mut self, color: Rgb) {
        self.fill = color;
    }

    fn set_stroke_color(&mut self, _color: Rgb) {}

    fn set_line_width(&mut self, _width: f32) {}

    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32, stroke: bool, fill: bool) {
        self.ops.push(Op::Rect {
            x,
            y,
            width,
            height,
            stroke,
            fill: fill.then_some(self.fill),
        });
    }

    fn text(&mut self, x: f32, y: f32, text: &str, anchor: Anchor) {
        self.ops.push(Op::Text {
            x,
            y,
            text: text.to_string(),
            anchor,
            font: self.font,
            size: self.size,
        });
    }

    fn show_page(&mut self) -> JcalResult<()> {
        self.ops.push(Op::ShowPage);
        Ok(())
    }
}
