//! The drawing primitives the grid renderer needs.

use crate::error::JcalResult;

/// RGB color with components in 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Rgb { r, g, b }
    }

    /// From 0..=255 channel values.
    pub const fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Rgb::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    pub const fn gray(level: f32) -> Self {
        Rgb::new(level, level, level)
    }
}

/// Colors of the year calendar.
pub mod palette {
    use super::Rgb;

    pub const BLACK: Rgb = Rgb::gray(0.0);
    pub const WHITE: Rgb = Rgb::gray(1.0);
    pub const MONTH_HEADER: Rgb = Rgb::from_u8(153, 204, 255);
    pub const SUNDAY_OR_HOLIDAY: Rgb = Rgb::from_u8(255, 224, 104);
    pub const SATURDAY: Rgb = Rgb::from_u8(255, 235, 153);
    pub const VACATION: Rgb = Rgb::from_u8(218, 255, 163);
    pub const FILLER: Rgb = Rgb::gray(0.81);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
    Italic,
}

/// Which point of the text the x coordinate refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Left,
    Center,
    Right,
}

/// A page-oriented 2-D drawing target. Coordinates are PDF points with the
/// origin at the bottom left.
pub trait Surface {
    fn set_font(&mut self, font: Font, size: f32);

    /// Fill color, also used for text.
    fn set_fill_color(&mut self, color: Rgb);

    fn set_stroke_color(&mut self, color: Rgb);

    fn set_line_width(&mut self, width: f32);

    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32, stroke: bool, fill: bool);

    /// Draw `text` with its baseline at `y`, positioned by `anchor` at `x`.
    fn text(&mut self, x: f32, y: f32, text: &str, anchor: Anchor);

    /// Close the current page and start a new one.
    fn show_page(&mut self) -> JcalResult<()>;
}
