//! Drawing the calendar grid onto a page surface.

mod grid;
mod pdf;
mod surface;

#[cfg(test)]
pub(crate) mod recording;

pub use grid::{GridRenderer, RenderOptions, RowFill, row_fill};
pub use pdf::PdfSurface;
pub use surface::{Anchor, Font, Rgb, Surface, palette};
