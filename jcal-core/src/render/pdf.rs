//! PDF output via lopdf using the standard Helvetica fonts.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, dictionary};

use super::surface::{Anchor, Font, Rgb, Surface};
use crate::error::JcalResult;

/// Helvetica advance widths for WinAnsi codes 32..=126, in 1/1000 em.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0..9
    278, 278, 584, 584, 584, 556, 1015, // :..@
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A..M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N..Z
    278, 278, 278, 469, 556, 333, // [..`
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a..m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n..z
    334, 260, 334, 584, // {..~
];

const DEFAULT_WIDTH: u16 = 556;

impl Font {
    fn resource_name(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
            Font::Italic => "F3",
        }
    }

    fn base_font(self) -> &'static str {
        match self {
            Font::Regular => "Helvetica",
            Font::Bold => "Helvetica-Bold",
            Font::Italic => "Helvetica-Oblique",
        }
    }
}

/// Map a char to its WinAnsiEncoding byte; unmapped chars become '?'.
fn win_ansi(c: char) -> u8 {
    match c {
        ' '..='~' => c as u8,
        '\u{a0}'..='\u{ff}' => c as u32 as u8,
        '€' => 0x80,
        '‚' => 0x82,
        '„' => 0x84,
        '…' => 0x85,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '\t' | '\n' | '\r' => b' ',
        _ => b'?',
    }
}

fn encode(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi).collect()
}

/// Width of one encoded byte. Accented Latin-1 letters use the width of a
/// plain lowercase/uppercase letter.
fn glyph_width(byte: u8) -> u16 {
    match byte {
        32..=126 => HELVETICA_WIDTHS[(byte - 32) as usize],
        0xc0..=0xde => 722,
        0xdf => 611,
        _ => DEFAULT_WIDTH,
    }
}

/// Rendered width of `text` in points.
pub fn text_width(text: &str, size: f32) -> f32 {
    let units: u32 = encode(text).into_iter().map(|b| u32::from(glyph_width(b))).sum();
    units as f32 * size / 1000.0
}

/// A multi-page PDF document under construction.
pub struct PdfSurface {
    doc: Document,
    pages_id: ObjectId,
    resources_id: ObjectId,
    page_ids: Vec<ObjectId>,
    operations: Vec<Operation>,
    width: f32,
    height: f32,
    font: Font,
    font_size: f32,
}

impl PdfSurface {
    /// An empty document whose pages are `width` × `height` points.
    pub fn new(width: f32, height: f32) -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut fonts = lopdf::Dictionary::new();
        for font in [Font::Regular, Font::Bold, Font::Italic] {
            let font_id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(font.resource_name(), font_id);
        }
        let resources_id = doc.add_object(dictionary! {
            "Font" => fonts,
        });

        PdfSurface {
            doc,
            pages_id,
            resources_id,
            page_ids: Vec::new(),
            operations: Vec::new(),
            width,
            height,
            font: Font::Regular,
            font_size: 10.0,
        }
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.operations.push(Operation::new(operator, operands));
    }

    /// Close the page tree and serialize the document.
    pub fn finish(mut self) -> JcalResult<Vec<u8>> {
        if !self.operations.is_empty() {
            self.show_page()?;
        }

        let kids: Vec<Object> = self.page_ids.iter().map(|id| (*id).into()).collect();
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => self.page_ids.len() as i64,
            "Resources" => self.resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                self.width.into(),
                self.height.into(),
            ],
        };
        self.doc.objects.insert(self.pages_id, Object::Dictionary(pages));

        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);
        self.doc.compress();

        let mut bytes = Vec::new();
        self.doc.save_to(&mut bytes)?;
        Ok(bytes)
    }
}

impl Surface for PdfSurface {
    fn set_font(&mut self, font: Font, size: f32) {
        self.font = font;
        self.font_size = size;
    }

    fn set_fill_color(&mut self, color: Rgb) {
        self.push("rg", vec![color.r.into(), color.g.into(), color.b.into()]);
    }

    fn set_stroke_color(&mut self, color: Rgb) {
        self.push("RG", vec![color.r.into(), color.g.into(), color.b.into()]);
    }

    fn set_line_width(&mut self, width: f32) {
        self.push("w", vec![width.into()]);
    }

    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32, stroke: bool, fill: bool) {
        self.push("re", vec![x.into(), y.into(), width.into(), height.into()]);
        let paint = match (stroke, fill) {
            (true, true) => "B",
            (false, true) => "f",
            (true, false) => "S",
            (false, false) => "n",
        };
        self.push(paint, vec![]);
    }

    fn text(&mut self, x: f32, y: f32, text: &str, anchor: Anchor) {
        let width = text_width(text, self.font_size);
        let x = match anchor {
            Anchor::Left => x,
            Anchor::Center => x - width / 2.0,
            Anchor::Right => x - width,
        };
        self.push("BT", vec![]);
        self.push(
            "Tf",
            vec![self.font.resource_name().into(), self.font_size.into()],
        );
        self.push("Td", vec![x.into(), y.into()]);
        self.push("Tj", vec![Object::string_literal(encode(text))]);
        self.push("ET", vec![]);
    }

    fn show_page(&mut self) -> JcalResult<()> {
        let operations = std::mem::take(&mut self.operations);
        let content = Content {
            operations,
        };
        let content_id = self
            .doc
            .add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "Contents" => content_id,
        });
        self.page_ids.push(page_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_width_uses_helvetica_metrics() {
        // "10" = two digits at 556/1000 em
        assert!((text_width("10", 10.0) - 11.12).abs() < 0.001);
        assert!(text_width("MW", 10.0) > text_width("il", 10.0));
        assert_eq!(text_width("ä", 10.0), text_width("a", 10.0));
    }

    #[test]
    fn test_win_ansi_encoding() {
        assert_eq!(encode("März"), vec![b'M', 0xe4, b'r', b'z']);
        assert_eq!(encode("5 €"), vec![b'5', b' ', 0x80]);
        assert_eq!(encode("日"), vec![b'?']);
    }

    #[test]
    fn test_pdf_has_two_pages() {
        let mut surface = PdfSurface::new(1190.55, 841.89);
        surface.set_font(Font::Bold, 14.0);
        surface.text(10.0, 10.0, "Seite 1", Anchor::Left);
        surface.show_page().unwrap();
        surface.set_fill_color(Rgb::gray(0.5));
        surface.rect(10.0, 10.0, 100.0, 50.0, true, true);
        surface.show_page().unwrap();

        let bytes = surface.finish().unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }
}
