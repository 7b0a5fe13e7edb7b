//! Cursor-based page layout over printpdf.
//!
//! printpdf positions everything absolutely from the bottom-left corner;
//! [`DocumentWriter`] keeps a top-down cursor, wraps text to the content
//! width, and starts a fresh page whenever the next element would cross
//! the bottom margin.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};
use vt_core::text::wrap_words;

use crate::ExportError;

pub(crate) const PAGE_WIDTH_MM: f64 = 210.0;
pub(crate) const PAGE_HEIGHT_MM: f64 = 297.0;
pub(crate) const MARGIN_SIDE_MM: f64 = 25.4;
pub(crate) const MARGIN_TOP_MM: f64 = 25.4;
pub(crate) const MARGIN_BOTTOM_MM: f64 = 12.7;
pub(crate) const CONTENT_WIDTH_MM: f64 = PAGE_WIDTH_MM - 2.0 * MARGIN_SIDE_MM;

/// Images fit a 6 in × 4 in content box, aspect ratio preserved.
pub(crate) const IMAGE_MAX_WIDTH_PT: f64 = 6.0 * 72.0;
pub(crate) const IMAGE_MAX_HEIGHT_PT: f64 = 4.0 * 72.0;

pub(crate) const PT_TO_MM: f64 = 25.4 / 72.0;

/// Rough average glyph width for Helvetica, as a fraction of font size.
/// Good enough for wrapping and centering; exact metrics are not worth
/// carrying for these documents.
const AVG_GLYPH_WIDTH: f64 = 0.5;

/// Scale factor fitting an image into the content box.
///
/// `min(width_budget / width, height_budget / height)` -- the image keeps
/// its aspect ratio, and small images are scaled up to fill the box.
pub(crate) fn image_scale(width_px: u32, height_px: u32) -> f64 {
    let width_ratio = IMAGE_MAX_WIDTH_PT / width_px as f64;
    let height_ratio = IMAGE_MAX_HEIGHT_PT / height_px as f64;
    width_ratio.min(height_ratio)
}

fn line_height_mm(font_size: f64) -> f64 {
    font_size * 1.4 * PT_TO_MM
}

fn est_text_width_mm(text: &str, font_size: f64) -> f64 {
    text.chars().count() as f64 * AVG_GLYPH_WIDTH * font_size * PT_TO_MM
}

fn chars_per_line(width_mm: f64, font_size: f64) -> usize {
    let chars = width_mm / (AVG_GLYPH_WIDTH * font_size * PT_TO_MM);
    (chars.floor() as usize).max(1)
}

pub(crate) struct Fonts {
    pub regular: IndirectFontRef,
    pub bold: IndirectFontRef,
    pub italic: IndirectFontRef,
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Font {
    Regular,
    Bold,
    Italic,
}

pub(crate) struct DocumentWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    fonts: Fonts,
    /// Cursor, in mm from the top of the current page.
    y: f64,
}

impl DocumentWriter {
    pub fn new(document_title: &str) -> Result<Self, ExportError> {
        let (doc, page, layer) = PdfDocument::new(
            document_title,
            Mm(PAGE_WIDTH_MM as f32),
            Mm(PAGE_HEIGHT_MM as f32),
            "Layer 1",
        );
        let fonts = Fonts {
            regular: add_font(&doc, BuiltinFont::Helvetica)?,
            bold: add_font(&doc, BuiltinFont::HelveticaBold)?,
            italic: add_font(&doc, BuiltinFont::HelveticaOblique)?,
        };
        let layer = doc.get_page(page).get_layer(layer);
        Ok(Self {
            doc,
            layer,
            fonts,
            y: MARGIN_TOP_MM,
        })
    }

    pub fn layer(&self) -> PdfLayerReference {
        self.layer.clone()
    }

    /// Cursor position in printpdf coordinates (mm from the page bottom).
    pub fn cursor_from_bottom(&self) -> f64 {
        PAGE_HEIGHT_MM - self.y
    }

    pub fn advance(&mut self, mm: f64) {
        self.y += mm;
    }

    /// Start a new page when `needed_mm` will not fit above the bottom
    /// margin.
    pub fn ensure_space(&mut self, needed_mm: f64) {
        if self.y + needed_mm > PAGE_HEIGHT_MM - MARGIN_BOTTOM_MM {
            self.new_page();
        }
    }

    pub fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH_MM as f32), Mm(PAGE_HEIGHT_MM as f32), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = MARGIN_TOP_MM;
    }

    /// A centered heading. Long headings wrap like paragraphs.
    pub fn heading(&mut self, text: &str, font_size: f64, font: Font) {
        let line_h = line_height_mm(font_size);
        for line in wrap_words(text, chars_per_line(CONTENT_WIDTH_MM, font_size)) {
            self.ensure_space(line_h);
            let width = est_text_width_mm(&line, font_size);
            let x = ((PAGE_WIDTH_MM - width) / 2.0).max(MARGIN_SIDE_MM);
            self.draw_line(&line, font_size, font, x);
        }
        self.advance(line_h * 0.4);
    }

    /// A left-aligned body paragraph.
    pub fn paragraph(&mut self, text: &str, font_size: f64, font: Font) {
        let line_h = line_height_mm(font_size);
        for line in wrap_words(text, chars_per_line(CONTENT_WIDTH_MM, font_size)) {
            self.ensure_space(line_h);
            self.draw_line(&line, font_size, font, MARGIN_SIDE_MM);
        }
        self.advance(line_h * 0.4);
    }

    /// A paragraph with a bold inline label, e.g. `Scene: ...`.
    pub fn labeled_paragraph(&mut self, label: &str, text: &str, font_size: f64) {
        let line_h = line_height_mm(font_size);
        let label_w = est_text_width_mm(label, font_size) + 1.5;

        // The first line shares its baseline with the label and wraps to
        // the remaining width; later lines use the full content width.
        let first_budget = chars_per_line(CONTENT_WIDTH_MM - label_w, font_size);
        let mut words = text.split_whitespace().peekable();
        let mut first_line = String::new();
        while let Some(word) = words.peek() {
            let sep = usize::from(!first_line.is_empty());
            if !first_line.is_empty()
                && first_line.chars().count() + sep + word.chars().count() > first_budget
            {
                break;
            }
            if !first_line.is_empty() {
                first_line.push(' ');
            }
            first_line.push_str(word);
            words.next();
        }

        self.ensure_space(line_h);
        let baseline = self.cursor_from_bottom() - line_h * 0.8;
        self.layer.use_text(
            label,
            font_size as f32,
            Mm(MARGIN_SIDE_MM as f32),
            Mm(baseline as f32),
            &self.fonts.bold,
        );
        self.layer.use_text(
            first_line,
            font_size as f32,
            Mm((MARGIN_SIDE_MM + label_w) as f32),
            Mm(baseline as f32),
            &self.fonts.regular,
        );
        self.advance(line_h);

        let rest = words.collect::<Vec<_>>().join(" ");
        if !rest.is_empty() {
            for line in wrap_words(&rest, chars_per_line(CONTENT_WIDTH_MM, font_size)) {
                self.ensure_space(line_h);
                self.draw_line(&line, font_size, Font::Regular, MARGIN_SIDE_MM);
            }
        }
        self.advance(line_h * 0.4);
    }

    fn draw_line(&mut self, line: &str, font_size: f64, font: Font, x: f64) {
        let line_h = line_height_mm(font_size);
        let baseline = self.cursor_from_bottom() - line_h * 0.8;
        self.layer.use_text(
            line,
            font_size as f32,
            Mm(x as f32),
            Mm(baseline as f32),
            self.font_ref(font),
        );
        self.advance(line_h);
    }

    fn font_ref(&self, font: Font) -> &IndirectFontRef {
        match font {
            Font::Regular => &self.fonts.regular,
            Font::Bold => &self.fonts.bold,
            Font::Italic => &self.fonts.italic,
        }
    }

    pub fn finish(self, path: &Path) -> Result<(), ExportError> {
        let file = File::create(path)?;
        self.doc
            .save(&mut BufWriter::new(file))
            .map_err(|e| ExportError::Pdf(e.to_string()))
    }
}

fn add_font(doc: &PdfDocumentReference, font: BuiltinFont) -> Result<IndirectFontRef, ExportError> {
    doc.add_builtin_font(font)
        .map_err(|e| ExportError::Pdf(e.to_string()))
}
