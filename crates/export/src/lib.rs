//! PDF export engine.
//!
//! Renders a comic's ordered panels (and optionally its character roster)
//! into paginated A4 documents under the exports directory. Layout
//! plumbing lives in [`layout`]; this module owns document structure.

use std::path::{Path, PathBuf};

use printpdf::{ColorBits, ColorSpace, Image, ImageTransform, ImageXObject, Mm, Px};
use vt_core::naming;
use vt_db::models::comic::Comic;
use vt_db::models::panel::Panel;

mod layout;

use layout::{DocumentWriter, Font};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Document assembly failed inside printpdf.
    #[error("PDF assembly failed: {0}")]
    Pdf(String),

    /// A referenced panel image exists but could not be decoded.
    #[error("Unreadable panel image {path}: {source}")]
    UnreadableImage {
        path: String,
        #[source]
        source: image::ImageError,
    },

    /// Filesystem failure while writing the document.
    #[error("Export I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

const TITLE_SIZE: f64 = 24.0;
const PANEL_HEADING_SIZE: f64 = 16.0;
const BODY_SIZE: f64 = 12.0;
const FOOTER_SIZE: f64 = 10.0;

/// Render a comic into a PDF under `exports_dir`, returning its path.
///
/// Panels are laid out in the order given (callers pass them in
/// `panel_number` order). A panel whose image file is missing gets a
/// textual notice instead of artwork; an image that exists but cannot be
/// decoded fails the whole export.
pub fn render_comic(
    comic: &Comic,
    panels: &[Panel],
    exports_dir: &Path,
) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(exports_dir)?;
    let path = exports_dir.join(naming::unique_export_filename(
        &comic.title,
        None,
        chrono::Utc::now(),
    ));

    let mut writer = DocumentWriter::new(&comic.title)?;

    writer.heading(&comic.title, TITLE_SIZE, Font::Bold);
    if let Some(description) = comic.description.as_deref().filter(|d| !d.is_empty()) {
        writer.paragraph(description, BODY_SIZE, Font::Italic);
    }
    writer.advance(7.0);

    for panel in panels {
        let heading = if panel.title.is_empty() {
            format!("Panel {}", panel.panel_number)
        } else {
            panel.title.clone()
        };
        writer.heading(&heading, PANEL_HEADING_SIZE, Font::Bold);

        match panel.image_path.as_deref() {
            Some(image_path) if Path::new(image_path).exists() => {
                place_image(&mut writer, image_path)?;
            }
            Some(image_path) => {
                writer.paragraph(
                    &format!("[Image not available: {image_path}]"),
                    BODY_SIZE,
                    Font::Italic,
                );
            }
            None => {
                writer.paragraph("[No image was generated for this panel]", BODY_SIZE, Font::Italic);
            }
        }

        writer.labeled_paragraph("Scene:", &panel.description, BODY_SIZE);
        if let Some(narration) = panel.narration_text.as_deref().filter(|n| !n.is_empty()) {
            writer.labeled_paragraph("Narration:", narration, BODY_SIZE);
        }
        writer.advance(10.0);
    }

    writer.advance(17.0);
    let footer = format!(
        "Created on {} with VisualTales",
        comic.created_at.format("%B %d, %Y")
    );
    writer.heading(&footer, FOOTER_SIZE, Font::Italic);

    writer.finish(&path)?;
    tracing::info!(path = %path.display(), "comic PDF created");
    Ok(path)
}

/// Render a comic's character roster, one page per character.
///
/// Returns `Ok(None)` when the comic has no characters -- an explicitly
/// empty result, not an error.
pub fn render_character_sheet(
    comic: &Comic,
    exports_dir: &Path,
) -> Result<Option<PathBuf>, ExportError> {
    if comic.characters.is_empty() {
        return Ok(None);
    }

    std::fs::create_dir_all(exports_dir)?;
    let path = exports_dir.join(naming::unique_export_filename(
        &comic.title,
        Some("characters"),
        chrono::Utc::now(),
    ));

    let mut writer = DocumentWriter::new(&format!("Character Sheet - {}", comic.title))?;
    writer.heading(
        &format!("Character Sheet - {}", comic.title),
        20.0,
        Font::Bold,
    );

    for (index, (name, entry)) in comic.characters.iter().enumerate() {
        if index > 0 {
            writer.new_page();
        }
        writer.heading(name, PANEL_HEADING_SIZE, Font::Bold);
        if !entry.description.is_empty() {
            writer.labeled_paragraph("Description:", &entry.description, BODY_SIZE);
        }
        if let Some(appearance) = entry.appearance.as_deref().filter(|a| !a.is_empty()) {
            writer.labeled_paragraph("Appearance:", appearance, BODY_SIZE);
        }
    }

    writer.finish(&path)?;
    tracing::info!(path = %path.display(), "character sheet PDF created");
    Ok(Some(path))
}

/// Decode an image and draw it centered at the cursor, scaled into the
/// fixed content box.
fn place_image(writer: &mut DocumentWriter, image_path: &str) -> Result<(), ExportError> {
    let decoded = image::open(image_path).map_err(|source| ExportError::UnreadableImage {
        path: image_path.to_string(),
        source,
    })?;
    let rgb = decoded.to_rgb8();
    let (width_px, height_px) = rgb.dimensions();

    let scale = layout::image_scale(width_px, height_px);
    // Rendered at 72 dpi one pixel is one point, so the printed size is
    // just the pixel size times the scale factor.
    let width_mm = width_px as f64 * scale * layout::PT_TO_MM;
    let height_mm = height_px as f64 * scale * layout::PT_TO_MM;

    writer.ensure_space(height_mm + 4.0);
    let x = (layout::PAGE_WIDTH_MM - width_mm) / 2.0;
    let y = writer.cursor_from_bottom() - height_mm;

    let xobject = ImageXObject {
        width: Px(width_px as usize),
        height: Px(height_px as usize),
        color_space: ColorSpace::Rgb,
        bits_per_component: ColorBits::Bit8,
        interpolate: false,
        image_data: rgb.into_raw(),
        image_filter: None,
        clipping_bbox: None,
    };
    Image::from(xobject).add_to_layer(
        writer.layer(),
        ImageTransform {
            translate_x: Some(Mm(x as f32)),
            translate_y: Some(Mm(y as f32)),
            scale_x: Some(scale as f32),
            scale_y: Some(scale as f32),
            dpi: Some(72.0),
            ..Default::default()
        },
    );

    writer.advance(height_mm + 4.0);
    Ok(())
}
