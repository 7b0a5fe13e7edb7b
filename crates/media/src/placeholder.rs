//! Local placeholder panel rendering.
//!
//! When image generation runs without a credential and the fallback flag
//! is enabled, panels get a locally drawn stand-in: solid background,
//! black border, the panel number, the wrapped scene text, and a notice
//! explaining how to get real artwork. Text needs a TrueType font; a few
//! well-known system locations are probed, and when none is present the
//! placeholder is rendered without text.

use std::path::{Path, PathBuf};

use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use vt_core::naming;
use vt_core::text::wrap_words;

use crate::error::MediaError;
use crate::store;

pub const PLACEHOLDER_WIDTH: u32 = 800;
pub const PLACEHOLDER_HEIGHT: u32 = 600;

/// Characters per wrapped description line, mirroring the panel width.
const WRAP_WIDTH: usize = 60;

const BACKGROUND: Rgb<u8> = Rgb([211, 211, 211]);
const INK: Rgb<u8> = Rgb([0, 0, 0]);
const MUTED: Rgb<u8> = Rgb([128, 128, 128]);

/// System font locations probed for placeholder text.
const FONT_SEARCH_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Render a placeholder panel image into `images_dir`, returning its path.
pub fn render(
    images_dir: &Path,
    panel_number: i64,
    description: &str,
) -> Result<PathBuf, MediaError> {
    store::ensure_dir(images_dir)?;
    let path = images_dir.join(naming::unique_media_filename(
        "placeholder",
        Some(panel_number),
        chrono::Utc::now(),
        "jpg",
    ));

    let mut img = RgbImage::from_pixel(PLACEHOLDER_WIDTH, PLACEHOLDER_HEIGHT, BACKGROUND);
    draw_border(&mut img);

    match load_system_font() {
        Some(font) => {
            draw_text_mut(
                &mut img,
                INK,
                50,
                50,
                PxScale::from(28.0),
                &font,
                &format!("Panel {panel_number}"),
            );
            let mut y = 100;
            for line in wrap_words(description, WRAP_WIDTH) {
                draw_text_mut(&mut img, INK, 50, y, PxScale::from(18.0), &font, &line);
                y += 22;
            }
            draw_text_mut(
                &mut img,
                MUTED,
                50,
                400,
                PxScale::from(28.0),
                &font,
                "Placeholder Image",
            );
            draw_text_mut(
                &mut img,
                MUTED,
                50,
                450,
                PxScale::from(18.0),
                &font,
                "(Set GEMINI_API_KEY to generate real artwork)",
            );
        }
        None => {
            tracing::debug!("no system font found; placeholder rendered without text");
        }
    }

    img.save(&path)?;
    Ok(path)
}

/// Three-pixel black frame just inside the edges.
fn draw_border(img: &mut RgbImage) {
    for inset in 10..13 {
        let size = (
            PLACEHOLDER_WIDTH - 2 * inset as u32,
            PLACEHOLDER_HEIGHT - 2 * inset as u32,
        );
        draw_hollow_rect_mut(
            img,
            Rect::at(inset, inset).of_size(size.0, size.1),
            INK,
        );
    }
}

fn load_system_font() -> Option<FontVec> {
    for path in FONT_SEARCH_PATHS {
        if let Ok(bytes) = std::fs::read(path) {
            if let Ok(font) = FontVec::try_from_vec(bytes) {
                return Some(font);
            }
        }
    }
    None
}
