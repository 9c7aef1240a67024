//! Frame annotation: detection rectangle plus recognized-text label.
//!
//! Drawing is a display-only side effect; it never feeds back into the
//! registry. The label needs a TTF font at runtime; when none can be found
//! the rectangle is still drawn and only the text is skipped.

use std::path::{Path, PathBuf};

use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use tracing::{debug, warn};

use crate::crop::CropBounds;

const BOX_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const BOX_THICKNESS: i64 = 2;
const LABEL_HEIGHT: f32 = 24.0;

/// Candidate font locations tried when none is configured.
const FALLBACK_FONTS: [&str; 4] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
];

pub struct Annotator {
    font: Option<FontVec>,
}

impl Annotator {
    /// Load the label font from `font_path` when given, falling back to
    /// common system locations.
    pub fn new(font_path: Option<&Path>) -> Self {
        let font = font_path
            .map(Path::to_path_buf)
            .into_iter()
            .chain(FALLBACK_FONTS.iter().map(PathBuf::from))
            .find_map(|path| {
                let font = load_font(&path);
                if font.is_some() {
                    debug!("using label font {:?}", path);
                }
                font
            });

        if font.is_none() {
            warn!("no label font found, annotations will carry rectangles only");
        }

        Self { font }
    }

    /// Draw the detection rectangle and its normalized text onto the frame.
    /// A box with no visible area inside the frame draws nothing.
    pub fn draw(&self, frame: &mut RgbImage, bounds: CropBounds, label: &str) {
        let (width, height) = frame.dimensions();
        let x0 = bounds.x_min.clamp(0, width as i64);
        let y0 = bounds.y_min.clamp(0, height as i64);
        let x1 = bounds.x_max.clamp(0, width as i64);
        let y1 = bounds.y_max.clamp(0, height as i64);

        if x1 <= x0 || y1 <= y0 {
            return;
        }

        for inset in 0..BOX_THICKNESS {
            let w = x1 - x0 - 2 * inset;
            let h = y1 - y0 - 2 * inset;
            if w <= 0 || h <= 0 {
                break;
            }
            let rect = Rect::at((x0 + inset) as i32, (y0 + inset) as i32)
                .of_size(w as u32, h as u32);
            draw_hollow_rect_mut(frame, rect, BOX_COLOR);
        }

        if let Some(font) = &self.font {
            if !label.is_empty() {
                let label_y = (y0 - LABEL_HEIGHT as i64 - 2).max(0) as i32;
                draw_text_mut(
                    frame,
                    BOX_COLOR,
                    x0 as i32,
                    label_y,
                    PxScale::from(LABEL_HEIGHT),
                    font,
                    label,
                );
            }
        }
    }
}

fn load_font(path: &Path) -> Option<FontVec> {
    let data = std::fs::read(path).ok()?;
    FontVec::try_from_vec(data).ok()
}
