//! Axis-aligned crop extraction from detection geometry.
//!
//! Recognizers report arbitrary bounding polygons; crops and annotations
//! only need the enclosing axis-aligned box. A degenerate polygon (fewer
//! than two distinct corners, or entirely outside the frame) yields no
//! crop, which callers treat as a skip rather than an error.

use std::path::PathBuf;

use anyhow::{Context, Result};
use image::RgbImage;

/// Enclosing axis-aligned box of a detection polygon, in pixel coordinates.
/// May extend outside the frame; extraction clamps it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropBounds {
    pub x_min: i64,
    pub y_min: i64,
    pub x_max: i64,
    pub y_max: i64,
}

impl CropBounds {
    pub fn width(&self) -> i64 {
        (self.x_max - self.x_min).max(0)
    }

    pub fn height(&self) -> i64 {
        (self.y_max - self.y_min).max(0)
    }

    pub fn is_empty(&self) -> bool {
        self.x_max <= self.x_min || self.y_max <= self.y_min
    }
}

/// Componentwise min/max over the polygon, truncated to integers.
/// Returns None for an empty point list.
pub fn bounds(points: &[(f32, f32)]) -> Option<CropBounds> {
    if points.is_empty() {
        return None;
    }

    let x_min = points.iter().map(|p| p.0).fold(f32::INFINITY, f32::min);
    let y_min = points.iter().map(|p| p.1).fold(f32::INFINITY, f32::min);
    let x_max = points.iter().map(|p| p.0).fold(f32::NEG_INFINITY, f32::max);
    let y_max = points.iter().map(|p| p.1).fold(f32::NEG_INFINITY, f32::max);

    Some(CropBounds {
        x_min: x_min as i64,
        y_min: y_min as i64,
        x_max: x_max as i64,
        y_max: y_max as i64,
    })
}

/// Extract the bounded sub-region of the frame, clamped to its edges.
/// Returns None when the clamped region has zero area.
pub fn extract(frame: &RgbImage, bounds: CropBounds) -> Option<RgbImage> {
    let (width, height) = frame.dimensions();
    let x0 = bounds.x_min.clamp(0, width as i64) as u32;
    let y0 = bounds.y_min.clamp(0, height as i64) as u32;
    let x1 = bounds.x_max.clamp(0, width as i64) as u32;
    let y1 = bounds.y_max.clamp(0, height as i64) as u32;

    if x1 <= x0 || y1 <= y0 {
        return None;
    }

    Some(image::imageops::crop_imm(frame, x0, y0, x1 - x0, y1 - y0).to_image())
}

/// Writes one crop artifact per newly registered plate into a fixed
/// directory, named `{plate text}_{id}.jpg`.
pub struct CropWriter {
    dir: PathBuf,
}

impl CropWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create crops directory {:?}", dir))?;
        Ok(Self { dir })
    }

    pub fn write(&self, full_text: &str, id: u64, crop: &RgbImage) -> Result<PathBuf> {
        let path = self.dir.join(format!("{full_text}_{id}.jpg"));
        crop.save(&path)
            .with_context(|| format!("failed to save crop {:?}", path))?;
        Ok(path)
    }
}
