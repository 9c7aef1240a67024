//! Text recognizer contract and a sidecar replay implementation.
//!
//! The recognizer itself is an external collaborator: the core only needs
//! an ordered list of (polygon, text, confidence) fragments per frame and
//! makes no assumptions about their order or count.

use std::path::Path;

use anyhow::{Context, Result};
use image::RgbImage;
use serde::{Deserialize, Serialize};

/// One recognized text fragment from a frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Detection {
    /// Bounding polygon points, in recognizer order
    pub points: Vec<(f32, f32)>,
    /// Raw recognized text, before normalization
    pub text: String,
    /// Recognition confidence (0.0 - 1.0)
    pub confidence: f32,
}

/// Source of recognized text fragments for a frame.
pub trait TextRecognizer {
    fn detect(&self, frame: &RgbImage) -> Result<Vec<Detection>>;
}

/// Replays recorded recognizer output from a JSON sidecar file.
///
/// Looks for `<image stem>.detections.json` next to the input image; a
/// missing sidecar means the frame had no detections. This is the stand-in
/// for a live OCR engine, which stays outside the core.
pub struct ManifestRecognizer {
    detections: Vec<Detection>,
}

impl ManifestRecognizer {
    pub fn for_image(image_path: &Path) -> Result<Self> {
        let sidecar = image_path.with_extension("detections.json");
        if !sidecar.exists() {
            return Ok(Self { detections: Vec::new() });
        }

        let content = std::fs::read_to_string(&sidecar)
            .with_context(|| format!("failed to read detection sidecar {:?}", sidecar))?;
        let detections = serde_json::from_str(&content)
            .with_context(|| format!("malformed detection sidecar {:?}", sidecar))?;
        Ok(Self { detections })
    }
}

impl TextRecognizer for ManifestRecognizer {
    fn detect(&self, _frame: &RgbImage) -> Result<Vec<Detection>> {
        Ok(self.detections.clone())
    }
}
