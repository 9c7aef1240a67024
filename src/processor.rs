//! Per-frame observation processing.
//!
//! For every detection in a frame, in input order: normalize the text,
//! record the sighting in the registry, save a crop artifact when the plate
//! is new, and annotate the frame. A single bad detection only loses its
//! crop; it never stops the rest of the frame.

use chrono::NaiveDateTime;
use image::RgbImage;
use tracing::{debug, warn};

use crate::annotate::Annotator;
use crate::crop::{self, CropWriter};
use crate::parser;
use crate::recognizer::Detection;
use crate::registry::PlateRegistry;

pub struct ObservationProcessor {
    registry: PlateRegistry,
    crops: CropWriter,
    annotator: Annotator,
}

impl ObservationProcessor {
    pub fn new(registry: PlateRegistry, crops: CropWriter, annotator: Annotator) -> Self {
        Self {
            registry,
            crops,
            annotator,
        }
    }

    pub fn registry(&self) -> &PlateRegistry {
        &self.registry
    }

    pub fn into_registry(self) -> PlateRegistry {
        self.registry
    }

    /// Process every detection of one frame, annotating it in place.
    pub fn process(
        &mut self,
        frame: &mut RgbImage,
        source: &str,
        detections: &[Detection],
        now: NaiveDateTime,
    ) {
        for detection in detections {
            let text = parser::normalize(&detection.text);

            let (id, is_new) = {
                let (record, is_new) = self.registry.lookup_or_create(&text, source, now);
                (record.id, is_new)
            };
            debug!(
                plate = %text,
                id,
                is_new,
                confidence = detection.confidence,
                "observation"
            );

            let bounds = crop::bounds(&detection.points);

            if is_new {
                match bounds.and_then(|b| crop::extract(frame, b)) {
                    Some(cropped) => {
                        if let Err(e) = self.crops.write(&text, id, &cropped) {
                            warn!("failed to write crop for {text}: {e:#}");
                        }
                    }
                    None => debug!(plate = %text, "degenerate crop region, skipping artifact"),
                }
            }

            if let Some(b) = bounds {
                self.annotator.draw(frame, b, &text);
            }
        }
    }
}
