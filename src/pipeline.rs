//! End-to-end run over a set of input frames.
//!
//! Strictly frame-sequential: each image is fully processed, every
//! detection in recognizer order, before the next one begins. The registry
//! is the only state carried across frames and is rewritten to disk once,
//! after the last input.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{info, warn};

use crate::annotate::Annotator;
use crate::config::AppConfig;
use crate::crop::CropWriter;
use crate::processor::ObservationProcessor;
use crate::recognizer::{ManifestRecognizer, TextRecognizer};
use crate::registry::{store, PlateRegistry};

const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Process `inputs` in order against the configured registry.
pub fn run(config: &AppConfig, inputs: &[PathBuf]) -> Result<()> {
    let registry_path = &config.storage.registry_path;
    let registry = if registry_path.exists() {
        let rows = store::load_registry(registry_path)
            .with_context(|| format!("failed to load registry table {:?}", registry_path))?;
        info!("loaded {} known plates from {:?}", rows.len(), registry_path);
        PlateRegistry::load(rows)
    } else {
        info!("no registry table at {:?}, starting fresh", registry_path);
        PlateRegistry::new()
    };

    let crops = CropWriter::new(&config.storage.crops_dir)?;
    let annotator = Annotator::new(config.annotation.font_path.as_deref());
    let mut processor = ObservationProcessor::new(registry, crops, annotator);

    std::fs::create_dir_all(&config.storage.output_dir).with_context(|| {
        format!("failed to create output directory {:?}", config.storage.output_dir)
    })?;

    for path in inputs {
        if !is_image(path) {
            warn!("skipping non-image input {:?}", path);
            continue;
        }
        if let Err(e) = process_file(&mut processor, config, path) {
            warn!("failed to process {:?}: {e:#}", path);
        }
    }

    let registry = processor.into_registry();
    store::save_registry(registry_path, registry.snapshot())
        .with_context(|| format!("failed to rewrite registry table {:?}", registry_path))?;
    info!("registry rewritten: {} plates in {:?}", registry.len(), registry_path);

    Ok(())
}

/// Process a single frame: load, recognize, observe, save annotated copy.
fn process_file(
    processor: &mut ObservationProcessor,
    config: &AppConfig,
    path: &Path,
) -> Result<()> {
    let source = path
        .file_name()
        .and_then(OsStr::to_str)
        .unwrap_or("unknown")
        .to_string();

    let mut frame = image::open(path)
        .with_context(|| format!("failed to load image {:?}", path))?
        .to_rgb8();

    let recognizer = ManifestRecognizer::for_image(path)?;
    let detections = recognizer.detect(&frame)?;
    info!("{}: {} detections", source, detections.len());

    processor.process(&mut frame, &source, &detections, Local::now().naive_local());

    let out_path = config.storage.output_dir.join(format!("processed_{source}"));
    frame
        .save(&out_path)
        .with_context(|| format!("failed to save annotated frame {:?}", out_path))?;

    Ok(())
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .map(|ext| IMAGE_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}
