//! plate-watch - deduplicated registry of OCR-detected vehicle plates
//!
//! Consumes recognizer output (bounding polygons, text, confidence) for a
//! sequence of images and maintains a persistent table of distinct plates:
//! first/last sighting times, sighting counts, parsed sub-fields, and a
//! saved crop of each plate's first appearance.

mod annotate;
mod config;
mod crop;
mod parser;
mod pipeline;
mod processor;
mod recognizer;
mod registry;

use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use crate::config::AppConfig;

/// plate-watch - deduplicated plate registry over recognized frames
#[derive(Parser, Debug)]
#[command(name = "plate-watch")]
#[command(about = "Builds a deduplicated registry of OCR-detected plates across images")]
struct Args {
    /// Input image files (jpg/jpeg/png), processed in order
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Configuration file (TOML); defaults are used when absent
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable per-detection debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = load_or_default_config(args.config.as_deref());

    info!("plate-watch starting: {} input file(s)", args.inputs.len());
    pipeline::run(&config, &args.inputs)?;
    info!("plate-watch run complete");

    Ok(())
}

/// Load configuration from the given path or fall back to defaults.
fn load_or_default_config(path: Option<&Path>) -> AppConfig {
    if let Some(path) = path {
        match config::load_config(path) {
            Ok(config) => {
                info!("loaded configuration from {:?}", path);
                return config;
            }
            Err(e) => warn!("could not read config {:?}: {e:#}, using defaults", path),
        }
    }
    AppConfig::default()
}
