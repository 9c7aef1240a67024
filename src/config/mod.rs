//! Application Configuration
//!
//! Run settings stored in TOML format.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Storage locations
    pub storage: StorageConfig,
    /// Annotation settings
    pub annotation: AnnotationConfig,
}

/// Where the registry table, crop artifacts, and annotated frames go.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Registry table, loaded at start if present and rewritten at the end
    pub registry_path: PathBuf,
    /// Directory for first-sighting crop artifacts
    pub crops_dir: PathBuf,
    /// Directory for annotated copies of the input frames
    pub output_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            registry_path: PathBuf::from("detected_plates.csv"),
            crops_dir: PathBuf::from("plates"),
            output_dir: PathBuf::from("processed"),
        }
    }
}

/// Annotation settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnnotationConfig {
    /// TTF font for the text label; common system fonts are tried when
    /// unset, and the label is skipped when none is found
    pub font_path: Option<PathBuf>,
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Save configuration to file
pub fn save_config(config: &AppConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}
