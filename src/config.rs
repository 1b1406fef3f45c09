//! Pipeline configuration.
//!
//! A [`CropConfig`] is a plain value: which backend decodes and encodes, and
//! the output quality. The pipeline takes it by value at construction, so
//! there is no process-wide state to race on.
//!
//! ## Config File
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! backend = "rust"   # Codec backend (see `focal-crop backends`)
//! quality = 70       # Output quality (0-100), used by JPEG and AVIF
//! ```
//!
//! User files are merged key-by-key over the stock defaults, so a file may set
//! just one key. Unknown keys are rejected to catch typos early.

use crate::imaging::{BackendKind, Quality, QualityOutOfRange, UnknownBackend};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid quality: {0}")]
    InvalidQuality(#[from] QualityOutOfRange),
    #[error("Invalid backend: {0}")]
    UnknownBackend(#[from] UnknownBackend),
}

/// Settings shared by every crop a pipeline performs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CropConfig {
    /// Backend used to decode, transform and encode.
    pub backend: BackendKind,
    /// Compression quality applied before encoding.
    pub quality: Quality,
}

impl CropConfig {
    /// Select a backend by name. Names are matched case-insensitively.
    pub fn set_backend(&mut self, name: &str) -> Result<(), ConfigError> {
        self.backend = name.parse()?;
        Ok(())
    }

    /// Set output quality; must be in `0..=100`.
    pub fn set_quality(&mut self, quality: i64) -> Result<(), ConfigError> {
        self.quality = Quality::new(quality)?;
        Ok(())
    }
}

// =============================================================================
// Config loading and merging
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(CropConfig::default()).expect("default config must serialize")
}

/// Overlay the top-level keys of `overlay` onto `base`.
///
/// Every config value is a scalar, so overlay keys replace base keys outright
/// and base keys missing from the overlay are kept.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            base_table.extend(overlay_table);
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the stock defaults and deserialize.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<CropConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: CropConfig = merged.try_into()?;
    Ok(config)
}

/// Load config from `path`, falling back to defaults when it is absent.
pub fn load_config(path: &Path) -> Result<CropConfig, ConfigError> {
    resolve_config(load_raw_config(path)?)
}

/// Returns a fully-commented stock config file.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# focal-crop configuration
# ========================
# All options are optional. Values below are the defaults.

# Codec backend used to decode, crop, resize, sharpen and encode.
# Run `focal-crop backends` to list the backends compiled in.
backend = "rust"

# Output compression quality, 0-100.
# Applies to lossy formats (JPEG, AVIF); PNG, WebP and TIFF are lossless.
quality = 70
"##
}
