//! Tool configuration module.
//!
//! Handles loading, validating, and merging `coverpage.toml`. Configuration
//! is layered: stock defaults are overridden by a user config file in the
//! working directory (or an explicitly given directory).
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [export]
//! scale = 3.0               # Raster export scale factor
//! jpeg_quality = 92         # JPEG quality (1-100)
//! output_dir = "."          # Where exported files land
//!
//! [preview]
//! padding_px = 64.0         # Container padding subtracted before fitting
//! min_zoom = 0.1            # Zoom clamp floor
//! max_zoom = 3.0            # Zoom clamp ceiling
//! zoom_step = 0.1           # Manual zoom increment
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse — override just the values you want:
//!
//! ```toml
//! # Only override the JPEG quality
//! [export]
//! jpeg_quality = 85
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::scale;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Tool configuration loaded from `coverpage.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    /// Export settings (raster scale, JPEG quality, destination).
    pub export: ExportConfig,
    /// Preview zoom settings (fit padding, zoom clamps, step size).
    pub preview: PreviewConfig,
}

impl ToolConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.export.scale <= 0.0 {
            return Err(ConfigError::Validation(
                "export.scale must be positive".into(),
            ));
        }
        if self.export.jpeg_quality == 0 || self.export.jpeg_quality > 100 {
            return Err(ConfigError::Validation(
                "export.jpeg_quality must be 1-100".into(),
            ));
        }
        if self.preview.min_zoom <= 0.0 {
            return Err(ConfigError::Validation(
                "preview.min_zoom must be positive".into(),
            ));
        }
        if self.preview.max_zoom < self.preview.min_zoom {
            return Err(ConfigError::Validation(
                "preview.max_zoom must be >= preview.min_zoom".into(),
            ));
        }
        if self.preview.zoom_step <= 0.0 {
            return Err(ConfigError::Validation(
                "preview.zoom_step must be positive".into(),
            ));
        }
        if self.preview.padding_px < 0.0 {
            return Err(ConfigError::Validation(
                "preview.padding_px must not be negative".into(),
            ));
        }
        Ok(())
    }
}

/// Export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Raster export scale factor applied to the page's pixel dimensions.
    pub scale: f64,
    /// JPEG quality (1 = worst, 100 = best).
    pub jpeg_quality: u8,
    /// Directory exported files are written to.
    pub output_dir: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            scale: scale::EXPORT_SCALE,
            jpeg_quality: crate::export::image::JPEG_QUALITY,
            output_dir: ".".to_string(),
        }
    }
}

/// Preview zoom settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreviewConfig {
    /// Horizontal container padding subtracted before computing the fit scale.
    pub padding_px: f64,
    /// Zoom clamp floor.
    pub min_zoom: f64,
    /// Zoom clamp ceiling.
    pub max_zoom: f64,
    /// Manual zoom increment.
    pub zoom_step: f64,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            padding_px: scale::FIT_PADDING_PX,
            min_zoom: scale::MIN_ZOOM,
            max_zoom: scale::MAX_ZOOM,
            zoom_step: scale::ZOOM_STEP,
        }
    }
}

impl PreviewConfig {
    /// The zoom bounds and step for the fit/zoom arithmetic.
    pub fn limits(&self) -> scale::ZoomLimits {
        scale::ZoomLimits {
            min: self.min_zoom,
            max: self.max_zoom,
            step: self.zoom_step,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(ToolConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `coverpage.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `coverpage.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("coverpage.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<ToolConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ToolConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `coverpage.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<ToolConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `coverpage.toml` with all keys and
/// explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Cover Page Configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file as coverpage.toml next to your record files.
# Each level only needs the keys it wants to override.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Export
# ---------------------------------------------------------------------------
[export]
# Raster export scale factor. Exported images measure
# page-pixels x scale in each dimension.
scale = 3.0

# JPEG quality (1 = worst, 100 = best). PNG is always lossless.
jpeg_quality = 92

# Directory exported files are written to.
output_dir = "."

# ---------------------------------------------------------------------------
# Preview zoom
# ---------------------------------------------------------------------------
[preview]
# Horizontal container padding (both sides combined, in pixels) subtracted
# from the container width before computing the auto-fit scale.
padding_px = 64.0

# Zoom clamp bounds and the manual +/- step.
min_zoom = 0.1
max_zoom = 3.0
zoom_step = 0.1
"##
}
