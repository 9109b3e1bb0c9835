//! Application configuration.
//!
//! Handles loading, validating, and merging `watermark.toml`. Stock defaults
//! are overridden by whatever keys the user file sets; nothing is ever written
//! back.
//!
//! ## Config File Location
//!
//! 1. The file named by `--config`, if given (it must exist).
//! 2. Otherwise `watermark.toml` in the working directory, if present.
//! 3. Otherwise stock defaults.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! img_dir = "img"                  # Where input, watermark, and output images live
//! default_input = "test.jpg"       # Suggested answer for the input prompt
//! default_watermark = "logo.png"   # Suggested answer for the watermark prompt
//! output_suffix = "-with-watermark"
//! quality = 100                    # JPEG/AVIF encode quality (1-100)
//!
//! [text]
//! scale = 4                        # Glyph scale; cells are 8px * scale
//! color = [0, 0, 0, 255]           # RGBA
//!
//! [image]
//! opacity = 0.5                    # Watermark opacity (0.0-1.0)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{BitmapFont, Opacity, Quality, WatermarkSettings};
use crate::naming::WATERMARK_SUFFIX;
use image::Rgba;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File picked up from the working directory when `--config` is absent.
pub const CONFIG_FILE_NAME: &str = "watermark.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Application configuration loaded from `watermark.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Directory holding input, watermark, and output images.
    pub img_dir: PathBuf,
    /// Default answer for "What file do you want to mark?".
    pub default_input: String,
    /// Default answer for "Type your watermark name:".
    pub default_watermark: String,
    /// Inserted before the extension of watermarked outputs.
    pub output_suffix: String,
    /// Lossy encode quality (1 = worst, 100 = best).
    pub quality: u32,
    /// Text watermark style.
    pub text: TextConfig,
    /// Image watermark blending.
    pub image: ImageConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            img_dir: PathBuf::from("img"),
            default_input: "test.jpg".to_string(),
            default_watermark: "logo.png".to_string(),
            output_suffix: WATERMARK_SUFFIX.to_string(),
            quality: 100,
            text: TextConfig::default(),
            image: ImageConfig::default(),
        }
    }
}

/// Text watermark style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextConfig {
    /// Nearest-neighbour scale of the 8px glyph cells.
    pub scale: u32,
    /// Text color as `[r, g, b, a]`.
    pub color: [u8; 4],
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            scale: 4,
            color: [0, 0, 0, 255],
        }
    }
}

/// Image watermark blending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImageConfig {
    /// Multiplier on the watermark's own alpha channel.
    pub opacity: f32,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self { opacity: 0.5 }
    }
}

impl AppConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.quality) {
            return Err(ConfigError::Validation("quality must be 1-100".into()));
        }
        if !(0.0..=1.0).contains(&self.image.opacity) {
            return Err(ConfigError::Validation(
                "image.opacity must be 0.0-1.0".into(),
            ));
        }
        if !(1..=BitmapFont::MAX_SCALE).contains(&self.text.scale) {
            return Err(ConfigError::Validation(format!(
                "text.scale must be 1-{}",
                BitmapFont::MAX_SCALE
            )));
        }
        if self.output_suffix.is_empty() {
            return Err(ConfigError::Validation(
                "output_suffix must not be empty (output would overwrite the input)".into(),
            ));
        }
        Ok(())
    }

    /// Resolve a filename the user typed against the image directory.
    pub fn image_path(&self, filename: &str) -> PathBuf {
        self.img_dir.join(filename)
    }

    /// Operation settings derived from this config.
    pub fn watermark_settings(&self) -> WatermarkSettings {
        WatermarkSettings {
            font: BitmapFont::new(self.text.scale, Rgba(self.text.color)),
            opacity: Opacity::new(self.image.opacity),
            quality: Quality::new(self.quality),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(AppConfig::default()).expect("default config must serialize")
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

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<AppConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: AppConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Read a config file as a raw TOML value.
pub fn load_raw_config(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Load the effective config.
///
/// An explicit path must exist. Without one, `watermark.toml` in `cwd` is
/// used when present and stock defaults otherwise.
pub fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<AppConfig, ConfigError> {
    let overlay = match explicit {
        Some(path) => Some(load_raw_config(path)?),
        None => {
            let candidate = cwd.join(CONFIG_FILE_NAME);
            if candidate.exists() {
                Some(load_raw_config(&candidate)?)
            } else {
                None
            }
        }
    };
    resolve_config(overlay)
}

/// Returns a fully-commented stock `watermark.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Watermark Manager Configuration
# ===============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# The file is read from --config <FILE>, or from ./watermark.toml.
# Unknown keys will cause an error.

# Directory holding the input image, the watermark image, and the output.
img_dir = "img"

# Suggested answers for the file prompts.
default_input = "test.jpg"
default_watermark = "logo.png"

# Inserted before the extension: test.jpg -> test-with-watermark.jpg
output_suffix = "-with-watermark"

# JPEG/AVIF encoding quality (1 = worst, 100 = best).
# PNG, TIFF, WebP, GIF, and BMP ignore it.
quality = 100

# ---------------------------------------------------------------------------
# Text watermark
# ---------------------------------------------------------------------------
[text]
# Glyphs are 8x8 bitmaps scaled by this factor, 1-64 (4 = 32px lines).
scale = 4

# Text color as [red, green, blue, alpha].
color = [0, 0, 0, 255]

# ---------------------------------------------------------------------------
# Image watermark
# ---------------------------------------------------------------------------
[image]
# Multiplier on the watermark's own alpha (0.0 = invisible, 1.0 = as-is).
opacity = 0.5
"##
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.img_dir, PathBuf::from("img"));
        assert_eq!(config.default_input, "test.jpg");
        assert_eq!(config.default_watermark, "logo.png");
        assert_eq!(config.quality, 100);
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let value: toml::Value = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(resolve_config(Some(value)).unwrap(), AppConfig::default());
    }

    #[test]
    fn partial_overlay_keeps_other_defaults() {
        let overlay: toml::Value = toml::from_str(
            r#"
            img_dir = "photos"
            [text]
            scale = 2
            "#,
        )
        .unwrap();
        let config = resolve_config(Some(overlay)).unwrap();

        assert_eq!(config.img_dir, PathBuf::from("photos"));
        assert_eq!(config.text.scale, 2);
        assert_eq!(config.text.color, [0, 0, 0, 255]);
        assert_eq!(config.image.opacity, 0.5);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let overlay: toml::Value = toml::from_str("colour = \"red\"").unwrap();
        assert!(matches!(
            resolve_config(Some(overlay)),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn out_of_range_values_fail_validation() {
        let cases = [
            "quality = 0",
            "quality = 101",
            "[image]\nopacity = 1.5",
            "[text]\nscale = 0",
            "[text]\nscale = 65",
            "[text]\nscale = 1000000000",
            "output_suffix = \"\"",
        ];
        for bad in cases {
            let overlay: toml::Value = toml::from_str(bad).unwrap();
            assert!(
                matches!(resolve_config(Some(overlay)), Err(ConfigError::Validation(_))),
                "expected validation error for {bad:?}"
            );
        }
    }

    #[test]
    fn merge_replaces_scalars_and_merges_tables() {
        let base: toml::Value = toml::from_str("a = 1\n[t]\nx = 1\ny = 2").unwrap();
        let overlay: toml::Value = toml::from_str("a = 5\n[t]\ny = 9").unwrap();
        let merged = merge_toml(base, overlay);

        assert_eq!(merged["a"].as_integer(), Some(5));
        assert_eq!(merged["t"]["x"].as_integer(), Some(1));
        assert_eq!(merged["t"]["y"].as_integer(), Some(9));
    }

    #[test]
    fn load_without_any_file_uses_defaults() {
        let tmp = tempfile::TempDir::new().unwrap();
        assert_eq!(load_config(None, tmp.path()).unwrap(), AppConfig::default());
    }

    #[test]
    fn load_picks_up_file_in_cwd() {
        let tmp = tempfile::TempDir::new().unwrap();
        write_config(tmp.path(), CONFIG_FILE_NAME, "quality = 80");
        assert_eq!(load_config(None, tmp.path()).unwrap().quality, 80);
    }

    #[test]
    fn explicit_path_wins_over_cwd() {
        let tmp = tempfile::TempDir::new().unwrap();
        write_config(tmp.path(), CONFIG_FILE_NAME, "quality = 80");
        let explicit = write_config(tmp.path(), "other.toml", "quality = 60");
        assert_eq!(
            load_config(Some(&explicit), tmp.path()).unwrap().quality,
            60
        );
    }

    #[test]
    fn missing_explicit_path_is_io_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let missing = tmp.path().join("nope.toml");
        assert!(matches!(
            load_config(Some(&missing), tmp.path()),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn image_path_joins_img_dir() {
        let config = AppConfig::default();
        assert_eq!(config.image_path("test.jpg"), PathBuf::from("img/test.jpg"));
    }

    #[test]
    fn watermark_settings_reflect_config() {
        let config = AppConfig {
            quality: 85,
            text: TextConfig {
                scale: 2,
                color: [255, 0, 0, 255],
            },
            image: ImageConfig { opacity: 0.25 },
            ..AppConfig::default()
        };
        let settings = config.watermark_settings();
        assert_eq!(settings.quality.value(), 85);
        assert_eq!(settings.opacity.value(), 0.25);
        assert_eq!(settings.font, BitmapFont::new(2, Rgba([255, 0, 0, 255])));
    }

    #[test]
    fn default_settings_match_stock_operation_defaults() {
        assert_eq!(
            AppConfig::default().watermark_settings(),
            WatermarkSettings::default()
        );
    }
}
