//! Configuration file handling for asciify.
//!
//! Loads configuration from `~/.config/asciify/config.toml` or a custom path
//! and validates it into runtime [`Settings`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::ascii::{
    GlyphRamp, Palette, RampOrder, Resample, SizingPolicy, DEFAULT_CHAR_ASPECT_RATIO,
    DEFAULT_PALETTE, DEFAULT_VIEWPORT_FRACTION, STANDARD_RAMP,
};
use crate::export::ExportStyle;

/// Configuration file structure for asciify.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub glyphs: GlyphsConfig,
    #[serde(default)]
    pub palette: PaletteConfig,
    #[serde(default)]
    pub sizing: SizingConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GlyphsConfig {
    /// Ramp written sparse to dense
    pub ramp: String,
    pub order: RampOrderConfig,
}

impl Default for GlyphsConfig {
    fn default() -> Self {
        Self {
            ramp: STANDARD_RAMP.to_string(),
            order: RampOrderConfig::BrightIsDense,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RampOrderConfig {
    #[default]
    BrightIsDense,
    BrightIsSparse,
}

impl From<RampOrderConfig> for RampOrder {
    fn from(o: RampOrderConfig) -> Self {
        match o {
            RampOrderConfig::BrightIsDense => RampOrder::BrightIsDense,
            RampOrderConfig::BrightIsSparse => RampOrder::BrightIsSparse,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// CSS hex colors, darkest tier first
    pub colors: Vec<String>,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            colors: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SizingConfig {
    pub policy: SizingPolicyConfig,
    /// Share of the viewport's shorter side, for `viewport-fraction`
    pub fraction: f32,
    /// Column budget, for `max-columns` and `fit-box`
    pub columns: u32,
    /// Row budget, for `fit-box`
    pub rows: u32,
    /// Cell height / cell width
    pub char_aspect: f32,
    pub resample: ResampleConfig,
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            policy: SizingPolicyConfig::ViewportFraction,
            fraction: DEFAULT_VIEWPORT_FRACTION,
            columns: 100,
            rows: 50,
            char_aspect: DEFAULT_CHAR_ASPECT_RATIO,
            resample: ResampleConfig::Bilinear,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SizingPolicyConfig {
    #[default]
    ViewportFraction,
    MaxColumns,
    FitBox,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ResampleConfig {
    Nearest,
    #[default]
    Bilinear,
    BoxAverage,
}

impl From<ResampleConfig> for Resample {
    fn from(r: ResampleConfig) -> Self {
        match r {
            ResampleConfig::Nearest => Resample::Nearest,
            ResampleConfig::Bilinear => Resample::Bilinear,
            ResampleConfig::BoxAverage => Resample::BoxAverage,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportConfig {
    pub background: String,
    pub foreground: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        let style = ExportStyle::default();
        Self {
            background: style.background,
            foreground: style.foreground,
        }
    }
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
                path: path.clone(),
                source: e,
            })?;
            let config = Self::parse(&content).map_err(|e| ConfigError::Parse {
                path: path.clone(),
                source: e,
            })?;
            log::debug!("loaded config from {}", path.display());
            Ok(config)
        } else {
            log::debug!("no config at {}, using defaults", path.display());
            Ok(Config::default())
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Validated, immutable settings the pipeline runs with.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub ramp: GlyphRamp,
    pub palette: Palette,
    pub sizing: SizingPolicy,
    pub char_aspect: f32,
    pub resample: Resample,
    pub export_style: ExportStyle,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ramp: GlyphRamp::default(),
            palette: Palette::default(),
            sizing: SizingPolicy::default(),
            char_aspect: DEFAULT_CHAR_ASPECT_RATIO,
            resample: Resample::default(),
            export_style: ExportStyle::default(),
        }
    }
}

impl Settings {
    /// Validate a config into settings.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let ramp = GlyphRamp::new(&config.glyphs.ramp, config.glyphs.order.into())
            .map_err(|e| ConfigError::invalid("glyphs.ramp", e))?;
        let palette = Palette::parse(&config.palette.colors)
            .map_err(|e| ConfigError::invalid("palette.colors", e))?;

        let sizing_cfg = &config.sizing;
        if !(sizing_cfg.char_aspect.is_finite() && sizing_cfg.char_aspect > 0.0) {
            return Err(ConfigError::invalid(
                "sizing.char_aspect",
                format!("must be a positive number, got {}", sizing_cfg.char_aspect),
            ));
        }

        let sizing = match sizing_cfg.policy {
            SizingPolicyConfig::ViewportFraction => {
                let fraction = sizing_cfg.fraction;
                if !(fraction > 0.0 && fraction <= 1.0) {
                    return Err(ConfigError::invalid(
                        "sizing.fraction",
                        format!("must be in (0, 1], got {}", fraction),
                    ));
                }
                SizingPolicy::ViewportFraction { fraction }
            }
            SizingPolicyConfig::MaxColumns => SizingPolicy::MaxColumns {
                columns: positive("sizing.columns", sizing_cfg.columns)?,
            },
            SizingPolicyConfig::FitBox => SizingPolicy::FitBox {
                columns: positive("sizing.columns", sizing_cfg.columns)?,
                rows: positive("sizing.rows", sizing_cfg.rows)?,
            },
        };

        Ok(Self {
            ramp,
            palette,
            sizing,
            char_aspect: sizing_cfg.char_aspect,
            resample: sizing_cfg.resample.into(),
            export_style: ExportStyle {
                background: config.export.background.clone(),
                foreground: config.export.foreground.clone(),
            },
        })
    }
}

fn positive(field: &'static str, value: u32) -> Result<u32, ConfigError> {
    if value == 0 {
        return Err(ConfigError::invalid(field, "must be at least 1"));
    }
    Ok(value)
}

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl ToString) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.to_string(),
        }
    }
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("asciify").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/asciify/config.toml")
        })
}

/// Commented default config written by `asciify config init`.
pub const DEFAULT_CONFIG_TOML: &str = r##"# asciify configuration

[glyphs]
# Glyph ramp, written from sparsest to densest
ramp = " .:-=+*#%@"
# Which end bright pixels land on: bright-is-dense, bright-is-sparse
order = "bright-is-dense"

[palette]
# Color tiers, darkest first (#rgb or #rrggbb)
colors = ["#000", "#111", "#333", "#555", "#777", "#999", "#ccc", "#fff"]

[sizing]
# Grid sizing: viewport-fraction, max-columns, fit-box
policy = "viewport-fraction"
# Share of the viewport's shorter side (viewport-fraction)
fraction = 0.9
# Column budget (max-columns, fit-box)
columns = 100
# Row budget (fit-box)
rows = 50
# Cell height / cell width; 2.0 suits most terminal fonts
char_aspect = 1.0
# Resampling: nearest, bilinear, box-average
resample = "bilinear"

[export]
# SVG container colors
background = "black"
foreground = "#0f0"
"##;
