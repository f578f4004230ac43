//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use asciify::ascii::{RampPreset, Viewport};
use asciify::config::Config;
use asciify::export::{Spacing, Typography};

use super::enums::{Filter, Order, Policy, Preset};

/// Convert an image into colored ASCII art and optionally export it as SVG
#[derive(Parser, Debug)]
#[command(name = "asciify")]
#[command(version, about = "Colored ASCII art from images, with SVG export", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Image file to convert
    pub image: Option<PathBuf>,

    /// Config file path
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Built-in glyph ramp
    #[arg(long, conflicts_with = "ramp")]
    pub preset: Option<Preset>,

    /// Custom glyph ramp, sparse to dense (e.g. " .:#")
    #[arg(long)]
    pub ramp: Option<String>,

    /// Which end of the ramp bright pixels land on
    #[arg(long)]
    pub order: Option<Order>,

    /// Palette colors, darkest first (e.g. "#000,#0f0,#fff")
    #[arg(long, value_delimiter = ',')]
    pub palette: Option<Vec<String>>,

    /// Grid sizing policy
    #[arg(long)]
    pub policy: Option<Policy>,

    /// Viewport size in cells as WIDTHxHEIGHT (default: terminal size)
    #[arg(long, value_parser = parse_viewport)]
    pub viewport: Option<Viewport>,

    /// Share of the viewport's shorter side to use
    #[arg(long)]
    pub fraction: Option<f32>,

    /// Column budget for max-columns and fit-box
    #[arg(long)]
    pub columns: Option<u32>,

    /// Row budget for fit-box
    #[arg(long)]
    pub rows: Option<u32>,

    /// Cell height divided by cell width
    #[arg(long)]
    pub char_aspect: Option<f32>,

    /// Resampling filter
    #[arg(long)]
    pub resample: Option<Filter>,

    /// Write the SVG export to this file or directory
    #[arg(long, short)]
    pub export: Option<PathBuf>,

    /// CSS font stack for the export
    #[arg(long, default_value = "monospace")]
    pub font_family: String,

    /// Font size in pixels for the export
    #[arg(long, default_value = "10", value_parser = parse_pixels)]
    pub font_size: f32,

    /// Line height in pixels for the export (default: normal)
    #[arg(long, value_parser = parse_pixels)]
    pub line_height: Option<f32>,

    /// Letter spacing in pixels for the export (default: normal)
    #[arg(long)]
    pub letter_spacing: Option<f32>,

    /// Print glyphs without terminal colors
    #[arg(long)]
    pub plain: bool,
}

impl Args {
    /// Apply command-line overrides on top of a loaded config.
    ///
    /// Validation happens later, when the config becomes settings.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(preset) = self.preset {
            config.glyphs.ramp = RampPreset::from(preset).ramp().to_string();
        }
        if let Some(ramp) = &self.ramp {
            config.glyphs.ramp = ramp.clone();
        }
        if let Some(order) = self.order {
            config.glyphs.order = order.into();
        }
        if let Some(colors) = &self.palette {
            config.palette.colors = colors.iter().map(|c| c.trim().to_string()).collect();
        }
        if let Some(policy) = self.policy {
            config.sizing.policy = policy.into();
        }
        if let Some(fraction) = self.fraction {
            config.sizing.fraction = fraction;
        }
        if let Some(columns) = self.columns {
            config.sizing.columns = columns;
        }
        if let Some(rows) = self.rows {
            config.sizing.rows = rows;
        }
        if let Some(char_aspect) = self.char_aspect {
            config.sizing.char_aspect = char_aspect;
        }
        if let Some(resample) = self.resample {
            config.sizing.resample = resample.into();
        }
    }

    /// Typography the export is laid out with.
    pub fn typography(&self) -> Typography {
        Typography {
            font_family: self.font_family.clone(),
            font_size: self.font_size,
            line_height: self.line_height.map_or(Spacing::Normal, Spacing::Px),
            letter_spacing: self.letter_spacing.map_or(Spacing::Normal, Spacing::Px),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}

/// Parse and validate a viewport (WIDTHxHEIGHT format)
pub fn parse_viewport(s: &str) -> Result<Viewport, String> {
    let Some((width, height)) = s.split_once('x') else {
        return Err(format!(
            "Invalid viewport format '{}'. Use WIDTHxHEIGHT (e.g., 120x40)",
            s
        ));
    };
    let width: u32 = width
        .parse()
        .map_err(|_| format!("Invalid width '{}' in viewport", width))?;
    let height: u32 = height
        .parse()
        .map_err(|_| format!("Invalid height '{}' in viewport", height))?;
    if width == 0 || height == 0 {
        return Err("Viewport width and height must be greater than 0".to_string());
    }
    Ok(Viewport { width, height })
}

/// Parse and validate a positive pixel length
fn parse_pixels(s: &str) -> Result<f32, String> {
    let px: f32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if !px.is_finite() || px <= 0.0 {
        return Err(format!("Pixel size must be greater than 0, got {}", px));
    }
    Ok(px)
}

#[cfg(test)]
mod tests {
    use super::*;
    use asciify::config::{RampOrderConfig, ResampleConfig, SizingPolicyConfig};

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["asciify", "cat.png"]);
        assert_eq!(args.image, Some(PathBuf::from("cat.png")));
        assert!(args.command.is_none());
        assert!(args.config.is_none());
        assert!(args.preset.is_none());
        assert!(args.viewport.is_none());
        assert!(args.export.is_none());
        assert_eq!(args.font_family, "monospace");
        assert_eq!(args.font_size, 10.0);
        assert!(!args.plain);
    }

    #[test]
    fn test_args_no_overrides_keep_config() {
        let args = Args::parse_from(["asciify", "cat.png"]);
        let mut config = Config::default();
        args.apply_overrides(&mut config);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_args_viewport() {
        let args = Args::parse_from(["asciify", "cat.png", "--viewport", "120x40"]);
        assert_eq!(
            args.viewport,
            Some(Viewport {
                width: 120,
                height: 40
            })
        );
    }

    #[test]
    fn test_args_viewport_rejected() {
        assert!(Args::try_parse_from(["asciify", "a.png", "--viewport", "120"]).is_err());
        assert!(Args::try_parse_from(["asciify", "a.png", "--viewport", "0x40"]).is_err());
        assert!(Args::try_parse_from(["asciify", "a.png", "--viewport", "ax40"]).is_err());
    }

    #[test]
    fn test_parse_viewport() {
        assert_eq!(
            parse_viewport("80x24"),
            Ok(Viewport {
                width: 80,
                height: 24
            })
        );
        assert!(parse_viewport("80x").is_err());
        assert!(parse_viewport("80x24x2").is_err());
    }

    #[test]
    fn test_args_preset_and_ramp_conflict() {
        assert!(
            Args::try_parse_from(["asciify", "a.png", "--preset", "blocks", "--ramp", " #"])
                .is_err()
        );
    }

    #[test]
    fn test_args_preset_override() {
        let args = Args::parse_from(["asciify", "a.png", "--preset", "minimal"]);
        let mut config = Config::default();
        args.apply_overrides(&mut config);
        assert_eq!(config.glyphs.ramp, " .:#");
    }

    #[test]
    fn test_args_palette_list() {
        let args = Args::parse_from(["asciify", "a.png", "--palette", "#000,#0f0, #fff"]);
        let mut config = Config::default();
        args.apply_overrides(&mut config);
        assert_eq!(config.palette.colors, vec!["#000", "#0f0", "#fff"]);
    }

    #[test]
    fn test_args_sizing_overrides() {
        let args = Args::parse_from([
            "asciify",
            "a.png",
            "--policy",
            "fit-box",
            "--columns",
            "60",
            "--rows",
            "20",
            "--char-aspect",
            "2",
            "--resample",
            "box-average",
            "--order",
            "bright-is-sparse",
        ]);
        let mut config = Config::default();
        args.apply_overrides(&mut config);
        assert_eq!(config.sizing.policy, SizingPolicyConfig::FitBox);
        assert_eq!(config.sizing.columns, 60);
        assert_eq!(config.sizing.rows, 20);
        assert_eq!(config.sizing.char_aspect, 2.0);
        assert_eq!(config.sizing.resample, ResampleConfig::BoxAverage);
        assert_eq!(config.glyphs.order, RampOrderConfig::BrightIsSparse);
    }

    #[test]
    fn test_args_typography() {
        let args = Args::parse_from([
            "asciify",
            "a.png",
            "--font-family",
            "Courier New",
            "--font-size",
            "12",
            "--line-height",
            "14",
        ]);
        let typography = args.typography();
        assert_eq!(typography.font_family, "Courier New");
        assert_eq!(typography.font_size, 12.0);
        assert_eq!(typography.line_height, Spacing::Px(14.0));
        assert_eq!(typography.letter_spacing, Spacing::Normal);
    }

    #[test]
    fn test_args_font_size_must_be_positive() {
        assert!(Args::try_parse_from(["asciify", "a.png", "--font-size", "0"]).is_err());
    }

    #[test]
    fn test_args_config_option() {
        let args = Args::parse_from(["asciify", "a.png", "--config", "/tmp/config.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/config.toml")));

        let args = Args::parse_from(["asciify", "a.png", "-c", "/tmp/test.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/test.toml")));
    }

    #[test]
    fn test_args_config_show_subcommand() {
        let args = Args::parse_from(["asciify", "config", "show"]);
        match args.command {
            Some(Command::Config {
                action: ConfigAction::Show,
            }) => (),
            _ => panic!("Expected Config Show subcommand"),
        }
    }

    #[test]
    fn test_args_config_init_subcommand() {
        let args = Args::parse_from(["asciify", "config", "init"]);
        match args.command {
            Some(Command::Config {
                action: ConfigAction::Init,
            }) => (),
            _ => panic!("Expected Config Init subcommand"),
        }
    }
}
