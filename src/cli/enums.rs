//! CLI enum types for glyph presets, ramp order, sizing and resampling.

use clap::ValueEnum;

use asciify::ascii::RampPreset;
use asciify::config::{RampOrderConfig, ResampleConfig, SizingPolicyConfig};

/// Built-in glyph ramp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Preset {
    #[default]
    Standard,
    Blocks,
    Minimal,
    Detailed,
}

impl From<Preset> for RampPreset {
    fn from(p: Preset) -> Self {
        match p {
            Preset::Standard => RampPreset::Standard,
            Preset::Blocks => RampPreset::Blocks,
            Preset::Minimal => RampPreset::Minimal,
            Preset::Detailed => RampPreset::Detailed,
        }
    }
}

/// Which end of the ramp bright pixels land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Order {
    BrightIsDense,
    BrightIsSparse,
}

impl From<Order> for RampOrderConfig {
    fn from(o: Order) -> Self {
        match o {
            Order::BrightIsDense => RampOrderConfig::BrightIsDense,
            Order::BrightIsSparse => RampOrderConfig::BrightIsSparse,
        }
    }
}

/// How the grid size is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Policy {
    ViewportFraction,
    MaxColumns,
    FitBox,
}

impl From<Policy> for SizingPolicyConfig {
    fn from(p: Policy) -> Self {
        match p {
            Policy::ViewportFraction => SizingPolicyConfig::ViewportFraction,
            Policy::MaxColumns => SizingPolicyConfig::MaxColumns,
            Policy::FitBox => SizingPolicyConfig::FitBox,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Filter {
    Nearest,
    Bilinear,
    BoxAverage,
}

impl From<Filter> for ResampleConfig {
    fn from(f: Filter) -> Self {
        match f {
            Filter::Nearest => ResampleConfig::Nearest,
            Filter::Bilinear => ResampleConfig::Bilinear,
            Filter::BoxAverage => ResampleConfig::BoxAverage,
        }
    }
}
