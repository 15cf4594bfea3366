//! CLI argument definitions using Clap v4

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// sfpf - Inspect, render and pack bitmap proof fonts
#[derive(Parser, Debug)]
#[command(name = "sfpf")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Display the size tiers stored in a font package
    #[command(alias = "i")]
    Info(InfoArgs),

    /// Measure the extent of text at a given height
    #[command(alias = "m")]
    Measure(MeasureArgs),

    /// Render text to a PNG image or a JSON draw list
    #[command(alias = "r")]
    Render(Box<RenderArgs>),

    /// Build a font package from atlas images and glyph tables
    Pack(PackArgs),
}

/// Arguments for the info command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Font package (.sfpf)
    pub font: PathBuf,
}

/// Spacing overrides shared by measure and render
#[derive(clap::Args, Debug, Clone, Default)]
pub struct SpacingArgs {
    /// Glyph spacing at the 120 px reference height
    #[arg(long)]
    pub spacing: Option<f32>,

    /// Extra line gap at the 120 px reference height
    #[arg(long = "line-spacing")]
    pub line_spacing: Option<f32>,

    /// First character of the range to lay out
    #[arg(long = "range-start")]
    pub range_start: Option<usize>,

    /// Number of characters to lay out from the range start
    #[arg(long = "range-length")]
    pub range_length: Option<usize>,
}

/// Arguments for the measure command
#[derive(Parser, Debug)]
pub struct MeasureArgs {
    /// Font package (.sfpf)
    pub font: PathBuf,

    /// Text to measure
    pub text: String,

    /// Target line height in pixels
    #[arg(short = 's', long, default_value = "48")]
    pub height: f32,

    #[command(flatten)]
    pub spacing: SpacingArgs,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Output formats of the render command
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Json,
}

/// Arguments for the render command
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Font package (.sfpf)
    pub font: PathBuf,

    /// Text to render
    pub text: String,

    /// Output file path (stdout for JSON when omitted)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'O', long, value_enum, default_value = "png")]
    pub format: OutputFormat,

    /// Target line height in pixels
    #[arg(short = 's', long, default_value = "48")]
    pub height: f32,

    /// Text color (RRGGBB or RRGGBBAA)
    #[arg(short = 'c', long, default_value = "000000FF")]
    pub color: String,

    /// Background color (RRGGBB or RRGGBBAA)
    #[arg(short = 'b', long, default_value = "FFFFFF00")]
    pub background: String,

    /// Rotation about the text origin, in degrees
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub rotation: f32,

    /// Outline color; enables the outline pass
    #[arg(long = "outline-color")]
    pub outline_color: Option<String>,

    /// Outline thickness in pixels
    #[arg(long = "outline-width", default_value = "2")]
    pub outline_width: f32,

    /// Spacing of the outline offset grid, in units of the outline width
    #[arg(long = "outline-step", default_value = "0.5")]
    pub outline_step: f32,

    /// Margin around the text in pixels
    #[arg(short = 'm', long, default_value = "10")]
    pub margin: u32,

    #[command(flatten)]
    pub spacing: SpacingArgs,

    /// Suppress progress output on stderr
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

/// Arguments for the pack command
#[derive(Parser, Debug)]
pub struct PackArgs {
    /// Output package path
    #[arg(short = 'o', long)]
    pub output: PathBuf,

    /// Size tier as SIZE:ATLAS_IMAGE:CHARS_DATA (repeatable)
    #[arg(long = "size", required = true)]
    pub sizes: Vec<String>,
}
