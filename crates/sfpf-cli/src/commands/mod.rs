//! Subcommand implementations

pub mod info;
pub mod measure;
pub mod pack;
pub mod render;

use anyhow::{Context, Result};
use sfpf::{LayoutOptions, ProofFont};
use std::path::Path;

use crate::cli::SpacingArgs;

pub(crate) fn load_font(path: &Path) -> Result<ProofFont> {
    ProofFont::load(path).with_context(|| format!("Failed to load font {}", path.display()))
}

pub(crate) fn layout_options(args: &SpacingArgs) -> LayoutOptions {
    LayoutOptions {
        spacing: args.spacing,
        line_spacing: args.line_spacing,
        range_start: args.range_start,
        range_length: args.range_length,
    }
}
