//! Pack command implementation
//!
//! Bundles existing atlas images and glyph tables into a `.sfpf` package.
//! Glyph tables are parsed before packing so a broken tier is caught here
//! rather than skipped at load time.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use sfpf::{GlyphTable, PackageWriter};

use crate::cli::PackArgs;

/// One `SIZE:ATLAS:CHARS` argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierArg {
    pub size: u32,
    pub atlas: PathBuf,
    pub chars: PathBuf,
}

pub fn parse_tier(arg: &str) -> Result<TierArg> {
    let mut parts = arg.splitn(3, ':');
    let (Some(size), Some(atlas), Some(chars)) = (parts.next(), parts.next(), parts.next()) else {
        bail!("Tier must be SIZE:ATLAS_IMAGE:CHARS_DATA, got '{}'", arg);
    };
    let size: u32 = size
        .trim()
        .parse()
        .with_context(|| format!("Invalid size '{}' in '{}'", size, arg))?;
    if size == 0 {
        bail!("Size must be positive in '{}'", arg);
    }
    if atlas.is_empty() || chars.is_empty() {
        bail!("Tier '{}' is missing a file path", arg);
    }
    Ok(TierArg {
        size,
        atlas: PathBuf::from(atlas),
        chars: PathBuf::from(chars),
    })
}

pub fn run(args: &PackArgs) -> Result<()> {
    let mut writer = PackageWriter::new();

    for arg in &args.sizes {
        let tier = parse_tier(arg)?;
        let image = fs::read(&tier.atlas)
            .with_context(|| format!("Failed to read atlas {}", tier.atlas.display()))?;
        let chars = fs::read_to_string(&tier.chars)
            .with_context(|| format!("Failed to read glyph table {}", tier.chars.display()))?;
        let table = GlyphTable::parse(tier.size, &chars)
            .with_context(|| format!("Invalid glyph table {}", tier.chars.display()))?;

        log::debug!("Packing size {} with {} glyphs", tier.size, table.len());
        writer.add_tier(tier.size, image, &table);
    }

    writer
        .write_to(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    eprintln!(
        "Packed sizes {:?} into {}",
        writer.sizes(),
        args.output.display()
    );
    Ok(())
}
