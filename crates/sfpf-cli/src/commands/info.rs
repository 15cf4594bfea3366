//! Info command implementation
//!
//! Lists the size tiers of a package with their glyph counts and textures.

use anyhow::Result;

use crate::cli::InfoArgs;

pub fn run(args: &InfoArgs) -> Result<()> {
    let font = super::load_font(&args.font)?;

    println!("sfpf v{}", env!("CARGO_PKG_VERSION"));
    println!("Font: {}", args.font.display());
    println!();
    println!("Sizes:");
    for atlas in font.archive().atlases() {
        let texture = atlas.texture();
        println!(
            "  {:>5} px  {:>4} glyphs  {}x{} texture{}",
            atlas.nominal_size(),
            atlas.table().len(),
            texture.width(),
            texture.height(),
            if atlas.table().contains(font.config().unknown_glyph) {
                ""
            } else {
                "  (no fallback glyph)"
            }
        );
    }
    Ok(())
}
