//! Measure command implementation

use anyhow::{Context, Result};

use crate::cli::MeasureArgs;

pub fn run(args: &MeasureArgs) -> Result<()> {
    let font = super::load_font(&args.font)?;
    let options = super::layout_options(&args.spacing);
    let size = font.measure(&args.text, args.height, &options);
    let atlas = font.select_atlas(args.height).nominal_size();

    if args.json {
        let value = serde_json::json!({
            "width": size.width,
            "height": size.height,
            "atlas_size": atlas,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&value).context("Failed to serialize measurement")?
        );
    } else {
        println!("{} x {} (atlas {} px)", size.width, size.height, atlas);
    }
    Ok(())
}
