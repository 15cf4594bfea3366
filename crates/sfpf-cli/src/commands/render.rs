//! Render command implementation
//!
//! PNG output draws onto a software canvas sized from the measured text;
//! JSON output records the draw calls instead.

use std::fs;

use anyhow::{anyhow, bail, Context, Result};
use sfpf::{Color, OutlineParams, ProofFont, Vec2};
use sfpf_render_canvas::Canvas;
use sfpf_render_json::JsonRecorder;

use crate::cli::{OutputFormat, RenderArgs};

pub fn run(args: &RenderArgs) -> Result<()> {
    if !args.quiet {
        eprintln!("sfpf v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Rendering text...");
    }

    let font = super::load_font(&args.font)?;
    let color = parse_color(&args.color)?;
    let outline = match &args.outline_color {
        Some(hex) => Some(OutlineParams {
            color: parse_color(hex)?,
            width: args.outline_width,
            step: args.outline_step,
        }),
        None => None,
    };

    match args.format {
        OutputFormat::Png => render_png(args, &font, color, outline.as_ref()),
        OutputFormat::Json => render_json(args, &font, color, outline.as_ref()),
    }
}

fn render_png(
    args: &RenderArgs,
    font: &ProofFont,
    color: Color,
    outline: Option<&OutlineParams>,
) -> Result<()> {
    let Some(output) = &args.output else {
        bail!("PNG output needs an output path (-o)");
    };
    let options = super::layout_options(&args.spacing);
    let size = font.measure(&args.text, args.height, &options);
    let pad = args.margin as f32 + outline.map_or(0.0, |o| o.width.abs().ceil());

    let rotation = args.rotation.to_radians();
    let (width, height, origin) = if rotation == 0.0 {
        (
            size.width.ceil() + 2.0 * pad,
            size.height.ceil() + 2.0 * pad,
            Vec2::new(pad, pad),
        )
    } else {
        // Any turn about the origin stays inside a circle of the diagonal
        let diagonal = size.width.hypot(size.height).ceil();
        let side = 2.0 * diagonal + 2.0 * pad;
        (side, side, Vec2::new(side / 2.0, side / 2.0))
    };

    let mut canvas = Canvas::new((width as u32).max(1), (height as u32).max(1))?;
    canvas.fill(parse_color(&args.background)?);

    match outline {
        Some(outline) => font.draw_outlined(
            &mut canvas,
            &args.text,
            origin,
            color,
            outline,
            args.height,
            rotation,
            &options,
        ),
        None => font.draw(
            &mut canvas,
            &args.text,
            origin,
            color,
            args.height,
            rotation,
            &options,
        ),
    }

    canvas
        .save_png(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    if !args.quiet {
        eprintln!(
            "Wrote {}x{} image to {}",
            canvas.width(),
            canvas.height(),
            output.display()
        );
    }
    Ok(())
}

fn render_json(
    args: &RenderArgs,
    font: &ProofFont,
    color: Color,
    outline: Option<&OutlineParams>,
) -> Result<()> {
    let options = super::layout_options(&args.spacing);
    let origin = Vec2::new(args.margin as f32, args.margin as f32);
    let rotation = args.rotation.to_radians();
    let mut recorder = JsonRecorder::new();

    match outline {
        Some(outline) => font.draw_outlined(
            &mut recorder,
            &args.text,
            origin,
            color,
            outline,
            args.height,
            rotation,
            &options,
        ),
        None => font.draw(
            &mut recorder,
            &args.text,
            origin,
            color,
            args.height,
            rotation,
            &options,
        ),
    }

    let json = recorder.to_json()?;
    match &args.output {
        Some(path) => fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{}", json),
    }
    Ok(())
}

fn parse_color(hex: &str) -> Result<Color> {
    Color::from_hex(hex)
        .ok_or_else(|| anyhow!("Color must be in RRGGBB or RRGGBBAA format, got '{}'", hex))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_colors_with_and_without_alpha() {
        assert_eq!(parse_color("#FF000080").unwrap(), Color::rgba(255, 0, 0, 128));
        assert_eq!(parse_color("00ff00").unwrap(), Color::rgba(0, 255, 0, 255));
        assert!(parse_color("red").is_err());
    }
}
