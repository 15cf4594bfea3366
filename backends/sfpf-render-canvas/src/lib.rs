//! Canvas backend - proof font glyphs on a plain RGBA pixel buffer
//!
//! No GPU, no window: each draw request is resolved by walking the target
//! pixels under the rotated, scaled glyph rectangle and sampling the atlas
//! with nearest-neighbour lookup. Pixels are kept premultiplied, matching
//! the atlases the loader produces, and blended source-over.

use std::path::Path;

use image::ImageEncoder;
use sfpf_core::{
    error::{RenderError, Result},
    Color, DrawBackend, GlyphDraw, Vec2,
};

/// Largest accepted canvas edge, in pixels
pub const MAX_DIMENSION: u32 = 16_384;

/// Premultiplied RGBA8 render target
#[derive(Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Canvas {
    /// Transparent canvas of the given size
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(RenderError::InvalidDimensions { width, height }.into());
        }
        Ok(Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Replaces every pixel with `color`
    pub fn fill(&mut self, color: Color) {
        let px = premultiply(color);
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&px);
        }
    }

    /// Straight-alpha color at `(x, y)`
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = self.index(x, y);
        Some(unpremultiply(&self.pixels[idx..idx + 4]))
    }

    /// Straight-alpha RGBA8 copy of the canvas, row-major
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixels
            .chunks_exact(4)
            .flat_map(|px| {
                let c = unpremultiply(px);
                [c.r, c.g, c.b, c.a]
            })
            .collect()
    }

    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut png = Vec::new();
        image::codecs::png::PngEncoder::new(&mut png)
            .write_image(
                &self.to_rgba(),
                self.width,
                self.height,
                image::ExtendedColorType::Rgba8,
            )
            .map_err(|e| RenderError::EncodingFailed(format!("PNG encoding failed: {}", e)))?;
        Ok(png)
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.encode_png()?)?;
        log::debug!(
            "Wrote {}x{} canvas to {}",
            self.width,
            self.height,
            path.display()
        );
        Ok(())
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    fn blend(&mut self, x: u32, y: u32, src: [u8; 4]) {
        if src[3] == 0 && src[..3] == [0, 0, 0] {
            return;
        }
        let idx = self.index(x, y);
        let inv = 255 - src[3] as u32;
        for (c, dst) in self.pixels[idx..idx + 4].iter_mut().enumerate() {
            *dst = (src[c] as u32 + div_255(*dst as u32 * inv)).min(255) as u8;
        }
    }
}

impl DrawBackend for Canvas {
    fn name(&self) -> &'static str {
        "canvas"
    }

    fn draw_glyph(&mut self, glyph: &GlyphDraw<'_>) {
        if !(glyph.scale > 0.0) || glyph.source.width == 0 || glyph.source.height == 0 {
            return;
        }

        let texture = glyph.atlas.texture();
        let w = glyph.source.width as f32 * glyph.scale;
        let h = glyph.source.height as f32 * glyph.scale;
        let (sin, cos) = glyph.rotation.sin_cos();

        // Bounding box of the rotated glyph rectangle on the canvas
        let corners = [
            Vec2::ZERO,
            Vec2::new(w, 0.0),
            Vec2::new(0.0, h),
            Vec2::new(w, h),
        ]
        .map(|c| glyph.position + c.rotate(glyph.rotation));
        let min_x = corners.iter().map(|c| c.x).fold(f32::INFINITY, f32::min);
        let max_x = corners.iter().map(|c| c.x).fold(f32::NEG_INFINITY, f32::max);
        let min_y = corners.iter().map(|c| c.y).fold(f32::INFINITY, f32::min);
        let max_y = corners.iter().map(|c| c.y).fold(f32::NEG_INFINITY, f32::max);

        let x0 = min_x.floor().max(0.0) as u32;
        let y0 = min_y.floor().max(0.0) as u32;
        let x1 = (max_x.ceil().max(0.0) as u32).min(self.width);
        let y1 = (max_y.ceil().max(0.0) as u32).min(self.height);

        let tint = [glyph.color.r, glyph.color.g, glyph.color.b, glyph.color.a];
        for py in y0..y1 {
            for px in x0..x1 {
                // Back into glyph-local coordinates (inverse rotation)
                let dx = px as f32 + 0.5 - glyph.position.x;
                let dy = py as f32 + 0.5 - glyph.position.y;
                let lx = dx * cos + dy * sin;
                let ly = -dx * sin + dy * cos;
                if lx < 0.0 || ly < 0.0 || lx >= w || ly >= h {
                    continue;
                }

                // Glyph records past the atlas edge are kept by the loader
                let tx = glyph
                    .source
                    .x
                    .checked_add(((lx / glyph.scale) as u32).min(glyph.source.width - 1));
                let ty = glyph
                    .source
                    .y
                    .checked_add(((ly / glyph.scale) as u32).min(glyph.source.height - 1));
                let Some(texel) = tx.zip(ty).and_then(|(tx, ty)| texture.pixel(tx, ty)) else {
                    continue;
                };

                let texel = [texel.r, texel.g, texel.b, texel.a];
                let mut src = [0u8; 4];
                for c in 0..4 {
                    src[c] = div_255(texel[c] as u32 * tint[c] as u32) as u8;
                }
                self.blend(px, py, src);
            }
        }
    }
}

fn div_255(v: u32) -> u32 {
    (v + 127) / 255
}

fn premultiply(color: Color) -> [u8; 4] {
    let a = color.a as u32;
    [
        div_255(color.r as u32 * a) as u8,
        div_255(color.g as u32 * a) as u8,
        div_255(color.b as u32 * a) as u8,
        color.a,
    ]
}

fn unpremultiply(px: &[u8]) -> Color {
    let a = px[3] as u32;
    if a == 0 {
        return Color::transparent();
    }
    let channel = |v: u8| ((v as u32 * 255 + a / 2) / a).min(255) as u8;
    Color::rgba(channel(px[0]), channel(px[1]), channel(px[2]), px[3])
}
