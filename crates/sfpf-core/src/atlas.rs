//! Glyph atlases: one packed texture per nominal size
//!
//! Every glyph of a tier lives in a single horizontal strip. The strip's
//! height is the tier's nominal size, so a glyph's source rectangle is
//! `(x, 0, width, nominal_size)`.

use std::fmt;

use crate::error::LoadError;
use crate::glyph::{GlyphRecord, GlyphTable};
use crate::types::SourceRect;
use crate::Color;

/// Owned RGBA8 pixel buffer backing one atlas
#[derive(Clone, PartialEq, Eq)]
pub struct AtlasTexture {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl AtlasTexture {
    /// Wraps a row-major RGBA8 buffer, checking that it covers `width * height`
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, LoadError> {
        let expected = width as usize * height as usize * 4;
        if width == 0 || height == 0 || pixels.len() != expected {
            return Err(LoadError::InvalidTexture {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_rgba(&self) -> &[u8] {
        &self.pixels
    }

    /// Size of the pixel buffer in bytes
    pub fn byte_len(&self) -> usize {
        self.pixels.len()
    }

    /// Texel at `(x, y)`, or `None` outside the texture
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let px = &self.pixels[idx..idx + 4];
        Some(Color::rgba(px[0], px[1], px[2], px[3]))
    }

    /// Scales every color channel by its texel's alpha.
    ///
    /// Packages store straight RGBA; draw backends blend with alpha already
    /// folded into the color channels, so the whole buffer is converted once
    /// at load time.
    pub fn normalize_alpha(&mut self) {
        for px in self.pixels.chunks_exact_mut(4) {
            let a = px[3] as u32;
            px[0] = mul_div_255(px[0] as u32, a);
            px[1] = mul_div_255(px[1] as u32, a);
            px[2] = mul_div_255(px[2] as u32, a);
        }
    }
}

impl fmt::Debug for AtlasTexture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AtlasTexture")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

fn mul_div_255(value: u32, alpha: u32) -> u8 {
    ((value * alpha + 127) / 255) as u8
}

/// One size tier: texture plus the table locating each glyph in it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphAtlas {
    nominal_size: u32,
    texture: AtlasTexture,
    table: GlyphTable,
}

impl GlyphAtlas {
    /// Builds a tier whose nominal size is the texture height
    pub fn new(texture: AtlasTexture, table: GlyphTable) -> Self {
        let nominal_size = texture.height();
        for record in table.iter() {
            if record.right() > texture.width() as u64 {
                log::warn!(
                    "Glyph '{}' ({}+{}) exceeds atlas width {} at size {}",
                    record.ch,
                    record.x,
                    record.width,
                    texture.width(),
                    nominal_size
                );
            }
        }
        Self {
            nominal_size,
            texture,
            table,
        }
    }

    pub fn nominal_size(&self) -> u32 {
        self.nominal_size
    }

    pub fn texture(&self) -> &AtlasTexture {
        &self.texture
    }

    pub fn table(&self) -> &GlyphTable {
        &self.table
    }

    pub fn glyph(&self, ch: char) -> Option<&GlyphRecord> {
        self.table.get(ch)
    }

    /// Region of the texture covered by `record`
    pub fn source_rect(&self, record: &GlyphRecord) -> SourceRect {
        SourceRect {
            x: record.x,
            y: 0,
            width: record.width,
            height: self.nominal_size,
        }
    }

    /// Gives up the texture, consuming the atlas
    pub fn into_texture(self) -> AtlasTexture {
        self.texture
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texture_rejects_mismatched_buffer() {
        assert!(AtlasTexture::from_rgba(2, 2, vec![0; 15]).is_err());
        assert!(AtlasTexture::from_rgba(0, 2, Vec::new()).is_err());
        assert!(AtlasTexture::from_rgba(2, 2, vec![0; 16]).is_ok());
    }

    #[test]
    fn normalize_alpha_scales_every_channel() {
        let mut texture = AtlasTexture::from_rgba(
            3,
            1,
            vec![
                255, 255, 255, 255, // opaque white stays
                255, 128, 0, 0, // fully transparent goes black
                200, 100, 50, 128, // half alpha halves
            ],
        )
        .unwrap();
        texture.normalize_alpha();

        assert_eq!(texture.pixel(0, 0), Some(Color::rgba(255, 255, 255, 255)));
        assert_eq!(texture.pixel(1, 0), Some(Color::rgba(0, 0, 0, 0)));
        assert_eq!(texture.pixel(2, 0), Some(Color::rgba(100, 50, 25, 128)));
        assert_eq!(texture.pixel(3, 0), None);
    }

    #[test]
    fn nominal_size_is_texture_height() {
        let texture = AtlasTexture::from_rgba(20, 12, vec![0; 20 * 12 * 4]).unwrap();
        let table = GlyphTable::parse(12, "A 0 7\nB 10 5").unwrap();
        let atlas = GlyphAtlas::new(texture, table);

        assert_eq!(atlas.nominal_size(), 12);
        let b = *atlas.glyph('B').unwrap();
        assert_eq!(
            atlas.source_rect(&b),
            SourceRect {
                x: 10,
                y: 0,
                width: 5,
                height: 12
            }
        );
    }
}
