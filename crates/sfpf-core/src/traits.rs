//! The seams between the engine and the outside world
//!
//! - [`ImageDecoder`] - turns atlas image bytes into RGBA pixels
//! - [`DrawBackend`] - receives one draw request per glyph

use crate::{atlas::AtlasTexture, error::Result, layout::GlyphDraw};

/// Decodes the bytes of an `atlas_<n>` entry
///
/// Decoders return straight (non-premultiplied) RGBA. The loader converts
/// the result before it reaches an atlas.
pub trait ImageDecoder: Send + Sync {
    /// Used in logs and error messages
    fn name(&self) -> &'static str;

    fn decode(&self, bytes: &[u8]) -> Result<AtlasTexture>;
}

/// Where glyphs get drawn
///
/// The engine only ever asks for "copy this atlas rectangle here, rotated,
/// scaled and tinted". Submission order is the order of the text. Callers
/// serialize access to a backend; the engine never shares one across
/// threads.
pub trait DrawBackend {
    /// Your backend's signature
    fn name(&self) -> &'static str;

    fn draw_glyph(&mut self, glyph: &GlyphDraw<'_>);
}

impl<B: DrawBackend + ?Sized> DrawBackend for &mut B {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn draw_glyph(&mut self, glyph: &GlyphDraw<'_>) {
        (**self).draw_glyph(glyph)
    }
}
