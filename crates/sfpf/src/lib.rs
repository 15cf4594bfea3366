//! SFPF: bitmap proof fonts at any height
//!
//! A `.sfpf` package carries the same glyphs pre-rasterized at several pixel
//! sizes. [`ProofFont`] loads one, picks the tier nearest to whatever height
//! you ask for and scales it the rest of the way.
//!
//! ```rust,no_run
//! use sfpf::{Color, LayoutOptions, ProofFont, Vec2};
//! # use sfpf::{DrawBackend, GlyphDraw};
//! # struct Screen;
//! # impl DrawBackend for Screen {
//! #     fn name(&self) -> &'static str { "screen" }
//! #     fn draw_glyph(&mut self, _: &GlyphDraw<'_>) {}
//! # }
//! # let mut screen = Screen;
//!
//! let font = ProofFont::load("Audiowide.sfpf")?;
//! let size = font.measure("Hello", 48.0, &LayoutOptions::new());
//! font.draw(
//!     &mut screen,
//!     "Hello",
//!     Vec2::new(10.0, 10.0),
//!     Color::white(),
//!     48.0,
//!     0.0,
//!     &LayoutOptions::new(),
//! );
//! font.dispose();
//! # Ok::<(), sfpf::SfpfError>(())
//! ```

mod font;

pub use font::ProofFont;

pub use sfpf_archive::{encode_png, ArchiveLoader, ImageCrateDecoder, PackageWriter};
pub use sfpf_core::{
    error, types, AtlasTexture, Color, DrawBackend, FontArchive, FontConfig, FormatError,
    GlyphAtlas, GlyphDraw, GlyphRecord, GlyphTable, ImageDecoder, LayoutOptions, LoadError,
    MeasuredSize, OutlineParams, RenderError, Result, SfpfError, SourceRect, TextLayout,
    TextRenderer, Vec2,
};
