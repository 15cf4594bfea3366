//! SFPF Core: bitmap proof fonts from package to draw calls
//!
//! A proof font is a set of pre-rasterized glyph strips, one per nominal
//! pixel size. This crate holds everything that happens after the package
//! has been opened:
//!
//! 1. **Glyph tables** - where each character sits in its strip
//! 2. **Atlases** - one texture plus table per size tier
//! 3. **Atlas selection** - the tier nearest to the requested height
//! 4. **Layout** - measuring text, or placing every glyph of it
//! 5. **Rendering** - handing placed glyphs to a draw backend, with an
//!    optional outline pass
//!
//! ## Draw Some Text
//!
//! ```rust
//! use sfpf_core::{
//!     AtlasTexture, Color, FontArchive, FontConfig, GlyphAtlas, GlyphTable, LayoutOptions,
//!     TextLayout,
//! };
//!
//! let texture = AtlasTexture::from_rgba(32, 16, vec![255; 32 * 16 * 4])?;
//! let table = GlyphTable::parse(16, "A 0 12\nB 16 12")?;
//! let archive = FontArchive::new(vec![GlyphAtlas::new(texture, table)])?;
//!
//! let layout = TextLayout::new(&archive, FontConfig::default());
//! let size = layout.measure("AB", 32.0, &LayoutOptions::new());
//! assert_eq!(size.height, 32.0);
//! # Ok::<(), sfpf_core::SfpfError>(())
//! ```
//!
//! ## The Traits at the Edges
//!
//! - [`ImageDecoder`] - bytes of an atlas image become pixels
//! - [`DrawBackend`] - placed glyphs become pixels on some target

pub mod archive;
pub mod atlas;
pub mod error;
pub mod glyph;
pub mod layout;
pub mod render;
pub mod traits;

pub use archive::FontArchive;
pub use atlas::{AtlasTexture, GlyphAtlas};
pub use error::{FormatError, LoadError, RenderError, Result, SfpfError};
pub use glyph::{GlyphRecord, GlyphTable};
pub use layout::{FontConfig, GlyphDraw, LayoutOptions, MeasuredSize, TextLayout};
pub use render::{OutlineParams, TextRenderer};
pub use traits::{DrawBackend, ImageDecoder};
pub use types::{SourceRect, Vec2};

/// Geometry shared by layout and backends
pub mod types {
    use std::ops::{Add, Mul, Sub};

    /// A point or offset in target pixels, y pointing down
    #[derive(Debug, Clone, Copy, Default, PartialEq)]
    pub struct Vec2 {
        pub x: f32,
        pub y: f32,
    }

    impl Vec2 {
        pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

        pub const fn new(x: f32, y: f32) -> Self {
            Self { x, y }
        }

        /// Rotates about the origin by `angle` radians
        pub fn rotate(self, angle: f32) -> Self {
            let (sin, cos) = angle.sin_cos();
            Self {
                x: self.x * cos - self.y * sin,
                y: self.x * sin + self.y * cos,
            }
        }
    }

    impl Add for Vec2 {
        type Output = Self;

        fn add(self, rhs: Self) -> Self {
            Self::new(self.x + rhs.x, self.y + rhs.y)
        }
    }

    impl Sub for Vec2 {
        type Output = Self;

        fn sub(self, rhs: Self) -> Self {
            Self::new(self.x - rhs.x, self.y - rhs.y)
        }
    }

    impl Mul<f32> for Vec2 {
        type Output = Self;

        fn mul(self, rhs: f32) -> Self {
            Self::new(self.x * rhs, self.y * rhs)
        }
    }

    /// Rectangle of atlas texels, in integer pixels
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct SourceRect {
        pub x: u32,
        pub y: u32,
        pub width: u32,
        pub height: u32,
    }
}

/// Simple RGBA color that works everywhere
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::rgba(0, 0, 0, 255)
    }

    pub const fn white() -> Self {
        Self::rgba(255, 255, 255, 255)
    }

    pub const fn transparent() -> Self {
        Self::rgba(0, 0, 0, 0)
    }

    /// Parses `RRGGBB` or `RRGGBBAA`, with or without a leading `#`
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, 255)),
            8 => Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_parse() {
        assert_eq!(Color::from_hex("ff0000"), Some(Color::rgba(255, 0, 0, 255)));
        assert_eq!(Color::from_hex("#00FF0080"), Some(Color::rgba(0, 255, 0, 128)));
        assert_eq!(Color::from_hex("fff"), None);
        assert_eq!(Color::from_hex("zz0000"), None);
    }

    #[test]
    fn rotation_turns_x_axis_onto_y_axis() {
        let v = Vec2::new(1.0, 0.0).rotate(std::f32::consts::FRAC_PI_2);
        assert!(v.x.abs() < 1e-6);
        assert!((v.y - 1.0).abs() < 1e-6);
    }
}
