//! Text layout: from characters to positioned atlas slices
//!
//! Measuring and drawing share a single walk over the requested substring.
//! The walk keeps a cursor relative to the start of the text and reports
//! each placed glyph and each line break; measuring folds those events into
//! a bounding box, emitting turns them into [`GlyphDraw`]s anchored at the
//! caller's position.
//!
//! Two scales are involved:
//!
//! - `atlas_scale = height / nominal_size` maps atlas pixels to the
//!   requested height
//! - `spacing_scale = height / 120` maps configured spacing, which is
//!   expressed at a 120 unit reference height, to the requested height

use crate::archive::FontArchive;
use crate::atlas::GlyphAtlas;
use crate::glyph::GlyphRecord;
use crate::types::{SourceRect, Vec2};
use crate::Color;

/// Height at which configured spacing values are expressed
pub const REFERENCE_HEIGHT: f32 = 120.0;

/// Glyph whose width stands in for the width of a space
pub const SPACE_PROXY: char = '$';

/// Per-font defaults that layout calls fall back to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontConfig {
    /// Extra gap between characters, at the reference height
    pub spacing: f32,
    /// Extra gap between lines, at the reference height
    pub line_spacing: f32,
    /// Drawn in place of characters missing from a tier
    pub unknown_glyph: char,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            spacing: 10.0,
            line_spacing: 5.0,
            unknown_glyph: '?',
        }
    }
}

/// Per-call overrides; unset fields use the font's [`FontConfig`]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayoutOptions {
    pub spacing: Option<f32>,
    pub line_spacing: Option<f32>,
    /// First character (not byte) of the laid out range
    pub range_start: Option<usize>,
    /// Number of characters in the range, clamped to the text
    pub range_length: Option<usize>,
}

impl LayoutOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = Some(spacing);
        self
    }

    pub fn with_line_spacing(mut self, line_spacing: f32) -> Self {
        self.line_spacing = Some(line_spacing);
        self
    }

    pub fn with_range(mut self, start: usize, length: usize) -> Self {
        self.range_start = Some(start);
        self.range_length = Some(length);
        self
    }
}

/// Bounding box produced by measuring
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeasuredSize {
    pub width: f32,
    pub height: f32,
}

impl MeasuredSize {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };
}

/// One draw request: an atlas slice placed, rotated, scaled and tinted
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphDraw<'a> {
    pub atlas: &'a GlyphAtlas,
    pub ch: char,
    pub source: SourceRect,
    /// Top-left corner of the glyph on the target
    pub position: Vec2,
    /// Radians, clockwise in y-down coordinates, about `position`
    pub rotation: f32,
    pub scale: f32,
    pub color: Color,
}

/// Resolved numbers for one layout call
#[derive(Debug, Clone, Copy)]
struct Metrics {
    height: f32,
    atlas_scale: f32,
    spacing: f32,
    line_spacing: f32,
}

impl Metrics {
    fn new(atlas: &GlyphAtlas, height: f32, spacing: f32, line_spacing: f32) -> Self {
        let spacing_scale = height / REFERENCE_HEIGHT;
        Self {
            height,
            atlas_scale: height / atlas.nominal_size() as f32,
            spacing: spacing * spacing_scale,
            line_spacing: line_spacing * spacing_scale,
        }
    }

    fn line_advance(&self) -> f32 {
        self.height + self.line_spacing
    }
}

enum LayoutEvent<'g> {
    Glyph {
        record: &'g GlyphRecord,
        x: f32,
        y: f32,
    },
    LineBreak {
        width: f32,
    },
}

/// Lays out text against a [`FontArchive`]
#[derive(Debug, Clone, Copy)]
pub struct TextLayout<'a> {
    archive: &'a FontArchive,
    config: FontConfig,
}

impl<'a> TextLayout<'a> {
    pub fn new(archive: &'a FontArchive, config: FontConfig) -> Self {
        Self { archive, config }
    }

    pub fn archive(&self) -> &'a FontArchive {
        self.archive
    }

    pub fn config(&self) -> &FontConfig {
        &self.config
    }

    /// Size of the box `text` occupies when drawn at `height`
    pub fn measure(&self, text: &str, height: f32, options: &LayoutOptions) -> MeasuredSize {
        let Some((atlas, metrics, range)) = self.prepare(text, height, options) else {
            return MeasuredSize::ZERO;
        };

        let mut max_width = 0.0_f32;
        let mut total_height = height;
        let end_x = self.walk(atlas, &metrics, range, |event| {
            if let LayoutEvent::LineBreak { width } = event {
                max_width = max_width.max(width);
                total_height += metrics.line_advance();
            }
        });

        MeasuredSize {
            width: max_width.max(end_x - metrics.spacing),
            height: total_height,
        }
    }

    /// Produces every glyph of `text`, anchored at `position`, in order
    #[allow(clippy::too_many_arguments)]
    pub fn emit(
        &self,
        text: &str,
        position: Vec2,
        color: Color,
        height: f32,
        rotation: f32,
        options: &LayoutOptions,
        mut sink: impl FnMut(GlyphDraw<'a>),
    ) {
        let Some((atlas, metrics, range)) = self.prepare(text, height, options) else {
            return;
        };

        self.walk(atlas, &metrics, range, |event| {
            if let LayoutEvent::Glyph { record, x, y } = event {
                let offset = Vec2::new(x, y);
                let offset = if rotation != 0.0 {
                    offset.rotate(rotation)
                } else {
                    offset
                };
                sink(GlyphDraw {
                    atlas,
                    ch: record.ch,
                    source: atlas.source_rect(record),
                    position: position + offset,
                    rotation,
                    scale: metrics.atlas_scale,
                    color,
                });
            }
        });
    }

    /// Collects the output of [`TextLayout::emit`]
    pub fn glyphs(
        &self,
        text: &str,
        position: Vec2,
        color: Color,
        height: f32,
        rotation: f32,
        options: &LayoutOptions,
    ) -> Vec<GlyphDraw<'a>> {
        let mut out = Vec::new();
        self.emit(text, position, color, height, rotation, options, |g| {
            out.push(g)
        });
        out
    }

    fn prepare<'t>(
        &self,
        text: &'t str,
        height: f32,
        options: &LayoutOptions,
    ) -> Option<(&'a GlyphAtlas, Metrics, impl Iterator<Item = char> + 't)> {
        if !height.is_finite() || height <= 0.0 {
            return None;
        }

        let start = options.range_start.unwrap_or(0);
        let length = options.range_length.unwrap_or(usize::MAX);
        let mut range = text.chars().skip(start).take(length).peekable();
        range.peek()?;

        let atlas = self.archive.select_atlas(height);
        let metrics = Metrics::new(
            atlas,
            height,
            options.spacing.unwrap_or(self.config.spacing),
            options.line_spacing.unwrap_or(self.config.line_spacing),
        );
        Some((atlas, metrics, range))
    }

    /// Walks the characters, returning the final horizontal cursor
    fn walk(
        &self,
        atlas: &'a GlyphAtlas,
        metrics: &Metrics,
        chars: impl Iterator<Item = char>,
        mut visit: impl FnMut(LayoutEvent<'a>),
    ) -> f32 {
        let space_advance = match atlas.glyph(SPACE_PROXY) {
            Some(proxy) => {
                (proxy.width as f32 - 2.0) * metrics.atlas_scale - 2.0 * metrics.spacing
            },
            None => metrics.spacing,
        };

        let mut x = 0.0_f32;
        let mut y = 0.0_f32;
        for ch in chars {
            match ch {
                ' ' => x += space_advance,
                '\n' => {
                    visit(LayoutEvent::LineBreak {
                        width: x - metrics.spacing,
                    });
                    x = 0.0;
                    y += metrics.line_advance();
                },
                _ => {
                    let record = atlas
                        .glyph(ch)
                        .or_else(|| atlas.glyph(self.config.unknown_glyph));
                    if let Some(record) = record {
                        visit(LayoutEvent::Glyph { record, x, y });
                        x += record.width as f32 * metrics.atlas_scale + metrics.spacing;
                    }
                },
            }
        }
        x
    }
}
