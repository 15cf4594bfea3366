//! Text renderer: layout output handed to a [`DrawBackend`]
//!
//! Outlined text is drawn as a grid of offset copies in the outline color
//! followed by one pass in the foreground color. The offset copies are
//! always axis-aligned: they are submitted with zero rotation whatever
//! rotation the caller asked for.

use crate::layout::{GlyphDraw, LayoutOptions, TextLayout};
use crate::traits::DrawBackend;
use crate::types::Vec2;
use crate::Color;

/// How an outline is built around text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlineParams {
    pub color: Color,
    /// Distance of the outermost copies from the anchor, in pixels
    pub width: f32,
    /// Grid step over `[-1, 1]` in both directions
    pub step: f32,
}

impl Default for OutlineParams {
    fn default() -> Self {
        Self {
            color: Color::black(),
            width: 2.0,
            step: 0.5,
        }
    }
}

/// Finest outline grid step; 65 offsets per axis
pub const MIN_OUTLINE_STEP: f32 = 1.0 / 32.0;

impl OutlineParams {
    /// Grid coordinates `-1, -1 + step, ..., <= 1`
    pub fn offsets(&self) -> Vec<f32> {
        let step = if !(self.step.is_finite() && self.step > 0.0) {
            log::warn!("Outline step {} is not positive, using 1", self.step);
            1.0
        } else if self.step < MIN_OUTLINE_STEP {
            log::warn!(
                "Outline step {} is below {}, clamping",
                self.step,
                MIN_OUTLINE_STEP
            );
            MIN_OUTLINE_STEP
        } else {
            self.step
        };
        let count = (2.0 / step + 1e-4).floor() as usize;
        (0..=count).map(|k| -1.0 + k as f32 * step).collect()
    }
}

/// Draws laid out text through a backend
#[derive(Debug, Clone, Copy)]
pub struct TextRenderer<'a> {
    layout: TextLayout<'a>,
}

impl<'a> TextRenderer<'a> {
    pub fn new(layout: TextLayout<'a>) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &TextLayout<'a> {
        &self.layout
    }

    /// Submits one draw request per visible glyph
    #[allow(clippy::too_many_arguments)]
    pub fn draw<B: DrawBackend + ?Sized>(
        &self,
        backend: &mut B,
        text: &str,
        position: Vec2,
        color: Color,
        height: f32,
        rotation: f32,
        options: &LayoutOptions,
    ) {
        self.layout
            .emit(text, position, color, height, rotation, options, |glyph| {
                backend.draw_glyph(&glyph)
            });
    }

    /// Draws the outline grid, then the text itself on top
    #[allow(clippy::too_many_arguments)]
    pub fn draw_outlined<B: DrawBackend + ?Sized>(
        &self,
        backend: &mut B,
        text: &str,
        position: Vec2,
        color: Color,
        outline: &OutlineParams,
        height: f32,
        rotation: f32,
        options: &LayoutOptions,
    ) {
        let offsets = outline.offsets();
        log::trace!(
            "Outline pass on {} with {} offsets",
            backend.name(),
            offsets.len() * offsets.len()
        );
        // One layout walk, replayed at every grid offset
        let glyphs = self
            .layout
            .glyphs(text, position, outline.color, height, 0.0, options);
        for &i in &offsets {
            for &j in &offsets {
                let shift = Vec2::new(i, j) * outline.width;
                for glyph in &glyphs {
                    let shifted = GlyphDraw {
                        position: glyph.position + shift,
                        ..*glyph
                    };
                    backend.draw_glyph(&shifted);
                }
            }
        }
        self.draw(backend, text, position, color, height, rotation, options);
    }
}
