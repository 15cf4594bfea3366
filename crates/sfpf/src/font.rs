//! The loaded proof font object

use std::path::Path;

use sfpf_archive::ArchiveLoader;
use sfpf_core::{
    Color, DrawBackend, FontArchive, FontConfig, GlyphAtlas, LayoutOptions, MeasuredSize,
    OutlineParams, Result, TextLayout, TextRenderer, Vec2,
};

/// A loaded `.sfpf` package plus its spacing defaults
///
/// Measuring and drawing borrow the font immutably, so one font can serve
/// several threads at once. Spacing defaults belong to the instance; per
/// call overrides go through [`LayoutOptions`].
#[derive(Debug, Clone)]
pub struct ProofFont {
    archive: FontArchive,
    config: FontConfig,
}

impl ProofFont {
    /// Loads a package with default settings
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with(&ArchiveLoader::new(), path)
    }

    /// Loads a package through a specific loader (e.g. a custom decoder)
    pub fn load_with(loader: &ArchiveLoader, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let font = Self::from_archive(loader.load(path)?);
        log::debug!(
            "Proof font {} ready, decoder {}",
            path.display(),
            loader.decoder_name()
        );
        Ok(font)
    }

    pub fn from_archive(archive: FontArchive) -> Self {
        Self::with_config(archive, FontConfig::default())
    }

    pub fn with_config(archive: FontArchive, config: FontConfig) -> Self {
        Self { archive, config }
    }

    pub fn archive(&self) -> &FontArchive {
        &self.archive
    }

    pub fn config(&self) -> &FontConfig {
        &self.config
    }

    pub fn spacing(&self) -> f32 {
        self.config.spacing
    }

    pub fn set_spacing(&mut self, spacing: f32) {
        self.config.spacing = spacing;
    }

    pub fn line_spacing(&self) -> f32 {
        self.config.line_spacing
    }

    pub fn set_line_spacing(&mut self, line_spacing: f32) {
        self.config.line_spacing = line_spacing;
    }

    pub fn set_unknown_glyph(&mut self, ch: char) {
        self.config.unknown_glyph = ch;
    }

    /// Nominal sizes of the loaded tiers, ascending
    pub fn sizes(&self) -> Vec<u32> {
        self.archive.sizes()
    }

    pub fn select_atlas(&self, height: f32) -> &GlyphAtlas {
        self.archive.select_atlas(height)
    }

    /// Whether the tier used at `height` has its own glyph for `ch`
    pub fn contains_char(&self, ch: char, height: f32) -> bool {
        self.select_atlas(height).table().contains(ch)
    }

    pub fn layout(&self) -> TextLayout<'_> {
        TextLayout::new(&self.archive, self.config)
    }

    pub fn renderer(&self) -> TextRenderer<'_> {
        TextRenderer::new(self.layout())
    }

    pub fn measure(&self, text: &str, height: f32, options: &LayoutOptions) -> MeasuredSize {
        self.layout().measure(text, height, options)
    }

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
        self.renderer()
            .draw(backend, text, position, color, height, rotation, options);
    }

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
        self.renderer().draw_outlined(
            backend, text, position, color, outline, height, rotation, options,
        );
    }

    /// Releases every atlas texture; returns how many were released
    pub fn dispose(self) -> usize {
        self.archive.dispose()
    }
}
