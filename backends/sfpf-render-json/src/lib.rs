//! JSON Recorder - the draw calls, without the pixels
//!
//! Collects every glyph draw the renderer emits and serializes them, so a
//! layout can be inspected, diffed in tests, or replayed by another
//! pipeline that owns the actual textures.

use serde::{Deserialize, Serialize};
use sfpf_core::{error::Result, DrawBackend, GlyphDraw, SfpfError};

/// Schema version for JSON output format
pub const JSON_SCHEMA_VERSION: &str = "1.0";

/// Atlas region a draw samples from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRegion {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// One recorded glyph draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawRecord {
    pub ch: char,
    pub atlas_size: u32, // Nominal size of the tier the glyph came from
    pub source: SourceRegion,
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub scale: f32,
    pub color: [u8; 4], // Tint, straight RGBA
}

/// Complete recording in a serializable form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    pub schema_version: String,
    pub draws: Vec<DrawRecord>,
}

/// Backend that remembers draw calls instead of rasterizing them
#[derive(Debug, Default, Clone)]
pub struct JsonRecorder {
    draws: Vec<DrawRecord>,
}

impl JsonRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draws(&self) -> &[DrawRecord] {
        &self.draws
    }

    pub fn len(&self) -> usize {
        self.draws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    pub fn clear(&mut self) {
        self.draws.clear();
    }

    pub fn into_output(self) -> JsonOutput {
        JsonOutput {
            schema_version: JSON_SCHEMA_VERSION.to_string(),
            draws: self.draws,
        }
    }

    /// Pretty-printed JSON of everything recorded so far
    pub fn to_json(&self) -> Result<String> {
        let output = JsonOutput {
            schema_version: JSON_SCHEMA_VERSION.to_string(),
            draws: self.draws.clone(),
        };
        log::debug!("Serializing {} recorded draws", output.draws.len());
        serde_json::to_string_pretty(&output)
            .map_err(|e| SfpfError::Other(format!("JSON serialization failed: {}", e)))
    }
}

impl DrawBackend for JsonRecorder {
    fn name(&self) -> &'static str {
        "JSON"
    }

    fn draw_glyph(&mut self, glyph: &GlyphDraw<'_>) {
        self.draws.push(DrawRecord {
            ch: glyph.ch,
            atlas_size: glyph.atlas.nominal_size(),
            source: SourceRegion {
                x: glyph.source.x,
                y: glyph.source.y,
                w: glyph.source.width,
                h: glyph.source.height,
            },
            x: glyph.position.x,
            y: glyph.position.y,
            rotation: glyph.rotation,
            scale: glyph.scale,
            color: [glyph.color.r, glyph.color.g, glyph.color.b, glyph.color.a],
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sfpf_core::{
        AtlasTexture, Color, FontArchive, FontConfig, GlyphAtlas, GlyphTable, LayoutOptions,
        OutlineParams, TextLayout, TextRenderer, Vec2,
    };

    fn archive() -> FontArchive {
        let texture = AtlasTexture::from_rgba(30, 10, vec![255; 30 * 10 * 4]).unwrap();
        let table = GlyphTable::parse(10, "A 0 8\nB 10 6\n? 20 5").unwrap();
        FontArchive::new(vec![GlyphAtlas::new(texture, table)]).unwrap()
    }

    #[test]
    fn records_each_glyph_in_order() {
        let archive = archive();
        let renderer = TextRenderer::new(TextLayout::new(&archive, FontConfig::default()));
        let mut recorder = JsonRecorder::new();
        renderer.draw(
            &mut recorder,
            "AB",
            Vec2::new(3.0, 4.0),
            Color::rgba(1, 2, 3, 4),
            10.0,
            0.0,
            &LayoutOptions::new(),
        );

        assert_eq!(recorder.len(), 2);
        let first = &recorder.draws()[0];
        assert_eq!(first.ch, 'A');
        assert_eq!(first.atlas_size, 10);
        assert_eq!(first.source, SourceRegion { x: 0, y: 0, w: 8, h: 10 });
        assert_eq!((first.x, first.y), (3.0, 4.0));
        assert_eq!(first.color, [1, 2, 3, 4]);
        assert_eq!(recorder.draws()[1].source.x, 10);
    }

    #[test]
    fn outline_pass_is_recorded_before_foreground() {
        let archive = archive();
        let renderer = TextRenderer::new(TextLayout::new(&archive, FontConfig::default()));
        let mut recorder = JsonRecorder::new();
        let outline = OutlineParams {
            color: Color::black(),
            width: 1.0,
            step: 1.0,
        };
        renderer.draw_outlined(
            &mut recorder,
            "A",
            Vec2::ZERO,
            Color::white(),
            &outline,
            10.0,
            0.0,
            &LayoutOptions::new(),
        );

        // -1, 0, 1 on each axis
        assert_eq!(recorder.len(), 9 + 1);
        assert!(recorder.draws()[..9].iter().all(|d| d.color == [0, 0, 0, 255]));
        assert_eq!(recorder.draws()[9].color, [255, 255, 255, 255]);
    }

    #[test]
    fn json_carries_schema_version() {
        let archive = archive();
        let renderer = TextRenderer::new(TextLayout::new(&archive, FontConfig::default()));
        let mut recorder = JsonRecorder::new();
        renderer.draw(
            &mut recorder,
            "Q",
            Vec2::ZERO,
            Color::white(),
            10.0,
            0.0,
            &LayoutOptions::new(),
        );

        let json = recorder.to_json().unwrap();
        let parsed: JsonOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.schema_version, JSON_SCHEMA_VERSION);
        assert_eq!(parsed.draws.len(), 1);
        assert_eq!(parsed.draws[0].ch, '?');
    }
}
