//! Packing atlases into a `.sfpf` package
//!
//! The writer only assembles what already exists: atlas images and their
//! glyph tables. It never rasterizes a font.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufWriter, Cursor, Seek, Write};
use std::path::Path;

use sfpf_core::{GlyphTable, LoadError, Result};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::decode::encode_png;
use crate::manifest::{atlas_entry, chars_entry, format_sizes, METADATA_ENTRY};

/// Collects tiers and writes them as a zip package
#[derive(Debug, Default, Clone)]
pub struct PackageWriter {
    sizes: BTreeSet<u32>,
    atlases: BTreeMap<u32, Vec<u8>>,
    chars_data: BTreeMap<u32, String>,
}

impl PackageWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lists `size` in the metadata even if no entries are added for it
    pub fn declare_size(&mut self, size: u32) -> &mut Self {
        self.sizes.insert(size);
        self
    }

    /// Stores already encoded image bytes as `atlas_<size>`
    pub fn add_atlas_image(&mut self, size: u32, image: Vec<u8>) -> &mut Self {
        self.sizes.insert(size);
        self.atlases.insert(size, image);
        self
    }

    /// Stores raw glyph table text as `chars_data_<size>`
    pub fn add_chars_data(&mut self, size: u32, chars_data: impl Into<String>) -> &mut Self {
        self.sizes.insert(size);
        self.chars_data.insert(size, chars_data.into());
        self
    }

    /// Adds a complete tier from an encoded image and its table
    pub fn add_tier(&mut self, size: u32, image: Vec<u8>, table: &GlyphTable) -> &mut Self {
        self.add_atlas_image(size, image)
            .add_chars_data(size, table.to_chars_data())
    }

    /// Adds a complete tier from straight RGBA8 pixels, encoding them as PNG
    pub fn add_rgba_tier(
        &mut self,
        size: u32,
        width: u32,
        height: u32,
        rgba: &[u8],
        table: &GlyphTable,
    ) -> Result<&mut Self> {
        let png = encode_png(width, height, rgba)?;
        Ok(self.add_tier(size, png, table))
    }

    /// Declared sizes, ascending
    pub fn sizes(&self) -> Vec<u32> {
        self.sizes.iter().copied().collect()
    }

    /// Writes the package to `path`, replacing any existing file
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path.as_ref())?;
        let mut out = BufWriter::new(file);
        self.write(&mut out)?;
        out.flush()?;
        log::debug!(
            "Wrote package {} with sizes {:?}",
            path.as_ref().display(),
            self.sizes
        );
        Ok(())
    }

    /// Builds the package in memory
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Cursor::new(Vec::new());
        self.write(&mut out)?;
        Ok(out.into_inner())
    }

    fn write<W: Write + Seek>(&self, out: &mut W) -> Result<()> {
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let mut zip = ZipWriter::new(out);

        for (&size, image) in &self.atlases {
            zip.start_file(atlas_entry(size), options).map_err(zip_error)?;
            zip.write_all(image)?;
        }
        for (&size, text) in &self.chars_data {
            zip.start_file(chars_entry(size), options).map_err(zip_error)?;
            zip.write_all(text.as_bytes())?;
        }

        let sizes = self.sizes();
        zip.start_file(METADATA_ENTRY, options).map_err(zip_error)?;
        zip.write_all(format_sizes(&sizes).as_bytes())?;

        zip.finish().map_err(zip_error)?;
        Ok(())
    }
}

fn zip_error(e: zip::result::ZipError) -> LoadError {
    LoadError::InvalidArchive(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    #[test]
    fn package_lists_every_entry() {
        let table = GlyphTable::parse(8, "A 0 2").unwrap();
        let mut writer = PackageWriter::new();
        writer
            .add_rgba_tier(8, 2, 8, &[255; 2 * 8 * 4], &table)
            .unwrap()
            .declare_size(16);

        let bytes = writer.to_bytes().unwrap();
        let mut zip = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut names: Vec<&str> = zip.file_names().collect();
        names.sort_unstable();
        assert_eq!(names, vec!["atlas_8", "chars_data_8", "metadata"]);

        let mut metadata = String::new();
        zip.by_name("metadata")
            .unwrap()
            .read_to_string(&mut metadata)
            .unwrap();
        assert_eq!(metadata, "sizes: 8,16");

        let mut chars = String::new();
        zip.by_name("chars_data_8")
            .unwrap()
            .read_to_string(&mut chars)
            .unwrap();
        assert_eq!(chars, "A 0 2");
    }
}
