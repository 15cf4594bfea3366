//! Opening `.sfpf` packages
//!
//! A package is a zip archive. It is extracted into a fresh temporary
//! directory per load, read tier by tier, and the directory is removed when
//! the load returns, successfully or not.
//!
//! Failure policy:
//!
//! - a missing or malformed `metadata` entry aborts the load
//! - a tier without its atlas image or glyph table is skipped
//! - a tier whose glyph table or image is broken is skipped with a warning
//! - a load that ends with no tier at all fails

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::Path;
use std::sync::Arc;

use sfpf_core::{
    FontArchive, FormatError, GlyphAtlas, GlyphTable, ImageDecoder, LoadError, Result, SfpfError,
};
use zip::ZipArchive;

use crate::decode::ImageCrateDecoder;
use crate::manifest::{atlas_entry, chars_entry, parse_sizes, METADATA_ENTRY};

const SCRATCH_PREFIX: &str = "sfpf-";

/// Loads packages using a pluggable image decoder
#[derive(Clone)]
pub struct ArchiveLoader {
    decoder: Arc<dyn ImageDecoder>,
}

impl Default for ArchiveLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveLoader {
    /// Loader decoding atlases with the `image` crate
    pub fn new() -> Self {
        Self::with_decoder(Arc::new(ImageCrateDecoder::new()))
    }

    pub fn with_decoder(decoder: Arc<dyn ImageDecoder>) -> Self {
        Self { decoder }
    }

    pub fn decoder_name(&self) -> &'static str {
        self.decoder.name()
    }

    /// Opens the package at `path` and builds every usable tier
    pub fn load(&self, path: impl AsRef<Path>) -> Result<FontArchive> {
        let path = path.as_ref();
        let origin = path.display().to_string();

        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => SfpfError::from(LoadError::FileNotFound(origin.clone())),
            _ => SfpfError::from(e),
        })?;
        let mut zip = ZipArchive::new(BufReader::new(file))
            .map_err(|e| LoadError::InvalidArchive(format!("{}: {}", origin, e)))?;

        let scratch = tempfile::Builder::new()
            .prefix(SCRATCH_PREFIX)
            .tempdir()?;
        log::debug!("Extracting {} into {}", origin, scratch.path().display());
        zip.extract(scratch.path())
            .map_err(|e| LoadError::InvalidArchive(format!("{}: {}", origin, e)))?;

        let archive = self.load_extracted(scratch.path(), &origin);
        if let Err(e) = scratch.close() {
            log::warn!("Could not remove scratch directory for {}: {}", origin, e);
        }
        archive
    }

    /// Builds tiers from a directory holding the entries of a package
    pub fn load_extracted(&self, dir: &Path, origin: &str) -> Result<FontArchive> {
        let metadata = match fs::read(dir.join(METADATA_ENTRY)) {
            Ok(bytes) => String::from_utf8(bytes)
                .map_err(|_| FormatError::InvalidMetadata("metadata is not UTF-8".into()))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(FormatError::MissingMetadata.into())
            },
            Err(e) => return Err(e.into()),
        };
        let sizes = parse_sizes(&metadata)?;
        log::debug!("{} declares sizes {:?}", origin, sizes);

        let mut atlases = Vec::with_capacity(sizes.len());
        for size in sizes {
            match self.load_tier(dir, size) {
                Ok(Some(atlas)) => atlases.push(atlas),
                Ok(None) => {},
                Err(e) => log::warn!("Skipping size {} of {}: {}", size, origin, e),
            }
        }

        if atlases.is_empty() {
            return Err(LoadError::NoUsableAtlases(origin.to_string()).into());
        }
        let archive = FontArchive::new(atlases)?;
        log::info!("Loaded {} with atlas sizes {:?}", origin, archive.sizes());
        Ok(archive)
    }

    fn load_tier(&self, dir: &Path, size: u32) -> Result<Option<GlyphAtlas>> {
        let atlas_path = dir.join(atlas_entry(size));
        let chars_path = dir.join(chars_entry(size));
        if !atlas_path.is_file() || !chars_path.is_file() {
            log::warn!(
                "Size {} is declared but its atlas or glyph table is missing",
                size
            );
            return Ok(None);
        }

        let table = GlyphTable::parse(size, &fs::read_to_string(&chars_path)?)?;
        let bytes = fs::read(&atlas_path)?;
        let mut texture = self
            .decoder
            .decode(&bytes)
            .map_err(|e| LoadError::ImageDecode {
                size,
                reason: format!("{} ({})", e, self.decoder.name()),
            })?;
        texture.normalize_alpha();

        if texture.height() != size {
            log::debug!(
                "Atlas declared as size {} is {} pixels high",
                size,
                texture.height()
            );
        }
        log::debug!(
            "Loaded size {}: {} glyphs, {}x{} texture",
            size,
            table.len(),
            texture.width(),
            texture.height()
        );
        Ok(Some(GlyphAtlas::new(texture, table)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_reported_as_not_found() {
        let err = ArchiveLoader::new()
            .load("/definitely/not/here.sfpf")
            .unwrap_err();
        assert!(matches!(err, SfpfError::Load(LoadError::FileNotFound(_))));
    }

    #[test]
    fn non_zip_file_is_an_invalid_archive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.sfpf");
        fs::write(&path, b"this is not a zip file").unwrap();

        let err = ArchiveLoader::new().load(&path).unwrap_err();
        assert!(matches!(err, SfpfError::Load(LoadError::InvalidArchive(_))));
    }

    #[test]
    fn extracted_directory_without_metadata_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = ArchiveLoader::new()
            .load_extracted(dir.path(), "scratch")
            .unwrap_err();
        assert!(matches!(err, SfpfError::Format(FormatError::MissingMetadata)));
    }
}
