//! `.sfpf` packages: the file format of a proof font
//!
//! A package is a zip archive holding, for every nominal size `n` listed in
//! its `metadata` entry, an `atlas_<n>` image and a `chars_data_<n>` glyph
//! table:
//!
//! ```text
//! metadata        sizes: 12,24,48
//! atlas_12        PNG, 12 pixels high
//! chars_data_12   A 0 7
//!                 B 17 6
//! ...
//! ```
//!
//! [`ArchiveLoader`] turns a package into a [`sfpf_core::FontArchive`];
//! [`PackageWriter`] assembles one from existing atlases.

pub mod decode;
pub mod loader;
pub mod manifest;
pub mod writer;

pub use decode::{encode_png, ImageCrateDecoder};
pub use loader::ArchiveLoader;
pub use writer::PackageWriter;

use std::path::Path;

use sfpf_core::{FontArchive, Result};

/// Loads a package with the default image decoder
pub fn load(path: impl AsRef<Path>) -> Result<FontArchive> {
    ArchiveLoader::new().load(path)
}
