//! Error types for SFPF

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SfpfError>;

/// Main error type for SFPF
#[derive(Debug, Error)]
pub enum SfpfError {
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    #[error("Font loading failed: {0}")]
    Load(#[from] LoadError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

/// Package content that does not follow the `.sfpf` layout
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Package has no metadata entry")]
    MissingMetadata,

    #[error("Malformed metadata: {0}")]
    InvalidMetadata(String),

    #[error("Invalid size entry '{0}'")]
    InvalidSize(String),

    #[error("Malformed glyph line {line} in chars_data_{size}: {reason}")]
    MalformedGlyphLine {
        size: u32,
        line: usize,
        reason: String,
    },

    #[error("Glyph '{ch}' declared twice in chars_data_{size}")]
    DuplicateGlyph { size: u32, ch: char },
}

/// Failures that prevent a font from being loaded at all
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Font package not found: {0}")]
    FileNotFound(String),

    #[error("Invalid font package: {0}")]
    InvalidArchive(String),

    #[error("Atlas image for size {size} could not be decoded: {reason}")]
    ImageDecode { size: u32, reason: String },

    #[error("Invalid texture: {width}x{height} with {len} bytes")]
    InvalidTexture { width: u32, height: u32, len: usize },

    #[error("No usable atlas in {0}")]
    NoUsableAtlases(String),
}

/// Rendering backend errors
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}
