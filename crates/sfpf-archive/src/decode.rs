//! Atlas image codec backed by the `image` crate

use image::{ImageEncoder, ImageFormat};
use sfpf_core::{AtlasTexture, ImageDecoder, LoadError, Result, SfpfError};

/// Decodes any format the `image` crate recognizes (PNG in practice)
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCrateDecoder;

impl ImageCrateDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl ImageDecoder for ImageCrateDecoder {
    fn name(&self) -> &'static str {
        "image"
    }

    fn decode(&self, bytes: &[u8]) -> Result<AtlasTexture> {
        let format = image::guess_format(bytes).unwrap_or(ImageFormat::Png);
        let decoded = image::load_from_memory_with_format(bytes, format)
            .map_err(|e| SfpfError::Other(format!("{:?} decode failed: {}", format, e)))?
            .to_rgba8();
        let (width, height) = decoded.dimensions();
        Ok(AtlasTexture::from_rgba(width, height, decoded.into_raw())?)
    }
}

/// Encodes straight RGBA8 pixels as PNG, the format packages store atlases in
pub fn encode_png(width: u32, height: u32, rgba: &[u8]) -> Result<Vec<u8>> {
    let expected = width as usize * height as usize * 4;
    if rgba.len() != expected {
        return Err(LoadError::InvalidTexture {
            width,
            height,
            len: rgba.len(),
        }
        .into());
    }

    let mut png = Vec::new();
    image::codecs::png::PngEncoder::new(&mut png)
        .write_image(rgba, width, height, image::ExtendedColorType::Rgba8)
        .map_err(|e| SfpfError::Other(format!("PNG encoding failed: {}", e)))?;
    Ok(png)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_survives_encode_and_decode() {
        let pixels: Vec<u8> = (0..3 * 2).flat_map(|i| [i * 40, 10, 200, 255 - i]).collect();
        let png = encode_png(3, 2, &pixels).unwrap();
        let texture = ImageCrateDecoder::new().decode(&png).unwrap();

        assert_eq!((texture.width(), texture.height()), (3, 2));
        assert_eq!(texture.as_rgba(), pixels.as_slice());
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(ImageCrateDecoder::new().decode(b"not an image").is_err());
    }

    #[test]
    fn encode_checks_buffer_length() {
        assert!(encode_png(2, 2, &[0; 3]).is_err());
    }
}
