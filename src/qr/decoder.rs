//! QR code decoder using rqrr

use crate::error::{Error, Result};
use image::{DynamicImage, GrayImage, RgbImage};

/// Reads rendered symbols back, used to confirm a logo overlay left the code scannable.
#[derive(Debug, Default, Clone, Copy)]
pub struct QrDecoder;

impl QrDecoder {
    /// Create a new QR decoder with default settings
    pub fn new() -> Self {
        Self
    }

    /// Decode the first QR code found in an image
    pub fn decode(&self, img: &DynamicImage) -> Result<String> {
        self.decode_gray(img.to_luma8())
    }

    /// Decode the first QR code found in an RGB bitmap
    pub fn decode_rgb(&self, img: &RgbImage) -> Result<String> {
        self.decode_gray(DynamicImage::ImageRgb8(img.clone()).to_luma8())
    }

    fn decode_gray(&self, img: GrayImage) -> Result<String> {
        let mut prepared = rqrr::PreparedImage::prepare(img);
        let grids = prepared.detect_grids();

        let Some(grid) = grids.first() else {
            return Err(Error::NoQrCodeFound);
        };

        match grid.decode() {
            Ok((meta, content)) => {
                tracing::debug!(
                    "Decoded QR: version={:?}, ecc_level={:?}, length={}",
                    meta.version,
                    meta.ecc_level,
                    content.len()
                );
                Ok(content)
            }
            Err(e) => Err(Error::QrDecode(format!("Decode failed: {:?}", e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_image_has_no_code() {
        let blank = GrayImage::from_pixel(120, 120, image::Luma([255]));
        let result = QrDecoder::new().decode(&DynamicImage::ImageLuma8(blank));
        assert!(matches!(result, Err(Error::NoQrCodeFound)));
    }
}
