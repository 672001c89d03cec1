//! QR symbol encoder and module-grid renderer

use crate::color::RgbColor;
use crate::error::Result;
use image::{ImageBuffer, RgbImage};
use qrcode::{Color, EcLevel, QrCode};

/// Renders text into a colored QR bitmap.
///
/// Version selection is left to the encoder, which picks the smallest
/// symbol that fits the payload at error-correction level H.
#[derive(Debug, Clone)]
pub struct QrEncoder {
    box_size: u32,
    border: u32,
}

/// A rendered symbol plus the geometry the logo step needs.
#[derive(Debug, Clone)]
pub struct RenderedSymbol {
    /// Finished bitmap including the quiet border
    pub image: RgbImage,
    /// Symbol width in modules, quiet border excluded
    pub modules: u32,
    /// Pixels per module edge
    pub box_size: u32,
}

impl RenderedSymbol {
    /// Width of the symbol itself in pixels, quiet border excluded.
    pub fn symbol_pixels(&self) -> u32 {
        self.modules * self.box_size
    }
}

impl QrEncoder {
    /// Create an encoder at level H with the given module scale and border.
    pub fn new(box_size: u32, border: u32) -> Self {
        Self {
            box_size: box_size.max(1),
            border,
        }
    }

    /// Encode `data` and paint it with `fill` modules on `background`.
    pub fn render(&self, data: &str, fill: RgbColor, background: RgbColor) -> Result<RenderedSymbol> {
        let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::H)?;
        let width = code.width();
        let colors = code.to_colors();

        tracing::debug!(
            version = ?code.version(),
            modules = width,
            bytes = data.len(),
            "Encoded QR symbol"
        );

        let modules = width as u32;
        let side = (modules + 2 * self.border) * self.box_size;
        let (box_size, border) = (self.box_size, self.border);
        let (dark, light) = (fill.pixel(), background.pixel());

        let image = ImageBuffer::from_fn(side, side, |x, y| {
            let mx = x / box_size;
            let my = y / box_size;
            if mx < border || my < border || mx >= border + modules || my >= border + modules {
                return light;
            }
            let index = ((my - border) * modules + (mx - border)) as usize;
            match colors[index] {
                Color::Dark => dark,
                Color::Light => light,
            }
        });

        Ok(RenderedSymbol {
            image,
            modules,
            box_size,
        })
    }
}

impl Default for QrEncoder {
    fn default() -> Self {
        Self::new(10, 4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qr::QrDecoder;

    #[test]
    fn test_geometry_includes_border() {
        let encoder = QrEncoder::new(10, 4);
        let rendered = encoder
            .render("hi", RgbColor::BLACK, RgbColor::WHITE)
            .unwrap();

        // Version 1 is 21 modules wide.
        assert_eq!(rendered.modules, 21);
        assert_eq!(rendered.symbol_pixels(), 210);
        assert_eq!(rendered.image.width(), (21 + 8) * 10);
        assert_eq!(rendered.image.height(), rendered.image.width());
        assert_eq!(*rendered.image.get_pixel(0, 0), RgbColor::WHITE.pixel());
        // Top-left finder pattern starts right after the border.
        assert_eq!(*rendered.image.get_pixel(40, 40), RgbColor::BLACK.pixel());
    }

    #[test]
    fn test_version_grows_with_payload() {
        let encoder = QrEncoder::default();
        let short = encoder.render("a", RgbColor::BLACK, RgbColor::WHITE).unwrap();
        let long = encoder
            .render(&"x".repeat(300), RgbColor::BLACK, RgbColor::WHITE)
            .unwrap();
        assert!(long.modules > short.modules);
    }

    #[test]
    fn test_custom_colors_painted() {
        let fill = RgbColor([0, 0, 128]);
        let background = RgbColor([255, 250, 205]);
        let rendered = QrEncoder::default().render("colors", fill, background).unwrap();

        assert_eq!(*rendered.image.get_pixel(0, 0), background.pixel());
        assert_eq!(*rendered.image.get_pixel(45, 45), fill.pixel());
    }

    #[test]
    fn test_round_trip() {
        let rendered = QrEncoder::default()
            .render("Test payload for round trip", RgbColor::BLACK, RgbColor::WHITE)
            .unwrap();
        let decoded = QrDecoder::new().decode_rgb(&rendered.image).unwrap();
        assert_eq!(decoded, "Test payload for round trip");
    }
}
