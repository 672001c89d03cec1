//! Loading and pasting the optional center logo

use crate::error::{Error, Result};
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage, RgbaImage};
use std::path::Path;

/// Open a logo, flatten any transparency onto white and scale it to `size`×`size`.
pub fn load_logo(path: &Path, size: u32) -> Result<RgbImage> {
    let img = image::open(path).map_err(|e| Error::Logo(format!("{}: {e}", path.display())))?;

    let rgb = if img.color().has_alpha() {
        flatten_on_white(&img.to_rgba8())
    } else {
        img.to_rgb8()
    };

    Ok(imageops::resize(&rgb, size, size, FilterType::CatmullRom))
}

/// Alpha-blend every pixel over an opaque white background.
pub fn flatten_on_white(img: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(img.width(), img.height(), |x, y| {
        let [r, g, b, a] = img.get_pixel(x, y).0;
        let a = a as u16;
        let blend = |c: u8| ((c as u16 * a + 255 * (255 - a) + 127) / 255) as u8;
        Rgb([blend(r), blend(g), blend(b)])
    })
}

/// Paste `logo` over the middle of `canvas`.
pub fn paste_centered(canvas: &mut RgbImage, logo: &RgbImage) {
    let x = canvas.width().saturating_sub(logo.width()) / 2;
    let y = canvas.height().saturating_sub(logo.height()) / 2;
    imageops::replace(canvas, logo, x as i64, y as i64);
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_flatten_transparent_becomes_white() {
        let mut img = RgbaImage::from_pixel(2, 1, Rgba([10, 20, 30, 0]));
        img.put_pixel(1, 0, Rgba([10, 20, 30, 255]));

        let flat = flatten_on_white(&img);
        assert_eq!(*flat.get_pixel(0, 0), Rgb([255, 255, 255]));
        assert_eq!(*flat.get_pixel(1, 0), Rgb([10, 20, 30]));
    }

    #[test]
    fn test_paste_centered() {
        let mut canvas = RgbImage::from_pixel(10, 10, Rgb([255, 255, 255]));
        let logo = RgbImage::from_pixel(4, 4, Rgb([1, 2, 3]));
        paste_centered(&mut canvas, &logo);

        assert_eq!(*canvas.get_pixel(3, 3), Rgb([1, 2, 3]));
        assert_eq!(*canvas.get_pixel(6, 6), Rgb([1, 2, 3]));
        assert_eq!(*canvas.get_pixel(2, 2), Rgb([255, 255, 255]));
        assert_eq!(*canvas.get_pixel(7, 7), Rgb([255, 255, 255]));
    }

    #[test]
    fn test_load_logo_resizes_and_flattens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        RgbaImage::from_pixel(120, 80, Rgba([200, 0, 0, 0]))
            .save(&path)
            .unwrap();

        let logo = load_logo(&path, 50).unwrap();
        assert_eq!(logo.dimensions(), (50, 50));
        assert_eq!(*logo.get_pixel(25, 25), Rgb([255, 255, 255]));
    }

    #[test]
    fn test_load_logo_rejects_non_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        assert!(matches!(load_logo(&path, 50), Err(Error::Logo(_))));
    }
}
