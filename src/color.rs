//! Opaque sRGB colors accepted by the form, config file and CLI

use crate::error::{Error, Result};
use image::Rgb;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An opaque sRGB color.
///
/// Parses anything CSS accepts (`black`, `#1e90ff`, `rgb(30 144 255)`, ...).
/// Any alpha component is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RgbColor(pub [u8; 3]);

impl RgbColor {
    /// Default module color
    pub const BLACK: Self = Self([0, 0, 0]);
    /// Default background color
    pub const WHITE: Self = Self([255, 255, 255]);

    /// Parse a CSS color string.
    pub fn parse(value: &str) -> Result<Self> {
        let color = value
            .trim()
            .parse::<csscolorparser::Color>()
            .map_err(|_| Error::Color(value.to_string()))?;
        let [r, g, b, _] = color.to_rgba8();
        Ok(Self([r, g, b]))
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.0;
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Pixel value for image buffers.
    pub fn pixel(self) -> Rgb<u8> {
        Rgb(self.0)
    }
}

impl FromStr for RgbColor {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl TryFrom<String> for RgbColor {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<RgbColor> for String {
    fn from(color: RgbColor) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_colors() {
        assert_eq!(RgbColor::parse("black").unwrap(), RgbColor::BLACK);
        assert_eq!(RgbColor::parse("White").unwrap(), RgbColor::WHITE);
    }

    #[test]
    fn test_parse_hex() {
        let color: RgbColor = "#1e90ff".parse().unwrap();
        assert_eq!(color.0, [0x1e, 0x90, 0xff]);
        assert_eq!(color.to_string(), "#1e90ff");
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(RgbColor::parse("not-a-color"), Err(Error::Color(_))));
    }
}
