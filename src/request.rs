//! The snapshot of form values handed to the image builder

use crate::color::RgbColor;
use crate::error::{Error, Result};
use std::path::PathBuf;

/// Extension every generated file carries.
pub const IMAGE_EXTENSION: &str = "png";

/// File name used when the filename field is left empty.
pub const DEFAULT_FILE_NAME: &str = "qr_code.png";

/// Everything needed to render and save one QR image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Text or link to encode
    pub payload: String,
    /// Where the finished image is written
    pub destination: PathBuf,
    /// Module color
    pub fill: RgbColor,
    /// Background and quiet-border color
    pub background: RgbColor,
    /// Optional image pasted over the center of the symbol
    pub logo: Option<PathBuf>,
}

impl GenerationRequest {
    /// Create a request with the default black-on-white colors and no logo.
    pub fn new(payload: impl Into<String>, destination: impl Into<PathBuf>) -> Self {
        Self {
            payload: payload.into(),
            destination: destination.into(),
            fill: RgbColor::BLACK,
            background: RgbColor::WHITE,
            logo: None,
        }
    }

    /// Set module and background colors.
    pub fn with_colors(mut self, fill: RgbColor, background: RgbColor) -> Self {
        self.fill = fill;
        self.background = background;
        self
    }

    /// Attach a logo path.
    pub fn with_logo(mut self, logo: impl Into<PathBuf>) -> Self {
        self.logo = Some(logo.into());
        self
    }

    /// Reject requests that would encode nothing.
    pub fn validate(&self) -> Result<()> {
        if self.payload.is_empty() {
            return Err(Error::EmptyPayload);
        }
        Ok(())
    }
}

/// Normalise a user-typed file name so it ends in `.png`.
///
/// An empty name becomes [`DEFAULT_FILE_NAME`].
pub fn normalize_file_name(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        return DEFAULT_FILE_NAME.to_string();
    }

    let suffix = format!(".{IMAGE_EXTENSION}");
    if name.to_ascii_lowercase().ends_with(&suffix) {
        name.to_string()
    } else {
        format!("{name}{suffix}")
    }
}
