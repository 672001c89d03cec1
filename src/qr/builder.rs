//! Turns a [`GenerationRequest`] into a saved QR image

use crate::config::QrOptions;
use crate::error::{Error, Result};
use crate::qr::encoder::QrEncoder;
use crate::qr::{QrDecoder, logo};
use crate::request::GenerationRequest;
use image::RgbImage;
use std::fmt;
use std::path::{Path, PathBuf};

/// Non-fatal problems met while building an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildWarning {
    /// The logo could not be loaded; the image was built without it
    LogoSkipped {
        /// Logo that failed
        path: PathBuf,
        /// Underlying failure
        reason: String,
    },
    /// The image with the logo pasted no longer decodes to the payload
    LogoUnreadable,
}

impl fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildWarning::LogoSkipped { reason, .. } => {
                write!(f, "Logo could not be added: {reason}")
            }
            BuildWarning::LogoUnreadable => f.write_str(
                "The logo covers too much of the code; scanners may not be able to read it",
            ),
        }
    }
}

/// A finished bitmap and whatever went wrong on the way.
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    /// Final image, logo included when it loaded
    pub image: RgbImage,
    /// Warnings to surface to the user
    pub warnings: Vec<BuildWarning>,
}

/// Encodes, decorates and saves QR images.
#[derive(Debug, Clone)]
pub struct QrImageBuilder {
    encoder: QrEncoder,
    logo_size: u32,
    verify_logo: bool,
}

impl QrImageBuilder {
    /// Create a builder from the rendering options.
    pub fn new(options: &QrOptions) -> Self {
        Self {
            encoder: QrEncoder::new(options.box_size, options.border),
            logo_size: options.logo_size,
            verify_logo: options.verify_logo,
        }
    }

    /// Render the request into memory without touching the file system.
    pub fn render(&self, request: &GenerationRequest) -> Result<BuildOutcome> {
        request.validate()?;

        let symbol = self
            .encoder
            .render(&request.payload, request.fill, request.background)?;
        let symbol_pixels = symbol.symbol_pixels();
        let mut image = symbol.image;
        let mut warnings = Vec::new();

        if let Some(path) = request.logo.as_deref() {
            // Keep the occluded area well inside what level H can correct.
            let edge = self.logo_size.min(symbol_pixels / 4).max(1);
            if edge < self.logo_size {
                tracing::debug!(edge, requested = self.logo_size, "Clamped logo size");
            }

            match logo::load_logo(path, edge) {
                Ok(logo_img) => {
                    // Only blame the logo when the bare symbol still scans.
                    let check = self.verify_logo && decodes_to(&image, &request.payload);
                    if self.verify_logo && !check {
                        tracing::debug!(
                            fill = %request.fill,
                            background = %request.background,
                            "Bare symbol does not decode, skipping logo check"
                        );
                    }

                    logo::paste_centered(&mut image, &logo_img);
                    if check && !decodes_to(&image, &request.payload) {
                        tracing::warn!(logo = %path.display(), "QR code unreadable with logo");
                        warnings.push(BuildWarning::LogoUnreadable);
                    }
                }
                Err(err) => {
                    tracing::warn!(logo = %path.display(), "Skipping logo: {err}");
                    warnings.push(BuildWarning::LogoSkipped {
                        path: path.to_path_buf(),
                        reason: logo_reason(err),
                    });
                }
            }
        }

        Ok(BuildOutcome { image, warnings })
    }

    /// Render the request and write it to its destination.
    pub fn build(&self, request: &GenerationRequest) -> Result<BuildOutcome> {
        let outcome = self.render(request)?;
        save(&outcome.image, &request.destination)?;
        tracing::info!(
            destination = %request.destination.display(),
            width = outcome.image.width(),
            "Saved QR code"
        );
        Ok(outcome)
    }
}

impl Default for QrImageBuilder {
    fn default() -> Self {
        Self::new(&QrOptions::default())
    }
}

/// Write an image in the format implied by the destination's extension.
pub fn save(image: &RgbImage, destination: &Path) -> Result<()> {
    image.save(destination).map_err(|e| Error::Save {
        path: destination.to_path_buf(),
        reason: e.to_string(),
    })
}

fn decodes_to(image: &RgbImage, payload: &str) -> bool {
    matches!(QrDecoder::new().decode_rgb(image), Ok(text) if text == payload)
}

fn logo_reason(err: Error) -> String {
    match err {
        Error::Logo(reason) => reason,
        other => other.to_string(),
    }
}
