//! Error types for qrforge operations

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using qrforge's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for qrforge operations
#[derive(Error, Debug)]
pub enum Error {
    /// The text to encode was empty
    #[error("Missing input: enter text or a link to encode")]
    EmptyPayload,

    /// QR code encoding failed
    #[error("Failed to encode QR code: {0}")]
    QrEncode(String),

    /// QR code decoding failed
    #[error("Failed to decode QR code: {0}")]
    QrDecode(String),

    /// No QR code found in image
    #[error("No QR code found in image")]
    NoQrCodeFound,

    /// Image processing error
    #[error("Image processing error: {0}")]
    Image(String),

    /// The finished image could not be written
    #[error("Could not save QR code to {}: {reason}", path.display())]
    Save {
        /// Destination that was being written
        path: PathBuf,
        /// Underlying failure
        reason: String,
    },

    /// Logo could not be loaded or composited
    #[error("Logo could not be added: {0}")]
    Logo(String),

    /// Unparseable color value
    #[error("Invalid color '{0}'")]
    Color(String),

    /// Batch run could not start
    #[error("Batch error: {0}")]
    Batch(String),

    /// History log could not be written or read
    #[error("History log error: {0}")]
    History(String),

    /// CSV parsing or writing error
    #[error("CSV error: {0}")]
    Csv(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e.to_string())
    }
}

impl From<qrcode::types::QrError> for Error {
    fn from(e: qrcode::types::QrError) -> Self {
        Error::QrEncode(e.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::Csv(e.to_string())
    }
}
