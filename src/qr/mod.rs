//! QR image construction
//!
//! The encoder turns text into a colored module grid, the logo helpers
//! composite an optional center image, and the builder ties both together
//! and saves the result. The decoder reads images back so logo overlays can
//! be checked for scannability.

pub mod builder;
mod decoder;
mod encoder;
pub mod logo;

pub use builder::{BuildOutcome, BuildWarning, QrImageBuilder};
pub use decoder::QrDecoder;
pub use encoder::{QrEncoder, RenderedSymbol};
