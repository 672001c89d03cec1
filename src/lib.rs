//! qrforge - desktop QR code generator
//!
//! Type some text, pick colors, optionally drop a logo in the middle and save
//! the result as an image. A CSV file can be turned into one image per row,
//! and every single generation is appended to a history log.
//!
//! # Features
//!
//! - **QR images**: level-H symbols rendered at a fixed module scale in any
//!   CSS color, with an optional centered logo
//! - **Batch export**: one image per CSV row, named after its payload
//! - **History**: append-only `payload,destination` CSV log
//! - **Desktop form**: an eframe window with native dialogs (`gui` feature)
//!
//! # Example
//!
//! ```no_run
//! use qrforge::{GenerationRequest, QrImageBuilder, RgbColor};
//!
//! fn main() -> qrforge::Result<()> {
//!     let builder = QrImageBuilder::default();
//!     let request = GenerationRequest::new("https://example.com", "example.png")
//!         .with_colors(RgbColor::parse("navy")?, RgbColor::WHITE);
//!
//!     let outcome = builder.build(&request)?;
//!     for warning in &outcome.warnings {
//!         eprintln!("warning: {warning}");
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod app;
pub mod batch;
pub mod color;
pub mod config;
pub mod error;
pub mod history;
pub mod logging;
pub mod output;
pub mod qr;
pub mod request;
pub mod resources;

// Re-exports for convenience
pub use error::{Error, Result};

pub use app::{Dialogs, FormController, FormState, Notice, NoticeLevel};
pub use batch::{BatchFailure, BatchReport, BatchRunner};
pub use color::RgbColor;
pub use config::{AssetOptions, HistoryOptions, LogRotation, LoggingOptions, QrOptions, QrforgeConfig};
pub use history::{HistoryEntry, HistoryRecorder};
pub use qr::{BuildOutcome, BuildWarning, QrDecoder, QrEncoder, QrImageBuilder};
pub use request::{GenerationRequest, normalize_file_name};
pub use resources::ResourceLocator;
