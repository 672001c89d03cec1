//! One QR image per row of a CSV file
//!
//! Rows are processed in file order. A row that fails is recorded in the
//! report and the run moves on to the next one; only a missing input file or
//! an output directory that cannot be created stops the whole run.

use crate::color::RgbColor;
use crate::error::{Error, Result};
use crate::qr::QrImageBuilder;
use crate::request::{GenerationRequest, IMAGE_EXTENSION};
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// A row that produced no image
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchFailure {
    /// 1-based record number in the input file
    pub row: usize,
    /// First field of the row, empty when it could not be read
    pub payload: String,
    /// Why the row failed
    pub reason: String,
}

/// Summary of a finished batch run
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// Directory images were written to
    pub output_dir: PathBuf,
    /// Written files, in input order
    pub written: Vec<PathBuf>,
    /// Skipped rows, in input order
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    /// Whether every row produced an image
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Loops the image builder over the rows of an input table.
#[derive(Debug, Clone)]
pub struct BatchRunner<'a> {
    builder: &'a QrImageBuilder,
    fill: RgbColor,
    background: RgbColor,
}

impl<'a> BatchRunner<'a> {
    /// Create a runner painting every code in the given colors.
    pub fn new(builder: &'a QrImageBuilder, fill: RgbColor, background: RgbColor) -> Self {
        Self {
            builder,
            fill,
            background,
        }
    }

    /// Generate `<output_dir>/<payload>.png` for the first field of every row of `input`.
    pub fn run(&self, input: &Path, output_dir: &Path) -> Result<BatchReport> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(input)
            .map_err(|e| Error::Batch(format!("Cannot read {}: {e}", input.display())))?;

        fs::create_dir_all(output_dir).map_err(|e| {
            Error::Batch(format!("Cannot create {}: {e}", output_dir.display()))
        })?;

        tracing::info!(input = %input.display(), output = %output_dir.display(), "Starting batch");

        let mut report = BatchReport {
            output_dir: output_dir.to_path_buf(),
            ..BatchReport::default()
        };
        let mut claimed: HashMap<PathBuf, usize> = HashMap::new();

        for (index, record) in reader.records().enumerate() {
            let row = index + 1;
            let payload = match record {
                Ok(record) => record.get(0).unwrap_or_default().to_string(),
                Err(e) => {
                    report.failures.push(skip(row, String::new(), e.into()));
                    continue;
                }
            };

            let destination = destination_for(output_dir, &payload);
            if let Some(&first) = claimed.get(&destination) {
                let err = Error::Batch(format!(
                    "{} was already written for row {first}",
                    destination.display()
                ));
                report.failures.push(skip(row, payload, err));
                continue;
            }

            let request = GenerationRequest::new(payload.clone(), &destination)
                .with_colors(self.fill, self.background);

            match self.builder.build(&request) {
                Ok(_) => {
                    claimed.insert(destination.clone(), row);
                    report.written.push(destination);
                }
                Err(err) => report.failures.push(skip(row, payload, err)),
            }
        }

        tracing::info!(
            written = report.written.len(),
            failed = report.failures.len(),
            "Batch finished"
        );
        Ok(report)
    }
}

fn skip(row: usize, payload: String, err: Error) -> BatchFailure {
    tracing::warn!(row, payload = %payload, "Skipping batch row: {err}");
    BatchFailure {
        row,
        payload,
        reason: err.to_string(),
    }
}

/// Output path for one payload: the payload text is the file stem.
pub fn destination_for(output_dir: &Path, payload: &str) -> PathBuf {
    output_dir.join(format!("{}.{IMAGE_EXTENSION}", file_stem(payload)))
}

/// Replace characters no file system accepts in a name.
fn file_stem(payload: &str) -> String {
    payload
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}
