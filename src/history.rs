//! Append-only CSV log of single generations

use crate::error::{Error, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

/// One logged generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Encoded text
    pub payload: String,
    /// File the image was saved to
    pub destination: PathBuf,
}

/// Writes `payload,destination` rows to a flat log, never rewriting old rows.
#[derive(Debug, Clone)]
pub struct HistoryRecorder {
    path: PathBuf,
}

impl HistoryRecorder {
    /// Log to the given file, created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one row.
    ///
    /// The file is opened in append mode, written and closed on every call.
    pub fn record(&self, payload: &str, destination: &Path) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| Error::History(format!("{}: {e}", self.path.display())))?;

        let destination = destination.to_string_lossy();
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::CRLF)
            .from_writer(file);
        writer.write_record([payload, &*destination])?;
        writer
            .flush()
            .map_err(|e| Error::History(format!("{}: {e}", self.path.display())))?;

        tracing::debug!(log = %self.path.display(), "Recorded history entry");
        Ok(())
    }

    /// Read every row back in file order. A missing log is empty.
    pub fn entries(&self) -> Result<Vec<HistoryEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)?;

        let mut entries = Vec::new();
        for record in reader.records() {
            let record = record?;
            entries.push(HistoryEntry {
                payload: record.get(0).unwrap_or_default().to_string(),
                destination: PathBuf::from(record.get(1).unwrap_or_default()),
            });
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_creates_log() {
        let dir = tempfile::tempdir().unwrap();
        let recorder = HistoryRecorder::new(dir.path().join("qr_history.csv"));

        recorder.record("hello", Path::new("/tmp/hello.png")).unwrap();

        let contents = std::fs::read_to_string(recorder.path()).unwrap();
        assert_eq!(contents, "hello,/tmp/hello.png\r\n");
    }

    #[test]
    fn test_payload_with_comma_is_quoted() {
        let dir = tempfile::tempdir().unwrap();
        let recorder = HistoryRecorder::new(dir.path().join("qr_history.csv"));

        recorder.record("a,b \"c\"", Path::new("out.png")).unwrap();

        let entries = recorder.entries().unwrap();
        assert_eq!(
            entries,
            vec![HistoryEntry {
                payload: "a,b \"c\"".to_string(),
                destination: PathBuf::from("out.png"),
            }]
        );
    }

    #[test]
    fn test_missing_log_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let recorder = HistoryRecorder::new(dir.path().join("none.csv"));
        assert!(recorder.entries().unwrap().is_empty());
    }

    #[test]
    fn test_unwritable_log_is_history_error() {
        let dir = tempfile::tempdir().unwrap();
        let recorder = HistoryRecorder::new(dir.path().join("no-such-dir").join("log.csv"));
        assert!(matches!(
            recorder.record("x", Path::new("x.png")),
            Err(Error::History(_))
        ));
    }
}
