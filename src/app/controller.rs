//! Form state and the handlers bound to its buttons

use super::Notice;
use crate::batch::BatchRunner;
use crate::color::RgbColor;
use crate::config::QrforgeConfig;
use crate::history::HistoryRecorder;
use crate::qr::QrImageBuilder;
use crate::request::{GenerationRequest, normalize_file_name};
use image::RgbImage;
use image::imageops::{self, FilterType};
use std::path::PathBuf;

/// Native dialogs the handlers need. Every method returns `None` when the
/// user dismisses the dialog.
pub trait Dialogs {
    /// Ask where to save a generated image, suggesting `suggested_name`.
    fn save_destination(&mut self, suggested_name: &str) -> Option<PathBuf>;
    /// Ask for the CSV file listing batch payloads.
    fn batch_input(&mut self) -> Option<PathBuf>;
    /// Ask for the directory batch images are written to.
    fn batch_output_dir(&mut self) -> Option<PathBuf>;
    /// Ask for a logo image.
    fn logo_file(&mut self) -> Option<PathBuf>;
}

/// Current widget values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    /// Text or link to encode
    pub payload: String,
    /// Suggested file name for the save dialog
    pub file_name: String,
    /// Module color
    pub fill: RgbColor,
    /// Background color
    pub background: RgbColor,
    /// Logo path, empty for none
    pub logo_path: String,
}

impl FormState {
    /// Empty form with the given starting colors
    pub fn new(fill: RgbColor, background: RgbColor) -> Self {
        Self {
            payload: String::new(),
            file_name: String::new(),
            fill,
            background,
            logo_path: String::new(),
        }
    }
}

/// Owns the form and runs the generate, batch and picker actions.
pub struct FormController {
    /// Widget values, edited directly by the window
    pub form: FormState,
    builder: QrImageBuilder,
    history: HistoryRecorder,
    batch_fill: RgbColor,
    batch_background: RgbColor,
    preview_size: u32,
    preview: Option<RgbImage>,
    preview_revision: u64,
}

impl FormController {
    /// Build a controller from the loaded configuration.
    pub fn new(config: &QrforgeConfig) -> Self {
        Self {
            form: FormState::new(config.qr.default_fill, config.qr.default_background),
            builder: QrImageBuilder::new(&config.qr),
            history: HistoryRecorder::new(config.history.file.clone()),
            batch_fill: config.qr.default_fill,
            batch_background: config.qr.default_background,
            preview_size: config.qr.preview_size.max(1),
            preview: None,
            preview_revision: 0,
        }
    }

    /// Snapshot the form into a request for `destination`.
    pub fn request(&self, destination: PathBuf) -> GenerationRequest {
        let logo = self.form.logo_path.trim();
        GenerationRequest {
            payload: self.form.payload.clone(),
            destination,
            fill: self.form.fill,
            background: self.form.background,
            logo: (!logo.is_empty()).then(|| PathBuf::from(logo)),
        }
    }

    /// Generate, save, preview and log one QR image.
    pub fn generate(&mut self, dialogs: &mut dyn Dialogs) -> Vec<Notice> {
        if self.form.payload.is_empty() {
            return vec![Notice::warning(
                "Missing input",
                "Enter text or a link to encode.",
            )];
        }

        let suggested = normalize_file_name(&self.form.file_name);
        let Some(destination) = dialogs.save_destination(&suggested) else {
            tracing::info!("Save dialog cancelled");
            return vec![Notice::info("Cancelled", "Saving was cancelled.")];
        };

        let request = self.request(destination);
        let outcome = match self.builder.build(&request) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!(destination = %request.destination.display(), "Generation failed: {err}");
                return vec![Notice::error(
                    "Save failed",
                    format!("Could not save QR code: {err}"),
                )];
            }
        };

        let mut notices: Vec<Notice> = outcome
            .warnings
            .iter()
            .map(|warning| Notice::warning("Warning", warning.to_string()))
            .collect();

        self.set_preview(&outcome.image);

        if let Err(err) = self.history.record(&request.payload, &request.destination) {
            tracing::warn!("History not updated: {err}");
            notices.push(Notice::warning("History not updated", err.to_string()));
        }

        notices.push(Notice::info(
            "QR code saved",
            format!("QR code saved as {}", request.destination.display()),
        ));
        notices
    }

    /// Write one image per row of a user-chosen CSV into a user-chosen directory.
    pub fn generate_batch(&mut self, dialogs: &mut dyn Dialogs) -> Vec<Notice> {
        let Some(input) = dialogs.batch_input() else {
            return Vec::new();
        };
        let Some(output_dir) = dialogs.batch_output_dir() else {
            return Vec::new();
        };

        let runner = BatchRunner::new(&self.builder, self.batch_fill, self.batch_background);
        let report = match runner.run(&input, &output_dir) {
            Ok(report) => report,
            Err(err) => {
                tracing::error!(input = %input.display(), "Batch failed: {err}");
                return vec![Notice::error("Batch failed", err.to_string())];
            }
        };

        let mut notices = vec![Notice::info(
            "Batch complete",
            format!("Batch QR codes saved in {}", report.output_dir.display()),
        )];
        if let Some(first) = report.failures.first() {
            notices.push(Notice::warning(
                "Rows skipped",
                format!(
                    "{} of {} rows were skipped. Row {}: {}",
                    report.failures.len(),
                    report.failures.len() + report.written.len(),
                    first.row,
                    first.reason
                ),
            ));
        }
        notices
    }

    /// Apply a color chosen for the modules; `None` means the chooser was dismissed.
    pub fn pick_fill_color(&mut self, chosen: Option<RgbColor>) {
        if let Some(color) = chosen {
            self.form.fill = color;
        }
    }

    /// Apply a color chosen for the background; `None` means the chooser was dismissed.
    pub fn pick_background_color(&mut self, chosen: Option<RgbColor>) {
        if let Some(color) = chosen {
            self.form.background = color;
        }
    }

    /// Fill the logo field from a file dialog.
    pub fn pick_logo(&mut self, dialogs: &mut dyn Dialogs) {
        if let Some(path) = dialogs.logo_file() {
            self.form.logo_path = path.display().to_string();
        }
    }

    /// Last generated image scaled to the preview size, with a counter that
    /// changes every time it is replaced.
    pub fn preview(&self) -> Option<(&RgbImage, u64)> {
        self.preview.as_ref().map(|img| (img, self.preview_revision))
    }

    fn set_preview(&mut self, image: &RgbImage) {
        let size = self.preview_size;
        self.preview = Some(imageops::resize(image, size, size, FilterType::Lanczos3));
        self.preview_revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::NoticeLevel;

    #[derive(Default)]
    struct Scripted {
        destination: Option<PathBuf>,
        logo: Option<PathBuf>,
        suggested: Vec<String>,
    }

    impl Dialogs for Scripted {
        fn save_destination(&mut self, suggested_name: &str) -> Option<PathBuf> {
            self.suggested.push(suggested_name.to_string());
            self.destination.clone()
        }
        fn batch_input(&mut self) -> Option<PathBuf> {
            None
        }
        fn batch_output_dir(&mut self) -> Option<PathBuf> {
            None
        }
        fn logo_file(&mut self) -> Option<PathBuf> {
            self.logo.clone()
        }
    }

    fn controller_in(dir: &std::path::Path) -> FormController {
        let mut config = QrforgeConfig::default();
        config.history.file = dir.join("qr_history.csv");
        FormController::new(&config)
    }

    #[test]
    fn test_suggested_name_is_normalized() {
        let dir = tempfile::tempdir().unwrap();
        let mut controller = controller_in(dir.path());
        controller.form.payload = "hello".to_string();
        controller.form.file_name = "ticket".to_string();

        let mut dialogs = Scripted::default();
        controller.generate(&mut dialogs);
        assert_eq!(dialogs.suggested, vec!["ticket.png".to_string()]);
    }

    #[test]
    fn test_pickers() {
        let dir = tempfile::tempdir().unwrap();
        let mut controller = controller_in(dir.path());

        controller.pick_fill_color(Some(RgbColor([1, 2, 3])));
        controller.pick_background_color(None);
        assert_eq!(controller.form.fill, RgbColor([1, 2, 3]));
        assert_eq!(controller.form.background, RgbColor::WHITE);

        let mut dialogs = Scripted {
            logo: Some(PathBuf::from("/img/logo.png")),
            ..Scripted::default()
        };
        controller.pick_logo(&mut dialogs);
        assert_eq!(controller.form.logo_path, "/img/logo.png");
    }

    #[test]
    fn test_blank_logo_field_means_no_logo() {
        let dir = tempfile::tempdir().unwrap();
        let mut controller = controller_in(dir.path());
        controller.form.logo_path = "  ".to_string();
        assert_eq!(controller.request(PathBuf::from("x.png")).logo, None);
    }

    #[test]
    fn test_batch_cancel_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let mut controller = controller_in(dir.path());
        assert!(controller.generate_batch(&mut Scripted::default()).is_empty());
    }

    #[test]
    fn test_preview_scaled_and_revised() {
        let dir = tempfile::tempdir().unwrap();
        let mut controller = controller_in(dir.path());
        controller.form.payload = "preview".to_string();

        let mut dialogs = Scripted {
            destination: Some(dir.path().join("preview.png")),
            ..Scripted::default()
        };
        let notices = controller.generate(&mut dialogs);
        assert_eq!(notices.last().map(|n| n.level), Some(NoticeLevel::Info));

        let (preview, revision) = controller.preview().unwrap();
        assert_eq!(preview.dimensions(), (200, 200));
        assert_eq!(revision, 1);
    }
}
