//! eframe window around [`FormController`]

use super::{Dialogs, FormController, Notice, NoticeLevel};
use crate::color::RgbColor;
use crate::config::QrforgeConfig;
use crate::error::{Error, Result};
use crate::request::IMAGE_EXTENSION;
use crate::resources::ResourceLocator;
use eframe::egui::{
    self, Align2, Color32, ColorImage, RichText, TextEdit, TextureHandle, TextureOptions,
};
use image::RgbaImage;
use std::collections::VecDeque;
use std::path::PathBuf;

const FIELD_WIDTH: f32 = 320.0;

/// Native dialogs backed by `rfd`.
#[derive(Debug, Default)]
pub struct RfdDialogs;

impl Dialogs for RfdDialogs {
    fn save_destination(&mut self, suggested_name: &str) -> Option<PathBuf> {
        let mut path = rfd::FileDialog::new()
            .set_title("Save QR code")
            .set_file_name(suggested_name)
            .add_filter("PNG files", &["png"])
            .add_filter("PDF files", &["pdf"])
            .save_file()?;
        if path.extension().is_none() {
            path.set_extension(IMAGE_EXTENSION);
        }
        Some(path)
    }

    fn batch_input(&mut self) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .set_title("Choose a CSV file")
            .add_filter("CSV files", &["csv"])
            .pick_file()
    }

    fn batch_output_dir(&mut self) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .set_title("Choose an output folder")
            .pick_folder()
    }

    fn logo_file(&mut self) -> Option<PathBuf> {
        rfd::FileDialog::new().set_title("Choose a logo").pick_file()
    }
}

/// The single application window
pub struct QrforgeApp {
    controller: FormController,
    dialogs: RfdDialogs,
    branding: Option<TextureHandle>,
    preview: Option<(TextureHandle, u64)>,
    notices: VecDeque<Notice>,
}

impl QrforgeApp {
    /// Create the window state; a missing branding banner becomes a warning.
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        controller: FormController,
        branding: Result<RgbaImage>,
    ) -> Self {
        let mut notices = VecDeque::new();
        let branding = match branding {
            Ok(img) => {
                let size = [img.width() as usize, img.height() as usize];
                let color_image = ColorImage::from_rgba_unmultiplied(size, img.as_raw());
                Some(
                    cc.egui_ctx
                        .load_texture("branding", color_image, TextureOptions::LINEAR),
                )
            }
            Err(err) => {
                tracing::warn!("Branding image unavailable: {err}");
                notices.push_back(Notice::warning(
                    "Warning",
                    format!("Branding image could not be loaded: {err}"),
                ));
                None
            }
        };

        Self {
            controller,
            dialogs: RfdDialogs,
            branding,
            preview: None,
            notices,
        }
    }

    fn form_ui(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            if let Some(texture) = &self.branding {
                ui.image(texture);
            }

            ui.label("Enter text or a link:");
            ui.add(
                TextEdit::singleline(&mut self.controller.form.payload)
                    .desired_width(FIELD_WIDTH),
            );

            ui.label("File name (e.g. qr_code.png):");
            ui.add(
                TextEdit::singleline(&mut self.controller.form.file_name)
                    .desired_width(FIELD_WIDTH),
            );
        });

        ui.add_space(6.0);
        egui::Grid::new("colors")
            .num_columns(2)
            .spacing([24.0, 8.0])
            .show(ui, |ui| {
                ui.label("Foreground color:");
                ui.horizontal(|ui| {
                    let mut rgb = self.controller.form.fill.0;
                    if egui::color_picker::color_edit_button_srgb(ui, &mut rgb).changed() {
                        self.controller.pick_fill_color(Some(RgbColor(rgb)));
                    }
                    ui.monospace(self.controller.form.fill.to_hex());
                });
                ui.end_row();

                ui.label("Background color:");
                ui.horizontal(|ui| {
                    let mut rgb = self.controller.form.background.0;
                    if egui::color_picker::color_edit_button_srgb(ui, &mut rgb).changed() {
                        self.controller.pick_background_color(Some(RgbColor(rgb)));
                    }
                    ui.monospace(self.controller.form.background.to_hex());
                });
                ui.end_row();
            });

        ui.add_space(6.0);
        ui.vertical_centered(|ui| {
            ui.label("Add a logo (optional):");
            ui.add(
                TextEdit::singleline(&mut self.controller.form.logo_path)
                    .desired_width(FIELD_WIDTH),
            );
            if ui.button("Choose logo").clicked() {
                self.controller.pick_logo(&mut self.dialogs);
            }

            if let Some((texture, _)) = &self.preview {
                ui.add_space(8.0);
                ui.image(texture);
            }
        });

        ui.add_space(8.0);
        ui.columns(2, |cols| {
            cols[0].vertical_centered(|ui| {
                if ui.button("Generate QR code").clicked() {
                    let notices = self.controller.generate(&mut self.dialogs);
                    self.notices.extend(notices);
                }
            });
            cols[1].vertical_centered(|ui| {
                if ui.button("Batch generate QR codes").clicked() {
                    let notices = self.controller.generate_batch(&mut self.dialogs);
                    self.notices.extend(notices);
                }
            });
        });
    }

    /// Upload the controller's preview when it changed since the last frame.
    fn sync_preview(&mut self, ctx: &egui::Context) {
        let Some((image, revision)) = self.controller.preview() else {
            return;
        };
        if matches!(&self.preview, Some((_, shown)) if *shown == revision) {
            return;
        }

        let size = [image.width() as usize, image.height() as usize];
        let color_image = ColorImage::from_rgb(size, image.as_raw());
        match &mut self.preview {
            Some((texture, shown)) => {
                texture.set(color_image, TextureOptions::LINEAR);
                *shown = revision;
            }
            None => {
                let texture = ctx.load_texture("qr-preview", color_image, TextureOptions::LINEAR);
                self.preview = Some((texture, revision));
            }
        }
    }

    fn notice_ui(&mut self, ctx: &egui::Context) {
        let Some(notice) = self.notices.front() else {
            return;
        };

        let color = match notice.level {
            NoticeLevel::Info => ctx.style().visuals.text_color(),
            NoticeLevel::Warning => Color32::from_rgb(0xd0, 0x8c, 0x00),
            NoticeLevel::Error => Color32::from_rgb(0xc8, 0x32, 0x32),
        };

        let mut dismissed = false;
        egui::Window::new(notice.title.as_str())
            .id(egui::Id::new("notice"))
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(notice.message.as_str()).color(color));
                    ui.add_space(6.0);
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            });

        if dismissed {
            self.notices.pop_front();
        }
    }
}

impl eframe::App for QrforgeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new("Made with qrforge")
                        .italics()
                        .small()
                        .color(Color32::GRAY),
                );
            });
        });

        let idle = self.notices.is_empty();
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(idle, |ui| self.form_ui(ui));
        });

        self.sync_preview(ctx);
        self.notice_ui(ctx);
    }
}

/// Open the window and block until it is closed.
pub fn run(config: &QrforgeConfig) -> Result<()> {
    let locator = ResourceLocator::resolve(&config.assets);
    let branding = locator.branding(&config.assets);
    let controller = FormController::new(config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([380.0, 760.0])
            .with_resizable(false)
            .with_title("QR Code Generator"),
        ..Default::default()
    };

    tracing::info!("Opening window");
    eframe::run_native(
        "qrforge",
        options,
        Box::new(move |cc| Ok(Box::new(QrforgeApp::new(cc, controller, branding)))),
    )
    .map_err(|e| Error::Other(format!("Window failed: {e}")))
}
