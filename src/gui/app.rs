//! Figure Viewer Application
//! Shows the rendered figure scaled to the window, with a PNG export toolbar.

use crate::charts::FigureRenderer;
use egui::{RichText, TextureHandle, TextureOptions};
use image::RgbImage;
use tracing::{error, warn};

/// Main application window.
pub struct PopulationApp {
    figure: RgbImage,
    texture: Option<TextureHandle>,
    export_name: String,
    open_after_export: bool,
    status: String,
}

impl PopulationApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        figure: RgbImage,
        export_name: String,
        status: String,
    ) -> Self {
        Self {
            figure,
            texture: None,
            export_name,
            open_after_export: false,
            status,
        }
    }

    /// Upload the figure once and reuse the handle afterwards.
    fn texture(&mut self, ctx: &egui::Context) -> TextureHandle {
        let figure = &self.figure;
        self.texture
            .get_or_insert_with(|| {
                let size = [figure.width() as usize, figure.height() as usize];
                let image = egui::ColorImage::from_rgb(size, figure.as_raw());
                ctx.load_texture("figure", image, TextureOptions::LINEAR)
            })
            .clone()
    }

    /// Handle PNG export - save the already rendered figure
    fn handle_export_png(&mut self) {
        let output_path = match rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name(self.export_name.as_str())
            .save_file()
        {
            Some(path) => path,
            None => return, // User cancelled
        };

        match FigureRenderer::save_png(&self.figure, &output_path) {
            Ok(()) => {
                self.status = format!("Exported {}", output_path.display());
                if self.open_after_export {
                    if let Err(e) = open::that(&output_path) {
                        warn!(error = %e, "could not open exported figure");
                        self.status = format!("Exported, but could not open it: {}", e);
                    }
                }
            }
            Err(e) => {
                error!(error = %e, "export failed");
                self.status = format!("Export error: {}", e);
            }
        }
    }
}

impl eframe::App for PopulationApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Export PNG...").clicked() {
                    self.handle_export_png();
                }
                ui.checkbox(&mut self.open_after_export, "Open after export");
                ui.separator();
                ui.label(RichText::new(&self.status).size(12.0));
            });
        });

        let texture = self.texture(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let size = texture.size_vec2();
            let scale = (available.x / size.x).min(available.y / size.y);

            ui.centered_and_justified(|ui| {
                ui.image((texture.id(), size * scale));
            });
        });
    }
}
