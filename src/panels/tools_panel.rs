use egui::color_picker::{Alpha, color_edit_button_srgba};

use crate::VisionBoardApp;

const BUTTON_WIDTH: f32 = 160.0;

pub fn tools_panel(app: &mut VisionBoardApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(false)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Vision Board");
            ui.separator();

            if ui.add(panel_button("+ Add Photos")).clicked() {
                app.photos.pick(ctx);
            }
            if ui.add(panel_button("Add Text")).clicked() {
                app.text_editor.open_new();
            }
            if ui.add(panel_button("Add Stickers")).clicked() {
                app.open_sticker_picker();
            }
            if ui.add(panel_button("Download")).clicked() {
                app.export(ctx);
            }

            ui.horizontal(|ui| {
                ui.label("Change Background");
                let mut background = app.background();
                if color_edit_button_srgba(ui, &mut background, Alpha::Opaque).changed() {
                    app.set_background(background);
                }
            });

            if ui.add(panel_button("Clear")).clicked() {
                app.clear();
            }

            ui.separator();
            ui.label(format!("Items on board: {}", app.store().len()));
            if app.photos.pending() > 0 {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading photo...");
                });
            }
            if let Some(status) = app.status() {
                ui.small(status);
            }
        });
}

fn panel_button(text: &str) -> egui::Button<'static> {
    egui::Button::new(text.to_owned()).min_size(egui::vec2(BUTTON_WIDTH, 28.0))
}
