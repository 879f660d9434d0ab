use egui::load::SizedTexture;
use egui::{Align2, vec2};

use crate::VisionBoardApp;

const THUMBNAIL_SIZE: f32 = 72.0;

pub fn sticker_modal(app: &mut VisionBoardApp, ctx: &egui::Context) {
    if !app.is_sticker_picker_open() {
        return;
    }

    let stickers = app.stickers().stickers();
    let loaded = app.stickers().is_loaded();
    let sticker_dir = app.config().sticker_dir.clone();
    let mut open = true;
    let mut close = false;
    let mut picked = None;

    egui::Window::new("Select Sticker")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            if !loaded {
                ui.spinner();
            } else if stickers.is_empty() {
                ui.label(format!("No stickers found in {sticker_dir}"));
            }

            egui::ScrollArea::vertical().max_height(360.0).show(ui, |ui| {
                ui.set_max_width(5.0 * (THUMBNAIL_SIZE + 12.0));
                ui.horizontal_wrapped(|ui| {
                    for (index, source) in stickers.iter().enumerate() {
                        let texture = app.renderer.texture_for(source, ctx);
                        let image = egui::Image::from_texture(SizedTexture::new(
                            texture,
                            vec2(THUMBNAIL_SIZE, THUMBNAIL_SIZE),
                        ));
                        if ui
                            .add(egui::ImageButton::new(image))
                            .on_hover_text(source.name())
                            .clicked()
                        {
                            picked = Some(index);
                        }
                    }
                });
            });

            ui.separator();
            close = ui.button("Close").clicked();
        });

    if let Some(source) = picked.and_then(|index| stickers.get(index).cloned()) {
        app.add_sticker(source);
    } else if close || !open {
        app.close_sticker_picker();
    }
}
