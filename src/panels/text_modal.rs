use egui::color_picker::{Alpha, color_edit_button_srgba};
use egui::{Align2, DragValue, RichText, TextEdit};

use crate::VisionBoardApp;
use crate::element::{MAX_FONT_SIZE, MIN_FONT_SIZE, PLACEHOLDER_TEXT};
use crate::text_editor::EditorMode;

pub fn text_modal(app: &mut VisionBoardApp, ctx: &egui::Context) {
    if !app.text_editor.is_open() {
        return;
    }

    let (title, confirm_label) = match app.text_editor.mode() {
        EditorMode::Create => ("Add Text", "Add"),
        EditorMode::Edit(_) => ("Edit Text", "Save"),
    };

    let mut open = true;
    let mut confirm = false;
    let mut close = false;
    let mut toggle_bold = false;
    let mut toggle_underline = false;

    egui::Window::new(title)
        .id(egui::Id::new("text_modal"))
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            let draft = app.text_editor.draft_mut();

            ui.add(
                TextEdit::multiline(&mut draft.text)
                    .hint_text(PLACEHOLDER_TEXT)
                    .desired_rows(3),
            );

            ui.horizontal(|ui| {
                ui.label("Font Size");
                ui.add(DragValue::new(&mut draft.font_size).range(MIN_FONT_SIZE..=MAX_FONT_SIZE));
            });

            ui.horizontal(|ui| {
                ui.label("Color");
                color_edit_button_srgba(ui, &mut draft.color, Alpha::Opaque);
            });

            ui.horizontal(|ui| {
                toggle_bold = ui
                    .selectable_label(draft.bold, RichText::new("B").strong())
                    .clicked();
                toggle_underline = ui
                    .selectable_label(draft.underline, RichText::new("U").underline())
                    .clicked();
            });

            ui.separator();
            ui.horizontal(|ui| {
                confirm = ui.button(confirm_label).clicked();
                close = ui.button("Close").clicked();
            });
        });

    if toggle_bold {
        app.text_editor.toggle_bold();
    }
    if toggle_underline {
        app.text_editor.toggle_underline();
    }

    if confirm {
        app.confirm_text();
    } else if close || !open {
        app.cancel_text();
    }
}
