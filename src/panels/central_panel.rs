use egui::{Id, Pos2, Rect, Sense, Vec2};

use crate::VisionBoardApp;
use crate::command::Command;
use crate::element::{ItemId, ItemKind};
use crate::placement::{Gesture, GestureKind};
use crate::widgets::{HANDLE_SIZE, ResizeHandle};

pub fn central_panel(app: &mut VisionBoardApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let viewport = ui.available_size();
        egui::ScrollArea::both()
            .auto_shrink(false)
            .drag_to_scroll(false)
            .show(ui, |ui| board(app, ui, viewport));
    });
}

fn board(app: &mut VisionBoardApp, ui: &mut egui::Ui, viewport: Vec2) {
    let board_size = app.config.board_size();
    // Centered when the panel has room, scrollable when it does not
    let (area, _) = ui.allocate_exact_size(board_size.max(viewport), Sense::hover());
    let board_rect = Rect::from_center_size(area.center(), board_size);

    let bounds = Rect::from_min_size(Pos2::ZERO, board_size);
    let painter = ui.painter_at(board_rect);

    app.renderer.draw_board(&painter, board_rect, app.background);

    let mut commands = Vec::new();
    let mut edit_request: Option<ItemId> = None;

    for item in app.store.items() {
        let id = item.id();
        let active = app.gesture.as_ref().is_some_and(|g| g.id == id);
        let rect = match &app.gesture {
            Some(gesture) if gesture.id == id => {
                gesture.preview().translate(board_rect.min.to_vec2())
            }
            _ => item.geometry.screen_rect(board_rect.min),
        };

        app.renderer.draw_item(ui, &painter, item, rect);

        let body = ui.interact(rect, Id::new(("board_item", id)), Sense::click_and_drag());
        if body.drag_started() {
            app.gesture = Some(Gesture::begin(id, GestureKind::Move, item.rect()));
        }
        if body.dragged() {
            if let Some(gesture) = app.gesture.as_mut().filter(|g| g.id == id) {
                gesture.update(body.drag_delta(), bounds);
            }
        }
        if body.drag_stopped() {
            if let Some(gesture) = app.gesture.take_if(|g| g.id == id) {
                commands.extend(gesture.finish());
            }
        }

        match &item.kind {
            ItemKind::Image(_) if body.clicked() => commands.push(Command::CycleCorner(id)),
            ItemKind::Text(_) if body.double_clicked() => edit_request = Some(id),
            _ => {}
        }

        let near = ui.rect_contains_pointer(rect.expand(HANDLE_SIZE));
        if !(near || active) {
            continue;
        }

        app.renderer.draw_selection(&painter, rect);
        for corner in crate::widgets::Corner::ALL {
            let handle = ResizeHandle::new(id, corner, rect).show(ui);
            if handle.drag_started() {
                app.gesture = Some(Gesture::begin(
                    id,
                    GestureKind::Resize(corner),
                    item.rect(),
                ));
            }
            if handle.dragged() {
                if let Some(gesture) = app.gesture.as_mut().filter(|g| g.id == id) {
                    gesture.update(handle.drag_delta(), bounds);
                }
            }
            if handle.drag_stopped() {
                if let Some(gesture) = app.gesture.take_if(|g| g.id == id) {
                    commands.extend(gesture.finish());
                }
            }
        }
    }

    for command in commands {
        app.execute(command);
    }
    if let Some(id) = edit_request {
        app.begin_text_edit(id);
    }
}
