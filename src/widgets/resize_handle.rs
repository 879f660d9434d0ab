use egui::{Color32, CursorIcon, Id, Pos2, Rect, Response, Stroke, Ui, Vec2};

use crate::element::ItemId;

pub const HANDLE_SIZE: f32 = 10.0;

/// Represents a corner of an item's box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Corner::TopLeft => "top_left",
            Corner::TopRight => "top_right",
            Corner::BottomLeft => "bottom_left",
            Corner::BottomRight => "bottom_right",
        }
    }

    pub fn cursor_icon(&self) -> CursorIcon {
        match self {
            Corner::TopLeft | Corner::BottomRight => CursorIcon::ResizeNwSe,
            Corner::TopRight | Corner::BottomLeft => CursorIcon::ResizeNeSw,
        }
    }

    /// Position of this corner on `rect`.
    pub fn position(&self, rect: Rect) -> Pos2 {
        match self {
            Corner::TopLeft => rect.left_top(),
            Corner::TopRight => rect.right_top(),
            Corner::BottomLeft => rect.left_bottom(),
            Corner::BottomRight => rect.right_bottom(),
        }
    }
}

/// A draggable square sitting on one corner of an item.
pub struct ResizeHandle {
    item_id: ItemId,
    corner: Corner,
    position: Pos2,
    size: f32,
}

impl ResizeHandle {
    pub fn new(item_id: ItemId, corner: Corner, item_rect: Rect) -> Self {
        Self {
            item_id,
            corner,
            position: corner.position(item_rect),
            size: HANDLE_SIZE,
        }
    }

    pub fn id(&self) -> Id {
        Id::new(("resize_handle", self.item_id, self.corner.as_str()))
    }

    /// Show the handle and return its response.
    pub fn show(&self, ui: &mut Ui) -> Response {
        let rect = Rect::from_center_size(self.position, Vec2::splat(self.size));

        ui.painter()
            .rect_filled(rect, 2.0, Color32::from_rgb(30, 120, 255));
        ui.painter()
            .rect_stroke(rect, 2.0, Stroke::new(1.0, Color32::WHITE));

        ui.interact(rect, self.id(), egui::Sense::drag())
            .on_hover_cursor(self.corner.cursor_icon())
    }
}
