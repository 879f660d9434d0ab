use egui::{Pos2, Rect, Vec2, pos2, vec2};

// Common constants for all item types
pub const MIN_ITEM_SIZE: f32 = 2.0;
pub const MIN_FONT_SIZE: f32 = 10.0;
pub const MAX_FONT_SIZE: f32 = 100.0;

/// Clamp a font size into the range the text editor allows.
pub fn clamp_font_size(size: f32) -> f32 {
    if size.is_nan() {
        return MIN_FONT_SIZE;
    }
    size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
}

/// Clamp a single dimension so it stays strictly positive.
pub(crate) fn clamp_dimension(value: f32) -> f32 {
    if value.is_nan() {
        return MIN_ITEM_SIZE;
    }
    value.max(MIN_ITEM_SIZE)
}

/// Board-relative placement of an item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Geometry {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width: clamp_dimension(width),
            height: clamp_dimension(height),
        }
    }

    pub fn position(&self) -> Pos2 {
        pos2(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        vec2(self.width, self.height)
    }

    /// Rect in board space (origin at the board's top-left corner).
    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.position(), self.size())
    }

    /// Rect in screen space for a board whose top-left corner is `origin`.
    pub fn screen_rect(&self, origin: Pos2) -> Rect {
        self.rect().translate(origin.to_vec2())
    }
}
