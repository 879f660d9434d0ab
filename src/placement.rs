//! Drag and resize gestures on the board.
//!
//! All rects here are in board space: the board's top-left corner is the
//! origin and `bounds` is `Rect::from_min_size(Pos2::ZERO, board_size)`.
//! The store only changes when a gesture finishes.

use egui::{Rect, Vec2};

use crate::command::Command;
use crate::element::{ItemId, ItemPatch};
use crate::widgets::Corner;

/// Smallest box a resize can produce.
pub const MIN_RESIZE_SIZE: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Move,
    Resize(Corner),
}

/// An in-flight drag or resize of a single item.
#[derive(Debug, Clone, PartialEq)]
pub struct Gesture {
    pub id: ItemId,
    pub kind: GestureKind,
    start_rect: Rect,
    accumulated: Vec2,
    preview: Rect,
}

impl Gesture {
    pub fn begin(id: ItemId, kind: GestureKind, rect: Rect) -> Self {
        Self {
            id,
            kind,
            start_rect: rect,
            accumulated: Vec2::ZERO,
            preview: rect,
        }
    }

    /// Feed this frame's pointer delta into the gesture.
    pub fn update(&mut self, delta: Vec2, bounds: Rect) {
        self.accumulated += delta;
        self.preview = match self.kind {
            GestureKind::Move => constrain_move(self.start_rect, self.accumulated, bounds),
            GestureKind::Resize(corner) => {
                resize_from_corner(self.start_rect, corner, self.accumulated, bounds)
            }
        };
    }

    /// Where the item should be drawn while the gesture is active.
    pub fn preview(&self) -> Rect {
        self.preview
    }

    /// End the gesture, producing the store update if anything moved.
    pub fn finish(self) -> Option<Command> {
        if self.preview == self.start_rect {
            return None;
        }
        let patch = match self.kind {
            GestureKind::Move => ItemPatch::position(self.preview.min),
            GestureKind::Resize(_) => ItemPatch::rect(self.preview),
        };
        Some(Command::UpdateItem { id: self.id, patch })
    }
}

/// Translate `rect` by `delta`, keeping it inside `bounds`.
///
/// A box larger than the bounds is pinned to the bounds' top-left corner.
pub fn constrain_move(rect: Rect, delta: Vec2, bounds: Rect) -> Rect {
    let moved = rect.translate(delta);
    let max_x = (bounds.max.x - rect.width()).max(bounds.min.x);
    let max_y = (bounds.max.y - rect.height()).max(bounds.min.y);
    let min = egui::pos2(
        moved.min.x.clamp(bounds.min.x, max_x),
        moved.min.y.clamp(bounds.min.y, max_y),
    );
    Rect::from_min_size(min, rect.size())
}

/// Drag one corner of `rect` by `delta` while the opposite corner stays put.
pub fn resize_from_corner(rect: Rect, corner: Corner, delta: Vec2, bounds: Rect) -> Rect {
    let mut out = rect;
    match corner {
        Corner::TopLeft => {
            out.min.x = (rect.min.x + delta.x)
                .max(bounds.min.x)
                .min(rect.max.x - MIN_RESIZE_SIZE);
            out.min.y = (rect.min.y + delta.y)
                .max(bounds.min.y)
                .min(rect.max.y - MIN_RESIZE_SIZE);
        }
        Corner::TopRight => {
            out.max.x = (rect.max.x + delta.x)
                .min(bounds.max.x)
                .max(rect.min.x + MIN_RESIZE_SIZE);
            out.min.y = (rect.min.y + delta.y)
                .max(bounds.min.y)
                .min(rect.max.y - MIN_RESIZE_SIZE);
        }
        Corner::BottomLeft => {
            out.min.x = (rect.min.x + delta.x)
                .max(bounds.min.x)
                .min(rect.max.x - MIN_RESIZE_SIZE);
            out.max.y = (rect.max.y + delta.y)
                .min(bounds.max.y)
                .max(rect.min.y + MIN_RESIZE_SIZE);
        }
        Corner::BottomRight => {
            out.max.x = (rect.max.x + delta.x)
                .min(bounds.max.x)
                .max(rect.min.x + MIN_RESIZE_SIZE);
            out.max.y = (rect.max.y + delta.y)
                .min(bounds.max.y)
                .max(rect.min.y + MIN_RESIZE_SIZE);
        }
    }
    out
}
