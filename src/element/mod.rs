use egui::{Color32, Pos2, Rect};

mod common;
pub(crate) mod image;
pub(crate) mod text;

pub use common::{Geometry, MAX_FONT_SIZE, MIN_FONT_SIZE, MIN_ITEM_SIZE, clamp_font_size};
pub use image::{CornerStyle, ImageItem, ImageSource, SLIGHT_CORNER_RADIUS, SourceOrigin};
pub use text::{DEFAULT_FONT_SIZE, PLACEHOLDER_TEXT, TextItem};

/// Identifier of an item, unique within a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u64);

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The variant-specific part of an item.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    Image(ImageItem),
    Text(TextItem),
}

/// A single element placed on the board.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    id: ItemId,
    pub geometry: Geometry,
    pub kind: ItemKind,
}

/// An item that has not been given an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub geometry: Geometry,
    pub kind: ItemKind,
}

impl Item {
    pub(crate) fn new(id: ItemId, new_item: NewItem) -> Self {
        Self {
            id,
            geometry: new_item.geometry,
            kind: new_item.kind,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn rect(&self) -> Rect {
        self.geometry.rect()
    }

    pub fn as_image(&self) -> Option<&ImageItem> {
        match &self.kind {
            ItemKind::Image(image) => Some(image),
            ItemKind::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextItem> {
        match &self.kind {
            ItemKind::Text(text) => Some(text),
            ItemKind::Image(_) => None,
        }
    }

    /// Shallow-merge `patch` into this item.
    ///
    /// Fields that do not exist on this item's variant are ignored.
    pub fn apply(&mut self, patch: &ItemPatch) {
        let g = &mut self.geometry;
        if let Some(x) = patch.x {
            g.x = x;
        }
        if let Some(y) = patch.y {
            g.y = y;
        }
        if let Some(width) = patch.width {
            g.width = common::clamp_dimension(width);
        }
        if let Some(height) = patch.height {
            g.height = common::clamp_dimension(height);
        }

        match &mut self.kind {
            ItemKind::Image(image) => {
                if let Some(corner) = patch.corner {
                    image.corner = corner;
                }
            }
            ItemKind::Text(text) => {
                if let Some(content) = &patch.text {
                    text.text.clone_from(content);
                }
                if let Some(size) = patch.font_size {
                    text.font_size = clamp_font_size(size);
                }
                if let Some(color) = patch.color {
                    text.color = color;
                }
                if let Some(bold) = patch.bold {
                    text.bold = bold;
                }
                if let Some(underline) = patch.underline {
                    text.underline = underline;
                }
            }
        }
    }
}

/// A partial set of item attributes. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemPatch {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub corner: Option<CornerStyle>,
    pub text: Option<String>,
    pub font_size: Option<f32>,
    pub color: Option<Color32>,
    pub bold: Option<bool>,
    pub underline: Option<bool>,
}

impl ItemPatch {
    /// Move to a new board position (drag stop).
    pub fn position(pos: Pos2) -> Self {
        Self {
            x: Some(pos.x),
            y: Some(pos.y),
            ..Default::default()
        }
    }

    /// Take on a new board rect (resize stop).
    pub fn rect(rect: Rect) -> Self {
        Self {
            x: Some(rect.min.x),
            y: Some(rect.min.y),
            width: Some(rect.width()),
            height: Some(rect.height()),
            ..Default::default()
        }
    }

    pub fn corner(corner: CornerStyle) -> Self {
        Self {
            corner: Some(corner),
            ..Default::default()
        }
    }

    /// Replace every text attribute with the given ones, leaving geometry alone.
    pub fn text_style(text: &TextItem) -> Self {
        Self {
            text: Some(text.text.clone()),
            font_size: Some(text.font_size),
            color: Some(text.color),
            bold: Some(text.bold),
            underline: Some(text.underline),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Factory functions producing items with their default placement
pub mod factory {
    use super::*;

    pub const PHOTO_POSITION: Pos2 = Pos2::new(60.0, 60.0);
    pub const PHOTO_SCALE: f32 = 0.5;
    pub const STICKER_POSITION: Pos2 = Pos2::new(80.0, 80.0);
    pub const STICKER_SIZE: f32 = 160.0;
    pub const TEXT_POSITION: Pos2 = Pos2::new(70.0, 70.0);
    pub const TEXT_WIDTH: f32 = 200.0;
    pub const TEXT_HEIGHT: f32 = 60.0;

    /// An uploaded photo, shown at half its pixel size.
    pub fn photo(source: ImageSource) -> NewItem {
        let size = source.pixel_size() * PHOTO_SCALE;
        NewItem {
            geometry: Geometry::new(PHOTO_POSITION.x, PHOTO_POSITION.y, size.x, size.y),
            kind: ItemKind::Image(ImageItem::new(source)),
        }
    }

    /// A sticker from the bundled gallery, always placed as a fixed square.
    pub fn sticker(source: ImageSource) -> NewItem {
        NewItem {
            geometry: Geometry::new(
                STICKER_POSITION.x,
                STICKER_POSITION.y,
                STICKER_SIZE,
                STICKER_SIZE,
            ),
            kind: ItemKind::Image(ImageItem::new(source)),
        }
    }

    /// A text label. Empty text falls back to the placeholder.
    pub fn text(mut text: TextItem) -> NewItem {
        if text.text.is_empty() {
            text.text = PLACEHOLDER_TEXT.to_owned();
        }
        text.font_size = clamp_font_size(text.font_size);
        NewItem {
            geometry: Geometry::new(TEXT_POSITION.x, TEXT_POSITION.y, TEXT_WIDTH, TEXT_HEIGHT),
            kind: ItemKind::Text(text),
        }
    }
}
