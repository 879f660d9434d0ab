use egui::Color32;

use super::common::clamp_font_size;

pub const DEFAULT_FONT_SIZE: f32 = 32.0;
pub const PLACEHOLDER_TEXT: &str = "Write here...";

/// Text variant of a board item.
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub text: String,
    pub font_size: f32,
    pub color: Color32,
    pub bold: bool,
    pub underline: bool,
}

impl Default for TextItem {
    fn default() -> Self {
        Self {
            text: String::new(),
            font_size: DEFAULT_FONT_SIZE,
            color: Color32::BLACK,
            bold: false,
            underline: false,
        }
    }
}

impl TextItem {
    pub fn new(text: impl Into<String>, font_size: f32, color: Color32) -> Self {
        Self {
            text: text.into(),
            font_size: clamp_font_size(font_size),
            color,
            ..Default::default()
        }
    }
}
