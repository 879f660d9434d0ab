use egui::Color32;

use crate::command::Command;
use crate::element::{ItemId, ItemPatch, TextItem, clamp_font_size, factory};

/// Whether confirming the editor creates a new item or rewrites an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    #[default]
    Create,
    Edit(ItemId),
}

/// State behind the text modal: a draft plus the create/edit toggle.
#[derive(Debug, Default)]
pub struct TextEditor {
    open: bool,
    mode: EditorMode,
    draft: TextItem,
}

impl TextEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open with a fresh draft for a new text item.
    pub fn open_new(&mut self) {
        self.mode = EditorMode::Create;
        self.draft = TextItem::default();
        self.open = true;
    }

    /// Open pre-populated with an existing item's attributes.
    pub fn open_edit(&mut self, id: ItemId, text: &TextItem) {
        self.mode = EditorMode::Edit(id);
        self.draft = text.clone();
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn draft(&self) -> &TextItem {
        &self.draft
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.draft.text = text.into();
    }

    pub fn set_font_size(&mut self, size: f32) {
        self.draft.font_size = clamp_font_size(size);
    }

    pub fn set_color(&mut self, color: Color32) {
        self.draft.color = color;
    }

    pub fn toggle_bold(&mut self) {
        self.draft.bold = !self.draft.bold;
    }

    pub fn toggle_underline(&mut self) {
        self.draft.underline = !self.draft.underline;
    }

    /// Close the editor and turn the draft into a store command.
    pub fn confirm(&mut self) -> Command {
        let draft = std::mem::take(&mut self.draft);
        let mode = std::mem::take(&mut self.mode);
        self.open = false;

        match mode {
            EditorMode::Edit(id) => Command::UpdateItem {
                id,
                patch: ItemPatch::text_style(&draft),
            },
            EditorMode::Create => Command::AddItem(factory::text(draft)),
        }
    }

    /// Close the editor, throwing the draft away.
    pub fn cancel(&mut self) {
        self.draft = TextItem::default();
        self.mode = EditorMode::Create;
        self.open = false;
    }

    /// Mutable access for the modal's widgets.
    pub(crate) fn draft_mut(&mut self) -> &mut TextItem {
        &mut self.draft
    }
}
