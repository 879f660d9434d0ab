use crate::element::{Item, ItemId, ItemPatch, NewItem};
use crate::error::{BoardError, BoardResult};
use crate::id_generator::IdGenerator;

/// Ordered collection of everything placed on the board.
///
/// Render order is insertion order. The store is owned by the app; other
/// parts of the UI only read it and hand back [`Command`](crate::Command)s.
#[derive(Debug, Default)]
pub struct ItemStore {
    items: Vec<Item>,
    ids: IdGenerator,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item at the end of the store and return its fresh id.
    pub fn append(&mut self, new_item: NewItem) -> ItemId {
        let id = self.ids.generate_id();
        self.items.push(Item::new(id, new_item));
        id
    }

    /// Merge `patch` into the item with the given id.
    ///
    /// An unknown id leaves the store untouched and reports
    /// [`BoardError::UnknownItem`].
    pub fn patch(&mut self, id: ItemId, patch: &ItemPatch) -> BoardResult<()> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id() == id)
            .ok_or(BoardError::UnknownItem(id))?;
        item.apply(patch);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
