use crate::document::ItemStore;
use crate::element::{ItemId, ItemKind, ItemPatch, NewItem};
use crate::error::{BoardError, BoardResult};

/// Every mutation the UI can make to the item store.
#[derive(Debug, Clone)]
pub enum Command {
    /// Append a new item with default geometry
    AddItem(NewItem),
    /// Merge a partial attribute set into an existing item
    UpdateItem { id: ItemId, patch: ItemPatch },
    /// Advance an image's corner style to the next one in the cycle
    CycleCorner(ItemId),
    /// Remove every item
    Clear,
}

/// What executing a [`Command`] did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Added(ItemId),
    Updated(ItemId),
    /// The target exists but the command does not apply to its variant.
    Unchanged(ItemId),
    Cleared,
}

impl Command {
    pub fn execute(self, store: &mut ItemStore) -> BoardResult<CommandOutcome> {
        match self {
            Command::AddItem(new_item) => {
                let kind = match new_item.kind {
                    ItemKind::Image(_) => "image",
                    ItemKind::Text(_) => "text",
                };
                let id = store.append(new_item);
                log::info!("Added {kind} item {id}");
                Ok(CommandOutcome::Added(id))
            }
            Command::UpdateItem { id, patch } => {
                store.patch(id, &patch)?;
                log::debug!("Updated item {id}: {patch:?}");
                Ok(CommandOutcome::Updated(id))
            }
            Command::CycleCorner(id) => {
                let item = store.get(id).ok_or(BoardError::UnknownItem(id))?;
                let Some(image) = item.as_image() else {
                    return Ok(CommandOutcome::Unchanged(id));
                };
                let next = image.corner.next();
                store.patch(id, &ItemPatch::corner(next))?;
                log::debug!("Item {id} corner style -> {next:?}");
                Ok(CommandOutcome::Updated(id))
            }
            Command::Clear => {
                let removed = store.len();
                store.clear();
                log::info!("Cleared board ({removed} items removed)");
                Ok(CommandOutcome::Cleared)
            }
        }
    }
}
