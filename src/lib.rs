#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod compositor;
pub mod config;
pub mod document;
pub mod element;
pub mod error;
pub mod export;
pub mod file_handler;
pub mod id_generator;
pub mod placement;
pub mod renderer;
pub mod sticker;
pub mod text_editor;
pub mod texture_manager;
pub mod widgets;
mod panels;

pub use app::VisionBoardApp;
pub use command::{Command, CommandOutcome};
pub use config::{BoardConfig, FailurePolicy};
pub use document::ItemStore;
pub use element::{CornerStyle, Item, ItemId, ItemKind, ItemPatch, NewItem};
pub use error::{BoardError, BoardResult};
pub use renderer::Renderer;
pub use text_editor::{EditorMode, TextEditor};
