mod central_panel;
mod sticker_modal;
mod text_modal;
mod tools_panel;

pub use central_panel::central_panel;
pub use sticker_modal::sticker_modal;
pub use text_modal::text_modal;
pub use tools_panel::tools_panel;
