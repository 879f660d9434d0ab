use egui::Color32;

use crate::command::{Command, CommandOutcome};
use crate::config::BoardConfig;
use crate::document::ItemStore;
use crate::element::{ImageSource, ItemId, factory};
use crate::error::BoardError;
use crate::export::{DownloadSink, Exporter};
use crate::file_handler::{LoadOutcome, PhotoLoader};
use crate::panels::{central_panel, sticker_modal, text_modal, tools_panel};
use crate::placement::Gesture;
use crate::renderer::Renderer;
use crate::sticker::StickerGallery;
use crate::text_editor::TextEditor;

/// Top-level application state.
///
/// Owns the item store; panels read it and mutate it only through the
/// methods below.
pub struct VisionBoardApp {
    pub(crate) config: BoardConfig,
    pub(crate) store: ItemStore,
    pub(crate) background: Color32,
    pub(crate) renderer: Renderer,
    pub(crate) text_editor: TextEditor,
    pub(crate) show_sticker_picker: bool,
    pub(crate) stickers: StickerGallery,
    pub(crate) photos: PhotoLoader,
    pub(crate) exporter: Exporter,
    pub(crate) gesture: Option<Gesture>,
    /// Latest message surfaced by a `Notify` failure policy or an export
    pub(crate) status: Option<String>,
}

impl VisionBoardApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: BoardConfig) -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        let (stickers, sink): (StickerGallery, Box<dyn DownloadSink>) = (
            StickerGallery::load_dir(&config.sticker_dir),
            Box::new(crate::export::DirectorySink::new(config.export_dir.clone())),
        );
        #[cfg(target_arch = "wasm32")]
        let (stickers, sink): (StickerGallery, Box<dyn DownloadSink>) = (
            StickerGallery::fetch(&config.sticker_dir, &cc.egui_ctx),
            Box::new(crate::export::BrowserDownload),
        );

        cc.egui_ctx.set_visuals(egui::Visuals::light());
        Self::with_parts(config, stickers, sink)
    }

    /// Build the app from already prepared parts.
    pub fn with_parts(
        config: BoardConfig,
        stickers: StickerGallery,
        sink: Box<dyn DownloadSink>,
    ) -> Self {
        let background = config.background_color().unwrap_or_else(|err| {
            log::error!("{err}; using the default background");
            Color32::from_rgb(0xff, 0xea, 0xa3)
        });
        let exporter = Exporter::new(config.export_scale, config.export_file_name.clone(), sink);

        Self {
            config,
            store: ItemStore::new(),
            background,
            renderer: Renderer::new(),
            text_editor: TextEditor::new(),
            show_sticker_picker: false,
            stickers,
            photos: PhotoLoader::new(),
            exporter,
            gesture: None,
            status: None,
        }
    }

    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn background(&self) -> Color32 {
        self.background
    }

    pub fn set_background(&mut self, color: Color32) {
        self.background = color;
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn text_editor(&self) -> &TextEditor {
        &self.text_editor
    }

    pub fn text_editor_mut(&mut self) -> &mut TextEditor {
        &mut self.text_editor
    }

    pub fn stickers(&self) -> &StickerGallery {
        &self.stickers
    }

    pub fn is_sticker_picker_open(&self) -> bool {
        self.show_sticker_picker
    }

    pub fn open_sticker_picker(&mut self) {
        self.show_sticker_picker = true;
    }

    pub fn close_sticker_picker(&mut self) {
        self.show_sticker_picker = false;
    }

    /// Run a command against the store, routing failures through the
    /// configured policies.
    pub fn execute(&mut self, command: Command) -> Option<CommandOutcome> {
        match command.execute(&mut self.store) {
            Ok(CommandOutcome::Cleared) => {
                self.gesture = None;
                self.renderer.release_textures();
                Some(CommandOutcome::Cleared)
            }
            Ok(outcome) => Some(outcome),
            Err(err @ BoardError::UnknownItem(_)) => {
                let policy = self.config.missing_item_policy;
                self.report(policy.report(&err));
                None
            }
            Err(err) => {
                log::error!("{err}");
                self.status = Some(err.to_string());
                None
            }
        }
    }

    /// Add the photo from a finished load, or report why there is none.
    pub fn handle_load_outcome(&mut self, outcome: LoadOutcome) {
        match outcome {
            LoadOutcome::Loaded(source) => {
                log::info!("Loaded photo {}", source.name());
                self.execute(Command::AddItem(factory::photo(source)));
            }
            LoadOutcome::Failed(err) => {
                let policy = self.config.decode_failure_policy;
                self.report(policy.report(&err));
            }
            LoadOutcome::Cancelled => log::debug!("Photo pick cancelled"),
        }
    }

    /// Place a sticker and close the picker.
    pub fn add_sticker(&mut self, source: ImageSource) {
        self.execute(Command::AddItem(factory::sticker(source)));
        self.close_sticker_picker();
    }

    /// Open the text editor on an existing text item (double click).
    pub fn begin_text_edit(&mut self, id: ItemId) {
        match self.store.get(id).and_then(|item| item.as_text()) {
            Some(text) => self.text_editor.open_edit(id, text),
            None => {
                let policy = self.config.missing_item_policy;
                self.report(policy.report(&BoardError::UnknownItem(id)));
            }
        }
    }

    pub fn confirm_text(&mut self) {
        let command = self.text_editor.confirm();
        self.execute(command);
    }

    pub fn cancel_text(&mut self) {
        self.text_editor.cancel();
    }

    pub fn clear(&mut self) {
        self.execute(Command::Clear);
    }

    /// Render the board to PNG and deliver it to the download sink.
    pub fn export(&mut self, ctx: &egui::Context) {
        let result = self.exporter.export(
            ctx,
            &self.store,
            self.config.board_size(),
            self.background,
        );
        match result {
            Ok(location) => self.status = Some(format!("Saved {location}")),
            Err(err) => {
                log::error!("{err}");
                self.status = Some(err.to_string());
            }
        }
    }

    fn report(&mut self, message: Option<String>) {
        if message.is_some() {
            self.status = message;
        }
    }

    /// Pick up finished photo loads and sticker load failures.
    fn process_background_work(&mut self, ctx: &egui::Context) {
        self.photos.load_dropped(ctx);
        for outcome in self.photos.drain() {
            self.handle_load_outcome(outcome);
        }

        let policy = self.config.decode_failure_policy;
        for err in self.stickers.take_errors() {
            let message = policy.report(&err);
            self.report(message);
        }
    }
}

impl eframe::App for VisionBoardApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.renderer.begin_frame();
        self.process_background_work(ctx);

        tools_panel(self, ctx);
        central_panel(self, ctx);
        text_modal(self, ctx);
        sticker_modal(self, ctx);
    }
}
