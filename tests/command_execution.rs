use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use egui::{Color32, ColorImage, Pos2};
use vision_board::element::{self, ImageSource, PLACEHOLDER_TEXT, TextItem};
use vision_board::export::DownloadSink;
use vision_board::file_handler::LoadOutcome;
use vision_board::sticker::StickerGallery;
use vision_board::{
    BoardConfig, BoardError, BoardResult, Command, CommandOutcome, CornerStyle, EditorMode,
    FailurePolicy, ItemId, ItemKind, ItemPatch, ItemStore, TextEditor, VisionBoardApp,
};

struct NullSink;

impl DownloadSink for NullSink {
    fn save(&self, file_name: &str, _png: &[u8]) -> BoardResult<String> {
        Ok(file_name.to_owned())
    }
}

#[derive(Clone, Default)]
struct RecordingSink {
    saved: Rc<RefCell<Vec<Vec<u8>>>>,
}

impl DownloadSink for RecordingSink {
    fn save(&self, file_name: &str, png: &[u8]) -> BoardResult<String> {
        self.saved.borrow_mut().push(png.to_vec());
        Ok(file_name.to_owned())
    }
}

fn sticker(name: &str) -> ImageSource {
    ImageSource::sticker(name, ColorImage::new([4, 4], Color32::YELLOW))
}

fn create_test_app(config: BoardConfig) -> VisionBoardApp {
    VisionBoardApp::with_parts(
        config,
        StickerGallery::from_sources(vec![sticker("star.png")]),
        Box::new(NullSink),
    )
}

fn add_text(store: &mut ItemStore, content: &str) -> ItemId {
    store.append(element::factory::text(TextItem::new(content, 32.0, Color32::BLACK)))
}

#[test]
fn test_append_assigns_distinct_ids_in_order() {
    let mut store = ItemStore::new();
    let ids: Vec<ItemId> = (0..5)
        .map(|i| add_text(&mut store, &format!("note {i}")))
        .collect();

    assert_eq!(store.len(), 5);
    assert_eq!(ids.iter().collect::<HashSet<_>>().len(), 5);
    let stored: Vec<ItemId> = store.items().iter().map(|item| item.id()).collect();
    assert_eq!(stored, ids);
}

#[test]
fn test_patch_unknown_id_leaves_store_unchanged() {
    let mut store = ItemStore::new();
    let id = add_text(&mut store, "keep me");
    let before = store.items().to_vec();

    let result = store.patch(ItemId(999), &ItemPatch::position(Pos2::new(0.0, 0.0)));

    assert!(matches!(result, Err(BoardError::UnknownItem(ItemId(999)))));
    assert_eq!(store.items(), before.as_slice());
    assert!(store.get(id).is_some());
}

#[test]
fn test_clear_empties_store_and_ids_keep_growing() {
    let mut store = ItemStore::new();
    let first = add_text(&mut store, "a");
    add_text(&mut store, "b");

    let outcome = Command::Clear.execute(&mut store).unwrap();
    assert_eq!(outcome, CommandOutcome::Cleared);
    assert!(store.is_empty());

    // Clearing an empty store is fine too
    Command::Clear.execute(&mut store).unwrap();
    assert_eq!(store.len(), 0);

    let after = add_text(&mut store, "c");
    assert!(after > first);
}

#[test]
fn test_cycle_corner_command() {
    let mut store = ItemStore::new();
    let id = store.append(element::factory::sticker(sticker("sun.png")));

    let corner = |store: &ItemStore| store.get(id).unwrap().as_image().unwrap().corner;
    assert_eq!(corner(&store), CornerStyle::SlightlyRounded);

    Command::CycleCorner(id).execute(&mut store).unwrap();
    assert_eq!(corner(&store), CornerStyle::Circular);
    Command::CycleCorner(id).execute(&mut store).unwrap();
    assert_eq!(corner(&store), CornerStyle::Sharp);
    Command::CycleCorner(id).execute(&mut store).unwrap();
    assert_eq!(corner(&store), CornerStyle::SlightlyRounded);
}

#[test]
fn test_cycle_corner_on_text_is_unchanged() {
    let mut store = ItemStore::new();
    let id = add_text(&mut store, "hi");
    let before = store.get(id).unwrap().clone();

    let outcome = Command::CycleCorner(id).execute(&mut store).unwrap();

    assert_eq!(outcome, CommandOutcome::Unchanged(id));
    assert_eq!(store.get(id).unwrap(), &before);
}

#[test]
fn test_text_editor_create_with_empty_draft_uses_placeholder() {
    let mut store = ItemStore::new();
    let mut editor = TextEditor::new();
    editor.open_new();

    let command = editor.confirm();
    command.execute(&mut store).unwrap();

    assert!(!editor.is_open());
    let text = store.items()[0].as_text().unwrap();
    assert_eq!(text.text, PLACEHOLDER_TEXT);
}

#[test]
fn test_text_editor_draft_resets_after_confirm() {
    let mut editor = TextEditor::new();
    editor.open_new();
    editor.set_text("Travel");
    editor.set_font_size(250.0);
    editor.toggle_bold();
    assert_eq!(editor.draft().font_size, 100.0);

    let _ = editor.confirm();

    assert_eq!(editor.draft(), &TextItem::default());
    assert_eq!(editor.mode(), EditorMode::Create);
}

#[test]
fn test_text_editor_cancel_discards_draft() {
    let mut store = ItemStore::new();
    let id = add_text(&mut store, "original");
    let mut editor = TextEditor::new();

    editor.open_edit(id, store.get(id).unwrap().as_text().unwrap());
    editor.set_text("changed");
    editor.cancel();

    assert!(!editor.is_open());
    assert_eq!(editor.mode(), EditorMode::Create);
    assert_eq!(editor.draft().text, "");
    assert_eq!(store.get(id).unwrap().as_text().unwrap().text, "original");
}

#[test]
fn test_editing_text_preserves_id_and_position() {
    let mut app = create_test_app(BoardConfig::default());
    app.text_editor_mut().open_new();
    app.text_editor_mut().set_text("first");
    app.confirm_text();
    let id = app.store().items()[0].id();

    // Move it, then edit it via the double-click path
    app.execute(Command::UpdateItem {
        id,
        patch: ItemPatch::position(Pos2::new(300.0, 120.0)),
    });
    app.begin_text_edit(id);
    assert_eq!(app.text_editor().mode(), EditorMode::Edit(id));
    assert_eq!(app.text_editor().draft().text, "first");

    app.text_editor_mut().set_text("second");
    app.text_editor_mut().set_color(Color32::RED);
    app.text_editor_mut().toggle_underline();
    app.confirm_text();

    assert_eq!(app.store().len(), 1);
    let item = app.store().get(id).unwrap();
    assert_eq!(item.geometry.position(), Pos2::new(300.0, 120.0));
    let ItemKind::Text(text) = &item.kind else {
        panic!("expected text");
    };
    assert_eq!(text.text, "second");
    assert_eq!(text.color, Color32::RED);
    assert!(text.underline);
    assert_eq!(app.text_editor().mode(), EditorMode::Create);
}

#[test]
fn test_begin_text_edit_ignores_images() {
    let mut app = create_test_app(BoardConfig::default());
    app.add_sticker(sticker("star.png"));
    let id = app.store().items()[0].id();

    app.begin_text_edit(id);

    assert!(!app.text_editor().is_open());
}

#[test]
fn test_add_sticker_closes_picker() {
    let mut app = create_test_app(BoardConfig::default());
    app.open_sticker_picker();
    let source = app.stickers().stickers()[0].clone();

    app.add_sticker(source);

    assert!(!app.is_sticker_picker_open());
    assert_eq!(app.store().len(), 1);
    assert_eq!(app.store().items()[0].geometry.width, 160.0);
}

#[test]
fn test_loaded_photo_is_added_and_failures_are_not() {
    let mut app = create_test_app(BoardConfig::default());

    app.handle_load_outcome(LoadOutcome::Cancelled);
    app.handle_load_outcome(LoadOutcome::Failed(BoardError::Export("boom".to_owned())));
    assert!(app.store().is_empty());

    app.handle_load_outcome(LoadOutcome::Loaded(ImageSource::upload(
        "me.png",
        ColorImage::new([100, 40], Color32::WHITE),
    )));
    assert_eq!(app.store().len(), 1);
    assert_eq!(app.store().items()[0].geometry.width, 50.0);
}

#[test]
fn test_missing_item_policy_controls_status() {
    let silent = BoardConfig::default();
    let mut app = create_test_app(silent);
    assert!(app.execute(Command::CycleCorner(ItemId(42))).is_none());
    assert_eq!(app.status(), None);

    let notify = BoardConfig {
        missing_item_policy: FailurePolicy::Notify,
        ..Default::default()
    };
    let mut app = create_test_app(notify);
    app.execute(Command::UpdateItem {
        id: ItemId(42),
        patch: ItemPatch::position(Pos2::new(1.0, 1.0)),
    });
    assert_eq!(app.status(), Some("no item with id #42"));
}

#[test]
fn test_decode_failure_policy_notify() {
    let config = BoardConfig {
        decode_failure_policy: FailurePolicy::Notify,
        ..Default::default()
    };
    let mut app = create_test_app(config);

    app.handle_load_outcome(LoadOutcome::Failed(BoardError::Config("bad".to_owned())));

    assert!(app.store().is_empty());
    assert!(app.status().is_some());
}

#[test]
fn test_app_clear() {
    let mut app = create_test_app(BoardConfig::default());
    app.add_sticker(sticker("star.png"));
    app.text_editor_mut().open_new();
    app.confirm_text();
    assert_eq!(app.store().len(), 2);

    app.clear();

    assert!(app.store().is_empty());
}

#[test]
fn test_background_defaults_from_config() {
    let mut app = create_test_app(BoardConfig::default());
    assert_eq!(app.background(), Color32::from_rgb(0xff, 0xea, 0xa3));
    app.set_background(Color32::WHITE);
    assert_eq!(app.background(), Color32::WHITE);
}

#[test]
fn test_export_renders_store_not_open_windows() {
    let sink = RecordingSink::default();
    let mut app = VisionBoardApp::with_parts(
        BoardConfig::default(),
        StickerGallery::from_sources(vec![sticker("star.png")]),
        Box::new(sink.clone()),
    );
    app.text_editor_mut().open_new();
    app.open_sticker_picker();

    let ctx = egui::Context::default();
    let _ = ctx.run(egui::RawInput::default(), |_| {});
    app.export(&ctx);

    assert_eq!(app.status(), Some("Saved vision-board.png"));
    let saved = sink.saved.borrow();
    let png = image::load_from_memory(&saved[0]).unwrap().to_rgba8();
    assert_eq!(png.dimensions(), (2700, 1800));
    // The modal windows sit over the board center on screen
    assert_eq!(png.get_pixel(1350, 900).0, [0xff, 0xea, 0xa3, 255]);
}
