use egui::{Color32, ColorImage, Pos2, Vec2};
use vision_board::element::{
    self, CornerStyle, ImageSource, ItemKind, PLACEHOLDER_TEXT, SourceOrigin, TextItem,
};

fn photo_source(width: usize, height: usize) -> ImageSource {
    ImageSource::upload("beach.jpg", ColorImage::new([width, height], Color32::BLUE))
}

#[test]
fn test_photo_factory() {
    let photo = element::factory::photo(photo_source(400, 300));

    // Uploaded photos land at (60, 60) at half their pixel size
    assert_eq!(photo.geometry.position(), Pos2::new(60.0, 60.0));
    assert_eq!(photo.geometry.size(), Vec2::new(200.0, 150.0));

    match &photo.kind {
        ItemKind::Image(image) => {
            assert_eq!(image.corner, CornerStyle::SlightlyRounded);
            assert_eq!(image.source.origin(), SourceOrigin::Upload);
        }
        other => panic!("expected an image, got {other:?}"),
    }
}

#[test]
fn test_tiny_photo_keeps_positive_size() {
    let photo = element::factory::photo(photo_source(1, 1));
    assert!(photo.geometry.width > 0.0);
    assert!(photo.geometry.height > 0.0);
}

#[test]
fn test_sticker_factory() {
    let source = ImageSource::sticker("star.png", ColorImage::new([512, 64], Color32::YELLOW));
    let sticker = element::factory::sticker(source);

    // Stickers ignore their pixel size
    assert_eq!(sticker.geometry.position(), Pos2::new(80.0, 80.0));
    assert_eq!(sticker.geometry.size(), Vec2::new(160.0, 160.0));
    assert!(matches!(sticker.kind, ItemKind::Image(_)));
}

#[test]
fn test_text_factory_uses_placeholder() {
    let text = element::factory::text(TextItem::default());

    assert_eq!(text.geometry.position(), Pos2::new(70.0, 70.0));
    assert_eq!(text.geometry.size(), Vec2::new(200.0, 60.0));
    match &text.kind {
        ItemKind::Text(text) => {
            assert_eq!(text.text, PLACEHOLDER_TEXT);
            assert_eq!(text.font_size, 32.0);
            assert_eq!(text.color, Color32::BLACK);
            assert!(!text.bold);
            assert!(!text.underline);
        }
        other => panic!("expected text, got {other:?}"),
    }
}

#[test]
fn test_text_factory_keeps_content_and_clamps_size() {
    let mut draft = TextItem::new("Dream big", 32.0, Color32::RED);
    draft.font_size = 500.0;
    draft.bold = true;

    let text = element::factory::text(draft);
    let ItemKind::Text(text) = text.kind else {
        panic!("expected text");
    };
    assert_eq!(text.text, "Dream big");
    assert_eq!(text.font_size, 100.0);
    assert!(text.bold);
}
