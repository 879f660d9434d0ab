//! Software rendering of the board for export.
//!
//! Exports never read the framebuffer. The board is redrawn from the items
//! into an [`RgbaImage`] at `scale` pixels per board point, so the result is
//! the whole board at full detail no matter how the window is sized or what
//! floats above the board on screen.

use egui::epaint::{FontImage, Mesh};
use egui::text::{LayoutJob, TextFormat};
use egui::{Align, Color32, ColorImage, FontId, Pos2, Rect, Stroke, Vec2, pos2, vec2};
use image::imageops::FilterType;
use image::{Rgba, RgbaImage};

use crate::element::{ImageItem, Item, ItemKind, TextItem};
use crate::error::{BoardError, BoardResult};

/// Largest side of an exported image, in pixels.
pub const MAX_EXPORT_SIDE: u32 = 16_384;

/// Gamma egui applies to font coverage when uploading the atlas.
const TEXT_GAMMA: f32 = 0.55;

/// Sample points are nudged off pixel centers so a pixel on an edge shared
/// by two triangles is filled by exactly one of them.
const SAMPLE_OFFSET: Vec2 = vec2(0.5 + 0.001_3, 0.5 + 0.000_7);

/// Render `items` over `background` at `scale` pixels per board point.
///
/// `ctx` supplies the fonts; it must have run at least one frame.
pub fn render_board(
    ctx: &egui::Context,
    items: &[Item],
    board_size: Vec2,
    background: Color32,
    scale: f32,
) -> BoardResult<RgbaImage> {
    let (width, height) = pixel_size(board_size * scale);
    if width > MAX_EXPORT_SIDE || height > MAX_EXPORT_SIDE {
        return Err(BoardError::Export(format!(
            "{width}x{height} exceeds the {MAX_EXPORT_SIDE} pixel limit"
        )));
    }

    let mut canvas = RgbaImage::from_pixel(width, height, Rgba(background.to_srgba_unmultiplied()));
    for item in items {
        match &item.kind {
            ItemKind::Image(image) => draw_image(&mut canvas, image, item.rect(), scale)?,
            ItemKind::Text(text) => draw_text(ctx, &mut canvas, text, item.rect(), scale),
        }
    }
    log::debug!("Rendered {} items into {width}x{height}", items.len());
    Ok(canvas)
}

fn pixel_size(size: Vec2) -> (u32, u32) {
    (
        (size.x.round() as u32).max(1),
        (size.y.round() as u32).max(1),
    )
}

fn to_rgba_image(image: &ColorImage) -> BoardResult<RgbaImage> {
    let [width, height] = image.size;
    let raw = image
        .pixels
        .iter()
        .flat_map(|c| c.to_srgba_unmultiplied())
        .collect();
    RgbaImage::from_raw(width as u32, height as u32, raw)
        .ok_or_else(|| BoardError::Export("image size does not match its pixels".to_owned()))
}

/// Resample the source pixels straight to the export size and paste them with
/// the item's corner rounding.
fn draw_image(canvas: &mut RgbaImage, image: &ImageItem, rect: Rect, scale: f32) -> BoardResult<()> {
    let (width, height) = pixel_size(rect.size() * scale);
    let source = to_rgba_image(image.source.pixels())?;
    let resized = if source.dimensions() == (width, height) {
        source
    } else {
        image::imageops::resize(&source, width, height, FilterType::Lanczos3)
    };

    let radius = (image.corner.radius(rect.size()) * scale)
        .min(width as f32 / 2.0)
        .min(height as f32 / 2.0);
    let left = (rect.min.x * scale).round() as i64;
    let top = (rect.min.y * scale).round() as i64;

    for (x, y, pixel) in resized.enumerate_pixels() {
        let (cx, cy) = (left + i64::from(x), top + i64::from(y));
        if cx < 0 || cy < 0 || cx >= i64::from(canvas.width()) || cy >= i64::from(canvas.height()) {
            continue;
        }
        let coverage = rounded_rect_coverage(
            pos2(x as f32 + 0.5, y as f32 + 0.5),
            vec2(width as f32, height as f32),
            radius,
        );
        let [r, g, b, a] = pixel.0.map(f32::from);
        let alpha = a / 255.0 * coverage;
        blend(
            canvas.get_pixel_mut(cx as u32, cy as u32),
            [r * alpha, g * alpha, b * alpha, alpha * 255.0],
        );
    }
    Ok(())
}

/// Fraction of the pixel at `p` inside a rounded rect anchored at the origin.
fn rounded_rect_coverage(p: Pos2, size: Vec2, radius: f32) -> f32 {
    if radius <= 0.0 {
        return 1.0;
    }
    let nearest = pos2(
        p.x.clamp(radius, size.x - radius),
        p.y.clamp(radius, size.y - radius),
    );
    (radius - p.distance(nearest) + 0.5).clamp(0.0, 1.0)
}

/// Lay the text out at export resolution and fill its glyph mesh.
fn draw_text(ctx: &egui::Context, canvas: &mut RgbaImage, text: &TextItem, rect: Rect, scale: f32) {
    let pixels_per_point = ctx.pixels_per_point();
    // Font size in points that rasterizes glyphs at `font_size * scale` pixels
    let layout_scale = scale / pixels_per_point;

    let underline = if text.underline {
        Stroke::new((text.font_size / 16.0).max(1.0) * layout_scale, text.color)
    } else {
        Stroke::NONE
    };
    let mut job = LayoutJob::single_section(
        text.text.clone(),
        TextFormat {
            font_id: FontId::proportional(text.font_size * layout_scale),
            color: text.color,
            underline,
            ..Default::default()
        },
    );
    job.wrap.max_width = rect.width() * layout_scale;
    job.halign = Align::Center;

    let (galley, atlas) = ctx.fonts(|fonts| (fonts.layout_job(job), fonts.image()));
    let galley_size = galley.rect.size() * pixels_per_point;
    let origin = pos2(
        (rect.center().x * scale - galley_size.x / 2.0).round(),
        (rect.center().y * scale - galley_size.y / 2.0).round(),
    );
    let to_canvas = |p: Pos2| origin + (p - galley.rect.min) * pixels_per_point;

    let mut passes = vec![Vec2::ZERO];
    if text.bold {
        passes.push(vec2((text.font_size / 32.0).max(0.5) * scale, 0.0));
    }
    for offset in passes {
        for row in &galley.rows {
            fill_mesh(canvas, &row.visuals.mesh, &atlas, |p| to_canvas(p) + offset);
        }
    }
}

/// Rasterize a text mesh whose UVs are texel coordinates into `atlas`.
fn fill_mesh(
    canvas: &mut RgbaImage,
    mesh: &Mesh,
    atlas: &FontImage,
    to_canvas: impl Fn(Pos2) -> Pos2,
) {
    let (canvas_w, canvas_h) = (canvas.width() as f32, canvas.height() as f32);

    for triangle in mesh.indices.chunks_exact(3) {
        let [a, b, c] = [triangle[0], triangle[1], triangle[2]].map(|i| &mesh.vertices[i as usize]);
        let [pa, pb, pc] = [a.pos, b.pos, c.pos].map(&to_canvas);
        let area = edge(pa, pb, pc);
        if area.abs() < f32::EPSILON {
            continue;
        }

        let min_x = pa.x.min(pb.x).min(pc.x).floor().max(0.0) as u32;
        let min_y = pa.y.min(pb.y).min(pc.y).floor().max(0.0) as u32;
        let max_x = pa.x.max(pb.x).max(pc.x).ceil().min(canvas_w) as u32;
        let max_y = pa.y.max(pb.y).max(pc.y).ceil().min(canvas_h) as u32;

        for y in min_y..max_y {
            for x in min_x..max_x {
                let p = pos2(x as f32, y as f32) + SAMPLE_OFFSET;
                let wa = edge(pb, pc, p) / area;
                let wb = edge(pc, pa, p) / area;
                let wc = 1.0 - wa - wb;
                if wa < 0.0 || wb < 0.0 || wc < 0.0 {
                    continue;
                }

                let uv = (a.uv.to_vec2() * wa + b.uv.to_vec2() * wb + c.uv.to_vec2() * wc).to_pos2();
                let coverage = sample_atlas(atlas, uv).powf(TEXT_GAMMA);
                if coverage <= 0.0 {
                    continue;
                }
                let color = [a.color, b.color, c.color]
                    .map(|color| color.to_array().map(f32::from));
                let premultiplied: [f32; 4] = std::array::from_fn(|i| {
                    (color[0][i] * wa + color[1][i] * wb + color[2][i] * wc) * coverage
                });
                blend(canvas.get_pixel_mut(x, y), premultiplied);
            }
        }
    }
}

/// Twice the signed area of the triangle `a b p`.
fn edge(a: Pos2, b: Pos2, p: Pos2) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

/// Bilinear coverage lookup; `uv` is in texels.
fn sample_atlas(atlas: &FontImage, uv: Pos2) -> f32 {
    let [w, h] = atlas.size;
    if w == 0 || h == 0 {
        return 0.0;
    }
    let texel = |x: i64, y: i64| {
        let x = x.clamp(0, w as i64 - 1) as usize;
        let y = y.clamp(0, h as i64 - 1) as usize;
        atlas.pixels[y * w + x]
    };

    let (u, v) = (uv.x - 0.5, uv.y - 0.5);
    let (x0, y0) = (u.floor(), v.floor());
    let (fx, fy) = (u - x0, v - y0);
    let (x0, y0) = (x0 as i64, y0 as i64);

    let top = texel(x0, y0) * (1.0 - fx) + texel(x0 + 1, y0) * fx;
    let bottom = texel(x0, y0 + 1) * (1.0 - fx) + texel(x0 + 1, y0 + 1) * fx;
    top * (1.0 - fy) + bottom * fy
}

/// Source-over blend of a premultiplied color (0..=255 channels) onto `dst`.
fn blend(dst: &mut Rgba<u8>, src: [f32; 4]) {
    let src_alpha = src[3] / 255.0;
    if src_alpha <= 0.0 {
        return;
    }
    let dst_alpha = f32::from(dst[3]) / 255.0;
    let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);
    for i in 0..3 {
        let under = f32::from(dst[i]) * dst_alpha * (1.0 - src_alpha);
        dst[i] = ((src[i] + under) / out_alpha).round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_alpha * 255.0).round() as u8;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ItemStore;
    use crate::element::{CornerStyle, Geometry, ImageSource, NewItem, TextItem, factory};

    const BACKGROUND: Color32 = Color32::from_rgb(0xff, 0xea, 0xa3);

    fn context() -> egui::Context {
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |_| {});
        ctx
    }

    fn image_item(store: &mut ItemStore, pixels: ColorImage, geometry: Geometry) {
        let mut image = ImageItem::new(ImageSource::upload("test.png", pixels));
        image.corner = CornerStyle::Sharp;
        store.append(NewItem {
            geometry,
            kind: ItemKind::Image(image),
        });
    }

    /// 30x30 pixels in 10x10 black and white cells.
    fn checkerboard() -> ColorImage {
        let mut image = ColorImage::new([30, 30], Color32::WHITE);
        for y in 0..30 {
            for x in 0..30 {
                if (x / 10 + y / 10) % 2 == 0 {
                    image.pixels[y * 30 + x] = Color32::BLACK;
                }
            }
        }
        image
    }

    #[test]
    fn empty_board_is_background_at_scale() {
        let ctx = context();
        let board = render_board(&ctx, &[], vec2(900.0, 600.0), BACKGROUND, 3.0).unwrap();

        assert_eq!(board.dimensions(), (2700, 1800));
        assert_eq!(board.get_pixel(2699, 1799).0, [0xff, 0xea, 0xa3, 255]);
    }

    #[test]
    fn items_land_at_their_board_position() {
        let ctx = context();
        let mut store = ItemStore::new();
        let red = ColorImage::new([10, 50], Color32::RED);
        image_item(&mut store, red, Geometry::new(90.0, 0.0, 10.0, 50.0));

        let board = render_board(&ctx, store.items(), vec2(200.0, 50.0), BACKGROUND, 1.0).unwrap();

        assert_eq!(board.dimensions(), (200, 50));
        assert_eq!(board.get_pixel(95, 25).0, [255, 0, 0, 255]);
        assert_eq!(board.get_pixel(150, 25).0, [0xff, 0xea, 0xa3, 255]);
        assert_eq!(board.get_pixel(190, 25).0, [0xff, 0xea, 0xa3, 255]);
    }

    #[test]
    fn photo_detail_survives_the_export_scale() {
        let ctx = context();
        let mut store = ItemStore::new();
        image_item(&mut store, checkerboard(), Geometry::new(0.0, 0.0, 10.0, 10.0));

        let board = render_board(&ctx, store.items(), vec2(10.0, 10.0), BACKGROUND, 3.0).unwrap();

        // Neighbouring pixels across a cell edge stay pure black and white
        assert_eq!(board.get_pixel(9, 5).0, [0, 0, 0, 255]);
        assert_eq!(board.get_pixel(10, 5).0, [255, 255, 255, 255]);
        assert_eq!(board.get_pixel(19, 15).0, [0, 0, 0, 255]);
        assert_eq!(board.get_pixel(20, 15).0, [255, 255, 255, 255]);
    }

    #[test]
    fn rounded_corners_show_the_background() {
        let ctx = context();
        let mut store = ItemStore::new();
        store.append(factory::sticker(ImageSource::sticker(
            "red.png",
            ColorImage::new([160, 160], Color32::RED),
        )));

        let board = render_board(&ctx, store.items(), vec2(300.0, 300.0), BACKGROUND, 1.0).unwrap();

        // Sticker sits at (80, 80) with a 10pt radius
        assert_eq!(board.get_pixel(80, 80).0, [0xff, 0xea, 0xa3, 255]);
        assert_eq!(board.get_pixel(160, 160).0, [255, 0, 0, 255]);
    }

    #[test]
    fn text_is_drawn_inside_its_box() {
        let ctx = context();
        let mut store = ItemStore::new();
        store.append(factory::text(TextItem::new("Hello", 32.0, Color32::BLACK)));

        let board = render_board(&ctx, store.items(), vec2(400.0, 300.0), Color32::WHITE, 2.0).unwrap();

        // Text box is (70, 70) 200x60, scaled by two
        let inked = |x0: u32, y0: u32, x1: u32, y1: u32| {
            (y0..y1)
                .flat_map(|y| (x0..x1).map(move |x| (x, y)))
                .filter(|&(x, y)| board.get_pixel(x, y).0[0] < 128)
                .count()
        };
        assert!(inked(140, 140, 540, 260) > 50);
        assert_eq!(inked(600, 0, 800, 600), 0);
    }

    #[test]
    fn oversized_export_is_refused() {
        let ctx = context();
        let result = render_board(&ctx, &[], vec2(10_000.0, 100.0), BACKGROUND, 3.0);
        assert!(matches!(result, Err(BoardError::Export(_))));
    }

    #[test]
    fn blend_over_opaque_keeps_opaque() {
        let mut pixel = Rgba([255, 255, 255, 255]);
        blend(&mut pixel, [0.0, 0.0, 0.0, 127.5]);
        assert_eq!(pixel.0[3], 255);
        assert!((127..=128).contains(&pixel.0[0]));
    }
}
