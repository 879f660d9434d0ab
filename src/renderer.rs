use egui::text::{LayoutJob, TextFormat};
use egui::{Align, Color32, FontId, Painter, Rect, Stroke, TextureId, Ui, pos2, vec2};

use crate::element::{ImageItem, ImageSource, Item, ItemKind, TextItem};
use crate::texture_manager::TextureManager;

/// Keeps at most this many image textures alive at once.
const TEXTURE_CACHE_SIZE: usize = 256;

/// Draws board items.
pub struct Renderer {
    textures: TextureManager,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            textures: TextureManager::new(TEXTURE_CACHE_SIZE),
        }
    }

    pub fn begin_frame(&mut self) {
        self.textures.begin_frame();
    }

    /// Drop every cached texture, e.g. after the board is cleared.
    pub fn release_textures(&mut self) {
        self.textures.clear_cache();
    }

    /// Texture for an image source, uploaded on first use.
    pub fn texture_for(&mut self, source: &ImageSource, ctx: &egui::Context) -> TextureId {
        self.textures.texture_for(source, ctx)
    }

    /// Paint the board background.
    pub fn draw_board(&self, painter: &Painter, board_rect: Rect, background: Color32) {
        painter.rect_filled(board_rect, 0.0, background);
    }

    /// Draw `item` into `rect` (screen space).
    pub fn draw_item(&mut self, ui: &Ui, painter: &Painter, item: &Item, rect: Rect) {
        match &item.kind {
            ItemKind::Image(image) => self.draw_image(ui, image, rect),
            ItemKind::Text(text) => draw_text(ui, painter, text, rect),
        }
    }

    fn draw_image(&mut self, ui: &Ui, image: &ImageItem, rect: Rect) {
        let texture_id = self.texture_for(&image.source, ui.ctx());
        let radius = image.corner.radius(rect.size());
        egui::Image::from_texture(egui::load::SizedTexture::new(texture_id, rect.size()))
            .rounding(radius)
            .paint_at(ui, rect);
    }

    /// Outline shown around the hovered or active item.
    pub fn draw_selection(&self, painter: &Painter, rect: Rect) {
        painter.rect_stroke(rect, 0.0, Stroke::new(1.0, Color32::from_rgb(30, 120, 255)));
    }
}

fn draw_text(ui: &Ui, painter: &Painter, text: &TextItem, rect: Rect) {
    let underline = if text.underline {
        Stroke::new((text.font_size / 16.0).max(1.0), text.color)
    } else {
        Stroke::NONE
    };
    let mut job = LayoutJob::single_section(
        text.text.clone(),
        TextFormat {
            font_id: FontId::proportional(text.font_size),
            color: text.color,
            underline,
            ..Default::default()
        },
    );
    job.wrap.max_width = rect.width();
    job.halign = Align::Center;

    let galley = ui.fonts(|fonts| fonts.layout_job(job));
    // Centered galleys are laid out around x = 0
    let pos = pos2(rect.center().x, rect.center().y - galley.size().y / 2.0);

    if text.bold {
        // The default fonts have no bold face; overdraw with a small offset
        let offset = (text.font_size / 32.0).max(0.5);
        painter.galley(pos + vec2(offset, 0.0), galley.clone(), text.color);
    }
    painter.galley(pos, galley, text.color);
}
