use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use egui::{ColorImage, Vec2, vec2};

// Uploaded photos get a fresh texture key each time, even for the same file.
static NEXT_UPLOAD_KEY: AtomicU64 = AtomicU64::new(1);

/// Rounding radius used by [`CornerStyle::SlightlyRounded`].
pub const SLIGHT_CORNER_RADIUS: f32 = 10.0;

/// Corner rounding applied to an image item, cycled by clicking the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CornerStyle {
    Sharp,
    #[default]
    SlightlyRounded,
    Circular,
}

impl CornerStyle {
    pub const ALL: [CornerStyle; 3] = [
        CornerStyle::Sharp,
        CornerStyle::SlightlyRounded,
        CornerStyle::Circular,
    ];

    /// The style that follows `self` in the click cycle.
    pub fn next(self) -> Self {
        match self {
            CornerStyle::Sharp => CornerStyle::SlightlyRounded,
            CornerStyle::SlightlyRounded => CornerStyle::Circular,
            CornerStyle::Circular => CornerStyle::Sharp,
        }
    }

    /// Corner radius in points for a box of the given size.
    pub fn radius(self, size: Vec2) -> f32 {
        match self {
            CornerStyle::Sharp => 0.0,
            CornerStyle::SlightlyRounded => SLIGHT_CORNER_RADIUS.min(size.min_elem() / 2.0),
            CornerStyle::Circular => size.min_elem() / 2.0,
        }
    }
}

/// Where an image's pixels came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceOrigin {
    Upload,
    Sticker,
}

/// Decoded pixels plus the key used to cache their texture.
#[derive(Clone)]
pub struct ImageSource {
    key: String,
    name: String,
    origin: SourceOrigin,
    pixels: Arc<ColorImage>,
}

// ColorImage dumps every pixel in its Debug output
impl std::fmt::Debug for ImageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageSource")
            .field("key", &self.key)
            .field("name", &self.name)
            .field("origin", &self.origin)
            .field("size", &self.pixels.size)
            .finish()
    }
}

impl PartialEq for ImageSource {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl ImageSource {
    pub fn upload(name: impl Into<String>, pixels: ColorImage) -> Self {
        let name = name.into();
        let n = NEXT_UPLOAD_KEY.fetch_add(1, Ordering::Relaxed);
        Self {
            key: format!("upload:{n}:{name}"),
            name,
            origin: SourceOrigin::Upload,
            pixels: Arc::new(pixels),
        }
    }

    pub fn sticker(name: impl Into<String>, pixels: ColorImage) -> Self {
        let name = name.into();
        Self {
            key: format!("sticker:{name}"),
            name,
            origin: SourceOrigin::Sticker,
            pixels: Arc::new(pixels),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn origin(&self) -> SourceOrigin {
        self.origin
    }

    pub fn pixels(&self) -> &Arc<ColorImage> {
        &self.pixels
    }

    /// Size of the decoded bitmap in pixels.
    pub fn pixel_size(&self) -> Vec2 {
        let [w, h] = self.pixels.size;
        vec2(w as f32, h as f32)
    }
}

/// Image variant of a board item.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageItem {
    pub source: ImageSource,
    pub corner: CornerStyle,
}

impl ImageItem {
    pub fn new(source: ImageSource) -> Self {
        Self {
            source,
            corner: CornerStyle::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_cycle_wraps_after_three_clicks() {
        for start in CornerStyle::ALL {
            assert_eq!(start.next().next().next(), start);
        }
        assert_eq!(CornerStyle::Sharp.next(), CornerStyle::SlightlyRounded);
        assert_eq!(CornerStyle::SlightlyRounded.next(), CornerStyle::Circular);
        assert_eq!(CornerStyle::Circular.next(), CornerStyle::Sharp);
    }

    #[test]
    fn circular_radius_uses_short_side() {
        assert_eq!(CornerStyle::Circular.radius(vec2(200.0, 80.0)), 40.0);
        assert_eq!(CornerStyle::Sharp.radius(vec2(200.0, 80.0)), 0.0);
        assert_eq!(CornerStyle::SlightlyRounded.radius(vec2(6.0, 6.0)), 3.0);
    }

    #[test]
    fn uploads_never_share_a_key() {
        let a = ImageSource::upload("cat.png", ColorImage::new([1, 1], egui::Color32::RED));
        let b = ImageSource::upload("cat.png", ColorImage::new([1, 1], egui::Color32::RED));
        assert_ne!(a.key(), b.key());
        assert_eq!(a.origin(), SourceOrigin::Upload);
    }
}
