use std::collections::HashMap;

use egui::{Context, TextureHandle, TextureId, TextureOptions};

use crate::element::ImageSource;

/// Uploads image sources to the GPU once and keeps their handles around.
///
/// Textures are keyed by [`ImageSource::key`], so several stickers of the same
/// kind share one texture. Least recently used entries are dropped once the
/// cache grows past `max_cache_size`.
pub struct TextureManager {
    texture_cache: HashMap<String, TextureHandle>,
    /// Frame in which each texture was last requested
    last_used: HashMap<String, u64>,
    current_frame: u64,
    max_cache_size: usize,
}

impl TextureManager {
    pub fn new(max_cache_size: usize) -> Self {
        Self {
            texture_cache: HashMap::new(),
            last_used: HashMap::new(),
            current_frame: 0,
            max_cache_size,
        }
    }

    /// Should be called at the start of each frame.
    pub fn begin_frame(&mut self) {
        self.current_frame += 1;
    }

    /// Texture for `source`, uploading it on first use.
    pub fn texture_for(&mut self, source: &ImageSource, ctx: &Context) -> TextureId {
        let key = source.key();
        self.last_used.insert(key.to_owned(), self.current_frame);

        if let Some(handle) = self.texture_cache.get(key) {
            return handle.id();
        }

        log::debug!("Uploading texture {key}");
        let handle = ctx.load_texture(key, source.pixels().as_ref().clone(), TextureOptions::LINEAR);
        let id = handle.id();
        self.texture_cache.insert(key.to_owned(), handle);
        self.prune_cache_if_needed();
        id
    }

    /// Drops textures that were not requested in the current frame.
    fn prune_cache_if_needed(&mut self) {
        if self.texture_cache.len() <= self.max_cache_size {
            return;
        }

        let mut entries: Vec<(String, u64)> = self
            .last_used
            .iter()
            .filter(|(_, frame)| **frame < self.current_frame)
            .map(|(k, v)| (k.clone(), *v))
            .collect();

        // Oldest first
        entries.sort_by_key(|(_, frame)| *frame);

        let excess = self.texture_cache.len() - self.max_cache_size;
        for (key, _) in entries.into_iter().take(excess) {
            self.texture_cache.remove(&key);
            self.last_used.remove(&key);
        }
    }

    pub fn clear_cache(&mut self) {
        self.texture_cache.clear();
        self.last_used.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.texture_cache.len()
    }

    #[cfg(test)]
    fn contains(&self, key: &str) -> bool {
        self.texture_cache.contains_key(key)
    }
}
