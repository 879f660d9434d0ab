use std::sync::Arc;

use parking_lot::Mutex;

use crate::element::ImageSource;
use crate::error::BoardError;
#[cfg(not(target_arch = "wasm32"))]
use crate::error::BoardResult;
use crate::file_handler::decode_image;
#[cfg(not(target_arch = "wasm32"))]
use crate::file_handler::has_image_extension;

/// Manifest listing the sticker files when the gallery is served over HTTP.
pub const MANIFEST_NAME: &str = "index.json";

#[derive(Default)]
struct GalleryState {
    stickers: Vec<ImageSource>,
    errors: Vec<BoardError>,
    loaded: bool,
}

/// The bundled sticker images, loaded once at startup.
///
/// On the web the load finishes asynchronously, so the state sits behind a
/// mutex that the fetch task fills in.
#[derive(Clone, Default)]
pub struct StickerGallery {
    state: Arc<Mutex<GalleryState>>,
}

impl StickerGallery {
    /// A gallery with a fixed set of stickers.
    pub fn from_sources(stickers: Vec<ImageSource>) -> Self {
        Self {
            state: Arc::new(Mutex::new(GalleryState {
                stickers,
                errors: Vec::new(),
                loaded: true,
            })),
        }
    }

    /// Read every image in `dir`, sorted by file name.
    ///
    /// Files that fail to load are skipped and kept for [`Self::take_errors`].
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_dir(dir: impl AsRef<std::path::Path>) -> Self {
        let dir = dir.as_ref();
        let mut state = GalleryState {
            loaded: true,
            ..Default::default()
        };

        match sticker_paths(dir) {
            Ok(paths) => {
                for path in paths {
                    let name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    let loaded = std::fs::read(&path)
                        .map_err(|source| BoardError::Io {
                            path: path.display().to_string(),
                            source,
                        })
                        .and_then(|bytes| decode_image(&name, &bytes));
                    match loaded {
                        Ok(pixels) => state.stickers.push(ImageSource::sticker(name, pixels)),
                        Err(err) => state.errors.push(err),
                    }
                }
            }
            Err(err) => state.errors.push(err),
        }

        log::info!(
            "Loaded {} stickers from {}",
            state.stickers.len(),
            dir.display()
        );
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Fetch `{base_url}/index.json` and every sticker it lists.
    #[cfg(target_arch = "wasm32")]
    pub fn fetch(base_url: &str, ctx: &egui::Context) -> Self {
        let gallery = Self::default();
        let state = gallery.state.clone();
        let base_url = base_url.trim_end_matches('/').to_owned();
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            let manifest_url = format!("{base_url}/{MANIFEST_NAME}");
            let names: Vec<String> = match fetch_bytes(&manifest_url).await {
                Ok(bytes) => match serde_json::from_slice(&bytes) {
                    Ok(names) => names,
                    Err(err) => {
                        let mut state = state.lock();
                        state.errors.push(BoardError::Config(format!(
                            "bad sticker manifest {manifest_url}: {err}"
                        )));
                        state.loaded = true;
                        return;
                    }
                },
                Err(err) => {
                    let mut state = state.lock();
                    state.errors.push(err);
                    state.loaded = true;
                    return;
                }
            };

            for name in names {
                let url = format!("{base_url}/{name}");
                let loaded = match fetch_bytes(&url).await {
                    Ok(bytes) => decode_image(&name, &bytes),
                    Err(err) => Err(err),
                };
                let mut state = state.lock();
                match loaded {
                    Ok(pixels) => state.stickers.push(ImageSource::sticker(name, pixels)),
                    Err(err) => state.errors.push(err),
                }
            }

            let mut state = state.lock();
            state.loaded = true;
            log::info!("Loaded {} stickers from {base_url}", state.stickers.len());
            ctx.request_repaint();
        });

        gallery
    }

    pub fn stickers(&self) -> Vec<ImageSource> {
        self.state.lock().stickers.clone()
    }

    pub fn len(&self) -> usize {
        self.state.lock().stickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_loaded(&self) -> bool {
        self.state.lock().loaded
    }

    /// Load failures not yet reported.
    pub fn take_errors(&self) -> Vec<BoardError> {
        std::mem::take(&mut self.state.lock().errors)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn sticker_paths(dir: &std::path::Path) -> BoardResult<Vec<std::path::PathBuf>> {
    let io_err = |source| BoardError::Io {
        path: dir.display().to_string(),
        source,
    };

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && has_image_extension(&path.to_string_lossy()) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

#[cfg(target_arch = "wasm32")]
async fn fetch_bytes(url: &str) -> Result<Vec<u8>, BoardError> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let fetch_err = |detail: String| BoardError::Io {
        path: url.to_owned(),
        source: std::io::Error::other(detail),
    };

    let window = web_sys::window().ok_or_else(|| fetch_err("no window".to_owned()))?;
    let resp_value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| fetch_err(format!("{e:?}")))?;
    let resp: web_sys::Response = resp_value
        .dyn_into()
        .map_err(|_| fetch_err("not a Response".to_owned()))?;
    if !resp.ok() {
        return Err(fetch_err(format!("HTTP {}", resp.status())));
    }
    let buf = JsFuture::from(resp.array_buffer().map_err(|e| fetch_err(format!("{e:?}")))?)
        .await
        .map_err(|e| fetch_err(format!("{e:?}")))?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Color32, ColorImage};

    #[test]
    fn fixed_gallery_is_loaded() {
        let gallery = StickerGallery::from_sources(vec![ImageSource::sticker(
            "star.png",
            ColorImage::new([2, 2], Color32::YELLOW),
        )]);
        assert!(gallery.is_loaded());
        assert_eq!(gallery.len(), 1);
        assert_eq!(gallery.stickers()[0].name(), "star.png");
        assert!(gallery.take_errors().is_empty());
    }

    #[test]
    fn missing_directory_is_reported_once() {
        let gallery = StickerGallery::load_dir("definitely/not/here");
        assert!(gallery.is_empty());
        assert_eq!(gallery.take_errors().len(), 1);
        assert!(gallery.take_errors().is_empty());
    }

    #[test]
    fn loads_images_sorted_and_skips_others() {
        let dir = std::env::temp_dir().join(format!("vision_board_stickers_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        for name in ["b.png", "a.png"] {
            image::RgbaImage::from_pixel(3, 3, image::Rgba([0, 0, 255, 255]))
                .save(dir.join(name))
                .unwrap();
        }
        std::fs::write(dir.join("notes.txt"), "hello").unwrap();
        std::fs::write(dir.join("broken.png"), "not a png").unwrap();

        let gallery = StickerGallery::load_dir(&dir);
        let names: Vec<String> = gallery.stickers().iter().map(|s| s.name().to_owned()).collect();
        assert_eq!(names, vec!["a.png", "b.png"]);
        assert_eq!(gallery.take_errors().len(), 1);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
