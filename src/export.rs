//! Turning the board into a downloadable PNG.

use std::io::Cursor;

use egui::{Color32, Vec2};
use image::RgbaImage;

use crate::compositor::render_board;
use crate::document::ItemStore;
use crate::error::{BoardError, BoardResult};

/// Where finished exports go.
pub trait DownloadSink {
    /// Deliver `png` under `file_name`. Returns a human readable location.
    fn save(&self, file_name: &str, png: &[u8]) -> BoardResult<String>;
}

/// Writes exports into a directory on disk.
#[cfg(not(target_arch = "wasm32"))]
pub struct DirectorySink {
    dir: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl DirectorySink {
    pub fn new(dir: impl Into<std::path::PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl DownloadSink for DirectorySink {
    fn save(&self, file_name: &str, png: &[u8]) -> BoardResult<String> {
        let path = self.dir.join(file_name);
        std::fs::write(&path, png).map_err(|source| BoardError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(path.display().to_string())
    }
}

/// Triggers a browser download through a temporary object URL.
#[cfg(target_arch = "wasm32")]
pub struct BrowserDownload;

#[cfg(target_arch = "wasm32")]
impl DownloadSink for BrowserDownload {
    fn save(&self, file_name: &str, png: &[u8]) -> BoardResult<String> {
        use wasm_bindgen::JsCast;

        let js_err = |e: wasm_bindgen::JsValue| BoardError::Export(format!("{e:?}"));

        let bytes = js_sys::Uint8Array::from(png);
        let parts = js_sys::Array::new();
        parts.push(&bytes);
        let options = web_sys::BlobPropertyBag::new();
        options.set_type("image/png");
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(js_err)?;
        let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_err)?;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| BoardError::Export("no document".to_owned()))?;
        let anchor: web_sys::HtmlAnchorElement = document
            .create_element("a")
            .map_err(js_err)?
            .dyn_into()
            .map_err(|_| BoardError::Export("not an anchor element".to_owned()))?;
        anchor.set_href(&url);
        anchor.set_download(file_name);
        anchor.click();
        web_sys::Url::revoke_object_url(&url).map_err(js_err)?;

        Ok(file_name.to_owned())
    }
}

pub fn encode_png(image: &RgbaImage) -> BoardResult<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, image::ImageFormat::Png)
        .map_err(|err| BoardError::Export(err.to_string()))?;
    Ok(out.into_inner())
}

/// Renders the board to PNG and hands it to a [`DownloadSink`].
pub struct Exporter {
    scale: f32,
    file_name: String,
    sink: Box<dyn DownloadSink>,
}

impl Exporter {
    pub fn new(scale: f32, file_name: impl Into<String>, sink: Box<dyn DownloadSink>) -> Self {
        Self {
            scale,
            file_name: file_name.into(),
            sink,
        }
    }

    /// Export the items in `store` on a `board_size` board filled with
    /// `background`. Returns where the file went.
    pub fn export(
        &self,
        ctx: &egui::Context,
        store: &ItemStore,
        board_size: Vec2,
        background: Color32,
    ) -> BoardResult<String> {
        log::info!("Exporting {} items at {}x", store.len(), self.scale);
        let board = render_board(ctx, store.items(), board_size, background, self.scale)?;
        let png = encode_png(&board)?;
        let location = self.sink.save(&self.file_name, &png)?;
        log::info!("Exported board ({} bytes) to {location}", png.len());
        Ok(location)
    }
}
