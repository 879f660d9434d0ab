use std::future::Future;

use egui::ColorImage;
use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded};

use crate::element::ImageSource;
use crate::error::{BoardError, BoardResult};

pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];

/// Result of one photo pick or drop.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(ImageSource),
    Failed(BoardError),
    /// The user closed the picker without choosing a file.
    Cancelled,
}

/// Picks and decodes photos off the UI thread.
///
/// Each pick runs as its own task and reports back through a channel that the
/// app drains once per frame.
pub struct PhotoLoader {
    sender: UnboundedSender<LoadOutcome>,
    receiver: UnboundedReceiver<LoadOutcome>,
    pending: usize,
}

impl Default for PhotoLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl PhotoLoader {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self {
            sender,
            receiver,
            pending: 0,
        }
    }

    /// Number of picks or decodes that have not reported back yet.
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Open the file picker and decode whatever the user chooses.
    pub fn pick(&mut self, ctx: &egui::Context) {
        let dialog = rfd::AsyncFileDialog::new()
            .set_title("Add Photos")
            .add_filter("Image", IMAGE_EXTENSIONS)
            .pick_file();

        let sender = self.sender.clone();
        let ctx = ctx.clone();
        self.pending += 1;

        execute(async move {
            let outcome = match dialog.await {
                Some(file) => {
                    let name = file.file_name();
                    let bytes = file.read().await;
                    decode_source(&name, &bytes)
                }
                None => LoadOutcome::Cancelled,
            };
            send(&sender, outcome);
            ctx.request_repaint();
        });
    }

    /// Queue decodes for any files dropped onto the window this frame.
    pub fn load_dropped(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        for file in dropped {
            let name = dropped_file_name(&file);
            if !is_image_file(&file) {
                log::warn!("Dropped file is not a supported image: {name}");
                continue;
            }

            let sender = self.sender.clone();
            let ctx = ctx.clone();
            self.pending += 1;

            execute(async move {
                let outcome = match read_dropped(&file, &name) {
                    Ok(bytes) => decode_source(&name, &bytes),
                    Err(err) => LoadOutcome::Failed(err),
                };
                send(&sender, outcome);
                ctx.request_repaint();
            });
        }
    }

    /// Everything that finished since the last call.
    pub fn drain(&mut self) -> Vec<LoadOutcome> {
        let mut finished = Vec::new();
        while let Ok(Some(outcome)) = self.receiver.try_next() {
            self.pending = self.pending.saturating_sub(1);
            finished.push(outcome);
        }
        finished
    }
}

/// Decode encoded image bytes into an RGBA bitmap.
pub fn decode_image(name: &str, bytes: &[u8]) -> BoardResult<ColorImage> {
    let image = image::load_from_memory(bytes).map_err(|source| BoardError::Decode {
        name: name.to_owned(),
        source,
    })?;
    let size = [image.width() as usize, image.height() as usize];
    let rgba = image.to_rgba8();
    log::debug!("Decoded {name}: {}x{}", size[0], size[1]);
    Ok(ColorImage::from_rgba_unmultiplied(size, rgba.as_flat_samples().as_slice()))
}

/// True if the file name carries one of the supported image extensions.
pub fn has_image_extension(name: &str) -> bool {
    std::path::Path::new(name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

fn decode_source(name: &str, bytes: &[u8]) -> LoadOutcome {
    match decode_image(name, bytes) {
        Ok(pixels) => LoadOutcome::Loaded(ImageSource::upload(name, pixels)),
        Err(err) => LoadOutcome::Failed(err),
    }
}

fn send(sender: &UnboundedSender<LoadOutcome>, outcome: LoadOutcome) {
    if let Err(err) = sender.unbounded_send(outcome) {
        log::error!("Photo loader channel closed: {err}");
    }
}

fn dropped_file_name(file: &egui::DroppedFile) -> String {
    if let Some(path) = &file.path {
        path.display().to_string()
    } else if !file.name.is_empty() {
        file.name.clone()
    } else {
        "unknown".to_owned()
    }
}

fn is_image_file(file: &egui::DroppedFile) -> bool {
    if !file.mime.is_empty() {
        file.mime.starts_with("image/")
    } else if let Some(path) = &file.path {
        has_image_extension(&path.to_string_lossy())
    } else {
        has_image_extension(&file.name)
    }
}

fn read_dropped(file: &egui::DroppedFile, name: &str) -> BoardResult<Vec<u8>> {
    if let Some(bytes) = &file.bytes {
        return Ok(bytes.to_vec());
    }

    // Browsers only ever hand over bytes
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Some(path) = &file.path {
            return std::fs::read(path).map_err(|source| BoardError::Io {
                path: name.to_owned(),
                source,
            });
        }
    }

    Err(BoardError::Io {
        path: name.to_owned(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "dropped file has no data"),
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn execute<F: Future<Output = ()> + Send + 'static>(f: F) {
    std::thread::spawn(move || futures::executor::block_on(f));
}

#[cfg(target_arch = "wasm32")]
fn execute<F: Future<Output = ()> + 'static>(f: F) {
    wasm_bindgen_futures::spawn_local(f);
}
