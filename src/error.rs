use thiserror::Error;

use crate::element::ItemId;

/// Errors produced by board operations.
///
/// Most of these are absorbed by the app and routed through the configured
/// [`FailurePolicy`](crate::config::FailurePolicy) instead of being shown as
/// a hard error state.
#[derive(Error, Debug)]
pub enum BoardError {
    #[error("no item with id {0}")]
    UnknownItem(ItemId),

    #[error("failed to decode image '{name}': {source}")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },

    #[error("i/o error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("export failed: {0}")]
    Export(String),
}

pub type BoardResult<T> = Result<T, BoardError>;
