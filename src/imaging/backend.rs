//! The pixel-work seam.
//!
//! [`ImageBackend`] is everything the pipeline asks of an image library:
//! read a size, write a resized JPEG, write a square tile. The real
//! implementation is [`RustBackend`](super::rust_backend::RustBackend);
//! stage tests swap in [`MockBackend`](tests::MockBackend), which only
//! records what it was asked to do.

use super::params::{ResizeParams, ThumbnailParams};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cannot decode {path}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("JPEG encoding failed: {0}")]
    Encode(image::ImageError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Shared across the rayon pool, hence `Sync`.
pub trait ImageBackend: Sync {
    /// Pixel size of `path`, read from the header where the format allows.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Scale to exactly `width`×`height` and write a JPEG.
    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError>;

    /// Fill a `size`×`size` square, crop the overflow evenly, write a JPEG.
    fn thumbnail(&self, params: &ThumbnailParams) -> Result<(), BackendError>;
}
