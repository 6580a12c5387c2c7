//! Image processing and metadata, pure Rust.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **Resize → JPEG** | Lanczos3 + `JpegEncoder` |
//! | **Gallery tile** | `resize_to_fill` + `unsharpen` |
//! | **EXIF** | custom APP1 writer ([`exif`]) |
//!
//! The module is split into:
//! - **Calculations**: pure dimension math
//! - **Parameters**: data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: config + calculations + backend, and output paths
//! - **Exif**: [`MetadataWriter`] trait + [`JpegExifWriter`]

pub mod backend;
mod calculations;
pub mod exif;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use exif::{ExifError, ExifFields, JpegExifWriter, MetadataWriter};
pub use operations::{
    GeneratedVariant, ResponsiveConfig, ThumbnailConfig, create_responsive_images,
    create_thumbnail, get_dimensions,
};
pub use params::{Quality, ResizeParams, Sharpening, ThumbnailParams};
pub use rust_backend::RustBackend;
