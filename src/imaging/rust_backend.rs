//! Pure Rust image processing backend built on the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG) | `image::ImageReader` |
//! | Resize | `DynamicImage::resize_exact` with `Lanczos3` |
//! | Gallery tile | `DynamicImage::resize_to_fill` + `imageops::unsharpen` |
//! | Encode | `image::codecs::jpeg::JpegEncoder` at the configured quality |

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::{Quality, ResizeParams, ThumbnailParams};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader};
use std::io::BufWriter;
use std::path::Path;

/// Source extensions with decoders compiled in.
pub const SUPPORTED_INPUT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

#[derive(Debug, Default)]
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)
        .map_err(BackendError::Io)?
        .with_guessed_format()
        .map_err(BackendError::Io)?
        .decode()
        .map_err(|source| BackendError::Decode {
            path: path.to_path_buf(),
            source,
        })
}

/// Encode as baseline JPEG. Alpha is dropped since JPEG has no alpha channel.
fn save_jpeg(img: &DynamicImage, path: &Path, quality: Quality) -> Result<(), BackendError> {
    let file = std::fs::File::create(path)?;
    let encoder = JpegEncoder::new_with_quality(BufWriter::new(file), quality.as_u8());
    DynamicImage::ImageRgb8(img.to_rgb8())
        .write_with_encoder(encoder)
        .map_err(BackendError::Encode)
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) =
            image::image_dimensions(path).map_err(|source| BackendError::Decode {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Dimensions { width, height })
    }

    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError> {
        let img = load_image(&params.source)?;
        let resized = img.resize_exact(params.width, params.height, FilterType::Lanczos3);
        save_jpeg(&resized, &params.output, params.quality)
    }

    fn thumbnail(&self, params: &ThumbnailParams) -> Result<(), BackendError> {
        let img = load_image(&params.source)?;
        let filled = img.resize_to_fill(params.size, params.size, FilterType::Lanczos3);

        let tile = match params.sharpening {
            Some(s) => DynamicImage::from(image::imageops::unsharpen(&filled, s.sigma, s.threshold)),
            None => filled,
        };

        save_jpeg(&tile, &params.output, params.quality)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::params::Sharpening;
    use crate::test_helpers::write_jpeg;
    use tempfile::TempDir;

    #[test]
    fn identify_synthetic_jpeg() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("test.jpeg");
        write_jpeg(&path, 200, 150);

        let dims = RustBackend::new().identify(&path).unwrap();
        assert_eq!(dims, Dimensions { width: 200, height: 150 });
    }

    #[test]
    fn identify_nonexistent_file_errors() {
        let result = RustBackend::new().identify(Path::new("/nonexistent/image.jpeg"));
        assert!(result.is_err());
    }

    #[test]
    fn resize_writes_jpeg_at_exact_size() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("source.jpeg");
        let output = tmp.path().join("out.jpg");
        write_jpeg(&source, 200, 100);

        let backend = RustBackend::new();
        backend
            .resize(&ResizeParams {
                source,
                output: output.clone(),
                width: 100,
                height: 50,
                quality: Quality::new(80),
            })
            .unwrap();

        let bytes = std::fs::read(&output).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
        assert_eq!(
            backend.identify(&output).unwrap(),
            Dimensions { width: 100, height: 50 }
        );
    }

    #[test]
    fn thumbnail_is_square() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("source.jpeg");
        let output = tmp.path().join("thumb.jpg");
        write_jpeg(&source, 120, 80);

        let backend = RustBackend::new();
        backend
            .thumbnail(&ThumbnailParams {
                source,
                output: output.clone(),
                size: 40,
                quality: Quality::default(),
                sharpening: Some(Sharpening::light()),
            })
            .unwrap();

        assert_eq!(
            backend.identify(&output).unwrap(),
            Dimensions { width: 40, height: 40 }
        );
    }

    #[test]
    fn png_source_is_accepted() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("source.png");
        let output = tmp.path().join("out.jpg");
        image::RgbaImage::from_pixel(30, 20, image::Rgba([10, 20, 30, 128]))
            .save(&source)
            .unwrap();

        RustBackend::new()
            .resize(&ResizeParams {
                source,
                output: output.clone(),
                width: 15,
                height: 10,
                quality: Quality::default(),
            })
            .unwrap();
        assert!(output.exists());
    }

    #[test]
    fn corrupt_source_errors() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("broken.jpeg");
        std::fs::write(&source, b"not an image").unwrap();

        let result = RustBackend::new().resize(&ResizeParams {
            source,
            output: tmp.path().join("out.jpg"),
            width: 10,
            height: 10,
            quality: Quality::default(),
        });
        assert!(matches!(result, Err(BackendError::Decode { .. })));
    }
}
