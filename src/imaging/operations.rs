//! High-level image operations.
//!
//! These combine the pure calculations with backend execution and decide
//! where outputs live. Every path returned is relative to the processed root
//! (and later to the site root), using `/` separators:
//!
//! ```text
//! static/400/night-hours.jpg
//! static/800/night-hours.jpg
//! static/thumb/night-hours.jpg
//! ```

use super::backend::{BackendError, ImageBackend};
use super::calculations::{ResponsiveSize, calculate_responsive_sizes};
use super::params::{Quality, ResizeParams, Sharpening, ThumbnailParams};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub type Result<T> = std::result::Result<T, BackendError>;

/// Directory (relative to the processed root) holding every image output.
pub const STATIC_DIR: &str = "static";
/// Subdirectory of [`STATIC_DIR`] holding gallery tiles.
pub const THUMB_DIR: &str = "thumb";
/// Extension of every generated image.
pub const OUTPUT_EXTENSION: &str = "jpg";

pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<(u32, u32)> {
    let dims = backend.identify(path)?;
    Ok((dims.width, dims.height))
}

/// One generated size of a painting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedVariant {
    pub target: u32,
    pub path: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone)]
pub struct ResponsiveConfig {
    pub sizes: Vec<u32>,
    pub quality: Quality,
}

/// Relative output path of `stem` inside `static/<dir>/`.
pub fn variant_path(dir: &str, stem: &str) -> String {
    format!("{STATIC_DIR}/{dir}/{stem}.{OUTPUT_EXTENSION}")
}

/// Create the responsive JPEG set for one source image.
///
/// Sizes larger than the original are skipped.
pub fn create_responsive_images(
    backend: &impl ImageBackend,
    source: &Path,
    processed_root: &Path,
    stem: &str,
    original_dims: (u32, u32),
    config: &ResponsiveConfig,
) -> Result<Vec<GeneratedVariant>> {
    let mut variants = Vec::new();

    for ResponsiveSize {
        target,
        width,
        height,
    } in calculate_responsive_sizes(original_dims, &config.sizes)
    {
        let path = variant_path(&target.to_string(), stem);
        let output = processed_root.join(&path);
        ensure_parent(&output)?;

        backend.resize(&ResizeParams {
            source: source.to_path_buf(),
            output,
            width,
            height,
            quality: config.quality,
        })?;

        variants.push(GeneratedVariant {
            target,
            path,
            width,
            height,
        });
    }

    Ok(variants)
}

#[derive(Debug, Clone)]
pub struct ThumbnailConfig {
    pub size: u32,
    pub quality: Quality,
    pub sharpening: Option<Sharpening>,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            size: 450,
            quality: Quality::default(),
            sharpening: Some(Sharpening::light()),
        }
    }
}

pub fn plan_thumbnail(source: &Path, output: &Path, config: &ThumbnailConfig) -> ThumbnailParams {
    ThumbnailParams {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        size: config.size,
        quality: config.quality,
        sharpening: config.sharpening,
    }
}

/// Create the square gallery tile for one source image.
pub fn create_thumbnail(
    backend: &impl ImageBackend,
    source: &Path,
    processed_root: &Path,
    stem: &str,
    config: &ThumbnailConfig,
) -> Result<String> {
    let path = variant_path(THUMB_DIR, stem);
    let output = processed_root.join(&path);
    ensure_parent(&output)?;

    backend.thumbnail(&plan_thumbnail(source, &output, config))?;
    Ok(path)
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}
