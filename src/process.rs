//! Image processing and responsive image generation.
//!
//! Stage 2 of the build pipeline. Takes the manifest from the scan stage and
//! turns each default-language painting's source image into a responsive JPEG
//! set plus a square gallery tile.
//!
//! ## Source lookup
//!
//! A painting's source is `content/images/<slug>.jpeg`. When that file does
//! not exist, `<slug>.jpg` and `<slug>.png` are tried. A painting without a
//! source image is not an error: a warning is logged and the painting renders
//! without a picture.
//!
//! ## Output Structure
//!
//! ```text
//! processed/
//! ├── manifest.json              # scan manifest + generated image paths
//! ├── icon.png                   # copied from content/ when present
//! └── static/
//!     ├── 400/night-hours.jpg    # one directory per configured size
//!     ├── 800/night-hours.jpg
//!     ├── 1600/night-hours.jpg
//!     └── thumb/night-hours.jpg  # square, centre-cropped
//! ```
//!
//! Sizes larger than the source are skipped. Paintings are processed in
//! parallel on the global rayon pool; progress is reported through an optional
//! channel so the CLI can print while workers run.

use crate::imaging::rust_backend::SUPPORTED_INPUT_EXTENSIONS;
use crate::imaging::{
    BackendError, GeneratedVariant, ImageBackend, Quality, ResponsiveConfig, RustBackend,
    Sharpening, ThumbnailConfig, create_responsive_images, create_thumbnail, get_dimensions,
};
use crate::locale::enrich;
use crate::scan::Manifest;
use crate::slug::image_stem;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Image processing failed for {path}: {source}")]
    Imaging {
        path: PathBuf,
        source: BackendError,
    },
}

/// Directory under `content/` holding source images.
pub const IMAGES_DIR: &str = "images";
/// Optional site icon at the content root, copied through as the social
/// preview image of pages without a painting.
pub const ICON_FILE: &str = "icon.png";

/// Output manifest (after processing)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputManifest {
    #[serde(flatten)]
    pub content: Manifest,
    /// Processed images keyed by painting slug.
    pub images: BTreeMap<String, ProcessedImage>,
    /// Site icon relative to the processed root, if the content has one.
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedImage {
    /// Source path relative to the content root.
    pub source: String,
    /// Original dimensions (width, height)
    pub dimensions: (u32, u32),
    /// Responsive variants, smallest first.
    pub variants: Vec<GeneratedVariant>,
    /// Square gallery tile.
    pub thumbnail: String,
}

impl ProcessedImage {
    /// The largest variant, used for Open Graph images and full views.
    pub fn largest(&self) -> Option<&GeneratedVariant> {
        self.variants.last()
    }
}

/// Progress reported while processing.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessEvent {
    Started {
        painting_count: usize,
    },
    ImageProcessed {
        /// 1-based position in the default-language list.
        index: usize,
        title: String,
        source: String,
        variants: Vec<String>,
    },
    ImageMissing {
        index: usize,
        title: String,
        expected: String,
    },
}

pub fn process(
    manifest_path: &Path,
    source_root: &Path,
    output_dir: &Path,
    progress: Option<Sender<ProcessEvent>>,
) -> Result<OutputManifest, ProcessError> {
    let backend = RustBackend::new();
    process_with_backend(&backend, manifest_path, source_root, output_dir, progress)
}

/// Process images using a specific backend (allows testing with mock).
pub fn process_with_backend(
    backend: &impl ImageBackend,
    manifest_path: &Path,
    source_root: &Path,
    output_dir: &Path,
    progress: Option<Sender<ProcessEvent>>,
) -> Result<OutputManifest, ProcessError> {
    let manifest_content = std::fs::read_to_string(manifest_path)?;
    let content: Manifest = serde_json::from_str(&manifest_content)?;

    std::fs::create_dir_all(output_dir)?;

    let config = &content.config;
    let quality = Quality::new(config.images.quality);
    let responsive_config = ResponsiveConfig {
        sizes: config.images.sizes.clone(),
        quality,
    };
    let thumbnail_config = ThumbnailConfig {
        size: config.thumbnails.size,
        quality,
        sharpening: Some(Sharpening::light()),
    };

    // Every language shares the default language's assets; duplicate titles
    // collapse to the first entry.
    let defaults = content.default_paintings();
    let mut seen = HashSet::new();
    let jobs: Vec<(usize, _)> = enrich(defaults, defaults)
        .into_iter()
        .enumerate()
        .filter(|(_, p)| seen.insert(p.id.clone()))
        .collect();

    emit(
        &progress,
        ProcessEvent::Started {
            painting_count: jobs.len(),
        },
    );

    let images_dir = source_root.join(IMAGES_DIR);
    let results: Vec<Option<(String, ProcessedImage)>> = jobs
        .par_iter()
        .map(|(i, painting)| {
            let index = i + 1;
            let Some(source_path) = find_source(&images_dir, &painting.image) else {
                let expected = format!("{IMAGES_DIR}/{}", painting.image);
                tracing::warn!(
                    painting = %painting.painting.title,
                    expected = %expected,
                    "source image not found; painting will render without a picture"
                );
                emit(
                    &progress,
                    ProcessEvent::ImageMissing {
                        index,
                        title: painting.painting.title.clone(),
                        expected,
                    },
                );
                return Ok(None);
            };

            let with_path = |source: BackendError| ProcessError::Imaging {
                path: source_path.clone(),
                source,
            };

            let dimensions = get_dimensions(backend, &source_path).map_err(with_path)?;
            let variants = create_responsive_images(
                backend,
                &source_path,
                output_dir,
                &painting.id,
                dimensions,
                &responsive_config,
            )
            .map_err(with_path)?;
            let thumbnail = create_thumbnail(
                backend,
                &source_path,
                output_dir,
                &painting.id,
                &thumbnail_config,
            )
            .map_err(with_path)?;

            let source = relative_source(&source_path);
            emit(
                &progress,
                ProcessEvent::ImageProcessed {
                    index,
                    title: painting.painting.title.clone(),
                    source: source.clone(),
                    variants: variants
                        .iter()
                        .map(|v| format!("{}px", v.target))
                        .chain(std::iter::once("thumbnail".to_string()))
                        .collect(),
                },
            );

            Ok(Some((
                painting.id.clone(),
                ProcessedImage {
                    source,
                    dimensions,
                    variants,
                    thumbnail,
                },
            )))
        })
        .collect::<Result<_, ProcessError>>()?;

    Ok(OutputManifest {
        content,
        images: results.into_iter().flatten().collect(),
        icon: copy_icon(source_root, output_dir)?,
    })
}

fn copy_icon(source_root: &Path, output_dir: &Path) -> Result<Option<String>, ProcessError> {
    let icon = source_root.join(ICON_FILE);
    if !icon.is_file() {
        return Ok(None);
    }
    std::fs::copy(&icon, output_dir.join(ICON_FILE))?;
    Ok(Some(ICON_FILE.to_string()))
}

fn emit(progress: &Option<Sender<ProcessEvent>>, event: ProcessEvent) {
    if let Some(tx) = progress {
        // The receiver only prints; a closed channel is not worth failing over
        let _ = tx.send(event);
    }
}

/// Locate the source for `filename`, trying other supported extensions.
pub fn find_source(images_dir: &Path, filename: &str) -> Option<PathBuf> {
    let exact = images_dir.join(filename);
    if exact.is_file() {
        return Some(exact);
    }
    let stem = image_stem(filename);
    SUPPORTED_INPUT_EXTENSIONS
        .iter()
        .map(|ext| images_dir.join(format!("{stem}.{ext}")))
        .find(|p| p.is_file())
}

/// `images/<file>` for display and the manifest.
fn relative_source(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{IMAGES_DIR}/{name}")
}
