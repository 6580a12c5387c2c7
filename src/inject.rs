//! EXIF provenance injection.
//!
//! Stage 4 of the build pipeline, run after the site is written. Every JPEG
//! under `dist/static/` whose file stem is a painting slug gets descriptive
//! EXIF tags, so a downloaded image still says what it is and who made it:
//!
//! | Tag | Value |
//! |---|---|
//! | Artist | site author |
//! | Copyright | `© {year} {site name}. All rights reserved.` |
//! | ImageDescription | painting title |
//! | Software | site name |
//! | UserComment | `description \| Medium: m on s \| Size: … \| Substrate: … \| Year: y` |
//! | DateTimeOriginal | `{year}:01:01 00:00:00` |
//!
//! Slugs come from the default-language painting list; translated lists are
//! never consulted. Files that match no slug are left alone. A file that
//! fails to update, or a directory that cannot be read, is logged and counted
//! as skipped, and the batch goes on.

use crate::config::SiteConfig;
use crate::imaging::operations::STATIC_DIR;
use crate::imaging::{ExifFields, JpegExifWriter, MetadataWriter};
use crate::process::OutputManifest;
use crate::slug::slug;
use crate::types::Painting;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum InjectError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Outcome of an injection run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InjectReport {
    pub processed: usize,
    pub skipped: usize,
    /// Files that failed, relative to the output directory.
    pub failures: Vec<String>,
}

pub fn inject(
    manifest_path: &Path,
    output_dir: &Path,
    year: i32,
) -> Result<InjectReport, InjectError> {
    let manifest_content = std::fs::read_to_string(manifest_path)?;
    let manifest: OutputManifest = serde_json::from_str(&manifest_content)?;
    inject_with_writer(
        &JpegExifWriter,
        manifest.content.default_paintings(),
        &manifest.content.config,
        output_dir,
        year,
    )
}

/// Inject using a specific writer (allows testing with a failing mock).
pub fn inject_with_writer(
    writer: &impl MetadataWriter,
    paintings: &[Painting],
    config: &SiteConfig,
    output_dir: &Path,
    year: i32,
) -> Result<InjectReport, InjectError> {
    let mut report = InjectReport::default();
    let by_slug = slug_map(paintings);
    let static_dir = output_dir.join(STATIC_DIR);
    if by_slug.is_empty() || !static_dir.is_dir() {
        return Ok(report);
    }

    for entry in WalkDir::new(&static_dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let at = e.path().unwrap_or(&static_dir).to_path_buf();
                tracing::warn!(path = %at.display(), error = %e, "cannot read under static dir");
                report.skipped += 1;
                report.failures.push(relative(&at, output_dir));
                continue;
            }
        };
        let path = entry.path();
        if !entry.file_type().is_file() || !is_jpeg(path) {
            continue;
        }
        let Some(painting) = path
            .file_stem()
            .and_then(|s| s.to_str())
            .and_then(|stem| by_slug.get(stem))
        else {
            continue;
        };

        match writer.write(path, &exif_fields(painting, config, year)) {
            Ok(()) => report.processed += 1,
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "failed to inject metadata");
                report.skipped += 1;
                report.failures.push(relative(path, output_dir));
            }
        }
    }

    Ok(report)
}

/// `slug → painting` for the default-language list. A later duplicate title
/// replaces an earlier one.
pub fn slug_map(paintings: &[Painting]) -> HashMap<String, &Painting> {
    paintings.iter().map(|p| (slug(&p.title), p)).collect()
}

fn relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}

fn is_jpeg(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("jpg") || e.eq_ignore_ascii_case("jpeg"))
}

pub fn exif_fields(painting: &Painting, config: &SiteConfig, year: i32) -> ExifFields {
    let site = &config.site;
    ExifFields {
        artist: Some(site.author.clone()),
        copyright: Some(format!("© {year} {}. All rights reserved.", site.name)),
        image_description: Some(painting.title.clone()),
        software: Some(site.name.clone()),
        user_comment: Some(format_user_comment(painting)),
        date_time_original: Some(format!("{}:01:01 00:00:00", painting.year)),
    }
}

/// Human-readable provenance line stored in UserComment.
pub fn format_user_comment(painting: &Painting) -> String {
    [
        painting.description.clone(),
        format!("Medium: {} on {}", painting.medium, painting.substrate),
        format!("Size: {}", painting.dimensions),
        format!("Substrate: {}", painting.substrate_size),
        format!("Year: {}", painting.year),
    ]
    .join(" | ")
}
