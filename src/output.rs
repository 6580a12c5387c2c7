//! CLI output formatting for all pipeline stages.
//!
//! Output is a content inventory first and a file listing second. Every
//! painting leads with its positional index and title; the slug, source
//! image, or output file follow as context.
//!
//! ## Scan
//!
//! ```text
//! Languages
//!     en (default)
//!     zh
//!
//! Paintings [en]
//! 001 Night Hours → night-hours
//!     Image: images/night-hours.jpeg
//! 002 Symbiosis → symbiosis
//!     Image: images/symbiosis.jpeg (missing)
//!
//! Paintings [zh]
//! 001 夜晚时光 → night-hours
//! 002 共生 → symbiosis
//!
//! Content
//!     config.toml
//!     site/en.yaml
//!     about/en.md
//! ```
//!
//! ## Process
//!
//! ```text
//! 3 paintings
//!     001 Night Hours
//!         Source: images/night-hours.jpeg
//!         400px, 800px, thumbnail
//!     002 Symbiosis
//!         Missing: images/symbiosis.jpeg
//! ```
//!
//! ## Generate
//!
//! ```text
//! [en]
//!     Gallery → index.html
//!     001 Symbiosis → painting/symbiosis/index.html
//!     About → about/index.html
//!     Not found → 404.html
//! Generated 12 pages in 2 languages (6 painting pages)
//! ```
//!
//! Each stage has a `format_*` function returning lines, and a `print_*`
//! wrapper that writes them to stdout.

use crate::inject::InjectReport;
use crate::locale;
use crate::pages::{PageKind, PagePlan};
use crate::process::{ICON_FILE, IMAGES_DIR, ProcessEvent, find_source};
use crate::scan::{Manifest, misaligned_languages};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((byte, _)) => format!("{}...", &text[..byte]),
        None => text.to_string(),
    }
}

/// Index, title, and an optional `→ target`.
fn entity_line(index: usize, title: &str, target: Option<&str>) -> String {
    match target {
        Some(t) => format!("{} {} \u{2192} {}", format_index(index), title, t),
        None => format!("{} {}", format_index(index), title),
    }
}

// ============================================================================
// Stage 1: Scan output
// ============================================================================

pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let langs = manifest.languages();
    let mut lines = vec!["Languages".to_string()];
    for lang in langs.all() {
        if langs.is_default(lang) {
            lines.push(format!("{}{} (default)", indent(1), lang));
        } else {
            lines.push(format!("{}{}", indent(1), lang));
        }
    }

    let images_dir = source_root.join(IMAGES_DIR);
    for lang in langs.all() {
        let paintings = locale::enrich(
            manifest.default_paintings(),
            &manifest.locale(lang).paintings,
        );
        lines.push(String::new());
        lines.push(format!("Paintings [{lang}]"));
        if paintings.is_empty() {
            lines.push(format!("{}(none)", indent(1)));
            continue;
        }
        for (i, p) in paintings.iter().enumerate() {
            lines.push(entity_line(i + 1, &p.painting.title, Some(&p.id)));
            if !p.painting.description.is_empty() {
                lines.push(format!(
                    "{}{}",
                    indent(1),
                    truncate_desc(p.painting.description.trim(), 60)
                ));
            }
            // Images are shared, so only the default language lists them
            if langs.is_default(lang) {
                let line = match find_source(&images_dir, &p.image) {
                    Some(found) => format!(
                        "Image: {IMAGES_DIR}/{}",
                        found.file_name().unwrap_or_default().to_string_lossy()
                    ),
                    None => format!("Image: {IMAGES_DIR}/{} (missing)", p.image),
                };
                lines.push(format!("{}{}", indent(1), line));
            }
        }
    }

    lines.push(String::new());
    lines.push("Content".to_string());
    let mut sources = vec!["config.toml".to_string(), ICON_FILE.to_string()];
    for lang in langs.all() {
        sources.push(format!("site/{lang}.yaml"));
        sources.push(format!("about/{lang}.md"));
        sources.push(format!("locales/{lang}.json"));
    }
    for rel in sources {
        if source_root.join(&rel).is_file() {
            lines.push(format!("{}{}", indent(1), rel));
        }
    }

    let drift = misaligned_languages(manifest);
    if !drift.is_empty() {
        lines.push(String::new());
        for (lang, count, expected) in drift {
            lines.push(format!(
                "Warning: [{lang}] has {count} paintings, [{}] has {expected}; entries are matched by position",
                langs.default_language()
            ));
        }
    }

    lines
}

pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 2: Process output
// ============================================================================

/// Format a single process progress event as display lines.
pub fn format_process_event(event: &ProcessEvent) -> Vec<String> {
    match event {
        ProcessEvent::Started { painting_count } => {
            let noun = if *painting_count == 1 { "painting" } else { "paintings" };
            vec![format!("{painting_count} {noun}")]
        }
        ProcessEvent::ImageProcessed {
            index,
            title,
            source,
            variants,
        } => vec![
            format!("{}{}", indent(1), entity_line(*index, title, None)),
            format!("{}Source: {}", indent(2), source),
            format!("{}{}", indent(2), variants.join(", ")),
        ],
        ProcessEvent::ImageMissing {
            index,
            title,
            expected,
        } => vec![
            format!("{}{}", indent(1), entity_line(*index, title, None)),
            format!("{}Missing: {}", indent(2), expected),
        ],
    }
}

// ============================================================================
// Stage 3: Generate output
// ============================================================================

pub fn format_generate_output(pages: &[PagePlan]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut languages = 0;
    let mut painting_pages = 0;
    let mut current_lang: Option<&str> = None;

    for page in pages {
        if current_lang != Some(page.lang.as_str()) {
            current_lang = Some(&page.lang);
            languages += 1;
            lines.push(format!("[{}]", page.lang));
        }
        let file = page.output_file();
        let line = match &page.kind {
            PageKind::Index { .. } => format!("Gallery \u{2192} {file}"),
            PageKind::About { .. } => format!("About \u{2192} {file}"),
            PageKind::NotFound => format!("Not found \u{2192} {file}"),
            PageKind::Painting(p) => {
                painting_pages += 1;
                entity_line(p.position, &p.painting.painting.title, Some(&file))
            }
        };
        lines.push(format!("{}{}", indent(1), line));
    }

    lines.push(format!(
        "Generated {} pages in {} languages ({} painting pages)",
        pages.len(),
        languages,
        painting_pages
    ));
    lines
}

pub fn print_generate_output(pages: &[PagePlan]) {
    for line in format_generate_output(pages) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 4: Inject output
// ============================================================================

pub fn format_inject_output(report: &InjectReport) -> Vec<String> {
    let mut lines: Vec<String> = report
        .failures
        .iter()
        .map(|f| format!("Skipped: {f}"))
        .collect();
    lines.push(format!(
        "Injected metadata into {} images ({} skipped)",
        report.processed, report.skipped
    ));
    lines
}

pub fn print_inject_output(report: &InjectReport) {
    for line in format_inject_output(report) {
        println!("{}", line);
    }
}
