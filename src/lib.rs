//! # Paintfolio
//!
//! A static site generator for bilingual painting portfolios. Paintings are
//! authored as one YAML list per language; the default-language titles decide
//! every slug and image filename, and each language gets its own copy of
//! every page under its own route prefix.
//!
//! # Architecture: Four-Stage Pipeline
//!
//! ```text
//! 1. Scan      content/  →  manifest.json    (YAML, markdown, config → structured data)
//! 2. Process   manifest  →  processed/       (responsive JPEGs + square thumbnails)
//! 3. Generate  manifest  →  dist/            (HTML for every page in every language)
//! 4. Inject    dist/     →  dist/            (EXIF provenance in every painting JPEG)
//! ```
//!
//! Each stage reads the previous stage's JSON manifest, so any stage can be
//! re-run on its own and every intermediate result can be inspected.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: loads config and per-language content into the manifest |
//! | [`process`] | Stage 2: resizes source images into variants and thumbnails |
//! | [`generate`] | Stage 3: renders every planned page with Maud |
//! | [`inject`] | Stage 4: writes EXIF tags into the output JPEGs |
//! | [`pages`] | Per-language page fan-out: which pages exist and at which route |
//! | [`locale`] | Language set, route prefixing, positional painting identity |
//! | [`slug`] | Title → URL slug and image filename |
//! | [`i18n`] | UI string catalogs with per-site overrides |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`types`] | Content types shared between stages |
//! | [`imaging`] | Pure-Rust resize/thumbnail and the EXIF codec |
//! | [`output`] | CLI output formatting for every stage |
//!
//! # Identity Across Languages
//!
//! A translated entry is identified by its position: the N-th entry of
//! `paintings/zh.yaml` takes its slug from the N-th entry of
//! `paintings/en.yaml`. Only when the default list is shorter does an entry
//! fall back to slugging its own title. See [`locale::resolve_key`].
//!
//! # No JavaScript
//!
//! The generated site ships no scripts. The mobile menu is a checkbox toggle
//! styled with CSS, and the language switcher is a set of plain links to the
//! same page in each language.

pub mod config;
pub mod generate;
pub mod i18n;
pub mod imaging;
pub mod inject;
pub mod locale;
pub mod output;
pub mod pages;
pub mod process;
pub mod scan;
pub mod slug;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
