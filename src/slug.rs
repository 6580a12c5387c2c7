//! Title → slug and title → image filename derivation.
//!
//! A painting's URL segment and its image asset name are both derived from
//! its title, never stored in content files:
//!
//! - `"Night Hours"` → slug `night-hours` → image `night-hours.jpeg`
//! - `"Nature Study III"` → slug `nature-study-iii`
//!
//! The transform is deliberately minimal: lowercase, then every single space
//! becomes a dash. Nothing is collapsed, stripped, or transliterated, so
//! `"A  B"` becomes `a--b` and `"Été"` becomes `été`. Changing this would
//! move every published painting URL.

/// Extension given to every derived image filename.
pub const IMAGE_EXTENSION: &str = "jpeg";

/// Derive the URL slug for a title.
pub fn slug(title: &str) -> String {
    title.to_lowercase().split(' ').collect::<Vec<_>>().join("-")
}

/// Derive the canonical source image filename for a title.
pub fn image_filename(title: &str) -> String {
    format!("{}.{}", slug(title), IMAGE_EXTENSION)
}

/// Strip the final extension from a filename: `night-hours.jpeg` → `night-hours`.
///
/// Names without an extension (or dotfiles like `.hidden`) are returned unchanged.
pub fn image_stem(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(0) | None => filename,
        Some(pos) => &filename[..pos],
    }
}
