//! Language handling, cross-language painting identity, and route building.
//!
//! ## Positional alignment
//!
//! Every language has its own ordered painting list. The Nth entry of each
//! list describes the same physical painting, so a translated entry takes its
//! identity from the default-language entry at the same index:
//!
//! ```text
//! paintings/en.yaml   [0] "Night Hours"   → id night-hours
//! paintings/zh.yaml   [0] "夜晚时光"        → id night-hours   (from en[0])
//! ```
//!
//! This keeps a painting's URL and image asset identical across languages.
//! When the default-language list is shorter, the trailing entries fall back
//! to their own title. Lists that drift out of order are not detectable here:
//! the wrong pairing is produced silently, so content authors must keep the
//! files aligned.
//!
//! ## Routes
//!
//! The default language is served unprefixed; every other language lives
//! under `/{lang}`:
//!
//! ```text
//! en  /painting/night-hours      →  painting/night-hours/index.html
//! zh  /zh/painting/night-hours   →  zh/painting/night-hours/index.html
//! ```

use crate::config::I18nConfig;
use crate::slug::{image_filename, slug};
use crate::types::{EnrichedPainting, Painting};

/// Ordered set of supported languages plus the default one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageSet {
    languages: Vec<String>,
    default: String,
}

impl LanguageSet {
    pub fn new(languages: Vec<String>, default: impl Into<String>) -> Self {
        Self {
            languages,
            default: default.into(),
        }
    }

    pub fn from_config(config: &I18nConfig) -> Self {
        Self::new(config.languages.clone(), config.default_language.clone())
    }

    pub fn all(&self) -> &[String] {
        &self.languages
    }

    pub fn default_language(&self) -> &str {
        &self.default
    }

    pub fn is_default(&self, lang: &str) -> bool {
        lang == self.default
    }

    /// Route of `original_path` (always starting with `/`) in `lang`.
    pub fn localized_path(&self, lang: &str, original_path: &str) -> String {
        if self.is_default(lang) {
            original_path.to_string()
        } else {
            format!("/{lang}{original_path}")
        }
    }
}

/// Derived, language-independent identity of a painting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageKey {
    pub id: String,
    pub image: String,
}

/// Resolve the identity of the entry at `index` in some language's list.
///
/// Uses the default-language entry at the same index, or `entry` itself when
/// the default list has no counterpart there.
pub fn resolve_key(default_list: &[Painting], entry: &Painting, index: usize) -> PageKey {
    let source = default_list.get(index).unwrap_or(entry);
    PageKey {
        id: slug(&source.title),
        image: image_filename(&source.title),
    }
}

/// Attach derived `id` / `image` to every entry of a language's list.
///
/// Order is preserved; pass the default list as both arguments to enrich the
/// default language itself.
pub fn enrich(default_list: &[Painting], list: &[Painting]) -> Vec<EnrichedPainting> {
    list.iter()
        .enumerate()
        .map(|(index, painting)| {
            let PageKey { id, image } = resolve_key(default_list, painting, index);
            EnrichedPainting {
                painting: painting.clone(),
                id,
                image,
            }
        })
        .collect()
}

/// Original (unprefixed) route of a painting page.
pub fn painting_path(id: &str) -> String {
    format!("/painting/{id}")
}

/// Output file, relative to the site root, that serves `route`.
///
/// - `/` → `index.html`
/// - `/zh/` or `/zh` → `zh/index.html`
/// - `/404.html` → `404.html`
pub fn output_file(route: &str) -> String {
    let trimmed = route.trim_matches('/');
    if trimmed.is_empty() {
        "index.html".to_string()
    } else if trimmed.ends_with(".html") {
        trimmed.to_string()
    } else {
        format!("{trimmed}/index.html")
    }
}

/// Open Graph locale for a language code.
pub fn og_locale(lang: &str) -> &'static str {
    match lang {
        "zh" => "zh_CN",
        _ => "en_US",
    }
}
