//! Content loading and manifest generation.
//!
//! Stage 1 of the build pipeline. Reads the site config and every configured
//! language's content files into a [`Manifest`] that subsequent stages consume.
//!
//! ## Directory Structure
//!
//! ```text
//! content/
//! ├── config.toml                  # Site configuration (optional)
//! ├── site/
//! │   ├── en.yaml                  # site: { tagline, description }
//! │   └── zh.yaml
//! ├── paintings/
//! │   ├── en.yaml                  # paintings: [ ...ordered entries... ]
//! │   └── zh.yaml                  # same order, translated text
//! ├── about/
//! │   ├── en.md
//! │   └── zh.md
//! ├── locales/
//! │   └── zh.json                  # UI string overrides (optional)
//! └── images/
//!     ├── night-hours.jpeg         # named by the title slug
//!     └── symbiosis.jpeg
//! ```
//!
//! ## Missing content
//!
//! Missing files are not errors. A language without a painting list simply
//! has no paintings; site text and about pages fall back to the default
//! language at render time. Files that exist but fail to parse are fatal.
//!
//! ## Alignment check
//!
//! When a language's painting count differs from the default language's, a
//! warning is logged: entries past the end of the default list fall back to
//! their own title for their slug, which usually means the files drifted.

use crate::config::{self, SiteConfig};
use crate::i18n::Strings;
use crate::locale::LanguageSet;
use crate::types::{Painting, SiteText};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Manifest output from the scan stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub config: SiteConfig,
    /// Content per configured language, keyed by language code.
    pub locales: BTreeMap<String, LocaleContent>,
}

/// Everything authored for one language.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocaleContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<SiteText>,
    #[serde(default)]
    pub paintings: Vec<Painting>,
    /// Raw markdown of the about page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    /// Site-supplied UI string overrides.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub strings: Strings,
}

impl Manifest {
    pub fn languages(&self) -> LanguageSet {
        LanguageSet::from_config(&self.config.i18n)
    }

    /// Content for `lang`, or an empty set if nothing was authored.
    pub fn locale(&self, lang: &str) -> &LocaleContent {
        static EMPTY: LocaleContent = LocaleContent {
            site: None,
            paintings: Vec::new(),
            about: None,
            strings: BTreeMap::new(),
        };
        self.locales.get(lang).unwrap_or(&EMPTY)
    }

    /// The default language's painting list, the source of every slug.
    pub fn default_paintings(&self) -> &[Painting] {
        &self.locale(&self.config.i18n.default_language).paintings
    }

    /// UI string overrides for every language, keyed by language.
    pub fn string_overrides(&self) -> BTreeMap<String, Strings> {
        self.locales
            .iter()
            .filter(|(_, content)| !content.strings.is_empty())
            .map(|(lang, content)| (lang.clone(), content.strings.clone()))
            .collect()
    }
}

/// Top-level shape of `paintings/<lang>.yaml`.
#[derive(Deserialize)]
struct PaintingsFile {
    #[serde(default)]
    paintings: Option<Vec<Painting>>,
}

/// Top-level shape of `site/<lang>.yaml`.
#[derive(Deserialize)]
struct SiteFile {
    #[serde(default)]
    site: Option<SiteText>,
}

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    let config = config::load_config(root)?;
    let mut locales = BTreeMap::new();

    for lang in &config.i18n.languages {
        let content = LocaleContent {
            site: read_yaml::<SiteFile>(&root.join("site").join(format!("{lang}.yaml")))?
                .and_then(|f| f.site),
            paintings: read_yaml::<PaintingsFile>(
                &root.join("paintings").join(format!("{lang}.yaml")),
            )?
            .and_then(|f| f.paintings)
            .unwrap_or_default(),
            about: read_text(&root.join("about").join(format!("{lang}.md")))?,
            strings: read_strings(&root.join("locales").join(format!("{lang}.json")))?,
        };
        locales.insert(lang.clone(), content);
    }

    let manifest = Manifest { config, locales };
    warn_on_drift(&manifest);
    Ok(manifest)
}

/// Per-language painting counts that differ from the default language's.
pub fn misaligned_languages(manifest: &Manifest) -> Vec<(String, usize, usize)> {
    let langs = manifest.languages();
    let expected = manifest.default_paintings().len();
    langs
        .all()
        .iter()
        .filter(|lang| !langs.is_default(lang))
        .filter_map(|lang| {
            let count = manifest.locale(lang).paintings.len();
            (count != 0 && count != expected).then(|| (lang.clone(), count, expected))
        })
        .collect()
}

fn warn_on_drift(manifest: &Manifest) {
    for (lang, count, expected) in misaligned_languages(manifest) {
        tracing::warn!(
            language = %lang,
            count,
            expected,
            "painting list length differs from the default language; entries are matched by position"
        );
    }
}

/// Parse a YAML file. Missing or empty files yield `None`.
fn read_yaml<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Option<T>, ScanError> {
    let Some(content) = read_text(path)? else {
        return Ok(None);
    };
    serde_yaml::from_str(&content)
        .map(Some)
        .map_err(|source| ScanError::Yaml {
            path: path.to_path_buf(),
            source,
        })
}

/// Read a text file, trimmed. Missing or whitespace-only files yield `None`.
fn read_text(path: &Path) -> Result<Option<String>, ScanError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let trimmed = content.trim();
    Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
}

fn read_strings(path: &Path) -> Result<Strings, ScanError> {
    let Some(content) = read_text(path)? else {
        return Ok(Strings::new());
    };
    serde_json::from_str(&content).map_err(|source| ScanError::Json {
        path: path.to_path_buf(),
        source,
    })
}
