//! Site configuration.
//!
//! `content/config.toml` is optional. Whatever keys it sets are laid over the
//! stock defaults table by table, then the result is deserialized into a
//! [`SiteConfig`] and validated once. Stages receive it by reference; there
//! is no global config.
//!
//! ```toml
//! [site]
//! name = "Lulu Tracy"
//! author = "Lulu Tracy"
//! url = "https://lulutracy.com"
//!
//! [i18n]
//! languages = ["en", "zh"]
//! default_language = "en"
//!
//! [images]
//! sizes = [400, 800, 1600]
//! quality = 85
//! ```
//!
//! Run `paintfolio gen-config` for every key with its default. A misspelt
//! key is an error, not a silent no-op.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Invalid config: {0}")]
    Invalid(String),
}

fn invalid(msg: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(msg.into())
}

/// Resolved site configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub site: SiteInfo,
    pub i18n: I18nConfig,
    pub images: ImagesConfig,
    pub thumbnails: ThumbnailsConfig,
    pub theme: ThemeConfig,
    pub colors: ColorConfig,
    pub processing: ProcessingConfig,
}

impl SiteConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let langs = &self.i18n.languages;
        if langs.is_empty() {
            return Err(invalid("i18n.languages must list at least one language"));
        }
        for (i, lang) in langs.iter().enumerate() {
            if lang.is_empty() || lang.contains(['/', '\\']) || lang.contains(char::is_whitespace)
            {
                return Err(invalid(format!("i18n.languages: {lang:?} is not a language code")));
            }
            if langs[..i].contains(lang) {
                return Err(invalid(format!("i18n.languages: {lang:?} is listed twice")));
            }
        }
        if !langs.contains(&self.i18n.default_language) {
            return Err(invalid(format!(
                "i18n.default_language {:?} must be one of i18n.languages",
                self.i18n.default_language
            )));
        }

        match &self.images {
            ImagesConfig { quality, .. } if *quality > 100 => {
                Err(invalid(format!("images.quality {quality} is above 100")))
            }
            ImagesConfig { sizes, .. } if sizes.is_empty() => {
                Err(invalid("images.sizes must list at least one size"))
            }
            ImagesConfig { sizes, .. } if sizes.contains(&0) => {
                Err(invalid("images.sizes cannot contain 0"))
            }
            _ if self.thumbnails.size == 0 => Err(invalid("thumbnails.size cannot be 0")),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    /// Page titles, header, EXIF Software and Copyright.
    pub name: String,
    /// EXIF Artist.
    pub author: String,
    /// Absolute base URL without trailing slash, e.g. `https://example.com`.
    /// Empty leaves canonical and Open Graph links root-relative.
    pub url: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            name: "Portfolio".to_string(),
            author: String::new(),
            url: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct I18nConfig {
    /// Language codes in switcher order.
    pub languages: Vec<String>,
    /// Served without a path prefix. Its painting titles define every slug.
    pub default_language: String,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            languages: vec!["en".to_string(), "zh".to_string()],
            default_language: "en".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Worker cap for image processing; `None` means one per core.
    pub max_processes: Option<usize>,
}

/// Rayon pool size: the configured cap, never more than the available cores.
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism().map_or(1, |n| n.get());
    match config.max_processes {
        Some(n) => n.clamp(1, cores),
        None => cores,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThumbnailsConfig {
    /// Edge of the square gallery tile, in pixels.
    pub size: u32,
}

impl Default for ThumbnailsConfig {
    fn default() -> Self {
        Self { size: 450 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    /// Longer-edge pixel sizes offered in `srcset`.
    pub sizes: Vec<u32>,
    /// JPEG quality, 0-100.
    pub quality: u32,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            sizes: vec![400, 800, 1600],
            quality: 85,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// CSS length between gallery tiles.
    pub gallery_gap: String,
    /// CSS length below which the gallery drops a column.
    pub gallery_min_column: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            gallery_gap: "2rem".to_string(),
            gallery_min_column: "280px".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    /// Applied under `prefers-color-scheme: dark`.
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::paper(),
            dark: ColorScheme::ink(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Captions, counters, footer.
    pub text_muted: String,
    pub border: String,
    pub link: String,
    pub link_hover: String,
}

impl ColorScheme {
    /// Warm off-white.
    pub fn paper() -> Self {
        Self::from_hex([
            "#fdfcfa", "#1a1a1a", "#6b6b6b", "#e4e1dc", "#333333", "#000000",
        ])
    }

    /// Near-black.
    pub fn ink() -> Self {
        Self::from_hex([
            "#121212", "#ececec", "#9a9a9a", "#2e2e2e", "#cccccc", "#ffffff",
        ])
    }

    fn from_hex([background, text, text_muted, border, link, link_hover]: [&str; 6]) -> Self {
        Self {
            background: background.into(),
            text: text.into(),
            text_muted: text_muted.into(),
            border: border.into(),
            link: link.into(),
            link_hover: link_hover.into(),
        }
    }

    /// `(custom property, value)` pairs consumed by `static/style.css`.
    fn properties(&self) -> [(&'static str, &str); 6] {
        [
            ("--color-bg", self.background.as_str()),
            ("--color-text", self.text.as_str()),
            ("--color-text-muted", self.text_muted.as_str()),
            ("--color-border", self.border.as_str()),
            ("--color-link", self.link.as_str()),
            ("--color-link-hover", self.link_hover.as_str()),
        ]
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::paper()
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Read and validate `config.toml` in `root`, or the defaults when absent.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let path = root.join(CONFIG_FILE);
    let mut table = defaults_table();
    if path.is_file() {
        let text = std::fs::read_to_string(&path)?;
        let user: toml::Table = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
        overlay(&mut table, user);
    }

    let config: SiteConfig = toml::Value::Table(table)
        .try_into()
        .map_err(|source| ConfigError::Parse { path, source })?;
    config.validate()?;
    Ok(config)
}

/// Stock defaults as a TOML table, the base every user file is laid over.
pub fn defaults_table() -> toml::Table {
    match toml::Value::try_from(SiteConfig::default()) {
        Ok(toml::Value::Table(table)) => table,
        _ => unreachable!("SiteConfig serializes to a table"),
    }
}

/// Lay `top` over `base`: nested tables merge key by key, anything else
/// (scalars, arrays) replaces the base value.
pub fn overlay(base: &mut toml::Table, top: toml::Table) {
    for (key, value) in top {
        let merged = match (base.remove(&key), value) {
            (Some(toml::Value::Table(mut inner)), toml::Value::Table(top_inner)) => {
                overlay(&mut inner, top_inner);
                toml::Value::Table(inner)
            }
            (_, value) => value,
        };
        base.insert(key, merged);
    }
}

/// Commented stock `config.toml` printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# paintfolio config.toml
#
# Every key is optional; the values below are the defaults.
# Misspelt or unknown keys stop the build.

## Site identity ############################################################
[site]
# Page titles, header, and the Software/Copyright tags of published JPEGs.
name = "Portfolio"
# EXIF Artist of published JPEGs.
author = ""
# Absolute base URL without trailing slash, for canonical/hreflang/OG links.
url = ""

## Languages ################################################################
[i18n]
# Each language reads site/<lang>.yaml, paintings/<lang>.yaml, about/<lang>.md.
# The Nth painting of every language file must be the same painting.
languages = ["en", "zh"]
# Served without a prefix. Its painting titles define URLs and image names.
default_language = "en"

## Responsive images ########################################################
[images]
# Longer-edge sizes in pixels. Sizes above the source image are skipped.
sizes = [400, 800, 1600]
# JPEG quality, 0-100.
quality = 85

## Gallery tiles ############################################################
[thumbnails]
# Square, centre-cropped.
size = 450

## Layout ###################################################################
[theme]
gallery_gap = "2rem"
gallery_min_column = "280px"

## Colours ##################################################################
[colors.light]
background = "#fdfcfa"
text = "#1a1a1a"
text_muted = "#6b6b6b"
border = "#e4e1dc"
link = "#333333"
link_hover = "#000000"

# Used when the visitor prefers a dark colour scheme.
[colors.dark]
background = "#121212"
text = "#ececec"
text_muted = "#9a9a9a"
border = "#2e2e2e"
link = "#cccccc"
link_hover = "#ffffff"

## Processing ###############################################################
[processing]
# Parallel image workers. Unset means one per CPU core.
# max_processes = 4
"##
}

// =============================================================================
// CSS
// =============================================================================

fn declarations(scheme: &ColorScheme, pad: &str) -> String {
    scheme
        .properties()
        .iter()
        .map(|(name, value)| format!("{pad}{name}: {value};\n"))
        .collect()
}

/// Colour custom properties, with the dark scheme behind a media query.
pub fn color_css(colors: &ColorConfig) -> String {
    format!(
        ":root {{\n{}}}\n\n@media (prefers-color-scheme: dark) {{\n    :root {{\n{}    }}\n}}",
        declarations(&colors.light, "    "),
        declarations(&colors.dark, "        "),
    )
}

/// Gallery layout custom properties.
pub fn theme_css(theme: &ThemeConfig) -> String {
    format!(
        ":root {{\n    --gallery-gap: {};\n    --gallery-min-column: {};\n}}",
        theme.gallery_gap, theme.gallery_min_column
    )
}
