//! HTML site generation.
//!
//! Stage 3 of the build pipeline. Takes the processed manifest and writes the
//! final static site, one HTML file per [`PagePlan`].
//!
//! ## Generated Pages
//!
//! - **Gallery** (`/`, `/zh/`): square tiles sorted by `order`
//! - **Painting pages** (`/painting/{id}`, `/zh/painting/{id}`): responsive
//!   image, details, and prev/next navigation
//! - **About** (`/about`): markdown rendered with pulldown-cmark
//! - **Not found** (`/404.html`, `/zh/404.html`): `noindex, nofollow`
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── 404.html
//! ├── about/index.html
//! ├── painting/night-hours/index.html
//! ├── zh/
//! │   ├── index.html
//! │   ├── 404.html
//! │   └── painting/night-hours/index.html
//! └── static/                    # processed images (copied)
//!     ├── 800/night-hours.jpg
//!     └── thumb/night-hours.jpg
//! ```
//!
//! ## Head metadata
//!
//! Every indexable page carries a canonical link, `hreflang` alternates for
//! each language plus `x-default`, Open Graph and Twitter card tags, and the
//! gallery and painting pages embed schema.org JSON-LD.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping. Navigation
//! is CSS-only; pages ship no JavaScript.

use crate::config::{self, SiteConfig};
use crate::i18n::{Strings, Translator, language_label};
use crate::locale::{self, LanguageSet, og_locale};
use crate::pages::{self, ABOUT_PATH, PageKind, PagePlan, PaintingPage};
use crate::process::{OutputManifest, ProcessedImage};
use crate::types::EnrichedPainting;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use serde_json::json;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");

/// Render every page of the site into `output_dir`.
///
/// `year` fills the footer copyright. Returns the pages written.
pub fn generate(
    manifest_path: &Path,
    processed_dir: &Path,
    output_dir: &Path,
    year: i32,
) -> Result<Vec<PagePlan>, GenerateError> {
    let manifest_content = fs::read_to_string(manifest_path)?;
    let manifest: OutputManifest = serde_json::from_str(&manifest_content)?;

    fs::create_dir_all(output_dir)?;

    // Copy processed images to output
    copy_dir_recursive(processed_dir, output_dir)?;

    let site = Site::new(&manifest, year);
    let pages = pages::plan_pages(&manifest.content);
    for page in &pages {
        let path = output_dir.join(page.output_file());
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, render_page(&site, page).into_string())?;
        tracing::debug!(route = %page.route, file = %path.display(), "wrote page");
    }

    Ok(pages)
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else if src_path.extension().map(|e| e != "json").unwrap_or(true) {
            // Skip manifest.json, copy everything else
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Everything shared by all pages of one build.
struct Site<'a> {
    config: &'a SiteConfig,
    manifest: &'a OutputManifest,
    langs: LanguageSet,
    overrides: BTreeMap<String, Strings>,
    css: String,
    year: i32,
    has_about: bool,
    /// Absolute URL of the copied site icon, the preview image of last resort.
    icon: Option<String>,
}

impl<'a> Site<'a> {
    fn new(manifest: &'a OutputManifest, year: i32) -> Self {
        let config = &manifest.content.config;
        let langs = manifest.content.languages();
        let has_about = langs
            .all()
            .iter()
            .any(|lang| pages::about_markdown(&manifest.content, &langs, lang).is_some());
        let css = format!(
            "{}\n\n{}\n\n{}",
            config::color_css(&config.colors),
            config::theme_css(&config.theme),
            CSS_STATIC
        );

        let mut site = Self {
            config,
            manifest,
            overrides: manifest.content.string_overrides(),
            langs,
            css,
            year,
            has_about,
            icon: None,
        };
        site.icon = manifest
            .icon
            .as_deref()
            .map(|icon| site.absolute(&asset_url(icon)));
        site
    }

    fn image(&self, id: &str) -> Option<&'a ProcessedImage> {
        self.manifest.images.get(id)
    }

    /// Tagline for `lang`, falling back to the default language.
    fn tagline(&self, lang: &str) -> Option<&'a str> {
        self.site_text(lang, |s| s.tagline.as_deref())
    }

    fn description(&self, lang: &str) -> Option<&'a str> {
        self.site_text(lang, |s| s.description.as_deref())
    }

    fn site_text(
        &self,
        lang: &str,
        field: impl Fn(&'a crate::types::SiteText) -> Option<&'a str>,
    ) -> Option<&'a str> {
        let content = &self.manifest.content;
        [lang, self.langs.default_language()]
            .into_iter()
            .find_map(|l| content.locale(l).site.as_ref().and_then(&field))
            .filter(|s| !s.is_empty())
    }

    /// `path` (starting with `/`) prefixed with the configured site URL.
    fn absolute(&self, path: &str) -> String {
        format!("{}{}", self.config.site.url.trim_end_matches('/'), path)
    }
}

/// Root-relative URL of a processed image path.
fn asset_url(path: &str) -> String {
    format!("/{path}")
}

fn alt_text(painting: &EnrichedPainting) -> &str {
    if painting.painting.alt.is_empty() {
        &painting.painting.title
    } else {
        &painting.painting.alt
    }
}

// ============================================================================
// Document
// ============================================================================

/// Per-page head metadata.
struct Meta {
    title: String,
    description: String,
    og_type: &'static str,
    image: Option<String>,
    json_ld: Option<serde_json::Value>,
    indexable: bool,
}

fn render_page(site: &Site, page: &PagePlan) -> Markup {
    let t = Translator::new(&page.lang, site.langs.default_language(), &site.overrides);
    let (meta, class, content) = match &page.kind {
        PageKind::Index { paintings } => (
            index_meta(site, page, paintings),
            "index-page",
            render_index(site, page, &t, paintings),
        ),
        PageKind::Painting(pp) => (
            painting_meta(site, page, pp),
            "painting-page",
            render_painting(site, page, &t, pp),
        ),
        PageKind::About { markdown } => (
            simple_meta(site, page, &t.t("nav.about"), true),
            "about-page",
            render_about(markdown),
        ),
        PageKind::NotFound => (
            simple_meta(site, page, &t.t("404.title"), false),
            "not-found-page",
            render_not_found(site, page, &t),
        ),
    };
    base_document(site, page, &t, &meta, class, content)
}

fn base_document(
    site: &Site,
    page: &PagePlan,
    t: &Translator,
    meta: &Meta,
    main_class: &str,
    content: Markup,
) -> Markup {
    let name = &site.config.site.name;
    let current_locale = og_locale(&page.lang);
    let mut alternate_locales: Vec<&str> = site
        .langs
        .all()
        .iter()
        .map(|l| og_locale(l))
        .filter(|l| *l != current_locale)
        .collect();
    alternate_locales.dedup();

    html! {
        (DOCTYPE)
        html lang=(page.lang) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (meta.title) }
                @if !meta.description.is_empty() {
                    meta name="description" content=(meta.description);
                }
                @if meta.indexable {
                    link rel="canonical" href=(site.absolute(&page.route));
                    @for lang in site.langs.all() {
                        link rel="alternate" hreflang=(lang)
                            href=(site.absolute(&site.langs.localized_path(lang, &page.original_path)));
                    }
                    link rel="alternate" hreflang="x-default"
                        href=(site.absolute(&site.langs.localized_path(site.langs.default_language(), &page.original_path)));
                } @else {
                    meta name="robots" content="noindex, nofollow";
                }
                meta property="og:type" content=(meta.og_type);
                meta property="og:title" content=(meta.title);
                @if !meta.description.is_empty() {
                    meta property="og:description" content=(meta.description);
                }
                meta property="og:url" content=(site.absolute(&page.route));
                meta property="og:site_name" content=(name);
                meta property="og:locale" content=(current_locale);
                @for alt in &alternate_locales {
                    meta property="og:locale:alternate" content=(alt);
                }
                @if let Some(image) = &meta.image {
                    meta property="og:image" content=(image);
                }
                meta name="twitter:card" content="summary_large_image";
                meta name="twitter:title" content=(meta.title);
                @if !meta.description.is_empty() {
                    meta name="twitter:description" content=(meta.description);
                }
                @if let Some(image) = &meta.image {
                    meta name="twitter:image" content=(image);
                }
                @if let Some(ld) = &meta.json_ld {
                    script type="application/ld+json" { (PreEscaped(json_ld(ld))) }
                }
                style { (PreEscaped(&site.css)) }
            }
            body {
                a.skip-link href="#main" { (t.t("skipToContent")) }
                header.site-header {
                    a.site-name href=(site.langs.localized_path(&page.lang, "/")) { (name) }
                    nav.site-nav aria-label=(t.t("mainNavigation")) {
                        (render_nav(site, page, t))
                    }
                }
                main id="main" class=(main_class) {
                    (content)
                }
                footer.site-footer {
                    p { (t.t_with("copyright", &[("year", &site.year.to_string())])) }
                }
            }
        }
    }
}

/// Serialize JSON-LD for a `<script>` body; `</` must not close the element.
fn json_ld(value: &serde_json::Value) -> String {
    value.to_string().replace("</", "<\\/")
}

/// Hamburger navigation (CSS-only, checkbox driven) with the language switcher.
fn render_nav(site: &Site, page: &PagePlan, t: &Translator) -> Markup {
    let current = page.original_path.as_str();
    let in_gallery = current == "/" || current.starts_with("/painting/");
    let in_about = current == ABOUT_PATH;

    html! {
        input.nav-toggle type="checkbox" id="nav-toggle";
        label.nav-hamburger for="nav-toggle" aria-label=(t.t("openMenu")) {
            span.hamburger-line {}
            span.hamburger-line {}
            span.hamburger-line {}
        }
        div.nav-panel {
            label.nav-close for="nav-toggle" aria-label=(t.t("closeMenu")) { "×" }
            ul.nav-links {
                li class=[in_gallery.then_some("current")] {
                    a href=(site.langs.localized_path(&page.lang, "/")) { (t.t("nav.gallery")) }
                }
                @if site.has_about {
                    li class=[in_about.then_some("current")] {
                        a href=(site.langs.localized_path(&page.lang, ABOUT_PATH)) { (t.t("nav.about")) }
                    }
                }
            }
            @if site.langs.all().len() > 1 {
                ul.lang-switcher aria-label=(t.t("languageSelection")) {
                    @for lang in site.langs.all() {
                        li {
                            a href=(site.langs.localized_path(lang, &page.original_path))
                                hreflang=(lang) lang=(lang)
                                aria-current=[(lang == &page.lang).then_some("true")] {
                                (language_label(lang))
                            }
                        }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Metadata
// ============================================================================

fn index_meta(site: &Site, page: &PagePlan, paintings: &[EnrichedPainting]) -> Meta {
    let name = &site.config.site.name;
    let tagline = site.tagline(&page.lang);
    let description = site
        .description(&page.lang)
        .or(tagline)
        .unwrap_or_default()
        .to_string();

    let image = paintings
        .iter()
        .find_map(|p| site.image(&p.id))
        .map(|img| site.absolute(&asset_url(&img.thumbnail)))
        .or_else(|| site.icon.clone());

    let parts: Vec<serde_json::Value> = paintings
        .iter()
        .map(|p| {
            let mut artwork = json!({
                "@type": "VisualArtwork",
                "name": p.painting.title,
                "url": site.absolute(&site.langs.localized_path(&page.lang, &locale::painting_path(&p.id))),
            });
            if let Some(img) = site.image(&p.id) {
                artwork["image"] = json!(site.absolute(&asset_url(&img.thumbnail)));
            }
            artwork
        })
        .collect();

    Meta {
        title: match tagline {
            Some(tagline) => format!("{name} | {tagline}"),
            None => name.clone(),
        },
        json_ld: Some(json!({
            "@context": "https://schema.org",
            "@type": "CollectionPage",
            "name": name,
            "description": description,
            "url": site.absolute(&page.route),
            "inLanguage": page.lang,
            "author": { "@type": "Person", "name": site.config.site.author },
            "hasPart": parts,
        })),
        description,
        og_type: "website",
        image,
        indexable: true,
    }
}

fn painting_meta(site: &Site, page: &PagePlan, pp: &PaintingPage) -> Meta {
    let p = &pp.painting.painting;
    let description = if p.description.is_empty() {
        site.description(&page.lang).unwrap_or_default().to_string()
    } else {
        p.description.clone()
    };
    let image = site
        .image(&pp.painting.id)
        .and_then(|img| img.largest())
        .map(|v| site.absolute(&asset_url(&v.path)))
        .or_else(|| site.icon.clone());

    let mut artwork = json!({
        "@context": "https://schema.org",
        "@type": "VisualArtwork",
        "name": p.title,
        "url": site.absolute(&page.route),
        "inLanguage": page.lang,
        "creator": { "@type": "Person", "name": site.config.site.author },
    });
    for (key, value) in [
        ("image", image.clone().unwrap_or_default()),
        ("description", p.description.clone()),
        ("artMedium", p.medium.clone()),
        ("artworkSurface", p.substrate.clone()),
        ("dateCreated", p.year.clone()),
        ("size", p.dimensions.to_string()),
    ] {
        if !value.is_empty() {
            artwork[key] = json!(value);
        }
    }

    Meta {
        title: format!("{} | {}", p.title, site.config.site.name),
        description,
        og_type: "article",
        image,
        json_ld: Some(artwork),
        indexable: true,
    }
}

fn simple_meta(site: &Site, page: &PagePlan, heading: &str, indexable: bool) -> Meta {
    Meta {
        title: format!("{heading} | {}", site.config.site.name),
        description: site.description(&page.lang).unwrap_or_default().to_string(),
        og_type: "website",
        image: site.icon.clone(),
        json_ld: None,
        indexable,
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

fn render_index(site: &Site, page: &PagePlan, t: &Translator, paintings: &[EnrichedPainting]) -> Markup {
    html! {
        header.gallery-header {
            h1 { (t.t("gallery.heading")) }
            @if let Some(tagline) = site.tagline(&page.lang) {
                p.tagline { (tagline) }
            }
        }
        @if paintings.is_empty() {
            p.gallery-empty { (t.t("gallery.empty")) }
        } @else {
            div.gallery-grid {
                @for painting in paintings {
                    (gallery_tile(site, page, t, painting))
                }
            }
        }
    }
}

fn gallery_tile(site: &Site, page: &PagePlan, t: &Translator, painting: &EnrichedPainting) -> Markup {
    let href = site
        .langs
        .localized_path(&page.lang, &locale::painting_path(&painting.id));
    let tile_size = site.config.thumbnails.size;

    html! {
        a.gallery-tile href=(href) {
            @if let Some(image) = site.image(&painting.id) {
                img src=(asset_url(&image.thumbnail)) alt=(alt_text(painting))
                    width=(tile_size) height=(tile_size) loading="lazy";
            } @else {
                span.tile-placeholder { (t.t("painting.imageUnavailable")) }
            }
            span.tile-title { (painting.painting.title) }
        }
    }
}

/// `"Oil on linen"`, or whichever half is present.
fn medium_on_substrate(medium: &str, substrate: &str, t: &Translator) -> String {
    match (medium.is_empty(), substrate.is_empty()) {
        (false, false) => format!("{medium} {} {substrate}", t.t("painting.on")),
        (false, true) => medium.to_string(),
        (true, false) => substrate.to_string(),
        (true, true) => String::new(),
    }
}

fn render_painting(site: &Site, page: &PagePlan, t: &Translator, pp: &PaintingPage) -> Markup {
    let p = &pp.painting.painting;
    let facts: Vec<(String, String)> = [
        ("painting.medium", medium_on_substrate(&p.medium, &p.substrate, t)),
        ("painting.size", p.dimensions.to_string()),
        ("painting.substrate", p.substrate_size.to_string()),
        ("painting.year", p.year.clone()),
    ]
    .into_iter()
    .filter(|(_, value)| !value.is_empty())
    .map(|(key, value)| (t.t(key), value))
    .collect();

    html! {
        figure.painting-frame {
            @if let Some(image) = site.image(&pp.painting.id) {
                (painting_image(image, alt_text(&pp.painting)))
            } @else {
                p.image-unavailable { (t.t("painting.imageUnavailable")) }
            }
        }
        div.painting-details {
            h1 { (p.title) }
            @if !p.description.is_empty() {
                p.painting-description { (p.description) }
            }
            @if !facts.is_empty() {
                dl.painting-facts {
                    @for (label, value) in &facts {
                        dt { (label) }
                        dd { (value) }
                    }
                }
            }
        }
        (painting_nav(site, page, t, pp))
    }
}

/// Responsive `<img>`: every variant in `srcset`, the middle one as `src`.
fn painting_image(image: &ProcessedImage, alt: &str) -> Markup {
    let srcset = image
        .variants
        .iter()
        .map(|v| format!("{} {}w", asset_url(&v.path), v.width))
        .collect::<Vec<_>>()
        .join(", ");
    let default = image.variants.get(image.variants.len() / 2);

    html! {
        @if let Some(default) = default {
            img srcset=(srcset) sizes="(max-width: 720px) 100vw, 66vw"
                src=(asset_url(&default.path)) alt=(alt)
                width=(default.width) height=(default.height);
        }
    }
}

fn painting_nav(site: &Site, page: &PagePlan, t: &Translator, pp: &PaintingPage) -> Markup {
    let href = |id: &str| {
        site.langs
            .localized_path(&page.lang, &locale::painting_path(id))
    };

    html! {
        nav.painting-nav aria-label=(t.t("painting.paintingNavigation")) {
            a.back href=(site.langs.localized_path(&page.lang, "/")) {
                "← " (t.t("painting.backToGallery"))
            }
            @match &pp.prev {
                Some(prev) => {
                    a.arrow.prev href=(href(&prev.id)) rel="prev"
                        aria-label={ (t.t("painting.previous")) ": " (prev.title) } { "‹" }
                }
                None => {
                    span.arrow.prev.disabled aria-disabled="true" { "‹" }
                }
            }
            span.counter { (pp.position) " / " (pp.total) }
            @match &pp.next {
                Some(next) => {
                    a.arrow.next href=(href(&next.id)) rel="next"
                        aria-label={ (t.t("painting.next")) ": " (next.title) } { "›" }
                }
                None => {
                    span.arrow.next.disabled aria-disabled="true" { "›" }
                }
            }
        }
    }
}

fn render_about(markdown: &str) -> Markup {
    let parser = Parser::new(markdown);
    let mut body_html = String::new();
    md_html::push_html(&mut body_html, parser);

    html! {
        article.about-content {
            (PreEscaped(body_html))
        }
    }
}

fn render_not_found(site: &Site, page: &PagePlan, t: &Translator) -> Markup {
    html! {
        div.not-found {
            h1 { (t.t("404.title")) }
            p { (t.t("404.message")) }
            a href=(site.langs.localized_path(&page.lang, "/")) { (t.t("404.returnLink")) }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
