//! Page fan-out: which pages exist, in which language, at which route.
//!
//! Every configured language gets the same set of pages:
//!
//! | Page | Original route | Output |
//! |---|---|---|
//! | Gallery | `/` | `index.html`, `zh/index.html` |
//! | About | `/about` | `about/index.html` (only if any about text exists) |
//! | Not found | `/404.html` | `404.html`, `zh/404.html` |
//! | Painting | `/painting/{id}` | one per entry of that language's list |
//!
//! Painting identity comes from [`locale::enrich`], so the pages for the same
//! position in every language share an `id` and differ only in the language
//! prefix. A language without paintings still gets its gallery and 404 page.

use crate::locale::{self, LanguageSet};
use crate::scan::Manifest;
use crate::types::EnrichedPainting;

pub const ABOUT_PATH: &str = "/about";
pub const NOT_FOUND_PATH: &str = "/404.html";

/// One page to render.
#[derive(Debug, Clone, PartialEq)]
pub struct PagePlan {
    pub lang: String,
    /// Unprefixed route, identical across languages.
    pub original_path: String,
    /// Route in this page's language.
    pub route: String,
    pub kind: PageKind,
}

impl PagePlan {
    /// Output file relative to the site root.
    pub fn output_file(&self) -> String {
        locale::output_file(&self.route)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageKind {
    /// Gallery of the language's paintings, sorted by `order`.
    Index { paintings: Vec<EnrichedPainting> },
    About { markdown: String },
    NotFound,
    Painting(PaintingPage),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaintingPage {
    pub painting: EnrichedPainting,
    /// 1-based position in gallery order.
    pub position: usize,
    pub total: usize,
    pub prev: Option<Neighbor>,
    pub next: Option<Neighbor>,
}

/// An adjacent painting in gallery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neighbor {
    pub id: String,
    pub title: String,
}

impl From<&EnrichedPainting> for Neighbor {
    fn from(p: &EnrichedPainting) -> Self {
        Self {
            id: p.id.clone(),
            title: p.painting.title.clone(),
        }
    }
}

/// A language's paintings with identities attached, in gallery order.
///
/// Identity is resolved positionally first; the stable sort by `order` comes
/// after, so reordering never changes which entries pair up.
pub fn gallery(manifest: &Manifest, lang: &str) -> Vec<EnrichedPainting> {
    let mut paintings = locale::enrich(
        manifest.default_paintings(),
        &manifest.locale(lang).paintings,
    );
    paintings.sort_by_key(|p| p.painting.order);
    paintings
}

/// About markdown for `lang`. Without its own text a language borrows the
/// default language's, then the first configured language that has any, so
/// the page exists in every language or in none.
pub fn about_markdown<'a>(manifest: &'a Manifest, langs: &LanguageSet, lang: &str) -> Option<&'a str> {
    let about = |l: &str| manifest.locale(l).about.as_deref();
    about(lang)
        .or_else(|| about(langs.default_language()))
        .or_else(|| langs.all().iter().find_map(|l| about(l)))
}

pub fn plan_pages(manifest: &Manifest) -> Vec<PagePlan> {
    let langs = manifest.languages();
    let mut pages = Vec::new();

    for lang in langs.all() {
        let page = |original: &str, kind: PageKind| PagePlan {
            lang: lang.clone(),
            original_path: original.to_string(),
            route: langs.localized_path(lang, original),
            kind,
        };

        let paintings = gallery(manifest, lang);
        let total = paintings.len();

        for (i, painting) in paintings.iter().enumerate() {
            let prev = i.checked_sub(1).map(|j| Neighbor::from(&paintings[j]));
            let next = paintings.get(i + 1).map(Neighbor::from);
            pages.push(page(
                &locale::painting_path(&painting.id),
                PageKind::Painting(PaintingPage {
                    painting: painting.clone(),
                    position: i + 1,
                    total,
                    prev,
                    next,
                }),
            ));
        }

        pages.push(page("/", PageKind::Index { paintings }));

        if let Some(markdown) = about_markdown(manifest, &langs, lang) {
            pages.push(page(
                ABOUT_PATH,
                PageKind::About {
                    markdown: markdown.to_string(),
                },
            ));
        }

        pages.push(page(NOT_FOUND_PATH, PageKind::NotFound));
    }

    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::scan;
    use crate::test_helpers::{setup_content, write_file};

    fn painting_pages(pages: &[PagePlan]) -> Vec<&PagePlan> {
        pages
            .iter()
            .filter(|p| matches!(p.kind, PageKind::Painting(_)))
            .collect()
    }

    fn id_of(page: &PagePlan) -> &str {
        match &page.kind {
            PageKind::Painting(p) => &p.painting.id,
            _ => panic!("not a painting page"),
        }
    }

    #[test]
    fn two_languages_two_paintings_yield_four_pages() {
        let tmp = setup_content();
        write_file(
            tmp.path(),
            "paintings/en.yaml",
            "paintings:\n  - title: Night Hours\n    order: 1\n  - title: Symbiosis\n    order: 2\n",
        );
        write_file(
            tmp.path(),
            "paintings/zh.yaml",
            "paintings:\n  - title: 夜晚时光\n    order: 1\n  - title: 共生\n    order: 2\n",
        );
        let manifest = scan(tmp.path()).unwrap();
        let pages = plan_pages(&manifest);
        let paintings = painting_pages(&pages);

        assert_eq!(paintings.len(), 4);
        let routes: Vec<&str> = paintings.iter().map(|p| p.route.as_str()).collect();
        assert_eq!(
            routes,
            vec![
                "/painting/night-hours",
                "/painting/symbiosis",
                "/zh/painting/night-hours",
                "/zh/painting/symbiosis",
            ]
        );
        assert_eq!(id_of(paintings[0]), id_of(paintings[2]));
        assert_eq!(id_of(paintings[1]), id_of(paintings[3]));
        assert_eq!(paintings[0].original_path, paintings[2].original_path);
    }

    #[test]
    fn every_language_gets_index_and_404() {
        let tmp = setup_content();
        let manifest = scan(tmp.path()).unwrap();
        let pages = plan_pages(&manifest);

        let files: Vec<String> = pages
            .iter()
            .filter(|p| !matches!(p.kind, PageKind::Painting(_)))
            .map(|p| p.output_file())
            .collect();
        assert_eq!(
            files,
            vec![
                "index.html",
                "about/index.html",
                "404.html",
                "zh/index.html",
                "zh/about/index.html",
                "zh/404.html",
            ]
        );
    }

    #[test]
    fn about_falls_back_to_default_language() {
        let tmp = setup_content();
        let manifest = scan(tmp.path()).unwrap();
        let pages = plan_pages(&manifest);

        let zh_about = pages
            .iter()
            .find(|p| p.route == "/zh/about")
            .expect("zh about page");
        assert!(matches!(&zh_about.kind, PageKind::About { markdown } if markdown.starts_with("# About")));
    }

    #[test]
    fn about_only_in_translation_is_planned_everywhere() {
        let tmp = setup_content();
        std::fs::remove_file(tmp.path().join("about/en.md")).unwrap();
        write_file(tmp.path(), "about/zh.md", "# 关于\n\n夜里作画。");
        let manifest = scan(tmp.path()).unwrap();
        let pages = plan_pages(&manifest);

        let about: Vec<&PagePlan> = pages
            .iter()
            .filter(|p| matches!(p.kind, PageKind::About { .. }))
            .collect();
        let routes: Vec<&str> = about.iter().map(|p| p.route.as_str()).collect();
        assert_eq!(routes, vec!["/about", "/zh/about"]);
        assert!(matches!(&about[0].kind, PageKind::About { markdown } if markdown.starts_with("# 关于")));
    }

    #[test]
    fn no_about_page_without_markdown() {
        let tmp = setup_content();
        std::fs::remove_file(tmp.path().join("about/en.md")).unwrap();
        let manifest = scan(tmp.path()).unwrap();
        assert!(
            plan_pages(&manifest)
                .iter()
                .all(|p| !matches!(p.kind, PageKind::About { .. }))
        );
    }

    #[test]
    fn painting_pages_follow_order_with_neighbours() {
        let tmp = setup_content();
        let manifest = scan(tmp.path()).unwrap();
        let pages = plan_pages(&manifest);

        let en: Vec<&PaintingPage> = pages
            .iter()
            .filter(|p| p.lang == "en")
            .filter_map(|p| match &p.kind {
                PageKind::Painting(pp) => Some(pp),
                _ => None,
            })
            .collect();

        // order: Symbiosis 1, Night Hours 2, Nature Study III 3
        let ids: Vec<&str> = en.iter().map(|p| p.painting.id.as_str()).collect();
        assert_eq!(ids, vec!["symbiosis", "night-hours", "nature-study-iii"]);

        assert_eq!(en[0].prev, None);
        assert_eq!(en[0].next.as_ref().unwrap().id, "night-hours");
        assert_eq!(en[1].position, 2);
        assert_eq!(en[1].total, 3);
        assert_eq!(en[2].prev.as_ref().unwrap().title, "Night Hours");
        assert_eq!(en[2].next, None);
    }

    #[test]
    fn translated_neighbours_use_translated_titles() {
        let tmp = setup_content();
        let manifest = scan(tmp.path()).unwrap();
        let pages = plan_pages(&manifest);

        let zh_night = pages
            .iter()
            .find(|p| p.route == "/zh/painting/night-hours")
            .unwrap();
        let PageKind::Painting(page) = &zh_night.kind else {
            panic!("not a painting page");
        };
        assert_eq!(page.painting.painting.title, "夜晚时光");
        assert_eq!(page.prev.as_ref().unwrap().title, "共生");
    }

    #[test]
    fn language_without_paintings_still_has_gallery() {
        let tmp = setup_content();
        write_file(tmp.path(), "paintings/zh.yaml", "");
        let manifest = scan(tmp.path()).unwrap();
        let pages = plan_pages(&manifest);

        assert!(pages.iter().all(|p| p.lang != "zh" || !matches!(p.kind, PageKind::Painting(_))));
        let zh_index = pages.iter().find(|p| p.route == "/zh/").unwrap();
        assert!(matches!(&zh_index.kind, PageKind::Index { paintings } if paintings.is_empty()));
    }

    #[test]
    fn empty_content_plans_only_fixed_pages() {
        let tmp = tempfile::TempDir::new().unwrap();
        let manifest = scan(tmp.path()).unwrap();
        let pages = plan_pages(&manifest);
        assert_eq!(pages.len(), 4);
        assert!(painting_pages(&pages).is_empty());
    }

    #[test]
    fn sort_by_order_is_stable() {
        let tmp = setup_content();
        write_file(
            tmp.path(),
            "paintings/en.yaml",
            "paintings:\n  - title: B\n  - title: A\n  - title: C\n",
        );
        write_file(tmp.path(), "paintings/zh.yaml", "");
        let manifest = scan(tmp.path()).unwrap();
        let ids: Vec<String> = gallery(&manifest, "en").into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }
}
