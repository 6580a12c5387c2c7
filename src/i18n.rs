//! UI string translation.
//!
//! Painting text is translated in the content files; everything else on a
//! page (navigation labels, footer, 404 text) comes from flat `key → text`
//! catalogs. English and Chinese catalogs are compiled in from `locales/`,
//! and a site can override or extend any language with
//! `content/locales/<lang>.json`:
//!
//! ```json
//! { "nav.about": "À propos", "copyright": "© {{year}} Tous droits réservés." }
//! ```
//!
//! Lookup order: the page language (override, then built-in), then the
//! default language (override, then built-in), then the key itself.
//! `{{name}}` placeholders are filled by [`Translator::t_with`].

use std::collections::BTreeMap;
use std::sync::LazyLock;

/// A flat translation catalog.
pub type Strings = BTreeMap<String, String>;

const BUILTIN_SOURCES: &[(&str, &str)] = &[
    ("en", include_str!("../locales/en.json")),
    ("zh", include_str!("../locales/zh.json")),
];

static BUILTIN: LazyLock<BTreeMap<&'static str, Strings>> = LazyLock::new(|| {
    BUILTIN_SOURCES
        .iter()
        .map(|(lang, src)| {
            let strings: Strings =
                serde_json::from_str(src).expect("built-in catalog must be valid JSON");
            (*lang, strings)
        })
        .collect()
});

/// Built-in catalog for a language, if one ships with the binary.
pub fn builtin(lang: &str) -> Option<&'static Strings> {
    BUILTIN.get(lang)
}

/// Label shown for a language in the switcher.
pub fn language_label(lang: &str) -> String {
    match lang {
        "en" => "EN".to_string(),
        "zh" => "中文".to_string(),
        other => other.to_uppercase(),
    }
}

/// Resolves UI strings for one page language.
pub struct Translator<'a> {
    lang: &'a str,
    layers: Vec<&'a Strings>,
}

impl<'a> Translator<'a> {
    /// Build a translator for `lang`, falling back to `default_lang`.
    ///
    /// `overrides` holds the site-supplied catalogs keyed by language.
    pub fn new(
        lang: &'a str,
        default_lang: &'a str,
        overrides: &'a BTreeMap<String, Strings>,
    ) -> Self {
        let mut layers = Vec::with_capacity(4);
        let mut push_lang = |code: &str| {
            if let Some(s) = overrides.get(code) {
                layers.push(s);
            }
            if let Some(s) = builtin(code) {
                layers.push(s);
            }
        };
        push_lang(lang);
        if default_lang != lang {
            push_lang(default_lang);
        }
        Self { lang, layers }
    }

    pub fn lang(&self) -> &str {
        self.lang
    }

    /// Look up `key`, returning the key itself when no catalog has it.
    pub fn t(&self, key: &str) -> String {
        self.layers
            .iter()
            .find_map(|layer| layer.get(key))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// Look up `key` and replace `{{name}}` placeholders from `args`.
    pub fn t_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        args.iter().fold(self.t(key), |text, (name, value)| {
            text.replace(&format!("{{{{{name}}}}}"), value)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_overrides() -> BTreeMap<String, Strings> {
        BTreeMap::new()
    }

    #[test]
    fn builtin_catalogs_share_keys() {
        let en = builtin("en").unwrap();
        let zh = builtin("zh").unwrap();
        let en_keys: Vec<_> = en.keys().collect();
        let zh_keys: Vec<_> = zh.keys().collect();
        assert_eq!(en_keys, zh_keys);
    }

    #[test]
    fn looks_up_page_language() {
        let overrides = no_overrides();
        let t = Translator::new("zh", "en", &overrides);
        assert_eq!(t.t("nav.about"), "关于");
        assert_eq!(t.lang(), "zh");
    }

    #[test]
    fn unknown_language_falls_back_to_default() {
        let overrides = no_overrides();
        let t = Translator::new("fr", "en", &overrides);
        assert_eq!(t.t("nav.about"), "About");
    }

    #[test]
    fn missing_key_returns_key() {
        let overrides = no_overrides();
        let t = Translator::new("en", "en", &overrides);
        assert_eq!(t.t("does.not.exist"), "does.not.exist");
    }

    #[test]
    fn override_wins_over_builtin() {
        let mut overrides = no_overrides();
        overrides.insert(
            "en".into(),
            Strings::from([("nav.about".to_string(), "The Artist".to_string())]),
        );
        let t = Translator::new("en", "en", &overrides);
        assert_eq!(t.t("nav.about"), "The Artist");
        assert_eq!(t.t("nav.gallery"), "Gallery");
    }

    #[test]
    fn override_for_new_language() {
        let mut overrides = no_overrides();
        overrides.insert(
            "fr".into(),
            Strings::from([("nav.about".to_string(), "À propos".to_string())]),
        );
        let t = Translator::new("fr", "en", &overrides);
        assert_eq!(t.t("nav.about"), "À propos");
        // Not overridden → default language
        assert_eq!(t.t("nav.gallery"), "Gallery");
    }

    #[test]
    fn interpolates_placeholders() {
        let overrides = no_overrides();
        let t = Translator::new("en", "en", &overrides);
        assert_eq!(
            t.t_with("copyright", &[("year", "2025")]),
            "© 2025 All rights reserved."
        );
    }

    #[test]
    fn language_labels() {
        assert_eq!(language_label("en"), "EN");
        assert_eq!(language_label("zh"), "中文");
        assert_eq!(language_label("fr"), "FR");
    }
}
