//! Shared content types used across all pipeline stages.
//!
//! These are deserialized from the YAML content files and serialized to the
//! JSON manifests passed between stages (scan → process → generate → inject).

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A physical measurement, authored either structured or as free text.
///
/// ```yaml
/// dimensions: { width: 60, height: 80, unit: cm }
/// substrateSize: "65 × 85 cm"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Size {
    Measured { width: f64, height: f64, unit: String },
    Text(String),
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Size::Measured {
                width,
                height,
                unit,
            } => write!(f, "{} × {} {}", format_number(*width), format_number(*height), unit),
            Size::Text(text) => f.write_str(text),
        }
    }
}

impl Default for Size {
    fn default() -> Self {
        Size::Text(String::new())
    }
}

/// Print whole numbers without a trailing `.0` (`60.0` → `60`, `60.5` → `60.5`).
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// One painting as authored in `paintings/<lang>.yaml`.
///
/// `title`, `description`, and `alt` are translated per language; the rest
/// is the same in every language file. Identity (`id`, `image`) is never
/// authored (see [`EnrichedPainting`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Painting {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub dimensions: Size,
    #[serde(default)]
    pub substrate: String,
    #[serde(default)]
    pub substrate_size: Size,
    #[serde(default)]
    pub medium: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub year: String,
    #[serde(default)]
    pub order: i64,
}

/// A painting with its derived, language-independent identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedPainting {
    #[serde(flatten)]
    pub painting: Painting,
    /// URL slug, derived from the default-language title.
    pub id: String,
    /// Source image filename, derived from the default-language title.
    pub image: String,
}

/// Per-language site text from `site/<lang>.yaml` (under a `site:` key).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteText {
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// YAML authors write `year: 2023` as often as `year: "2023"`.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(n) => format_number(n),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measured_size_display() {
        let size = Size::Measured {
            width: 60.0,
            height: 80.0,
            unit: "cm".to_string(),
        };
        assert_eq!(size.to_string(), "60 × 80 cm");
    }

    #[test]
    fn fractional_size_display() {
        let size = Size::Measured {
            width: 30.5,
            height: 40.0,
            unit: "in".to_string(),
        };
        assert_eq!(size.to_string(), "30.5 × 40 in");
    }

    #[test]
    fn text_size_passes_through() {
        assert_eq!(Size::Text("65 × 85 cm".into()).to_string(), "65 × 85 cm");
    }

    #[test]
    fn painting_parses_structured_dimensions() {
        let yaml = r#"
title: Night Hours
description: Blue hour over the river
alt: A river at dusk
dimensions: { width: 60, height: 80, unit: cm }
substrate: linen
substrateSize: { width: 65, height: 85, unit: cm }
medium: oil
year: "2023"
order: 2
"#;
        let p: Painting = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(p.title, "Night Hours");
        assert_eq!(p.dimensions.to_string(), "60 × 80 cm");
        assert_eq!(p.substrate_size.to_string(), "65 × 85 cm");
        assert_eq!(p.year, "2023");
        assert_eq!(p.order, 2);
    }

    #[test]
    fn painting_parses_string_dimensions_and_numeric_year() {
        let yaml = r#"
title: Symbiosis
dimensions: "50 x 50 cm"
substrateSize: "55 x 55 cm"
year: 2021
"#;
        let p: Painting = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(p.dimensions, Size::Text("50 x 50 cm".into()));
        assert_eq!(p.year, "2021");
        assert_eq!(p.order, 0);
        assert_eq!(p.medium, "");
    }

    #[test]
    fn enriched_painting_serializes_flat() {
        let enriched = EnrichedPainting {
            painting: serde_yaml::from_str("title: Symbiosis").unwrap(),
            id: "symbiosis".into(),
            image: "symbiosis.jpeg".into(),
        };
        let json = serde_json::to_value(&enriched).unwrap();
        assert_eq!(json["title"], "Symbiosis");
        assert_eq!(json["id"], "symbiosis");
        assert_eq!(json["image"], "symbiosis.jpeg");
    }
}
