//! Shared test utilities for the paintfolio test suite.
//!
//! Builds content trees in temp directories so each test gets an isolated,
//! mutable copy:
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_content();                       // bilingual, 3 paintings
//! write_file(tmp.path(), "paintings/zh.yaml", ""); // tweak a file
//! write_jpeg(&tmp.path().join("images/night-hours.jpeg"), 64, 48);
//! ```

use crate::types::{Painting, Size};
use image::{ImageBuffer, Rgb};
use std::path::Path;
use tempfile::TempDir;

pub const CONFIG_TOML: &str = r#"
[site]
name = "Lulu Tracy"
author = "Lulu Tracy"
url = "https://lulutracy.com"

[i18n]
languages = ["en", "zh"]
default_language = "en"

[images]
sizes = [32, 64]
quality = 80

[thumbnails]
size = 24
"#;

pub const EN_PAINTINGS: &str = r#"
paintings:
  - title: Night Hours
    description: Blue hour over the river
    alt: A river at dusk under a deep blue sky
    dimensions: { width: 60, height: 80, unit: cm }
    substrate: linen
    substrateSize: { width: 65, height: 85, unit: cm }
    medium: Oil
    year: "2023"
    order: 2
  - title: Symbiosis
    description: Two forms growing into one
    alt: Interlocking green shapes
    dimensions: { width: 50, height: 50, unit: cm }
    substrate: canvas
    substrateSize: { width: 50, height: 50, unit: cm }
    medium: Acrylic
    year: 2021
    order: 1
  - title: Nature Study III
    description: Ferns after rain
    alt: Fern leaves with water droplets
    dimensions: "30 × 40 cm"
    substrate: paper
    substrateSize: "35 × 45 cm"
    medium: Ink
    year: "2022"
    order: 3
"#;

pub const ZH_PAINTINGS: &str = r#"
paintings:
  - title: 夜晚时光
    description: 河上的蓝色时刻
    alt: 深蓝天空下黄昏的河流
    dimensions: { width: 60, height: 80, unit: cm }
    substrate: 亚麻布
    substrateSize: { width: 65, height: 85, unit: cm }
    medium: 油画
    year: "2023"
    order: 2
  - title: 共生
    description: 两种形态融为一体
    alt: 交错的绿色形状
    dimensions: { width: 50, height: 50, unit: cm }
    substrate: 画布
    substrateSize: { width: 50, height: 50, unit: cm }
    medium: 丙烯
    year: "2021"
    order: 1
  - title: 自然习作三
    description: 雨后的蕨类
    alt: 带水珠的蕨叶
    dimensions: "30 × 40 cm"
    substrate: 纸
    substrateSize: "35 × 45 cm"
    medium: 水墨
    year: "2022"
    order: 3
"#;

/// Write `content` to `root/rel`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

/// A temp content directory with config, two languages, and three paintings.
///
/// No images are written; use [`write_jpeg`] when a test needs them.
pub fn setup_content() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_file(root, "config.toml", CONFIG_TOML);
    write_file(
        root,
        "site/en.yaml",
        "site:\n  tagline: Paintings in oil and ink\n  description: The portfolio of Lulu Tracy\n",
    );
    write_file(root, "site/zh.yaml", "site:\n  tagline: 油画与水墨作品\n");
    write_file(root, "paintings/en.yaml", EN_PAINTINGS);
    write_file(root, "paintings/zh.yaml", ZH_PAINTINGS);
    write_file(
        root,
        "about/en.md",
        "# About\n\nLulu paints **slowly**, mostly at night.",
    );
    tmp
}

/// Write a synthetic gradient JPEG of the given size.
pub fn write_jpeg(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    let img = ImageBuffer::from_fn(width, height, |x, y| {
        Rgb([(x * 255 / width.max(1)) as u8, (y * 255 / height.max(1)) as u8, 128])
    });
    img.save_with_format(path, image::ImageFormat::Jpeg).unwrap();
}

/// A minimal painting with just a title and order.
pub fn painting(title: &str, order: i64) -> Painting {
    Painting {
        title: title.to_string(),
        description: format!("About {title}"),
        alt: title.to_string(),
        dimensions: Size::Measured {
            width: 40.0,
            height: 50.0,
            unit: "cm".to_string(),
        },
        substrate: "canvas".to_string(),
        substrate_size: Size::Text("45 × 55 cm".to_string()),
        medium: "Oil".to_string(),
        year: "2024".to_string(),
        order,
    }
}
