//! Pure dimension math, testable without images.

/// One responsive size to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponsiveSize {
    /// Requested size of the longer edge; names the output directory.
    pub target: u32,
    pub width: u32,
    pub height: u32,
}

/// Which configured sizes to generate for an image, with output dimensions.
///
/// Sizes larger than the original's longer edge are skipped (no upscaling).
/// If every size is too large, the original size is the only entry.
/// Duplicate sizes collapse to one.
pub fn calculate_responsive_sizes(original: (u32, u32), sizes: &[u32]) -> Vec<ResponsiveSize> {
    let (orig_w, orig_h) = original;
    let longer_edge = orig_w.max(orig_h);

    let mut targets: Vec<u32> = sizes
        .iter()
        .copied()
        .filter(|&size| size > 0 && size <= longer_edge)
        .collect();
    targets.sort_unstable();
    targets.dedup();

    if targets.is_empty() {
        return vec![ResponsiveSize {
            target: longer_edge,
            width: orig_w,
            height: orig_h,
        }];
    }

    targets
        .into_iter()
        .map(|target| {
            let (width, height) = scale_longer_edge(original, target);
            ResponsiveSize {
                target,
                width,
                height,
            }
        })
        .collect()
}

/// Scale so the longer edge equals `target`, preserving aspect ratio.
fn scale_longer_edge((w, h): (u32, u32), target: u32) -> (u32, u32) {
    if w >= h {
        let ratio = target as f64 / w as f64;
        (target, ((h as f64 * ratio).round() as u32).max(1))
    } else {
        let ratio = target as f64 / h as f64;
        (((w as f64 * ratio).round() as u32).max(1), target)
    }
}
