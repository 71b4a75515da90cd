//! Hole boundary scanning.
//!
//! Two strategies, tried in order:
//! 1. **Full scan** ([`scan_true_alpha`]): every pixel, row-major, under the
//!    true-alpha policy. Holes are not assumed to be contiguous.
//! 2. **Axis scan** ([`scan_axes`]): from the image center outward along the
//!    horizontal and vertical center lines, stopping at the first pixel that
//!    is not checkerboard fill. Assumes a roughly centered hole that is
//!    convex along both axes; off-center or irregular holes are misreported.

use image::RgbaImage;

use crate::classify::{is_checkerboard, is_true_hole, ClassificationPolicy};
use crate::geometry::{self, BoundingBox, HoleGeometry};

/// A located hole and the policy that found it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoleDetection {
    /// Which classification located the hole.
    pub policy: ClassificationPolicy,
    /// The derived geometry.
    pub geometry: HoleGeometry,
}

impl HoleDetection {
    /// Whether the axis-scan fallback produced this detection.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.policy == ClassificationPolicy::NeutralColorHeuristic
    }
}

/// Full-frame scan for truly transparent pixels.
///
/// Returns `None` when no pixel has `a < 250`.
#[must_use]
pub fn scan_true_alpha(image: &RgbaImage) -> Option<HoleGeometry> {
    let mut bounds = None;
    for (x, y, pixel) in image.enumerate_pixels() {
        if is_true_hole(pixel) {
            geometry::extend(&mut bounds, x, y);
        }
    }
    bounds.map(HoleGeometry::from)
}

/// Axis scan outward from `(width / 2, height / 2)` over checkerboard fill.
///
/// Each edge is the last fill pixel before the first non-fill pixel in that
/// direction. A scan that runs off the image clamps to the first or last
/// row/column. Returns `None` when the center pixel itself is not fill.
#[must_use]
pub fn scan_axes(image: &RgbaImage) -> Option<HoleGeometry> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return None;
    }

    let (cx, cy) = (width / 2, height / 2);
    let fill = |x: u32, y: u32| is_checkerboard(image.get_pixel(x, y));
    if !fill(cx, cy) {
        return None;
    }

    let min_x = (0..cx).rev().find(|&x| !fill(x, cy)).map_or(0, |x| x + 1);
    let max_x = (cx + 1..width)
        .find(|&x| !fill(x, cy))
        .map_or(width - 1, |x| x - 1);
    let min_y = (0..cy).rev().find(|&y| !fill(cx, y)).map_or(0, |y| y + 1);
    let max_y = (cy + 1..height)
        .find(|&y| !fill(cx, y))
        .map_or(height - 1, |y| y - 1);

    Some(HoleGeometry::from(BoundingBox {
        min_x,
        min_y,
        max_x,
        max_y,
    }))
}

/// Locate the hole: full true-alpha scan first, axis scan as fallback.
#[must_use]
pub fn locate_hole(image: &RgbaImage) -> Option<HoleDetection> {
    if let Some(geometry) = scan_true_alpha(image) {
        return Some(HoleDetection {
            policy: ClassificationPolicy::TrueAlpha,
            geometry,
        });
    }

    tracing::debug!("no transparent pixels, falling back to axis scan");
    scan_axes(image).map(|geometry| HoleDetection {
        policy: ClassificationPolicy::NeutralColorHeuristic,
        geometry,
    })
}
