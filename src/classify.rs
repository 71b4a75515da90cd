//! Per-pixel hole classification.
//!
//! Frame overlays mark their photo hole in one of two ways:
//! 1. **True alpha**: the hole pixels are (partly) transparent.
//! 2. **Fake transparency**: the hole is painted with the white/grey
//!    checkerboard that editors use to preview transparency.
//!
//! The neutral-colour checks come in two tolerances. Boundary scanning uses
//! the tight grey tolerance, flood matting the wide one. They capture
//! different regions and must stay separate.

use image::Rgba;

/// Alpha below this value counts as a true hole.
pub const TRUE_HOLE_ALPHA: u8 = 250;
/// Every RGB channel must exceed this for the white tier.
pub const WHITE_FLOOR: u8 = 240;
/// Every RGB channel must exceed this for the grey tier.
pub const GREY_FLOOR: u8 = 190;
/// Maximum pairwise channel difference (exclusive) while scanning for edges.
pub const SCAN_GREY_TOLERANCE: u8 = 10;
/// Maximum pairwise channel difference (exclusive) while flood matting.
pub const MATTE_GREY_TOLERANCE: u8 = 20;

/// How a frame marks its hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationPolicy {
    /// The hole carries a real alpha channel (`a < 250`).
    TrueAlpha,
    /// The hole is painted with a neutral white/grey fill.
    NeutralColorHeuristic,
}

impl ClassificationPolicy {
    /// Whether `pixel` belongs to the hole under this policy.
    ///
    /// The neutral heuristic uses the scanning tolerance; matting has its own
    /// predicate, [`is_matte_fill`].
    #[must_use]
    pub fn accepts(self, pixel: &Rgba<u8>) -> bool {
        match self {
            Self::TrueAlpha => is_true_hole(pixel),
            Self::NeutralColorHeuristic => is_checkerboard(pixel),
        }
    }
}

/// `a < 250`.
#[must_use]
pub fn is_true_hole(pixel: &Rgba<u8>) -> bool {
    pixel[3] < TRUE_HOLE_ALPHA
}

/// Neutral fill check used by the boundary scanner (grey tolerance `< 10`).
#[must_use]
pub fn is_checkerboard(pixel: &Rgba<u8>) -> bool {
    is_neutral_fill(pixel, SCAN_GREY_TOLERANCE)
}

/// Neutral fill check used while flood matting (grey tolerance `< 20`).
#[must_use]
pub fn is_matte_fill(pixel: &Rgba<u8>) -> bool {
    is_neutral_fill(pixel, MATTE_GREY_TOLERANCE)
}

/// Two-tier neutral colour test. Alpha is ignored.
///
/// A pixel passes when it is near-white (all channels `> 240`) or a
/// near-neutral grey (all channels `> 190` and both `|r-g|` and `|g-b|`
/// below `grey_tolerance`).
#[must_use]
pub fn is_neutral_fill(pixel: &Rgba<u8>, grey_tolerance: u8) -> bool {
    let [r, g, b, _] = pixel.0;

    if r > WHITE_FLOOR && g > WHITE_FLOOR && b > WHITE_FLOOR {
        return true;
    }

    r > GREY_FLOOR
        && g > GREY_FLOOR
        && b > GREY_FLOOR
        && r.abs_diff(g) < grey_tolerance
        && g.abs_diff(b) < grey_tolerance
}
