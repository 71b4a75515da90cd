//! Seeded flood matting.
//!
//! Breadth-first region growing over 4-connected neighbours. Every in-bounds
//! neighbour of an accepted pixel is queued once, whatever its colour; only
//! pixels that pass [`is_matte_fill`] when dequeued are rewritten to
//! `(0, 0, 0, 0)`. The visited set bounds the work to one visit per pixel.
//!
//! Matted pixels are black, which the neutral-colour check rejects, so a
//! second run from the same seed changes nothing.

use std::collections::VecDeque;

use image::{Rgba, RgbaImage};

use crate::classify::is_matte_fill;
use crate::error::{Error, Result};
use crate::geometry::{self, BoundingBox};

/// Fully transparent black.
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Starting coordinate for a flood matte.
///
/// Coordinates are signed so that stale seed tables can be caught instead of
/// wrapping; [`SeedPoint::resolve`] rejects anything outside the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedPoint {
    /// Column.
    pub x: i64,
    /// Row.
    pub y: i64,
}

impl SeedPoint {
    /// Create a seed at `(x, y)`.
    #[must_use]
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Convert to pixel coordinates inside a `width x height` image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SeedOutOfBounds`] if the point is outside the image.
    pub fn resolve(self, width: u32, height: u32) -> Result<(u32, u32)> {
        let in_range = |v: i64, limit: u32| u32::try_from(v).ok().filter(|&v| v < limit);
        match (in_range(self.x, width), in_range(self.y, height)) {
            (Some(x), Some(y)) => Ok((x, y)),
            _ => Err(Error::SeedOutOfBounds {
                x: self.x,
                y: self.y,
                width,
                height,
            }),
        }
    }
}

/// Outcome of one flood matte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Matte {
    /// Colour found at the seed before matting.
    pub seed_color: Rgba<u8>,
    /// Number of pixels rewritten to transparent.
    pub pixels: usize,
    /// Tight bounds over the rewritten pixels, `None` when nothing changed.
    pub bounds: Option<BoundingBox>,
}

impl Matte {
    /// Whether the run left the image untouched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pixels == 0
    }
}

/// Flood the checkerboard region containing `seed` to full transparency.
///
/// A seed that is not on fill is a no-op and yields an empty [`Matte`].
///
/// # Errors
///
/// Returns [`Error::SeedOutOfBounds`] if `seed` lies outside the image.
pub fn flood_matte(image: &mut RgbaImage, seed: SeedPoint) -> Result<Matte> {
    let (width, height) = image.dimensions();
    let (sx, sy) = seed.resolve(width, height)?;
    let seed_color = *image.get_pixel(sx, sy);
    tracing::debug!(
        "seed ({sx}, {sy}) samples RGBA({}, {}, {}, {})",
        seed_color[0],
        seed_color[1],
        seed_color[2],
        seed_color[3]
    );

    let w = width as usize;
    let mut visited = vec![false; w * height as usize];
    let mut queue = VecDeque::new();
    let start = sy as usize * w + sx as usize;
    visited[start] = true;
    queue.push_back(start);

    let mut bounds = None;
    let mut pixels = 0usize;

    while let Some(idx) = queue.pop_front() {
        // Indices come from in-bounds u32 coordinates.
        #[allow(clippy::cast_possible_truncation)]
        let (x, y) = ((idx % w) as u32, (idx / w) as u32);

        let px = image.get_pixel_mut(x, y);
        if !is_matte_fill(px) {
            continue;
        }
        *px = TRANSPARENT;
        geometry::extend(&mut bounds, x, y);
        pixels += 1;

        let mut push = |n: usize| {
            if !visited[n] {
                visited[n] = true;
                queue.push_back(n);
            }
        };
        if x > 0 {
            push(idx - 1);
        }
        if x + 1 < width {
            push(idx + 1);
        }
        if y > 0 {
            push(idx - w);
        }
        if y + 1 < height {
            push(idx + w);
        }
    }

    tracing::debug!("matted {pixels} pixels, bounds {bounds:?}");
    Ok(Matte {
        seed_color,
        pixels,
        bounds,
    })
}
