//! Bounding boxes and the hole geometry derived from them.

/// Inclusive axis-aligned pixel bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    /// Leftmost column.
    pub min_x: u32,
    /// Topmost row.
    pub min_y: u32,
    /// Rightmost column.
    pub max_x: u32,
    /// Bottom row.
    pub max_y: u32,
}

impl BoundingBox {
    /// A box covering exactly one pixel.
    #[must_use]
    pub fn from_point(x: u32, y: u32) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    /// Grow the box so it covers `(x, y)`.
    pub fn include(&mut self, x: u32, y: u32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    /// Whether `(x, y)` lies inside the box.
    #[must_use]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
    }
}

/// Fold `(x, y)` into an optional running box, starting one if needed.
pub(crate) fn extend(bounds: &mut Option<BoundingBox>, x: u32, y: u32) {
    match bounds {
        Some(b) => b.include(x, y),
        None => *bounds = Some(BoundingBox::from_point(x, y)),
    }
}

/// Geometry reported for a located hole.
///
/// `width` and `height` are coordinate spans (`max - min`), so a single
/// pixel hole has size `0 x 0`. The center uses floor division and the
/// radius is half the width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoleGeometry {
    /// Leftmost column.
    pub min_x: u32,
    /// Topmost row.
    pub min_y: u32,
    /// Rightmost column.
    pub max_x: u32,
    /// Bottom row.
    pub max_y: u32,
    /// `min_x + width / 2`.
    pub center_x: u32,
    /// `min_y + height / 2`.
    pub center_y: u32,
    /// `max_x - min_x`.
    pub width: u32,
    /// `max_y - min_y`.
    pub height: u32,
    /// `width / 2`.
    pub radius: u32,
}

impl HoleGeometry {
    /// The bounds this geometry was derived from.
    #[must_use]
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox {
            min_x: self.min_x,
            min_y: self.min_y,
            max_x: self.max_x,
            max_y: self.max_y,
        }
    }
}

impl From<BoundingBox> for HoleGeometry {
    fn from(b: BoundingBox) -> Self {
        let width = b.max_x - b.min_x;
        let height = b.max_y - b.min_y;
        Self {
            min_x: b.min_x,
            min_y: b.min_y,
            max_x: b.max_x,
            max_y: b.max_y,
            center_x: b.min_x + width / 2,
            center_y: b.min_y + height / 2,
            width,
            height,
            radius: width / 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extend_starts_and_grows_box() {
        let mut bounds = None;
        extend(&mut bounds, 5, 7);
        assert_eq!(bounds, Some(BoundingBox::from_point(5, 7)));

        extend(&mut bounds, 2, 9);
        extend(&mut bounds, 8, 1);
        let b = bounds.unwrap();
        assert_eq!((b.min_x, b.min_y, b.max_x, b.max_y), (2, 1, 8, 9));
        assert!(b.contains(2, 1));
        assert!(b.contains(8, 9));
        assert!(!b.contains(9, 5));
    }

    #[test]
    fn geometry_uses_floor_division() {
        let g = HoleGeometry::from(BoundingBox {
            min_x: 3,
            min_y: 3,
            max_x: 6,
            max_y: 6,
        });
        assert_eq!((g.center_x, g.center_y), (4, 4));
        assert_eq!((g.width, g.height), (3, 3));
        assert_eq!(g.radius, 1);
    }

    #[test]
    fn radius_follows_width_not_height() {
        let g = HoleGeometry::from(BoundingBox {
            min_x: 100,
            min_y: 20,
            max_x: 501,
            max_y: 900,
        });
        assert_eq!(g.width, 401);
        assert_eq!(g.radius, 200);
        assert_eq!(g.center_x, 300);
        assert_eq!(g.center_y, 460);
        assert_eq!(g.bounds().max_y, 900);
    }

    #[test]
    fn single_pixel_box_has_zero_size() {
        let g = HoleGeometry::from(BoundingBox::from_point(4, 4));
        assert_eq!((g.width, g.height, g.radius), (0, 0, 0));
        assert_eq!((g.center_x, g.center_y), (4, 4));
    }
}
