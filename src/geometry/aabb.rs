use crate::math::Point3;

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

impl Aabb {
    /// Smallest box containing every point, or `None` if there are none.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = *points.next()?;
        let mut aabb = Self {
            min: first,
            max: first,
        };
        for point in points {
            aabb.min = aabb.min.inf(point);
            aabb.max = aabb.max.sup(point);
        }
        Some(aabb)
    }

    /// Returns `true` if the interiors of the boxes overlap.
    ///
    /// Boxes that only touch do not intersect.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        (0..3).all(|axis| self.min[axis] < other.max[axis] && other.min[axis] < self.max[axis])
    }
}
