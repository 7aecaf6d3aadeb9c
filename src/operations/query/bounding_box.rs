use crate::brush::Brush;
use crate::geometry::Aabb;

/// Computes the axis-aligned bounding box of a brush.
pub struct BoundingBox<'a> {
    brush: &'a Brush,
}

impl<'a> BoundingBox<'a> {
    /// Creates a new `BoundingBox` query.
    #[must_use]
    pub fn new(brush: &'a Brush) -> Self {
        Self { brush }
    }

    /// Executes the query over the contributing face polygons.
    ///
    /// Returns `None` for a brush without contributing faces.
    #[must_use]
    pub fn execute(&self) -> Option<Aabb> {
        Aabb::from_points(
            self.brush
                .contributing_faces()
                .flat_map(|face| face.winding.points()),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;

    #[test]
    fn cuboid_bounds() {
        let brush = Brush::cuboid(Point3::new(-1.0, 0.0, 2.0), Point3::new(3.0, 1.0, 4.0), "base");
        let aabb = BoundingBox::new(&brush).execute().unwrap();
        approx::assert_relative_eq!(aabb.min, Point3::new(-1.0, 0.0, 2.0), epsilon = 1e-9);
        approx::assert_relative_eq!(aabb.max, Point3::new(3.0, 1.0, 4.0), epsilon = 1e-9);
    }

    #[test]
    fn empty_brush_has_no_bounds() {
        assert!(BoundingBox::new(&Brush::new()).execute().is_none());
    }
}
