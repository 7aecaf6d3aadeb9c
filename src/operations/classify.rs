use crate::brush::Brush;
use crate::geometry::{Plane3, SplitCounts};

/// Where a brush lies relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrushClassification {
    /// Every boundary point is in front of or on the plane.
    Front,
    /// Every boundary point is behind or on the plane.
    Back,
    /// The plane cuts through the brush.
    Spanning,
    /// No boundary point is off the plane (or the brush is empty).
    On,
}

impl BrushClassification {
    /// Derives the classification from point counts.
    #[must_use]
    pub fn from_counts(counts: &SplitCounts) -> Self {
        match (counts.front != 0, counts.back != 0) {
            (true, true) => Self::Spanning,
            (true, false) => Self::Front,
            (false, true) => Self::Back,
            (false, false) => Self::On,
        }
    }
}

/// Counts the boundary points of `brush` on each side of `plane`.
///
/// Every vertex of every contributing face is counted once per face,
/// so shared corners are counted several times.
#[must_use]
pub fn classify_plane(brush: &Brush, plane: &Plane3) -> SplitCounts {
    let mut counts = SplitCounts::default();
    for face in brush.contributing_faces() {
        counts += face.winding.classify_plane(plane);
    }
    counts
}

/// Classifies `brush` as a whole against `plane`.
#[must_use]
pub fn classify_brush(brush: &Brush, plane: &Plane3) -> BrushClassification {
    BrushClassification::from_counts(&classify_plane(brush, plane))
}

/// Returns `true` if the brush lies entirely behind (or on) the plane,
/// or entirely in front of (or on) it when `flipped`.
#[must_use]
pub fn test_plane(brush: &Brush, plane: &Plane3, flipped: bool) -> bool {
    brush
        .contributing_faces()
        .all(|face| face.winding.test_plane(plane, flipped))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Point3, Vector3};

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn unit_cube() -> Brush {
        Brush::cuboid(p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0), "base")
    }

    #[test]
    fn brush_behind_plane() {
        let plane = Plane3::new(Vector3::z(), 2.0).unwrap();
        let brush = unit_cube();
        let counts = classify_plane(&brush, &plane);
        assert!(counts.back > 0);
        assert_eq!(counts.front, 0);
        assert!(test_plane(&brush, &plane, false));
        assert!(!test_plane(&brush, &plane, true));
        assert_eq!(classify_brush(&brush, &plane), BrushClassification::Back);
    }

    #[test]
    fn brush_spanning_plane() {
        let plane = Plane3::new(Vector3::z(), 0.5).unwrap();
        let brush = unit_cube();
        let counts = classify_plane(&brush, &plane);
        assert!(counts.is_spanning());
        assert!(!test_plane(&brush, &plane, false));
        assert!(!test_plane(&brush, &plane, true));
    }

    #[test]
    fn touching_plane_is_not_spanning() {
        let plane = Plane3::new(Vector3::z(), 1.0).unwrap();
        let counts = classify_plane(&unit_cube(), &plane);
        assert_eq!(counts.front, 0);
        // Top face: 4 points, 4 side faces: 2 each.
        assert_eq!(counts.on, 12);
        assert_eq!(classify_brush(&unit_cube(), &plane), BrushClassification::Back);
    }

    #[test]
    fn brush_in_front_of_plane() {
        let plane = Plane3::new(Vector3::z(), -1.0).unwrap();
        assert_eq!(classify_brush(&unit_cube(), &plane), BrushClassification::Front);
        assert!(test_plane(&unit_cube(), &plane, true));
    }
}
