use crate::brush::Brush;

/// Computes the volume of a brush.
///
/// Fans every contributing face polygon into triangles and sums the signed
/// tetrahedra they form with the first boundary point. Windings run
/// counter-clockwise seen from outside, so every term is non-negative
/// for a convex brush.
pub struct Volume<'a> {
    brush: &'a Brush,
}

impl<'a> Volume<'a> {
    /// Creates a new `Volume` query.
    #[must_use]
    pub fn new(brush: &'a Brush) -> Self {
        Self { brush }
    }

    /// Executes the query, returning the enclosed volume.
    #[must_use]
    pub fn execute(&self) -> f64 {
        let mut faces = self.brush.contributing_faces().peekable();
        let Some(apex) = faces.peek().and_then(|face| face.winding.points().first().copied())
        else {
            return 0.0;
        };

        let mut six_volume = 0.0;
        for face in faces {
            let points = face.winding.points();
            let v0 = points[0] - apex;
            for pair in points[1..].windows(2) {
                let v1 = pair[0] - apex;
                let v2 = pair[1] - apex;
                six_volume += v0.dot(&v1.cross(&v2));
            }
        }
        six_volume.abs() / 6.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::brush::{Face, TextureProjection};
    use crate::geometry::Plane3;
    use crate::math::{Point3, Vector3};
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn box_volume() {
        let brush = Brush::cuboid(p(0.0, 0.0, 0.0), p(2.0, 3.0, 4.0), "base");
        assert_relative_eq!(Volume::new(&brush).execute(), 24.0, epsilon = 1e-6);
    }

    #[test]
    fn wedge_volume() {
        let mut brush = Brush::cuboid(p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0), "base");
        let plane = Plane3::new(Vector3::new(1.0, 0.0, 1.0), 1.0).unwrap();
        brush.add_face(Face::from_plane(&plane, "cut", TextureProjection::default()));
        assert_relative_eq!(Volume::new(&brush).execute(), 0.5, epsilon = 1e-6);
    }

    #[test]
    fn empty_brush_has_no_volume() {
        assert_relative_eq!(Volume::new(&Brush::new()).execute(), 0.0);
    }
}
