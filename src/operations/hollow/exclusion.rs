use crate::brush::{Brush, Face};
use crate::math::{vector_equal_epsilon, Vector3, NORMAL_MATCH_EPSILON};

/// Margin keeping the extremal faces along the exclusion axis out of range.
const EXTREMAL_MARGIN: f64 = 0.001;

/// Decides which faces of one brush take part in hollowing or offsetting.
///
/// With an exclusion axis, the faces whose normals point furthest along or
/// against the axis are skipped. Without one, faces whose normals match an
/// explicitly selected face are skipped. The dot-product range is gathered
/// from the brush the filter is built for and is not shared between brushes.
#[derive(Debug, Clone)]
pub struct ExclusionFilter {
    axis: Vector3,
    min_dot: f64,
    max_dot: f64,
    excluded_normals: Vec<Vector3>,
}

impl ExclusionFilter {
    /// Builds the filter for `brush`.
    ///
    /// A zero `axis` selects exclusion by `selected_face_normals`.
    #[must_use]
    pub fn new(brush: &Brush, axis: &Vector3, selected_face_normals: &[Vector3]) -> Self {
        let mut filter = Self {
            axis: *axis,
            min_dot: 0.0,
            max_dot: 0.0,
            excluded_normals: Vec::new(),
        };

        if axis.norm_squared() > 0.0 {
            for normal in brush.faces().iter().filter_map(Face::normal) {
                let dot = normal.dot(axis);
                filter.min_dot = filter.min_dot.min(dot);
                filter.max_dot = filter.max_dot.max(dot);
            }
        } else {
            filter.excluded_normals = selected_face_normals.to_vec();
        }
        filter
    }

    /// Returns `true` if `face` should be processed.
    #[must_use]
    pub fn includes(&self, face: &Face) -> bool {
        let Some(normal) = face.normal() else {
            return false;
        };
        let dot = normal.dot(&self.axis);
        let in_range = dot.abs() <= f64::EPSILON
            || (dot > self.min_dot + EXTREMAL_MARGIN && dot < self.max_dot - EXTREMAL_MARGIN);
        in_range
            && !self
                .excluded_normals
                .iter()
                .any(|excluded| vector_equal_epsilon(excluded, normal, NORMAL_MATCH_EPSILON))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::brush::TextureProjection;
    use crate::geometry::Plane3;
    use crate::math::Point3;

    fn unit_cube() -> Brush {
        Brush::cuboid(Point3::origin(), Point3::new(1.0, 1.0, 1.0), "base")
    }

    fn included(filter: &ExclusionFilter, brush: &Brush) -> Vec<usize> {
        (0..brush.len())
            .filter(|&i| filter.includes(&brush.faces()[i]))
            .collect()
    }

    #[test]
    fn no_axis_no_selection_includes_all() {
        let brush = unit_cube();
        let filter = ExclusionFilter::new(&brush, &Vector3::zeros(), &[]);
        assert_eq!(included(&filter, &brush), [0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn axis_excludes_extremal_faces() {
        let brush = unit_cube();
        let filter = ExclusionFilter::new(&brush, &Vector3::z(), &[]);
        assert_eq!(included(&filter, &brush), [0, 1, 2, 3]);
    }

    #[test]
    fn axis_keeps_intermediate_slopes() {
        let mut brush = unit_cube();
        let slope = Plane3::new(Vector3::new(1.0, 0.0, 1.0), 1.5).unwrap();
        brush.add_face(Face::from_plane(&slope, "base", TextureProjection::default()));
        let filter = ExclusionFilter::new(&brush, &Vector3::z(), &[]);
        assert!(filter.includes(&brush.faces()[6]));
        assert!(!filter.includes(&brush.faces()[5]));
    }

    #[test]
    fn selected_normals_are_excluded() {
        let brush = unit_cube();
        let selected = [Vector3::z(), -Vector3::x()];
        let filter = ExclusionFilter::new(&brush, &Vector3::zeros(), &selected);
        assert_eq!(included(&filter, &brush), [1, 2, 3, 4]);
    }

    #[test]
    fn selected_normals_ignored_with_axis() {
        let brush = unit_cube();
        let filter = ExclusionFilter::new(&brush, &Vector3::x(), &[Vector3::y()]);
        assert_eq!(included(&filter, &brush), [2, 3, 4, 5]);
    }
}
