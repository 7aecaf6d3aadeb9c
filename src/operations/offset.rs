use crate::brush::Brush;
use crate::math::Vector3;
use crate::operations::hollow::ExclusionFilter;

/// Moves the faces of a brush along their normals.
///
/// Faces left out by the exclusion axis or matching a selected face stay in
/// place, so a brush can grow or shrink on some sides only.
pub struct OffsetFaces<'a> {
    offset: f64,
    exclusion_axis: Vector3,
    selected_face_normals: &'a [Vector3],
}

impl<'a> OffsetFaces<'a> {
    /// Creates a new `OffsetFaces` operation. A positive `offset` expands.
    #[must_use]
    pub fn new(offset: f64) -> Self {
        Self {
            offset,
            exclusion_axis: Vector3::zeros(),
            selected_face_normals: &[],
        }
    }

    /// Leaves the faces most aligned with `axis` in place.
    #[must_use]
    pub fn exclusion_axis(mut self, axis: Vector3) -> Self {
        self.exclusion_axis = axis;
        self
    }

    /// Leaves faces with these normals in place when no axis is set.
    #[must_use]
    pub fn selected_face_normals(mut self, normals: &'a [Vector3]) -> Self {
        self.selected_face_normals = normals;
        self
    }

    /// Executes the offset in place and returns the number of faces moved.
    pub fn execute(&self, brush: &mut Brush) -> usize {
        let filter = ExclusionFilter::new(brush, &self.exclusion_axis, self.selected_face_normals);
        let mut moved = 0;
        for i in 0..brush.len() {
            if !filter.includes(&brush.faces()[i]) {
                continue;
            }
            if let Some(face) = brush.face_mut(i) {
                face.offset(self.offset);
                moved += 1;
            }
        }
        moved
    }
}
