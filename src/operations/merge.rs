use crate::brush::{shader_equal, Brush, ContributingFace, MAX_FACES};
use crate::error::{OperationError, Result};
use crate::geometry::planes_concave;

/// Fuses convex brushes that share boundary faces into one convex brush.
///
/// Gathers the outer faces of all inputs: faces that sit directly against a
/// face of another input are internal seams and are dropped, duplicate
/// planes keep their first face. The merge fails if any two gathered faces
/// cut through each other, since the hull would then not be convex.
pub struct Merge<'a> {
    inputs: &'a [Brush],
    only_shape: bool,
}

impl<'a> Merge<'a> {
    /// Creates a new `Merge` operation over `inputs`.
    ///
    /// By default coincident faces must agree on their shader.
    #[must_use]
    pub fn new(inputs: &'a [Brush]) -> Self {
        Self {
            inputs,
            only_shape: false,
        }
    }

    /// When `true`, coincident faces with different shaders are allowed.
    #[must_use]
    pub fn only_shape(mut self, only_shape: bool) -> Self {
        self.only_shape = only_shape;
        self
    }

    /// Executes the merge, returning the fused brush.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::NotConvex`] if the result would not be convex,
    /// [`OperationError::ShaderMismatch`] if coincident faces disagree on their
    /// shader outside shape-only mode, and [`OperationError::TooManyFaces`] if
    /// the result would exceed [`MAX_FACES`].
    pub fn execute(&self) -> Result<Brush> {
        let mut gathered: Vec<ContributingFace<'_>> = Vec::new();

        for (i, brush) in self.inputs.iter().enumerate() {
            for candidate in brush.contributing_faces() {
                if self.is_seam(i, &candidate) {
                    continue;
                }
                if self.is_duplicate(&candidate, &gathered)? {
                    continue;
                }
                gathered.push(candidate);
            }
        }

        assemble(&gathered, MAX_FACES)
    }

    /// A face opposing any face of another input is an internal seam.
    fn is_seam(&self, owner: usize, candidate: &ContributingFace<'_>) -> bool {
        self.inputs
            .iter()
            .enumerate()
            .filter(|(k, _)| *k != owner)
            .flat_map(|(_, other)| other.faces())
            .filter_map(|face| face.plane())
            .any(|plane| candidate.plane.opposes(plane))
    }

    /// Checks `candidate` against the faces gathered so far.
    ///
    /// Returns `Ok(true)` if an equal plane was already gathered.
    fn is_duplicate(
        &self,
        candidate: &ContributingFace<'_>,
        gathered: &[ContributingFace<'_>],
    ) -> Result<bool> {
        for kept in gathered {
            if candidate.plane.equals(kept.plane) {
                if !self.only_shape && !shader_equal(candidate.face.shader(), kept.face.shader()) {
                    return Err(OperationError::ShaderMismatch {
                        first: kept.face.shader().to_owned(),
                        second: candidate.face.shader().to_owned(),
                    }
                    .into());
                }
                return Ok(true);
            }
            if planes_concave(candidate.winding, kept.winding, candidate.plane, kept.plane) {
                return Err(OperationError::NotConvex.into());
            }
        }
        Ok(false)
    }
}

/// Builds a brush from the gathered faces, failing if there are more than
/// `max_faces` of them.
fn assemble(faces: &[ContributingFace<'_>], max_faces: usize) -> Result<Brush> {
    if faces.len() > max_faces {
        return Err(OperationError::TooManyFaces { max: max_faces }.into());
    }
    let mut merged = Brush::new();
    for face in faces {
        merged.add_face(face.face.clone());
    }
    merged.remove_empty_faces();
    Ok(merged)
}
