mod brep;
pub mod face;

pub use face::{shader_equal, Face, TextureProjection};

use std::cell::OnceCell;

use crate::geometry::{Plane3, Winding};
use crate::math::{Point3, Vector3};

/// Maximum number of faces a brush may hold.
pub const MAX_FACES: usize = 1024;

/// A contributing face together with its plane and boundary polygon.
#[derive(Debug, Clone, Copy)]
pub struct ContributingFace<'a> {
    pub index: usize,
    pub face: &'a Face,
    pub plane: &'a Plane3,
    pub winding: &'a Winding,
}

/// A convex solid: the intersection of the half-spaces behind its faces.
///
/// Face windings are derived from the plane set on first use and dropped
/// whenever a plane is added, moved or removed.
#[derive(Debug, Clone, Default)]
pub struct Brush {
    faces: Vec<Face>,
    brep: OnceCell<Vec<Winding>>,
}

impl Brush {
    /// Creates a brush with no faces.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a brush from an ordered list of faces.
    #[must_use]
    pub fn from_faces(faces: Vec<Face>) -> Self {
        Self {
            faces,
            brep: OnceCell::new(),
        }
    }

    /// Creates an axis-aligned box between two corners.
    #[must_use]
    pub fn cuboid(min: Point3, max: Point3, shader: &str) -> Self {
        let mut brush = Self::new();
        for axis in 0..3 {
            let mut normal = Vector3::zeros();
            normal[axis] = 1.0;
            for (normal, dist) in [(-normal, -min[axis]), (normal, max[axis])] {
                if let Ok(plane) = Plane3::new(normal, dist) {
                    brush.add_face(Face::from_plane(&plane, shader, TextureProjection::default()));
                }
            }
        }
        brush
    }

    /// Returns the faces in order.
    #[must_use]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Returns the face at `index`.
    #[must_use]
    pub fn face(&self, index: usize) -> Option<&Face> {
        self.faces.get(index)
    }

    /// Returns the face at `index` for modification.
    ///
    /// The boundary representation is re-derived on next use.
    pub fn face_mut(&mut self, index: usize) -> Option<&mut Face> {
        self.brep.take();
        self.faces.get_mut(index)
    }

    /// Replaces the shader of the face at `index`; geometry is unaffected.
    pub fn set_face_shader(&mut self, index: usize, shader: &str) {
        if let Some(face) = self.faces.get_mut(index) {
            face.set_shader(shader);
        }
    }

    /// Number of faces, contributing or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Returns `true` if the brush has no faces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Appends a copy of `face`, returning it for further adjustment.
    ///
    /// Returns `None` when the brush already holds [`MAX_FACES`] faces.
    pub fn add_face(&mut self, face: Face) -> Option<&mut Face> {
        if self.faces.len() >= MAX_FACES {
            return None;
        }
        self.brep.take();
        self.faces.push(face);
        self.faces.last_mut()
    }

    /// Appends a face through three points.
    pub fn add_plane(
        &mut self,
        points: [Point3; 3],
        shader: &str,
        projection: &TextureProjection,
    ) -> Option<&mut Face> {
        self.add_face(Face::from_points(points, shader, projection.clone()))
    }

    /// Removes every face.
    pub fn clear(&mut self) {
        self.brep.take();
        self.faces.clear();
    }

    /// Returns the winding of every face, evaluating the boundary if needed.
    pub fn windings(&self) -> &[Winding] {
        self.brep.get_or_init(|| brep::build_windings(&self.faces))
    }

    /// Evaluates the boundary representation. Repeated calls are free.
    pub fn evaluate_brep(&self) {
        self.windings();
    }

    /// Returns the winding of the face at `index`.
    #[must_use]
    pub fn winding(&self, index: usize) -> Option<&Winding> {
        self.windings().get(index)
    }

    /// Returns `true` if the face at `index` bounds a polygon.
    #[must_use]
    pub fn contributes(&self, index: usize) -> bool {
        self.winding(index).is_some_and(Winding::is_polygon)
    }

    /// Iterates over the faces that bound a polygon.
    pub fn contributing_faces(&self) -> impl Iterator<Item = ContributingFace<'_>> {
        self.faces
            .iter()
            .zip(self.windings())
            .enumerate()
            .filter_map(|(index, (face, winding))| {
                let plane = face.plane()?;
                winding.is_polygon().then_some(ContributingFace {
                    index,
                    face,
                    plane,
                    winding,
                })
            })
    }

    /// Returns `true` if any face bounds a polygon.
    #[must_use]
    pub fn has_contributing_faces(&self) -> bool {
        self.contributing_faces().next().is_some()
    }

    /// Drops faces that do not contribute to the boundary.
    pub fn remove_empty_faces(&mut self) {
        let keep: Vec<bool> = (0..self.faces.len()).map(|i| self.contributes(i)).collect();
        if keep.iter().all(|&k| k) {
            return;
        }
        let mut flags = keep.into_iter();
        self.faces.retain(|_| flags.next().unwrap_or(false));
        self.brep.take();
    }
}
