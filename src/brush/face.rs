use serde::{Deserialize, Serialize};

use crate::geometry::{plane_basis, Plane3};
use crate::math::{Point3, Vector3};

/// Texture alignment carried by a face.
///
/// The CSG engines never interpret it; they copy it onto derived faces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureProjection {
    pub shift: [f64; 2],
    pub rotate: f64,
    pub scale: [f64; 2],
}

impl Default for TextureProjection {
    fn default() -> Self {
        Self {
            shift: [0.0, 0.0],
            rotate: 0.0,
            scale: [0.5, 0.5],
        }
    }
}

/// Compares shader names the way the renderer resolves them (case-insensitive).
#[must_use]
pub fn shader_equal(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// One bounding plane of a brush with its surface binding.
///
/// The plane is defined by three points running counter-clockwise when
/// viewed from outside the brush. Collinear points leave the face without
/// a plane; such a face never contributes to the brush's boundary.
#[derive(Debug, Clone)]
pub struct Face {
    points: [Point3; 3],
    plane: Option<Plane3>,
    shader: String,
    projection: TextureProjection,
}

impl Face {
    /// Creates a face from three plane points.
    #[must_use]
    pub fn from_points(
        points: [Point3; 3],
        shader: impl Into<String>,
        projection: TextureProjection,
    ) -> Self {
        let plane = Plane3::try_from_points(&points[0], &points[1], &points[2]);
        Self {
            points,
            plane,
            shader: shader.into(),
            projection,
        }
    }

    /// Creates a face lying on `plane`, facing the same way.
    #[must_use]
    pub fn from_plane(
        plane: &Plane3,
        shader: impl Into<String>,
        projection: TextureProjection,
    ) -> Self {
        let (u, v) = plane_basis(plane.normal());
        let origin = Point3::from(plane.normal() * plane.dist());
        Self {
            points: [origin, origin + u, origin + u + v],
            plane: Some(*plane),
            shader: shader.into(),
            projection,
        }
    }

    /// Returns the three points defining the plane.
    #[must_use]
    pub fn points(&self) -> &[Point3; 3] {
        &self.points
    }

    /// Returns the face plane, or `None` if the points are degenerate.
    #[must_use]
    pub fn plane(&self) -> Option<&Plane3> {
        self.plane.as_ref()
    }

    /// Returns the outward normal, or `None` if the points are degenerate.
    #[must_use]
    pub fn normal(&self) -> Option<&Vector3> {
        self.plane.as_ref().map(Plane3::normal)
    }

    /// Returns the shader name.
    #[must_use]
    pub fn shader(&self) -> &str {
        &self.shader
    }

    /// Replaces the shader name.
    pub fn set_shader(&mut self, shader: impl Into<String>) {
        self.shader = shader.into();
    }

    /// Returns the texture projection.
    #[must_use]
    pub fn projection(&self) -> &TextureProjection {
        &self.projection
    }

    /// Reverses the point order so the face looks the other way.
    pub fn flip(&mut self) {
        self.points.swap(0, 2);
        self.update_plane();
    }

    /// Moves the face along its normal by `offset` (outward when positive).
    pub fn offset(&mut self, offset: f64) {
        let Some(normal) = self.normal().copied() else {
            return;
        };
        for point in &mut self.points {
            *point += normal * offset;
        }
        self.update_plane();
    }

    fn update_plane(&mut self) {
        self.plane = Plane3::try_from_points(&self.points[0], &self.points[1], &self.points[2]);
    }
}
