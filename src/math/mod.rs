/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Distance within which a point is classified as lying on a plane.
pub const ON_EPSILON: f64 = 1.0 / 256.0;

/// Per-component tolerance for comparing plane normals.
pub const PLANE_NORMAL_EPSILON: f64 = 1e-4;

/// Tolerance for comparing plane distances.
pub const PLANE_DIST_EPSILON: f64 = 0.02;

/// Tolerance used when matching face normals exactly enough to be parallel.
pub const NORMAL_MATCH_EPSILON: f64 = 1e-6;

/// Half-extent of the largest polygon a plane can produce.
pub const WORLD_EXTENT: f64 = 131_072.0;

/// Returns `true` if every component of `a` and `b` differs by at most `epsilon`.
#[must_use]
pub fn vector_equal_epsilon(a: &Vector3, b: &Vector3, epsilon: f64) -> bool {
    (a - b).iter().all(|c| c.abs() <= epsilon)
}
