use crate::error::{GeometryError, Result};
use crate::math::{
    vector_equal_epsilon, Point3, Vector3, ON_EPSILON, PLANE_DIST_EPSILON, PLANE_NORMAL_EPSILON,
};

/// Side of a plane a point lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneSide {
    Front,
    Back,
    On,
}

impl PlaneSide {
    /// Classifies a signed distance with the given tolerance.
    #[must_use]
    pub fn from_distance(distance: f64, epsilon: f64) -> Self {
        if distance > epsilon {
            Self::Front
        } else if distance < -epsilon {
            Self::Back
        } else {
            Self::On
        }
    }
}

/// A half-space boundary: all points `p` with `normal . p == dist`.
///
/// The normal points out of the half-space a brush keeps, so the inside
/// of a face is the region where [`Plane3::distance_to_point`] is negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane3 {
    normal: Vector3,
    dist: f64,
}

impl Plane3 {
    /// Creates a plane from a normal and a signed distance from the origin.
    ///
    /// # Errors
    ///
    /// Returns an error if the normal is zero-length.
    pub fn new(normal: Vector3, dist: f64) -> Result<Self> {
        let len = normal.norm();
        if len < f64::EPSILON {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(Self {
            normal: normal / len,
            dist: dist / len,
        })
    }

    /// Creates a plane through three points.
    ///
    /// The normal is `(p1 - p0) x (p2 - p0)`, so the points run
    /// counter-clockwise when viewed from the front.
    ///
    /// # Errors
    ///
    /// Returns an error if the points are collinear or coincident.
    pub fn from_points(p0: &Point3, p1: &Point3, p2: &Point3) -> Result<Self> {
        Self::try_from_points(p0, p1, p2).ok_or_else(|| {
            GeometryError::DegeneratePlane(format!("({p0}, {p1}, {p2})")).into()
        })
    }

    /// Like [`Plane3::from_points`] but returns `None` for degenerate input.
    #[must_use]
    pub fn try_from_points(p0: &Point3, p1: &Point3, p2: &Point3) -> Option<Self> {
        let normal = (p1 - p0).cross(&(p2 - p0));
        let len = normal.norm();
        if len < f64::EPSILON {
            return None;
        }
        let normal = normal / len;
        Some(Self {
            normal,
            dist: normal.dot(&p0.coords),
        })
    }

    /// Returns the unit normal.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Returns the signed distance of the plane from the origin.
    #[must_use]
    pub fn dist(&self) -> f64 {
        self.dist
    }

    /// Signed distance from the plane to `point`; positive in front.
    #[must_use]
    pub fn distance_to_point(&self, point: &Point3) -> f64 {
        self.normal.dot(&point.coords) - self.dist
    }

    /// Classifies a point against the plane using [`ON_EPSILON`].
    #[must_use]
    pub fn classify_point(&self, point: &Point3) -> PlaneSide {
        PlaneSide::from_distance(self.distance_to_point(point), ON_EPSILON)
    }

    /// Returns the same plane facing the other way.
    #[must_use]
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            dist: -self.dist,
        }
    }

    /// Returns the plane moved along its normal by `offset`.
    #[must_use]
    pub fn offset(&self, offset: f64) -> Self {
        Self {
            normal: self.normal,
            dist: self.dist + offset,
        }
    }

    /// Returns `true` if both planes describe the same oriented plane.
    #[must_use]
    pub fn equals(&self, other: &Self) -> bool {
        vector_equal_epsilon(&self.normal, &other.normal, PLANE_NORMAL_EPSILON)
            && (self.dist - other.dist).abs() <= PLANE_DIST_EPSILON
    }

    /// Returns `true` if the planes coincide but face opposite directions.
    #[must_use]
    pub fn opposes(&self, other: &Self) -> bool {
        self.equals(&other.flipped())
    }
}
