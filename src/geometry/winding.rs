use std::ops::AddAssign;

use crate::math::{Point3, Vector3, ON_EPSILON, WORLD_EXTENT};

use super::plane::{Plane3, PlaneSide};

/// Distance below which two consecutive winding points are merged.
const POINT_MERGE_EPSILON: f64 = 1e-6;

/// Counts of points classified against a plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitCounts {
    pub front: usize,
    pub back: usize,
    pub on: usize,
}

impl SplitCounts {
    /// Returns `true` if points were found strictly on both sides.
    #[must_use]
    pub fn is_spanning(&self) -> bool {
        self.front != 0 && self.back != 0
    }

    fn record(&mut self, side: PlaneSide) {
        match side {
            PlaneSide::Front => self.front += 1,
            PlaneSide::Back => self.back += 1,
            PlaneSide::On => self.on += 1,
        }
    }
}

impl AddAssign for SplitCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.front += rhs.front;
        self.back += rhs.back;
        self.on += rhs.on;
    }
}

/// An ordered convex polygon lying on a plane.
///
/// Points run counter-clockwise when viewed from the front of the plane.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Winding {
    points: Vec<Point3>,
}

impl Winding {
    /// Creates a winding from points already in order.
    #[must_use]
    pub fn new(points: Vec<Point3>) -> Self {
        Self { points }
    }

    /// Builds a square covering the whole plane out to [`WORLD_EXTENT`].
    #[must_use]
    pub fn for_plane(plane: &Plane3) -> Self {
        let (u, v) = plane_basis(plane.normal());
        let origin = Point3::from(plane.normal() * plane.dist());
        let u = u * WORLD_EXTENT;
        let v = v * WORLD_EXTENT;
        Self::new(vec![
            origin - u - v,
            origin + u - v,
            origin + u + v,
            origin - u + v,
        ])
    }

    /// Returns the points of the winding.
    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Returns the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the winding has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns `true` if the winding encloses an area (three or more points).
    #[must_use]
    pub fn is_polygon(&self) -> bool {
        self.points.len() >= 3
    }

    /// Index of the point following `index`, wrapping around.
    #[must_use]
    pub fn next(&self, index: usize) -> usize {
        if index + 1 == self.points.len() {
            0
        } else {
            index + 1
        }
    }

    /// Drops all points.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Keeps the part of the winding behind `plane`.
    ///
    /// Points within [`ON_EPSILON`] of the plane are kept.
    pub fn clip(&mut self, plane: &Plane3) {
        if self.points.is_empty() {
            return;
        }
        let dists: Vec<f64> = self
            .points
            .iter()
            .map(|p| plane.distance_to_point(p))
            .collect();
        let sides: Vec<PlaneSide> = dists
            .iter()
            .map(|&d| PlaneSide::from_distance(d, ON_EPSILON))
            .collect();

        if !sides.contains(&PlaneSide::Front) {
            return;
        }
        if !sides.contains(&PlaneSide::Back) {
            self.points.clear();
            return;
        }

        let n = self.points.len();
        let mut clipped = Vec::with_capacity(n + 4);
        for i in 0..n {
            let j = (i + 1) % n;
            let current = self.points[i];
            if sides[i] != PlaneSide::Front {
                clipped.push(current);
            }
            let crosses = matches!(
                (sides[i], sides[j]),
                (PlaneSide::Front, PlaneSide::Back) | (PlaneSide::Back, PlaneSide::Front)
            );
            if crosses {
                let t = dists[i] / (dists[i] - dists[j]);
                clipped.push(current + (self.points[j] - current) * t);
            }
        }
        self.points = clipped;
        self.remove_duplicates();
    }

    fn remove_duplicates(&mut self) {
        self.points
            .dedup_by(|a, b| (*a - *b).norm() < POINT_MERGE_EPSILON);
        while self.points.len() > 1 {
            let (Some(first), Some(last)) = (self.points.first(), self.points.last()) else {
                break;
            };
            if (first - last).norm() < POINT_MERGE_EPSILON {
                self.points.pop();
            } else {
                break;
            }
        }
    }

    /// Counts the winding's points on each side of `plane`.
    #[must_use]
    pub fn classify_plane(&self, plane: &Plane3) -> SplitCounts {
        let mut counts = SplitCounts::default();
        for point in &self.points {
            counts.record(plane.classify_point(point));
        }
        counts
    }

    /// Returns `true` if no point lies in front of `plane`
    /// (behind it when `flipped`).
    #[must_use]
    pub fn test_plane(&self, plane: &Plane3, flipped: bool) -> bool {
        let rejected = if flipped {
            PlaneSide::Back
        } else {
            PlaneSide::Front
        };
        self.points
            .iter()
            .all(|point| plane.classify_point(point) != rejected)
    }

    /// Area of the polygon.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.area_vector().norm() * 0.5
    }

    /// Average of the winding's points.
    #[must_use]
    pub fn centroid(&self) -> Option<Point3> {
        if self.points.is_empty() {
            return None;
        }
        let sum = self
            .points
            .iter()
            .fold(Vector3::zeros(), |acc, p| acc + p.coords);
        #[allow(clippy::cast_precision_loss)]
        let count = self.points.len() as f64;
        Some(Point3::from(sum / count))
    }

    /// Twice the area vector: direction is the winding normal.
    fn area_vector(&self) -> Vector3 {
        let Some(origin) = self.points.first() else {
            return Vector3::zeros();
        };
        let mut sum = Vector3::zeros();
        for pair in self.points[1..].windows(2) {
            sum += (pair[0] - origin).cross(&(pair[1] - origin));
        }
        sum
    }
}

/// Unit vectors `(u, v)` spanning the plane with `u x v == normal`.
#[must_use]
pub fn plane_basis(normal: &Vector3) -> (Vector3, Vector3) {
    let reference = if normal.z.abs() < 0.9 {
        Vector3::z()
    } else {
        Vector3::x()
    };
    let u = reference.cross(normal).normalize();
    let v = normal.cross(&u);
    (u, v)
}

/// Returns `true` if either winding pokes through the other's plane,
/// meaning the two faces cannot bound the same convex solid.
#[must_use]
pub fn planes_concave(w1: &Winding, w2: &Winding, plane1: &Plane3, plane2: &Plane3) -> bool {
    !w1.test_plane(plane2, false) || !w2.test_plane(plane1, false)
}
