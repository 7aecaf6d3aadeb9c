use serde::{Deserialize, Serialize};

use crate::brush::{Brush, TextureProjection};
use crate::error::Result;
use crate::geometry::Plane3;
use crate::math::Point3;
use crate::operations::classify::classify_plane;

/// Three points defining a cutting plane.
///
/// The brush keeps the half-space behind the plane they define; the
/// points in reverse order bound the split-off front part.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipperPoints(pub [Point3; 3]);

impl ClipperPoints {
    /// Creates clipper points in order.
    #[must_use]
    pub fn new(p0: Point3, p1: Point3, p2: Point3) -> Self {
        Self([p0, p1, p2])
    }

    /// The plane through the points.
    ///
    /// # Errors
    ///
    /// Returns an error if the points are collinear.
    pub fn plane(&self) -> Result<Plane3> {
        Plane3::from_points(&self.0[0], &self.0[1], &self.0[2])
    }

    /// The points in their original order.
    #[must_use]
    pub fn points(&self) -> [Point3; 3] {
        self.0
    }

    /// The points describing the same plane facing the other way.
    #[must_use]
    pub fn reversed(&self) -> [Point3; 3] {
        [self.0[0], self.0[2], self.0[1]]
    }
}

/// What to do with the part of a brush in front of the cutting plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitMode {
    /// Keep it as a new brush.
    Split,
    /// Discard it.
    #[default]
    Clip,
}

/// Result of cutting one brush.
#[derive(Debug, Clone)]
pub enum SplitOutcome {
    /// The plane does not cut the brush and nothing was removed.
    Unchanged,
    /// The brush was cut back to the part behind the plane.
    ///
    /// In split mode `front` holds the part in front of it.
    Cut { front: Option<Brush> },
    /// Clip mode and the brush lies wholly in front: remove it.
    Remove,
}

/// Cuts brushes by the plane through three points.
pub struct SplitByPlane<'a> {
    points: ClipperPoints,
    plane: Plane3,
    mode: SplitMode,
    shader: &'a str,
    projection: &'a TextureProjection,
}

impl<'a> SplitByPlane<'a> {
    /// Creates a new `SplitByPlane` operation; new faces get `shader` and `projection`.
    ///
    /// # Errors
    ///
    /// Returns an error if the points do not define a plane.
    pub fn new(
        points: ClipperPoints,
        mode: SplitMode,
        shader: &'a str,
        projection: &'a TextureProjection,
    ) -> Result<Self> {
        Ok(Self {
            plane: points.plane()?,
            points,
            mode,
            shader,
            projection,
        })
    }

    /// Returns the cutting plane.
    #[must_use]
    pub fn plane(&self) -> &Plane3 {
        &self.plane
    }

    /// Cuts `brush` in place.
    ///
    /// # Panics
    ///
    /// Panics if a cut leaves a brush with no faces; a spanning plane
    /// always leaves material on both sides.
    pub fn execute(&self, brush: &mut Brush) -> SplitOutcome {
        let split = classify_plane(brush, &self.plane);
        if split.is_spanning() {
            let front = (self.mode == SplitMode::Split).then(|| {
                let mut fragment = brush.clone();
                fragment.add_plane(self.points.reversed(), self.shader, self.projection);
                fragment.remove_empty_faces();
                assert!(!fragment.is_empty(), "brush left with no faces after split");
                fragment
            });

            brush.add_plane(self.points.points(), self.shader, self.projection);
            brush.remove_empty_faces();
            assert!(!brush.is_empty(), "brush left with no faces after split");
            return SplitOutcome::Cut { front };
        }

        if self.mode == SplitMode::Clip && split.front != 0 {
            SplitOutcome::Remove
        } else {
            SplitOutcome::Unchanged
        }
    }
}
