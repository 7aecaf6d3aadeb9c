mod exclusion;

pub use exclusion::ExclusionFilter;

use serde::{Deserialize, Serialize};

use crate::brush::{Brush, TextureProjection};
use crate::math::{vector_equal_epsilon, Point3, Vector3, NORMAL_MATCH_EPSILON};

/// How the walls of a hollowed brush are built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HollowType {
    /// Walls offset outward with mitred diagonal edges.
    Diag,
    /// Walls wrapped around the brush, which shrinks into the inner void.
    Wrap,
    /// One slab per face, extruded outward along the face normal.
    Extrude,
    /// Walls pulled outward from each face, overlapping at the corners.
    #[default]
    Pull,
}

impl HollowType {
    /// Name used for undo entries.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Diag => "Diag",
            Self::Wrap => "Wrap",
            Self::Extrude => "Extrude",
            Self::Pull => "Pull",
        }
    }
}

/// Parameters of a hollow operation.
#[derive(Debug, Clone, PartialEq)]
pub struct HollowSettings {
    pub hollow_type: HollowType,
    /// Wall thickness.
    pub offset: f64,
    /// Faces most aligned with this axis are left open; zero disables it.
    pub exclusion_axis: Vector3,
    /// Put the caulk shader on faces that end up hidden.
    pub caulk: bool,
    /// The source brush is deleted afterwards, so its faces need no caulk.
    pub remove_inner: bool,
}

impl Default for HollowSettings {
    fn default() -> Self {
        Self {
            hollow_type: HollowType::default(),
            offset: 16.0,
            exclusion_axis: Vector3::zeros(),
            caulk: true,
            remove_inner: true,
        }
    }
}

/// Shader names applied to faces the hollow operation creates.
#[derive(Debug, Clone, Copy)]
pub struct HollowShaders<'a> {
    pub caulk: &'a str,
    pub selected: &'a str,
    pub projection: &'a TextureProjection,
}

/// Builds wall brushes around one brush.
///
/// The source brush may be modified: its faces can be caulked, and the wrap
/// strategy shrinks it to the inner void.
pub struct Hollow<'a> {
    settings: &'a HollowSettings,
    shaders: HollowShaders<'a>,
}

impl<'a> Hollow<'a> {
    /// Creates a new `Hollow` operation.
    #[must_use]
    pub fn new(settings: &'a HollowSettings, shaders: HollowShaders<'a>) -> Self {
        Self { settings, shaders }
    }

    /// Executes the operation on `brush`, returning the wall brushes.
    ///
    /// `selected_face_normals` are the normals of faces the user picked to
    /// leave open; they are only used when no exclusion axis is set. Walls
    /// without any contributing face are discarded.
    pub fn execute(&self, brush: &mut Brush, selected_face_normals: &[Vector3]) -> Vec<Brush> {
        let filter = ExclusionFilter::new(brush, &self.settings.exclusion_axis, selected_face_normals);
        let mut walls = match self.settings.hollow_type {
            HollowType::Diag => self.diag(brush, &filter),
            HollowType::Wrap => self.wrap(brush, &filter),
            HollowType::Extrude => self.extrude(brush, &filter),
            HollowType::Pull => self.pull(brush, &filter),
        };
        walls.retain_mut(|wall| {
            wall.remove_empty_faces();
            wall.has_contributing_faces()
        });
        walls
    }

    fn caulk_inner(&self) -> bool {
        self.settings.caulk && !self.settings.remove_inner
    }

    fn caulk_included(&self, brush: &mut Brush, filter: &ExclusionFilter) {
        for i in 0..brush.len() {
            if filter.includes(&brush.faces()[i]) {
                brush.set_face_shader(i, self.shaders.caulk);
            }
        }
    }

    fn included_contributing(brush: &Brush, filter: &ExclusionFilter) -> Vec<usize> {
        (0..brush.len())
            .filter(|&i| filter.includes(&brush.faces()[i]) && brush.contributes(i))
            .collect()
    }

    fn pull(&self, brush: &mut Brush, filter: &ExclusionFilter) -> Vec<Brush> {
        if self.caulk_inner() {
            self.caulk_included(brush, filter);
        }
        let mut source = brush.clone();
        source.remove_empty_faces();

        let mut walls = Vec::new();
        for i in Self::included_contributing(&source, filter) {
            let mut wall = source.clone();
            if let Some(face) = wall.face_mut(i) {
                face.offset(self.settings.offset);
            }
            if self.settings.caulk {
                self.caulk_included(&mut wall, filter);
            }
            if let Some(cap) = wall.add_face(source.faces()[i].clone()) {
                cap.flip();
            }
            walls.push(wall);
        }
        walls
    }

    fn wrap(&self, brush: &mut Brush, filter: &ExclusionFilter) -> Vec<Brush> {
        let mut walls = Vec::new();
        for i in 0..brush.len() {
            if !filter.includes(&brush.faces()[i]) || !brush.contributes(i) {
                continue;
            }
            let mut wall = brush.clone();
            if self.caulk_inner() {
                brush.set_face_shader(i, self.shaders.caulk);
            }
            let mut cap = brush.faces()[i].clone();
            if let Some(face) = brush.face_mut(i) {
                face.offset(-self.settings.offset);
            }
            if self.settings.caulk {
                brush.set_face_shader(i, self.shaders.caulk);
            }
            cap.flip();
            cap.offset(self.settings.offset);
            wall.add_face(cap);
            walls.push(wall);
        }
        walls
    }

    fn extrude(&self, brush: &mut Brush, filter: &ExclusionFilter) -> Vec<Brush> {
        let offset = self.settings.offset;
        let mut walls = Vec::new();
        for i in Self::included_contributing(brush, filter) {
            let face = brush.faces()[i].clone();
            let (Some(normal), Some(winding)) = (face.normal().copied(), brush.winding(i).cloned())
            else {
                continue;
            };

            let mut slab = Brush::new();
            if let Some(outer) = slab.add_face(face.clone()) {
                outer.offset(offset);
            }
            if let Some(inner) = slab.add_face(face) {
                if self.caulk_inner() {
                    inner.set_shader(self.shaders.caulk);
                }
                inner.flip();
            }
            if self.caulk_inner() {
                brush.set_face_shader(i, self.shaders.caulk);
            }

            let points = winding.points();
            for (j, a) in points.iter().enumerate() {
                let b = points[winding.next(j)];
                slab.add_plane(
                    [*a, b, b + normal * offset],
                    self.shaders.selected,
                    self.shaders.projection,
                );
            }
            walls.push(slab);
        }
        walls
    }

    fn diag(&self, brush: &mut Brush, filter: &ExclusionFilter) -> Vec<Brush> {
        let offset = self.settings.offset;
        let mut expanded = brush.clone();
        for i in 0..expanded.len() {
            if filter.includes(&expanded.faces()[i]) {
                if let Some(face) = expanded.face_mut(i) {
                    face.offset(offset);
                }
            }
        }
        expanded.remove_empty_faces();

        let side_shader = if self.settings.caulk {
            self.shaders.caulk
        } else {
            self.shaders.selected
        };

        let mut walls = Vec::new();
        for i in Self::included_contributing(&expanded, filter) {
            let face = &expanded.faces()[i];
            let (Some(normal), Some(winding)) = (face.normal().copied(), expanded.winding(i)) else {
                continue;
            };

            let mut slab = Brush::new();
            slab.add_face(face.clone());
            if let Some(inner) = slab.add_face(face.clone()) {
                if self.caulk_inner() {
                    inner.set_shader(self.shaders.caulk);
                }
                inner.flip();
                inner.offset(offset);
            }

            let points = winding.points();
            for (j, a) in points.iter().enumerate() {
                let b = points[winding.next(j)];
                if let Some(best) = mitre_point(brush, &normal, a, &b) {
                    slab.add_plane([b, *a, best], side_shader, self.shaders.projection);
                }
            }
            walls.push(slab);
        }

        if self.caulk_inner() {
            self.caulk_included(brush, filter);
        }
        walls
    }
}

/// Picks the point of `original` that the mitre plane through edge `a`-`b`
/// of an expanded face must pass through.
///
/// On the original face parallel to the expanded one, this is the vertex
/// that tilts the plane furthest toward the face normal. Without such a
/// face, the original vertex nearest to `a` is used.
fn mitre_point(original: &Brush, normal: &Vector3, a: &Point3, b: &Point3) -> Option<Point3> {
    let edge = b - a;
    let parallel = original
        .contributing_faces()
        .find(|face| vector_equal_epsilon(face.plane.normal(), normal, NORMAL_MATCH_EPSILON));

    if let Some(face) = parallel {
        let mut best = None;
        let mut best_score = -1.0;
        for v in face.winding.points() {
            let Some(tilt) = edge.cross(&(b - v)).try_normalize(f64::EPSILON) else {
                continue;
            };
            let score = tilt.dot(normal);
            if score > best_score {
                best_score = score;
                best = Some(*v);
            }
        }
        return best;
    }

    original
        .windings()
        .iter()
        .flat_map(|w| w.points().iter())
        .min_by(|p, q| (*p - a).norm_squared().total_cmp(&(*q - a).norm_squared()))
        .copied()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::query::{BoundingBox, Volume};
    use approx::assert_relative_eq;

    const CAULK: &str = "caulk";
    const SELECTED: &str = "selected";

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn hollow(brush: &mut Brush, settings: &HollowSettings, selected: &[Vector3]) -> Vec<Brush> {
        let projection = TextureProjection::default();
        let shaders = HollowShaders {
            caulk: CAULK,
            selected: SELECTED,
            projection: &projection,
        };
        Hollow::new(settings, shaders).execute(brush, selected)
    }

    fn settings(hollow_type: HollowType, offset: f64) -> HollowSettings {
        HollowSettings {
            hollow_type,
            offset,
            ..HollowSettings::default()
        }
    }

    fn total_volume(walls: &[Brush]) -> f64 {
        walls.iter().map(|w| Volume::new(w).execute()).sum()
    }

    #[test]
    fn pull_builds_six_slabs() {
        let mut brush = Brush::cuboid(p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0), "base");
        let walls = hollow(&mut brush, &settings(HollowType::Pull, 2.0), &[]);
        assert_eq!(walls.len(), 6);
        for wall in &walls {
            assert_relative_eq!(Volume::new(wall).execute(), 2.0, epsilon = 1e-6);
        }
        let first = BoundingBox::new(&walls[0]).execute().unwrap();
        assert_relative_eq!(first.min, p(-2.0, 0.0, 0.0), epsilon = 1e-9);
        assert_relative_eq!(first.max, p(0.0, 1.0, 1.0), epsilon = 1e-9);
    }

    #[test]
    fn pull_caulks_all_but_the_inner_face() {
        let mut brush = Brush::cuboid(p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0), "base");
        let walls = hollow(&mut brush, &settings(HollowType::Pull, 2.0), &[]);
        let wall = &walls[0];
        let visible: Vec<_> = wall.faces().iter().filter(|f| f.shader() != CAULK).collect();
        assert_eq!(visible.len(), 1);
        assert_relative_eq!(*visible[0].normal().unwrap(), Vector3::x(), epsilon = 1e-9);
        // The source brush is deleted afterwards, so it keeps its shaders.
        assert!(brush.faces().iter().all(|f| f.shader() == "base"));
    }

    #[test]
    fn pull_caulks_kept_source() {
        let mut brush = Brush::cuboid(p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0), "base");
        let settings = HollowSettings {
            remove_inner: false,
            ..settings(HollowType::Pull, 2.0)
        };
        hollow(&mut brush, &settings, &[]);
        assert!(brush.faces().iter().all(|f| f.shader() == CAULK));
    }

    #[test]
    fn exclusion_axis_leaves_ends_open() {
        let mut brush = Brush::cuboid(p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0), "base");
        let settings = HollowSettings {
            exclusion_axis: Vector3::z(),
            ..settings(HollowType::Pull, 2.0)
        };
        assert_eq!(hollow(&mut brush, &settings, &[]).len(), 4);
    }

    #[test]
    fn selected_faces_are_left_open() {
        let mut brush = Brush::cuboid(p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0), "base");
        let walls = hollow(&mut brush, &settings(HollowType::Pull, 2.0), &[Vector3::z()]);
        assert_eq!(walls.len(), 5);
    }

    #[test]
    fn wrap_shrinks_source_to_void() {
        let mut brush = Brush::cuboid(p(0.0, 0.0, 0.0), p(4.0, 4.0, 4.0), "base");
        let walls = hollow(&mut brush, &settings(HollowType::Wrap, 1.0), &[]);
        assert_eq!(walls.len(), 6);
        assert_relative_eq!(total_volume(&walls), 56.0, epsilon = 1e-6);
        let void = BoundingBox::new(&brush).execute().unwrap();
        assert_relative_eq!(void.min, p(1.0, 1.0, 1.0), epsilon = 1e-9);
        assert_relative_eq!(void.max, p(3.0, 3.0, 3.0), epsilon = 1e-9);
        assert!(brush.faces().iter().all(|f| f.shader() == CAULK));
    }

    #[test]
    fn extrude_builds_slab_per_face() {
        let mut brush = Brush::cuboid(p(0.0, 0.0, 0.0), p(4.0, 4.0, 4.0), "base");
        let walls = hollow(&mut brush, &settings(HollowType::Extrude, 1.0), &[]);
        assert_eq!(walls.len(), 6);
        for wall in &walls {
            assert_eq!(wall.len(), 6);
            assert_relative_eq!(Volume::new(wall).execute(), 16.0, epsilon = 1e-6);
            let sides = wall.faces().iter().filter(|f| f.shader() == SELECTED).count();
            assert_eq!(sides, 4);
        }
    }

    #[test]
    fn extrude_caulks_cap_against_kept_source() {
        let mut brush = Brush::cuboid(p(0.0, 0.0, 0.0), p(4.0, 4.0, 4.0), "base");
        let settings = HollowSettings {
            remove_inner: false,
            ..settings(HollowType::Extrude, 1.0)
        };
        let walls = hollow(&mut brush, &settings, &[]);
        assert_eq!(walls.len(), 6);
        for wall in &walls {
            let shaders: Vec<&str> = wall.faces().iter().map(|f| f.shader()).collect();
            assert_eq!(shaders, ["base", CAULK, SELECTED, SELECTED, SELECTED, SELECTED]);
        }
        assert!(brush.faces().iter().all(|f| f.shader() == CAULK));
    }

    #[test]
    fn diag_walls_meet_at_mitres() {
        let mut brush = Brush::cuboid(p(0.0, 0.0, 0.0), p(4.0, 4.0, 4.0), "base");
        let walls = hollow(&mut brush, &settings(HollowType::Diag, 1.0), &[]);
        assert_eq!(walls.len(), 6);
        // Six frustums filling the shell between the 6-cube and the 4-cube.
        assert_relative_eq!(total_volume(&walls), 216.0 - 64.0, epsilon = 1e-6);
        for wall in &walls {
            assert_relative_eq!(Volume::new(wall).execute(), 76.0 / 3.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn diag_caulks_kept_source_afterwards() {
        let mut brush = Brush::cuboid(p(0.0, 0.0, 0.0), p(4.0, 4.0, 4.0), "base");
        let settings = HollowSettings {
            remove_inner: false,
            ..settings(HollowType::Diag, 1.0)
        };
        let walls = hollow(&mut brush, &settings, &[]);
        assert!(brush.faces().iter().all(|f| f.shader() == CAULK));
        for wall in &walls {
            assert_eq!(wall.faces()[0].shader(), "base");
            assert_eq!(wall.faces()[1].shader(), CAULK);
        }
    }

    #[test]
    fn hollow_type_serializes_snake_case() {
        let json = serde_json::to_string(&HollowType::Extrude).unwrap();
        assert_eq!(json, "\"extrude\"");
        let parsed: HollowType = serde_json::from_str("\"diag\"").unwrap();
        assert_eq!(parsed, HollowType::Diag);
    }
}
