use tracing::{debug, info, warn};

use crate::config::CsgToolConfig;
use crate::error::{OperationError, Result};
use crate::math::Vector3;
use crate::operations::{Hollow, HollowSettings, HollowShaders, HollowType};
use crate::scene::{SceneGraph, UndoScope};

use super::{plural, CsgContext};

/// Counts reported by [`CsgHollow`] and [`MakeRoom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HollowReport {
    /// Selected brushes that were hollowed.
    pub brushes: usize,
    /// Wall brushes created around them.
    pub walls: usize,
    /// Source brushes deleted afterwards.
    pub removed: usize,
}

/// Builds walls around every selected brush with one strategy.
pub struct CsgHollow<'c> {
    hollow_type: HollowType,
    config: &'c CsgToolConfig,
}

impl<'c> CsgHollow<'c> {
    /// Creates a new `CsgHollow` command.
    #[must_use]
    pub fn new(hollow_type: HollowType, config: &'c CsgToolConfig) -> Self {
        Self {
            hollow_type,
            config,
        }
    }

    /// Executes the command. The selected brushes are deleted afterwards
    /// when the configuration asks to remove the inner shell.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::NoSelection`] if no brush is selected, or a
    /// scene error if the scene rejects a change.
    pub fn execute<S: SceneGraph>(&self, ctx: &mut CsgContext<'_, S>) -> Result<HollowReport> {
        let settings = self.config.hollow_settings(self.hollow_type);
        let name = format!("brushHollow::{}", self.hollow_type.name());
        run(ctx, &settings, &name, settings.remove_inner)
    }
}

/// Turns the selected brushes into a room: walls pulled outward by one grid
/// step on every side, caulked on the outside, with the source removed.
#[derive(Debug, Clone, Copy)]
pub struct MakeRoom {
    grid_size: f64,
}

impl MakeRoom {
    /// Creates a new `MakeRoom` command with walls `grid_size` thick.
    #[must_use]
    pub fn new(grid_size: f64) -> Self {
        Self { grid_size }
    }

    /// Executes the command.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::NoSelection`] if no brush is selected, or a
    /// scene error if the scene rejects a change.
    pub fn execute<S: SceneGraph>(&self, ctx: &mut CsgContext<'_, S>) -> Result<HollowReport> {
        let settings = HollowSettings {
            hollow_type: HollowType::Pull,
            offset: self.grid_size,
            exclusion_axis: Vector3::zeros(),
            caulk: true,
            remove_inner: true,
        };
        run(ctx, &settings, "makeRoom", true)
    }
}

fn run<S: SceneGraph>(
    ctx: &mut CsgContext<'_, S>,
    settings: &HollowSettings,
    undo_name: &str,
    delete_sources: bool,
) -> Result<HollowReport> {
    let selected = ctx.scene.selected_brushes();
    if selected.is_empty() {
        warn!("CSG Hollow: No brushes selected.");
        return Err(OperationError::NoSelection {
            operation: "CSG Hollow",
        }
        .into());
    }

    let _undo = UndoScope::new(&mut *ctx.undo, undo_name);

    let source = ctx.shaders;
    let projection = source.default_projection();
    let hollow = Hollow::new(
        settings,
        HollowShaders {
            caulk: source.caulk_shader(),
            selected: source.selected_shader(),
            projection: &projection,
        },
    );

    let mut report = HollowReport::default();
    for id in selected {
        let parent = ctx.scene.parent(id)?;
        let open_faces = ctx.scene.selected_face_normals(id)?;
        let walls = hollow.execute(ctx.scene.brush_mut(id)?, &open_faces);
        debug!(?id, walls = walls.len(), "hollowed brush");

        report.brushes += 1;
        report.walls += walls.len();
        for wall in walls {
            ctx.scene.insert_brush(parent, wall)?;
        }
    }

    if delete_sources {
        report.removed = ctx.scene.delete_selected(None)?;
    }

    info!(
        "CSG Hollow: {} {} from {} {}.",
        report.walls,
        plural(report.walls, "wall", "walls"),
        report.brushes,
        plural(report.brushes, "brush", "brushes"),
    );
    Ok(report)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::commands::testing::cube;
    use crate::config::{ExclusionMode, ViewType};
    use crate::operations::query::Volume;
    use crate::scene::{Scene, ShaderDefaults, UndoLog};
    use approx::assert_relative_eq;

    #[test]
    fn pull_replaces_cube_with_six_slabs() {
        let mut scene = Scene::new();
        let a = cube(&mut scene, [0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        scene.set_selected(a, true).unwrap();

        let config = CsgToolConfig {
            offset: 2.0,
            ..CsgToolConfig::default()
        };
        let (mut undo, shaders) = (UndoLog::new(), ShaderDefaults::default());
        let mut ctx = CsgContext::new(&mut scene, &mut undo, &shaders);
        let report = CsgHollow::new(HollowType::Pull, &config)
            .execute(&mut ctx)
            .unwrap();
        assert_eq!(
            report,
            HollowReport {
                brushes: 1,
                walls: 6,
                removed: 1
            }
        );

        let slabs = scene.all_brushes();
        assert_eq!(slabs.len(), 6);
        for id in slabs {
            assert_relative_eq!(Volume::new(scene.brush(id).unwrap()).execute(), 2.0, epsilon = 1e-6);
        }
        assert_eq!(undo.committed(), ["brushHollow::Pull"]);
    }

    #[test]
    fn kept_source_is_caulked() {
        let mut scene = Scene::new();
        let a = cube(&mut scene, [0.0, 0.0, 0.0], [4.0, 4.0, 4.0]);
        scene.set_selected(a, true).unwrap();

        let config = CsgToolConfig {
            offset: 1.0,
            remove_inner: false,
            exclusion: ExclusionMode::Projection(ViewType::Xy),
            ..CsgToolConfig::default()
        };
        let (mut undo, shaders) = (UndoLog::new(), ShaderDefaults::default());
        let mut ctx = CsgContext::new(&mut scene, &mut undo, &shaders);
        let report = CsgHollow::new(HollowType::Extrude, &config)
            .execute(&mut ctx)
            .unwrap();
        assert_eq!(report.walls, 4);
        assert_eq!(report.removed, 0);

        let source = scene.brush(a).unwrap();
        let caulked = source
            .faces()
            .iter()
            .filter(|f| f.shader() == shaders.caulk)
            .count();
        assert_eq!(caulked, 4);
    }

    #[test]
    fn selected_face_stays_open() {
        let mut scene = Scene::new();
        let a = cube(&mut scene, [0.0, 0.0, 0.0], [4.0, 4.0, 4.0]);
        scene.set_selected(a, true).unwrap();
        scene.select_face(a, 5).unwrap();

        let config = CsgToolConfig {
            offset: 1.0,
            ..CsgToolConfig::default()
        };
        let (mut undo, shaders) = (UndoLog::new(), ShaderDefaults::default());
        let mut ctx = CsgContext::new(&mut scene, &mut undo, &shaders);
        let report = CsgHollow::new(HollowType::Wrap, &config)
            .execute(&mut ctx)
            .unwrap();
        assert_eq!(report.walls, 5);
        assert_eq!(undo.committed(), ["brushHollow::Wrap"]);
    }

    #[test]
    fn make_room_uses_grid_and_removes_source() {
        let mut scene = Scene::new();
        let a = cube(&mut scene, [0.0, 0.0, 0.0], [64.0, 64.0, 64.0]);
        scene.set_selected(a, true).unwrap();

        let (mut undo, shaders) = (UndoLog::new(), ShaderDefaults::default());
        let mut ctx = CsgContext::new(&mut scene, &mut undo, &shaders);
        let report = MakeRoom::new(8.0).execute(&mut ctx).unwrap();
        assert_eq!(report.walls, 6);
        assert!(!scene.contains(a));

        for id in scene.all_brushes() {
            let brush = scene.brush(id).unwrap();
            assert_relative_eq!(Volume::new(brush).execute(), 8.0 * 64.0 * 64.0, epsilon = 1e-3);
            let visible = brush
                .faces()
                .iter()
                .filter(|f| f.shader() != shaders.caulk)
                .count();
            assert_eq!(visible, 1);
        }
        assert_eq!(undo.committed(), ["makeRoom"]);
    }
}
