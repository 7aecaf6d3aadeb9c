use tracing::{info, warn};

use crate::error::{OperationError, Result};
use crate::operations::Merge;
use crate::scene::{NodeId, SceneGraph, UndoScope};

use super::CsgContext;

const OPERATION: &str = "CSG Merge";

/// Replaces the selected brushes with their convex union.
///
/// The result goes into the container of the most recently selected brush
/// and becomes selected. That container is kept even if the merge empties it.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsgMerge;

impl CsgMerge {
    /// Creates a new `CsgMerge` command.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Executes the command and returns the merged brush node.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::NoSelection`] or
    /// [`OperationError::TooFewSelected`] if fewer than two brushes are
    /// selected, and the merge error if the brushes cannot be fused. The scene
    /// is unchanged in every error case.
    ///
    /// # Panics
    ///
    /// Panics if a successful merge yields a brush with no faces.
    pub fn execute<S: SceneGraph>(&self, ctx: &mut CsgContext<'_, S>) -> Result<NodeId> {
        let selected = ctx.scene.selected_brushes();
        if selected.is_empty() {
            warn!("CSG Merge: No brushes selected.");
            return Err(OperationError::NoSelection {
                operation: OPERATION,
            }
            .into());
        }
        if selected.len() < 2 {
            warn!("CSG Merge: At least two brushes have to be selected.");
            return Err(OperationError::TooFewSelected {
                operation: OPERATION,
                required: 2,
                found: selected.len(),
            }
            .into());
        }
        info!("CSG Merge: Merging {} brushes.", selected.len());

        let _undo = UndoScope::new(&mut *ctx.undo, "brushMerge");

        let ultimate = ctx
            .scene
            .ultimate_selected()
            .ok_or(OperationError::NoSelection {
                operation: OPERATION,
            })?;
        let parent = ctx.scene.parent(ultimate)?;

        let inputs = selected
            .iter()
            .map(|&id| ctx.scene.brush(id).cloned())
            .collect::<Result<Vec<_>>>()?;
        let merged = Merge::new(&inputs)
            .only_shape(true)
            .execute()
            .inspect_err(|err| warn!("CSG Merge: Failed - {err}."))?;
        assert!(!merged.is_empty(), "brush left with no faces after merge");

        ctx.scene.delete_selected(Some(parent))?;
        let id = ctx.scene.insert_brush(parent, merged)?;
        ctx.scene.set_selected(id, true)?;

        info!("CSG Merge: Succeeded.");
        Ok(id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::brush::Brush;
    use crate::commands::testing::cube;
    use crate::error::CsgError;
    use crate::operations::query::Volume;
    use crate::scene::{Scene, ShaderDefaults, UndoLog};
    use approx::assert_relative_eq;

    #[test]
    fn adjacent_cubes_become_one_selected_brush() {
        let mut scene = Scene::new();
        let a = cube(&mut scene, [0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        let b = cube(&mut scene, [1.0, 0.0, 0.0], [2.0, 1.0, 1.0]);
        let other = cube(&mut scene, [5.0, 0.0, 0.0], [6.0, 1.0, 1.0]);
        scene.set_selected(a, true).unwrap();
        scene.set_selected(b, true).unwrap();

        let (mut undo, shaders) = (UndoLog::new(), ShaderDefaults::default());
        let mut ctx = CsgContext::new(&mut scene, &mut undo, &shaders);
        let merged = CsgMerge::new().execute(&mut ctx).unwrap();

        assert_eq!(scene.all_brushes(), [other, merged]);
        assert_eq!(scene.selected_brushes(), [merged]);
        let brush = scene.brush(merged).unwrap();
        assert_eq!(brush.len(), 6);
        assert_relative_eq!(Volume::new(brush).execute(), 2.0, epsilon = 1e-6);
        assert_eq!(undo.committed(), ["brushMerge"]);
    }

    #[test]
    fn merge_lands_in_ultimate_selected_container() {
        let mut scene = Scene::new();
        let group = scene.add_entity("func_group");
        let a = cube(&mut scene, [0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        let b = scene
            .insert_brush(group, Brush::cuboid([1.0, 0.0, 0.0].into(), [2.0, 1.0, 1.0].into(), "base"))
            .unwrap();
        scene.set_selected(a, true).unwrap();
        scene.set_selected(b, true).unwrap();

        let (mut undo, shaders) = (UndoLog::new(), ShaderDefaults::default());
        let mut ctx = CsgContext::new(&mut scene, &mut undo, &shaders);
        let merged = CsgMerge::new().execute(&mut ctx).unwrap();
        assert_eq!(scene.parent(merged).unwrap(), group);
    }

    #[test]
    fn non_convex_merge_leaves_scene_unchanged() {
        let mut scene = Scene::new();
        let a = cube(&mut scene, [0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        let b = cube(&mut scene, [0.5, 0.5, 0.0], [1.5, 1.5, 1.0]);
        scene.set_selected(a, true).unwrap();
        scene.set_selected(b, true).unwrap();

        let (mut undo, shaders) = (UndoLog::new(), ShaderDefaults::default());
        let mut ctx = CsgContext::new(&mut scene, &mut undo, &shaders);
        assert!(matches!(
            CsgMerge::new().execute(&mut ctx),
            Err(CsgError::Operation(OperationError::NotConvex))
        ));
        assert_eq!(scene.all_brushes(), [a, b]);
    }

    #[test]
    fn single_brush_is_too_few() {
        let mut scene = Scene::new();
        let a = cube(&mut scene, [0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        scene.set_selected(a, true).unwrap();

        let (mut undo, shaders) = (UndoLog::new(), ShaderDefaults::default());
        let mut ctx = CsgContext::new(&mut scene, &mut undo, &shaders);
        assert!(matches!(
            CsgMerge::new().execute(&mut ctx),
            Err(CsgError::Operation(OperationError::TooFewSelected { found: 1, .. }))
        ));
    }
}
