use tracing::{info, warn};

use crate::error::{OperationError, Result};
use crate::operations::{ClipperPoints, SplitByPlane, SplitMode, SplitOutcome};
use crate::scene::{SceneGraph, UndoScope};

use super::CsgContext;

/// Counts reported by [`CsgSplit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SplitReport {
    /// Brushes the plane cut through.
    pub cut: usize,
    /// Front parts kept as new brushes (split mode).
    pub created: usize,
    /// Brushes deleted for lying wholly in front (clip mode).
    pub removed: usize,
}

/// Cuts the selected brushes by the plane through three points.
pub struct CsgSplit {
    points: ClipperPoints,
    mode: SplitMode,
    caulk: bool,
}

impl CsgSplit {
    /// Creates a new `CsgSplit` command.
    ///
    /// New faces get the caulk shader when `caulk` is set, otherwise the
    /// active shader.
    #[must_use]
    pub fn new(points: ClipperPoints, mode: SplitMode, caulk: bool) -> Self {
        Self {
            points,
            mode,
            caulk,
        }
    }

    /// Executes the command. Front parts kept in split mode become selected.
    ///
    /// # Errors
    ///
    /// Returns an error if the points do not define a plane or no brush is
    /// selected; the scene is unchanged in both cases.
    pub fn execute<S: SceneGraph>(&self, ctx: &mut CsgContext<'_, S>) -> Result<SplitReport> {
        let source = ctx.shaders;
        let shader = if self.caulk {
            source.caulk_shader()
        } else {
            source.selected_shader()
        };
        let projection = source.default_projection();
        let split = SplitByPlane::new(self.points, self.mode, shader, &projection)?;

        let selected = ctx.scene.selected_brushes();
        if selected.is_empty() {
            warn!("CSG Split: No brushes selected.");
            return Err(OperationError::NoSelection {
                operation: "CSG Split",
            }
            .into());
        }

        let undo_name = match self.mode {
            SplitMode::Split => "clipperSplit",
            SplitMode::Clip => "clipperClip",
        };
        let _undo = UndoScope::new(&mut *ctx.undo, undo_name);

        let mut report = SplitReport::default();
        for id in selected {
            let parent = ctx.scene.parent(id)?;
            match split.execute(ctx.scene.brush_mut(id)?) {
                SplitOutcome::Unchanged => {}
                SplitOutcome::Cut { front } => {
                    report.cut += 1;
                    if let Some(front) = front {
                        let fragment = ctx.scene.insert_brush(parent, front)?;
                        ctx.scene.set_selected(fragment, true)?;
                        report.created += 1;
                    }
                }
                SplitOutcome::Remove => {
                    ctx.scene.remove(id)?;
                    report.removed += 1;
                }
            }
        }

        info!(
            cut = report.cut,
            created = report.created,
            removed = report.removed,
            "CSG Split: done"
        );
        Ok(report)
    }
}
