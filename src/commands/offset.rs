use tracing::{info, warn};

use crate::config::CsgToolConfig;
use crate::error::{OperationError, Result};
use crate::operations::OffsetFaces;
use crate::scene::{SceneGraph, UndoScope};

use super::CsgContext;

/// Counts reported by [`OffsetSelected`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OffsetReport {
    pub brushes: usize,
    pub faces: usize,
}

/// Grows or shrinks the selected brushes by moving their faces.
///
/// Faces are left open the same way hollowing leaves them open.
pub struct OffsetSelected<'c> {
    config: &'c CsgToolConfig,
    expand: bool,
}

impl<'c> OffsetSelected<'c> {
    /// Moves faces inward by the configured offset.
    #[must_use]
    pub fn shrink(config: &'c CsgToolConfig) -> Self {
        Self {
            config,
            expand: false,
        }
    }

    /// Moves faces outward by the configured offset.
    #[must_use]
    pub fn expand(config: &'c CsgToolConfig) -> Self {
        Self {
            config,
            expand: true,
        }
    }

    /// Executes the command.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::NoSelection`] if no brush is selected.
    pub fn execute<S: SceneGraph>(&self, ctx: &mut CsgContext<'_, S>) -> Result<OffsetReport> {
        let (undo_name, offset) = if self.expand {
            ("Expand brush", self.config.offset)
        } else {
            ("Shrink brush", -self.config.offset)
        };

        let selected = ctx.scene.selected_brushes();
        if selected.is_empty() {
            warn!("{undo_name}: No brushes selected.");
            return Err(OperationError::NoSelection {
                operation: undo_name,
            }
            .into());
        }

        let _undo = UndoScope::new(&mut *ctx.undo, undo_name);

        let axis = self.config.exclusion_axis();
        let mut report = OffsetReport::default();
        for id in selected {
            let open_faces = ctx.scene.selected_face_normals(id)?;
            let moved = OffsetFaces::new(offset)
                .exclusion_axis(axis)
                .selected_face_normals(&open_faces)
                .execute(ctx.scene.brush_mut(id)?);
            report.brushes += 1;
            report.faces += moved;
        }

        info!(brushes = report.brushes, faces = report.faces, "{undo_name}");
        Ok(report)
    }
}
