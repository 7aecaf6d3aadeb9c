use tracing::{debug, info, warn};

use crate::brush::Brush;
use crate::error::{OperationError, Result};
use crate::operations::{Subtract, SubtractOutcome};
use crate::scene::{SceneGraph, UndoScope};

use super::{plural, CsgContext};

/// Counts reported by [`CsgSubtract`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubtractReport {
    /// Unselected brushes the cutters reached.
    pub brushes: usize,
    /// Fragments those brushes were replaced with.
    pub fragments: usize,
}

/// Carves the selected brushes out of every visible unselected brush.
///
/// Each touched brush is replaced by its fragments in the same container;
/// a container left empty is removed unless it is permanent. The cutters
/// themselves stay as they are.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsgSubtract;

impl CsgSubtract {
    /// Creates a new `CsgSubtract` command.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Executes the command.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::NoSelection`] if no brush is selected, or a
    /// scene error if the scene rejects a change.
    pub fn execute<S: SceneGraph>(&self, ctx: &mut CsgContext<'_, S>) -> Result<SubtractReport> {
        let selected = ctx.scene.selected_brushes();
        if selected.is_empty() {
            warn!("CSG Subtract: No brushes selected.");
            return Err(OperationError::NoSelection {
                operation: "CSG Subtract",
            }
            .into());
        }
        info!("CSG Subtract: Subtracting {} brushes.", selected.len());

        let cutters = selected
            .iter()
            .map(|&id| ctx.scene.brush(id).cloned())
            .collect::<Result<Vec<_>>>()?;

        let _undo = UndoScope::new(&mut *ctx.undo, "brushSubtract");

        let mut carved = Vec::new();
        for id in ctx.scene.all_brushes() {
            if ctx.scene.is_selected(id)? {
                continue;
            }
            if let Some(fragments) = carve(ctx.scene.brush(id)?, &cutters) {
                carved.push((id, fragments));
            }
        }

        let mut report = SubtractReport::default();
        for (id, fragments) in carved {
            report.brushes += 1;
            report.fragments += fragments.len();
            debug!(?id, fragments = fragments.len(), "replacing carved brush");

            let parent = ctx.scene.parent(id)?;
            for mut fragment in fragments {
                fragment.remove_empty_faces();
                if !fragment.is_empty() {
                    ctx.scene.insert_brush(parent, fragment)?;
                }
            }
            ctx.scene.remove_brush(id, None)?;
        }

        info!(
            "CSG Subtract: Result: {} {} from {} {}.",
            report.fragments,
            plural(report.fragments, "fragment", "fragments"),
            report.brushes,
            plural(report.brushes, "brush", "brushes"),
        );
        Ok(report)
    }
}

/// Subtracts every cutter in turn from `subject` and all pieces cut so far.
///
/// Returns `None` if no cutter reached the subject.
fn carve(subject: &Brush, cutters: &[Brush]) -> Option<Vec<Brush>> {
    let mut pieces = vec![subject.clone()];
    let mut touched = false;
    for cutter in cutters {
        let mut next = Vec::with_capacity(pieces.len());
        for piece in pieces {
            match Subtract::new(&piece, cutter).execute() {
                SubtractOutcome::Untouched => next.push(piece),
                SubtractOutcome::Carved(fragments) => {
                    touched = true;
                    next.extend(fragments);
                }
            }
        }
        pieces = next;
    }
    touched.then_some(pieces)
}
