mod shaders;
mod store;
mod undo;

pub use shaders::{ShaderDefaults, ShaderSource};
pub use store::{NodeId, NodeKind, Scene};
pub use undo::{UndoLog, UndoScope, UndoSystem};

use crate::brush::Brush;
use crate::error::Result;
use crate::math::Vector3;

/// A tree of containers holding brushes, with selection and visibility.
///
/// Host editors implement this over their own node graph; [`Scene`] is a
/// self-contained implementation. Enumeration methods return visible nodes
/// only, in depth-first order.
pub trait SceneGraph {
    /// Every visible brush.
    fn all_brushes(&self) -> Vec<NodeId>;

    /// Every visible, selected brush.
    fn selected_brushes(&self) -> Vec<NodeId>;

    /// The brush selected most recently, if it is still selected and visible.
    fn ultimate_selected(&self) -> Option<NodeId>;

    /// Returns `true` if `id` is selected.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not in the scene.
    fn is_selected(&self, id: NodeId) -> Result<bool>;

    /// Selects or deselects `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not in the scene.
    fn set_selected(&mut self, id: NodeId, selected: bool) -> Result<()>;

    /// Outward normals of the faces selected on brush `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not a brush.
    fn selected_face_normals(&self, id: NodeId) -> Result<Vec<Vector3>>;

    /// Returns the brush held by node `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not a brush.
    fn brush(&self, id: NodeId) -> Result<&Brush>;

    /// Returns the brush held by node `id` for modification.
    ///
    /// Implementations that track selected faces by index should drop that
    /// selection here, since the caller may remove or reorder faces.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not a brush.
    fn brush_mut(&mut self, id: NodeId) -> Result<&mut Brush>;

    /// Returns the container holding `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not in the scene or has no parent.
    fn parent(&self, id: NodeId) -> Result<NodeId>;

    /// Moves `brush` into the container `parent` and returns its node.
    ///
    /// # Errors
    ///
    /// Returns an error if `parent` is not a container.
    fn insert_brush(&mut self, parent: NodeId, brush: Brush) -> Result<NodeId>;

    /// Removes `id` and everything below it.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not in the scene.
    fn remove(&mut self, id: NodeId) -> Result<()>;

    /// Returns `true` if the container `id` holds nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not a container.
    fn is_empty(&self, id: NodeId) -> Result<bool>;

    /// Returns `true` for nodes that are never removed when emptied.
    fn is_permanent(&self, id: NodeId) -> bool;

    /// Removes brush `id`, then its container if that is left empty.
    ///
    /// Permanent containers and `keep` survive being emptied.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not in the scene.
    fn remove_brush(&mut self, id: NodeId, keep: Option<NodeId>) -> Result<()> {
        let parent = self.parent(id)?;
        self.remove(id)?;
        if Some(parent) != keep && !self.is_permanent(parent) && self.is_empty(parent)? {
            self.remove(parent)?;
        }
        Ok(())
    }

    /// Removes every visible selected brush, pruning emptied containers.
    ///
    /// Returns the number of brushes removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the scene changes shape during the call.
    fn delete_selected(&mut self, keep: Option<NodeId>) -> Result<usize> {
        let selected = self.selected_brushes();
        for &id in &selected {
            self.remove_brush(id, keep)?;
        }
        Ok(selected.len())
    }
}
