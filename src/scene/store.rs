use slotmap::SlotMap;

use crate::brush::Brush;
use crate::error::{Result, SceneError};
use crate::math::Vector3;

use super::SceneGraph;

slotmap::new_key_type! {
    /// Unique identifier for a node in the scene.
    pub struct NodeId;
}

/// What a scene node holds.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// The map itself; holds entities.
    Root,
    /// A container of brushes, identified by its class name.
    Entity { classname: String },
    /// A solid.
    Brush(Brush),
}

impl NodeKind {
    fn is_container(&self) -> bool {
        !matches!(self, Self::Brush(_))
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    visible: bool,
    /// Selection order stamp; zero when not selected.
    selected: u64,
    selected_faces: Vec<usize>,
}

impl NodeData {
    fn new(kind: NodeKind, parent: Option<NodeId>) -> Self {
        Self {
            kind,
            parent,
            children: Vec::new(),
            visible: true,
            selected: 0,
            selected_faces: Vec::new(),
        }
    }
}

/// In-memory scene: a root holding entities, which hold brushes.
///
/// The root and the world entity created with it are permanent.
#[derive(Debug, Clone)]
pub struct Scene {
    nodes: SlotMap<NodeId, NodeData>,
    root: NodeId,
    world: NodeId,
    selection_counter: u64,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Creates a scene holding only the root and an empty world entity.
    #[must_use]
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(NodeData::new(NodeKind::Root, None));
        let world = nodes.insert(NodeData::new(
            NodeKind::Entity {
                classname: "worldspawn".into(),
            },
            Some(root),
        ));
        if let Some(data) = nodes.get_mut(root) {
            data.children.push(world);
        }
        Self {
            nodes,
            root,
            world,
            selection_counter: 0,
        }
    }

    /// Returns the root node.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the world entity, the default container for brushes.
    #[must_use]
    pub fn world(&self) -> NodeId {
        self.world
    }

    /// Adds an entity under the root and returns its ID.
    pub fn add_entity(&mut self, classname: &str) -> NodeId {
        let id = self.nodes.insert(NodeData::new(
            NodeKind::Entity {
                classname: classname.into(),
            },
            Some(self.root),
        ));
        if let Some(root) = self.nodes.get_mut(self.root) {
            root.children.push(id);
        }
        id
    }

    /// Returns what node `id` holds.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not in the scene.
    pub fn kind(&self, id: NodeId) -> Result<&NodeKind> {
        Ok(&self.node(id)?.kind)
    }

    /// Returns the children of node `id` in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not in the scene.
    pub fn children(&self, id: NodeId) -> Result<&[NodeId]> {
        Ok(&self.node(id)?.children)
    }

    /// Returns `true` if `id` is still in the scene.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of nodes, including the root.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Shows or hides `id` and everything below it.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not in the scene.
    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> Result<()> {
        self.node_mut(id)?.visible = visible;
        Ok(())
    }

    /// Selects the face at `index` of brush `id` as a component.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not a brush.
    pub fn select_face(&mut self, id: NodeId, index: usize) -> Result<()> {
        let node = self.node_mut(id)?;
        if !matches!(node.kind, NodeKind::Brush(_)) {
            return Err(SceneError::NotABrush.into());
        }
        if !node.selected_faces.contains(&index) {
            node.selected_faces.push(index);
        }
        Ok(())
    }

    /// Deselects every node and face.
    pub fn clear_selection(&mut self) {
        for node in self.nodes.values_mut() {
            node.selected = 0;
            node.selected_faces.clear();
        }
    }

    fn node(&self, id: NodeId) -> Result<&NodeData> {
        self.nodes
            .get(id)
            .ok_or_else(|| SceneError::NodeNotFound.into())
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut NodeData> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| SceneError::NodeNotFound.into())
    }

    /// Visible brushes in depth-first order matching `filter`.
    fn collect_brushes(&self, filter: impl Fn(&NodeData) -> bool) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            if !node.visible {
                continue;
            }
            if matches!(node.kind, NodeKind::Brush(_)) && filter(node) {
                found.push(id);
            }
            stack.extend(node.children.iter().rev());
        }
        found
    }
}

impl SceneGraph for Scene {
    fn all_brushes(&self) -> Vec<NodeId> {
        self.collect_brushes(|_| true)
    }

    fn selected_brushes(&self) -> Vec<NodeId> {
        self.collect_brushes(|node| node.selected != 0)
    }

    fn ultimate_selected(&self) -> Option<NodeId> {
        self.selected_brushes()
            .into_iter()
            .max_by_key(|&id| self.nodes.get(id).map_or(0, |node| node.selected))
    }

    fn is_selected(&self, id: NodeId) -> Result<bool> {
        Ok(self.node(id)?.selected != 0)
    }

    fn set_selected(&mut self, id: NodeId, selected: bool) -> Result<()> {
        let stamp = if selected {
            self.selection_counter += 1;
            self.selection_counter
        } else {
            0
        };
        self.node_mut(id)?.selected = stamp;
        Ok(())
    }

    fn selected_face_normals(&self, id: NodeId) -> Result<Vec<Vector3>> {
        let node = self.node(id)?;
        let NodeKind::Brush(brush) = &node.kind else {
            return Err(SceneError::NotABrush.into());
        };
        Ok(node
            .selected_faces
            .iter()
            .filter_map(|&i| brush.face(i)?.normal().copied())
            .collect())
    }

    fn brush(&self, id: NodeId) -> Result<&Brush> {
        match &self.node(id)?.kind {
            NodeKind::Brush(brush) => Ok(brush),
            _ => Err(SceneError::NotABrush.into()),
        }
    }

    fn brush_mut(&mut self, id: NodeId) -> Result<&mut Brush> {
        let node = self.node_mut(id)?;
        let NodeKind::Brush(brush) = &mut node.kind else {
            return Err(SceneError::NotABrush.into());
        };
        // Face indices do not survive edits that drop or reorder faces.
        node.selected_faces.clear();
        Ok(brush)
    }

    fn parent(&self, id: NodeId) -> Result<NodeId> {
        self.node(id)?
            .parent
            .ok_or_else(|| SceneError::NodeNotFound.into())
    }

    fn insert_brush(&mut self, parent: NodeId, brush: Brush) -> Result<NodeId> {
        if !self.node(parent)?.kind.is_container() {
            return Err(SceneError::NotAContainer.into());
        }
        let id = self
            .nodes
            .insert(NodeData::new(NodeKind::Brush(brush), Some(parent)));
        self.node_mut(parent)?.children.push(id);
        Ok(id)
    }

    fn remove(&mut self, id: NodeId) -> Result<()> {
        let node = self.nodes.remove(id).ok_or(SceneError::NodeNotFound)?;
        if let Some(parent) = node.parent.and_then(|p| self.nodes.get_mut(p)) {
            parent.children.retain(|&child| child != id);
        }
        let mut pending = node.children;
        while let Some(child) = pending.pop() {
            if let Some(removed) = self.nodes.remove(child) {
                pending.extend(removed.children);
            }
        }
        Ok(())
    }

    fn is_empty(&self, id: NodeId) -> Result<bool> {
        let node = self.node(id)?;
        if !node.kind.is_container() {
            return Err(SceneError::NotAContainer.into());
        }
        Ok(node.children.is_empty())
    }

    fn is_permanent(&self, id: NodeId) -> bool {
        id == self.root || id == self.world
    }
}
