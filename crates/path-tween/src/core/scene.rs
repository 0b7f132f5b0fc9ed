use glam::{Quat, Vec3};
use crate::api::types::NodeId;
use crate::components::node::Node;
use crate::core::host::TransformHost;

/// Simple node storage using a flat Vec.
/// Designed for small-to-medium node counts (hundreds, not millions).
pub struct Scene {
    nodes: Vec<Node>,
    next_id: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    /// Create a scene with a specific node capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            next_id: 1,
        }
    }

    /// Generate the next unique node ID.
    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a node to the scene.
    pub fn spawn(&mut self, node: Node) {
        self.next_id = self.next_id.max(node.id.0 + 1);
        self.nodes.push(node);
    }

    /// Spawn a fresh node at `pos` and return its id.
    pub fn spawn_at(&mut self, pos: Vec3) -> NodeId {
        let id = self.next_id();
        self.nodes.push(Node::new(id).with_pos(pos));
        id
    }

    /// Remove a node by ID. Returns the removed node if found.
    pub fn despawn(&mut self, id: NodeId) -> Option<Node> {
        let idx = self.nodes.iter().position(|n| n.id == id)?;
        Some(self.nodes.swap_remove(idx))
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Find the first node with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.tag == tag)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformHost for Scene {
    fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    fn position(&self, id: NodeId) -> Option<Vec3> {
        self.get(id).map(|n| n.pos)
    }

    fn set_position(&mut self, id: NodeId, pos: Vec3) {
        if let Some(node) = self.get_mut(id) {
            node.pos = pos;
        }
    }

    fn set_rotation(&mut self, id: NodeId, rotation: Quat) {
        if let Some(node) = self.get_mut(id) {
            node.rotation = rotation;
        }
    }
}
