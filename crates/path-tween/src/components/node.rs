use glam::{Quat, Vec3};
use crate::api::types::NodeId;

/// A positioned node in a scene: a tween target or a live waypoint.
#[derive(Debug, Clone)]
pub struct Node {
    /// Unique identifier.
    pub id: NodeId,
    /// Name for lookups (waypoint nodes are usually `PathPoint(n)`).
    pub tag: String,
    /// Position in world space.
    pub pos: Vec3,
    /// Orientation in world space.
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Node {
    /// Create a new node at the origin with identity rotation.
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            tag: String::new(),
            pos: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Direction the node is facing (+Z in local space).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }
}
