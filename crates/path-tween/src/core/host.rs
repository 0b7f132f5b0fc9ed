//! The boundary between the tween engine and whatever owns the transforms.

use glam::{Quat, Vec3};
use crate::api::types::NodeId;

/// Transform storage that tweens read from and write to.
///
/// The engine never creates or destroys nodes; it only samples positions
/// (for live waypoints) and writes position/rotation of its targets.
pub trait TransformHost {
    /// Whether a node with this id exists.
    fn contains(&self, id: NodeId) -> bool;

    /// Current world position of a node.
    fn position(&self, id: NodeId) -> Option<Vec3>;

    /// Move a node. Unknown ids are ignored.
    fn set_position(&mut self, id: NodeId, pos: Vec3);

    /// Rotate a node. Unknown ids are ignored.
    fn set_rotation(&mut self, id: NodeId, rotation: Quat);
}
