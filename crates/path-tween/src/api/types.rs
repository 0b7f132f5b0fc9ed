use serde::{Deserialize, Serialize};
use crate::extensions::easing::Easing;

/// Identifier of a node (transform) owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

/// Handle to an active path tween.
///
/// Handed out from a monotonic counter, so a handle is never reused for a
/// later tween even after its slot is recycled. `TweenId(0)` is never issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TweenId(pub u32);

/// Interpolation family used between waypoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PathwayShape {
    /// Straight segments through every waypoint.
    #[default]
    Line,
    /// Catmull-Rom curve through every waypoint.
    Curve,
}

/// How time progress is mapped before the arc-length lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PathStyle {
    /// Constant speed along the path.
    #[default]
    Normal,
    /// Progress remapped through an easing curve.
    Eased(Easing),
}

impl PathStyle {
    /// Map normalized time to normalized distance along the path.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        match self {
            PathStyle::Normal => t,
            PathStyle::Eased(easing) => easing.apply(t),
        }
    }
}
