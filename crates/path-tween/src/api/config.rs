use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Configuration for a tween manager, provided by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TweenConfig {
    /// Slots pre-allocated in the pool and the active list (default: 32).
    pub initial_capacity: usize,
    /// Curve subdivisions per waypoint span for new requests (default: 10).
    pub default_segment: u32,
    /// World up vector used when facing the direction of travel (default: +Y).
    pub up: Vec3,
}

impl Default for TweenConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 32,
            default_segment: 10,
            up: Vec3::Y,
        }
    }
}

impl TweenConfig {
    /// Parse a config from a JSON string. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
