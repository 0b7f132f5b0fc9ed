//! Where a tween's waypoints come from.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use crate::api::types::{NodeId, PathStyle, PathwayShape};
use crate::core::host::TransformHost;

/// Waypoints for a tween: fixed positions, or live nodes sampled once when
/// the tween is created. Later movement of those nodes is not followed.
#[derive(Debug, Clone, PartialEq)]
pub enum WaypointSource {
    Points(Vec<Vec3>),
    Nodes(Vec<NodeId>),
}

impl WaypointSource {
    pub fn is_empty(&self) -> bool {
        match self {
            WaypointSource::Points(points) => points.is_empty(),
            WaypointSource::Nodes(nodes) => nodes.is_empty(),
        }
    }

    /// Resolve to positions, appending to `out`.
    ///
    /// Nodes missing from the host are skipped (authoring tools may leave
    /// holes in a node list). Returns the number of positions written.
    pub fn sample_into<H>(&self, host: &H, out: &mut Vec<Vec3>) -> usize
    where
        H: TransformHost + ?Sized,
    {
        let before = out.len();
        match self {
            WaypointSource::Points(points) => out.extend_from_slice(points),
            WaypointSource::Nodes(nodes) => {
                for &id in nodes {
                    match host.position(id) {
                        Some(pos) => out.push(pos),
                        None => log::warn!("waypoint node {:?} is missing, skipped", id),
                    }
                }
            }
        }
        out.len() - before
    }
}

impl From<Vec<Vec3>> for WaypointSource {
    fn from(points: Vec<Vec3>) -> Self {
        WaypointSource::Points(points)
    }
}

impl From<Vec<NodeId>> for WaypointSource {
    fn from(nodes: Vec<NodeId>) -> Self {
        WaypointSource::Nodes(nodes)
    }
}

/// An authored path as saved by editor tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaypointPath {
    pub points: Vec<Vec3>,
    #[serde(default)]
    pub shape: PathwayShape,
    #[serde(default)]
    pub style: PathStyle,
    /// Curve subdivisions per span (default: 10).
    #[serde(default = "default_segment")]
    pub segment: u32,
}

fn default_segment() -> u32 {
    10
}

impl WaypointPath {
    /// Parse a path from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
