use thiserror::Error;
use crate::api::types::{NodeId, TweenId};

/// Failures reported by the tween manager.
///
/// All of them are recoverable and leave the manager untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TweenError {
    /// The target node does not exist in the host.
    #[error("target node {0:?} does not exist")]
    InvalidTarget(NodeId),

    /// Duration, waypoints or subdivision were rejected.
    #[error("invalid tween parameters: {0}")]
    InvalidParameters(&'static str),

    /// No active tween holds this handle.
    #[error("no active tween with id {0:?}")]
    NotFound(TweenId),
}
