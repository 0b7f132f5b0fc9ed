use std::fmt;
use glam::Vec3;
use crate::api::error::TweenError;
use crate::api::types::{NodeId, PathStyle, PathwayShape};
use crate::core::host::TransformHost;
use crate::path::waypoints::{WaypointPath, WaypointSource};
use super::manager::TweenManager;

/// Completion notification. Receives the manager and host so it can chain
/// new tweens (or cancel others) from inside `tick`.
pub type OnComplete = Box<dyn FnOnce(&mut TweenManager, &mut dyn TransformHost)>;

/// Everything needed to start a path tween. Built with the `with_*` methods
/// and handed to [`TweenManager::create`].
pub struct PathTween {
    /// Node being moved.
    pub target: NodeId,
    pub waypoints: WaypointSource,
    /// Duration in seconds, must be > 0.
    pub duration: f32,
    pub shape: PathwayShape,
    pub style: PathStyle,
    /// Curve subdivisions per span. `None` uses the manager's default.
    pub segment: Option<u32>,
    /// Restart from the first waypoint instead of completing.
    pub looping: bool,
    /// Rotate the target to face its direction of travel.
    pub align_forward: bool,
    /// Start paused.
    pub paused: bool,
    pub on_complete: Option<OnComplete>,
}

impl PathTween {
    pub fn new(target: NodeId, waypoints: impl Into<WaypointSource>, duration: f32) -> Self {
        Self {
            target,
            waypoints: waypoints.into(),
            duration,
            shape: PathwayShape::Line,
            style: PathStyle::Normal,
            segment: None,
            looping: false,
            align_forward: false,
            paused: false,
            on_complete: None,
        }
    }

    /// Tween through fixed positions.
    pub fn through_points(target: NodeId, points: Vec<Vec3>, duration: f32) -> Self {
        Self::new(target, WaypointSource::Points(points), duration)
    }

    /// Tween through the current positions of `nodes`, sampled at creation.
    pub fn through_nodes(target: NodeId, nodes: Vec<NodeId>, duration: f32) -> Self {
        Self::new(target, WaypointSource::Nodes(nodes), duration)
    }

    /// Tween along an authored path, taking its shape, style and segment.
    pub fn along(target: NodeId, path: &WaypointPath, duration: f32) -> Self {
        Self::through_points(target, path.points.clone(), duration)
            .with_shape(path.shape)
            .with_style(path.style)
            .with_segment(path.segment)
    }

    // -- Builder methods --

    pub fn with_shape(mut self, shape: PathwayShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_style(mut self, style: PathStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_segment(mut self, segment: u32) -> Self {
        self.segment = Some(segment);
        self
    }

    pub fn with_loop(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn with_align_forward(mut self, align: bool) -> Self {
        self.align_forward = align;
        self
    }

    pub fn paused(mut self) -> Self {
        self.paused = true;
        self
    }

    /// Call `f` once when the tween finishes. Never called for looping or
    /// cancelled tweens.
    pub fn with_on_complete(self, f: impl FnOnce() + 'static) -> Self {
        self.with_on_complete_mut(move |_, _| f())
    }

    /// Like [`with_on_complete`](Self::with_on_complete), with access to the
    /// manager and host for chaining.
    pub fn with_on_complete_mut(
        mut self,
        f: impl FnOnce(&mut TweenManager, &mut dyn TransformHost) + 'static,
    ) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    /// Check the parameters that do not depend on the host.
    pub(crate) fn validate(&self, segment: u32) -> Result<(), TweenError> {
        if !(self.duration.is_finite() && self.duration > 0.0) {
            return Err(TweenError::InvalidParameters("duration must be positive"));
        }
        if self.waypoints.is_empty() {
            return Err(TweenError::InvalidParameters("waypoint sequence is empty"));
        }
        if self.shape == PathwayShape::Curve && segment == 0 {
            return Err(TweenError::InvalidParameters("curve segment count must be positive"));
        }
        Ok(())
    }
}

impl fmt::Debug for PathTween {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathTween")
            .field("target", &self.target)
            .field("waypoints", &self.waypoints)
            .field("duration", &self.duration)
            .field("shape", &self.shape)
            .field("style", &self.style)
            .field("segment", &self.segment)
            .field("looping", &self.looping)
            .field("align_forward", &self.align_forward)
            .field("paused", &self.paused)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}
