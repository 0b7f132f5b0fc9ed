use glam::Vec3;
use crate::api::error::TweenError;
use crate::api::types::{NodeId, PathStyle, PathwayShape, TweenId};
use crate::core::host::TransformHost;
use crate::path::interpolator::{look_rotation, PathSample, PathTable};
use super::request::{OnComplete, PathTween};

/// Outcome of advancing a tween's clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Running,
    Completed,
}

/// Run state of one tween, stored in a pool slot and reused across tweens.
#[derive(Default)]
pub(crate) struct TweenInstance {
    pub id: TweenId,
    /// Cleared on release so the pool never refers to a host node.
    pub target: Option<NodeId>,
    /// Waypoints as sampled at creation.
    pub waypoints: Vec<Vec3>,
    pub table: PathTable,
    pub duration: f32,
    /// Seconds into the current run, in [0, duration].
    pub elapsed: f32,
    pub shape: PathwayShape,
    pub style: PathStyle,
    pub looping: bool,
    pub align_forward: bool,
    pub playing: bool,
    /// Span found by the last lookup. Only a hint.
    cursor: usize,
    pub on_complete: Option<OnComplete>,
    /// Set between acquire and release.
    pub live: bool,
}

impl TweenInstance {
    /// Fill this slot from a validated request. On error the slot is left
    /// for the caller to release.
    pub fn init<H>(
        &mut self,
        id: TweenId,
        host: &H,
        tween: PathTween,
        segment: u32,
    ) -> Result<(), TweenError>
    where
        H: TransformHost + ?Sized,
    {
        self.waypoints.clear();
        if tween.waypoints.sample_into(host, &mut self.waypoints) == 0 {
            return Err(TweenError::InvalidParameters("no waypoint node could be sampled"));
        }
        self.table.rebuild(&self.waypoints, tween.shape, segment);

        self.id = id;
        self.target = Some(tween.target);
        self.duration = tween.duration;
        self.elapsed = 0.0;
        self.shape = tween.shape;
        self.style = tween.style;
        self.looping = tween.looping;
        self.align_forward = tween.align_forward;
        self.playing = !tween.paused;
        self.cursor = 0;
        self.on_complete = tween.on_complete;
        Ok(())
    }

    /// Drop every per-run reference, keeping buffer capacity.
    /// Returns the completion callback if it was never taken.
    pub fn reset(&mut self) -> Option<OnComplete> {
        self.target = None;
        self.waypoints.clear();
        self.table.clear();
        self.elapsed = 0.0;
        self.cursor = 0;
        self.playing = false;
        self.on_complete.take()
    }

    /// Advance the clock. Negative and non-finite deltas count as zero.
    pub fn advance(&mut self, dt: f32) -> Step {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.elapsed += dt;
        if self.elapsed < self.duration {
            return Step::Running;
        }
        if self.looping {
            self.elapsed = self.elapsed.rem_euclid(self.duration);
            Step::Running
        } else {
            self.elapsed = self.duration;
            Step::Completed
        }
    }

    /// Normalized time in [0, 1].
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Resolve the current position and direction of travel.
    pub fn sample(&mut self) -> PathSample {
        let distance = self.style.apply(self.progress());
        self.table.resolve(distance, &mut self.cursor)
    }

    /// Write the current sample to the target.
    pub fn apply<H>(&mut self, host: &mut H, up: Vec3)
    where
        H: TransformHost + ?Sized,
    {
        let Some(target) = self.target else { return };
        let sample = self.sample();
        host.set_position(target, sample.position);
        if self.align_forward {
            if let Some(forward) = sample.forward {
                host.set_rotation(target, look_rotation(forward, up));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::Scene;
    use crate::tween::manager::TweenManager;

    fn instance(looping: bool) -> TweenInstance {
        let scene = Scene::new();
        let tween = PathTween::through_points(NodeId(1), vec![Vec3::ZERO, Vec3::X * 10.0], 10.0)
            .with_loop(looping);
        let mut inst = TweenInstance::default();
        inst.init(TweenId(1), &scene, tween, 10).unwrap();
        inst
    }

    #[test]
    fn one_shot_clamps_at_duration() {
        let mut inst = instance(false);
        assert_eq!(inst.advance(4.0), Step::Running);
        assert_eq!(inst.advance(40.0), Step::Completed);
        assert_eq!(inst.elapsed, 10.0);
        assert_eq!(inst.progress(), 1.0);
    }

    #[test]
    fn loop_wraps_elapsed() {
        let mut inst = instance(true);
        assert_eq!(inst.advance(12.0), Step::Running);
        assert!((inst.elapsed - 2.0).abs() < 1e-4);
        assert_eq!(inst.advance(10.0), Step::Running);
        assert!((inst.elapsed - 2.0).abs() < 1e-4);
    }

    #[test]
    fn bad_deltas_do_not_move_the_clock() {
        let mut inst = instance(false);
        inst.advance(3.0);
        for dt in [0.0, -5.0, f32::NAN, f32::NEG_INFINITY] {
            inst.advance(dt);
        }
        assert_eq!(inst.elapsed, 3.0);
    }

    #[test]
    fn reset_releases_references() {
        let mut inst = instance(false);
        inst.on_complete = Some(Box::new(|_: &mut TweenManager, _: &mut dyn TransformHost| {}));
        let callback = inst.reset();
        assert!(callback.is_some());
        assert!(inst.target.is_none());
        assert!(inst.waypoints.is_empty());
        assert!(inst.table.is_empty());
        assert!(inst.on_complete.is_none());
    }
}
