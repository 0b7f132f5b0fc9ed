// tween/manager.rs
//
// Owns every live path tween, pumps them once per host tick and recycles
// finished ones through the slot pool.
//
// Usage:
//   let mut tweens = TweenManager::new();
//   let id = tweens.create(&scene, PathTween::through_points(node, points, 2.0))?;
//   tweens.tick(dt, &mut scene);  // Advances all tweens, moves their targets

use glam::Vec3;
use crate::api::config::TweenConfig;
use crate::api::error::TweenError;
use crate::api::types::{NodeId, PathwayShape, TweenId};
use crate::core::host::TransformHost;
use super::instance::Step;
use super::pool::TweenPool;
use super::request::PathTween;

#[derive(Debug, Clone, Copy)]
struct ActiveTween {
    id: TweenId,
    slot: usize,
}

/// Read-only view of an active tween, for inspectors and debug drawing.
#[derive(Debug, Clone, Copy)]
pub struct TweenView<'a> {
    pub id: TweenId,
    pub target: NodeId,
    /// Normalized time in [0, 1].
    pub progress: f32,
    pub looping: bool,
    pub paused: bool,
    pub shape: PathwayShape,
    /// Waypoints as sampled at creation.
    pub waypoints: &'a [Vec3],
    /// Points the path is interpolated through (waypoints for `Line`,
    /// subdivided curve samples for `Curve`).
    pub path: &'a [Vec3],
}

/// Manages all active path tweens.
///
/// Tweens are advanced in the order they were created. Completion callbacks
/// run inside [`tick`](Self::tick) and may create or cancel tweens.
pub struct TweenManager {
    config: TweenConfig,
    pool: TweenPool,
    /// Registration order.
    active: Vec<ActiveTween>,
    next_id: u32,
    /// Id snapshot reused by `tick`.
    order: Vec<TweenId>,
}

impl TweenManager {
    pub fn new() -> Self {
        Self::with_config(TweenConfig::default())
    }

    pub fn with_config(config: TweenConfig) -> Self {
        let capacity = config.initial_capacity;
        Self {
            config,
            pool: TweenPool::with_capacity(capacity),
            active: Vec::with_capacity(capacity),
            next_id: 1,
            order: Vec::with_capacity(capacity),
        }
    }

    pub fn config(&self) -> &TweenConfig {
        &self.config
    }

    /// Start a tween. The target does not move until the next `tick`.
    ///
    /// On error nothing is registered and no id is consumed.
    pub fn create<H>(&mut self, host: &H, tween: PathTween) -> Result<TweenId, TweenError>
    where
        H: TransformHost + ?Sized,
    {
        if !host.contains(tween.target) {
            log::warn!("path tween rejected: target {:?} does not exist", tween.target);
            return Err(TweenError::InvalidTarget(tween.target));
        }
        let segment = tween.segment.unwrap_or(self.config.default_segment);
        if let Err(err) = tween.validate(segment) {
            log::warn!("path tween rejected: {}", err);
            return Err(err);
        }

        let id = TweenId(self.next_id);
        let (slot, instance) = self.pool.acquire();
        if let Err(err) = instance.init(id, host, tween, segment) {
            self.pool.release(slot);
            log::warn!("path tween rejected: {}", err);
            return Err(err);
        }
        log::debug!(
            "path tween {:?} started on {:?}: {} waypoints, {:?}, {}s",
            id,
            instance.target,
            instance.waypoints.len(),
            instance.shape,
            instance.duration,
        );

        self.next_id += 1;
        self.active.push(ActiveTween { id, slot });
        Ok(id)
    }

    /// Advance every tween by `dt` seconds and move its target.
    /// Returns the number of tweens that completed this tick.
    ///
    /// Works on a snapshot of the ids registered when the tick starts: tweens
    /// created by callbacks wait for the next tick, tweens cancelled by
    /// callbacks are skipped.
    pub fn tick<H: TransformHost>(&mut self, dt: f32, host: &mut H) -> usize {
        let mut order = std::mem::take(&mut self.order);
        order.clear();
        order.extend(self.active.iter().map(|a| a.id));

        let up = self.config.up;
        let mut completed = 0;
        let mut hint = 0;
        for &id in &order {
            let index = match self.active.get(hint) {
                Some(a) if a.id == id => hint,
                _ => match self.lookup(id) {
                    Some(index) => index,
                    None => continue,
                },
            };
            let slot = self.active[index].slot;
            let instance = self.pool.get_mut(slot);
            debug_assert_eq!(instance.id, id);
            if !instance.playing {
                hint = index + 1;
                continue;
            }

            let step = instance.advance(dt);
            instance.apply(host, up);
            if step == Step::Running {
                hint = index + 1;
                continue;
            }

            // Deregister before the callback so it sees a consistent manager.
            self.active.remove(index);
            hint = index;
            completed += 1;
            let on_complete = self.pool.release(slot);
            log::debug!("path tween {:?} completed", id);
            if let Some(on_complete) = on_complete {
                on_complete(self, host);
            }
        }

        self.order = order;
        completed
    }

    /// Stop a tween where it is, without its completion callback.
    pub fn cancel(&mut self, id: TweenId) -> Result<(), TweenError> {
        let Some(index) = self.lookup(id) else {
            log::warn!("cannot cancel path tween {:?}: not active", id);
            return Err(TweenError::NotFound(id));
        };
        let active = self.active.remove(index);
        self.pool.release(active.slot);
        log::debug!("path tween {:?} cancelled", id);
        Ok(())
    }

    /// Cancel every tween driving `target`. Returns how many were removed.
    pub fn cancel_target(&mut self, target: NodeId) -> usize {
        let mut removed = 0;
        for index in (0..self.active.len()).rev() {
            let slot = self.active[index].slot;
            if self.pool.get(slot).target == Some(target) {
                self.active.remove(index);
                self.pool.release(slot);
                removed += 1;
            }
        }
        removed
    }

    /// Cancel everything, firing no callbacks. Used for teardown.
    pub fn cancel_all(&mut self) {
        while let Some(active) = self.active.pop() {
            self.pool.release(active.slot);
        }
    }

    /// Index of an active tween in registration order.
    pub fn lookup(&self, id: TweenId) -> Option<usize> {
        self.active.iter().position(|a| a.id == id)
    }

    pub fn exists(&self, id: TweenId) -> bool {
        self.lookup(id).is_some()
    }

    /// Stop advancing a tween until resumed.
    pub fn pause(&mut self, id: TweenId) -> Result<(), TweenError> {
        self.set_playing(id, false)
    }

    pub fn resume(&mut self, id: TweenId) -> Result<(), TweenError> {
        self.set_playing(id, true)
    }

    pub fn is_paused(&self, id: TweenId) -> Option<bool> {
        self.instance(id).map(|i| !i.playing)
    }

    /// Normalized time of an active tween.
    pub fn progress(&self, id: TweenId) -> Option<f32> {
        self.instance(id).map(|i| i.progress())
    }

    /// Active tweens in registration order.
    pub fn iter(&self) -> impl Iterator<Item = TweenView<'_>> {
        self.active.iter().filter_map(|a| {
            let instance = self.pool.get(a.slot);
            Some(TweenView {
                id: a.id,
                target: instance.target?,
                progress: instance.progress(),
                looping: instance.looping,
                paused: !instance.playing,
                shape: instance.shape,
                waypoints: &instance.waypoints,
                path: instance.table.points(),
            })
        })
    }

    /// Number of active tweens.
    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Released slots waiting for reuse.
    pub fn pooled(&self) -> usize {
        self.pool.free_count()
    }

    fn instance(&self, id: TweenId) -> Option<&super::instance::TweenInstance> {
        let index = self.lookup(id)?;
        Some(self.pool.get(self.active[index].slot))
    }

    fn set_playing(&mut self, id: TweenId, playing: bool) -> Result<(), TweenError> {
        let index = self.lookup(id).ok_or(TweenError::NotFound(id))?;
        let slot = self.active[index].slot;
        self.pool.get_mut(slot).playing = playing;
        Ok(())
    }
}

impl Default for TweenManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;
    use glam::Quat;
    use super::*;
    use crate::api::types::PathStyle;
    use crate::core::scene::Scene;
    use crate::extensions::easing::Easing;

    fn setup() -> (Scene, NodeId) {
        let mut scene = Scene::new();
        let node = scene.spawn_at(Vec3::new(-1.0, -1.0, -1.0));
        (scene, node)
    }

    fn straight() -> Vec<Vec3> {
        vec![Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)]
    }

    fn pos(scene: &Scene, id: NodeId) -> Vec3 {
        scene.get(id).unwrap().pos
    }

    fn counter() -> (Rc<Cell<u32>>, impl FnOnce() + 'static) {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        (count, move || c.set(c.get() + 1))
    }

    #[test]
    fn line_tween_reaches_end_and_completes_once() {
        let (mut scene, node) = setup();
        let mut tweens = TweenManager::new();
        let (fired, on_complete) = counter();
        tweens
            .create(
                &scene,
                PathTween::through_points(node, straight(), 10.0).with_on_complete(on_complete),
            )
            .unwrap();

        // No side effect before the first tick.
        assert_eq!(pos(&scene, node), Vec3::new(-1.0, -1.0, -1.0));

        assert_eq!(tweens.tick(5.0, &mut scene), 0);
        assert!(pos(&scene, node).distance(Vec3::new(5.0, 0.0, 0.0)) < 0.01);

        assert_eq!(tweens.tick(5.0, &mut scene), 1);
        assert!(pos(&scene, node).distance(Vec3::new(10.0, 0.0, 0.0)) < 0.01);
        assert_eq!(fired.get(), 1);
        assert!(tweens.is_empty());

        for _ in 0..5 {
            tweens.tick(1.0, &mut scene);
        }
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn looping_tween_wraps_and_never_completes() {
        let (mut scene, node) = setup();
        let mut tweens = TweenManager::new();
        let (fired, on_complete) = counter();
        let id = tweens
            .create(
                &scene,
                PathTween::through_points(node, straight(), 10.0)
                    .with_loop(true)
                    .with_on_complete(on_complete),
            )
            .unwrap();

        tweens.tick(12.0, &mut scene);
        tweens.tick(3.0, &mut scene);
        assert!(pos(&scene, node).distance(Vec3::new(5.0, 0.0, 0.0)) < 0.01);

        for _ in 0..20 {
            tweens.tick(3.7, &mut scene);
        }
        assert_eq!(fired.get(), 0);
        assert!(tweens.exists(id));
    }

    #[test]
    fn loop_position_repeats_each_cycle() {
        let points = vec![Vec3::ZERO, Vec3::new(3.0, 1.0, 0.0), Vec3::new(5.0, 4.0, 2.0)];
        for eps in [0.1, 1.3, 2.9] {
            let mut positions = Vec::new();
            for elapsed in [eps, 3.0 + eps] {
                let (mut scene, node) = setup();
                let mut tweens = TweenManager::new();
                let tween = PathTween::through_points(node, points.clone(), 3.0)
                    .with_shape(PathwayShape::Curve)
                    .with_loop(true);
                tweens.create(&scene, tween).unwrap();
                tweens.tick(elapsed, &mut scene);
                positions.push(pos(&scene, node));
            }
            assert!(positions[0].distance(positions[1]) < 0.01, "eps {}", eps);
        }
    }

    #[test]
    fn zero_delta_ticks_are_idempotent() {
        let (mut scene, node) = setup();
        let mut tweens = TweenManager::new();
        tweens
            .create(&scene, PathTween::through_points(node, straight(), 10.0).with_align_forward(true))
            .unwrap();
        tweens.tick(2.5, &mut scene);
        tweens.tick(0.0, &mut scene);
        let first = scene.get(node).unwrap().clone();
        tweens.tick(0.0, &mut scene);
        tweens.tick(-1.0, &mut scene);
        let second = scene.get(node).unwrap();
        assert_eq!(first.pos, second.pos);
        assert_eq!(first.rotation, second.rotation);
    }

    #[test]
    fn single_waypoint_holds_position_without_rotating() {
        let (mut scene, node) = setup();
        let mut tweens = TweenManager::new();
        let p = Vec3::new(3.0, 3.0, 3.0);
        tweens
            .create(&scene, PathTween::through_points(node, vec![p], 4.0).with_align_forward(true))
            .unwrap();
        for _ in 0..5 {
            tweens.tick(1.0, &mut scene);
            assert_eq!(pos(&scene, node), p);
            assert_eq!(scene.get(node).unwrap().rotation, Quat::IDENTITY);
        }
        assert!(tweens.is_empty());
    }

    #[test]
    fn align_forward_faces_direction_of_travel() {
        let (mut scene, node) = setup();
        let mut tweens = TweenManager::new();
        tweens
            .create(&scene, PathTween::through_points(node, straight(), 10.0).with_align_forward(true))
            .unwrap();
        tweens.tick(3.0, &mut scene);
        let facing = scene.get(node).unwrap().forward();
        assert!(facing.distance(Vec3::X) < 1e-4);
    }

    #[test]
    fn curve_tween_ends_on_last_waypoint() {
        let (mut scene, node) = setup();
        let mut tweens = TweenManager::new();
        let points = vec![Vec3::ZERO, Vec3::new(2.0, 5.0, 0.0), Vec3::new(6.0, 0.0, 1.0)];
        tweens
            .create(
                &scene,
                PathTween::through_points(node, points, 1.0)
                    .with_shape(PathwayShape::Curve)
                    .with_segment(6)
                    .with_style(PathStyle::Eased(Easing::QuadInOut)),
            )
            .unwrap();
        tweens.tick(0.6, &mut scene);
        tweens.tick(0.6, &mut scene);
        assert!(pos(&scene, node).distance(Vec3::new(6.0, 0.0, 1.0)) < 1e-4);
    }

    #[test]
    fn cancel_unknown_id_is_not_found() {
        let (scene, node) = setup();
        let mut tweens = TweenManager::new();
        tweens.create(&scene, PathTween::through_points(node, straight(), 1.0)).unwrap();
        assert_eq!(tweens.cancel(TweenId(42)), Err(TweenError::NotFound(TweenId(42))));
        assert_eq!(tweens.len(), 1);
    }

    #[test]
    fn cancel_skips_completion_and_keeps_last_position() {
        let (mut scene, node) = setup();
        let mut tweens = TweenManager::new();
        let (fired, on_complete) = counter();
        let id = tweens
            .create(
                &scene,
                PathTween::through_points(node, straight(), 10.0).with_on_complete(on_complete),
            )
            .unwrap();
        tweens.tick(4.0, &mut scene);
        tweens.cancel(id).unwrap();
        assert_eq!(tweens.cancel(id), Err(TweenError::NotFound(id)));

        tweens.tick(10.0, &mut scene);
        assert_eq!(fired.get(), 0);
        assert!(pos(&scene, node).distance(Vec3::new(4.0, 0.0, 0.0)) < 0.01);
        assert_eq!(tweens.pooled(), 1);
    }

    #[test]
    fn failed_create_changes_nothing() {
        let (scene, node) = setup();
        let mut tweens = TweenManager::new();

        let missing = PathTween::through_points(NodeId(999), straight(), 1.0);
        assert_eq!(tweens.create(&scene, missing).unwrap_err(), TweenError::InvalidTarget(NodeId(999)));

        let zero = PathTween::through_points(node, straight(), 0.0);
        assert!(matches!(tweens.create(&scene, zero), Err(TweenError::InvalidParameters(_))));

        let empty = PathTween::through_points(node, Vec::new(), 1.0);
        assert!(matches!(tweens.create(&scene, empty), Err(TweenError::InvalidParameters(_))));

        let flat_curve = PathTween::through_points(node, straight(), 1.0)
            .with_shape(PathwayShape::Curve)
            .with_segment(0);
        assert!(matches!(tweens.create(&scene, flat_curve), Err(TweenError::InvalidParameters(_))));

        let ghosts = PathTween::through_nodes(node, vec![NodeId(500), NodeId(501)], 1.0);
        assert!(matches!(tweens.create(&scene, ghosts), Err(TweenError::InvalidParameters(_))));

        assert!(tweens.is_empty());
        let id = tweens.create(&scene, PathTween::through_points(node, straight(), 1.0)).unwrap();
        assert_eq!(id, TweenId(1));
    }

    #[test]
    fn ids_are_unique_while_slots_are_reused() {
        let (mut scene, node) = setup();
        let mut tweens = TweenManager::new();
        let mut seen = Vec::new();
        for _ in 0..4 {
            let id = tweens.create(&scene, PathTween::through_points(node, straight(), 1.0)).unwrap();
            assert!(!seen.contains(&id));
            seen.push(id);
            tweens.tick(1.0, &mut scene);
        }
        assert_eq!(tweens.pool.capacity(), 1);
        assert!(!tweens.exists(seen[0]));
    }

    #[test]
    fn completion_callback_can_chain_a_new_tween() {
        let (mut scene, first) = setup();
        let second = scene.spawn_at(Vec3::new(9.0, 9.0, 9.0));
        let looper = scene.spawn_at(Vec3::ZERO);
        let mut tweens = TweenManager::new();

        let chained = Rc::new(Cell::new(None));
        let slot = chained.clone();
        tweens
            .create(
                &scene,
                PathTween::through_points(first, straight(), 1.0).with_on_complete_mut(
                    move |tweens: &mut TweenManager, host: &mut dyn TransformHost| {
                        let tween = PathTween::through_points(
                            second,
                            vec![Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0)],
                            2.0,
                        );
                        slot.set(tweens.create(&*host, tween).ok());
                    },
                ),
            )
            .unwrap();
        let looping = tweens
            .create(&scene, PathTween::through_points(looper, straight(), 10.0).with_loop(true))
            .unwrap();

        assert_eq!(tweens.tick(1.0, &mut scene), 1);
        let chained_id = chained.get().expect("callback ran");
        assert!(tweens.exists(chained_id));
        assert!(tweens.exists(looping));
        // Created mid-tick: not advanced until the next tick.
        assert_eq!(pos(&scene, second), Vec3::new(9.0, 9.0, 9.0));

        tweens.tick(1.0, &mut scene);
        assert!(pos(&scene, second).distance(Vec3::new(1.0, 0.0, 0.0)) < 0.01);
        assert!(pos(&scene, looper).distance(Vec3::new(2.0, 0.0, 0.0)) < 0.01);
    }

    #[test]
    fn completion_callback_can_cancel_a_later_tween() {
        let (mut scene, first) = setup();
        let other = scene.spawn_at(Vec3::new(7.0, 7.0, 7.0));
        let mut tweens = TweenManager::new();

        let victim = Rc::new(Cell::new(TweenId(0)));
        let target = victim.clone();
        tweens
            .create(
                &scene,
                PathTween::through_points(first, straight(), 1.0).with_on_complete_mut(
                    move |tweens: &mut TweenManager, _: &mut dyn TransformHost| {
                        tweens.cancel(target.get()).unwrap();
                    },
                ),
            )
            .unwrap();
        victim.set(
            tweens
                .create(&scene, PathTween::through_points(other, straight(), 10.0))
                .unwrap(),
        );

        tweens.tick(1.0, &mut scene);
        assert!(tweens.is_empty());
        // Cancelled before its turn in the same tick.
        assert_eq!(pos(&scene, other), Vec3::new(7.0, 7.0, 7.0));
    }

    #[test]
    fn tweens_apply_in_registration_order() {
        let (mut scene, node) = setup();
        let mut tweens = TweenManager::new();
        tweens.create(&scene, PathTween::through_points(node, straight(), 10.0)).unwrap();
        let up = vec![Vec3::ZERO, Vec3::new(0.0, 10.0, 0.0)];
        tweens.create(&scene, PathTween::through_points(node, up, 10.0)).unwrap();
        tweens.tick(5.0, &mut scene);
        assert!(pos(&scene, node).distance(Vec3::new(0.0, 5.0, 0.0)) < 0.01);
    }

    #[test]
    fn node_waypoints_are_sampled_once() {
        let (mut scene, node) = setup();
        let a = scene.spawn_at(Vec3::ZERO);
        let b = scene.spawn_at(Vec3::new(0.0, 0.0, 8.0));
        let mut tweens = TweenManager::new();
        tweens.create(&scene, PathTween::through_nodes(node, vec![a, b], 2.0)).unwrap();

        scene.get_mut(b).unwrap().pos = Vec3::new(100.0, 0.0, 0.0);
        tweens.tick(1.0, &mut scene);
        assert!(pos(&scene, node).distance(Vec3::new(0.0, 0.0, 4.0)) < 0.01);
    }

    #[test]
    fn paused_tweens_hold_still() {
        let (mut scene, node) = setup();
        let mut tweens = TweenManager::new();
        let id = tweens.create(&scene, PathTween::through_points(node, straight(), 10.0)).unwrap();
        tweens.tick(2.0, &mut scene);
        tweens.pause(id).unwrap();
        assert_eq!(tweens.is_paused(id), Some(true));
        tweens.tick(5.0, &mut scene);
        assert!((tweens.progress(id).unwrap() - 0.2).abs() < 1e-4);
        tweens.resume(id).unwrap();
        tweens.tick(1.0, &mut scene);
        assert!(pos(&scene, node).distance(Vec3::new(3.0, 0.0, 0.0)) < 0.01);
        assert_eq!(tweens.pause(TweenId(77)), Err(TweenError::NotFound(TweenId(77))));
    }

    #[test]
    fn paused_request_starts_paused() {
        let (mut scene, node) = setup();
        let mut tweens = TweenManager::new();
        let id = tweens
            .create(&scene, PathTween::through_points(node, straight(), 1.0).paused())
            .unwrap();
        tweens.tick(5.0, &mut scene);
        assert_eq!(tweens.progress(id), Some(0.0));
    }

    #[test]
    fn cancel_target_removes_only_that_target() {
        let (mut scene, node) = setup();
        let other = scene.spawn_at(Vec3::ZERO);
        let mut tweens = TweenManager::new();
        tweens.create(&scene, PathTween::through_points(node, straight(), 1.0)).unwrap();
        let kept = tweens.create(&scene, PathTween::through_points(other, straight(), 1.0)).unwrap();
        tweens.create(&scene, PathTween::through_points(node, straight(), 2.0)).unwrap();

        assert_eq!(tweens.cancel_target(node), 2);
        assert_eq!(tweens.len(), 1);
        assert_eq!(tweens.lookup(kept), Some(0));
    }

    #[test]
    fn cancel_all_fires_nothing_and_frees_slots() {
        let (mut scene, node) = setup();
        let mut tweens = TweenManager::new();
        let (fired, on_complete) = counter();
        tweens
            .create(&scene, PathTween::through_points(node, straight(), 1.0).with_on_complete(on_complete))
            .unwrap();
        tweens.create(&scene, PathTween::through_points(node, straight(), 1.0)).unwrap();
        tweens.cancel_all();
        tweens.tick(5.0, &mut scene);
        assert!(tweens.is_empty());
        assert_eq!(tweens.pooled(), 2);
        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn views_expose_paths_in_order() {
        let (scene, node) = setup();
        let mut tweens = TweenManager::with_config(TweenConfig {
            default_segment: 4,
            ..TweenConfig::default()
        });
        tweens.create(&scene, PathTween::through_points(node, straight(), 1.0)).unwrap();
        tweens
            .create(
                &scene,
                PathTween::through_points(node, straight(), 1.0).with_shape(PathwayShape::Curve),
            )
            .unwrap();
        let views: Vec<_> = tweens.iter().collect();
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].path.len(), 2);
        assert_eq!(views[1].path.len(), 4 + 1);
        assert_eq!(views[1].waypoints.len(), 2);
        assert_eq!(views[1].target, node);
    }
}
