//! Arc-length path interpolation.
//!
//! A [`PathTable`] samples a waypoint list once (the waypoints themselves for
//! `Line`, `segment` Catmull-Rom samples per span for `Curve`) and stores the
//! cumulative distance to every sample. Progress in [0, 1] is then a fraction
//! of the total length, so speed along the path does not depend on how the
//! waypoints are spaced.

use glam::{Mat3, Quat, Vec3};
use crate::api::types::PathwayShape;
use super::spline::span_point;

/// Result of resolving a progress value on a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSample {
    /// Position on the path.
    pub position: Vec3,
    /// Normalized direction of travel. `None` when it is undefined
    /// (path start, single waypoint, zero-length path); the caller keeps the
    /// previous orientation in that case.
    pub forward: Option<Vec3>,
}

impl PathSample {
    fn at(position: Vec3) -> Self {
        Self { position, forward: None }
    }
}

/// Sampled points of a path plus the cumulative distance to each of them.
#[derive(Debug, Clone, Default)]
pub struct PathTable {
    points: Vec<Vec3>,
    distances: Vec<f32>,
}

impl PathTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table for `waypoints`. `segment` only matters for `Curve`.
    pub fn build(waypoints: &[Vec3], shape: PathwayShape, segment: u32) -> Self {
        let mut table = Self::new();
        table.rebuild(waypoints, shape, segment);
        table
    }

    /// Rebuild in place, keeping the allocated buffers.
    pub fn rebuild(&mut self, waypoints: &[Vec3], shape: PathwayShape, segment: u32) {
        self.clear();
        match shape {
            PathwayShape::Line => self.points.extend_from_slice(waypoints),
            PathwayShape::Curve => {
                let Some(&last) = waypoints.last() else { return };
                let segment = segment.max(1);
                let spans = waypoints.len() - 1;
                self.points.reserve(spans * segment as usize + 1);
                for span in 0..spans {
                    for s in 0..segment {
                        let t = s as f32 / segment as f32;
                        self.points.push(span_point(waypoints, span, t));
                    }
                }
                self.points.push(last);
            }
        }

        self.distances.reserve(self.points.len());
        let mut total = 0.0;
        let mut prev = self.points.first().copied();
        for &p in &self.points {
            if let Some(q) = prev {
                total += q.distance(p);
            }
            self.distances.push(total);
            prev = Some(p);
        }
    }

    /// Drop all samples, keeping capacity.
    pub fn clear(&mut self) {
        self.points.clear();
        self.distances.clear();
    }

    /// Sampled points along the path, first and last waypoint included.
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Cumulative distance at each sampled point. Starts at 0, never decreases.
    pub fn distances(&self) -> &[f32] {
        &self.distances
    }

    pub fn total_length(&self) -> f32 {
        self.distances.last().copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Resolve `progress` without a cursor hint.
    pub fn sample(&self, progress: f32) -> PathSample {
        let mut cursor = 0;
        self.resolve(progress, &mut cursor)
    }

    /// Resolve `progress` in [0, 1] to a position and direction of travel.
    ///
    /// `cursor` is the span found by the previous call; it is checked first
    /// and updated, so a tween moving forward usually skips the search.
    pub fn resolve(&self, progress: f32, cursor: &mut usize) -> PathSample {
        let Some(&first) = self.points.first() else {
            return PathSample::at(Vec3::ZERO);
        };
        let total = self.total_length();
        // Negated compare so NaN progress also lands on the first point.
        if self.points.len() == 1 || total <= 0.0 || !(progress > 0.0) {
            return PathSample::at(first);
        }
        if progress >= 1.0 {
            let last = self.points[self.points.len() - 1];
            return PathSample { position: last, forward: self.last_forward() };
        }

        let target = progress * total;
        let i = self.locate(target, *cursor);
        *cursor = i;

        let (d0, d1) = (self.distances[i], self.distances[i + 1]);
        let (p0, p1) = (self.points[i], self.points[i + 1]);
        let span = d1 - d0;
        if span <= 0.0 {
            return PathSample::at(p0);
        }
        let t = ((target - d0) / span).clamp(0.0, 1.0);
        PathSample {
            position: p0.lerp(p1, t),
            forward: (p1 - p0).try_normalize(),
        }
    }

    /// Smallest span `i` with `distances[i + 1] >= target`.
    /// Requires `0 < target <= total` and at least two samples.
    fn locate(&self, target: f32, hint: usize) -> usize {
        let d = &self.distances;
        let last_span = d.len() - 2;
        for i in [hint, hint + 1] {
            if i <= last_span && d[i] < target && target <= d[i + 1] {
                return i;
            }
        }
        d[1..].partition_point(|&x| x < target).min(last_span)
    }

    /// Direction of the last span with non-zero length.
    fn last_forward(&self) -> Option<Vec3> {
        self.points
            .windows(2)
            .rev()
            .find_map(|w| (w[1] - w[0]).try_normalize())
    }
}

/// Rotation whose local +Z faces `forward`, keeping local +Y as close to `up`
/// as possible. Falls back to the shortest arc when `forward` is parallel to `up`.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    let Some(z) = forward.try_normalize() else {
        return Quat::IDENTITY;
    };
    match up.cross(z).try_normalize() {
        Some(x) => Quat::from_mat3(&Mat3::from_cols(x, z.cross(x), z)),
        None => Quat::from_rotation_arc(Vec3::Z, z),
    }
}
