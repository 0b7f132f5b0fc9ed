//! Catmull-Rom evaluation over a waypoint list.

use glam::Vec3;

/// Point on the uniform Catmull-Rom segment between `p1` (t = 0) and `p2` (t = 1).
///
/// `p0` and `p3` are the neighbours that shape the tangents
/// (`0.5 * (p2 - p0)` at the start, `0.5 * (p3 - p1)` at the end).
#[inline]
pub fn catmull_rom(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * ((2.0 * p1)
        + (p2 - p0) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (3.0 * p1 - p0 - 3.0 * p2 + p3) * t3)
}

/// Evaluate span `span` (from `points[span]` to `points[span + 1]`) at `t`.
///
/// Neighbours past either end are clamped to the end waypoint, so the curve
/// starts and ends exactly on the first and last waypoints.
pub fn span_point(points: &[Vec3], span: usize, t: f32) -> Vec3 {
    let last = points.len() - 1;
    let at = |i: isize| points[i.clamp(0, last as isize) as usize];
    let i = span as isize;
    catmull_rom(at(i - 1), at(i), at(i + 1), at(i + 2), t)
}
